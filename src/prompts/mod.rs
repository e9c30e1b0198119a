//! System prompt builders for the role agents and controllers.
//!
//! Prompts are assembled from the sampled configuration; no free text from
//! collaborators ever flows back into a system prompt.

pub mod background;
pub mod doctor;
pub mod manager;
pub mod patient;

pub use background::build_background_writer_system;
pub use doctor::build_doctor_system;
pub use manager::{doctor_manager_system, PATIENT_MANAGER_SYSTEM};
pub use patient::build_patient_system;
