//! Controller input builders and decision parsing.
//!
//! Controllers are stateless collaborators: every call carries the full
//! context it needs. Their JSON output is parsed tolerantly; anything
//! malformed or illegal for the current mode is replaced with a safe
//! default and flagged in the session record.

pub mod doctor;
pub mod patient;

pub use doctor::{build_doctor_manager_input, parse_doctor_decision};
pub use patient::{build_patient_manager_input, parse_patient_guidance};
