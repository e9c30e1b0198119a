//! Fixed configuration tables for profile generation.
//!
//! Everything in this module is immutable, process-wide reference data:
//! the symptom checklist, the behavioral archetype templates, the sampling
//! pools with their weight tables, and the doctor persona registry. The
//! weighting constants are deliberately kept as data rather than buried in
//! control flow so they can be revised without touching the state machine.

pub mod checklist;
pub mod personas;
pub mod pools;
pub mod templates;

pub use checklist::{ChecklistItem, Frequency, CHECKLIST_LEN};
pub use personas::{DoctorPersona, DOCTOR_PERSONAS, EXTENDED_PACING_PERSONAS};
pub use templates::{ArchetypeTemplate, TemplateId, TEMPLATES};
