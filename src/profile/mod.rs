//! Patient and doctor profile generation.

pub mod facets;
pub mod generator;
pub mod severity;
pub mod types;

pub use generator::{generate_profile, sample_doctor_config, ForcedProfile};
pub use severity::{risk_summary, severity_tier};
pub use types::{
    DoctorConfig, LifeBackground, LifeFacet, Microstyle, PatientProfile, PersonalBackground,
    RequiredFacet, Salience, SeverityTier, SymptomProfile, VoiceStyle,
};
