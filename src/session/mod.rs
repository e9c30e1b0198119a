//! Session orchestration: turn budget, disclosure pacing, state,
//! and the turn loop itself.

pub mod budget;
pub mod disclosure;
pub mod runner;
pub mod types;

pub use budget::{select_mode, ControllerMode, TurnBudget};
pub use disclosure::{init_stage, legal_stages, resolve_stage, DisclosureStage};
pub use runner::{run_session, SessionConfig};
pub use types::{
    DoctorAction, DoctorDecision, FallbackCounts, PatientGuidance, SessionOutcome, SessionRecord,
    SessionState, Speaker, Utterance,
};
