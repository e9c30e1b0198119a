//! Disclosure gradient controller.
//!
//! The patient's willingness to disclose evolves across the session as a
//! gradient over three stages. The collaborator proposes the next stage;
//! this module computes which stages are legal and clamps anything else.

use serde::{Deserialize, Serialize};

use crate::catalog::pools::{Trust, Verbosity};
use crate::profile::VoiceStyle;

use super::types::DoctorAction;

/// How openly the patient currently discusses symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisclosureStage {
    Minimize,
    Partial,
    Open,
}

impl DisclosureStage {
    pub fn code(self) -> &'static str {
        match self {
            DisclosureStage::Minimize => "MINIMIZE",
            DisclosureStage::Partial => "PARTIAL",
            DisclosureStage::Open => "OPEN",
        }
    }

    pub fn from_code(code: &str) -> Option<DisclosureStage> {
        match code {
            "MINIMIZE" => Some(DisclosureStage::Minimize),
            "PARTIAL" => Some(DisclosureStage::Partial),
            "OPEN" => Some(DisclosureStage::Open),
            _ => None,
        }
    }

    /// One step toward MINIMIZE, saturating.
    fn regressed(self) -> DisclosureStage {
        match self {
            DisclosureStage::Open => DisclosureStage::Partial,
            _ => DisclosureStage::Minimize,
        }
    }

    /// One step toward OPEN, saturating.
    fn promoted(self) -> DisclosureStage {
        match self {
            DisclosureStage::Minimize => DisclosureStage::Partial,
            _ => DisclosureStage::Open,
        }
    }
}

/// Initial disclosure stage from the sampled voice style.
pub fn init_stage(voice: &VoiceStyle) -> DisclosureStage {
    if voice.trust == Trust::Guarded || voice.verbosity == Verbosity::Terse {
        DisclosureStage::Minimize
    } else if voice.trust == Trust::Open
        && matches!(voice.verbosity, Verbosity::Moderate | Verbosity::Detailed)
    {
        DisclosureStage::Open
    } else {
        DisclosureStage::Partial
    }
}

/// The stages the collaborator may legally pick for the next patient turn.
///
/// Staying put and regressing are always allowed; promotion requires the
/// doctor to have just used FOLLOW_UP or RAPPORT.
pub fn legal_stages(current: DisclosureStage, last_action: &DoctorAction) -> Vec<DisclosureStage> {
    let mut stages = vec![current];

    let regressed = current.regressed();
    if regressed != current {
        stages.push(regressed);
    }

    if matches!(last_action, DoctorAction::FollowUp | DoctorAction::Rapport) {
        let promoted = current.promoted();
        if promoted != current && !stages.contains(&promoted) {
            stages.push(promoted);
        }
    }

    stages
}

/// Resolves the collaborator's requested stage against the legal set.
///
/// An out-of-set request clamps to the current stage rather than erroring;
/// malformed collaborator output is never fatal.
pub fn resolve_stage(
    current: DisclosureStage,
    requested: DisclosureStage,
    last_action: &DoctorAction,
) -> DisclosureStage {
    if legal_stages(current, last_action).contains(&requested) {
        requested
    } else {
        current
    }
}
