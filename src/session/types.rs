//! Session state and the persisted session record.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::checklist::ChecklistItem;
use crate::profile::{DoctorConfig, PatientProfile};

use super::budget::{select_mode, ControllerMode, TurnBudget};
use super::disclosure::DisclosureStage;

/// Who produced an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Doctor,
    Patient,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
}

/// The doctor controller's chosen action for a turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "item")]
pub enum DoctorAction {
    /// Ask about one uncovered checklist item.
    Checklist(ChecklistItem),
    FollowUp,
    Rapport,
    End,
}

impl DoctorAction {
    /// Wire tag used in controller JSON.
    pub fn tag(&self) -> &'static str {
        match self {
            DoctorAction::Checklist(_) => "CHECKLIST",
            DoctorAction::FollowUp => "FOLLOW_UP",
            DoctorAction::Rapport => "RAPPORT",
            DoctorAction::End => "END",
        }
    }

    /// Directive tag prefixed to the doctor agent's instruction.
    pub fn directive(&self) -> &'static str {
        match self {
            DoctorAction::Checklist(_) => "<ASK_ITEM>",
            DoctorAction::FollowUp => "<FOLLOW_UP>",
            DoctorAction::Rapport => "<RAPPORT>",
            DoctorAction::End => "<END>",
        }
    }
}

/// A validated doctor controller decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorDecision {
    pub mode: ControllerMode,
    #[serde(flatten)]
    pub action: DoctorAction,
    pub reason: String,
    pub instruction: String,
    /// True when this decision was substituted for malformed output.
    pub fallback: bool,
}

/// Validated patient controller guidance for one patient turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientGuidance {
    pub directness: String,
    pub disclosure_stage: DisclosureStage,
    pub target_length: String,
    pub emotional_state: String,
    pub tone_tags: Vec<String>,
    pub key_points_to_reveal: Vec<String>,
    pub key_points_to_avoid: Vec<String>,
    pub instruction: String,
    /// True when this guidance was substituted for malformed output.
    pub fallback: bool,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The controller chose END after full coverage.
    Completed,
    /// The hard turn cap was reached first. A defined terminal state,
    /// not an error.
    BudgetExhausted,
}

/// Mutable state of one running session.
#[derive(Debug)]
pub struct SessionState {
    pub budget: TurnBudget,
    /// Doctor turns taken so far, greeting excluded.
    pub turn_index: usize,
    pub covered: BTreeSet<ChecklistItem>,
    pub disclosure: DisclosureStage,
    pub conversation: Vec<Utterance>,
    pub doctor_decisions: Vec<DoctorDecision>,
    pub patient_guidance: Vec<PatientGuidance>,
    /// Checklist items in the order they were asked.
    pub asked_order: Vec<ChecklistItem>,
    pub doctor_fallbacks: usize,
    pub patient_fallbacks: usize,
}

impl SessionState {
    pub fn new(budget: TurnBudget, initial_disclosure: DisclosureStage) -> Self {
        SessionState {
            budget,
            turn_index: 0,
            covered: BTreeSet::new(),
            disclosure: initial_disclosure,
            conversation: Vec::new(),
            doctor_decisions: Vec::new(),
            patient_guidance: Vec::new(),
            asked_order: Vec::new(),
            doctor_fallbacks: 0,
            patient_fallbacks: 0,
        }
    }

    /// Uncovered items in canonical order.
    pub fn remaining_items(&self) -> Vec<ChecklistItem> {
        ChecklistItem::ALL
            .into_iter()
            .filter(|item| !self.covered.contains(item))
            .collect()
    }

    /// Marks an item covered and records its asking order.
    /// Coverage is monotone; re-covering is a no-op.
    pub fn cover(&mut self, item: ChecklistItem) {
        if self.covered.insert(item) {
            self.asked_order.push(item);
        }
    }

    /// The controller mode for the upcoming doctor turn.
    pub fn mode(&self) -> ControllerMode {
        select_mode(
            self.turn_index,
            self.budget.max_turns,
            self.covered.len(),
            ChecklistItem::ALL.len(),
            self.budget.target,
        )
    }

    pub fn say(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.conversation.push(Utterance {
            speaker,
            text: text.into(),
        });
    }

    /// The last utterance by the given speaker, if any.
    pub fn last_utterance(&self, speaker: Speaker) -> Option<&Utterance> {
        self.conversation.iter().rev().find(|u| u.speaker == speaker)
    }

    /// Plain-text transcript for controller inputs.
    pub fn transcript_text(&self) -> String {
        self.conversation
            .iter()
            .map(|u| {
                let who = match u.speaker {
                    Speaker::Doctor => "Doctor",
                    Speaker::Patient => "Patient",
                };
                format!("{who}: {}", u.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Fallback substitution counts surfaced in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallbackCounts {
    pub doctor_manager: usize,
    pub patient_manager: usize,
    pub background_failed: bool,
}

/// Immutable persisted record of a finished session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub seed: u64,
    pub model: String,
    pub fingerprint: String,
    pub patient: PatientProfile,
    pub doctor: DoctorConfig,
    pub budget: TurnBudget,
    pub transcript: Vec<Utterance>,
    pub doctor_decisions: Vec<DoctorDecision>,
    pub patient_guidance: Vec<PatientGuidance>,
    pub asked_question_order: Vec<ChecklistItem>,
    pub final_disclosure: DisclosureStage,
    pub outcome: SessionOutcome,
    pub fallbacks: FallbackCounts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::personas::PacingTier;

    fn state() -> SessionState {
        SessionState::new(
            TurnBudget::new(PacingTier::Med, "neutral_efficient"),
            DisclosureStage::Partial,
        )
    }

    #[test]
    fn test_coverage_is_monotone() {
        let mut s = state();
        s.cover(ChecklistItem::Fatigue);
        s.cover(ChecklistItem::Fatigue);
        assert_eq!(s.covered.len(), 1);
        assert_eq!(s.asked_order, vec![ChecklistItem::Fatigue]);
        assert_eq!(s.remaining_items().len(), 8);
    }

    #[test]
    fn test_mode_tracks_coverage() {
        let mut s = state();
        assert_ne!(s.mode(), ControllerMode::PostChecklist);
        for item in ChecklistItem::ALL {
            s.cover(item);
        }
        assert_eq!(s.mode(), ControllerMode::PostChecklist);
    }

    #[test]
    fn test_transcript_text_labels_speakers() {
        let mut s = state();
        s.say(Speaker::Doctor, "Hello.");
        s.say(Speaker::Patient, "Hi.");
        assert_eq!(s.transcript_text(), "Doctor: Hello.\nPatient: Hi.");
        assert_eq!(
            s.last_utterance(Speaker::Patient).map(|u| u.text.as_str()),
            Some("Hi.")
        );
    }
}
