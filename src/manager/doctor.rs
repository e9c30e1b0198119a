//! Doctor controller: input assembly and decision parsing.

use std::fmt::Write;

use serde::Deserialize;
use tracing::warn;

use crate::catalog::checklist::ChecklistItem;
use crate::catalog::personas::DoctorPersona;
use crate::llm::strip_code_fence;
use crate::profile::{risk_summary, DoctorConfig, PatientProfile};
use crate::session::budget::ControllerMode;
use crate::session::types::{DoctorAction, DoctorDecision, SessionState};

/// Builds the stateless doctor controller input for one turn.
pub fn build_doctor_manager_input(
    persona: &DoctorPersona,
    doctor: &DoctorConfig,
    patient: &PatientProfile,
    state: &SessionState,
    mode: ControllerMode,
) -> String {
    let mut input = String::new();
    let ms = &doctor.microstyle;

    let _ = write!(
        input,
        "Doctor persona:\nid: {}\nstyle: {}\nmicrostyle: warmth={}, directness={}, pacing={}\n\n",
        persona.id,
        persona.style,
        ms.warmth.code(),
        ms.directness.code(),
        ms.pacing.code(),
    );

    let _ = write!(
        input,
        "Patient background: {}\nPatient risk summary: {}\n\n\
         Patient profile:\ntemplate_id: {}\ntrust: {}\nverbosity: {}\npacing: {}\n\
         modifiers: {:?}\nepisode_density: {}\n\n",
        patient.background_summary(),
        risk_summary(&patient.symptom_profile),
        patient.template_id.code(),
        patient.voice_style.trust.code(),
        patient.voice_style.verbosity.code(),
        patient.pacing.code(),
        patient.modifiers,
        patient.episode_density.code(),
    );

    match mode {
        ControllerMode::ForceCoverage => {
            // One required item, no menu.
            if let Some(item) = state.remaining_items().first() {
                let _ = write!(input, "Required checklist item:\n- {}\n\n", item.label());
            }
        }
        ControllerMode::PostChecklist => {
            input.push_str("All checklist items are covered.\n\n");
        }
        _ => {
            input.push_str("Uncovered checklist items:\n");
            for item in state.remaining_items() {
                let _ = writeln!(input, "- {}", item.label());
            }
            input.push('\n');
        }
    }

    let _ = write!(
        input,
        "Doctor turns used: {} of {}\n\nConversation so far:\n{}\n\n\
         Task: Decide next_action and output JSON only.",
        state.turn_index,
        state.budget.max_turns,
        state.transcript_text(),
    );

    input
}

#[derive(Debug, Deserialize)]
struct RawDoctorDecision {
    #[serde(default)]
    next_action: String,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    doctor_instruction: String,
    #[serde(default)]
    checklist_item: String,
}

/// Parses and validates the doctor controller's output for a mode.
///
/// Malformed JSON, an action outside the mode's legal set, or an unknown
/// item label all produce a safe default decision with `fallback` set:
/// the first uncovered item when any remain, FOLLOW_UP otherwise.
pub fn parse_doctor_decision(
    raw: &str,
    remaining: &[ChecklistItem],
    mode: ControllerMode,
) -> DoctorDecision {
    let parsed: Option<RawDoctorDecision> =
        serde_json::from_str(strip_code_fence(raw)).ok();

    let Some(decision) = parsed else {
        warn!(mode = ?mode, "doctor controller returned invalid JSON, substituting default");
        return default_decision(remaining, mode);
    };

    let action = match decision.next_action.as_str() {
        "CHECKLIST" => match resolve_item(&decision.checklist_item, remaining) {
            Some(item) => Some(DoctorAction::Checklist(item)),
            None => None,
        },
        "FOLLOW_UP" => Some(DoctorAction::FollowUp),
        "RAPPORT" => Some(DoctorAction::Rapport),
        "END" => Some(DoctorAction::End),
        _ => None,
    };

    let Some(action) = action.filter(|a| is_legal(a, mode)) else {
        warn!(
            mode = ?mode,
            next_action = %decision.next_action,
            "doctor controller chose an illegal action, substituting default"
        );
        return default_decision(remaining, mode);
    };

    let instruction = if decision.doctor_instruction.trim().is_empty() {
        default_instruction(&action)
    } else {
        decision.doctor_instruction
    };

    DoctorDecision {
        mode,
        action,
        reason: decision.reason,
        instruction,
        fallback: false,
    }
}

/// Mode legality for a parsed action.
fn is_legal(action: &DoctorAction, mode: ControllerMode) -> bool {
    match mode {
        ControllerMode::PostChecklist => matches!(
            action,
            DoctorAction::FollowUp | DoctorAction::Rapport | DoctorAction::End
        ),
        ControllerMode::ForceCoverage => matches!(action, DoctorAction::Checklist(_)),
        ControllerMode::BehindSchedule | ControllerMode::Normal => {
            !matches!(action, DoctorAction::End)
        }
    }
}

/// Maps a free-text item reference back to an uncovered item.
fn resolve_item(label: &str, remaining: &[ChecklistItem]) -> Option<ChecklistItem> {
    let named = ChecklistItem::from_label(label.trim())?;
    remaining.contains(&named).then_some(named)
}

fn default_decision(remaining: &[ChecklistItem], mode: ControllerMode) -> DoctorDecision {
    let action = match remaining.first() {
        Some(item) if mode != ControllerMode::PostChecklist => DoctorAction::Checklist(*item),
        _ => DoctorAction::FollowUp,
    };
    let instruction = default_instruction(&action);
    DoctorDecision {
        mode,
        action,
        reason: "substituted default after malformed controller output".to_string(),
        instruction,
        fallback: true,
    }
}

fn default_instruction(action: &DoctorAction) -> String {
    match action {
        DoctorAction::Checklist(item) => {
            format!("Transition naturally to asking about {}.", item.label())
        }
        DoctorAction::FollowUp => "Follow up on what the patient just said.".to_string(),
        DoctorAction::Rapport => "Connect with the patient as a person.".to_string(),
        DoctorAction::End => "Wrap up the visit warmly.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remaining() -> Vec<ChecklistItem> {
        vec![ChecklistItem::Fatigue, ChecklistItem::SleepDisturbance]
    }

    #[test]
    fn test_parses_valid_checklist_decision() {
        let raw = r#"{"next_action": "CHECKLIST", "reason": "topic settled",
            "doctor_instruction": "Shift to energy levels.",
            "checklist_item": "Fatigue or loss of energy"}"#;
        let decision = parse_doctor_decision(raw, &remaining(), ControllerMode::Normal);
        assert_eq!(decision.action, DoctorAction::Checklist(ChecklistItem::Fatigue));
        assert!(!decision.fallback);
        assert_eq!(decision.instruction, "Shift to energy levels.");
    }

    #[test]
    fn test_tolerates_code_fence() {
        let raw = "```json\n{\"next_action\": \"RAPPORT\", \"doctor_instruction\": \"x\"}\n```";
        let decision = parse_doctor_decision(raw, &remaining(), ControllerMode::Normal);
        assert_eq!(decision.action, DoctorAction::Rapport);
        assert!(!decision.fallback);
    }

    #[test]
    fn test_invalid_json_falls_back_to_first_remaining() {
        let decision = parse_doctor_decision("not json", &remaining(), ControllerMode::Normal);
        assert_eq!(decision.action, DoctorAction::Checklist(ChecklistItem::Fatigue));
        assert!(decision.fallback);
    }

    #[test]
    fn test_invalid_json_post_checklist_falls_back_to_follow_up() {
        let decision = parse_doctor_decision("{", &[], ControllerMode::PostChecklist);
        assert_eq!(decision.action, DoctorAction::FollowUp);
        assert!(decision.fallback);
    }

    #[test]
    fn test_end_is_illegal_before_coverage() {
        let raw = r#"{"next_action": "END", "doctor_instruction": "wrap up"}"#;
        let decision = parse_doctor_decision(raw, &remaining(), ControllerMode::Normal);
        assert!(decision.fallback);
        assert_ne!(decision.action, DoctorAction::End);
    }

    #[test]
    fn test_follow_up_is_illegal_in_force_coverage() {
        let raw = r#"{"next_action": "FOLLOW_UP", "doctor_instruction": "stay here"}"#;
        let decision = parse_doctor_decision(raw, &remaining(), ControllerMode::ForceCoverage);
        assert!(decision.fallback);
        assert_eq!(decision.action, DoctorAction::Checklist(ChecklistItem::Fatigue));
    }

    #[test]
    fn test_covered_item_reference_falls_back() {
        let raw = r#"{"next_action": "CHECKLIST", "checklist_item": "Depressed mood"}"#;
        let decision = parse_doctor_decision(raw, &remaining(), ControllerMode::Normal);
        assert!(decision.fallback);
        assert_eq!(decision.action, DoctorAction::Checklist(ChecklistItem::Fatigue));
    }

    #[test]
    fn test_empty_instruction_gets_default() {
        let raw = r#"{"next_action": "FOLLOW_UP", "doctor_instruction": "  "}"#;
        let decision = parse_doctor_decision(raw, &remaining(), ControllerMode::Normal);
        assert!(!decision.fallback);
        assert_eq!(decision.instruction, "Follow up on what the patient just said.");
    }
}
