//! Patient controller: input assembly and guidance parsing.

use std::fmt::Write;

use serde::Deserialize;
use tracing::warn;

use crate::catalog::pools::{Trust, Verbosity};
use crate::llm::strip_code_fence;
use crate::profile::{PatientProfile, VoiceStyle};
use crate::session::disclosure::{legal_stages, resolve_stage, DisclosureStage};
use crate::session::types::{DoctorAction, PatientGuidance, SessionState};

/// Builds the stateless patient controller input for one turn.
pub fn build_patient_manager_input(
    patient: &PatientProfile,
    state: &SessionState,
    last_action: &DoctorAction,
    last_doctor_message: &str,
) -> String {
    let voice = &patient.voice_style;
    let mut input = String::new();

    let _ = write!(
        input,
        "Patient profile:\ntemplate_id: {}\nvoice_style: trust={}, verbosity={}, \
         expressiveness={}, intellect={}\npacing: {}\nepisode_density: {}\nmodifiers: {:?}\n\
         emphasized_symptoms: {:?}\n\n",
        patient.template_id.code(),
        voice.trust.code(),
        voice.verbosity.code(),
        voice.expressiveness.code(),
        voice.intellect.code(),
        patient.pacing.code(),
        patient.episode_density.code(),
        patient.modifiers,
        patient
            .emphasized()
            .iter()
            .map(|i| i.label())
            .collect::<Vec<_>>(),
    );

    let _ = write!(input, "Current disclosure_stage: {}\n", state.disclosure.code());
    let legal = legal_stages(state.disclosure, last_action)
        .into_iter()
        .map(DisclosureStage::code)
        .collect::<Vec<_>>();
    let _ = write!(input, "Legal disclosure stages: {}\n\n", legal.join(", "));

    input.push_str("Symptom profile:\n");
    for (item, frequency) in patient.symptom_profile.iter() {
        let _ = writeln!(input, "{}: {}", item.label(), frequency.code());
    }

    let _ = write!(
        input,
        "\nDoctor last move type: {}\n\nFull conversation so far:\n{}\n\n\
         Doctor last message to respond to:\n{}\n\n\
         Task: Decide how the patient should respond next and output JSON only.",
        last_action.tag(),
        state.transcript_text(),
        last_doctor_message,
    );

    input
}

#[derive(Debug, Deserialize)]
struct RawPatientGuidance {
    #[serde(default)]
    directness: String,
    #[serde(default)]
    disclosure_stage: String,
    #[serde(default)]
    target_length: String,
    #[serde(default)]
    emotional_state: String,
    #[serde(default)]
    tone_tags: Vec<String>,
    #[serde(default)]
    key_points_to_reveal: Vec<String>,
    #[serde(default)]
    key_points_to_avoid: Vec<String>,
    #[serde(default)]
    patient_instruction: String,
}

/// Parses the patient controller's output, substituting voice-style
/// defaults for anything missing or malformed.
///
/// The requested disclosure stage is validated against the legal set for
/// the doctor's last action; an illegal request clamps to the current
/// stage rather than failing the session.
pub fn parse_patient_guidance(
    raw: &str,
    voice: &VoiceStyle,
    current: DisclosureStage,
    last_action: &DoctorAction,
) -> PatientGuidance {
    let parsed: Option<RawPatientGuidance> = serde_json::from_str(strip_code_fence(raw)).ok();

    let Some(guidance) = parsed else {
        warn!("patient controller returned invalid JSON, substituting voice-style defaults");
        return default_guidance(voice, current);
    };

    let requested = DisclosureStage::from_code(guidance.disclosure_stage.trim());
    let stage = match requested {
        Some(stage) => resolve_stage(current, stage, last_action),
        None => current,
    };

    let defaults = default_guidance(voice, current);
    PatientGuidance {
        directness: non_empty(guidance.directness, defaults.directness),
        disclosure_stage: stage,
        target_length: non_empty(guidance.target_length, defaults.target_length),
        emotional_state: non_empty(guidance.emotional_state, defaults.emotional_state),
        tone_tags: if guidance.tone_tags.is_empty() {
            defaults.tone_tags
        } else {
            guidance.tone_tags
        },
        key_points_to_reveal: guidance.key_points_to_reveal,
        key_points_to_avoid: guidance.key_points_to_avoid,
        instruction: non_empty(guidance.patient_instruction, defaults.instruction),
        fallback: false,
    }
}

fn non_empty(value: String, fallback: String) -> String {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Guidance derived purely from the sampled voice style.
fn default_guidance(voice: &VoiceStyle, current: DisclosureStage) -> PatientGuidance {
    let target_length = match voice.verbosity {
        Verbosity::Terse => "SHORT",
        Verbosity::Moderate => "MEDIUM",
        Verbosity::Detailed => "LONG",
    };
    let directness = match voice.trust {
        Trust::Guarded => "LOW",
        Trust::Neutral => "MED",
        Trust::Open => "HIGH",
    };

    PatientGuidance {
        directness: directness.to_string(),
        disclosure_stage: current,
        target_length: target_length.to_string(),
        emotional_state: "neutral".to_string(),
        tone_tags: vec!["cooperative".to_string()],
        key_points_to_reveal: Vec::new(),
        key_points_to_avoid: Vec::new(),
        instruction:
            "Answer in a way consistent with your profile, moderately direct, and do not overshare."
                .to_string(),
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::pools::{Expressiveness, Intellect, PatientHumor};

    fn voice(trust: Trust, verbosity: Verbosity) -> VoiceStyle {
        VoiceStyle {
            verbosity,
            expressiveness: Expressiveness::Balanced,
            trust,
            intellect: Intellect::ModerateFunctioning,
            humor: PatientHumor::None,
        }
    }

    #[test]
    fn test_parses_valid_guidance() {
        let raw = r#"{"directness": "MED", "disclosure_stage": "OPEN",
            "target_length": "MEDIUM", "emotional_state": "neutral",
            "tone_tags": ["tired"], "key_points_to_reveal": ["poor sleep"],
            "key_points_to_avoid": [], "patient_instruction": "Mention the sleep trouble."}"#;

        let guidance = parse_patient_guidance(
            raw,
            &voice(Trust::Neutral, Verbosity::Moderate),
            DisclosureStage::Partial,
            &DoctorAction::FollowUp,
        );
        assert_eq!(guidance.disclosure_stage, DisclosureStage::Open);
        assert_eq!(guidance.key_points_to_reveal, vec!["poor sleep"]);
        assert!(!guidance.fallback);
    }

    #[test]
    fn test_illegal_stage_clamps_to_current() {
        let raw = r#"{"disclosure_stage": "OPEN", "patient_instruction": "x"}"#;
        let guidance = parse_patient_guidance(
            raw,
            &voice(Trust::Guarded, Verbosity::Terse),
            DisclosureStage::Minimize,
            &DoctorAction::Checklist(crate::catalog::checklist::ChecklistItem::Fatigue),
        );
        assert_eq!(guidance.disclosure_stage, DisclosureStage::Minimize);
        assert!(!guidance.fallback);
    }

    #[test]
    fn test_invalid_json_yields_voice_style_defaults() {
        let guidance = parse_patient_guidance(
            "no json here",
            &voice(Trust::Guarded, Verbosity::Terse),
            DisclosureStage::Partial,
            &DoctorAction::Rapport,
        );
        assert!(guidance.fallback);
        assert_eq!(guidance.directness, "LOW");
        assert_eq!(guidance.target_length, "SHORT");
        assert_eq!(guidance.disclosure_stage, DisclosureStage::Partial);
    }

    #[test]
    fn test_missing_fields_filled_from_voice_style() {
        let raw = r#"{"disclosure_stage": "PARTIAL"}"#;
        let guidance = parse_patient_guidance(
            raw,
            &voice(Trust::Open, Verbosity::Detailed),
            DisclosureStage::Partial,
            &DoctorAction::FollowUp,
        );
        assert!(!guidance.fallback);
        assert_eq!(guidance.directness, "HIGH");
        assert_eq!(guidance.target_length, "LONG");
        assert_eq!(guidance.emotional_state, "neutral");
    }
}
