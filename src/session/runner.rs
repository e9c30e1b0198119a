//! The session turn loop.
//!
//! One session is single-threaded: it suspends only at collaborator calls,
//! each bounded by a cooperative timeout. Controller failures substitute
//! safe defaults; dialogue-agent failures substitute deterministic lines.
//! Both are counted in the record. Running out of turns is a terminal
//! outcome, never an error.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::background::elaborate_background;
use crate::error::{LlmError, SessionError};
use crate::fingerprint::agent_fingerprint;
use crate::llm::{GenerationRequest, LlmProvider, Message};
use crate::manager::{
    build_doctor_manager_input, build_patient_manager_input, parse_doctor_decision,
    parse_patient_guidance,
};
use crate::catalog::personas::persona_by_id;
use crate::profile::{generate_profile, sample_doctor_config, ForcedProfile, PatientProfile};
use crate::prompts::{
    build_doctor_system, build_patient_system, doctor_manager_system, PATIENT_MANAGER_SYSTEM,
};
use crate::session::budget::{ControllerMode, TurnBudget};
use crate::session::disclosure::init_stage;
use crate::session::types::{
    DoctorAction, FallbackCounts, SessionOutcome, SessionRecord, SessionState, Speaker,
};

/// Closing line used when the budget runs out with the patient mid-story.
const EXHAUSTION_CLOSING: &str =
    "Thank you for sharing. Is there anything else you'd like to discuss today?";

/// Per-session configuration shared by the CLI and tests.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model passed to every collaborator call.
    pub model: String,
    pub dialogue_temperature: f64,
    pub dialogue_max_tokens: u32,
    pub manager_temperature: f64,
    pub manager_max_tokens: u32,
    /// Timeout applied to each collaborator call.
    pub call_timeout: Duration,
    /// Skip the background writer entirely.
    pub skip_background: bool,
    /// Force a specific doctor persona instead of sampling one.
    pub forced_persona: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            model: String::new(),
            dialogue_temperature: 0.8,
            dialogue_max_tokens: 400,
            manager_temperature: 0.3,
            manager_max_tokens: 600,
            call_timeout: Duration::from_secs(90),
            skip_background: false,
            forced_persona: None,
        }
    }
}

/// Runs one full session and returns its finished record.
pub async fn run_session(
    provider: &dyn LlmProvider,
    seed: u64,
    forced: &ForcedProfile,
    config: &SessionConfig,
) -> Result<SessionRecord, SessionError> {
    let mut patient = generate_profile(seed, forced)?;
    let doctor = sample_doctor_config(seed, config.forced_persona.as_deref())?;
    let persona = persona_by_id(doctor.persona_id)?;

    let mut background_failed = false;
    if !config.skip_background {
        patient.life_background =
            timed_background(provider, config, &patient).await;
        background_failed = patient.life_background.is_none();
    }

    let fingerprint = agent_fingerprint(&patient, &doctor);
    let budget = TurnBudget::new(doctor.microstyle.pacing, doctor.persona_id);
    let mut state = SessionState::new(budget, init_stage(&patient.voice_style));

    info!(
        seed,
        fingerprint = %fingerprint,
        persona = doctor.persona_id,
        max_turns = budget.max_turns,
        "starting session"
    );

    let doctor_system = build_doctor_system(persona, &doctor.microstyle, patient.life_background.as_ref());
    let patient_system = build_patient_system(&patient);

    // Scripted greeting; does not consume a doctor turn.
    state.say(Speaker::Doctor, persona.first_greeting);
    patient_turn(
        provider,
        config,
        &patient,
        &patient_system,
        &mut state,
        &DoctorAction::Rapport,
    )
    .await;

    let mut outcome = SessionOutcome::BudgetExhausted;

    while state.turn_index < state.budget.max_turns {
        let mode = state.mode();
        debug!(turn = state.turn_index, mode = ?mode, covered = state.covered.len(), "doctor turn");

        let manager_raw = call_text(
            provider,
            config,
            &doctor_manager_system(mode),
            build_doctor_manager_input(persona, &doctor, &patient, &state, mode),
            config.manager_temperature,
            config.manager_max_tokens,
        )
        .await
        .unwrap_or_else(|error| {
            warn!(%error, "doctor controller call failed");
            String::new()
        });

        let decision = parse_doctor_decision(&manager_raw, &state.remaining_items(), mode);
        if decision.fallback {
            state.doctor_fallbacks += 1;
        }

        if let DoctorAction::Checklist(item) = decision.action {
            state.cover(item);
        }
        let ending = mode == ControllerMode::PostChecklist && decision.action == DoctorAction::End;

        let doctor_line = doctor_turn(
            provider,
            config,
            &doctor_system,
            &state,
            &decision.action,
            &decision.instruction,
        )
        .await;
        state.say(Speaker::Doctor, doctor_line);
        state.turn_index += 1;
        let last_action = decision.action.clone();
        state.doctor_decisions.push(decision);

        if ending {
            outcome = SessionOutcome::Completed;
            break;
        }

        if state.turn_index >= state.budget.max_turns {
            break;
        }

        patient_turn(
            provider,
            config,
            &patient,
            &patient_system,
            &mut state,
            &last_action,
        )
        .await;
    }

    // Budget ran out with the patient speaking last: append the wrap-up
    // line so the transcript closes on the doctor.
    if outcome == SessionOutcome::BudgetExhausted
        && matches!(
            state.conversation.last().map(|u| u.speaker),
            Some(Speaker::Patient)
        )
    {
        state.say(Speaker::Doctor, EXHAUSTION_CLOSING);
    }

    info!(
        seed,
        outcome = ?outcome,
        turns = state.turn_index,
        covered = state.covered.len(),
        "session finished"
    );

    Ok(SessionRecord {
        session_id: Uuid::new_v4(),
        created_at: Utc::now(),
        seed,
        model: config.model.clone(),
        fingerprint,
        patient,
        doctor,
        budget,
        transcript: state.conversation,
        doctor_decisions: state.doctor_decisions,
        patient_guidance: state.patient_guidance,
        asked_question_order: state.asked_order,
        final_disclosure: state.disclosure,
        outcome,
        fallbacks: FallbackCounts {
            doctor_manager: state.doctor_fallbacks,
            patient_manager: state.patient_fallbacks,
            background_failed,
        },
    })
}

async fn timed_background(
    provider: &dyn LlmProvider,
    config: &SessionConfig,
    patient: &PatientProfile,
) -> Option<crate::profile::LifeBackground> {
    match tokio::time::timeout(
        config.call_timeout,
        elaborate_background(provider, &config.model, patient),
    )
    .await
    {
        Ok(background) => background,
        Err(_) => {
            warn!("background writer timed out, continuing without background");
            None
        }
    }
}

/// One doctor utterance from the dialogue agent, with a deterministic
/// substitution when the call fails.
async fn doctor_turn(
    provider: &dyn LlmProvider,
    config: &SessionConfig,
    doctor_system: &str,
    state: &SessionState,
    action: &DoctorAction,
    instruction: &str,
) -> String {
    let mut messages = vec![Message::system(doctor_system)];
    for utterance in &state.conversation {
        messages.push(match utterance.speaker {
            Speaker::Doctor => Message::assistant(utterance.text.clone()),
            Speaker::Patient => Message::user(utterance.text.clone()),
        });
    }
    messages.push(Message::user(format!(
        "{} {}",
        action.directive(),
        instruction
    )));

    match call_messages(
        provider,
        config,
        messages,
        config.dialogue_temperature,
        config.dialogue_max_tokens,
    )
    .await
    {
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "doctor agent call failed, substituting scripted line");
            scripted_doctor_line(action)
        }
    }
}

/// Controller guidance plus one patient utterance, with voice-style
/// substitutions on any failure.
async fn patient_turn(
    provider: &dyn LlmProvider,
    config: &SessionConfig,
    patient: &PatientProfile,
    patient_system: &str,
    state: &mut SessionState,
    last_action: &DoctorAction,
) {
    let last_doctor = state
        .last_utterance(Speaker::Doctor)
        .map(|u| u.text.clone())
        .unwrap_or_default();

    let manager_raw = call_text(
        provider,
        config,
        PATIENT_MANAGER_SYSTEM,
        build_patient_manager_input(patient, state, last_action, &last_doctor),
        config.manager_temperature,
        config.manager_max_tokens,
    )
    .await
    .unwrap_or_else(|error| {
        warn!(%error, "patient controller call failed");
        String::new()
    });

    let guidance = parse_patient_guidance(
        &manager_raw,
        &patient.voice_style,
        state.disclosure,
        last_action,
    );
    if guidance.fallback {
        state.patient_fallbacks += 1;
    }
    state.disclosure = guidance.disclosure_stage;

    let mut messages = vec![Message::system(patient_system)];
    for utterance in &state.conversation {
        messages.push(match utterance.speaker {
            Speaker::Doctor => Message::user(utterance.text.clone()),
            Speaker::Patient => Message::assistant(utterance.text.clone()),
        });
    }
    messages.push(Message::user(format!(
        "{}\n\n[How to answer: disclosure {} | length {} | state {} | {}]",
        last_doctor,
        guidance.disclosure_stage.code(),
        guidance.target_length,
        guidance.emotional_state,
        guidance.instruction,
    )));

    let reply = match call_messages(
        provider,
        config,
        messages,
        config.dialogue_temperature,
        config.dialogue_max_tokens,
    )
    .await
    {
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "patient agent call failed, substituting minimal reply");
            "I'm not really sure what to say about that.".to_string()
        }
    };

    state.say(Speaker::Patient, reply);
    state.patient_guidance.push(guidance);
}

fn scripted_doctor_line(action: &DoctorAction) -> String {
    match action {
        DoctorAction::Checklist(item) => format!(
            "I'd like to ask about something else. Over the past two weeks, how much has this \
             been present for you: {}?",
            item.label().to_lowercase()
        ),
        DoctorAction::FollowUp => "Can you tell me a bit more about that?".to_string(),
        DoctorAction::Rapport => "That sounds like a lot to carry.".to_string(),
        DoctorAction::End => {
            "Thank you for sharing today. I'll review everything and we can talk about next \
             steps. Is there anything else you'd like to add before we wrap up?"
                .to_string()
        }
    }
}

async fn call_text(
    provider: &dyn LlmProvider,
    config: &SessionConfig,
    system: &str,
    user: String,
    temperature: f64,
    max_tokens: u32,
) -> Result<String, LlmError> {
    call_messages(
        provider,
        config,
        vec![Message::system(system), Message::user(user)],
        temperature,
        max_tokens,
    )
    .await
}

async fn call_messages(
    provider: &dyn LlmProvider,
    config: &SessionConfig,
    messages: Vec<Message>,
    temperature: f64,
    max_tokens: u32,
) -> Result<String, LlmError> {
    let request = GenerationRequest::new(config.model.clone(), messages)
        .with_temperature(temperature)
        .with_max_tokens(max_tokens);

    let response = tokio::time::timeout(config.call_timeout, provider.generate(request))
        .await
        .map_err(|_| LlmError::Timeout {
            seconds: config.call_timeout.as_secs(),
        })??;

    let model = response.model.clone();
    response
        .first_content()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(LlmError::EmptyResponse(model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::checklist::CHECKLIST_LEN;
    use crate::llm::ScriptedProvider;

    fn test_config() -> SessionConfig {
        SessionConfig {
            model: "test-model".to_string(),
            skip_background: true,
            forced_persona: Some("neutral_efficient".to_string()),
            ..SessionConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fallback_only_session_covers_every_item() {
        // Non-JSON controller output forces the safe default every turn:
        // ask the first remaining item until coverage is complete, then
        // follow up until the budget runs out.
        let provider = ScriptedProvider::new(Vec::new()).with_fallback("not json");
        let record = run_session(&provider, 7, &ForcedProfile::default(), &test_config())
            .await
            .unwrap();

        assert_eq!(record.asked_question_order.len(), CHECKLIST_LEN);
        assert_eq!(record.outcome, SessionOutcome::BudgetExhausted);
        assert_eq!(record.doctor_decisions.len(), record.budget.max_turns);
        assert!(record.fallbacks.doctor_manager >= CHECKLIST_LEN);
        assert!(!record.fallbacks.background_failed);
        // Transcript opens with the persona greeting and closes on the doctor.
        assert_eq!(record.transcript[0].speaker, Speaker::Doctor);
        assert_eq!(record.transcript.last().unwrap().speaker, Speaker::Doctor);
    }

    #[tokio::test]
    async fn test_scripted_end_completes_after_coverage() {
        // Nine valid CHECKLIST decisions then an END decision. Each doctor
        // controller call is followed by a dialogue call and a patient
        // controller + dialogue pair, so interleave filler responses.
        let mut responses = vec![
            "Hi.".to_string(), // patient reply to the greeting
        ];
        // Greeting patient-manager call comes before that reply.
        responses.insert(0, "{}".to_string());
        for item in crate::catalog::checklist::ChecklistItem::ALL {
            responses.push(format!(
                "{{\"next_action\": \"CHECKLIST\", \"checklist_item\": \"{}\", \
                 \"reason\": \"coverage\", \"doctor_instruction\": \"ask plainly\"}}",
                item.label()
            ));
            responses.push("Doctor line.".to_string());
            responses.push("{}".to_string()); // patient controller, fallback guidance
            responses.push("Patient line.".to_string());
        }
        responses.push("{\"next_action\": \"END\", \"reason\": \"done\"}".to_string());
        responses.push("Closing line.".to_string());

        let provider = ScriptedProvider::new(responses);
        let record = run_session(&provider, 11, &ForcedProfile::default(), &test_config())
            .await
            .unwrap();

        assert_eq!(record.outcome, SessionOutcome::Completed);
        assert_eq!(record.asked_question_order.len(), CHECKLIST_LEN);
        assert_eq!(record.doctor_decisions.len(), CHECKLIST_LEN + 1);
        assert_eq!(
            record.doctor_decisions.last().unwrap().action,
            DoctorAction::End
        );
        assert_eq!(record.transcript.last().unwrap().text, "Closing line.");
    }
}
