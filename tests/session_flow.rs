//! Full-session flow over a scripted provider, including background
//! elaboration, disclosure movement, and JSON export.

use dialogue_forge::catalog::checklist::{ChecklistItem, CHECKLIST_LEN};
use dialogue_forge::catalog::pools::{Trust, Verbosity};
use dialogue_forge::export::write_record;
use dialogue_forge::llm::ScriptedProvider;
use dialogue_forge::profile::ForcedProfile;
use dialogue_forge::session::{
    run_session, DisclosureStage, SessionConfig, SessionOutcome, Speaker,
};

const BACKGROUND_JSON: &str = r#"{
    "name": "Marta",
    "age_range": "late forties",
    "pronouns": "she/her",
    "core_roles": ["logistics coordinator", "mother of two"],
    "core_relationships": ["supportive spouse", "distant from her brother"],
    "core_stressor_summary": "A warehouse restructuring put her shift in doubt.",
    "life_facets": [
        {"category": "current_primary_stressor", "salience": "high",
         "description": "Her shift may be cut in the restructuring."}
    ]
}"#;

/// Levers pinned so the session starts at the PARTIAL disclosure stage.
fn forced() -> ForcedProfile {
    ForcedProfile {
        trust: Some(Trust::Neutral),
        verbosity: Some(Verbosity::Moderate),
        ..ForcedProfile::default()
    }
}

fn config() -> SessionConfig {
    SessionConfig {
        model: "test-model".to_string(),
        skip_background: false,
        forced_persona: Some("neutral_efficient".to_string()),
        ..SessionConfig::default()
    }
}

/// One valid controller/dialogue exchange per checklist item, then END.
fn scripted_full_session() -> Vec<String> {
    // Call order: background writer, greeting patient controller, greeting
    // patient reply, then per doctor turn: doctor controller, doctor line,
    // patient controller, patient line. The END turn has no patient half.
    let mut responses = vec![
        BACKGROUND_JSON.to_string(),
        "{}".to_string(),
        "Hi, thanks for seeing me.".to_string(),
    ];
    for item in ChecklistItem::ALL {
        responses.push(format!(
            "{{\"next_action\": \"CHECKLIST\", \"checklist_item\": \"{}\", \
             \"reason\": \"next uncovered item\", \"doctor_instruction\": \"ask gently\"}}",
            item.label()
        ));
        responses.push(format!("Let me ask about {}.", item.label().to_lowercase()));
        responses.push(
            "{\"directness\": \"MED\", \"disclosure_stage\": \"PARTIAL\", \
             \"target_length\": \"MEDIUM\", \"emotional_state\": \"tired\", \
             \"patient_instruction\": \"answer but hold some back\"}"
                .to_string(),
        );
        responses.push("It comes and goes, honestly.".to_string());
    }
    responses.push("{\"next_action\": \"END\", \"reason\": \"all items covered\"}".to_string());
    responses.push("Thank you for sharing today. We can talk next steps soon.".to_string());
    responses
}

#[tokio::test]
async fn scripted_session_completes_with_full_coverage() {
    let provider = ScriptedProvider::new(scripted_full_session());
    let record = run_session(&provider, 5, &forced(), &config())
        .await
        .unwrap();

    assert_eq!(record.outcome, SessionOutcome::Completed);
    assert_eq!(record.asked_question_order.len(), CHECKLIST_LEN);
    // Each item is asked at most once.
    let mut asked = record.asked_question_order.clone();
    asked.sort_by_key(|item| item.index());
    asked.dedup();
    assert_eq!(asked.len(), CHECKLIST_LEN);

    // The background writer's persona made it into the record.
    let background = record.patient.life_background.as_ref().unwrap();
    assert_eq!(background.name, "Marta");
    assert!(!record.fallbacks.background_failed);

    // The controller pinned disclosure to PARTIAL every patient turn.
    assert_eq!(record.final_disclosure, DisclosureStage::Partial);

    // Greeting first, doctor closing last.
    assert_eq!(record.transcript[0].speaker, Speaker::Doctor);
    let last = record.transcript.last().unwrap();
    assert_eq!(last.speaker, Speaker::Doctor);
    assert!(last.text.contains("Thank you"));
}

#[tokio::test]
async fn record_exports_as_readable_json() {
    let provider = ScriptedProvider::new(scripted_full_session());
    let record = run_session(&provider, 5, &forced(), &config())
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_record(dir.path(), &record).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(value["outcome"], "completed");
    assert_eq!(value["seed"], 5);
    assert!(value["fingerprint"].as_str().unwrap().starts_with("AGENT_"));
    assert_eq!(
        value["doctor_decisions"].as_array().unwrap().len(),
        CHECKLIST_LEN + 1
    );
    assert_eq!(value["patient"]["life_background"]["name"], "Marta");
}

#[tokio::test]
async fn controller_failures_degrade_without_aborting() {
    // A provider that never returns JSON: every controller call falls
    // back, but the session still covers the checklist and terminates.
    let provider = ScriptedProvider::new(Vec::new()).with_fallback("mumble");
    let record = run_session(&provider, 9, &forced(), &config())
        .await
        .unwrap();

    assert_eq!(record.outcome, SessionOutcome::BudgetExhausted);
    assert_eq!(record.asked_question_order.len(), CHECKLIST_LEN);
    assert!(record.fallbacks.doctor_manager > 0);
    assert!(record.fallbacks.patient_manager > 0);
    assert!(record.fallbacks.background_failed);
}
