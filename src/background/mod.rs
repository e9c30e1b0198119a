//! Background elaboration: turn a sampled profile into a life context.
//!
//! A single collaborator call expands the required facet categories into a
//! structured [`LifeBackground`]. Failure here never fails the session;
//! the caller proceeds without a background and the degradation is
//! recorded.

use std::fmt::Write;

use serde::Deserialize;
use tracing::warn;

use crate::catalog::pools::LIFE_FACET_CATEGORIES;
use crate::error::LlmError;
use crate::llm::{strip_code_fence, GenerationRequest, LlmProvider, Message};
use crate::profile::{LifeBackground, LifeFacet, PatientProfile};
use crate::prompts::build_background_writer_system;

const BACKGROUND_TEMPERATURE: f64 = 0.9;
const BACKGROUND_MAX_TOKENS: u32 = 1500;

/// Builds the background writer user input from the sampled profile.
pub fn build_background_input(patient: &PatientProfile) -> String {
    let voice = &patient.voice_style;
    let mut input = String::new();

    let _ = write!(
        input,
        "age_range: {}\n\nPersonality:\ntemplate_id: {}\nmodifiers: {:?}\n\
         voice_style: trust={}, verbosity={}, expressiveness={}, intellect={}, humor={}\n\
         pacing: {}\nepisode_density: {}\nseverity: {}\n\n",
        patient.age_range,
        patient.template_id.code(),
        patient.modifiers,
        voice.trust.code(),
        voice.verbosity.code(),
        voice.expressiveness.code(),
        voice.intellect.code(),
        voice.humor.code(),
        patient.pacing.code(),
        patient.episode_density.code(),
        patient.severity_tier.label(),
    );

    input.push_str("Symptom profile:\n");
    for (item, frequency) in patient.symptom_profile.iter() {
        let _ = writeln!(input, "{}: {}", item.label(), frequency.code());
    }

    let _ = write!(
        input,
        "\nBackground tags: {}\ncontext_domains: {:?}\n\nrequired_facets:\n",
        patient.background_summary(),
        patient
            .context_domains
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>(),
    );
    for facet in &patient.required_facets {
        let _ = writeln!(
            input,
            "- {} (salience hint: {:?})",
            facet.category, facet.salience
        );
    }

    let _ = write!(
        input,
        "\nall_facets: {}\n\nTask: Write the life background and output JSON only.",
        LIFE_FACET_CATEGORIES.join(", "),
    );

    input
}

#[derive(Debug, Deserialize)]
struct RawBackground {
    name: String,
    age_range: String,
    #[serde(default)]
    pronouns: String,
    #[serde(default)]
    core_roles: Vec<String>,
    #[serde(default)]
    core_relationships: Vec<String>,
    #[serde(default)]
    core_stressor_summary: String,
    #[serde(default)]
    life_facets: Vec<RawFacet>,
}

#[derive(Debug, Deserialize)]
struct RawFacet {
    category: String,
    #[serde(default)]
    salience: String,
    description: String,
}

/// Parses the background writer's JSON output.
pub fn parse_background(raw: &str) -> Result<LifeBackground, LlmError> {
    let parsed: RawBackground = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| LlmError::ParseError(format!("background JSON: {e}")))?;

    Ok(LifeBackground {
        name: parsed.name,
        age_range: parsed.age_range,
        pronouns: parsed.pronouns,
        core_roles: parsed.core_roles,
        core_relationships: parsed.core_relationships,
        core_stressor_summary: parsed.core_stressor_summary,
        life_facets: parsed
            .life_facets
            .into_iter()
            .map(|f| LifeFacet {
                category: f.category,
                salience: f.salience,
                description: f.description,
            })
            .collect(),
    })
}

/// Runs the background writer for a profile.
///
/// Returns `None` when the collaborator fails or produces unusable
/// output; the caller records the degradation and continues.
pub async fn elaborate_background(
    provider: &dyn LlmProvider,
    model: &str,
    patient: &PatientProfile,
) -> Option<LifeBackground> {
    let request = GenerationRequest::new(
        model,
        vec![
            Message::system(build_background_writer_system()),
            Message::user(build_background_input(patient)),
        ],
    )
    .with_temperature(BACKGROUND_TEMPERATURE)
    .with_max_tokens(BACKGROUND_MAX_TOKENS);

    let response = match provider.generate(request).await {
        Ok(response) => response,
        Err(error) => {
            warn!(%error, "background writer call failed, continuing without background");
            return None;
        }
    };

    let content = response.first_content()?;
    match parse_background(content) {
        Ok(background) => Some(background),
        Err(error) => {
            warn!(%error, "background writer output unusable, continuing without background");
            None
        }
    }
}
