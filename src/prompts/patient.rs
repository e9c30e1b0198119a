//! Patient agent system prompt.

use std::fmt::Write;

use crate::catalog::pools::PacingLevel;
use crate::profile::PatientProfile;

/// Builds the patient system prompt from the sampled profile.
///
/// The ground-truth symptom frequencies are spelled out verbatim so the
/// agent endorses exactly what the profile holds, while everything else
/// shapes voice and texture.
pub fn build_patient_system(profile: &PatientProfile) -> String {
    let template = profile.template_id.template();
    let voice = &profile.voice_style;
    let mut prompt = String::new();

    let _ = write!(
        prompt,
        "### Presentation Pattern ###\n\
         You embody a specific presentation shaped by personality traits:\n\
         - Age range: {}\n\
         - Template: {}\n\
         - Affective style: {}\n\
         - Cognitive style: {}\n\
         - Somatic style: {}\n\
         - Specifier: {}\n\
         - Elaboration pacing: {}\n\
         - Verbosity: {} | Expressiveness: {} | Trust in doctor: {} | Intellect: {} | Humor: {}\n",
        profile.age_range,
        profile.template_id.code(),
        template.affective,
        template.cognitive,
        template.somatic,
        template.specifier,
        profile.pacing.code(),
        voice.verbosity.code(),
        voice.expressiveness.code(),
        voice.trust.code(),
        voice.intellect.code(),
        voice.humor.code(),
    );

    prompt.push_str("\n### Modifiers ###\nThese subtly shape your tone and focus:\n");
    if profile.modifiers.is_empty() {
        prompt.push_str("- none\n");
    } else {
        for modifier in &profile.modifiers {
            let _ = writeln!(prompt, "- {modifier}");
        }
    }

    prompt.push_str("\n### Symptom Profile (past 14 days) ###\n");
    for (item, frequency) in profile.symptom_profile.iter() {
        let _ = writeln!(prompt, "- {}: {}", item.label(), frequency.description());
    }

    prompt.push_str("\n### Current Life Context ###\n");
    if profile.context_domains.is_empty() {
        prompt.push_str("- no clear trigger you can identify\n");
    } else {
        for domain in &profile.context_domains {
            let _ = writeln!(prompt, "- {}", domain.label());
        }
    }

    if let Some(bg) = &profile.life_background {
        let _ = write!(
            prompt,
            "\n### Your Identity ###\n- Name: {}\n- Age: {}\n- Pronouns: {}\n",
            bg.name, bg.age_range, bg.pronouns
        );
        if !bg.core_roles.is_empty() {
            let _ = writeln!(prompt, "- Main roles: {}", bg.core_roles.join(", "));
        }
        for relationship in &bg.core_relationships {
            let _ = writeln!(prompt, "- Relationship: {relationship}");
        }
        if !bg.core_stressor_summary.is_empty() {
            let _ = writeln!(prompt, "- Current stressors: {}", bg.core_stressor_summary);
        }

        // A few concrete hooks, high-salience first.
        let mut facets: Vec<_> = bg.life_facets.iter().collect();
        facets.sort_by_key(|f| f.salience != "high");
        if !facets.is_empty() {
            prompt.push_str("\n### Key Life Details ###\n");
            for facet in facets.iter().take(4) {
                let _ = writeln!(prompt, "- {}", facet.description);
            }
        }
    } else {
        let _ = write!(
            prompt,
            "\n### Personal Background ###\nLight context anchors; don't invent a detailed \
             backstory:\n- {}\n",
            profile.background_summary()
        );
    }

    prompt.push_str(
        "\n### Roleplay Instructions ###\n\
         Be this patient. Let the template, modifiers, and voice style shape word choice, \
         sentence length, and how much you share.\n\
         - Answer the doctor's questions; do not ask your own.\n\
         - Endorse symptoms exactly as the profile above describes; never invent new ones.\n",
    );
    prompt.push_str(match profile.pacing {
        PacingLevel::Low => "- Keep responses short; elaborate only when asked directly.\n",
        PacingLevel::Med => "- Answer with occasional context when relevant.\n",
        PacingLevel::High => "- Elaborate spontaneously with context and detail.\n",
    });
    prompt.push_str(
        "- Vary your wording across turns.\n\
         - Output only your spoken words, with no stage directions.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::pools::EpisodeDensity;
    use crate::catalog::templates::TemplateId;
    use crate::profile::{generate_profile, ForcedProfile};

    #[test]
    fn test_prompt_carries_profile_ground_truth() {
        let profile = generate_profile(
            42,
            &ForcedProfile {
                template: Some(TemplateId::NeuroticismHigh),
                episode_density: Some(EpisodeDensity::Med),
                ..Default::default()
            },
        )
        .expect("generation succeeds");

        let prompt = build_patient_system(&profile);
        assert!(prompt.contains("NEUROTICISM_HIGH"));
        assert!(prompt.contains("Depressed mood"));
        assert!(prompt.contains(profile.age_range));
        // no structured background attached yet
        assert!(prompt.contains("Personal Background"));
    }

    #[test]
    fn test_prompt_prefers_life_background_when_attached() {
        let mut profile = generate_profile(42, &ForcedProfile::default()).expect("ok");
        profile.life_background = Some(crate::profile::LifeBackground {
            name: "Ash".to_string(),
            age_range: profile.age_range.to_string(),
            pronouns: "she/her".to_string(),
            core_roles: vec!["nurse".to_string()],
            core_relationships: vec![],
            core_stressor_summary: "night shifts".to_string(),
            life_facets: vec![],
        });

        let prompt = build_patient_system(&profile);
        assert!(prompt.contains("Name: Ash"));
        assert!(!prompt.contains("Personal Background"));
    }
}
