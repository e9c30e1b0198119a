//! Seeded patient and doctor profile generation.
//!
//! Every field draws from its own RNG stream derived from the outer seed
//! and the field name, in a fixed dependency order. Forcing one field
//! therefore never perturbs the draws of any other field. Forced values
//! are validated against the fixed tables before any sampling happens.

use rand::prelude::*;
use tracing::debug;

use crate::catalog::checklist::{ChecklistItem, Frequency};
use crate::catalog::personas::{
    persona_by_id, Animation, Directness, DoctorHumor, DoctorPersona, PacingTier, Warmth,
    DOCTOR_PERSONAS,
};
use crate::catalog::pools::{
    validate_age_range, ContextDomain, EpisodeDensity, Expressiveness, Intellect, Intensity,
    LivingSituation, PacingLevel, PatientHumor, RoutineStability, SupportLevel, Trust, Verbosity,
    WorkRole, AGE_RANGES, MAX_CONTEXT_DOMAINS,
};
use crate::catalog::templates::{ArchetypeTemplate, TemplateId};
use crate::error::ConfigError;
use crate::sampler::{self, field_rng};

use super::facets::select_required_facets;
use super::severity::severity_tier;
use super::types::{
    DoctorConfig, Microstyle, PatientProfile, PersonalBackground, SymptomProfile, VoiceStyle,
};

/// Maximum nuance modifiers drawn from a template's pool.
const MAX_MODIFIERS: usize = 2;

/// Optional per-field overrides; any unset field is sampled.
#[derive(Debug, Clone, Default)]
pub struct ForcedProfile {
    pub template: Option<TemplateId>,
    pub episode_density: Option<EpisodeDensity>,
    pub pacing: Option<PacingLevel>,
    pub age_range: Option<String>,
    pub verbosity: Option<Verbosity>,
    pub expressiveness: Option<Expressiveness>,
    pub trust: Option<Trust>,
    pub intellect: Option<Intellect>,
    pub humor: Option<PatientHumor>,
}

/// Frequency weights for an emphasized item at a given intensity.
/// Rows are over [RARE, SOME, OFTEN]; NONE is never produced here.
fn emphasized_weights(intensity: Intensity) -> [f64; 3] {
    match intensity {
        Intensity::Low => [5.0, 4.0, 1.0],
        Intensity::Med => [1.0, 5.0, 4.0],
        Intensity::High => [0.0, 2.0, 8.0],
    }
}

/// Frequency weights for an ordinary non-emphasized item at a given
/// density. Rows are over [NONE, RARE, SOME].
fn baseline_weights(density: EpisodeDensity) -> [f64; 3] {
    match density {
        // ULTRA_LOW never reaches this path; items outside the target
        // set are pinned to NONE directly.
        EpisodeDensity::UltraLow | EpisodeDensity::Low => [7.0, 2.0, 1.0],
        EpisodeDensity::Med => [5.0, 3.0, 2.0],
        EpisodeDensity::High => [3.0, 3.0, 4.0],
    }
}

const NON_NONE: [Frequency; 3] = [Frequency::Rare, Frequency::Some, Frequency::Often];
const BASELINE: [Frequency; 3] = [Frequency::None, Frequency::Rare, Frequency::Some];

/// Weights for the one elevated non-emphasized item, over [RARE, SOME, OFTEN].
const ELEVATED_WEIGHTS: [f64; 3] = [2.0, 5.0, 3.0];

/// Weights for ULTRA_LOW spill-over items, over [RARE, SOME, OFTEN].
const ULTRA_LOW_WEIGHTS: [f64; 3] = [5.0, 3.0, 2.0];

/// Generates one fully sampled patient profile for an outer seed.
///
/// `life_background` is left unset; the background collaborator fills it
/// in later (or not, when that collaborator is skipped or fails).
pub fn generate_profile(seed: u64, forced: &ForcedProfile) -> Result<PatientProfile, ConfigError> {
    // Validate every forced value before the first draw.
    let forced_age = match &forced.age_range {
        Some(age) => Some(validate_age_range(age)?),
        None => None,
    };

    let template_id = match forced.template {
        Some(id) => id,
        None => {
            let mut rng = field_rng(seed, "template");
            *sampler::uniform_choice(&mut rng, &TemplateId::ALL)?
        }
    };
    let template = template_id.template();

    let episode_density = match forced.episode_density {
        Some(density) => density,
        None => {
            let mut rng = field_rng(seed, "density");
            *sampler::weighted_choice(&mut rng, &EpisodeDensity::ALL, &EpisodeDensity::WEIGHTS)?
        }
    };

    let pacing = match forced.pacing {
        Some(pacing) => pacing,
        None => {
            let mut rng = field_rng(seed, "pacing");
            *sampler::uniform_choice(&mut rng, &PacingLevel::ALL)?
        }
    };

    // Work role is drawn before age because it conditions the age weights.
    let work_role = {
        let mut rng = field_rng(seed, "work_role");
        *sampler::uniform_choice(&mut rng, &WorkRole::ALL)?
    };

    let age_range = match forced_age {
        Some(age) => age,
        None => {
            let mut rng = field_rng(seed, "age_range");
            *sampler::weighted_choice(&mut rng, &AGE_RANGES, &work_role.age_weights())?
        }
    };

    let voice_style = VoiceStyle {
        verbosity: match forced.verbosity {
            Some(v) => v,
            None => {
                let mut rng = field_rng(seed, "verbosity");
                *sampler::uniform_choice(&mut rng, &Verbosity::ALL)?
            }
        },
        expressiveness: match forced.expressiveness {
            Some(e) => e,
            None => {
                let mut rng = field_rng(seed, "expressiveness");
                *sampler::uniform_choice(&mut rng, &Expressiveness::ALL)?
            }
        },
        trust: match forced.trust {
            Some(t) => t,
            None => {
                let mut rng = field_rng(seed, "trust");
                *sampler::uniform_choice(&mut rng, &Trust::ALL)?
            }
        },
        intellect: match forced.intellect {
            Some(i) => i,
            None => {
                let mut rng = field_rng(seed, "intellect");
                *sampler::uniform_choice(&mut rng, &Intellect::ALL)?
            }
        },
        humor: match forced.humor {
            Some(h) => h,
            None => {
                let mut rng = field_rng(seed, "p_humor");
                *sampler::weighted_choice(&mut rng, &PatientHumor::ALL, &PatientHumor::WEIGHTS)?
            }
        },
    };

    let context_domains = {
        let mut rng = field_rng(seed, "context_domains");
        let count = rng.random_range(0..=MAX_CONTEXT_DOMAINS);
        sampler::sample_without_replacement(&mut rng, &ContextDomain::ALL, count)?
    };

    let personal_background = PersonalBackground {
        living_situation: {
            let mut rng = field_rng(seed, "living_situation");
            *sampler::uniform_choice(&mut rng, &LivingSituation::ALL)?
        },
        work_role,
        routine_stability: {
            let mut rng = field_rng(seed, "routine_stability");
            *sampler::uniform_choice(&mut rng, &RoutineStability::ALL)?
        },
        support_level: {
            let mut rng = field_rng(seed, "support_level");
            *sampler::uniform_choice(&mut rng, &SupportLevel::ALL)?
        },
    };

    let modifiers = {
        let mut rng = field_rng(seed, "modifiers");
        let count = rng.random_range(0..=MAX_MODIFIERS.min(template.modifier_pool.len()));
        sampler::sample_without_replacement(&mut rng, template.modifier_pool, count)?
            .into_iter()
            .map(str::to_string)
            .collect()
    };

    let symptom_profile = build_symptom_profile(seed, template, episode_density)?;
    let severity = severity_tier(&symptom_profile);

    let required_facets = {
        let mut rng = field_rng(seed, "facets");
        select_required_facets(&mut rng, &context_domains, severity)?
    };

    debug!(
        template = template_id.code(),
        density = episode_density.code(),
        severity = severity.label(),
        active_symptoms = symptom_profile.active_count(),
        "sampled patient profile"
    );

    Ok(PatientProfile {
        template_id,
        modifiers,
        episode_density,
        pacing,
        age_range,
        voice_style,
        context_domains,
        personal_background,
        symptom_profile,
        severity_tier: severity,
        required_facets,
        life_background: None,
    })
}

/// Builds the ground-truth symptom frequencies for one profile.
fn build_symptom_profile(
    seed: u64,
    template: &ArchetypeTemplate,
    density: EpisodeDensity,
) -> Result<SymptomProfile, ConfigError> {
    let mut profile = SymptomProfile::empty();

    if density == EpisodeDensity::UltraLow {
        // Sparse presentation: only 0-2 items are present at all,
        // emphasized items first.
        let mut rng = field_rng(seed, "symptoms");
        let target = rng.random_range(0..=2usize);
        let emphasized_count = target.min(template.emphasized.len());
        let chosen =
            sampler::sample_without_replacement(&mut rng, template.emphasized, emphasized_count)?;

        let mut intensity_rng = field_rng(seed, "intensity");
        for item in &chosen {
            let intensity = *sampler::weighted_choice(
                &mut intensity_rng,
                &Intensity::ALL,
                &Intensity::WEIGHTS,
            )?;
            let frequency =
                *sampler::weighted_choice(&mut rng, &NON_NONE, &emphasized_weights(intensity))?;
            profile.set(*item, frequency);
        }

        if target > emphasized_count {
            let others: Vec<ChecklistItem> = ChecklistItem::ALL
                .into_iter()
                .filter(|item| !template.emphasized.contains(item))
                .collect();
            let spill =
                sampler::sample_without_replacement(&mut rng, &others, target - emphasized_count)?;
            for item in spill {
                let frequency =
                    *sampler::weighted_choice(&mut rng, &NON_NONE, &ULTRA_LOW_WEIGHTS)?;
                profile.set(item, frequency);
            }
        }

        return Ok(profile);
    }

    // Emphasized items: per-item intensity, then frequency from the
    // intensity row.
    let mut intensity_rng = field_rng(seed, "intensity");
    let mut symptom_rng = field_rng(seed, "symptoms");
    for item in template.emphasized {
        let intensity =
            *sampler::weighted_choice(&mut intensity_rng, &Intensity::ALL, &Intensity::WEIGHTS)?;
        let frequency =
            *sampler::weighted_choice(&mut symptom_rng, &NON_NONE, &emphasized_weights(intensity))?;
        profile.set(*item, frequency);
    }

    // Optionally lift one non-emphasized item above the baseline.
    let elevated_item = {
        let mut rng = field_rng(seed, "elevation");
        if rng.random::<f64>() < 0.5 {
            let others: Vec<ChecklistItem> = ChecklistItem::ALL
                .into_iter()
                .filter(|item| !template.emphasized.contains(item))
                .collect();
            Some(*sampler::uniform_choice(&mut rng, &others)?)
        } else {
            None
        }
    };

    for item in ChecklistItem::ALL {
        if template.emphasized.contains(&item) {
            continue;
        }
        let frequency = if elevated_item == Some(item) {
            *sampler::weighted_choice(&mut symptom_rng, &NON_NONE, &ELEVATED_WEIGHTS)?
        } else {
            *sampler::weighted_choice(&mut symptom_rng, &BASELINE, &baseline_weights(density))?
        };
        profile.set(item, frequency);
    }

    Ok(profile)
}

/// Samples the doctor-side configuration for a session.
pub fn sample_doctor_config(
    seed: u64,
    forced_persona: Option<&str>,
) -> Result<DoctorConfig, ConfigError> {
    let persona: &'static DoctorPersona = match forced_persona {
        Some(id) => persona_by_id(id)?,
        None => {
            let mut rng = field_rng(seed, "persona");
            sampler::uniform_choice(&mut rng, &DOCTOR_PERSONAS)?
        }
    };

    let microstyle = Microstyle {
        warmth: {
            let mut rng = field_rng(seed, "d_warmth");
            *sampler::uniform_choice(&mut rng, &Warmth::ALL)?
        },
        directness: {
            let mut rng = field_rng(seed, "d_directness");
            *sampler::uniform_choice(&mut rng, &Directness::ALL)?
        },
        pacing: {
            let mut rng = field_rng(seed, "d_pacing");
            *sampler::uniform_choice(&mut rng, &PacingTier::ALL)?
        },
        humor: {
            let mut rng = field_rng(seed, "d_humor");
            *sampler::weighted_choice(&mut rng, &DoctorHumor::ALL, &DoctorHumor::WEIGHTS)?
        },
        animation: {
            let mut rng = field_rng(seed, "d_animation");
            *sampler::weighted_choice(&mut rng, &Animation::ALL, &Animation::WEIGHTS)?
        },
    };

    Ok(DoctorConfig {
        persona_id: persona.id,
        microstyle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let forced = ForcedProfile::default();
        let a = generate_profile(42, &forced).expect("generation succeeds");
        let b = generate_profile(42, &forced).expect("generation succeeds");
        assert_eq!(a, b);

        let c = generate_profile(43, &forced).expect("generation succeeds");
        assert_ne!(a, c);
    }

    #[test]
    fn test_forcing_template_leaves_other_fields_untouched() {
        let free = generate_profile(7, &ForcedProfile::default()).expect("ok");
        let forced = generate_profile(
            7,
            &ForcedProfile {
                template: Some(TemplateId::OpennessLow),
                ..Default::default()
            },
        )
        .expect("ok");

        assert_eq!(forced.template_id, TemplateId::OpennessLow);
        assert_eq!(free.episode_density, forced.episode_density);
        assert_eq!(free.pacing, forced.pacing);
        assert_eq!(free.age_range, forced.age_range);
        assert_eq!(free.voice_style, forced.voice_style);
        assert_eq!(free.context_domains, forced.context_domains);
        assert_eq!(free.personal_background, forced.personal_background);
    }

    #[test]
    fn test_invalid_forced_age_rejected_before_sampling() {
        let result = generate_profile(
            1,
            &ForcedProfile {
                age_range: Some("17-23".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(ConfigError::UnknownAgeRange(_))));
    }

    #[test]
    fn test_ultra_low_density_is_sparse() {
        for seed in 0..100 {
            let profile = generate_profile(
                seed,
                &ForcedProfile {
                    template: Some(TemplateId::NeuroticismHigh),
                    episode_density: Some(EpisodeDensity::UltraLow),
                    ..Default::default()
                },
            )
            .expect("generation succeeds");
            assert!(
                profile.symptom_profile.active_count() <= 2,
                "seed {seed}: {} active items",
                profile.symptom_profile.active_count()
            );
        }
    }

    #[test]
    fn test_emphasized_items_always_present_at_standard_density() {
        for seed in 0..100 {
            let profile = generate_profile(
                seed,
                &ForcedProfile {
                    episode_density: Some(EpisodeDensity::Med),
                    ..Default::default()
                },
            )
            .expect("generation succeeds");
            for item in profile.emphasized() {
                assert!(
                    profile.symptom_profile.get(*item) > Frequency::None,
                    "seed {seed}: emphasized {:?} at NONE",
                    item
                );
            }
        }
    }

    #[test]
    fn test_structural_guarantees() {
        for seed in 0..50 {
            let profile =
                generate_profile(seed, &ForcedProfile::default()).expect("generation succeeds");
            assert!(profile.modifiers.len() <= MAX_MODIFIERS);
            assert!(profile.context_domains.len() <= MAX_CONTEXT_DOMAINS);
            assert!((5..=8).contains(&profile.required_facets.len()));
            assert_eq!(
                profile.severity_tier,
                severity_tier(&profile.symptom_profile)
            );
            assert!(profile.life_background.is_none());
        }
    }

    #[test]
    fn test_doctor_config_deterministic_and_forceable() {
        let a = sample_doctor_config(5, None).expect("ok");
        let b = sample_doctor_config(5, None).expect("ok");
        assert_eq!(a, b);

        let forced = sample_doctor_config(5, Some("dismissive_rushed")).expect("ok");
        assert_eq!(forced.persona_id, "dismissive_rushed");
        assert_eq!(forced.microstyle, a.microstyle);

        assert!(sample_doctor_config(5, Some("nonexistent_persona")).is_err());
    }
}
