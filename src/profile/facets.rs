//! Required life-facet selection with adversity gating.
//!
//! Picks the 5-8 facet categories the background elaboration must cover.
//! Weights are boosted for categories matching the profile's context
//! domains; adversity-tagged categories are down-weighted for minimal/mild
//! severity and up-weighted for moderate/severe. Two hard caps hold
//! regardless of weights: at most 2 adversity categories in the required
//! set, and at most 1 of those marked high salience.

use rand::prelude::*;

use crate::catalog::pools::{is_adversity_facet, ContextDomain, LIFE_FACET_CATEGORIES};
use crate::error::SamplerError;
use crate::sampler;

use super::types::{RequiredFacet, Salience, SeverityTier};

/// The facet category every profile must cover, at high salience.
pub const PRIMARY_STRESSOR_FACET: &str = "current_primary_stressor";

const MAX_ADVERSITY_FACETS: usize = 2;
const MAX_HIGH_SALIENCE_ADVERSITY: usize = 1;
const SELECTION_ATTEMPTS: usize = 100;

/// Weight multipliers applied on top of the base weight of 1.0.
fn boost(category: &str, context_domains: &[ContextDomain]) -> f64 {
    let mut weight: f64 = 1.0;

    for domain in context_domains {
        let boosted = match domain {
            ContextDomain::WorkRoleStrain => match category {
                "work_or_study_pressure" => 3.0,
                "sense_of_achievement" | "role_conflicts" | "responsibility_load" => 2.0,
                _ => 0.0,
            },
            ContextDomain::RelationshipsStrain => match category {
                "family_relationship_pattern" => 2.5,
                "closest_friend_or_confidant"
                | "key_partner_or_love_interest"
                | "conflictual_relationship" => 2.0,
                _ => 0.0,
            },
            ContextDomain::HealthConcern => match category {
                "physical_health_constraints" => 3.0,
                "sleep_pattern_tendency" => 2.0,
                "body_image_concerns_or_comfort" => 1.5,
                _ => 0.0,
            },
            ContextDomain::SelfWorthStrain => match category {
                "self_view" | "beliefs_about_self_worth" => 2.5,
                "identity_stage" => 2.0,
                _ => 0.0,
            },
            ContextDomain::LifeTransition => match category {
                "significant_move_or_transition" => 2.5,
                "stalled_goal" | "loss_or_change" => 2.0,
                _ => 0.0,
            },
            ContextDomain::Grief => match category {
                "loss_or_change" => 3.0,
                "unresolved_issue" => 2.0,
                _ => 0.0,
            },
            ContextDomain::GeneralStress => 0.0,
        };
        weight = weight.max(boosted);
    }

    match category {
        PRIMARY_STRESSOR_FACET => 4.0,
        "coping_style" => weight.max(2.5),
        _ => weight,
    }
}

/// Adversity gate multiplier as a function of severity tier.
fn adversity_gate(tier: SeverityTier) -> f64 {
    match tier {
        SeverityTier::Minimal | SeverityTier::Mild => 0.5,
        SeverityTier::Moderate | SeverityTier::Severe => 1.5,
    }
}

/// Selects 5-8 required facet categories with salience hints.
///
/// The primary stressor category is always present and high-salience. The
/// adversity caps are enforced by the selection loop itself; a weight table
/// that favors adversity can never push past them.
pub fn select_required_facets<R: Rng>(
    rng: &mut R,
    context_domains: &[ContextDomain],
    tier: SeverityTier,
) -> Result<Vec<RequiredFacet>, SamplerError> {
    let mut weights = Vec::with_capacity(LIFE_FACET_CATEGORIES.len());
    for category in LIFE_FACET_CATEGORIES {
        let mut weight = boost(category, context_domains);
        if is_adversity_facet(category) {
            weight *= adversity_gate(tier);
        }
        weights.push(weight);
    }

    let facet_count = rng.random_range(5..=8usize);

    let mut selected = vec![RequiredFacet {
        category: PRIMARY_STRESSOR_FACET.to_string(),
        salience: Salience::High,
    }];
    let mut adversity_count = 0usize;
    let mut adversity_high = 0usize;

    let mut attempts = 0;
    while selected.len() < facet_count && attempts < SELECTION_ATTEMPTS {
        attempts += 1;
        let index = sampler::weighted_index(rng, LIFE_FACET_CATEGORIES.len(), &weights)?;
        let category = LIFE_FACET_CATEGORIES[index];

        if selected.iter().any(|f| f.category == category) {
            continue;
        }

        let adversity = is_adversity_facet(category);
        if adversity && adversity_count >= MAX_ADVERSITY_FACETS {
            continue;
        }

        // ~30% of secondary facets are hinted high salience.
        let mut salience = if rng.random::<f64>() < 0.3 {
            Salience::High
        } else {
            Salience::Med
        };
        if adversity {
            if salience == Salience::High && adversity_high >= MAX_HIGH_SALIENCE_ADVERSITY {
                salience = Salience::Med;
            }
            adversity_count += 1;
            if salience == Salience::High {
                adversity_high += 1;
            }
        }

        selected.push(RequiredFacet {
            category: category.to_string(),
            salience,
        });
    }

    // Rejection sampling can stall only if nearly everything was excluded;
    // top up deterministically from unselected non-adversity categories.
    if selected.len() < facet_count {
        for category in LIFE_FACET_CATEGORIES {
            if selected.len() >= facet_count {
                break;
            }
            if is_adversity_facet(category) || selected.iter().any(|f| f.category == category) {
                continue;
            }
            selected.push(RequiredFacet {
                category: category.to_string(),
                salience: Salience::Med,
            });
        }
    }

    Ok(selected)
}
