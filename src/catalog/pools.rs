//! Sampling pools and weight tables for profile dimensions.
//!
//! All weighting constants live here as data. They are fixed heuristics
//! carried over from the reference distributions; revising them must not
//! require touching the generator or the session state machine.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Overall symptom sparsity dial, independent of which items are emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EpisodeDensity {
    UltraLow,
    Low,
    Med,
    High,
}

impl EpisodeDensity {
    pub const ALL: [EpisodeDensity; 4] = [
        EpisodeDensity::UltraLow,
        EpisodeDensity::Low,
        EpisodeDensity::Med,
        EpisodeDensity::High,
    ];

    /// Sampling weights ~ 10/25/45/20 percent.
    pub const WEIGHTS: [f64; 4] = [1.0, 2.5, 4.5, 2.0];

    pub fn code(self) -> &'static str {
        match self {
            EpisodeDensity::UltraLow => "ULTRA_LOW",
            EpisodeDensity::Low => "LOW",
            EpisodeDensity::Med => "MED",
            EpisodeDensity::High => "HIGH",
        }
    }

    pub fn parse(code: &str) -> Result<EpisodeDensity, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|d| d.code() == code)
            .ok_or_else(|| ConfigError::InvalidFieldValue {
                field: "episode_density".to_string(),
                value: code.to_string(),
            })
    }
}

/// Patient elaboration pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PacingLevel {
    Low,
    Med,
    High,
}

impl PacingLevel {
    pub const ALL: [PacingLevel; 3] = [PacingLevel::Low, PacingLevel::Med, PacingLevel::High];

    pub fn code(self) -> &'static str {
        match self {
            PacingLevel::Low => "LOW",
            PacingLevel::Med => "MED",
            PacingLevel::High => "HIGH",
        }
    }

    pub fn parse(code: &str) -> Result<PacingLevel, ConfigError> {
        PacingLevel::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ConfigError::InvalidFieldValue {
                field: "pacing".to_string(),
                value: code.to_string(),
            })
    }
}

/// Symptom intensity for emphasized items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intensity {
    Low,
    Med,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Med, Intensity::High];

    /// Sampling weights ~ 30/50/20 percent.
    pub const WEIGHTS: [f64; 3] = [3.0, 5.0, 2.0];
}

/// Voice style: how much the patient says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Terse,
    Moderate,
    Detailed,
}

impl Verbosity {
    pub const ALL: [Verbosity; 3] = [Verbosity::Terse, Verbosity::Moderate, Verbosity::Detailed];

    pub fn code(self) -> &'static str {
        match self {
            Verbosity::Terse => "terse",
            Verbosity::Moderate => "moderate",
            Verbosity::Detailed => "detailed",
        }
    }

    pub fn parse(code: &str) -> Result<Verbosity, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|v| v.code() == code)
            .ok_or_else(|| ConfigError::InvalidFieldValue {
                field: "verbosity".to_string(),
                value: code.to_string(),
            })
    }
}

/// Voice style: emotional coloring of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expressiveness {
    Flat,
    Balanced,
    Intense,
}

impl Expressiveness {
    pub const ALL: [Expressiveness; 3] = [
        Expressiveness::Flat,
        Expressiveness::Balanced,
        Expressiveness::Intense,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Expressiveness::Flat => "flat",
            Expressiveness::Balanced => "balanced",
            Expressiveness::Intense => "intense",
        }
    }

    pub fn parse(code: &str) -> Result<Expressiveness, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|e| e.code() == code)
            .ok_or_else(|| ConfigError::InvalidFieldValue {
                field: "expressiveness".to_string(),
                value: code.to_string(),
            })
    }
}

/// Voice style: willingness to disclose to the doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trust {
    Guarded,
    Neutral,
    Open,
}

impl Trust {
    pub const ALL: [Trust; 3] = [Trust::Guarded, Trust::Neutral, Trust::Open];

    pub fn code(self) -> &'static str {
        match self {
            Trust::Guarded => "guarded",
            Trust::Neutral => "neutral",
            Trust::Open => "open",
        }
    }

    pub fn parse(code: &str) -> Result<Trust, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| ConfigError::InvalidFieldValue {
                field: "trust".to_string(),
                value: code.to_string(),
            })
    }
}

/// Voice style: articulateness and insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intellect {
    LowFunctioning,
    ModerateFunctioning,
    HighFunctioning,
}

impl Intellect {
    pub const ALL: [Intellect; 3] = [
        Intellect::LowFunctioning,
        Intellect::ModerateFunctioning,
        Intellect::HighFunctioning,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Intellect::LowFunctioning => "low-functioning",
            Intellect::ModerateFunctioning => "moderate-functioning",
            Intellect::HighFunctioning => "high-functioning",
        }
    }

    pub fn parse(code: &str) -> Result<Intellect, ConfigError> {
        Intellect::ALL
            .into_iter()
            .find(|i| i.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ConfigError::InvalidFieldValue {
                field: "intellect".to_string(),
                value: code.to_string(),
            })
    }
}

/// Patient humor use, a coping/deflection marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientHumor {
    None,
    Occasional,
    Frequent,
}

impl PatientHumor {
    pub const ALL: [PatientHumor; 3] = [
        PatientHumor::None,
        PatientHumor::Occasional,
        PatientHumor::Frequent,
    ];

    /// Sampling weights ~ 60/30/10 percent.
    pub const WEIGHTS: [f64; 3] = [6.0, 3.0, 1.0];

    pub fn code(self) -> &'static str {
        match self {
            PatientHumor::None => "none",
            PatientHumor::Occasional => "occasional",
            PatientHumor::Frequent => "frequent",
        }
    }

    pub fn parse(code: &str) -> Result<PatientHumor, ConfigError> {
        PatientHumor::ALL
            .into_iter()
            .find(|h| h.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ConfigError::InvalidFieldValue {
                field: "humor".to_string(),
                value: code.to_string(),
            })
    }
}

/// Generic stressor themes for life-situation framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextDomain {
    WorkRoleStrain,
    RelationshipsStrain,
    HealthConcern,
    SelfWorthStrain,
    GeneralStress,
    LifeTransition,
    Grief,
}

/// Maximum context domains per profile.
pub const MAX_CONTEXT_DOMAINS: usize = 2;

impl ContextDomain {
    pub const ALL: [ContextDomain; 7] = [
        ContextDomain::WorkRoleStrain,
        ContextDomain::RelationshipsStrain,
        ContextDomain::HealthConcern,
        ContextDomain::SelfWorthStrain,
        ContextDomain::GeneralStress,
        ContextDomain::LifeTransition,
        ContextDomain::Grief,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContextDomain::WorkRoleStrain => "work/role strain",
            ContextDomain::RelationshipsStrain => "relationships strain",
            ContextDomain::HealthConcern => "health concern",
            ContextDomain::SelfWorthStrain => "self-worth/identity strain",
            ContextDomain::GeneralStress => "general stress/no clear trigger",
            ContextDomain::LifeTransition => "major life transition",
            ContextDomain::Grief => "grief/bereavement",
        }
    }
}

/// Living situation pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivingSituation {
    Alone,
    WithPartner,
    WithFamily,
    SharedHousing,
}

impl LivingSituation {
    pub const ALL: [LivingSituation; 4] = [
        LivingSituation::Alone,
        LivingSituation::WithPartner,
        LivingSituation::WithFamily,
        LivingSituation::SharedHousing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LivingSituation::Alone => "alone",
            LivingSituation::WithPartner => "with partner",
            LivingSituation::WithFamily => "with family",
            LivingSituation::SharedHousing => "shared housing",
        }
    }
}

/// Work role pool; also conditions the age-range weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkRole {
    Employed,
    Student,
    Caregiving,
    BetweenRoles,
}

impl WorkRole {
    pub const ALL: [WorkRole; 4] = [
        WorkRole::Employed,
        WorkRole::Student,
        WorkRole::Caregiving,
        WorkRole::BetweenRoles,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkRole::Employed => "employed",
            WorkRole::Student => "student",
            WorkRole::Caregiving => "caregiving role",
            WorkRole::BetweenRoles => "between roles",
        }
    }

    /// Age-range weights conditioned on this role, parallel to `AGE_RANGES`.
    pub fn age_weights(self) -> [f64; 9] {
        match self {
            // Students tend to be younger (16-29 heavily weighted)
            WorkRole::Student => [4.0, 5.0, 3.0, 1.0, 0.5, 0.3, 0.2, 0.1, 0.05],
            // Employed spread across working ages
            WorkRole::Employed => [0.5, 2.0, 3.0, 3.0, 3.0, 2.5, 2.0, 1.0, 0.3],
            // Caregivers tend to be older, but not exclusively
            WorkRole::Caregiving => [0.1, 0.3, 0.8, 1.5, 2.5, 3.0, 3.0, 2.5, 2.0],
            // Between roles: broad distribution with slight young skew
            WorkRole::BetweenRoles => [1.5, 2.0, 2.5, 2.0, 1.5, 1.0, 0.8, 0.6, 0.4],
        }
    }
}

/// Routine stability pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineStability {
    Stable,
    Variable,
}

impl RoutineStability {
    pub const ALL: [RoutineStability; 2] = [RoutineStability::Stable, RoutineStability::Variable];

    pub fn label(self) -> &'static str {
        match self {
            RoutineStability::Stable => "stable routine",
            RoutineStability::Variable => "variable routine",
        }
    }
}

/// Support level pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportLevel {
    Low,
    Moderate,
    High,
}

impl SupportLevel {
    pub const ALL: [SupportLevel; 3] = [
        SupportLevel::Low,
        SupportLevel::Moderate,
        SupportLevel::High,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SupportLevel::Low => "low support",
            SupportLevel::Moderate => "moderate support",
            SupportLevel::High => "high support",
        }
    }
}

/// The nine fixed age brackets, youngest first.
pub const AGE_RANGES: [&str; 9] = [
    "16-19", "20-24", "25-29", "30-34", "35-39", "40-49", "50-59", "60-69", "70-80",
];

/// Default age weights when no role conditioning applies.
pub const AGE_DEFAULT_WEIGHTS: [f64; 9] = [1.0, 2.0, 2.5, 2.0, 1.5, 1.5, 1.0, 0.8, 0.5];

/// Validates an age range string against the fixed brackets.
pub fn validate_age_range(age: &str) -> Result<&'static str, ConfigError> {
    AGE_RANGES
        .into_iter()
        .find(|a| *a == age)
        .ok_or_else(|| ConfigError::UnknownAgeRange(age.to_string()))
}

/// Life facet categories available to the background elaboration step.
pub const LIFE_FACET_CATEGORIES: [&str; 53] = [
    // Identity / basic context
    "identity_stage",
    "cultural_background_orientation",
    "sense_of_belonging",
    "values_and_priorities",
    "self_view",
    // Goals and direction
    "short_term_goal",
    "long_term_goal_or_dream",
    "stalled_goal",
    "source_of_motivation",
    // Important people
    "key_partner_or_love_interest",
    "closest_friend_or_confidant",
    "family_relationship_pattern",
    "work_or_school_ally",
    "conflictual_relationship",
    // Work / roles / daily responsibilities
    "work_or_study_pressure",
    "sense_of_achievement",
    "role_conflicts",
    "financial_pressure_or_stability",
    "schedule_and_time_pressure",
    "responsibility_load",
    // Health and mental health
    "physical_health_constraints",
    "sleep_pattern_tendency",
    "existing_diagnoses_or_labels",
    "past_help_seeking",
    "body_image_concerns_or_comfort",
    // Stressors and vulnerabilities
    "current_primary_stressor",
    "secondary_stressors",
    "loss_or_change",
    "unresolved_issue",
    "fear_or_worry_theme",
    // Coping and habits
    "coping_style",
    "day_to_day_routines",
    "soothing_activities",
    "less_helpful_coping",
    "digital_or_social_media_habits",
    // Interests / quirks / color
    "hobbies_and_interests",
    "small_joys",
    "personal_quirks",
    "self_presentation_style",
    "areas_of_competence_or_pride",
    // History / adversity
    "past_difficult_period",
    "prior_relationship_disappointment_or_breakdown",
    "earlier_school_or_work_challenge",
    "family_history_of_health_or_mental_health_issues",
    "significant_move_or_transition",
    // Constraints and environment
    "housing_and_neighbourhood_feel",
    "access_to_resources",
    "time_and_energy_constraints",
    // Beliefs and meaning
    "explanatory_style",
    "beliefs_about_help_and_treatment",
    "beliefs_about_self_worth",
    "hopes_for_future",
    // Obsessions / preoccupations
    "preoccupations_or_obsessions",
];

/// Adversity-tagged subset of `LIFE_FACET_CATEGORIES`, subject to gating.
pub const ADVERSITY_FACETS: [&str; 5] = [
    "past_difficult_period",
    "prior_relationship_disappointment_or_breakdown",
    "family_history_of_health_or_mental_health_issues",
    "significant_move_or_transition",
    "loss_or_change",
];

/// Whether a facet category carries the adversity tag.
pub fn is_adversity_facet(category: &str) -> bool {
    ADVERSITY_FACETS.contains(&category)
}
