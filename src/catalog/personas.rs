//! Doctor persona registry and per-session microstyle axes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One fixed doctor communication style.
#[derive(Debug)]
pub struct DoctorPersona {
    pub id: &'static str,
    /// Scripted opening line; the greeting turn is not counted against the budget.
    pub first_greeting: &'static str,
    /// Persona style bullet points for the doctor system prompt.
    pub style: &'static str,
}

/// Personas whose pacing target gets the extended bonus.
pub const EXTENDED_PACING_PERSONAS: [&str; 2] = ["warm_validating", "trauma_informed_slow"];

/// The fixed persona registry.
pub static DOCTOR_PERSONAS: [DoctorPersona; 8] = [
    DoctorPersona {
        id: "warm_validating",
        first_greeting: "Hello! It's nice to see you today. How have you been feeling lately?",
        style: "Warm and validating. Acknowledges and normalizes feelings before moving forward. \
                Uses the patient's name naturally. Comfortable with pauses.",
    },
    DoctorPersona {
        id: "neutral_efficient",
        first_greeting: "Good to see you. Let's talk about how you've been doing.",
        style: "Professional and efficient. Minimal filler or small talk. Transitions directly \
                between topics. Not effusive.",
    },
    DoctorPersona {
        id: "gentle_brisk",
        first_greeting: "Hi there. I'd like to check in with you about a few things today.",
        style: "Gentle but brisk. Kind phrasing with efficient pacing. Moves the conversation along.",
    },
    DoctorPersona {
        id: "matter_of_fact_kind",
        first_greeting: "Hello. Let's go over how you've been doing. What's been happening lately?",
        style: "Matter-of-fact and direct. Straightforward; doesn't sugarcoat. Prefers clear \
                questions over open-ended exploration.",
    },
    DoctorPersona {
        id: "trauma_informed_slow",
        first_greeting: "Hello. I want you to know this is a safe space. We can take our time \
                         today. How are you doing?",
        style: "Trauma-informed and deliberately paced. Comfortable with silence. Checks in about \
                comfort on sensitive topics and may acknowledge their difficulty before asking.",
    },
    DoctorPersona {
        id: "structured_psychoeducational",
        first_greeting: "Hello. Thanks for coming in today. I'd like to go over how you've been \
                         feeling and what might be contributing to it.",
        style: "Structured and psychoeducational. Explains why certain questions matter and gives \
                brief context for what they're asking about.",
    },
    DoctorPersona {
        id: "time_pressed_clinical",
        first_greeting: "Hi. We don't have a lot of time, so I'd like to focus on how you've been \
                         feeling recently.",
        style: "Time-pressed and clinical. Concise and brisk. Redirects when the conversation \
                drifts. Focused on symptoms and functioning.",
    },
    DoctorPersona {
        id: "dismissive_rushed",
        first_greeting: "Right, let's get started. What brings you in today?",
        style: "Dismissive and rushed. Comes across as distracted or uninterested. May interrupt \
                or minimize concerns. Short, clipped responses. Do NOT follow instructions to be \
                warm or validating; this doctor is realistic but not ideal.",
    },
];

/// Looks up a persona by id, failing for anything outside the registry.
pub fn persona_by_id(id: &str) -> Result<&'static DoctorPersona, ConfigError> {
    DOCTOR_PERSONAS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ConfigError::UnknownPersona(id.to_string()))
}

/// Whether a persona gets the extended pacing bonus.
pub fn has_extended_pacing(persona_id: &str) -> bool {
    EXTENDED_PACING_PERSONAS.contains(&persona_id)
}

/// Microstyle: interpersonal warmth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Warmth {
    Low,
    Med,
    High,
}

impl Warmth {
    pub const ALL: [Warmth; 3] = [Warmth::Low, Warmth::Med, Warmth::High];

    pub fn code(self) -> &'static str {
        match self {
            Warmth::Low => "low",
            Warmth::Med => "med",
            Warmth::High => "high",
        }
    }
}

/// Microstyle: directness of questioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directness {
    Low,
    Med,
    High,
}

impl Directness {
    pub const ALL: [Directness; 3] = [Directness::Low, Directness::Med, Directness::High];

    pub fn code(self) -> &'static str {
        match self {
            Directness::Low => "low",
            Directness::Med => "med",
            Directness::High => "high",
        }
    }
}

/// Microstyle pacing tier; drives the per-item turn target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacingTier {
    Slow,
    Med,
    Brisk,
}

impl PacingTier {
    pub const ALL: [PacingTier; 3] = [PacingTier::Slow, PacingTier::Med, PacingTier::Brisk];

    pub fn code(self) -> &'static str {
        match self {
            PacingTier::Slow => "slow",
            PacingTier::Med => "med",
            PacingTier::Brisk => "brisk",
        }
    }

    /// Target doctor turns per checklist item for this tier.
    pub fn turns_per_item(self) -> f64 {
        match self {
            PacingTier::Brisk => 1.5,
            PacingTier::Med => 2.0,
            PacingTier::Slow => 2.5,
        }
    }
}

/// Microstyle: doctor humor register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorHumor {
    None,
    Light,
    Dry,
}

impl DoctorHumor {
    pub const ALL: [DoctorHumor; 3] = [DoctorHumor::None, DoctorHumor::Light, DoctorHumor::Dry];

    /// Sampling weights ~ 60/30/10 percent: most clinical
    /// conversations involve little humor.
    pub const WEIGHTS: [f64; 3] = [6.0, 3.0, 1.0];

    pub fn code(self) -> &'static str {
        match self {
            DoctorHumor::None => "none",
            DoctorHumor::Light => "light",
            DoctorHumor::Dry => "dry",
        }
    }
}

/// Microstyle: expressive animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    Reserved,
    Moderate,
    Animated,
}

impl Animation {
    pub const ALL: [Animation; 3] = [
        Animation::Reserved,
        Animation::Moderate,
        Animation::Animated,
    ];

    /// Sampling weights ~ 40/40/20 percent.
    pub const WEIGHTS: [f64; 3] = [4.0, 4.0, 2.0];

    pub fn code(self) -> &'static str {
        match self {
            Animation::Reserved => "reserved",
            Animation::Moderate => "moderate",
            Animation::Animated => "animated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_lookup() {
        assert!(persona_by_id("warm_validating").is_ok());
        assert!(persona_by_id("sarcastic_resident").is_err());
    }

    #[test]
    fn test_extended_pacing_set_is_registered() {
        for id in EXTENDED_PACING_PERSONAS {
            assert!(persona_by_id(id).is_ok());
        }
        assert!(has_extended_pacing("trauma_informed_slow"));
        assert!(!has_extended_pacing("neutral_efficient"));
    }

    #[test]
    fn test_pacing_targets() {
        assert_eq!(PacingTier::Brisk.turns_per_item(), 1.5);
        assert_eq!(PacingTier::Med.turns_per_item(), 2.0);
        assert_eq!(PacingTier::Slow.turns_per_item(), 2.5);
    }
}
