//! Behavioral archetype templates.
//!
//! Each template maps a trait-dominant presentation onto the checklist:
//! which items it emphasizes, how it colors affect and cognition, and a
//! pool of nuance modifiers that individual profiles draw from.

use serde::{Deserialize, Serialize};

use super::checklist::ChecklistItem;
use crate::error::ConfigError;

/// Identifier of one behavioral archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateId {
    NeuroticismHigh,
    ExtraversionLow,
    ConscientiousnessHigh,
    ConscientiousnessLow,
    AgreeablenessHigh,
    AgreeablenessLow,
    OpennessHigh,
    OpennessLow,
}

impl TemplateId {
    /// All template identifiers, in registry order.
    pub const ALL: [TemplateId; 8] = [
        TemplateId::NeuroticismHigh,
        TemplateId::ExtraversionLow,
        TemplateId::ConscientiousnessHigh,
        TemplateId::ConscientiousnessLow,
        TemplateId::AgreeablenessHigh,
        TemplateId::AgreeablenessLow,
        TemplateId::OpennessHigh,
        TemplateId::OpennessLow,
    ];

    /// Stable string form used in fingerprints and CLI overrides.
    pub fn code(self) -> &'static str {
        match self {
            TemplateId::NeuroticismHigh => "NEUROTICISM_HIGH",
            TemplateId::ExtraversionLow => "EXTRAVERSION_LOW",
            TemplateId::ConscientiousnessHigh => "CONSCIENTIOUSNESS_HIGH",
            TemplateId::ConscientiousnessLow => "CONSCIENTIOUSNESS_LOW",
            TemplateId::AgreeablenessHigh => "AGREEABLENESS_HIGH",
            TemplateId::AgreeablenessLow => "AGREEABLENESS_LOW",
            TemplateId::OpennessHigh => "OPENNESS_HIGH",
            TemplateId::OpennessLow => "OPENNESS_LOW",
        }
    }

    /// Resolves a string code, failing for anything outside the registry.
    pub fn parse(code: &str) -> Result<TemplateId, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| ConfigError::UnknownTemplate(code.to_string()))
    }

    /// The template record for this identifier.
    pub fn template(self) -> &'static ArchetypeTemplate {
        &TEMPLATES[self.index()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or_default()
    }
}

/// Static description of one archetype.
#[derive(Debug)]
pub struct ArchetypeTemplate {
    pub id: TemplateId,
    /// Affective coloring of the presentation.
    pub affective: &'static str,
    /// Cognitive coloring.
    pub cognitive: &'static str,
    /// Somatic coloring.
    pub somatic: &'static str,
    /// Diagnostic specifier hint passed to prompt builders.
    pub specifier: &'static str,
    /// Checklist items this archetype emphasizes (3-4 items).
    pub emphasized: &'static [ChecklistItem],
    /// Nuance modifier pool; profiles sample 0-2 without replacement.
    pub modifier_pool: &'static [&'static str],
}

/// The fixed archetype registry.
pub static TEMPLATES: [ArchetypeTemplate; 8] = [
    ArchetypeTemplate {
        id: TemplateId::NeuroticismHigh,
        affective: "Intense sadness, guilt, irritability, emotional volatility",
        cognitive: "Rumination, self-blame, helplessness, catastrophic thinking",
        somatic: "Fatigue, sleep disturbance, tension, agitation",
        specifier: "MDD with anxious distress",
        emphasized: &[
            ChecklistItem::DepressedMood,
            ChecklistItem::Fatigue,
            ChecklistItem::Worthlessness,
            ChecklistItem::ConcentrationDifficulty,
        ],
        modifier_pool: &[
            "worry-prone",
            "self-blaming",
            "threat-sensitivity",
            "emotionally-reactive",
            "ruminative",
        ],
    },
    ArchetypeTemplate {
        id: TemplateId::ExtraversionLow,
        affective: "Emotional flatness, social withdrawal, anhedonia",
        cognitive: "Hopelessness, pessimism, low reactivity to positives",
        somatic: "Psychomotor slowing, hypersomnia, low energy",
        specifier: "Persistent depressive disorder-like",
        emphasized: &[
            ChecklistItem::LossOfInterest,
            ChecklistItem::PsychomotorChange,
            ChecklistItem::Fatigue,
        ],
        modifier_pool: &[
            "socially-withdrawn",
            "pleasure-unresponsive",
            "passive",
            "low-initiative",
            "isolating",
        ],
    },
    ArchetypeTemplate {
        id: TemplateId::ConscientiousnessHigh,
        affective: "Controlled/suppressed affect, tension under responsibility",
        cognitive: "Perfectionism, strong self-criticism, guilt over small failures, indecision",
        somatic: "Insomnia, appetite loss, exhaustion from overwork",
        specifier: "Melancholic features",
        emphasized: &[
            ChecklistItem::AppetiteChange,
            ChecklistItem::SleepDisturbance,
            ChecklistItem::Fatigue,
            ChecklistItem::Worthlessness,
        ],
        modifier_pool: &[
            "perfectionistic",
            "rigidly-self-critical",
            "duty-focused",
            "overwork-prone",
            "failure-intolerant",
        ],
    },
    ArchetypeTemplate {
        id: TemplateId::ConscientiousnessLow,
        affective: "Apathy, disengagement, blunted emotion",
        cognitive: "Disorganization, inefficiency, forgetfulness",
        somatic: "Hypersomnia, low motivation, poor self-care, variable appetite",
        specifier: "With functional impairment",
        emphasized: &[
            ChecklistItem::PsychomotorChange,
            ChecklistItem::Fatigue,
            ChecklistItem::ConcentrationDifficulty,
        ],
        modifier_pool: &[
            "disorganized",
            "unmotivated",
            "self-care-neglecting",
            "task-avoidant",
            "forgetful",
        ],
    },
    ArchetypeTemplate {
        id: TemplateId::AgreeablenessHigh,
        affective: "Empathic sadness, guilt about others, over-concern",
        cognitive: "Moral/relational rumination about failing people",
        somatic: "Fatigue from overextending, sleep disturbance from worry",
        specifier: "Anxious distress",
        emphasized: &[
            ChecklistItem::DepressedMood,
            ChecklistItem::SleepDisturbance,
            ChecklistItem::Fatigue,
            ChecklistItem::Worthlessness,
        ],
        modifier_pool: &[
            "people-pleasing",
            "over-responsible-for-others",
            "self-sacrificing",
            "conflict-avoidant",
            "guilt-prone",
        ],
    },
    ArchetypeTemplate {
        id: TemplateId::AgreeablenessLow,
        affective: "Irritability, anger, frustration, externalized blame",
        cognitive: "Defensive/hostile thoughts, rejection sensitivity",
        somatic: "Restlessness, agitation, appetite disturbance, insomnia",
        specifier: "Mixed features",
        emphasized: &[
            ChecklistItem::DepressedMood,
            ChecklistItem::PsychomotorChange,
            ChecklistItem::SleepDisturbance,
        ],
        modifier_pool: &[
            "irritable",
            "blame-externalizing",
            "rejection-sensitive",
            "defensively-hostile",
            "interpersonally-strained",
        ],
    },
    ArchetypeTemplate {
        id: TemplateId::OpennessHigh,
        affective: "Existential sadness, metaphorical expression of distress",
        cognitive: "Philosophical rumination on meaning and mortality",
        somatic: "Variable; fatigue from over-reflection",
        specifier: "Mild MDD / adjustment-like",
        emphasized: &[
            ChecklistItem::DepressedMood,
            ChecklistItem::LossOfInterest,
            ChecklistItem::ThoughtsOfDeath,
        ],
        modifier_pool: &[
            "existentially-focused",
            "meaning-seeking",
            "introspective",
            "metaphorically-expressive",
            "philosophically-ruminating",
        ],
    },
    ArchetypeTemplate {
        id: TemplateId::OpennessLow,
        affective: "Constricted affect, limited emotional vocabulary",
        cognitive: "Literal thinking, low insight, denies mood distress",
        somatic: "Body-focused complaints (aches, tiredness, sleep/appetite issues)",
        specifier: "Somatic-dominant style",
        emphasized: &[
            ChecklistItem::AppetiteChange,
            ChecklistItem::SleepDisturbance,
            ChecklistItem::Fatigue,
        ],
        modifier_pool: &[
            "somatically-focused",
            "insight-limited",
            "mood-distress-denying",
            "literal-thinking",
            "body-complaint-oriented",
        ],
    },
];
