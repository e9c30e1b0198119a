//! Profile data model: tagged records with explicit fixed fields.
//!
//! Missing or extra fields are caught at construction, not downstream; the
//! symptom profile is array-backed so every checklist item always has
//! exactly one frequency by construction.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::catalog::checklist::{ChecklistItem, Frequency, CHECKLIST_LEN};
use crate::catalog::personas::{Animation, Directness, DoctorHumor, PacingTier, Warmth};
use crate::catalog::pools::{
    ContextDomain, EpisodeDensity, Expressiveness, Intellect, LivingSituation, PacingLevel,
    PatientHumor, RoutineStability, SupportLevel, Trust, Verbosity, WorkRole,
};
use crate::catalog::templates::TemplateId;

/// Ground-truth symptom frequencies, one per checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymptomProfile {
    frequencies: [Frequency; CHECKLIST_LEN],
}

impl SymptomProfile {
    /// A profile with every item at NONE.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, item: ChecklistItem) -> Frequency {
        self.frequencies[item.index()]
    }

    pub fn set(&mut self, item: ChecklistItem, frequency: Frequency) {
        self.frequencies[item.index()] = frequency;
    }

    /// Iterates items in canonical order with their frequencies.
    pub fn iter(&self) -> impl Iterator<Item = (ChecklistItem, Frequency)> + '_ {
        ChecklistItem::ALL
            .into_iter()
            .map(move |item| (item, self.get(item)))
    }

    /// Number of items at or above the given frequency.
    pub fn count_at_least(&self, floor: Frequency) -> usize {
        self.frequencies.iter().filter(|f| **f >= floor).count()
    }

    /// Number of items above NONE.
    pub fn active_count(&self) -> usize {
        self.count_at_least(Frequency::Rare)
    }
}

impl Serialize for SymptomProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CHECKLIST_LEN))?;
        for (item, frequency) in self.iter() {
            map.serialize_entry(item.label(), frequency.code())?;
        }
        map.end()
    }
}

/// The five independently sampled voice axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoiceStyle {
    pub verbosity: Verbosity,
    pub expressiveness: Expressiveness,
    pub trust: Trust,
    pub intellect: Intellect,
    pub humor: PatientHumor,
}

/// Personal background tags; each independently sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonalBackground {
    pub living_situation: LivingSituation,
    pub work_role: WorkRole,
    pub routine_stability: RoutineStability,
    pub support_level: SupportLevel,
}

/// Derived qualitative severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl SeverityTier {
    pub fn label(self) -> &'static str {
        match self {
            SeverityTier::Minimal => "minimal",
            SeverityTier::Mild => "mild",
            SeverityTier::Moderate => "moderate",
            SeverityTier::Severe => "severe",
        }
    }
}

/// Salience hint for a required life facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Salience {
    High,
    Med,
}

/// One life-facet category the background elaboration must cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredFacet {
    pub category: String,
    pub salience: Salience,
}

/// One elaborated life facet returned by the background collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeFacet {
    pub category: String,
    pub salience: String,
    pub description: String,
}

/// Structured life background attached to a profile after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeBackground {
    pub name: String,
    pub age_range: String,
    pub pronouns: String,
    pub core_roles: Vec<String>,
    pub core_relationships: Vec<String>,
    pub core_stressor_summary: String,
    pub life_facets: Vec<LifeFacet>,
}

/// One fully sampled synthetic patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientProfile {
    pub template_id: TemplateId,
    pub modifiers: Vec<String>,
    pub episode_density: EpisodeDensity,
    pub pacing: PacingLevel,
    pub age_range: &'static str,
    pub voice_style: VoiceStyle,
    pub context_domains: Vec<ContextDomain>,
    pub personal_background: PersonalBackground,
    pub symptom_profile: SymptomProfile,
    pub severity_tier: SeverityTier,
    pub required_facets: Vec<RequiredFacet>,
    /// Populated by the background collaborator; None until then, and
    /// still None when that collaborator fails (a recorded degradation).
    pub life_background: Option<LifeBackground>,
}

impl PatientProfile {
    /// Emphasized checklist items of this profile's template.
    pub fn emphasized(&self) -> &'static [ChecklistItem] {
        self.template_id.template().emphasized
    }

    /// Short background summary for manager context.
    pub fn background_summary(&self) -> String {
        let bg = &self.personal_background;
        format!(
            "{}, {}, {}, {}",
            bg.living_situation.label(),
            bg.work_role.label(),
            bg.routine_stability.label(),
            bg.support_level.label()
        )
    }
}

/// Per-session doctor microstyle sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Microstyle {
    pub warmth: Warmth,
    pub directness: Directness,
    pub pacing: PacingTier,
    pub humor: DoctorHumor,
    pub animation: Animation,
}

/// Doctor-side configuration, immutable once sampled for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorConfig {
    pub persona_id: &'static str,
    pub microstyle: Microstyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_profile_always_covers_all_items() {
        let profile = SymptomProfile::empty();
        assert_eq!(profile.iter().count(), CHECKLIST_LEN);
        assert_eq!(profile.active_count(), 0);
    }

    #[test]
    fn test_symptom_profile_set_get() {
        let mut profile = SymptomProfile::empty();
        profile.set(ChecklistItem::Fatigue, Frequency::Often);
        assert_eq!(profile.get(ChecklistItem::Fatigue), Frequency::Often);
        assert_eq!(profile.get(ChecklistItem::DepressedMood), Frequency::None);
        assert_eq!(profile.active_count(), 1);
    }

    #[test]
    fn test_symptom_profile_serializes_as_labeled_map() {
        let mut profile = SymptomProfile::empty();
        profile.set(ChecklistItem::DepressedMood, Frequency::Some);
        let json = serde_json::to_value(profile).expect("serializable");
        assert_eq!(json["Depressed mood"], "SOME");
        assert_eq!(json["Sleep disturbances"], "NONE");
    }

    #[test]
    fn test_severity_tier_ordering() {
        assert!(SeverityTier::Minimal < SeverityTier::Mild);
        assert!(SeverityTier::Moderate < SeverityTier::Severe);
    }
}
