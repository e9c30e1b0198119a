//! The fixed screening checklist and its frequency scale.

use serde::{Deserialize, Serialize};

/// Number of items on the screening checklist.
pub const CHECKLIST_LEN: usize = 9;

/// One screening criterion tracked for coverage across a session.
///
/// The enum order is the canonical item order used for fingerprint
/// derivation and record serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChecklistItem {
    DepressedMood,
    LossOfInterest,
    AppetiteChange,
    SleepDisturbance,
    PsychomotorChange,
    Fatigue,
    Worthlessness,
    ConcentrationDifficulty,
    ThoughtsOfDeath,
}

impl ChecklistItem {
    /// All checklist items in canonical order.
    pub const ALL: [ChecklistItem; CHECKLIST_LEN] = [
        ChecklistItem::DepressedMood,
        ChecklistItem::LossOfInterest,
        ChecklistItem::AppetiteChange,
        ChecklistItem::SleepDisturbance,
        ChecklistItem::PsychomotorChange,
        ChecklistItem::Fatigue,
        ChecklistItem::Worthlessness,
        ChecklistItem::ConcentrationDifficulty,
        ChecklistItem::ThoughtsOfDeath,
    ];

    /// Position of this item in the canonical order.
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|i| *i == self)
            .unwrap_or_default()
    }

    /// Human-readable label used in prompts and persisted records.
    pub fn label(self) -> &'static str {
        match self {
            ChecklistItem::DepressedMood => "Depressed mood",
            ChecklistItem::LossOfInterest => "Loss of interest or pleasure",
            ChecklistItem::AppetiteChange => "Significant weight/appetite changes",
            ChecklistItem::SleepDisturbance => "Sleep disturbances",
            ChecklistItem::PsychomotorChange => "Psychomotor agitation or retardation",
            ChecklistItem::Fatigue => "Fatigue or loss of energy",
            ChecklistItem::Worthlessness => "Feelings of worthlessness or excessive guilt",
            ChecklistItem::ConcentrationDifficulty => "Difficulty concentrating or indecisiveness",
            ChecklistItem::ThoughtsOfDeath => "Recurrent thoughts of death or suicide",
        }
    }

    /// Looks up an item by its label.
    pub fn from_label(label: &str) -> Option<ChecklistItem> {
        Self::ALL.into_iter().find(|i| i.label() == label)
    }
}

/// How often a symptom was present over the screening window.
///
/// The ordering NONE < RARE < SOME < OFTEN is meaningful: severity
/// classification counts items at or above SOME, and the optional
/// elevation step moves an item up exactly one tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    #[default]
    None,
    Rare,
    Some,
    Often,
}

impl Frequency {
    /// All frequency values in ascending order.
    pub const ALL: [Frequency; 4] = [
        Frequency::None,
        Frequency::Rare,
        Frequency::Some,
        Frequency::Often,
    ];

    /// Wire/fingerprint code for this frequency.
    pub fn code(self) -> &'static str {
        match self {
            Frequency::None => "NONE",
            Frequency::Rare => "RARE",
            Frequency::Some => "SOME",
            Frequency::Often => "OFTEN",
        }
    }

    /// Description of the frequency band across the last 14 days.
    pub fn description(self) -> &'static str {
        match self {
            Frequency::None => "Not at all",
            Frequency::Rare => "One or two days",
            Frequency::Some => "Three to five days",
            Frequency::Often => "Six to ten days",
        }
    }

    /// The next tier up, saturating at OFTEN.
    pub fn elevated(self) -> Frequency {
        match self {
            Frequency::None => Frequency::Rare,
            Frequency::Rare => Frequency::Some,
            Frequency::Some | Frequency::Often => Frequency::Often,
        }
    }

    /// Parses a wire code back to a frequency.
    pub fn from_code(code: &str) -> Option<Frequency> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_is_stable() {
        for (idx, item) in ChecklistItem::ALL.iter().enumerate() {
            assert_eq!(item.index(), idx);
        }
    }

    #[test]
    fn test_label_round_trip() {
        for item in ChecklistItem::ALL {
            assert_eq!(ChecklistItem::from_label(item.label()), Some(item));
        }
    }

    #[test]
    fn test_frequency_ordering() {
        assert!(Frequency::None < Frequency::Rare);
        assert!(Frequency::Rare < Frequency::Some);
        assert!(Frequency::Some < Frequency::Often);
    }

    #[test]
    fn test_elevation_saturates() {
        assert_eq!(Frequency::None.elevated(), Frequency::Rare);
        assert_eq!(Frequency::Some.elevated(), Frequency::Often);
        assert_eq!(Frequency::Often.elevated(), Frequency::Often);
    }
}
