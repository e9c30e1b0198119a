//! Severity tier derivation and the risk summary fed to manager context.

use crate::catalog::checklist::{ChecklistItem, Frequency};

use super::types::{SeverityTier, SymptomProfile};

/// Derives the qualitative severity tier from the ground-truth profile.
///
/// Pure function: S = items at SOME or OFTEN, O = items at OFTEN.
pub fn severity_tier(profile: &SymptomProfile) -> SeverityTier {
    let significant = profile.count_at_least(Frequency::Some);
    let often = profile.count_at_least(Frequency::Often);

    if significant == 0 {
        SeverityTier::Minimal
    } else if significant <= 2 || (significant <= 4 && often == 0) {
        SeverityTier::Mild
    } else if significant <= 5 || often <= 3 {
        SeverityTier::Moderate
    } else {
        SeverityTier::Severe
    }
}

/// One-line risk summary derived from the ground truth, for manager context.
pub fn risk_summary(profile: &SymptomProfile) -> &'static str {
    let death_thoughts = profile.get(ChecklistItem::ThoughtsOfDeath);
    let mood = profile.get(ChecklistItem::DepressedMood);

    if death_thoughts >= Frequency::Some {
        "high risk: recent suicidal thoughts"
    } else if mood == Frequency::Often || death_thoughts == Frequency::Rare {
        "moderate depression, monitor closely"
    } else if mood == Frequency::Some {
        "mild to moderate depression, no immediate risk"
    } else {
        "low risk, minimal symptoms"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with(frequencies: &[(ChecklistItem, Frequency)]) -> SymptomProfile {
        let mut profile = SymptomProfile::empty();
        for &(item, frequency) in frequencies {
            profile.set(item, frequency);
        }
        profile
    }

    #[test]
    fn test_all_none_is_minimal() {
        assert_eq!(severity_tier(&SymptomProfile::empty()), SeverityTier::Minimal);
    }

    #[test]
    fn test_rare_only_is_minimal() {
        let profile = profile_with(&[
            (ChecklistItem::Fatigue, Frequency::Rare),
            (ChecklistItem::SleepDisturbance, Frequency::Rare),
        ]);
        assert_eq!(severity_tier(&profile), SeverityTier::Minimal);
    }

    #[test]
    fn test_two_significant_is_mild() {
        let profile = profile_with(&[
            (ChecklistItem::Fatigue, Frequency::Some),
            (ChecklistItem::DepressedMood, Frequency::Often),
        ]);
        assert_eq!(severity_tier(&profile), SeverityTier::Mild);
    }

    #[test]
    fn test_four_significant_no_often_is_mild() {
        let profile = profile_with(&[
            (ChecklistItem::Fatigue, Frequency::Some),
            (ChecklistItem::DepressedMood, Frequency::Some),
            (ChecklistItem::SleepDisturbance, Frequency::Some),
            (ChecklistItem::Worthlessness, Frequency::Some),
        ]);
        assert_eq!(severity_tier(&profile), SeverityTier::Mild);
    }

    #[test]
    fn test_five_significant_is_moderate() {
        let profile = profile_with(&[
            (ChecklistItem::Fatigue, Frequency::Some),
            (ChecklistItem::DepressedMood, Frequency::Often),
            (ChecklistItem::SleepDisturbance, Frequency::Some),
            (ChecklistItem::Worthlessness, Frequency::Some),
            (ChecklistItem::LossOfInterest, Frequency::Some),
        ]);
        assert_eq!(severity_tier(&profile), SeverityTier::Moderate);
    }

    #[test]
    fn test_widespread_often_is_severe() {
        let mut profile = SymptomProfile::empty();
        for item in ChecklistItem::ALL.into_iter().take(6) {
            profile.set(item, Frequency::Often);
        }
        assert_eq!(severity_tier(&profile), SeverityTier::Severe);
    }

    #[test]
    fn test_severity_never_decreases_when_any_item_increases() {
        // Exhaustively walk single-item elevations over a grid of base
        // profiles and check monotonicity of the tier.
        let base_values = [
            Frequency::None,
            Frequency::Rare,
            Frequency::Some,
            Frequency::Often,
        ];
        for &fill in &base_values {
            let mut base = SymptomProfile::empty();
            for item in ChecklistItem::ALL.into_iter().step_by(2) {
                base.set(item, fill);
            }
            let before = severity_tier(&base);

            for item in ChecklistItem::ALL {
                let current = base.get(item);
                if current == Frequency::Often {
                    continue;
                }
                let mut raised = base;
                raised.set(item, current.elevated());
                assert!(
                    severity_tier(&raised) >= before,
                    "raising {item:?} from {current:?} lowered the tier"
                );
            }
        }
    }

    #[test]
    fn test_risk_summary_prioritizes_death_thoughts() {
        let profile = profile_with(&[(ChecklistItem::ThoughtsOfDeath, Frequency::Some)]);
        assert_eq!(risk_summary(&profile), "high risk: recent suicidal thoughts");

        let profile = profile_with(&[(ChecklistItem::DepressedMood, Frequency::Some)]);
        assert_eq!(
            risk_summary(&profile),
            "mild to moderate depression, no immediate risk"
        );

        assert_eq!(
            risk_summary(&SymptomProfile::empty()),
            "low risk, minimal symptoms"
        );
    }
}
