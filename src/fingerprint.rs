//! Behavioral fingerprint derivation.
//!
//! The fingerprint identifies one behavioral configuration: the full set of
//! patient levers, doctor levers, and ground-truth symptom frequencies.
//! It is a pure function of those levers; two sessions with identical
//! levers share a fingerprint, and changing any single lever changes it.

use sha2::{Digest, Sha256};

use crate::profile::{DoctorConfig, PatientProfile};

/// Prefix of every derived fingerprint.
const PREFIX: &str = "AGENT_";

/// Hex characters kept from the digest.
const HEX_LEN: usize = 16;

/// Derives the fingerprint for a patient/doctor configuration pair.
pub fn agent_fingerprint(patient: &PatientProfile, doctor: &DoctorConfig) -> String {
    let mut modifiers = patient.modifiers.clone();
    modifiers.sort();

    let mut levers: Vec<String> = vec![
        format!("TEMPLATE={}", patient.template_id.code()),
        format!("P_PACING={}", patient.pacing.code()),
        format!("DENSITY={}", patient.episode_density.code()),
        format!("AGE={}", patient.age_range),
        format!("TRUST={}", patient.voice_style.trust.code()),
        format!("VERBOSITY={}", patient.voice_style.verbosity.code()),
        format!("EXPRESSIVENESS={}", patient.voice_style.expressiveness.code()),
        format!("INTELLECT={}", patient.voice_style.intellect.code()),
        format!("P_HUMOR={}", patient.voice_style.humor.code()),
        format!("MODS={}", modifiers.join(",")),
        format!("PERSONA={}", doctor.persona_id),
        format!("D_WARMTH={}", doctor.microstyle.warmth.code()),
        format!("D_DIRECT={}", doctor.microstyle.directness.code()),
        format!("D_PACING={}", doctor.microstyle.pacing.code()),
        format!("D_HUMOR={}", doctor.microstyle.humor.code()),
        format!("D_ANIMATION={}", doctor.microstyle.animation.code()),
    ];
    for (item, frequency) in patient.symptom_profile.iter() {
        levers.push(format!("{}={}", item.label(), frequency.code()));
    }

    let digest = Sha256::digest(levers.join("|").as_bytes());
    let hex = format!("{digest:x}");

    format!("{PREFIX}{}", &hex[..HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{generate_profile, sample_doctor_config, ForcedProfile};

    fn pair(seed: u64) -> (crate::profile::PatientProfile, DoctorConfig) {
        let patient = generate_profile(seed, &ForcedProfile::default()).expect("ok");
        let doctor = sample_doctor_config(seed, None).expect("ok");
        (patient, doctor)
    }

    #[test]
    fn test_fingerprint_shape() {
        let (patient, doctor) = pair(42);
        let fp = agent_fingerprint(&patient, &doctor);
        assert!(fp.starts_with(PREFIX));
        assert_eq!(fp.len(), PREFIX.len() + HEX_LEN);
        assert!(fp[PREFIX.len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_identical_levers_identical_fingerprint() {
        let (patient, doctor) = pair(42);
        assert_eq!(
            agent_fingerprint(&patient, &doctor),
            agent_fingerprint(&patient.clone(), &doctor.clone())
        );
    }

    #[test]
    fn test_single_lever_changes_fingerprint() {
        use crate::catalog::checklist::{ChecklistItem, Frequency};
        use crate::catalog::pools::PacingLevel;

        let (patient, doctor) = pair(42);
        let base = agent_fingerprint(&patient, &doctor);

        let mut changed = patient.clone();
        changed.pacing = match changed.pacing {
            PacingLevel::Low => PacingLevel::High,
            _ => PacingLevel::Low,
        };
        assert_ne!(agent_fingerprint(&changed, &doctor), base);

        let mut changed = patient.clone();
        let item = ChecklistItem::DepressedMood;
        let flipped = if changed.symptom_profile.get(item) == Frequency::None {
            Frequency::Often
        } else {
            Frequency::None
        };
        changed.symptom_profile.set(item, flipped);
        assert_ne!(agent_fingerprint(&changed, &doctor), base);
    }

    #[test]
    fn test_modifier_order_is_canonicalized() {
        let (patient, doctor) = pair(42);
        let mut reordered = patient.clone();
        reordered.modifiers.reverse();
        assert_eq!(
            agent_fingerprint(&patient, &doctor),
            agent_fingerprint(&reordered, &doctor)
        );
    }
}
