//! Doctor agent system prompt.

use std::fmt::Write;

use crate::catalog::personas::DoctorPersona;
use crate::profile::{LifeBackground, Microstyle};

const DOCTOR_BASE: &str = "You are a primary-care doctor conducting a depression screening \
interview with a patient. This is a roleplay simulation: embody your assigned persona fully \
while gathering clinical information. Let the persona show in word choice, sentence length, \
and rhythm, and vary your phrasing from turn to turn.

On each turn you receive a directive tag:
<ASK_ITEM>: ask about the indicated screening topic, rephrased naturally for your persona.
<FOLLOW_UP>: explore or clarify what the patient just said.
<RAPPORT>: connect with the patient as a person; a question, observation, or empathic \
statement are all fine.
<END>: begin wrapping up the visit.

Guidelines:
- Speak as the doctor, addressing the patient directly, typically in 1-3 sentences.
- One main point per turn; acknowledgments are optional.
- Never dismiss or minimize the patient's concerns; respect their pace on sensitive topics.
- Output only your spoken words.";

/// Builds the doctor system prompt from persona, microstyle, and the
/// optional patient snapshot.
pub fn build_doctor_system(
    persona: &DoctorPersona,
    microstyle: &Microstyle,
    life_background: Option<&LifeBackground>,
) -> String {
    let mut prompt = String::from(DOCTOR_BASE);

    let _ = write!(
        prompt,
        "\n\nYour persona ({}):\n{}\n\nYour microstyle: warmth {}, directness {}, pacing {}, \
         humor {}, animation {}.",
        persona.id,
        persona.style,
        microstyle.warmth.code(),
        microstyle.directness.code(),
        microstyle.pacing.code(),
        microstyle.humor.code(),
        microstyle.animation.code(),
    );

    if let Some(bg) = life_background {
        let _ = write!(
            prompt,
            "\n\nPatient snapshot:\n- Name: {}\n- Age: {}\n- Main roles: {}\n- Key current \
             stressors: {}\nReference this naturally when relevant.",
            bg.name,
            bg.age_range,
            if bg.core_roles.is_empty() {
                "not specified".to_string()
            } else {
                bg.core_roles.join(", ")
            },
            if bg.core_stressor_summary.is_empty() {
                "not specified"
            } else {
                &bg.core_stressor_summary
            },
        );
    }

    prompt
}
