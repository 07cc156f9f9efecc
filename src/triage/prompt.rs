use crate::models::SymptomInput;

/// Literal used for every absent demographic field.
pub const NOT_PROVIDED: &str = "Not provided";

/// Fixed instruction preamble sent with every classification.
///
/// The wording is deliberately blunt and plain: the model must never
/// present itself as a doctor, and uncertainty must resolve upward in
/// severity, never downward.
pub const TRIAGE_SYSTEM_PROMPT: &str = r#"You are a healthcare guidance assistant for the "Swasthya Margdarshan" app.

IMPORTANT RULES:
- You are NOT a doctor.
- Do NOT give a medical diagnosis.
- Do NOT prescribe medicines.
- Use very simple language that rural users can follow.
- If unsure, choose the higher risk level (Yellow or Red).

TASK:
Analyze the user's health problem and return ONE risk level:
- Green: Minor issue, safe home care
- Yellow: Moderate issue, doctor visit recommended
- Red: Serious issue, hospital visit immediately

OUTPUT FORMAT:
- riskLevel: Green / Yellow / Red
- title: A short heading for the result (e.g. "Minor Problem", "Caution Advised", "Emergency")
- summary: One or two simple sentences describing the problem
- reasons: 2-4 short points explaining why this risk level was chosen
- precautions: 3-5 basic, safe home-care steps (only for Green and Yellow; empty for Red)
- nextAction:
   Green → "Continue home care and monitor"
   Yellow → "Visit a nearby doctor or health center"
   Red → "Go to the nearest hospital immediately"
- hospitalRequired: true only when riskLevel is Red
- specialist: The kind of doctor to see, only when one clearly fits
- mapQueryRequired: true for Yellow and Red, false for Green
- mapQuery: A short nearby-care search phrase, only when mapQueryRequired is true"#;

/// Build the full instruction prompt for one classification.
///
/// Demographics default to the literal `"Not provided"` and the
/// description is embedded verbatim, exactly as the user typed it. A
/// photo is never folded into this text; it rides along as its own
/// request part.
pub fn build_triage_prompt(input: &SymptomInput) -> String {
    let demographics = input.demographics.as_ref();
    fn field(value: Option<&String>) -> &str {
        value.map(String::as_str).unwrap_or(NOT_PROVIDED)
    }

    format!(
        r#"{TRIAGE_SYSTEM_PROMPT}

USER DETAILS:
Name: {name}
Age: {age}
Weight: {weight}
Gender: {gender}

PROBLEM DESCRIPTION:
"{description}""#,
        name = field(demographics.and_then(|d| d.name.as_ref())),
        age = field(demographics.and_then(|d| d.age.as_ref())),
        weight = field(demographics.and_then(|d| d.weight.as_ref())),
        gender = field(demographics.and_then(|d| d.gender.as_ref())),
        description = input.description,
    )
}
