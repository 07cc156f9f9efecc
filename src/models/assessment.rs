use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;

/// Fixed disclaimer attached to every assessment. Never model-authored.
pub const DISCLAIMER: &str = "This is AI-assisted guidance, not a medical diagnosis. \
Always consult a qualified healthcare professional.";

/// Structured triage result handed back to the caller.
///
/// Wire form is camelCase to match the browser client. Two invariants
/// hold for every value this crate produces, whether it came from the
/// model or from the fallback rules:
/// `map_query` is present exactly when `map_query_required` is true,
/// and `Red` always sets `hospital_required`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub title: String,
    /// One or two plain-language sentences.
    pub summary: String,
    pub reasons: Vec<String>,
    /// Home-care steps. Empty for fallback Red results, where the only
    /// guidance is the hospital instruction.
    pub precautions: Vec<String>,
    pub next_action: String,
    pub hospital_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialist: Option<String>,
    pub map_query_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_query: Option<String>,
    #[serde(default)]
    pub disclaimer: String,
}

impl RiskAssessment {
    pub fn invariants_hold(&self) -> bool {
        let map_consistent = self.map_query.is_some() == self.map_query_required;
        let red_implies_hospital =
            self.risk_level != RiskLevel::Red || self.hospital_required;
        map_consistent && red_implies_hospital
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RiskAssessment {
        RiskAssessment {
            risk_level: RiskLevel::Yellow,
            title: "Caution Advised".into(),
            summary: "This problem needs attention.".into(),
            reasons: vec!["Symptoms can worsen without care".into()],
            precautions: vec!["Take rest".into(), "Drink enough water".into()],
            next_action: "Visit a nearby doctor or health center".into(),
            hospital_required: false,
            specialist: Some("General physician".into()),
            map_query_required: true,
            map_query: Some("doctor clinic near me".into()),
            disclaimer: DISCLAIMER.into(),
        }
    }

    #[test]
    fn serializes_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "riskLevel",
            "title",
            "summary",
            "reasons",
            "precautions",
            "nextAction",
            "hospitalRequired",
            "specialist",
            "mapQueryRequired",
            "mapQuery",
            "disclaimer",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(json["riskLevel"], "Yellow");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let mut value = sample();
        value.specialist = None;
        value.map_query_required = false;
        value.map_query = None;
        let json = serde_json::to_value(value).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("specialist"));
        assert!(!obj.contains_key("mapQuery"));
        assert_eq!(json["mapQueryRequired"], false);
    }

    #[test]
    fn invariants_detect_map_query_mismatch() {
        let mut value = sample();
        assert!(value.invariants_hold());

        value.map_query = None;
        assert!(!value.invariants_hold());

        value.map_query_required = false;
        assert!(value.invariants_hold());

        value.map_query = Some("doctor clinic near me".into());
        assert!(!value.invariants_hold());
    }

    #[test]
    fn invariants_require_hospital_for_red() {
        let mut value = sample();
        value.risk_level = RiskLevel::Red;
        value.hospital_required = false;
        assert!(!value.invariants_hold());

        value.hospital_required = true;
        assert!(value.invariants_hold());
    }
}
