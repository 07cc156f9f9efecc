//! Deterministic keyword fallback.
//!
//! When the model path fails for any reason, classification degrades to
//! a fixed rule table scanned against the lowercased description. The
//! output is fully determined by which rule fires, so the same text
//! always yields a byte-identical assessment.
//!
//! Rule order is part of the contract: the red rule is checked before
//! the yellow rule, so a description containing keywords from both sets
//! resolves to the higher severity.

use crate::models::{RiskAssessment, RiskLevel, DISCLAIMER};

// ── Fixed result strings ────────────────────────────────────

pub const GREEN_TITLE: &str = "Minor Problem";
pub const YELLOW_TITLE: &str = "Caution Advised";
pub const RED_TITLE: &str = "Emergency";
pub const INSUFFICIENT_TITLE: &str = "More Information Needed";

pub const GREEN_NEXT_ACTION: &str = "Continue home care and monitor";
pub const YELLOW_NEXT_ACTION: &str = "Visit a nearby doctor or health center";
pub const RED_NEXT_ACTION: &str = "Go to the nearest hospital immediately";

/// Fixed nearby-care search strings, also used to repair model output
/// that requests a map without naming a query.
pub const EMERGENCY_MAP_QUERY: &str = "emergency hospital near me";
pub const DOCTOR_MAP_QUERY: &str = "doctor clinic near me";

// ── Keyword sets ────────────────────────────────────────────

/// Life-threatening terms. A single match forces a Red assessment.
static RED_KEYWORDS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "not breathing",
    "unconscious",
    "heavy bleeding",
    "severe bleeding",
    "accident",
    "poison",
    "heart attack",
    "seizure",
    "fracture",
];

/// Needs-a-doctor terms. `deep cut` sits before `cut` so the log line
/// names the more specific match.
static YELLOW_KEYWORDS: &[&str] = &[
    "fever",
    "headache",
    "vomiting",
    "stomach pain",
    "swelling",
    "rash",
    "deep cut",
    "cut",
    "bleeding",
    "sprain",
    "injury",
];

// ── Rule registry ───────────────────────────────────────────

/// One fallback rule: a keyword set and the fixed assessment it emits.
struct FallbackRule {
    /// Identifier for the diagnostic log line.
    id: &'static str,
    keywords: &'static [&'static str],
    template: fn() -> RiskAssessment,
}

/// The ordered rule table. Highest severity first; first match wins.
fn rules() -> Vec<FallbackRule> {
    vec![
        FallbackRule {
            id: "red-flags",
            keywords: RED_KEYWORDS,
            template: red_assessment,
        },
        FallbackRule {
            id: "yellow-flags",
            keywords: YELLOW_KEYWORDS,
            template: yellow_assessment,
        },
    ]
}

// ── Matching ────────────────────────────────────────────────

/// Classify a description with the keyword rules alone.
///
/// Substring containment on the lowercased text, exactly as simple as
/// it looks. No keyword match is not an error; it resolves to the
/// generic home-care Green assessment.
pub fn classify_by_keywords(description: &str) -> RiskAssessment {
    let text = description.to_lowercase();

    for rule in &rules() {
        let matched = rule.keywords.iter().find(|keyword| text.contains(**keyword));
        if let Some(keyword) = matched {
            tracing::warn!(
                rule_id = rule.id,
                keyword = *keyword,
                "Fallback keyword rule fired"
            );
            return (rule.template)();
        }
    }

    tracing::debug!("No fallback keyword matched, defaulting to Green");
    green_assessment()
}

// ── Fixed assessment templates ──────────────────────────────

/// Response for inputs with no description and no photo. Yellow by
/// policy: missing information is never treated as safe.
pub fn insufficient_info_assessment() -> RiskAssessment {
    RiskAssessment {
        risk_level: RiskLevel::Yellow,
        title: INSUFFICIENT_TITLE.to_string(),
        summary: "Not enough information provided.".to_string(),
        reasons: vec![
            "The description does not give enough detail to judge the risk".to_string(),
        ],
        precautions: vec![
            "Try to describe the problem clearly".to_string(),
            "Upload a photo if possible".to_string(),
        ],
        next_action: YELLOW_NEXT_ACTION.to_string(),
        hospital_required: false,
        specialist: None,
        map_query_required: true,
        map_query: Some(DOCTOR_MAP_QUERY.to_string()),
        disclaimer: DISCLAIMER.to_string(),
    }
}

pub fn red_assessment() -> RiskAssessment {
    RiskAssessment {
        risk_level: RiskLevel::Red,
        title: RED_TITLE.to_string(),
        summary: "This problem looks serious.".to_string(),
        reasons: vec![
            "The description mentions a danger sign that can be life-threatening".to_string(),
            "Serious problems need hospital care without delay".to_string(),
        ],
        precautions: vec![],
        next_action: RED_NEXT_ACTION.to_string(),
        hospital_required: true,
        specialist: None,
        map_query_required: true,
        map_query: Some(EMERGENCY_MAP_QUERY.to_string()),
        disclaimer: DISCLAIMER.to_string(),
    }
}

pub fn yellow_assessment() -> RiskAssessment {
    RiskAssessment {
        risk_level: RiskLevel::Yellow,
        title: YELLOW_TITLE.to_string(),
        summary: "This problem needs attention.".to_string(),
        reasons: vec![
            "The symptoms can get worse without proper care".to_string(),
            "A doctor can check the problem properly".to_string(),
        ],
        precautions: vec![
            "Take rest".to_string(),
            "Drink enough water".to_string(),
            "Avoid heavy work".to_string(),
            "Monitor symptoms".to_string(),
        ],
        next_action: YELLOW_NEXT_ACTION.to_string(),
        hospital_required: false,
        specialist: Some("General physician".to_string()),
        map_query_required: true,
        map_query: Some(DOCTOR_MAP_QUERY.to_string()),
        disclaimer: DISCLAIMER.to_string(),
    }
}

pub fn green_assessment() -> RiskAssessment {
    RiskAssessment {
        risk_level: RiskLevel::Green,
        title: GREEN_TITLE.to_string(),
        summary: "The problem appears to be minor.".to_string(),
        reasons: vec![
            "No danger signs were found in the description".to_string(),
            "Problems like this usually get better with home care".to_string(),
        ],
        precautions: vec![
            "Take rest".to_string(),
            "Keep the area clean".to_string(),
            "Drink warm water".to_string(),
            "Avoid strain".to_string(),
        ],
        next_action: GREEN_NEXT_ACTION.to_string(),
        hospital_required: false,
        specialist: None,
        map_query_required: false,
        map_query: None,
        disclaimer: DISCLAIMER.to_string(),
    }
}
