//! Strict validation of the model's structured output.
//!
//! The response is deserialized with required-field strictness: a
//! missing or mistyped field is a schema failure and the caller drops
//! to the keyword fallback. Semantic drift inside a structurally valid
//! response is repaired instead, so a sloppy-but-usable Red answer is
//! never downgraded by way of the fallback's keyword roulette.

use crate::models::{RiskAssessment, RiskLevel, DISCLAIMER};

use super::fallback::{DOCTOR_MAP_QUERY, EMERGENCY_MAP_QUERY};
use super::TriageError;

/// Parse and validate raw model output into an assessment.
///
/// On success the returned value always satisfies the assessment
/// invariants and carries the fixed disclaimer, regardless of what the
/// model wrote.
pub fn parse_assessment(raw: &str) -> Result<RiskAssessment, TriageError> {
    let json = strip_code_fence(raw);

    let mut assessment: RiskAssessment =
        serde_json::from_str(json).map_err(|e| TriageError::Schema(e.to_string()))?;

    normalize(&mut assessment);
    assessment.disclaimer = DISCLAIMER.to_string();

    Ok(assessment)
}

/// JSON-mode responses are bare JSON, but models occasionally wrap the
/// payload in Markdown fences anyway. Strip one fence layer if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Repair semantic drift so the invariants hold unconditionally.
fn normalize(assessment: &mut RiskAssessment) {
    if assessment.risk_level == RiskLevel::Red && !assessment.hospital_required {
        tracing::debug!("Model marked Red without hospitalRequired; forcing it on");
        assessment.hospital_required = true;
    }

    match (assessment.map_query_required, assessment.map_query.is_some()) {
        (true, false) => match default_map_query(assessment.risk_level) {
            Some(query) => {
                tracing::debug!(query, "Model requested a map without a query; using default");
                assessment.map_query = Some(query.to_string());
            }
            None => assessment.map_query_required = false,
        },
        (false, true) => {
            tracing::debug!("Dropping unrequested mapQuery from model output");
            assessment.map_query = None;
        }
        _ => {}
    }
}

fn default_map_query(level: RiskLevel) -> Option<&'static str> {
    match level {
        RiskLevel::Red => Some(EMERGENCY_MAP_QUERY),
        RiskLevel::Yellow => Some(DOCTOR_MAP_QUERY),
        RiskLevel::Green => None,
    }
}
