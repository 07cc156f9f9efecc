//! Wire types for the Gemini `generateContent` REST endpoint, plus the
//! transport error taxonomy.
//!
//! These formalize the slice of the Generative Language API contract the
//! classifier depends on: one user turn (text plus optional inline
//! image), a structured-output generation config, and the candidate
//! envelope that comes back.

use serde::{Deserialize, Serialize};

use crate::config;

// ──────────────────────────────────────────────
// Request types
// ──────────────────────────────────────────────

/// Request body for POST `/v1beta/models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// One conversation turn. The classifier always sends a single user turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

fn default_role() -> String {
    "user".to_string()
}

/// A content part: instruction text or inline media, never both.
///
/// The photo travels as its own part next to the text part; it is not
/// spliced into the prompt string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// Base64 media payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Generation parameters for structured triage output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Low temperature keeps the classification conservative and close
    /// to deterministic.
    pub temperature: f32,
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

impl GenerationConfig {
    /// Config for one triage classification: JSON-constrained output
    /// against the assessment schema.
    pub fn assessment() -> Self {
        Self {
            temperature: config::TRIAGE_TEMPERATURE,
            response_mime_type: "application/json".to_string(),
            response_schema: assessment_response_schema(),
        }
    }
}

/// The output shape declared to the model.
///
/// Covers every assessment field except `disclaimer`, which is a fixed
/// constant this crate attaches itself. `specialist` and `mapQuery` are
/// deliberately not in the required list.
pub fn assessment_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "riskLevel": { "type": "STRING", "enum": ["Green", "Yellow", "Red"] },
            "title": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "reasons": { "type": "ARRAY", "items": { "type": "STRING" } },
            "precautions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "nextAction": { "type": "STRING" },
            "hospitalRequired": { "type": "BOOLEAN" },
            "specialist": { "type": "STRING" },
            "mapQueryRequired": { "type": "BOOLEAN" },
            "mapQuery": { "type": "STRING" }
        },
        "required": [
            "riskLevel",
            "title",
            "summary",
            "reasons",
            "precautions",
            "nextAction",
            "hospitalRequired",
            "mapQueryRequired"
        ]
    })
}

// ──────────────────────────────────────────────
// Response types
// ──────────────────────────────────────────────

/// Response envelope from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, the slot the
    /// structured JSON lands in. `None` covers empty candidate lists,
    /// content-less candidates (safety blocks), and text-less parts.
    pub fn primary_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
    }
}

/// Error envelope the service returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiErrorResponse {
    pub error: GeminiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiErrorBody {
    pub message: String,
}

// ──────────────────────────────────────────────
// Error taxonomy
// ──────────────────────────────────────────────

/// Transport-level failures of the outbound model call. Every variant
/// routes the classifier into the keyword fallback; none is retried.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model endpoint is not reachable at {0}")]
    NotReachable(String),

    #[error("Model endpoint returned an error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model returned no usable candidate text")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![
                    Part::text("instruction"),
                    Part::inline_image("image/png", "aGVsbG8="),
                ],
            }],
            generation_config: GenerationConfig::assessment(),
        }
    }

    // ── request serialization ──

    #[test]
    fn request_serializes_camel_case() {
        let json = serde_json::to_value(sample_request()).unwrap();
        assert!(json.get("generationConfig").is_some());
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert!(json["generationConfig"].get("responseSchema").is_some());
    }

    #[test]
    fn text_part_omits_inline_data() {
        let json = serde_json::to_value(Part::text("hello")).unwrap();
        assert_eq!(json["text"], "hello");
        assert!(json.get("inlineData").is_none());
    }

    #[test]
    fn image_part_uses_inline_data_shape() {
        let json = serde_json::to_value(Part::inline_image("image/jpeg", "YWJj")).unwrap();
        assert!(json.get("text").is_none());
        assert_eq!(json["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(json["inlineData"]["data"], "YWJj");
    }

    #[test]
    fn photo_travels_as_separate_part() {
        let json = serde_json::to_value(sample_request()).unwrap();
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].get("text").is_some());
        assert!(parts[1].get("inlineData").is_some());
    }

    // ── declared schema ──

    #[test]
    fn response_schema_lists_required_fields() {
        let schema = assessment_response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for field in ["riskLevel", "summary", "nextAction", "hospitalRequired", "mapQueryRequired"] {
            assert!(required.contains(&field), "missing required field {field}");
        }
        assert!(!required.contains(&"specialist"));
        assert!(!required.contains(&"mapQuery"));
    }

    #[test]
    fn response_schema_never_asks_for_disclaimer() {
        let schema = assessment_response_schema();
        assert!(schema["properties"].get("disclaimer").is_none());
    }

    #[test]
    fn risk_level_schema_is_a_string_enum() {
        let schema = assessment_response_schema();
        let levels = schema["properties"]["riskLevel"]["enum"].as_array().unwrap();
        assert_eq!(levels.len(), 3);
    }

    #[test]
    fn assessment_config_uses_low_temperature() {
        let config = GenerationConfig::assessment();
        assert!(config.temperature <= 0.3, "triage output must stay conservative");
    }

    // ── response deserialization ──

    #[test]
    fn response_extracts_first_candidate_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"riskLevel\":\"Green\"}"}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.primary_text().as_deref(),
            Some("{\"riskLevel\":\"Green\"}")
        );
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(response.primary_text().is_none());

        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.primary_text().is_none());
    }

    #[test]
    fn blocked_candidate_without_content_yields_no_text() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(response.primary_text().is_none());
    }

    #[test]
    fn error_envelope_parses() {
        let json = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GeminiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "API key not valid");
    }
}
