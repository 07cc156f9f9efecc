use crate::config::ModelConfig;
use crate::models::SymptomPhoto;

use super::gemini_types::{
    Content, GeminiErrorResponse, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, ModelError, Part,
};

/// Seam between the classifier and the hosted model.
///
/// One call, one answer: the instruction prompt plus an optional inline
/// photo go out, the raw structured-output text comes back. Validation
/// of that text is the caller's job.
pub trait GenerativeModel: Send + Sync {
    fn generate(&self, prompt: &str, photo: Option<&SymptomPhoto>) -> Result<String, ModelError>;
}

/// Blocking HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &ModelConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client,
            timeout_secs: config.timeout_secs,
        }
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl GenerativeModel for GeminiClient {
    fn generate(&self, prompt: &str, photo: Option<&SymptomPhoto>) -> Result<String, ModelError> {
        let mut parts = vec![Part::text(prompt)];
        if let Some(photo) = photo {
            parts.push(Part::inline_image(&photo.mime_type, &photo.data));
        }

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig::assessment(),
        };

        tracing::debug!(
            model = %self.model,
            has_photo = photo.is_some(),
            "sending triage generation request"
        );

        let response = self
            .client
            .post(self.endpoint_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ModelError::NotReachable(self.base_url.clone())
                } else if e.is_timeout() {
                    ModelError::Timeout(self.timeout_secs)
                } else {
                    ModelError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| ModelError::Network(e.to_string()))?;

        parsed.primary_text().ok_or(ModelError::EmptyResponse)
    }
}

/// Mock model for tests, returning a fixed configurable response.
pub struct MockModel {
    response: String,
}

impl MockModel {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl GenerativeModel for MockModel {
    fn generate(&self, _prompt: &str, _photo: Option<&SymptomPhoto>) -> Result<String, ModelError> {
        Ok(self.response.clone())
    }
}
