//! Classification entry point.
//!
//! `classify` never fails to its caller: the model-backed path is tried
//! once, and every failure (transport, schema, empty output) resolves
//! into the deterministic keyword fallback. The worst outcome of a
//! total outage is degraded guidance, not an error screen.

use crate::config::ModelConfig;
use crate::models::{RiskAssessment, SymptomInput};

use super::fallback;
use super::gemini::{GeminiClient, GenerativeModel};
use super::prompt::build_triage_prompt;
use super::schema;
use super::TriageError;

pub struct RiskClassifier {
    model: Box<dyn GenerativeModel>,
}

impl RiskClassifier {
    pub fn new(model: impl GenerativeModel + 'static) -> Self {
        Self {
            model: Box::new(model),
        }
    }

    /// Classifier backed by the hosted Gemini endpoint.
    pub fn from_config(config: &ModelConfig) -> Self {
        Self::new(GeminiClient::new(config))
    }

    /// Classify one symptom input into a risk assessment.
    ///
    /// Infallible by contract. The input is not cached, deduplicated,
    /// or mutated; calling twice makes two independent model calls.
    pub fn classify(&self, input: &SymptomInput) -> RiskAssessment {
        // 1. Nothing to go on: fixed Yellow, model never contacted.
        if input.is_insufficient() {
            tracing::info!("No description and no photo; returning insufficient-info assessment");
            return fallback::insufficient_info_assessment();
        }

        // 2. One model attempt: prompt, call, validate.
        match self.model_assessment(input) {
            Ok(assessment) => {
                tracing::debug!(
                    level = assessment.risk_level.as_str(),
                    "Model produced a valid assessment"
                );
                assessment
            }
            // 3. Any failure drops to the keyword rules. No retry.
            Err(err) => {
                tracing::warn!(error = %err, "Model path failed, using keyword fallback");
                fallback::classify_by_keywords(&input.description)
            }
        }
    }

    fn model_assessment(&self, input: &SymptomInput) -> Result<RiskAssessment, TriageError> {
        let prompt = build_triage_prompt(input);
        let raw = self.model.generate(&prompt, input.photo.as_ref())?;
        schema::parse_assessment(&raw)
    }
}
