//! Shared types for the API layer.

use std::sync::{Arc, Mutex};

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::config::MAX_DESCRIPTION_CHARS;
use crate::models::{Demographics, SymptomInput, SymptomPhoto};
use crate::session::SessionStore;
use crate::triage::RiskClassifier;

// ═══════════════════════════════════════════════════════════
// API context — shared state for all routes
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes.
/// Wraps the classifier plus the staged-session store.
#[derive(Clone)]
pub struct ApiContext {
    pub classifier: Arc<RiskClassifier>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl ApiContext {
    pub fn new(classifier: RiskClassifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// ApiJson — Json extractor with enveloped rejections
// ═══════════════════════════════════════════════════════════

/// `axum::Json` with its rejections rewritten as [`ApiError`], so a
/// malformed body answers 400 with the same `{"error": ...}` envelope
/// as every other client error instead of axum's plain-text reply.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

// ═══════════════════════════════════════════════════════════
// Symptom submission — shared request body
// ═══════════════════════════════════════════════════════════

/// Request body accepted by both `POST /api/triage` and
/// `POST /api/session`. Every field is optional on the wire; missing
/// information is a triage outcome, not a request error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomSubmission {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photo_data_uri: Option<String>,
    #[serde(default)]
    pub demographics: Option<Demographics>,
}

impl SymptomSubmission {
    /// Validate the submission and convert it into classifier input.
    ///
    /// Rejects only malformed shapes: an over-long description or a
    /// photo that is not a parseable image data URI.
    pub fn into_input(self) -> Result<SymptomInput, ApiError> {
        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ApiError::BadRequest(format!(
                "Description too long (max {MAX_DESCRIPTION_CHARS} characters)"
            )));
        }

        let mut input = SymptomInput::new(self.description);
        if let Some(uri) = &self.photo_data_uri {
            let photo = SymptomPhoto::from_data_uri(uri)?;
            input = input.with_photo(photo);
        }
        if let Some(demographics) = self.demographics {
            input = input.with_demographics(demographics);
        }
        Ok(input)
    }
}
