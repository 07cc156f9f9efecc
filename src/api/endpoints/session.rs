//! Staged-session endpoints.
//!
//! Three endpoints backing the screen handoff:
//! - `POST /api/session` — stage a submission, returns a session id
//! - `POST /api/session/:id/result` — redeem the id for an assessment
//! - `DELETE /api/session` — start over, dropping everything staged

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiJson, SymptomSubmission};
use crate::models::RiskAssessment;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreatedResponse {
    pub session_id: String,
}

/// `POST /api/session` — stage a submission for the result screen.
pub async fn create(
    State(ctx): State<ApiContext>,
    ApiJson(submission): ApiJson<SymptomSubmission>,
) -> Result<Json<SessionCreatedResponse>, ApiError> {
    let input = submission.into_input()?;

    let session_id = {
        let mut sessions = ctx
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store lock poisoned".into()))?;
        sessions.stage(input)
    };

    tracing::debug!(%session_id, "Symptom submission staged");

    Ok(Json(SessionCreatedResponse {
        session_id: session_id.to_string(),
    }))
}

/// `POST /api/session/:id/result` — redeem a staged submission.
///
/// Consumes the entry: a repeat call for the same id returns 404.
pub async fn result(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<String>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let id = Uuid::parse_str(&session_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid session ID: {e}")))?;

    let input = {
        let mut sessions = ctx
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store lock poisoned".into()))?;
        sessions.take(&id)
    };

    let input = input.ok_or_else(|| {
        ApiError::NotFound("Session not found or already consumed".into())
    })?;

    let classifier = ctx.classifier.clone();
    let assessment = tokio::task::spawn_blocking(move || classifier.classify(&input))
        .await
        .map_err(|e| ApiError::Internal(format!("Triage task failed: {e}")))?;

    Ok(Json(assessment))
}

/// `DELETE /api/session` — the "start over" action.
///
/// Drops every staged submission. Answers 204 whether or not anything
/// was staged.
pub async fn clear(State(ctx): State<ApiContext>) -> Result<StatusCode, ApiError> {
    let mut sessions = ctx
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("session store lock poisoned".into()))?;
    let dropped = sessions.len();
    sessions.clear();

    tracing::debug!(dropped, "Staged sessions cleared");

    Ok(StatusCode::NO_CONTENT)
}
