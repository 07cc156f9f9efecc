//! One-shot triage endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiJson, SymptomSubmission};
use crate::models::RiskAssessment;

/// `POST /api/triage` — classify a symptom submission in one call.
///
/// Always answers 200 with an assessment once the body validates; the
/// classifier absorbs model failures internally. 400 is reserved for
/// malformed submissions.
pub async fn classify(
    State(ctx): State<ApiContext>,
    ApiJson(submission): ApiJson<SymptomSubmission>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let input = submission.into_input()?;

    // Classification drives a blocking HTTP client; keep it off the
    // async workers.
    let classifier = ctx.classifier.clone();
    let assessment = tokio::task::spawn_blocking(move || classifier.classify(&input))
        .await
        .map_err(|e| ApiError::Internal(format!("Triage task failed: {e}")))?;

    Ok(Json(assessment))
}
