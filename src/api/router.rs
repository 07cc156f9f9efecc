//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Routes are nested under `/api/`. The surface is small:
//! a health check, one-shot triage, and the staged-session trio
//! (stage, redeem, start over).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::config;

/// Build the API router.
///
/// Endpoint handlers receive `ApiContext` via `State`. CORS is
/// permissive: the UI is served from a separate dev origin.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/triage", post(endpoints::triage::classify))
        .route(
            "/session",
            post(endpoints::session::create).delete(endpoints::session::clear),
        )
        .route("/session/:id/result", post(endpoints::session::result))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        // Photos ride inside the JSON body, so the limit is generous.
        .layer(DefaultBodyLimit::max(config::MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
}
