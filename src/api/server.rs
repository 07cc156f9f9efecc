//! API server lifecycle — starts/stops the axum HTTP server that
//! serves the triage API.
//!
//! Pattern: bind → spawn background task → return handle with
//! shutdown channel. The handle owner decides when the server dies;
//! dropping the handle without calling `shutdown` leaves it running
//! for the life of the process.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Handle to a running API server.
pub struct ApiServer {
    /// The address actually bound, with the resolved port.
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

/// Start the API server on the given address.
///
/// Binds the listener, builds the router, and spawns the axum server
/// in a background tokio task. Returns a handle with the bound
/// address and a shutdown channel.
pub async fn start_api_server(ctx: ApiContext, bind_addr: &str) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("Failed to bind API server on {bind_addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    tracing::info!(%addr, "API server binding");

    let app = api_router(ctx);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    use crate::triage::{MockModel, RiskClassifier};

    fn test_ctx() -> ApiContext {
        ApiContext::new(RiskClassifier::new(MockModel::new("{}")))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let mut server = start_api_server(test_ctx(), "127.0.0.1:0")
            .await
            .expect("server should start");

        assert!(server.addr.port() > 0);

        let url = format!("http://127.0.0.1:{}/api/health", server.addr.port());
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        // Give server time to stop
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn server_serves_triage_route() {
        let mut server = start_api_server(test_ctx(), "127.0.0.1:0")
            .await
            .expect("server should start");

        let port = server.addr.port();

        // Unknown route returns 404
        let url = format!("http://127.0.0.1:{port}/nonexistent");
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        // An empty submission classifies as "more information needed"
        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/triage"))
            .header("Content-Type", "application/json")
            .body("{}")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["riskLevel"], "Yellow");

        server.shutdown();
    }

    #[tokio::test]
    async fn invalid_bind_address_errors() {
        let result = start_api_server(test_ctx(), "256.0.0.1:0").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_api_server(test_ctx(), "127.0.0.1:0")
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown(); // Second call should be safe
    }
}
