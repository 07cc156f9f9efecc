use tracing_subscriber::EnvFilter;

use swasthya::api::{self, ApiContext};
use swasthya::config::{self, AppConfig};
use swasthya::triage::RiskClassifier;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Swasthya Margdarshan starting v{}", config::APP_VERSION);

    let app_config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // The classifier's HTTP client is blocking; build it before the
    // async runtime exists so it never lives on an async worker.
    let classifier = RiskClassifier::from_config(&app_config.model);
    let ctx = ApiContext::new(classifier);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create async runtime: {e}");
            std::process::exit(1);
        }
    };

    runtime.block_on(serve(ctx, &app_config.bind_addr));
}

async fn serve(ctx: ApiContext, bind_addr: &str) {
    let mut server = match api::start_api_server(ctx, bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server.addr, "Ready for symptom submissions");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    tracing::info!("Shutting down");
    server.shutdown();
}
