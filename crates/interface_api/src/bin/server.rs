//! Appeal Scoring API Server Binary
//!
//! This binary starts the HTTP API server that scores denied claims for
//! appeal.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin appeals-api
//!
//! # Run with environment variables
//! APPEALS_PORT=8080 APPEALS_MODEL_PATH=models/claim_model.json cargo run --bin appeals-api
//! ```
//!
//! # Environment Variables
//!
//! * `APPEALS_HOST` - Server host (default: 0.0.0.0)
//! * `APPEALS_PORT` - Server port (default: 5000, falls back to `PORT`)
//! * `APPEALS_SCHEMA_PATH` - Feature column list (default: models/feature_columns.json)
//! * `APPEALS_MODEL_PATH` - Classifier artifact (default: models/claim_model.json)
//! * `APPEALS_DEFAULT_DATASET_PATH` - CSV scored when no file is uploaded
//! * `APPEALS_RECOMMENDATION_THRESHOLD` - Strict cut-off (default: 0.5)
//! * `APPEALS_TOP_K` - Recommendations listed (default: 5)
//! * `APPEALS_CATEGORICAL_FIELDS` - Comma-separated categorical fields
//! * `APPEALS_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use interface_api::{config::ApiConfig, create_router, load_pipeline};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Loads configuration, initializes logging, loads the model artifacts and
/// starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - The schema or classifier artifact is missing or invalid
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Appeal Scoring API Server"
    );

    let pipeline = load_pipeline(&config).context("failed to load model artifacts")?;
    tracing::info!(
        feature_columns = pipeline.registry().len(),
        threshold = pipeline.settings().recommendation_threshold,
        top_k = pipeline.settings().top_k,
        "Model ready"
    );

    let app = create_router(Arc::new(pipeline), config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
