//! HTTP API Layer
//!
//! This crate exposes the appeal scoring pipeline over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: liveness, health and the predict endpoint
//! - **Middleware**: request ids, tracing, request logging, CORS
//! - **Error Handling**: consistent `{error, message}` responses
//!
//! The pipeline itself is transport-agnostic; handlers only parse the
//! upload, run the pipeline on the blocking pool and serialize the summary.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, load_pipeline, config::ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! let pipeline = Arc::new(load_pipeline(&config)?);
//! let app = create_router(pipeline, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use domain_appeals::{AppealError, AppealPipeline};
use infra_data::{load_classifier, load_schema};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{health, predict};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AppealPipeline>,
    pub config: ApiConfig,
}

/// Loads the schema and classifier artifacts and builds the pipeline
///
/// # Errors
///
/// Returns [`AppealError::SchemaUnavailable`] if either artifact is missing or
/// inconsistent, and [`AppealError::Configuration`] for invalid settings.
pub fn load_pipeline(config: &ApiConfig) -> Result<AppealPipeline, AppealError> {
    let registry = Arc::new(load_schema(&config.schema_path)?);
    let classifier = load_classifier(&config.model_path, &registry)?;
    AppealPipeline::new(registry, classifier, config.pipeline_settings())
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pipeline` - Shared, fully loaded appeal pipeline
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pipeline: Arc<AppealPipeline>, config: ApiConfig) -> Router {
    let body_limit = config.max_upload_bytes;
    let state = AppState { pipeline, config };

    Router::new()
        .route("/", get(health::home))
        .route("/api/test", get(health::api_test))
        .route("/api/predict", post(predict::predict))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(request_log_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
