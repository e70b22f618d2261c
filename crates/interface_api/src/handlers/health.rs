//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiStatusResponse {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub feature_columns: usize,
}

/// Liveness banner
pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Appeal scoring API is running!".to_string(),
    })
}

/// Reports that the API answers and a model is loaded
///
/// The server does not start without a model, so `model_loaded` is always true.
pub async fn api_test() -> Json<ApiStatusResponse> {
    Json(ApiStatusResponse {
        status: "API working".to_string(),
        model_loaded: true,
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes the loaded schema)
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        feature_columns: state.pipeline.registry().len(),
    })
}
