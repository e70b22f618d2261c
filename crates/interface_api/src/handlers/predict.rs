//! Appeal prediction handler

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use domain_appeals::AppealSummary;
use infra_data::{read_claim_batch, read_claim_batch_from_path};
use tracing::{debug, info};

use crate::{error::ApiError, AppState};

/// Form field carrying the uploaded CSV
pub const FILE_FIELD: &str = "file";

/// Scores a batch of denied claims
///
/// Scores the CSV in the `file` part of a multipart form. Requests without
/// that part score the configured default dataset.
pub async fn predict(
    State(state): State<AppState>,
    multipart: Option<Multipart>,
) -> Result<Json<AppealSummary>, ApiError> {
    let upload = match multipart {
        Some(multipart) => read_upload(multipart).await?,
        None => None,
    };

    let pipeline = Arc::clone(&state.pipeline);
    let default_dataset = state.config.default_dataset_path.clone();
    let source = if upload.is_some() { "upload" } else { "default" };

    let summary = tokio::task::spawn_blocking(move || {
        let batch = match upload {
            Some(bytes) => read_claim_batch(&bytes[..])?,
            None => read_claim_batch_from_path(&default_dataset)?,
        };
        pipeline.evaluate(&batch)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("scoring task failed: {}", e)))??;

    info!(
        source,
        total_claims = summary.total_claims,
        recommended = summary.recommended_appeals,
        "Scored claim batch"
    );
    Ok(Json(summary))
}

async fn read_upload(mut multipart: Multipart) -> Result<Option<Bytes>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field.bytes().await?;
            debug!(bytes = bytes.len(), "Received claim upload");
            return Ok(Some(bytes));
        }
    }
    Ok(None)
}
