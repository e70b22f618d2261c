//! Schema file loading
//!
//! Training saves the feature column list either as a bare JSON array or
//! wrapped as `{ "feature_columns": [...] }`. Both are accepted.

use std::fs;
use std::path::Path;

use domain_appeals::SchemaRegistry;
use serde::Deserialize;
use tracing::info;

use crate::error::ArtifactError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    Columns(Vec<String>),
    Wrapped { feature_columns: Vec<String> },
}

impl SchemaDocument {
    fn into_columns(self) -> Vec<String> {
        match self {
            SchemaDocument::Columns(columns) => columns,
            SchemaDocument::Wrapped { feature_columns } => feature_columns,
        }
    }
}

/// Parses schema JSON text into a registry
pub fn parse_schema(json: &str) -> Result<SchemaRegistry, ArtifactError> {
    let document: SchemaDocument = serde_json::from_str(json)
        .map_err(|e| ArtifactError::invalid(format!("schema is not a column list: {}", e)))?;
    SchemaRegistry::new(document.into_columns()).map_err(|e| ArtifactError::invalid(e.to_string()))
}

/// Loads the schema registry from a file
///
/// # Errors
///
/// Returns an [`ArtifactError`] if the file is missing, is not a column list,
/// or lists an empty, blank or duplicated column.
pub fn load_schema(path: impl AsRef<Path>) -> Result<SchemaRegistry, ArtifactError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ArtifactError::io(path, e))?;
    let document: SchemaDocument =
        serde_json::from_str(&text).map_err(|e| ArtifactError::parse(path, e))?;
    let registry = SchemaRegistry::new(document.into_columns())
        .map_err(|e| ArtifactError::invalid(e.to_string()))?;

    info!(path = %path.display(), columns = registry.len(), "Loaded schema registry");
    Ok(registry)
}
