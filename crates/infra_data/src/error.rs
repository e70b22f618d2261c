//! Artifact error types
//!
//! Failures while loading the schema or classifier artifacts. These are
//! startup failures: the service never starts with a partial model.

use std::path::{Path, PathBuf};

use domain_appeals::AppealError;
use thiserror::Error;

/// Errors that can occur while loading persisted artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON of the expected shape
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact parsed but is inconsistent
    #[error("Invalid artifact: {0}")]
    Invalid(String),

    /// The artifact disagrees with the schema registry
    #[error("Artifact does not match schema: {0}")]
    SchemaMismatch(String),
}

impl ArtifactError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, source: serde_json::Error) -> Self {
        ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ArtifactError::Invalid(message.into())
    }
}

impl From<ArtifactError> for AppealError {
    fn from(err: ArtifactError) -> Self {
        AppealError::schema_unavailable(err.to_string())
    }
}
