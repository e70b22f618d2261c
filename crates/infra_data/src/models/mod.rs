//! Trained classifier artifacts
//!
//! A classifier artifact is JSON tagged by `kind`. Each kind is validated
//! against the schema registry when loaded, so evaluation never indexes out
//! of range and never loops.

mod forest;
mod logistic;

pub use forest::{DecisionTree, ForestModel, TreeNode};
pub use logistic::LogisticModel;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use domain_appeals::{Classifier, SchemaRegistry};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ArtifactError;

/// A persisted classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticModel),
    Forest(ForestModel),
}

impl ModelArtifact {
    /// Checks the artifact against a feature width
    pub fn validate(&self, width: usize) -> Result<(), ArtifactError> {
        match self {
            ModelArtifact::Logistic(model) => model.validate(width),
            ModelArtifact::Forest(model) => model.validate(width),
        }
    }

    /// Validates and converts into a shareable classifier
    pub fn into_classifier(self, registry: &SchemaRegistry) -> Result<Arc<dyn Classifier>, ArtifactError> {
        self.validate(registry.len())?;
        Ok(match self {
            ModelArtifact::Logistic(model) => Arc::new(model),
            ModelArtifact::Forest(model) => Arc::new(model.with_width(registry.len())),
        })
    }
}

/// Loads and validates a classifier artifact
///
/// # Errors
///
/// Returns an [`ArtifactError`] if the file is missing, is not a known
/// artifact kind, or does not fit the registry.
pub fn load_classifier(
    path: impl AsRef<Path>,
    registry: &SchemaRegistry,
) -> Result<Arc<dyn Classifier>, ArtifactError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ArtifactError::io(path, e))?;
    let artifact: ModelArtifact =
        serde_json::from_str(&text).map_err(|e| ArtifactError::parse(path, e))?;
    let classifier = artifact.into_classifier(registry)?;

    info!(
        path = %path.display(),
        model = classifier.name(),
        width = registry.len(),
        "Loaded classifier"
    );
    Ok(classifier)
}
