//! Appeal pipeline
//!
//! Wires the five stages together. A pipeline is built once at startup from
//! an injected schema registry and classifier and then shared read-only by
//! every request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classifier::Classifier;
use crate::error::AppealError;
use crate::features::FeatureAligner;
use crate::ranking::{AppealRanker, DEFAULT_THRESHOLD, DEFAULT_TOP_K};
use crate::record::{ClaimBatch, DEFAULT_CATEGORICAL_FIELDS};
use crate::schema::SchemaRegistry;
use crate::scoring::ScoringEngine;
use crate::summary::{AppealSummary, ResultAssembler};

/// Tunable pipeline settings
///
/// The defaults are a strict `> 0.5` cut-off, a top-5 view, and the three
/// standard categorical claim fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub recommendation_threshold: f64,
    pub top_k: usize,
    pub categorical_fields: Vec<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            recommendation_threshold: DEFAULT_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            categorical_fields: DEFAULT_CATEGORICAL_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

impl PipelineSettings {
    /// Validates the settings
    pub fn validate(&self) -> Result<(), AppealError> {
        if !(0.0..=1.0).contains(&self.recommendation_threshold) {
            return Err(AppealError::configuration(format!(
                "recommendation_threshold must be within [0, 1], got {}",
                self.recommendation_threshold
            )));
        }
        if self.top_k == 0 {
            return Err(AppealError::configuration("top_k must be at least 1"));
        }
        if self.categorical_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AppealError::configuration("categorical field names must not be blank"));
        }
        Ok(())
    }
}

/// The full scoring pipeline
#[derive(Debug, Clone)]
pub struct AppealPipeline {
    settings: PipelineSettings,
    aligner: FeatureAligner,
    scoring: ScoringEngine,
    ranker: AppealRanker,
    assembler: ResultAssembler,
}

impl AppealPipeline {
    /// Builds a pipeline
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for invalid settings and `SchemaUnavailable`
    /// when the classifier reports a feature width different from the
    /// registry's.
    pub fn new(
        registry: Arc<SchemaRegistry>,
        classifier: Arc<dyn Classifier>,
        settings: PipelineSettings,
    ) -> Result<Self, AppealError> {
        settings.validate()?;

        if let Some(width) = classifier.expected_width() {
            if width != registry.len() {
                return Err(AppealError::schema_unavailable(format!(
                    "classifier '{}' expects {} features but the registry declares {}",
                    classifier.name(),
                    width,
                    registry.len()
                )));
            }
        }

        let aligner = FeatureAligner::new(registry, &settings.categorical_fields);
        let ranker = AppealRanker::new(settings.recommendation_threshold, settings.top_k);

        Ok(Self {
            aligner,
            scoring: ScoringEngine::new(classifier),
            ranker,
            assembler: ResultAssembler::new(),
            settings,
        })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        self.aligner.registry()
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn aligner(&self) -> &FeatureAligner {
        &self.aligner
    }

    /// Scores and ranks one batch
    ///
    /// Either every claim is scored and a complete summary is returned, or
    /// the batch fails as a whole.
    pub fn evaluate(&self, batch: &ClaimBatch) -> Result<AppealSummary, AppealError> {
        if let Err(e) = batch.validate(&self.settings.categorical_fields) {
            warn!(error = %e, "Rejected claim batch");
            return Err(e);
        }

        let vectors = self.aligner.align(batch)?;
        let scored = self.scoring.score(batch, &vectors)?;
        let ranking = self.ranker.rank(&scored);
        debug!(recommended = ranking.len(), "Batch ranked");

        self.assembler.assemble(&scored, &ranking)
    }
}
