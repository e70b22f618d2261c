//! Classifier capability
//!
//! The trained model is an external collaborator. The pipeline only needs a
//! probability of appeal success for each aligned feature vector.

use rayon::prelude::*;
use thiserror::Error;

use crate::features::FeatureVector;

/// Errors reported by a classifier implementation
#[derive(Debug, Error, PartialEq)]
pub enum ClassifierError {
    #[error("expected {expected} features, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("classifier returned {actual} probabilities for {expected} vectors")]
    CountMismatch { expected: usize, actual: usize },

    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

/// Estimates the probability that appealing a claim succeeds
///
/// Implementations are shared read-only across concurrent requests and must
/// be deterministic for a given input.
pub trait Classifier: Send + Sync {
    /// Probability of success for one vector, expected in `[0, 1]`
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError>;

    /// Probabilities for many vectors, in input order
    ///
    /// The default evaluates vectors in parallel and reports the first
    /// failure in input order.
    fn predict_batch(&self, features: &[FeatureVector]) -> Result<Vec<f64>, ClassifierError> {
        let results: Vec<Result<f64, ClassifierError>> = features
            .par_iter()
            .map(|f| self.predict_probability(f))
            .collect();
        results.into_iter().collect()
    }

    /// Number of features the model was trained on, when known
    fn expected_width(&self) -> Option<usize> {
        None
    }

    /// Short name for logs
    fn name(&self) -> &str {
        "classifier"
    }
}
