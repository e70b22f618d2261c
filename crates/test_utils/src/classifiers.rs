//! Deterministic stand-in classifiers
//!
//! Real models are loaded by `infra_data`. These stand-ins make expected
//! probabilities explicit in test data.

use domain_appeals::{Classifier, ClassifierError, FeatureVector};

/// Returns the same probability for every claim
#[derive(Debug, Clone, Copy)]
pub struct ConstantClassifier(pub f64);

impl Classifier for ConstantClassifier {
    fn predict_probability(&self, _features: &FeatureVector) -> Result<f64, ClassifierError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

/// Returns the value of one feature column as the probability
///
/// Paired with [`crate::SchemaFixtures::signal_registry`] and records built
/// with `with_signal`, each claim's probability is whatever the test wrote.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEchoClassifier {
    column: usize,
}

impl FeatureEchoClassifier {
    pub fn new(column: usize) -> Self {
        Self { column }
    }

    /// Echoes the signal column of the signal registry
    pub fn signal() -> Self {
        Self::new(0)
    }
}

impl Classifier for FeatureEchoClassifier {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        features.get(self.column).ok_or(ClassifierError::WidthMismatch {
            expected: self.column + 1,
            actual: features.len(),
        })
    }

    fn name(&self) -> &str {
        "feature-echo"
    }
}

/// Always fails
#[derive(Debug, Clone)]
pub struct FailingClassifier(pub String);

impl Classifier for FailingClassifier {
    fn predict_probability(&self, _features: &FeatureVector) -> Result<f64, ClassifierError> {
        Err(ClassifierError::Evaluation(self.0.clone()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Declares a fixed feature width without ever being called
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthClassifier(pub usize);

impl Classifier for FixedWidthClassifier {
    fn predict_probability(&self, _features: &FeatureVector) -> Result<f64, ClassifierError> {
        Ok(0.0)
    }

    fn expected_width(&self) -> Option<usize> {
        Some(self.0)
    }
}
