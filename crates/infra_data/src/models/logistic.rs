//! Logistic regression

use domain_appeals::{Classifier, ClassifierError, FeatureVector};
use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// A fitted logistic regression: `sigmoid(intercept + w·x)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LogisticModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    pub fn validate(&self, width: usize) -> Result<(), ArtifactError> {
        if self.coefficients.len() != width {
            return Err(ArtifactError::SchemaMismatch(format!(
                "logistic model has {} coefficients, schema has {} columns",
                self.coefficients.len(),
                width
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::invalid("logistic model has a non-finite weight"));
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        if features.len() != self.coefficients.len() {
            return Err(ClassifierError::WidthMismatch {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }
        let z = self
            .coefficients
            .iter()
            .zip(features.values())
            .fold(self.intercept, |acc, (w, x)| acc + w * x);
        Ok(sigmoid(z))
    }

    fn expected_width(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn name(&self) -> &str {
        "logistic"
    }
}
