//! Scoring engine
//!
//! Attaches a success probability and an expected recovery to each claim.
//! Recoveries are kept unrounded here; rounding happens in the assembler.

use std::sync::Arc;

use tracing::debug;

use core_kernel::{CoreError, Money, Probability};

use crate::classifier::{Classifier, ClassifierError};
use crate::error::AppealError;
use crate::features::FeatureVector;
use crate::record::{ClaimBatch, ClaimRecord};

/// A claim with its model score
///
/// Borrows its source record; it never outlives the batch it was scored from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredClaim<'a> {
    record: &'a ClaimRecord,
    position: usize,
    success_probability: Probability,
    predicted_recovery: Money,
}

impl<'a> ScoredClaim<'a> {
    pub fn record(&self) -> &'a ClaimRecord {
        self.record
    }

    /// Zero-based position of the claim in its input batch
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn success_probability(&self) -> Probability {
        self.success_probability
    }

    /// `billed_amount × success_probability`, at full precision
    pub fn predicted_recovery(&self) -> Money {
        self.predicted_recovery
    }
}

/// Every scored claim of one request, in input order
#[derive(Debug, Clone)]
pub struct AppealBatch<'a> {
    claims: Vec<ScoredClaim<'a>>,
}

impl<'a> AppealBatch<'a> {
    pub fn claims(&self) -> &[ScoredClaim<'a>] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Runs the classifier over aligned vectors
#[derive(Clone)]
pub struct ScoringEngine {
    classifier: Arc<dyn Classifier>,
}

impl ScoringEngine {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Scores a batch whose records were aligned into `vectors`
    ///
    /// Neither the records nor the vectors are modified. Any classifier
    /// failure or out-of-range probability fails the whole batch.
    pub fn score<'a>(
        &self,
        batch: &'a ClaimBatch,
        vectors: &[FeatureVector],
    ) -> Result<AppealBatch<'a>, AppealError> {
        if vectors.len() != batch.len() {
            return Err(AppealError::internal(format!(
                "{} feature vectors for {} claims",
                vectors.len(),
                batch.len()
            )));
        }

        let probabilities = self.classifier.predict_batch(vectors)?;
        if probabilities.len() != vectors.len() {
            return Err(ClassifierError::CountMismatch {
                expected: vectors.len(),
                actual: probabilities.len(),
            }
            .into());
        }

        let claims = batch
            .records()
            .iter()
            .zip(probabilities)
            .enumerate()
            .map(|(position, (record, raw))| {
                let claim_error = |e: CoreError| {
                    AppealError::from_kernel(format_args!("claim '{}'", record.claim_id()), e)
                };
                let success_probability =
                    Probability::new(raw).map_err(|e| claim_error(e.into()))?;
                let predicted_recovery = record
                    .billed_amount()
                    .weighted_by(success_probability)
                    .map_err(|e| claim_error(e.into()))?;
                Ok(ScoredClaim {
                    record,
                    position,
                    success_probability,
                    predicted_recovery,
                })
            })
            .collect::<Result<Vec<_>, AppealError>>()?;

        debug!(
            claims = claims.len(),
            classifier = self.classifier.name(),
            "Batch scored"
        );
        Ok(AppealBatch { claims })
    }
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("classifier", &self.classifier.name())
            .finish()
    }
}
