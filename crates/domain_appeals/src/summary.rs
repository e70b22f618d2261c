//! Result assembly
//!
//! Packages batch statistics and the top recommendations into the output
//! contract. This is the only place amounts and probabilities are rounded:
//! currency to 2 places, probabilities to 4. Probabilities are classifier
//! floats, so they are averaged and rounded as binary values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{round_currency, round_probability_value, ClaimId, Money};

use crate::error::AppealError;
use crate::ranking::Ranking;
use crate::scoring::{AppealBatch, ScoredClaim};

/// One recommended appeal in the output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppealRecommendation {
    pub claim_id: ClaimId,
    #[serde(with = "rust_decimal::serde::float")]
    pub billed_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub success_probability: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub predicted_recovery: Decimal,
}

impl From<&ScoredClaim<'_>> for AppealRecommendation {
    fn from(claim: &ScoredClaim<'_>) -> Self {
        Self {
            claim_id: claim.record().claim_id().clone(),
            billed_amount: claim.record().billed_amount().round_to_cents(),
            success_probability: claim.success_probability().rounded(),
            predicted_recovery: claim.predicted_recovery().round_to_cents(),
        }
    }
}

/// Batch-level appeal summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppealSummary {
    pub total_claims: usize,
    pub recommended_appeals: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_estimated_recovery: Decimal,
    /// Mean probability over recommended claims; zero when none qualify
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_success_probability: Decimal,
    pub top_5_appeals: Vec<AppealRecommendation>,
}

/// Builds the summary from a scored batch and its ranking
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAssembler;

impl ResultAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(
        &self,
        batch: &AppealBatch<'_>,
        ranking: &Ranking<'_>,
    ) -> Result<AppealSummary, AppealError> {
        let recommended = ranking.recommended();

        let total_recovery = recommended.iter().try_fold(Money::zero(), |acc, claim| {
            acc.checked_add(&claim.predicted_recovery())
        });
        // Billed amounts are caller input, so an overflowing total is too.
        let total_recovery =
            total_recovery.map_err(|e| AppealError::from_kernel("total estimated recovery", e))?;

        let avg_probability = if recommended.is_empty() {
            0.0
        } else {
            let sum: f64 = recommended
                .iter()
                .map(|c| c.success_probability().value())
                .sum();
            sum / recommended.len() as f64
        };

        let summary = AppealSummary {
            total_claims: batch.len(),
            recommended_appeals: recommended.len(),
            total_estimated_recovery: round_currency(total_recovery.amount()),
            avg_success_probability: round_probability_value(avg_probability),
            top_5_appeals: ranking.top().iter().map(AppealRecommendation::from).collect(),
        };

        info!(
            total_claims = summary.total_claims,
            recommended = summary.recommended_appeals,
            total_estimated_recovery = %summary.total_estimated_recovery,
            "Appeal summary assembled"
        );

        Ok(summary)
    }
}
