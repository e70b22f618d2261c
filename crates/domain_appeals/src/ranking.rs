//! Appeal ranking
//!
//! A claim is recommended for appeal when its success probability is
//! strictly greater than the threshold. Recommended claims are ordered by
//! expected recovery, highest first; equal recoveries keep input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::scoring::{AppealBatch, ScoredClaim};

/// Default strict cut-off for recommending an appeal
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default size of the truncated recommendation view
pub const DEFAULT_TOP_K: usize = 5;

/// Filters and orders scored claims
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppealRanker {
    threshold: f64,
    top_k: usize,
}

impl Default for AppealRanker {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl AppealRanker {
    pub fn new(threshold: f64, top_k: usize) -> Self {
        Self { threshold, top_k }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Whether a claim qualifies for appeal
    pub fn is_recommended(&self, claim: &ScoredClaim<'_>) -> bool {
        claim.success_probability().exceeds(self.threshold)
    }

    /// Ranks a fully scored batch
    pub fn rank<'a>(&self, batch: &AppealBatch<'a>) -> Ranking<'a> {
        let mut recommended: Vec<ScoredClaim<'a>> = batch
            .claims()
            .iter()
            .filter(|c| self.is_recommended(c))
            .copied()
            .collect();

        recommended.sort_by(compare_for_appeal);

        Ranking {
            recommended,
            top_k: self.top_k,
        }
    }
}

/// Higher recovery first, then earlier input position
fn compare_for_appeal(a: &ScoredClaim<'_>, b: &ScoredClaim<'_>) -> Ordering {
    b.predicted_recovery()
        .cmp(&a.predicted_recovery())
        .then_with(|| a.position().cmp(&b.position()))
}

/// Recommended claims in appeal order
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    recommended: Vec<ScoredClaim<'a>>,
    top_k: usize,
}

impl<'a> Ranking<'a> {
    /// Every recommended claim, best first
    pub fn recommended(&self) -> &[ScoredClaim<'a>] {
        &self.recommended
    }

    /// The first `top_k` recommended claims; shorter when fewer qualify
    pub fn top(&self) -> &[ScoredClaim<'a>] {
        let end = self.top_k.min(self.recommended.len());
        &self.recommended[..end]
    }

    pub fn len(&self) -> usize {
        self.recommended.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommended.is_empty()
    }
}
