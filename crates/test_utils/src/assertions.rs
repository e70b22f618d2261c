//! Custom Test Assertions
//!
//! Provides assertion helpers for pipeline output that give more meaningful
//! failure messages than standard assertions.

use rust_decimal::Decimal;

use domain_appeals::{AppealSummary, FeatureVector, SchemaRegistry};

/// Asserts that every vector has exactly the registry's width
pub fn assert_vectors_match_registry(vectors: &[FeatureVector], registry: &SchemaRegistry) {
    for (i, vector) in vectors.iter().enumerate() {
        assert_eq!(
            vector.len(),
            registry.len(),
            "Vector {} has {} columns, registry declares {}",
            i,
            vector.len(),
            registry.len()
        );
    }
}

/// Asserts that a value carries no more than `dp` decimal places
pub fn assert_max_decimal_places(value: Decimal, dp: u32) {
    assert_eq!(
        value,
        value.round_dp(dp),
        "Expected at most {} decimal places, got {}",
        dp,
        value
    );
}

/// Asserts that the top appeals are sorted by predicted recovery, highest first
pub fn assert_top_appeals_sorted(summary: &AppealSummary) {
    for pair in summary.top_5_appeals.windows(2) {
        assert!(
            pair[0].predicted_recovery >= pair[1].predicted_recovery,
            "Appeals out of order: {} ({}) before {} ({})",
            pair[0].claim_id,
            pair[0].predicted_recovery,
            pair[1].claim_id,
            pair[1].predicted_recovery
        );
    }
}

/// Asserts the output rounding contract on every numeric field
pub fn assert_summary_rounding(summary: &AppealSummary) {
    assert_max_decimal_places(summary.total_estimated_recovery, 2);
    assert_max_decimal_places(summary.avg_success_probability, 4);
    for appeal in &summary.top_5_appeals {
        assert_max_decimal_places(appeal.billed_amount, 2);
        assert_max_decimal_places(appeal.success_probability, 4);
        assert_max_decimal_places(appeal.predicted_recovery, 2);
    }
}

/// Asserts the claim ids of the top appeals, in order
pub fn assert_top_claim_ids(summary: &AppealSummary, expected: &[&str]) {
    let actual: Vec<&str> = summary
        .top_5_appeals
        .iter()
        .map(|a| a.claim_id.as_str())
        .collect();
    assert_eq!(actual, expected, "Unexpected top appeal order");
}
