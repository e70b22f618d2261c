//! Property-Based Test Generators
//!
//! Provides proptest strategies for claim data that maintains the input
//! invariants (unique ids, non-negative amounts, probabilities in `[0, 1]`).

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_appeals::ClaimBatch;

use crate::builders::{ClaimBatchBuilder, ClaimRecordBuilder};
use crate::fixtures::{DENIAL_REASONS, PROCEDURE_CODES, SPECIALTIES};

/// Strategy for billed amounts between $0.00 and $100,000.00
pub fn billed_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for probabilities, biased so the 0.5 boundary shows up often
pub fn probability_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.5),
        Just(0.0),
        Just(1.0),
        (0u32..=10_000u32).prop_map(|n| n as f64 / 10_000.0),
    ]
}

/// Strategy for procedure codes, mixing trained and never-seen codes
pub fn procedure_code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => proptest::sample::select(PROCEDURE_CODES.to_vec()).prop_map(String::from),
        1 => "[0-9]{5}",
    ]
}

/// Strategy for denial reasons, mixing trained and never-seen reasons
pub fn denial_reason_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => proptest::sample::select(DENIAL_REASONS.to_vec()).prop_map(String::from),
        1 => Just("Timely filing".to_string()),
    ]
}

/// Strategy for provider specialties (trained values only)
pub fn specialty_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(SPECIALTIES.to_vec()).prop_map(String::from)
}

/// Strategy for one claim's `(billed_amount, probability, procedure, reason, specialty)`
pub fn claim_parts_strategy() -> impl Strategy<Value = (Decimal, f64, String, String, String)> {
    (
        billed_amount_strategy(),
        probability_strategy(),
        procedure_code_strategy(),
        denial_reason_strategy(),
        specialty_strategy(),
    )
}

/// Strategy for batches of 1..=`max_len` claims carrying a probability signal
///
/// Ids are `CLM00001..` in input order.
pub fn signal_batch_strategy(max_len: usize) -> impl Strategy<Value = ClaimBatch> {
    proptest::collection::vec(claim_parts_strategy(), 1..=max_len).prop_map(|claims| {
        claims
            .into_iter()
            .enumerate()
            .fold(ClaimBatchBuilder::new(), |builder, (i, (amount, p, code, reason, specialty))| {
                builder.add(
                    ClaimRecordBuilder::new()
                        .with_claim_id(format!("CLM{:05}", i + 1))
                        .with_billed_amount(amount)
                        .with_signal(p)
                        .with_procedure_code(code)
                        .with_denial_reason(reason)
                        .with_provider_specialty(specialty)
                        .build(),
                )
            })
            .build()
    })
}
