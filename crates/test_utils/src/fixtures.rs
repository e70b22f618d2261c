//! Pre-built Test Fixtures
//!
//! Registries and batches that mirror the denied-claims training data:
//! five numeric columns followed by one-hot indicators for procedure code,
//! denial reason and provider specialty.

use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use std::sync::Arc;

use domain_appeals::{ClaimBatch, SchemaRegistry};

use crate::builders::{ClaimBatchBuilder, ClaimRecordBuilder};

/// Numeric column read by [`crate::FeatureEchoClassifier`]
pub const SIGNAL_COLUMN: &str = "appeal_signal";

/// Procedure codes seen at training time
pub const PROCEDURE_CODES: [&str; 10] = [
    "20605", "20610", "45378", "70450", "70553", "97110", "97112", "99213", "99214", "99215",
];

/// Denial reasons seen at training time
pub const DENIAL_REASONS: [&str; 6] = [
    "Experimental procedure",
    "Incorrect coding",
    "Missing documentation",
    "No prior authorization",
    "Not medically necessary",
    "Out of network",
];

/// Provider specialties seen at training time
pub const SPECIALTIES: [&str; 6] = [
    "Family Medicine",
    "Gastroenterology",
    "Internal Medicine",
    "Orthopedics",
    "Physical Therapy",
    "Radiology",
];

/// Numeric training columns, in training order
pub const NUMERIC_COLUMNS: [&str; 5] = [
    "billed_amount",
    "days_since_denial",
    "documentation_score",
    "prior_authorization",
    "patient_age",
];

static TRAINING_REGISTRY: Lazy<Arc<SchemaRegistry>> = Lazy::new(|| {
    Arc::new(SchemaRegistry::new(SchemaFixtures::training_columns()).expect("fixture columns are unique"))
});

static SIGNAL_REGISTRY: Lazy<Arc<SchemaRegistry>> = Lazy::new(|| {
    let mut columns = vec![SIGNAL_COLUMN.to_string()];
    columns.extend(SchemaFixtures::training_columns());
    Arc::new(SchemaRegistry::new(columns).expect("fixture columns are unique"))
});

/// Fixture for schema registries
pub struct SchemaFixtures;

impl SchemaFixtures {
    /// The 27 feature columns of the training data
    pub fn training_columns() -> Vec<String> {
        let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(PROCEDURE_CODES.iter().map(|v| format!("procedure_code_{}", v)));
        columns.extend(DENIAL_REASONS.iter().map(|v| format!("denial_reason_{}", v)));
        columns.extend(SPECIALTIES.iter().map(|v| format!("provider_specialty_{}", v)));
        columns
    }

    /// Shared registry over [`Self::training_columns`]
    pub fn training_registry() -> Arc<SchemaRegistry> {
        Arc::clone(&TRAINING_REGISTRY)
    }

    /// Training registry with [`SIGNAL_COLUMN`] prepended at position 0
    pub fn signal_registry() -> Arc<SchemaRegistry> {
        Arc::clone(&SIGNAL_REGISTRY)
    }
}

/// Fixture for claim batches
pub struct BatchFixtures;

impl BatchFixtures {
    /// Three claims scored 0.8, 0.3 and 0.6 when paired with
    /// `FeatureEchoClassifier::signal()`, billed 1000, 2000 and 1500
    pub fn three_claim_scenario() -> ClaimBatch {
        ClaimBatchBuilder::new()
            .add(
                ClaimRecordBuilder::new()
                    .with_claim_id("CLM00001")
                    .with_billed_amount(dec!(1000))
                    .with_signal(0.8)
                    .build(),
            )
            .add(
                ClaimRecordBuilder::new()
                    .with_claim_id("CLM00002")
                    .with_billed_amount(dec!(2000))
                    .with_signal(0.3)
                    .build(),
            )
            .add(
                ClaimRecordBuilder::new()
                    .with_claim_id("CLM00003")
                    .with_billed_amount(dec!(1500))
                    .with_signal(0.6)
                    .build(),
            )
            .build()
    }

    /// A batch built from `(billed_amount, probability)` pairs with ids `CLM00001..`
    pub fn from_signals(claims: &[(rust_decimal::Decimal, f64)]) -> ClaimBatch {
        claims
            .iter()
            .enumerate()
            .fold(ClaimBatchBuilder::new(), |builder, (i, (amount, p))| {
                builder.add(
                    ClaimRecordBuilder::new()
                        .with_claim_id(format!("CLM{:05}", i + 1))
                        .with_billed_amount(*amount)
                        .with_signal(*p)
                        .build(),
                )
            })
            .build()
    }

    /// CSV text for the three-claim scenario, with a header row
    pub fn three_claim_csv() -> String {
        [
            "claim_id,procedure_code,billed_amount,denial_reason,provider_specialty,appeal_signal",
            "CLM00001,99213,1000,Not medically necessary,Family Medicine,0.8",
            "CLM00002,70450,2000,Experimental procedure,Radiology,0.3",
            "CLM00003,97110,1500,Missing documentation,Physical Therapy,0.6",
        ]
        .join("\n")
    }
}
