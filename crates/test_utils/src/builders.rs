//! Test Data Builders
//!
//! Provides builder patterns for constructing claim records and batches with
//! sensible defaults. Tests specify only the fields they care about.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use core_kernel::{ClaimId, Money};
use domain_appeals::record::{BILLED_AMOUNT, CLAIM_ID, DENIAL_REASON, PROCEDURE_CODE, PROVIDER_SPECIALTY};
use domain_appeals::{ClaimBatch, ClaimRecord};

/// Builder for a single claim record
#[derive(Debug, Clone)]
pub struct ClaimRecordBuilder {
    claim_id: String,
    billed_amount: Decimal,
    fields: BTreeMap<String, String>,
}

impl Default for ClaimRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRecordBuilder {
    /// Creates a builder for an office-visit claim denied as not medically necessary
    pub fn new() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(PROCEDURE_CODE.to_string(), "99213".to_string());
        fields.insert(DENIAL_REASON.to_string(), "Not medically necessary".to_string());
        fields.insert(PROVIDER_SPECIALTY.to_string(), "Family Medicine".to_string());
        Self {
            claim_id: "CLM00001".to_string(),
            billed_amount: dec!(1500),
            fields,
        }
    }

    /// Sets the claim id
    pub fn with_claim_id(mut self, id: impl Into<String>) -> Self {
        self.claim_id = id.into();
        self
    }

    /// Sets the billed amount
    pub fn with_billed_amount(mut self, amount: Decimal) -> Self {
        self.billed_amount = amount;
        self
    }

    /// Sets the procedure code
    pub fn with_procedure_code(self, code: impl Into<String>) -> Self {
        self.with_field(PROCEDURE_CODE, code)
    }

    /// Sets the denial reason
    pub fn with_denial_reason(self, reason: impl Into<String>) -> Self {
        self.with_field(DENIAL_REASON, reason)
    }

    /// Sets the provider specialty
    pub fn with_provider_specialty(self, specialty: impl Into<String>) -> Self {
        self.with_field(PROVIDER_SPECIALTY, specialty)
    }

    /// Sets the numeric signal read by [`crate::FeatureEchoClassifier`]
    pub fn with_signal(self, probability: f64) -> Self {
        self.with_field(crate::fixtures::SIGNAL_COLUMN, probability.to_string())
    }

    /// Sets any context field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Removes a context field
    pub fn without_field(mut self, name: &str) -> Self {
        self.fields.remove(name);
        self
    }

    /// Builds the record
    pub fn build(self) -> ClaimRecord {
        let id = ClaimId::new(&self.claim_id).expect("builder claim id must not be blank");
        self.fields
            .into_iter()
            .fold(ClaimRecord::new(id, Money::new(self.billed_amount)), |record, (k, v)| {
                record.with_field(k, v)
            })
    }

    /// Builds the equivalent raw input row
    pub fn build_row(self) -> BTreeMap<String, String> {
        let mut row = self.fields;
        row.insert(CLAIM_ID.to_string(), self.claim_id);
        row.insert(BILLED_AMOUNT.to_string(), self.billed_amount.to_string());
        row
    }
}

/// Builder for a claim batch
#[derive(Debug, Clone, Default)]
pub struct ClaimBatchBuilder {
    records: Vec<ClaimRecord>,
    columns: Option<Vec<String>>,
}

impl ClaimBatchBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record
    pub fn add(mut self, record: ClaimRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Appends `count` default records with ids `CLM00001..`
    pub fn add_default_claims(mut self, count: usize) -> Self {
        let start = self.records.len();
        for i in start..start + count {
            self.records.push(
                ClaimRecordBuilder::new()
                    .with_claim_id(format!("CLM{:05}", i + 1))
                    .build(),
            );
        }
        self
    }

    /// Overrides the declared batch columns
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the batch
    pub fn build(self) -> ClaimBatch {
        match self.columns {
            Some(columns) => ClaimBatch::new(columns, self.records),
            None => ClaimBatch::from_records(self.records),
        }
    }
}
