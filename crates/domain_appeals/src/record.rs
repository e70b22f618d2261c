//! Raw claim records and batches
//!
//! A [`ClaimRecord`] is one denied claim as read from external input. Only
//! `claim_id` and `billed_amount` are structurally required; every other
//! column is kept as trimmed text and interpreted later by the feature
//! aligner. Records are immutable once read.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use core_kernel::{ClaimId, Money};

use crate::error::AppealError;

/// Column holding the claim identifier
pub const CLAIM_ID: &str = "claim_id";
/// Column holding the billed amount
pub const BILLED_AMOUNT: &str = "billed_amount";
/// Procedure code column
pub const PROCEDURE_CODE: &str = "procedure_code";
/// Denial reason column
pub const DENIAL_REASON: &str = "denial_reason";
/// Provider specialty column
pub const PROVIDER_SPECIALTY: &str = "provider_specialty";

/// Categorical fields expanded into indicator columns unless configured otherwise
pub const DEFAULT_CATEGORICAL_FIELDS: [&str; 3] = [PROCEDURE_CODE, DENIAL_REASON, PROVIDER_SPECIALTY];

/// One input row: column name to cell text
pub type RawRow = BTreeMap<String, String>;

/// Problems with a single input row
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid billed_amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("field '{field}' has non-numeric value '{value}'")]
    NotNumeric { field: String, value: String },
}

/// A raw denied claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimRecord {
    claim_id: ClaimId,
    billed_amount: Money,
    /// Non-blank context cells other than the id and amount
    fields: BTreeMap<String, String>,
}

impl ClaimRecord {
    /// Creates a record with no context fields
    pub fn new(claim_id: ClaimId, billed_amount: Money) -> Self {
        Self {
            claim_id,
            billed_amount,
            fields: BTreeMap::new(),
        }
    }

    /// Adds a context field; blank values are treated as missing
    pub fn with_field(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.fields.insert(name.into(), value.to_string());
        }
        self
    }

    /// Parses a record from a raw row
    ///
    /// Cells are trimmed and blank cells are treated as missing.
    pub fn from_row(row: &RawRow) -> Result<Self, RecordError> {
        let claim_id = non_blank(row, CLAIM_ID)
            .and_then(|v| ClaimId::new(v).ok())
            .ok_or(RecordError::MissingField(CLAIM_ID))?;

        let amount_text = non_blank(row, BILLED_AMOUNT).ok_or(RecordError::MissingField(BILLED_AMOUNT))?;
        let billed_amount = Money::parse_non_negative(amount_text).map_err(|e| RecordError::InvalidAmount {
            value: amount_text.to_string(),
            reason: e.to_string(),
        })?;

        let fields = row
            .iter()
            .filter(|(name, _)| name.as_str() != CLAIM_ID && name.as_str() != BILLED_AMOUNT)
            .filter_map(|(name, value)| {
                let value = value.trim();
                (!value.is_empty()).then(|| (name.clone(), value.to_string()))
            })
            .collect();

        Ok(Self {
            claim_id,
            billed_amount,
            fields,
        })
    }

    pub fn claim_id(&self) -> &ClaimId {
        &self.claim_id
    }

    pub fn billed_amount(&self) -> Money {
        self.billed_amount
    }

    /// Returns a context field, `None` when missing or blank
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn procedure_code(&self) -> Option<&str> {
        self.field(PROCEDURE_CODE)
    }

    pub fn denial_reason(&self) -> Option<&str> {
        self.field(DENIAL_REASON)
    }

    pub fn provider_specialty(&self) -> Option<&str> {
        self.field(PROVIDER_SPECIALTY)
    }

    /// Reads a numeric feature value
    ///
    /// `billed_amount` comes from the parsed amount. Other fields accept
    /// integers, decimals and `true`/`false`. A missing field is `Ok(None)`.
    pub fn numeric(&self, name: &str) -> Result<Option<f64>, RecordError> {
        if name == BILLED_AMOUNT {
            return Ok(Some(self.billed_amount.to_f64()));
        }
        match self.field(name) {
            None => Ok(None),
            Some(text) => parse_numeric(text).map(Some).ok_or_else(|| RecordError::NotNumeric {
                field: name.to_string(),
                value: text.to_string(),
            }),
        }
    }
}

fn non_blank<'a>(row: &'a RawRow, name: &str) -> Option<&'a str> {
    row.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_numeric(text: &str) -> Option<f64> {
    if text.eq_ignore_ascii_case("true") {
        return Some(1.0);
    }
    if text.eq_ignore_ascii_case("false") {
        return Some(0.0);
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// An ordered batch of claim records plus the columns the batch declared
///
/// The column list is the batch schema: a header row for tabular input, or
/// the union of record fields for batches assembled in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimBatch {
    columns: Vec<String>,
    records: Vec<ClaimRecord>,
}

impl ClaimBatch {
    /// Creates a batch with an explicit column list
    pub fn new(columns: Vec<String>, records: Vec<ClaimRecord>) -> Self {
        Self { columns, records }
    }

    /// Creates a batch whose columns are the id, the amount, and every
    /// context field seen in the records, in first-seen order
    pub fn from_records(records: Vec<ClaimRecord>) -> Self {
        let mut columns = vec![CLAIM_ID.to_string(), BILLED_AMOUNT.to_string()];
        let mut seen: HashSet<String> = columns.iter().cloned().collect();
        for record in &records {
            for name in record.fields.keys() {
                if seen.insert(name.clone()) {
                    columns.push(name.clone());
                }
            }
        }
        Self { columns, records }
    }

    /// Parses raw rows into a batch
    ///
    /// Fails on the first unparseable row, naming its 1-based position.
    pub fn from_rows<I>(columns: Vec<String>, rows: I) -> Result<Self, AppealError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                ClaimRecord::from_row(&row)
                    .map_err(|e| AppealError::malformed(format!("record {}: {}", i + 1, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { columns, records })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[ClaimRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Checks the batch-level structure
    ///
    /// A batch must be non-empty, declare every required categorical column,
    /// and carry unique claim ids.
    pub fn validate(&self, categorical_fields: &[String]) -> Result<(), AppealError> {
        if self.records.is_empty() {
            return Err(AppealError::malformed("claim batch is empty"));
        }

        if let Some(missing) = categorical_fields.iter().find(|f| !self.has_column(f)) {
            return Err(AppealError::malformed(format!(
                "required column '{}' is absent from the batch",
                missing
            )));
        }

        let mut ids = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !ids.insert(record.claim_id.as_str()) {
                return Err(AppealError::malformed(format!(
                    "duplicate claim_id '{}'",
                    record.claim_id
                )));
            }
        }

        Ok(())
    }
}
