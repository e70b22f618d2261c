//! Feature alignment
//!
//! Converts claim records into numeric vectors laid out exactly like the
//! schema registry. Indicator columns are named `<field>_<value>` after the
//! one-hot expansion used at training time.
//!
//! The category universe comes only from the registry: a [`FeatureIndex`]
//! maps each `(field, value)` pair to its registry column once, up front. A
//! record therefore encodes the same way whatever else is in its batch.
//! Values the registry has never seen map to no column and are dropped, and
//! registry columns a record does not populate stay at zero.

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::error::AppealError;
use crate::record::{ClaimBatch, ClaimRecord};
use crate::schema::SchemaRegistry;

/// Category used when a record leaves a categorical field blank
pub const MISSING_CATEGORY: &str = "__missing__";

/// A numeric feature vector in registry order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// Precomputed mapping from record values to registry positions
#[derive(Debug, Clone)]
pub struct FeatureIndex {
    width: usize,
    /// Registry position and source field of each numeric column
    numeric: Vec<(usize, String)>,
    /// Categorical field -> category value -> registry position
    categories: HashMap<String, HashMap<String, usize>>,
    categorical_fields: Vec<String>,
}

impl FeatureIndex {
    /// Classifies every registry column as an indicator of a declared
    /// categorical field or as a numeric column read by name
    pub fn build(registry: &SchemaRegistry, categorical_fields: &[String]) -> Self {
        // Longest field first so `code_type_x` is not claimed by `code`.
        let mut prefixes: Vec<&String> = categorical_fields.iter().collect();
        prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut numeric = Vec::new();
        let mut categories: HashMap<String, HashMap<String, usize>> = categorical_fields
            .iter()
            .map(|f| (f.clone(), HashMap::new()))
            .collect();

        for (position, column) in registry.columns().iter().enumerate() {
            let indicator = prefixes.iter().find_map(|field| {
                column
                    .strip_prefix(field.as_str())
                    .and_then(|rest| rest.strip_prefix('_'))
                    .filter(|value| !value.is_empty())
                    .map(|value| (field.as_str(), value))
            });

            match indicator {
                Some((field, value)) => {
                    if let Some(values) = categories.get_mut(field) {
                        values.insert(value.to_string(), position);
                    }
                }
                None => numeric.push((position, column.clone())),
            }
        }

        debug!(
            width = registry.len(),
            numeric = numeric.len(),
            indicators = registry.len() - numeric.len(),
            "Feature index built"
        );

        Self {
            width: registry.len(),
            numeric,
            categories,
            categorical_fields: categorical_fields.to_vec(),
        }
    }

    /// Number of columns in every encoded vector
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn categorical_fields(&self) -> &[String] {
        &self.categorical_fields
    }

    /// Registry position of the indicator for `field == value`, if trained on
    pub fn column_for(&self, field: &str, value: &str) -> Option<usize> {
        self.categories.get(field)?.get(value).copied()
    }

    /// Encodes one record
    ///
    /// Fails only when a numeric column holds text that is not a number.
    pub fn encode(&self, record: &ClaimRecord) -> Result<FeatureVector, AppealError> {
        let mut values = vec![0.0; self.width];

        for (position, name) in &self.numeric {
            let value = record.numeric(name).map_err(|e| {
                AppealError::malformed(format!("claim '{}': {}", record.claim_id(), e))
            })?;
            if let Some(value) = value {
                values[*position] = value;
            }
        }

        for field in &self.categorical_fields {
            let category = record.field(field).unwrap_or(MISSING_CATEGORY);
            if let Some(position) = self.column_for(field, category) {
                values[position] = 1.0;
            }
        }

        Ok(FeatureVector { values })
    }
}

/// Aligns whole batches against the schema registry
#[derive(Debug, Clone)]
pub struct FeatureAligner {
    registry: Arc<SchemaRegistry>,
    index: FeatureIndex,
}

impl FeatureAligner {
    pub fn new(registry: Arc<SchemaRegistry>, categorical_fields: &[String]) -> Self {
        let index = FeatureIndex::build(&registry, categorical_fields);
        Self { registry, index }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn index(&self) -> &FeatureIndex {
        &self.index
    }

    /// Encodes every record, preserving input order
    ///
    /// Records are encoded in parallel. When several records are malformed
    /// the first one in input order is reported.
    pub fn align(&self, batch: &ClaimBatch) -> Result<Vec<FeatureVector>, AppealError> {
        if batch.is_empty() {
            return Err(AppealError::malformed("claim batch is empty"));
        }

        let encoded: Vec<Result<FeatureVector, AppealError>> = batch
            .records()
            .par_iter()
            .map(|record| self.index.encode(record))
            .collect();
        let vectors = encoded.into_iter().collect::<Result<Vec<_>, _>>()?;

        debug!(records = vectors.len(), width = self.index.width(), "Batch aligned");
        Ok(vectors)
    }
}
