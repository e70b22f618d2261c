//! Schema registry
//!
//! The ordered list of feature columns the classifier was trained on. The
//! classifier is positional, so this order is load-bearing. A registry is
//! built once at startup and then only shared read-only.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppealError;

/// Ordered, de-duplicated feature column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SchemaRegistry {
    columns: Vec<String>,
}

impl SchemaRegistry {
    /// Builds a registry, rejecting empty, blank or duplicated column names
    pub fn new<I, S>(columns: I) -> Result<Self, AppealError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(AppealError::schema_unavailable("feature column list is empty"));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.trim().is_empty() {
                return Err(AppealError::schema_unavailable("feature column name is blank"));
            }
            if !seen.insert(column.as_str()) {
                return Err(AppealError::schema_unavailable(format!(
                    "duplicate feature column '{}'",
                    column
                )));
            }
        }

        Ok(Self { columns })
    }

    /// The feature columns in classifier order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; kept alongside `len` for API symmetry
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column in classifier order
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }
}

impl TryFrom<Vec<String>> for SchemaRegistry {
    type Error = AppealError;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<SchemaRegistry> for Vec<String> {
    fn from(registry: SchemaRegistry) -> Vec<String> {
        registry.columns
    }
}
