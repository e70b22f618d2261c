//! Probabilities in the closed unit interval
//!
//! Classifier outputs arrive as `f64`. A [`Probability`] validates the value
//! once and keeps an exact decimal twin so money weighting can stay in
//! decimal arithmetic.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

use crate::rounding::round_probability_value;

/// Errors raised when a value is not a valid probability
#[derive(Debug, Error, PartialEq)]
pub enum ProbabilityError {
    #[error("Probability must be finite, got {0}")]
    NotFinite(f64),

    #[error("Probability must be within [0, 1], got {0}")]
    OutOfRange(f64),
}

/// A probability in `[0, 1]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability {
    value: f64,
    exact: Decimal,
}

impl Probability {
    /// Validates and wraps a raw probability
    pub fn new(value: f64) -> Result<Self, ProbabilityError> {
        if !value.is_finite() {
            return Err(ProbabilityError::NotFinite(value));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ProbabilityError::OutOfRange(value));
        }
        // Values below decimal resolution collapse to zero.
        let exact = Decimal::from_f64(value).unwrap_or(Decimal::ZERO);
        Ok(Self { value, exact })
    }

    /// Zero probability
    pub fn zero() -> Self {
        Self {
            value: 0.0,
            exact: Decimal::ZERO,
        }
    }

    /// Returns the raw value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the decimal representation
    pub fn as_decimal(&self) -> Decimal {
        self.exact
    }

    /// Strict comparison against a threshold
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.value > threshold
    }

    /// Rounds the binary value to four decimal places for display
    pub fn rounded(&self) -> Decimal {
        round_probability_value(self.value)
    }
}

impl PartialEq for Probability {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Probability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl TryFrom<f64> for Probability {
    type Error = ProbabilityError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> f64 {
        p.value
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.value)
    }
}
