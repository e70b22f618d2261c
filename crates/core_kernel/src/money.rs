//! Money amounts with exact decimal arithmetic
//!
//! Billed amounts and expected recoveries are carried as `rust_decimal`
//! values so that summing and ranking never suffer from binary floating-point
//! drift. Rounding happens only at output boundaries (see [`crate::rounding`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

use crate::probability::Probability;
use crate::rounding::{round_currency, CURRENCY_DP};

/// Errors that can occur when constructing money amounts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Negative amount not allowed: {0}")]
    Negative(Decimal),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount
///
/// Amounts are kept at full precision. All amounts in a batch share one
/// implicit currency, so no currency tag is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a new Money value without rounding
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates a Money value, rejecting negative amounts
    pub fn non_negative(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Parses a non-negative amount from text such as `"1500"` or `"1234.56"`
    pub fn parse_non_negative(text: &str) -> Result<Self, MoneyError> {
        let trimmed = text.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| MoneyError::InvalidAmount(text.to_string()))?;
        Self::non_negative(amount)
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Weights the amount by a probability, keeping full precision
    ///
    /// This is the expected value of recovering the amount when recovery
    /// succeeds with the given probability.
    pub fn weighted_by(&self, probability: Probability) -> Result<Self, MoneyError> {
        self.0
            .checked_mul(probability.as_decimal())
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked addition
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Rounds to cents for display
    pub fn round_to_cents(&self) -> Decimal {
        round_currency(self.0)
    }

    /// Lossy conversion for numeric feature vectors
    pub fn to_f64(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.dp$}", self.0, dp = CURRENCY_DP as usize)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}
