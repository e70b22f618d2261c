//! Core Kernel - Foundational value types for the appeal scoring system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Money amounts with exact decimal arithmetic
//! - Probabilities validated to the closed unit interval
//! - Claim identifiers
//! - Display rounding rules applied at output boundaries

pub mod money;
pub mod probability;
pub mod identifiers;
pub mod rounding;
pub mod error;

pub use money::{Money, MoneyError};
pub use probability::{Probability, ProbabilityError};
pub use identifiers::{ClaimId, IdentifierError};
pub use rounding::{
    round_currency, round_probability, round_probability_value, CURRENCY_DP, PROBABILITY_DP,
};
pub use error::CoreError;
