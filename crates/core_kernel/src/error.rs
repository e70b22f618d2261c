//! Core error types used across the system

use thiserror::Error;
use crate::identifiers::IdentifierError;
use crate::money::MoneyError;
use crate::probability::ProbabilityError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Probability error: {0}")]
    Probability(#[from] ProbabilityError),

    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
