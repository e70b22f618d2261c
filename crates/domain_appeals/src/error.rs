//! Appeal scoring errors

use std::fmt::Display;

use thiserror::Error;

use core_kernel::CoreError;

use crate::classifier::ClassifierError;

/// Broad category of an [`AppealError`], for callers that branch on kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The schema registry could not be built; fatal at startup
    SchemaUnavailable,
    /// Pipeline settings are invalid; fatal at startup
    Configuration,
    /// The caller's batch cannot be processed as given
    MalformedInput,
    /// Something failed inside the pipeline or the classifier
    Internal,
}

/// Errors that can occur while scoring a batch of claims
///
/// Unknown category values and an empty recommendation set are not errors.
#[derive(Debug, Error)]
pub enum AppealError {
    #[error("Schema unavailable: {0}")]
    SchemaUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Classifier failure: {0}")]
    Classifier(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppealError {
    pub fn schema_unavailable(message: impl Into<String>) -> Self {
        AppealError::SchemaUnavailable(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        AppealError::Configuration(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        AppealError::MalformedInput(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppealError::Internal(message.into())
    }

    /// Returns the broad kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppealError::SchemaUnavailable(_) => ErrorKind::SchemaUnavailable,
            AppealError::Configuration(_) => ErrorKind::Configuration,
            AppealError::MalformedInput(_) => ErrorKind::MalformedInput,
            AppealError::Classifier(_) | AppealError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True when the failure was caused by the caller's input
    pub fn is_caller_error(&self) -> bool {
        self.kind() == ErrorKind::MalformedInput
    }

    /// Converts a kernel error, prefixing its message with `context`
    ///
    /// Money and identifier errors stem from the caller's amounts and ids.
    /// An invalid probability is the classifier's fault.
    pub fn from_kernel(context: impl Display, err: impl Into<CoreError>) -> Self {
        Self::classify(err.into(), |detail| format!("{}: {}", context, detail))
    }

    fn classify(err: CoreError, message: impl FnOnce(String) -> String) -> Self {
        match err {
            CoreError::Money(e) => AppealError::MalformedInput(message(e.to_string())),
            CoreError::Identifier(e) => AppealError::MalformedInput(message(e.to_string())),
            CoreError::Validation(m) => AppealError::MalformedInput(message(m)),
            CoreError::Probability(e) => AppealError::Classifier(message(e.to_string())),
            CoreError::Configuration(m) => AppealError::Configuration(message(m)),
        }
    }
}

impl From<CoreError> for AppealError {
    fn from(err: CoreError) -> Self {
        Self::classify(err, |detail| detail)
    }
}

impl From<ClassifierError> for AppealError {
    fn from(err: ClassifierError) -> Self {
        AppealError::Classifier(err.to_string())
    }
}
