//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! appeal scoring test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built registries and claim batches
//! - `builders`: Builder patterns for claim records and batches
//! - `classifiers`: Deterministic stand-in classifiers
//! - `assertions`: Custom assertion helpers for pipeline output
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod classifiers;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use classifiers::*;
pub use assertions::*;
pub use generators::*;
