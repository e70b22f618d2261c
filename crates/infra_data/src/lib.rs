//! Data Infrastructure Layer
//!
//! This crate loads everything the appeal pipeline needs from disk and turns
//! uploaded data into domain batches:
//!
//! - **Schema files**: the ordered feature column list saved at training time
//! - **Classifier artifacts**: trained models serialized as JSON and
//!   evaluated behind the [`domain_appeals::Classifier`] trait
//! - **Claim datasets**: CSV text parsed into a [`domain_appeals::ClaimBatch`]
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_data::{load_schema, load_classifier, read_claim_batch_from_path};
//!
//! let registry = Arc::new(load_schema("models/feature_columns.json")?);
//! let classifier = load_classifier("models/claim_model.json", &registry)?;
//! let batch = read_claim_batch_from_path("data/test_data.csv")?;
//! ```

pub mod error;
pub mod schema_store;
pub mod models;
pub mod claims_csv;

pub use error::ArtifactError;
pub use schema_store::{load_schema, parse_schema};
pub use models::{load_classifier, DecisionTree, ForestModel, LogisticModel, ModelArtifact, TreeNode};
pub use claims_csv::{read_claim_batch, read_claim_batch_from_path};
