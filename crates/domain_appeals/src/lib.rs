//! Appeal Scoring Domain
//!
//! This crate turns a batch of raw denied-claim records into a ranked list of
//! appeal candidates. Data flows strictly one way through five stages:
//!
//! ```text
//! SchemaRegistry -> FeatureAligner -> ScoringEngine -> AppealRanker -> ResultAssembler
//! ```
//!
//! The registry and classifier are read-only dependencies injected into an
//! [`AppealPipeline`]; each call to [`AppealPipeline::evaluate`] is a pure
//! function of its batch and either yields a complete [`AppealSummary`] or a
//! single [`AppealError`].

pub mod record;
pub mod schema;
pub mod features;
pub mod classifier;
pub mod scoring;
pub mod ranking;
pub mod summary;
pub mod pipeline;
pub mod error;

pub use record::{ClaimBatch, ClaimRecord, RawRow, RecordError};
pub use schema::SchemaRegistry;
pub use features::{FeatureAligner, FeatureIndex, FeatureVector, MISSING_CATEGORY};
pub use classifier::{Classifier, ClassifierError};
pub use scoring::{AppealBatch, ScoredClaim, ScoringEngine};
pub use ranking::{AppealRanker, Ranking};
pub use summary::{AppealRecommendation, AppealSummary, ResultAssembler};
pub use pipeline::{AppealPipeline, PipelineSettings};
pub use error::{AppealError, ErrorKind};
