//! Shared data model for the article generation pipeline
//!
//! This crate holds the types that flow between the ingestion boundary, the
//! generation core and the persistence boundary, plus the tracing setup used
//! by the generator binary.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::{SharedError, SharedResult};
pub use types::{
    ApiFailure, ArticleRecord, GenerationOutcome, GenerationRequest, LinkIndex, RunReport,
    RunStatistics,
};
