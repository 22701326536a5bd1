//! Batch article generation pipeline
//!
//! Turns a catalog spreadsheet of article metadata into generated content
//! files by fanning requests out against a remote completion endpoint in
//! bounded concurrent waves, with retry/backoff per request and a run
//! report at the end.

pub mod cleanup;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult};
pub use pipeline::{ArticlePipeline, RunOptions};
pub use traits::*;
pub use types::*;
