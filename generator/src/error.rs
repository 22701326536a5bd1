//! Generator error types

use thiserror::Error;

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Generator error types
///
/// Per-request remote failures are not errors; they surface as
/// `GenerationOutcome::Failure` data. These variants cover the
/// configuration-level conditions that abort a whole run.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
