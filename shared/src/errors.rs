//! Shared error types for the article generation pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid target path: {path} (must start and end with '/')")]
    InvalidPath { path: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
