//! Generator-specific data types

use shared::{GenerationOutcome, GenerationRequest};
use std::time::Duration;

/// Parsed completion endpoint response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub content: String,
    pub total_tokens: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub model: String,
    pub response_time: Duration,
}

/// Result of one persistence attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    SkippedExists,
    Invalid(String),
}

/// Ordered pairing of request and outcome as returned by the batch runner
pub type RequestOutcome = (GenerationRequest, GenerationOutcome);

/// Persistence counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub saved: u64,
    pub skipped: u64,
    pub invalid: u64,
    pub errors: u64,
    pub logged_failures: u64,
}
