//! Core shared types for the article generation pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{SharedError, SharedResult};

/// Mapping from category name to the ordered list of candidate link paths.
///
/// Loaded once from configuration and read-only for the lifetime of a run.
/// A `BTreeMap` keeps category iteration order stable, which matters when
/// sampling across categories with a seeded rng.
pub type LinkIndex = BTreeMap<String, Vec<String>>;

/// One row of the article catalog spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "URL Path")]
    pub url_path: String,
    #[serde(rename = "Article Title")]
    pub title: String,
    #[serde(rename = "Keyword")]
    pub keyword: String,
    #[serde(rename = "Reference Link", default)]
    pub reference: Option<String>,
    #[serde(rename = "Priority", default)]
    pub priority: Option<u32>,
}

impl ArticleRecord {
    /// Target paths must start and end with a path separator
    pub fn validate_path(&self) -> SharedResult<()> {
        if !self.url_path.starts_with('/') || !self.url_path.ends_with('/') {
            return Err(SharedError::InvalidPath {
                path: self.url_path.clone(),
            });
        }
        Ok(())
    }
}

/// First segment of a target path, `"info"` when the path has no segments
pub fn path_category(url_path: &str) -> &str {
    let stripped = url_path.trim_matches('/');
    match stripped.split('/').next() {
        Some("") | None => "info",
        Some(category) => category,
    }
}

/// A fully rendered generation request, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub record: ArticleRecord,
    pub prompt: String,
}

/// Terminal result of one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { content: String },
    Failure { reason: String },
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success { .. })
    }
}

/// Failure reasons for remote completion requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiFailure {
    /// Authentication failed (invalid API key)
    AuthenticationFailed,
    /// Rate limit exceeded (429)
    RateLimitExceeded,
    /// Request timeout
    Timeout,
    /// Network/connection error
    NetworkError(String),
    /// Non-success status from the endpoint
    ServerError(String),
    /// Service temporarily unavailable (503)
    ServiceUnavailable,
    /// 200 response with missing or unparseable fields
    InvalidResponse(String),
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::AuthenticationFailed => write!(f, "authentication failed"),
            ApiFailure::RateLimitExceeded => write!(f, "rate limited"),
            ApiFailure::Timeout => write!(f, "request timed out"),
            ApiFailure::NetworkError(detail) => write!(f, "network error: {detail}"),
            ApiFailure::ServerError(detail) => write!(f, "server error: {detail}"),
            ApiFailure::ServiceUnavailable => write!(f, "service unavailable"),
            ApiFailure::InvalidResponse(detail) => write!(f, "invalid response: {detail}"),
        }
    }
}

/// Mutable run counters, owned by the run tracker
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    pub issued: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub total_tokens: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunStatistics {
    /// Derive the stable reporting structure from the raw counters
    pub fn report(&self) -> RunReport {
        let duration_seconds = match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => {
                (end - start).num_milliseconds().max(0) as f64 / 1000.0
            }
            _ => 0.0,
        };
        let success_rate = if self.issued > 0 {
            self.succeeded as f64 / self.issued as f64 * 100.0
        } else {
            0.0
        };
        let requests_per_second = if duration_seconds > 0.0 {
            self.issued as f64 / duration_seconds
        } else {
            0.0
        };

        RunReport {
            issued: self.issued,
            succeeded: self.succeeded,
            failed: self.failed,
            success_rate,
            total_tokens: self.total_tokens,
            duration_seconds,
            requests_per_second,
        }
    }
}

/// Aggregate run report handed to the reporting boundary after completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub issued: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub success_rate: f64,
    pub total_tokens: u64,
    pub duration_seconds: f64,
    pub requests_per_second: f64,
}
