//! Generator trait definitions for dependency injection

use async_trait::async_trait;

use crate::error::GeneratorResult;
use crate::types::{CompletionResponse, SaveOutcome};
use shared::{ApiFailure, ArticleRecord};

/// Remote completion endpoint, one outbound call per attempt
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue a single completion call for the given prompt
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ApiFailure>;
}

/// Persistence boundary for generated articles and failure records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Write validated content under the category/filename derived from the
    /// record's target path
    async fn save_article(
        &self,
        record: &ArticleRecord,
        content: &str,
        overwrite: bool,
    ) -> GeneratorResult<SaveOutcome>;

    /// Append a structured entry to the failed-articles log
    async fn log_failure(&self, record: &ArticleRecord, reason: &str) -> GeneratorResult<()>;
}
