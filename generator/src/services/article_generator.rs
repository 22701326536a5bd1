//! Per-request generation with retry and backoff
//!
//! One `generate` call drives a single request to a terminal outcome. The
//! retry schedule comes from the pure `RetryPolicy`; this module only owns
//! the call loop, the sleeps and the statistics side effects.

use tracing::{debug, warn};

use crate::services::retry::{RetryDecision, RetryPolicy};
use crate::services::run_tracker::RunTracker;
use crate::traits::CompletionClient;
use shared::{GenerationOutcome, GenerationRequest};

pub struct ArticleGenerator<C: CompletionClient> {
    client: C,
    policy: RetryPolicy,
    tracker: RunTracker,
}

impl<C: CompletionClient> ArticleGenerator<C> {
    pub fn new(client: C, policy: RetryPolicy, tracker: RunTracker) -> Self {
        Self {
            client,
            policy,
            tracker,
        }
    }

    /// Run one request to a terminal outcome. Never returns an error:
    /// exhausted retries become a `Failure` outcome.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        self.tracker.record_issued().await;
        let title = &request.record.title;

        for attempt in 0..self.policy.max_attempts {
            match self.client.complete(&request.prompt).await {
                Ok(response) => {
                    debug!(
                        "Generated '{}' in {}ms ({} tokens)",
                        title,
                        response.response_time.as_millis(),
                        response.total_tokens
                    );
                    self.tracker.record_success(response.total_tokens).await;
                    return GenerationOutcome::Success {
                        content: response.content,
                    };
                }
                Err(failure) => match self.policy.next_action(&failure, attempt, title) {
                    RetryDecision::Retry { after } => {
                        warn!(
                            "{failure} for '{title}', retrying in {:.1}s (attempt {}/{})",
                            after.as_secs_f64(),
                            attempt + 1,
                            self.policy.max_attempts
                        );
                        tokio::time::sleep(after).await;
                    }
                    RetryDecision::Fail { reason } => {
                        self.tracker.record_failure().await;
                        return GenerationOutcome::Failure { reason };
                    }
                },
            }
        }

        // The policy fails on the last attempt, so the loop cannot fall
        // through; keep the invariant of exactly one terminal counter anyway.
        self.tracker.record_failure().await;
        GenerationOutcome::Failure {
            reason: format!(
                "generation failed for '{title}' after {} attempts",
                self.policy.max_attempts
            ),
        }
    }
}
