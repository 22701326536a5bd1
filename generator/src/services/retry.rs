//! Retry decision logic for remote completion attempts
//!
//! The decision function is pure so the backoff schedule can be tested
//! without any I/O. The caller owns the actual sleeping.

use std::time::Duration;

use shared::ApiFailure;

/// What to do after a failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { after: Duration },
    Fail { reason: String },
}

/// Attempt ceiling and backoff base shared by all requests in a run
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Decide the next action after attempt `attempt` (zero-based) failed.
    ///
    /// Rate limits back off twice as hard as other failures; both consume
    /// the same attempt budget. The terminal reason carries the article
    /// title so the failure log can be correlated with the catalog.
    pub fn next_action(&self, failure: &ApiFailure, attempt: u32, title: &str) -> RetryDecision {
        let attempts_left = attempt + 1 < self.max_attempts;
        if !attempts_left {
            return RetryDecision::Fail {
                reason: format!(
                    "{failure} for '{title}' after {} attempts",
                    self.max_attempts
                ),
            };
        }

        let after = match failure {
            ApiFailure::RateLimitExceeded => self.base_delay * (attempt + 1) * 2,
            _ => self.base_delay * (attempt + 1),
        };
        RetryDecision::Retry { after }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_secs(2))
    }

    #[test]
    fn test_backoff_monotonically_non_decreasing() {
        let policy = policy(5);
        let mut last = Duration::ZERO;
        for attempt in 0..4 {
            match policy.next_action(&ApiFailure::Timeout, attempt, "Guide") {
                RetryDecision::Retry { after } => {
                    assert!(after >= last, "backoff shrank at attempt {attempt}");
                    last = after;
                }
                RetryDecision::Fail { .. } => panic!("should retry with attempts left"),
            }
        }
    }

    #[test]
    fn test_rate_limit_backs_off_harder() {
        let policy = policy(3);
        let rate_limited = policy.next_action(&ApiFailure::RateLimitExceeded, 0, "Guide");
        let generic = policy.next_action(&ApiFailure::Timeout, 0, "Guide");
        assert_eq!(
            rate_limited,
            RetryDecision::Retry {
                after: Duration::from_secs(4)
            }
        );
        assert_eq!(
            generic,
            RetryDecision::Retry {
                after: Duration::from_secs(2)
            }
        );
    }

    #[test]
    fn test_exhaustion_reason_names_the_article() {
        let policy = policy(3);
        match policy.next_action(&ApiFailure::RateLimitExceeded, 2, "Pixel Blade Codes") {
            RetryDecision::Fail { reason } => {
                assert!(reason.contains("Pixel Blade Codes"));
                assert!(reason.contains("3 attempts"));
            }
            RetryDecision::Retry { .. } => panic!("attempt budget was exhausted"),
        }
    }

    #[test]
    fn test_single_attempt_policy_never_retries() {
        let policy = policy(1);
        assert!(matches!(
            policy.next_action(&ApiFailure::Timeout, 0, "Guide"),
            RetryDecision::Fail { .. }
        ));
    }
}
