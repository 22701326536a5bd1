//! Run statistics tracking with serialized increments
//!
//! The tracker is owned by the coordinator and passed explicitly to the
//! parts that record outcomes; there is no ambient global state. Increments
//! go through one write lock at a time, which is enough since they commute.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use shared::{RunReport, RunStatistics};

#[derive(Clone, Default)]
pub struct RunTracker {
    stats: Arc<RwLock<RunStatistics>>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn start(&self) {
        let mut stats = self.stats.write().await;
        stats.started_at = Some(Utc::now());
    }

    pub async fn finish(&self) {
        let mut stats = self.stats.write().await;
        stats.finished_at = Some(Utc::now());
    }

    /// One per request, at dispatch entry
    pub async fn record_issued(&self) {
        let mut stats = self.stats.write().await;
        stats.issued += 1;
    }

    /// Terminal success; usage units accumulate only here
    pub async fn record_success(&self, tokens: u64) {
        let mut stats = self.stats.write().await;
        stats.succeeded += 1;
        stats.total_tokens += tokens;
    }

    /// Terminal failure after retry exhaustion
    pub async fn record_failure(&self) {
        let mut stats = self.stats.write().await;
        stats.failed += 1;
    }

    pub async fn snapshot(&self) -> RunStatistics {
        self.stats.read().await.clone()
    }

    pub async fn report(&self) -> RunReport {
        self.stats.read().await.report()
    }
}
