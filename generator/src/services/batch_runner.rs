//! Wave-based concurrent dispatch of generation requests
//!
//! Requests are partitioned into consecutive waves of at most `batch_size`
//! elements. All calls of a wave are joined before the next wave starts;
//! there is no cross-wave overlap. A fixed pause between waves throttles
//! overall throughput independently of per-call rate-limit handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::services::article_generator::ArticleGenerator;
use crate::traits::CompletionClient;
use crate::types::RequestOutcome;
use shared::{GenerationOutcome, GenerationRequest};

pub struct BatchRunner<C: CompletionClient + 'static> {
    generator: Arc<ArticleGenerator<C>>,
    batch_size: usize,
    wave_pause: Duration,
    shutdown: Arc<AtomicBool>,
}

impl<C: CompletionClient + 'static> BatchRunner<C> {
    pub fn new(
        generator: Arc<ArticleGenerator<C>>,
        batch_size: usize,
        wave_pause: Duration,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            generator,
            batch_size: batch_size.max(1),
            wave_pause,
            shutdown,
        }
    }

    /// Run all requests to completion. Returns exactly one outcome per
    /// request, in input order, regardless of completion order inside a
    /// wave. Task panics are converted to `Failure` outcomes here; nothing
    /// propagates to the caller.
    ///
    /// On interrupt the in-flight wave finishes, no new wave starts, and
    /// requests that were never dispatched resolve to an interrupted-run
    /// failure so each request still gets exactly one outcome.
    pub async fn run_batch(&self, requests: Vec<GenerationRequest>) -> Vec<RequestOutcome> {
        let total = requests.len();
        let total_waves = (total + self.batch_size - 1) / self.batch_size;
        let mut results: Vec<RequestOutcome> = Vec::with_capacity(total);
        let mut start = 0;
        let mut wave_num = 0;

        while start < total {
            if self.shutdown.load(Ordering::Relaxed) {
                warn!(
                    "⚠️ Run interrupted, {} requests not dispatched",
                    total - start
                );
                for request in &requests[start..] {
                    results.push((
                        request.clone(),
                        GenerationOutcome::Failure {
                            reason: format!(
                                "run interrupted before dispatch for '{}'",
                                request.record.title
                            ),
                        },
                    ));
                }
                break;
            }

            wave_num += 1;
            let end = (start + self.batch_size).min(total);
            info!(
                "📦 Processing wave {}/{} ({} requests)",
                wave_num,
                total_waves,
                end - start
            );

            let mut handles = Vec::with_capacity(end - start);
            for request in &requests[start..end] {
                let generator = Arc::clone(&self.generator);
                let request = request.clone();
                handles.push(tokio::spawn(
                    async move { generator.generate(&request).await },
                ));
            }

            for (offset, joined) in join_all(handles).await.into_iter().enumerate() {
                let request = requests[start + offset].clone();
                let outcome = match joined {
                    Ok(outcome) => outcome,
                    Err(e) => GenerationOutcome::Failure {
                        reason: format!(
                            "generation task failed for '{}': {e}",
                            request.record.title
                        ),
                    },
                };
                results.push((request, outcome));
            }

            info!("✅ Completed {}/{} requests", end, total);
            start = end;

            if start < total {
                tokio::time::sleep(self.wave_pause).await;
            }
        }

        results
    }
}
