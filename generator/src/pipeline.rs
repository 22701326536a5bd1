//! End-to-end run orchestration with dependency injection
//!
//! Wires the ingestion boundary, the prompt builder, the batch runner and
//! the persistence boundary together. The pipeline is generic over the
//! completion client and the article store so tests can swap in fakes.

use rand::thread_rng;
use tracing::{info, warn};

use crate::error::GeneratorResult;
use crate::services::batch_runner::BatchRunner;
use crate::services::catalog::CsvCatalog;
use crate::services::link_selector::LinkSelector;
use crate::services::prompt::PromptBuilder;
use crate::services::run_tracker::RunTracker;
use crate::traits::{ArticleStore, CompletionClient};
use crate::types::{SaveOutcome, StoreStats};
use shared::{GenerationOutcome, GenerationRequest, RunReport};

/// Per-run flags from the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub overwrite: bool,
    pub test_mode: bool,
}

pub struct ArticlePipeline<C, S>
where
    C: CompletionClient + 'static,
    S: ArticleStore,
{
    catalog: CsvCatalog,
    prompt_builder: PromptBuilder,
    selector: LinkSelector,
    runner: BatchRunner<C>,
    tracker: RunTracker,
    store: S,
}

impl<C, S> ArticlePipeline<C, S>
where
    C: CompletionClient + 'static,
    S: ArticleStore,
{
    pub fn new(
        catalog: CsvCatalog,
        prompt_builder: PromptBuilder,
        selector: LinkSelector,
        runner: BatchRunner<C>,
        tracker: RunTracker,
        store: S,
    ) -> Self {
        Self {
            catalog,
            prompt_builder,
            selector,
            runner,
            tracker,
            store,
        }
    }

    /// Run the whole batch and persist the outcomes. Only configuration
    /// and catalog-level problems abort the run; per-request failures are
    /// reflected in the returned report.
    pub async fn run(&self, options: &RunOptions) -> GeneratorResult<RunReport> {
        let mut records = self.catalog.load()?;
        if options.test_mode {
            records.truncate(2);
            info!("🧪 Test mode: processing only {} articles", records.len());
        }
        info!("📝 Articles to generate: {}", records.len());

        let requests: Vec<GenerationRequest> = {
            let mut rng = thread_rng();
            records
                .iter()
                .map(|record| self.prompt_builder.build(&mut rng, &self.selector, record))
                .collect()
        };

        self.tracker.start().await;
        let outcomes = self.runner.run_batch(requests).await;
        self.tracker.finish().await;

        let mut store_stats = StoreStats::default();
        for (request, outcome) in &outcomes {
            match outcome {
                GenerationOutcome::Success { content } => {
                    match self
                        .store
                        .save_article(&request.record, content, options.overwrite)
                        .await
                    {
                        Ok(SaveOutcome::Saved) => store_stats.saved += 1,
                        Ok(SaveOutcome::SkippedExists) => {
                            warn!(
                                "⚠️ Skipping {} (already exists)",
                                request.record.url_path
                            );
                            store_stats.skipped += 1;
                        }
                        Ok(SaveOutcome::Invalid(reason)) => {
                            warn!(
                                "❌ Validation failed for '{}': {reason}",
                                request.record.title
                            );
                            store_stats.invalid += 1;
                        }
                        Err(e) => {
                            warn!("❌ Error saving '{}': {e}", request.record.title);
                            store_stats.errors += 1;
                        }
                    }
                }
                GenerationOutcome::Failure { reason } => {
                    if let Err(e) = self.store.log_failure(&request.record, reason).await {
                        warn!(
                            "❌ Failed to log failure for '{}': {e}",
                            request.record.title
                        );
                    } else {
                        store_stats.logged_failures += 1;
                    }
                }
            }
        }

        let report = self.tracker.report().await;
        log_summary(&report, &store_stats);
        Ok(report)
    }
}

fn log_summary(report: &RunReport, store: &StoreStats) {
    info!("📊 Generation complete");
    info!("   Issued:           {}", report.issued);
    info!("   Succeeded:        {} ✅", report.succeeded);
    info!("   Failed:           {} ❌", report.failed);
    info!("   Success rate:     {:.2}%", report.success_rate);
    info!("   Total tokens:     {}", report.total_tokens);
    info!("   Duration:         {:.2}s", report.duration_seconds);
    info!("   Requests/second:  {:.2}", report.requests_per_second);
    info!(
        "   Saved: {} / skipped: {} / invalid: {} / write errors: {}",
        store.saved, store.skipped, store.invalid, store.errors
    );
}
