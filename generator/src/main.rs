//! Generator binary entry point

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use generator::cleanup::SuffixCleaner;
use generator::config::GeneratorConfig;
use generator::pipeline::{ArticlePipeline, RunOptions};
use generator::services::{
    ArticleGenerator, BatchRunner, CsvCatalog, LinkSelector, PromptBuilder, RealArticleStore,
    RealCompletionClient, RetryPolicy, RunTracker,
};

#[derive(Parser)]
#[command(name = "generator")]
#[command(about = "Batch article generation against a remote completion endpoint")]
struct Args {
    /// Base log level (defaults to info)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate articles from the catalog spreadsheet
    Generate {
        /// Path to the configuration file
        #[arg(long, default_value = "config.json")]
        config: PathBuf,

        /// Number of concurrent requests per wave
        #[arg(long, default_value_t = 100)]
        batch_size: usize,

        /// Overwrite existing content files
        #[arg(long)]
        overwrite: bool,

        /// Test mode: only process the first 2 articles
        #[arg(long)]
        test: bool,

        /// Priority range filter, e.g. "1-3"
        #[arg(long)]
        priority: Option<String>,
    },
    /// Rename *_init.mdx files under the content tree to drop the suffix
    Cleanup {
        /// Content tree to walk
        #[arg(long, default_value = "src/content")]
        content_dir: PathBuf,

        /// Preview changes without renaming
        #[arg(long)]
        dry_run: bool,

        /// Overwrite target files if they already exist
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    shared::logging::init_tracing(args.log_level.as_deref());

    match args.command {
        Command::Generate {
            config,
            batch_size,
            overwrite,
            test,
            priority,
        } => {
            let priority_range = priority.as_deref().map(parse_priority_range).transpose()?;
            let config = GeneratorConfig::load(&config)?;
            run_generate(config, batch_size, overwrite, test, priority_range).await
        }
        Command::Cleanup {
            content_dir,
            dry_run,
            force,
        } => {
            let stats = SuffixCleaner::new(content_dir, dry_run, force).run()?;
            info!(
                "📊 Cleanup complete: {} found, {} renamed, {} skipped, {} errors",
                stats.found, stats.renamed, stats.skipped, stats.errors
            );
            Ok(())
        }
    }
}

async fn run_generate(
    config: GeneratorConfig,
    batch_size: usize,
    overwrite: bool,
    test: bool,
    priority_range: Option<(u32, u32)>,
) -> anyhow::Result<()> {
    // Ctrl-c stops new waves from being issued; the in-flight wave finishes.
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("⚠️ Interrupt received, finishing the current wave before stopping");
                shutdown.store(true, Ordering::Relaxed);
            }
        });
    }

    let template = std::fs::read_to_string(&config.prompt_template)
        .with_context(|| format!("failed to read prompt template {}", config.prompt_template))?;

    let client = RealCompletionClient::new(&config)?;
    let tracker = RunTracker::new();
    let policy = RetryPolicy::new(config.retry_attempts, config.retry_delay());
    let article_generator = Arc::new(ArticleGenerator::new(client, policy, tracker.clone()));
    let runner = BatchRunner::new(article_generator, batch_size, config.wave_pause(), shutdown);

    let catalog = CsvCatalog::new(&config.catalog_file, priority_range);
    let selector = LinkSelector::new(config.internal_links.clone(), &config.site_domain);
    let prompt_builder = PromptBuilder::new(template, config.links_per_article);
    let store = RealArticleStore::new(&config.output_dir, &config.failed_log);

    let pipeline = ArticlePipeline::new(catalog, prompt_builder, selector, runner, tracker, store);
    let report = pipeline
        .run(&RunOptions {
            overwrite,
            test_mode: test,
        })
        .await?;

    if report.failed > 0 {
        info!("ℹ️ Failed articles logged to {}", config.failed_log);
    }
    Ok(())
}

/// Parse a priority range like "1-3" into an inclusive (min, max) pair
fn parse_priority_range(raw: &str) -> anyhow::Result<(u32, u32)> {
    let parts: Vec<&str> = raw.split('-').collect();
    let [min, max] = parts.as_slice() else {
        anyhow::bail!("invalid priority range '{raw}': use a form like '1-3'");
    };
    let min: u32 = min
        .trim()
        .parse()
        .with_context(|| format!("invalid priority range '{raw}'"))?;
    let max: u32 = max
        .trim()
        .parse()
        .with_context(|| format!("invalid priority range '{raw}'"))?;
    if min > max {
        anyhow::bail!("invalid priority range '{raw}': min must be <= max");
    }
    Ok((min, max))
}
