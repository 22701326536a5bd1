//! Shared fixtures for integration tests

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use generator::traits::{ArticleStore, CompletionClient};
use generator::types::{CompletionResponse, SaveOutcome};
use generator::GeneratorResult;
use shared::{ApiFailure, ArticleRecord};

/// Completion client scripted per article: every prompt containing one of
/// the failing titles keeps returning the configured failure, everything
/// else succeeds with content that names the prompt.
pub struct ScriptedClient {
    failing_titles: HashSet<String>,
    failure: ApiFailure,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedClient {
    pub fn all_succeeding() -> Self {
        Self {
            failing_titles: HashSet::new(),
            failure: ApiFailure::Timeout,
            calls: Arc::default(),
        }
    }

    pub fn failing_for(titles: &[&str], failure: ApiFailure) -> Self {
        Self {
            failing_titles: titles.iter().map(|t| t.to_string()).collect(),
            failure,
            calls: Arc::default(),
        }
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ApiFailure> {
        self.calls.lock().unwrap().push(prompt.to_string());
        if self.failing_titles.iter().any(|t| prompt.contains(t)) {
            return Err(self.failure.clone());
        }
        Ok(CompletionResponse {
            content: format!("generated: {prompt}"),
            total_tokens: 100,
            prompt_tokens: 40,
            completion_tokens: 60,
            model: "gpt-4o".to_string(),
            response_time: Duration::from_millis(10),
        })
    }
}

/// In-memory persistence boundary recording everything handed to it.
/// Clones share state so tests can inspect what the pipeline stored.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub saved: Arc<Mutex<Vec<(String, String)>>>,
    pub failures: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn save_article(
        &self,
        record: &ArticleRecord,
        content: &str,
        _overwrite: bool,
    ) -> GeneratorResult<SaveOutcome> {
        self.saved
            .lock()
            .unwrap()
            .push((record.url_path.clone(), content.to_string()));
        Ok(SaveOutcome::Saved)
    }

    async fn log_failure(&self, record: &ArticleRecord, reason: &str) -> GeneratorResult<()> {
        self.failures
            .lock()
            .unwrap()
            .push((record.url_path.clone(), reason.to_string()));
        Ok(())
    }
}

/// Write a catalog CSV with one row per (path, title, keyword) triple
pub fn write_catalog(dir: &TempDir, rows: &[(&str, &str, &str)]) -> PathBuf {
    let path = dir.path().join("articles.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "URL Path,Article Title,Keyword,Reference Link,Priority").unwrap();
    for (url_path, title, keyword) in rows {
        writeln!(file, "{url_path},{title},{keyword},,").unwrap();
    }
    path
}
