//! Content tree persistence and failure logging
//!
//! Success outcomes land as `<output_dir>/<category>/<slug>.mdx` after a
//! front-matter check; failure outcomes append a structured entry to the
//! failed-articles log. Validation problems are data (`SaveOutcome::Invalid`),
//! only real I/O faults surface as errors.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::{GeneratorError, GeneratorResult};
use crate::traits::ArticleStore;
use crate::types::SaveOutcome;
use shared::ArticleRecord;

const REQUIRED_FRONT_MATTER_FIELDS: &[&str] =
    &["title:", "description:", "keywords:", "canonical:", "date:"];

pub struct RealArticleStore {
    output_dir: PathBuf,
    failed_log: PathBuf,
}

impl RealArticleStore {
    pub fn new(output_dir: impl AsRef<Path>, failed_log: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            failed_log: failed_log.as_ref().to_path_buf(),
        }
    }

    /// `/cat/slug/` -> ("cat", "slug.mdx"); a single segment doubles as both
    pub fn extract_category_and_filename(url_path: &str) -> GeneratorResult<(String, String)> {
        let parts: Vec<&str> = url_path
            .trim_matches('/')
            .split('/')
            .filter(|part| !part.is_empty())
            .collect();

        match parts.as_slice() {
            [] => Err(GeneratorError::CatalogError {
                message: format!("invalid target path: '{url_path}'"),
            }),
            [only] => Ok((only.to_string(), format!("{only}.mdx"))),
            [category, slug, ..] => Ok((category.to_string(), format!("{slug}.mdx"))),
        }
    }

    /// Check the YAML front matter block and its required fields
    pub fn validate_front_matter(content: &str) -> Result<(), String> {
        if !content.starts_with("---") {
            return Err("missing front matter (content should start with '---')".to_string());
        }

        let parts: Vec<&str> = content.splitn(3, "---").collect();
        if parts.len() < 3 {
            return Err("incomplete front matter (missing closing '---')".to_string());
        }

        let front_matter = parts[1];
        let missing: Vec<&str> = REQUIRED_FRONT_MATTER_FIELDS
            .iter()
            .filter(|field| !front_matter.contains(**field))
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(format!(
                "missing required front matter fields: {}",
                missing.join(", ")
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl ArticleStore for RealArticleStore {
    async fn save_article(
        &self,
        record: &ArticleRecord,
        content: &str,
        overwrite: bool,
    ) -> GeneratorResult<SaveOutcome> {
        if let Err(reason) = Self::validate_front_matter(content) {
            return Ok(SaveOutcome::Invalid(reason));
        }

        let (category, filename) = match Self::extract_category_and_filename(&record.url_path) {
            Ok(pair) => pair,
            Err(e) => return Ok(SaveOutcome::Invalid(e.to_string())),
        };

        let dir_path = self.output_dir.join(&category);
        fs::create_dir_all(&dir_path).await?;

        let file_path = dir_path.join(&filename);
        if file_path.exists() && !overwrite {
            return Ok(SaveOutcome::SkippedExists);
        }

        fs::write(&file_path, content).await?;
        info!("✅ Saved: {category}/{filename}");
        Ok(SaveOutcome::Saved)
    }

    async fn log_failure(&self, record: &ArticleRecord, reason: &str) -> GeneratorResult<()> {
        if let Some(parent) = self.failed_log.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.failed_log)
            .await?;

        let entry = format!(
            "[{}] {} - {}\n  Reason: {}\n  Keyword: {}\n{}\n",
            shared::logging::format_timestamp(),
            record.url_path,
            record.title,
            reason,
            record.keyword,
            "-".repeat(80)
        );
        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
