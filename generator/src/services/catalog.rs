//! Article catalog ingestion from the spreadsheet export
//!
//! Rows missing essential fields are skipped with a warning; a malformed
//! path format is warned about but does not drop the row (the persistence
//! side derives what it can from the path). A missing catalog file is a
//! fatal configuration-level error.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{GeneratorError, GeneratorResult};
use shared::ArticleRecord;

pub struct CsvCatalog {
    path: PathBuf,
    priority_range: Option<(u32, u32)>,
}

impl CsvCatalog {
    pub fn new(path: impl AsRef<Path>, priority_range: Option<(u32, u32)>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            priority_range,
        }
    }

    pub fn load(&self) -> GeneratorResult<Vec<ArticleRecord>> {
        if !self.path.exists() {
            return Err(GeneratorError::CatalogError {
                message: format!("catalog file not found: {}", self.path.display()),
            });
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        let mut loaded = 0usize;

        for (row, result) in reader.deserialize::<ArticleRecord>().enumerate() {
            // Header is row 1, data starts at row 2
            let row_number = row + 2;
            let mut record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("⚠️ Skipping row {row_number}: {e}");
                    continue;
                }
            };

            trim_record(&mut record);
            if record.url_path.is_empty() || record.title.is_empty() || record.keyword.is_empty()
            {
                warn!("⚠️ Skipping row {row_number} due to missing data");
                continue;
            }
            loaded += 1;

            if record.validate_path().is_err() {
                warn!(
                    "⚠️ Row {row_number}: target path should start and end with '/' - got '{}'",
                    record.url_path
                );
            }

            if let Some((min, max)) = self.priority_range {
                // A filtered run only takes rows with a priority in range;
                // an empty priority cell is excluded like any out-of-range one
                match record.priority {
                    Some(priority) if priority >= min && priority <= max => {}
                    _ => continue,
                }
            }

            records.push(record);
        }

        match self.priority_range {
            Some((min, max)) => info!(
                "✅ Loaded {loaded} articles, {} after priority filter {min}-{max}",
                records.len()
            ),
            None => info!("✅ Loaded {} articles from catalog", records.len()),
        }

        Ok(records)
    }
}

fn trim_record(record: &mut ArticleRecord) {
    record.url_path = record.url_path.trim().to_string();
    record.title = record.title.trim().to_string();
    record.keyword = record.keyword.trim().to_string();
    record.reference = record
        .reference
        .take()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
}
