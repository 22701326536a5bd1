//! One-off content tree cleanup: drop the `_init` suffix from mdx files
//!
//! `pixel-blade-codes_init.mdx` becomes `pixel-blade-codes.mdx`. Dry-run
//! previews without renaming; force overwrites existing targets.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{GeneratorError, GeneratorResult};

const INIT_SUFFIX: &str = "_init.mdx";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupStats {
    pub found: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub errors: usize,
}

pub struct SuffixCleaner {
    base_dir: PathBuf,
    dry_run: bool,
    force: bool,
}

impl SuffixCleaner {
    pub fn new(base_dir: impl AsRef<Path>, dry_run: bool, force: bool) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            dry_run,
            force,
        }
    }

    pub fn run(&self) -> GeneratorResult<CleanupStats> {
        if !self.base_dir.exists() {
            return Err(GeneratorError::ConfigError {
                message: format!("directory {} does not exist", self.base_dir.display()),
            });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.base_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(INIT_SUFFIX))
            .map(|entry| entry.into_path())
            .collect();
        files.sort();

        let mut stats = CleanupStats {
            found: files.len(),
            ..Default::default()
        };
        if files.is_empty() {
            info!("No *{INIT_SUFFIX} files found under {}", self.base_dir.display());
            return Ok(stats);
        }

        for path in files {
            let file_name = path.file_name().unwrap_or_default().to_string_lossy();
            let new_name = file_name.replace(INIT_SUFFIX, ".mdx");
            let new_path = path.with_file_name(&new_name);

            if new_path.exists() && !self.force {
                warn!(
                    "⚠️ Skipping {file_name} -> {new_name} (target exists, use --force to overwrite)"
                );
                stats.skipped += 1;
                continue;
            }

            if self.dry_run {
                info!("🔍 Would rename: {} -> {new_name}", path.display());
                stats.renamed += 1;
                continue;
            }

            match std::fs::rename(&path, &new_path) {
                Ok(()) => {
                    info!("✅ Renamed: {} -> {new_name}", path.display());
                    stats.renamed += 1;
                }
                Err(e) => {
                    warn!("❌ Error renaming {file_name}: {e}");
                    stats.errors += 1;
                }
            }
        }

        Ok(stats)
    }
}
