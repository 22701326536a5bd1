//! Run configuration loaded from a JSON file plus the environment
//!
//! The config file carries the endpoint/model settings, the content-tree
//! paths and the internal link index. The API key is never stored in the
//! file; it comes from `OPENAI_API_KEY` (a `.env` file is honored).

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{GeneratorError, GeneratorResult};
use shared::LinkIndex;

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub api_base_url: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_wave_pause_secs")]
    pub wave_pause_secs: u64,
    pub catalog_file: String,
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,
    pub output_dir: String,
    #[serde(default = "default_failed_log")]
    pub failed_log: String,
    pub site_domain: String,
    #[serde(default = "default_links_per_article")]
    pub links_per_article: usize,
    #[serde(default)]
    pub internal_links: LinkIndex,

    /// From the environment, never from the config file
    #[serde(skip)]
    pub api_key: String,
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    2
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_wave_pause_secs() -> u64 {
    1
}

fn default_prompt_template() -> String {
    "prompt-template.txt".to_string()
}

fn default_failed_log() -> String {
    "logs/failed_articles.log".to_string()
}

fn default_links_per_article() -> usize {
    2
}

impl GeneratorConfig {
    /// Load and validate the configuration; any problem here is fatal to the run
    pub fn load(path: &Path) -> GeneratorResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| GeneratorError::ConfigError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let mut config = Self::from_json(&raw)?;
        config.api_key =
            std::env::var("OPENAI_API_KEY").map_err(|_| GeneratorError::ConfigError {
                message: "OPENAI_API_KEY must be set".to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the JSON document without touching the environment
    pub fn from_json(raw: &str) -> GeneratorResult<Self> {
        serde_json::from_str(raw).map_err(|e| GeneratorError::ConfigError {
            message: format!("invalid configuration: {e}"),
        })
    }

    fn validate(&self) -> GeneratorResult<()> {
        if self.api_base_url.is_empty() {
            return Err(GeneratorError::ConfigError {
                message: "api_base_url must not be empty".to_string(),
            });
        }
        if self.model.is_empty() {
            return Err(GeneratorError::ConfigError {
                message: "model must not be empty".to_string(),
            });
        }
        if self.site_domain.is_empty() {
            return Err(GeneratorError::ConfigError {
                message: "site_domain must not be empty".to_string(),
            });
        }
        if self.retry_attempts == 0 {
            return Err(GeneratorError::ConfigError {
                message: "retry_attempts must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn wave_pause(&self) -> Duration {
        Duration::from_secs(self.wave_pause_secs)
    }
}
