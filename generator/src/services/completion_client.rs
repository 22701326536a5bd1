//! Remote completion client for the OpenAI-compatible endpoint

use std::time::Instant;

use async_trait::async_trait;

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::traits::CompletionClient;
use crate::types::CompletionResponse;
use shared::ApiFailure;

const SYSTEM_PROMPT: &str =
    "You are a professional SEO content writer specializing in gaming articles.";

/// Real completion client backed by a shared reqwest connection pool
pub struct RealCompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl RealCompletionClient {
    /// Build the client; the per-call timeout lives on the underlying pool
    pub fn new(config: &GeneratorConfig) -> GeneratorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GeneratorError::ConfigError {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for RealCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ApiFailure> {
        let request_body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let request_start = Instant::now();
        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiFailure::Timeout
                } else {
                    ApiFailure::NetworkError(e.to_string())
                }
            })?;

        let response_time = request_start.elapsed();

        if !response.status().is_success() {
            return match response.status().as_u16() {
                401 => Err(ApiFailure::AuthenticationFailed),
                429 => Err(ApiFailure::RateLimitExceeded),
                503 => Err(ApiFailure::ServiceUnavailable),
                status => {
                    let body = response.text().await.unwrap_or_default();
                    Err(ApiFailure::ServerError(format!(
                        "HTTP {status}: {}",
                        snippet(&body)
                    )))
                }
            };
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiFailure::InvalidResponse(format!("failed to parse body: {e}")))?;

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| ApiFailure::InvalidResponse("no content in response".to_string()))?;

        let usage = response_json.get("usage");
        let total_tokens = usage
            .and_then(|u| u.get("total_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0);
        let prompt_tokens = usage
            .and_then(|u| u.get("prompt_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0);
        let completion_tokens = usage
            .and_then(|u| u.get("completion_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0);

        Ok(CompletionResponse {
            content: content.to_string(),
            total_tokens,
            prompt_tokens,
            completion_tokens,
            model: self.model.clone(),
            response_time,
        })
    }
}

/// Keep error bodies short enough for a log line
fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(200)
        .map(|(idx, _)| idx)
        .unwrap_or(body.len());
    &body[..end]
}
