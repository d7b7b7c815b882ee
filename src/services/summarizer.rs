use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use crate::core::truncate_summary;

/// Errors that can occur when calling the summarization API
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Summarizer not configured")]
    NotConfigured,
}

/// Shortens free-text answers for seat cards
///
/// Uses an OpenAI-compatible chat completions endpoint when an API key is
/// configured and falls back to plain truncation otherwise, or on any
/// remote failure. Results are kept in an in-process cache.
pub struct Summarizer {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    client: Client,
    cache: moka::future::Cache<String, String>,
}

impl Summarizer {
    /// Create a new summarizer
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        model: String,
        timeout_secs: u64,
        cache_size: u64,
        cache_ttl_secs: u64,
    ) -> Result<Self, SummarizerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let cache = moka::future::CacheBuilder::new(cache_size)
            .time_to_live(Duration::from_secs(cache_ttl_secs))
            .build();

        Ok(Self {
            endpoint,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
            client,
            cache,
        })
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Summarize `text` to at most `max_chars` characters
    ///
    /// Never fails: remote errors are logged and replaced by truncation.
    pub async fn summarize(&self, text: &str, max_chars: usize) -> String {
        let trimmed = text.trim();
        if trimmed.chars().count() <= max_chars {
            return trimmed.to_string();
        }

        let key = format!("{}:{}", max_chars, trimmed);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::trace!("Summary cache hit");
            return cached;
        }

        let summary = match self.summarize_remote(trimmed, max_chars).await {
            Ok(summary) => summary,
            Err(SummarizerError::NotConfigured) => truncate_summary(trimmed, max_chars),
            Err(e) => {
                // Not cached, so the next call retries the API
                tracing::warn!("Summarization failed, falling back to truncation: {}", e);
                return truncate_summary(trimmed, max_chars);
            }
        };

        self.cache.insert(key, summary.clone()).await;
        summary
    }

    async fn summarize_remote(&self, text: &str, max_chars: usize) -> Result<String, SummarizerError> {
        let api_key = self.api_key.as_ref().ok_or(SummarizerError::NotConfigured)?;

        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));
        let body = json!({
            "model": self.model,
            "temperature": 0.2,
            "messages": [
                {
                    "role": "system",
                    "content": format!(
                        "Summarize the participant's answer in at most {} characters. \
                         Reply with the summary only, in the answer's language.",
                        max_chars
                    ),
                },
                { "role": "user", "content": text },
            ],
        });

        tracing::debug!("Requesting summary from: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SummarizerError::ApiError(format!(
                "Summary request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let content = json
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| SummarizerError::InvalidResponse("Missing choices[0].message.content".into()))?;

        // Models do not always respect the length limit
        Ok(truncate_summary(content, max_chars))
    }
}
