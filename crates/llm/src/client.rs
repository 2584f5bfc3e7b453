//! HTTP client for an OpenAI-compatible chat completion API.
//!
//! Defaults target OpenRouter. One request per call: no retries, no caching.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::provider::{CompletionError, CompletionProvider, CompletionRequest};

/// Default API base URL (OpenRouter).
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Default model identifier.
const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";
/// Default whole-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Completion service configuration.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl CompletionConfig {
    /// Load completion configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default                         |
    /// |---------------------------|----------|---------------------------------|
    /// | `OPENROUTER_API_KEY`      | **yes**  | --                              |
    /// | `COMPLETION_BASE_URL`     | no       | `https://openrouter.ai/api/v1`  |
    /// | `COMPLETION_MODEL`        | no       | `google/gemini-2.0-flash-001`   |
    /// | `COMPLETION_TIMEOUT_SECS` | no       | `60`                            |
    ///
    /// # Panics
    ///
    /// Panics if `OPENROUTER_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .expect("OPENROUTER_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "OPENROUTER_API_KEY must not be empty");

        let base_url =
            std::env::var("COMPLETION_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = std::env::var("COMPLETION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("COMPLETION_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("COMPLETION_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            model,
            timeout_secs,
        }
    }
}

/// Chat completion response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

/// [`CompletionProvider`] backed by `POST {base_url}/chat/completions`.
pub struct ChatCompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ChatCompletionClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, config: &CompletionConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Return the response unchanged on success, or an
    /// [`CompletionError::ApiError`] carrying the status and body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CompletionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CompletionError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, CompletionError> {
        tracing::debug!(model = %request.model, messages = request.messages.len(), "Sending completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body: ChatCompletionResponse = response.json().await?;

        let Some(choice) = body.choices.into_iter().next() else {
            tracing::warn!("Completion response contained no choices");
            return Ok(None);
        };

        if let Some(refusal) = choice.message.refusal {
            tracing::warn!(%refusal, "Completion service refused the request");
            return Ok(None);
        }

        Ok(choice.message.content)
    }
}
