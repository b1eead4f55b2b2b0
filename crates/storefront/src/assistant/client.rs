//! Claude API client for assistant completions.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ClaudeConfig;

use super::error::{ApiErrorResponse, AssistantError};
use super::types::{ChatRequest, ChatResponse, Message};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Claude API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    model: String,
    api_url: String,
    timeout: Duration,
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// `timeout` bounds each HTTP request; callers normally apply their
    /// own, shorter deadline as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key contains invalid header characters
    /// or the HTTP client cannot be built.
    pub fn new(config: &ClaudeConfig, timeout: Duration) -> Result<Self, AssistantError> {
        Self::with_api_url(config, timeout, ANTHROPIC_API_URL)
    }

    /// Create a client that talks to a different endpoint (proxies, tests).
    ///
    /// # Errors
    ///
    /// See [`ClaudeClient::new`].
    pub fn with_api_url(
        config: &ClaudeConfig,
        timeout: Duration,
        api_url: &str,
    ) -> Result<Self, AssistantError> {
        let api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| AssistantError::InvalidConfig("API key is not a valid header".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AssistantError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                model: config.model.clone(),
                api_url: api_url.to_string(),
                timeout,
            }),
        })
    }

    /// Model used for completions.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send a single-turn prompt and return the response text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns an error
    /// status, or the body cannot be parsed. A request that runs past the
    /// client timeout is reported as [`AssistantError::Timeout`].
    #[instrument(skip(self, system, prompt), fields(model = %self.inner.model))]
    pub async fn complete(
        &self,
        system: &str,
        prompt: String,
        temperature: f32,
    ) -> Result<String, AssistantError> {
        match self.send(system, prompt, temperature).await {
            Err(AssistantError::Http(e)) if e.is_timeout() => {
                Err(AssistantError::Timeout(self.inner.timeout))
            }
            other => other,
        }
    }

    async fn send(
        &self,
        system: &str,
        prompt: String,
        temperature: f32,
    ) -> Result<String, AssistantError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message::user(prompt)],
            system: Some(system.to_string()),
            temperature: Some(temperature),
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .json(&request)
            .send()
            .await?;

        let chat = Self::handle_response(response).await?;
        tracing::debug!(
            response_id = %chat.id,
            response_model = %chat.model,
            stop_reason = ?chat.stop_reason,
            input_tokens = chat.usage.input_tokens,
            output_tokens = chat.usage.output_tokens,
            "Assistant completion received"
        );
        let text = chat.text();
        if text.trim().is_empty() {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(text)
    }

    async fn handle_response(response: reqwest::Response) -> Result<ChatResponse, AssistantError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| AssistantError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> AssistantError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return AssistantError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return AssistantError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => parse_error_body(body),
            Err(e) => AssistantError::Http(e),
        }
    }
}

fn parse_error_body(body: String) -> AssistantError {
    match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(api_error) => AssistantError::Api {
            error_type: api_error.error.error_type,
            message: api_error.error.message,
        },
        Err(_) => AssistantError::Api {
            error_type: "unknown".to_string(),
            message: body,
        },
    }
}
