//! AI shopping assistant.
//!
//! Two capabilities sit behind the [`AssistantGateway`] trait:
//!
//! - **Recommend**: answer a free-text question using the current catalog.
//! - **Compare**: a structured analysis of two products ending in a
//!   `CONCLUSION:` line.
//!
//! Handlers never see gateway errors. [`Assistant`] applies a deadline and
//! turns every failure into a fixed, visitor-safe message.

mod client;
mod error;
pub mod prompts;
mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{instrument, warn};

use handset_core::Product;

pub use client::ClaudeClient;
pub use error::AssistantError;

/// Marker that opens the verdict line of a comparison.
pub const CONCLUSION_MARKER: &str = "CONCLUSION";

/// Shown when a recommendation comes back empty.
pub const RECOMMEND_EMPTY: &str = "Sorry, I couldn't process your recommendation right now.";
/// Shown when the recommendation call fails.
pub const RECOMMEND_FAILED: &str = "Connection to the assistant failed. Please try again.";
/// Shown when a comparison comes back empty.
pub const COMPARE_EMPTY: &str = "Comparative analysis unavailable.";
/// Shown when the comparison call fails.
pub const COMPARE_FAILED: &str = "Hardware comparison analysis failed.";
/// Shown when either call runs past the deadline.
pub const TIMED_OUT: &str = "The assistant took too long to respond. Please try again.";

/// Backend that produces assistant text.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Recommend a product from `catalog` for the visitor's question.
    async fn recommend(&self, query: &str, catalog: &[Product]) -> Result<String, AssistantError>;

    /// Produce a structured comparison of two products.
    async fn compare(&self, a: &Product, b: &Product) -> Result<String, AssistantError>;
}

/// Gateway backed by the Claude Messages API.
#[derive(Clone)]
pub struct ClaudeAssistant {
    client: ClaudeClient,
}

impl ClaudeAssistant {
    #[must_use]
    pub const fn new(client: ClaudeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssistantGateway for ClaudeAssistant {
    async fn recommend(&self, query: &str, catalog: &[Product]) -> Result<String, AssistantError> {
        self.client
            .complete(
                prompts::RECOMMEND_SYSTEM,
                prompts::recommend_prompt(query, catalog),
                prompts::RECOMMEND_TEMPERATURE,
            )
            .await
    }

    async fn compare(&self, a: &Product, b: &Product) -> Result<String, AssistantError> {
        self.client
            .complete(
                prompts::COMPARE_SYSTEM,
                prompts::compare_prompt(a, b),
                prompts::COMPARE_TEMPERATURE,
            )
            .await
    }
}

/// Gateway used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAssistant;

#[async_trait]
impl AssistantGateway for OfflineAssistant {
    async fn recommend(&self, _query: &str, _catalog: &[Product]) -> Result<String, AssistantError> {
        Err(AssistantError::NotConfigured)
    }

    async fn compare(&self, _a: &Product, _b: &Product) -> Result<String, AssistantError> {
        Err(AssistantError::NotConfigured)
    }
}

/// How an assistant call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Answered,
    Empty,
    TimedOut,
    Failed,
}

/// Text to show the visitor, whatever happened upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantReply {
    pub text: String,
    pub status: ReplyStatus,
}

impl AssistantReply {
    fn fallback(text: &str, status: ReplyStatus) -> Self {
        Self {
            text: text.to_string(),
            status,
        }
    }
}

/// Deadline-bounded front for an [`AssistantGateway`].
#[derive(Clone)]
pub struct Assistant {
    gateway: Arc<dyn AssistantGateway>,
    timeout: Duration,
}

impl Assistant {
    #[must_use]
    pub fn new(gateway: Arc<dyn AssistantGateway>, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    /// Recommend a product for `query`.
    #[instrument(skip(self, catalog), fields(products = catalog.len()))]
    pub async fn recommend(&self, query: &str, catalog: &[Product]) -> AssistantReply {
        let result =
            tokio::time::timeout(self.timeout, self.gateway.recommend(query, catalog)).await;
        self.settle(result, RECOMMEND_EMPTY, RECOMMEND_FAILED)
    }

    /// Compare two products.
    #[instrument(skip(self, a, b), fields(a = %a.id, b = %b.id))]
    pub async fn compare(&self, a: &Product, b: &Product) -> AssistantReply {
        let result = tokio::time::timeout(self.timeout, self.gateway.compare(a, b)).await;
        self.settle(result, COMPARE_EMPTY, COMPARE_FAILED)
    }

    fn settle(
        &self,
        result: Result<Result<String, AssistantError>, tokio::time::error::Elapsed>,
        empty: &str,
        failed: &str,
    ) -> AssistantReply {
        let outcome = result.unwrap_or(Err(AssistantError::Timeout(self.timeout)));
        match outcome {
            Ok(text) if text.trim().is_empty() => {
                warn!("Assistant returned an empty response");
                AssistantReply::fallback(empty, ReplyStatus::Empty)
            }
            Ok(text) => AssistantReply {
                text,
                status: ReplyStatus::Answered,
            },
            Err(AssistantError::Timeout(after)) => {
                warn!(?after, "Assistant call timed out");
                AssistantReply::fallback(TIMED_OUT, ReplyStatus::TimedOut)
            }
            Err(AssistantError::EmptyResponse) => {
                AssistantReply::fallback(empty, ReplyStatus::Empty)
            }
            Err(e) => {
                warn!(error = %e, "Assistant call failed");
                AssistantReply::fallback(failed, ReplyStatus::Failed)
            }
        }
    }
}

/// One line of a comparison analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisLine {
    pub text: String,
    /// Whether this is the verdict line.
    pub conclusion: bool,
}

/// Comparison text split into lines, with the verdict flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonAnalysis {
    pub lines: Vec<AnalysisLine>,
}

impl ComparisonAnalysis {
    /// Split `text` on newlines and flag lines containing [`CONCLUSION_MARKER`].
    ///
    /// Blank lines are kept so the rendered layout matches the response.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| AnalysisLine {
                text: line.to_string(),
                conclusion: line.contains(CONCLUSION_MARKER),
            })
            .collect();
        Self { lines }
    }

    /// The first verdict line, if any.
    #[must_use]
    pub fn conclusion(&self) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.conclusion)
            .map(|line| line.text.as_str())
    }
}
