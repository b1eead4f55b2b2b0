//! Integration tests for the handset storefront.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`
//! over an in-memory store and a scripted assistant, so they need no
//! network, database or API key.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p handset-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use handset_core::{CurrencyCode, Product};
use handset_storefront::assistant::{AssistantError, AssistantGateway};
use handset_storefront::config::{AdminConfig, StorefrontConfig};
use handset_storefront::state::AppState;
use handset_storefront::store::{KeyValueStore, MemoryStore};

/// Admin passcode used by every test app.
pub const PASSCODE: &str = "test-passcode-1234";

/// Configuration for an in-process test app.
#[must_use]
pub fn test_config(session_timeout: Duration) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        data_dir: PathBuf::from("unused"),
        currency: CurrencyCode::BRL,
        admin: AdminConfig {
            passcode: SecretString::from(PASSCODE),
            session_timeout,
        },
        claude: None,
        assistant_timeout: Duration::from_secs(2),
        chat_idle_timeout: Duration::from_secs(600),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Assistant that answers with fixed text.
pub struct ScriptedAssistant {
    pub recommendation: String,
    pub comparison: String,
}

impl Default for ScriptedAssistant {
    fn default() -> Self {
        Self {
            recommendation: "The Galaxy S24 Ultra has the best zoom.".to_string(),
            comparison: "- Performance Verdict: Both are flagships.\n\
                         - Photography: The Galaxy zooms further.\n\
                         - Energy Efficiency: The Galaxy lasts longer.\n\
                         - CONCLUSION: The Galaxy S24 Ultra is the better investment."
                .to_string(),
        }
    }
}

#[async_trait]
impl AssistantGateway for ScriptedAssistant {
    async fn recommend(&self, _query: &str, _catalog: &[Product]) -> Result<String, AssistantError> {
        Ok(self.recommendation.clone())
    }

    async fn compare(&self, _a: &Product, _b: &Product) -> Result<String, AssistantError> {
        Ok(self.comparison.clone())
    }
}

/// A router over in-memory state.
pub struct TestApp {
    pub router: Router,
    pub backend: Arc<MemoryStore>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Seeded catalog, scripted assistant, one-hour admin sessions.
    #[must_use]
    pub fn new() -> Self {
        Self::build(
            Arc::new(MemoryStore::new()),
            Arc::new(ScriptedAssistant::default()),
            Duration::from_secs(3600),
        )
    }

    #[must_use]
    pub fn build(
        backend: Arc<MemoryStore>,
        gateway: Arc<dyn AssistantGateway>,
        session_timeout: Duration,
    ) -> Self {
        let (state, _) = AppState::new(
            test_config(session_timeout),
            backend.clone() as Arc<dyn KeyValueStore>,
            gateway,
        );
        Self {
            router: handset_storefront::app(state),
            backend,
        }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty,
    /// a string when not JSON).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, None, Some(body)).await
    }

    /// Log in and return the bearer token.
    ///
    /// # Panics
    ///
    /// Panics if login fails.
    pub async fn login(&self) -> String {
        let (status, body) = self
            .post("/admin/login", serde_json::json!({ "passcode": PASSCODE }))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }
}

/// Product ids in response order.
#[must_use]
pub fn ids(products: &Value) -> Vec<String> {
    products
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| p["id"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
