//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_PASSCODE` - Passcode that unlocks the catalog editor
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory holding the catalog and settings records (default: data)
//! - `STOREFRONT_CURRENCY` - Currency used for price formatting (default: BRL)
//! - `ADMIN_SESSION_TIMEOUT_SECS` - Admin session lifetime (default: 3600)
//! - `CLAUDE_API_KEY` - Enables the AI assistant when set
//! - `CLAUDE_MODEL` - Model for assistant calls (default: claude-sonnet-4-20250514)
//! - `ASSISTANT_TIMEOUT_SECS` - Deadline for each assistant call (default: 30)
//! - `CHAT_IDLE_TIMEOUT_SECS` - Idle time before a chat transcript is dropped (default: 1800)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use handset_core::CurrencyCode;

const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory for the durable catalog and settings records
    pub data_dir: PathBuf,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Catalog editor access
    pub admin: AdminConfig,
    /// AI assistant; `None` runs the storefront with canned fallbacks
    pub claude: Option<ClaudeConfig>,
    /// Deadline for each assistant call
    pub assistant_timeout: Duration,
    /// Idle time before a chat transcript is dropped
    pub chat_idle_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Catalog editor access configuration.
///
/// Implements `Debug` manually to redact the passcode.
#[derive(Clone)]
pub struct AdminConfig {
    pub passcode: SecretString,
    pub session_timeout: Duration,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("passcode", &"[REDACTED]")
            .field("session_timeout", &self.session_timeout)
            .finish()
    }
}

/// Claude API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ClaudeConfig {
    pub api_key: SecretString,
    pub model: String,
}

impl std::fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let data_dir = PathBuf::from(get_env_or_default("STOREFRONT_DATA_DIR", "data"));
        let currency = parse_env("STOREFRONT_CURRENCY", "BRL")?;

        let admin = AdminConfig::from_env()?;
        let claude = ClaudeConfig::from_env();
        let assistant_timeout = Duration::from_secs(parse_env("ASSISTANT_TIMEOUT_SECS", "30")?);
        let chat_idle_timeout = Duration::from_secs(parse_env("CHAT_IDLE_TIMEOUT_SECS", "1800")?);

        Ok(Self {
            host,
            port,
            data_dir,
            currency,
            admin,
            claude,
            assistant_timeout,
            chat_idle_timeout,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let passcode = get_required_secret("ADMIN_PASSCODE")?;
        if passcode.expose_secret().trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_PASSCODE".to_string(),
                "must not be blank".to_string(),
            ));
        }
        let session_timeout =
            Duration::from_secs(parse_env("ADMIN_SESSION_TIMEOUT_SECS", "3600")?);
        Ok(Self {
            passcode,
            session_timeout,
        })
    }
}

impl ClaudeConfig {
    fn from_env() -> Option<Self> {
        let api_key = get_optional_env("CLAUDE_API_KEY").filter(|k| !k.trim().is_empty())?;
        Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("CLAUDE_MODEL", DEFAULT_CLAUDE_MODEL),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            currency: CurrencyCode::BRL,
            admin: AdminConfig {
                passcode: SecretString::from("letmein-4471"),
                session_timeout: Duration::from_secs(3600),
            },
            claude: Some(ClaudeConfig {
                api_key: SecretString::from("sk-ant-super-secret"),
                model: DEFAULT_CLAUDE_MODEL.to_string(),
            }),
            assistant_timeout: Duration::from_secs(30),
            chat_idle_timeout: Duration::from_secs(1800),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug_output = format!("{:?}", config());

        assert!(debug_output.contains(DEFAULT_CLAUDE_MODEL));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("letmein-4471"));
        assert!(!debug_output.contains("sk-ant-super-secret"));
    }

    #[test]
    fn test_parse_value() {
        let port: u16 = parse_value("STOREFRONT_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);

        let currency: CurrencyCode = parse_value("STOREFRONT_CURRENCY", "usd").unwrap();
        assert_eq!(currency, CurrencyCode::USD);

        let result = parse_value::<u16>("STOREFRONT_PORT", "eighty");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_missing_required_env() {
        let result = get_required_env("HANDSET_TEST_DEFINITELY_UNSET");
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }
}
