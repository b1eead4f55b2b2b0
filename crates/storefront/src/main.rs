//! Handset Storefront - JSON API for the smartphone catalog.
//!
//! Serves the catalog, compare and assistant endpoints on port 3000 and the
//! passcode-protected catalog editor under `/admin`. Catalog and settings
//! are kept as JSON records in `STOREFRONT_DATA_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::time::Duration;

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handset_storefront::assistant::{
    AssistantGateway, ClaudeAssistant, ClaudeClient, OfflineAssistant,
};
use handset_storefront::config::StorefrontConfig;
use handset_storefront::state::AppState;
use handset_storefront::store::FileStore;

/// Extra time the HTTP client allows beyond the assistant deadline.
const HTTP_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Pick the assistant backend: Claude when a key is configured, otherwise
/// canned fallbacks.
fn assistant_gateway(config: &StorefrontConfig) -> Arc<dyn AssistantGateway> {
    let Some(claude) = config.claude.as_ref() else {
        tracing::warn!("CLAUDE_API_KEY not set, assistant runs offline");
        return Arc::new(OfflineAssistant);
    };

    match ClaudeClient::new(claude, config.assistant_timeout + HTTP_TIMEOUT_MARGIN) {
        Ok(client) => {
            tracing::info!(model = client.model(), "Assistant enabled");
            Arc::new(ClaudeAssistant::new(client))
        }
        Err(e) => {
            tracing::error!(error = %e, "Assistant client unavailable, running offline");
            Arc::new(OfflineAssistant)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env()?;

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "handset_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let store = FileStore::open(&config.data_dir)?;
    tracing::info!(dir = %config.data_dir.display(), "Data directory opened");

    let gateway = assistant_gateway(&config);
    let addr = config.socket_addr();
    let (state, source) = AppState::new(config, Arc::new(store), gateway);
    tracing::info!(?source, "Catalog hydrated");

    let app = handset_storefront::app(state);

    tracing::info!("storefront listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
