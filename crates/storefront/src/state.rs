//! Application state shared across handlers.

use std::sync::Arc;

use crate::assistant::{Assistant, AssistantGateway};
use crate::config::StorefrontConfig;
use crate::services::admin::AdminSessions;
use crate::services::catalog::CatalogService;
use crate::services::chat::{ChatSessions, MAX_CONVERSATIONS};
use crate::store::{CatalogSource, CatalogStore, KeyValueStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, the assistant, and the in-memory session tables.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogService,
    assistant: Assistant,
    chats: ChatSessions,
    admin: AdminSessions,
}

impl AppState {
    /// Create a new application state, hydrating the catalog from `backend`.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `backend` - Durable record store
    /// * `gateway` - Assistant backend
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        backend: Arc<dyn KeyValueStore>,
        gateway: Arc<dyn AssistantGateway>,
    ) -> (Self, CatalogSource) {
        let (catalog, source) = CatalogService::load(CatalogStore::new(backend), config.currency);
        let assistant = Assistant::new(gateway, config.assistant_timeout);
        let chats = ChatSessions::new(MAX_CONVERSATIONS, config.chat_idle_timeout);
        let admin = AdminSessions::new(
            config.admin.passcode.clone(),
            config.admin.session_timeout,
        );

        let state = Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                assistant,
                chats,
                admin,
            }),
        };
        (state, source)
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    #[must_use]
    pub fn assistant(&self) -> &Assistant {
        &self.inner.assistant
    }

    #[must_use]
    pub fn chats(&self) -> &ChatSessions {
        &self.inner.chats
    }

    #[must_use]
    pub fn admin(&self) -> &AdminSessions {
        &self.inner.admin
    }
}
