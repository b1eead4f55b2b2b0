//! Durable storage for the catalog and site settings.
//!
//! The storefront keeps two whole-document records behind an injected
//! [`KeyValueStore`]:
//!
//! | Key        | Contents                          |
//! |------------|-----------------------------------|
//! | `catalog`  | JSON array of `Product`           |
//! | `settings` | JSON object `SiteSettings`        |
//!
//! Records are replaced wholesale on every save; there is no partial
//! update and no schema version. Reads fail closed: a missing catalog is
//! seeded (and written back), an unreadable one falls back to the seed
//! catalog, and unreadable settings fall back to defaults.

mod file;
mod memory;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use handset_core::{Product, SiteSettings, seed_catalog};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Record key of the product list.
pub const CATALOG_KEY: &str = "catalog";
/// Record key of the site settings.
pub const SETTINGS_KEY: &str = "settings";

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on record '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid record key: {0}")]
    InvalidKey(String),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Whole-record key-value persistence.
///
/// Implementations must make `put` atomic from the caller's perspective:
/// a concurrent or later `get` sees either the old or the new value, never
/// a partial write.
pub trait KeyValueStore: Send + Sync {
    /// Read a record. Returns `Ok(None)` if it has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Where the catalog returned by [`CatalogStore::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Read from the durable record.
    Stored,
    /// No record existed; the seed catalog was written through.
    Seeded,
    /// The record was unreadable; the seed catalog is served in memory.
    Recovered,
}

/// State hydrated at startup.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub catalog: Vec<Product>,
    pub settings: SiteSettings,
    pub source: CatalogSource,
}

/// Typed access to the catalog and settings records.
#[derive(Clone)]
pub struct CatalogStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CatalogStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Load the catalog and settings.
    ///
    /// Never fails: every read problem degrades to the seed catalog or the
    /// default settings and is logged.
    #[instrument(skip(self))]
    pub fn load(&self) -> StoreSnapshot {
        let (catalog, source) = self.load_catalog();
        let settings = self.load_settings();
        info!(products = catalog.len(), ?source, "Catalog loaded");
        StoreSnapshot {
            catalog,
            settings,
            source,
        }
    }

    /// Overwrite the catalog record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    #[instrument(skip(self, catalog), fields(products = catalog.len()))]
    pub fn save_catalog(&self, catalog: &[Product]) -> Result<(), StoreError> {
        let json = serde_json::to_string(catalog)?;
        self.backend.put(CATALOG_KEY, &json)
    }

    /// Overwrite the settings record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    #[instrument(skip(self, settings))]
    pub fn save_settings(&self, settings: &SiteSettings) -> Result<(), StoreError> {
        let json = serde_json::to_string(settings)?;
        self.backend.put(SETTINGS_KEY, &json)
    }

    fn load_catalog(&self) -> (Vec<Product>, CatalogSource) {
        match self.backend.get(CATALOG_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Product>>(&json) {
                Ok(catalog) => (catalog, CatalogSource::Stored),
                Err(e) => {
                    warn!(error = %e, "Catalog record is corrupt, serving seed catalog");
                    (seed_catalog(), CatalogSource::Recovered)
                }
            },
            Ok(None) => {
                let catalog = seed_catalog();
                if let Err(e) = self.save_catalog(&catalog) {
                    warn!(error = %e, "Failed to write seed catalog");
                }
                (catalog, CatalogSource::Seeded)
            }
            Err(e) => {
                warn!(error = %e, "Catalog record unreadable, serving seed catalog");
                (seed_catalog(), CatalogSource::Recovered)
            }
        }
    }

    fn load_settings(&self) -> SiteSettings {
        match self.backend.get(SETTINGS_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(error = %e, "Settings record is corrupt, using defaults");
                SiteSettings::default()
            }),
            Ok(None) => SiteSettings::default(),
            Err(e) => {
                warn!(error = %e, "Settings record unreadable, using defaults");
                SiteSettings::default()
            }
        }
    }
}
