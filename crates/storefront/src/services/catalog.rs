//! The hydrated catalog and settings.
//!
//! Reads are served from memory. Every mutation takes the write lock,
//! writes the new record through to the store, and only then swaps the
//! in-memory copy, so readers never see a catalog that is not durable and a
//! failed write changes nothing.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use handset_core::{
    BrandFilter, CurrencyCode, Product, ProductDraft, ProductId, SiteSettings, brands,
    filter_catalog, similar_products,
};

use crate::services::admin::{AdminSession, AuthError};
use crate::services::contact::ContactLinks;
use crate::services::validation::{ValidationError, validate_draft, validate_settings};
use crate::store::{CatalogSource, CatalogStore, StoreError};

/// Suggestions shown on a product detail view.
pub const SIMILAR_LIMIT: usize = 4;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Session(#[from] AuthError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A product with everything its detail view needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    pub similar: Vec<Product>,
    pub contact: ContactLinks,
}

struct CatalogState {
    products: Vec<Product>,
    settings: SiteSettings,
}

pub struct CatalogService {
    store: CatalogStore,
    currency: CurrencyCode,
    state: RwLock<CatalogState>,
}

impl CatalogService {
    /// Hydrate from the store.
    #[must_use]
    pub fn load(store: CatalogStore, currency: CurrencyCode) -> (Self, CatalogSource) {
        let snapshot = store.load();
        let service = Self {
            store,
            currency,
            state: RwLock::new(CatalogState {
                products: snapshot.catalog,
                settings: snapshot.settings,
            }),
        };
        (service, snapshot.source)
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.products.clone()
    }

    /// Products whose name contains `query` and whose brand matches.
    pub async fn search(&self, query: &str, brand: &BrandFilter) -> Vec<Product> {
        let state = self.state.read().await;
        filter_catalog(&state.products, query, brand)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Brand selector options, "all" first.
    pub async fn brands(&self) -> Vec<String> {
        brands(&self.state.read().await.products)
    }

    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        let state = self.state.read().await;
        state.products.iter().find(|p| &p.id == id).cloned()
    }

    /// The given products in the given order. Unknown ids are skipped.
    pub async fn products_by_id(&self, ids: &[ProductId]) -> Vec<Product> {
        let state = self.state.read().await;
        ids.iter()
            .filter_map(|id| state.products.iter().find(|p| &p.id == id).cloned())
            .collect()
    }

    pub async fn detail(&self, id: &ProductId) -> Option<ProductDetail> {
        let state = self.state.read().await;
        let product = state.products.iter().find(|p| &p.id == id)?;
        Some(ProductDetail {
            similar: similar_products(&state.products, product, SIMILAR_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
            contact: ContactLinks::for_product(&state.settings, &product.name),
            product: product.clone(),
        })
    }

    pub async fn settings(&self) -> SiteSettings {
        self.state.read().await.settings.clone()
    }

    /// Append a product with a fresh timestamp id.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the write fails; the
    /// catalog is unchanged in both cases.
    #[instrument(skip(self, session, draft), fields(name = %draft.name))]
    pub async fn add_product(
        &self,
        session: &AdminSession,
        draft: ProductDraft,
    ) -> Result<Product, CatalogError> {
        validate_draft(&draft)?;

        let mut state = self.state.write().await;
        session.ensure_live(Utc::now())?;
        let id = ProductId::from_timestamp(Utc::now(), |candidate| {
            state.products.iter().any(|p| &p.id == candidate)
        });
        let product = draft.into_product(id);

        let mut next = state.products.clone();
        next.push(product.clone());
        self.persist_catalog(&next).await?;
        state.products = next;

        info!(id = %product.id, "Product added");
        Ok(product)
    }

    /// Remove a product. Returns `false`, writing nothing, if it was absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the catalog is unchanged.
    #[instrument(skip(self, session))]
    pub async fn delete_product(
        &self,
        session: &AdminSession,
        id: &ProductId,
    ) -> Result<bool, CatalogError> {
        let mut state = self.state.write().await;
        session.ensure_live(Utc::now())?;
        if !state.products.iter().any(|p| &p.id == id) {
            return Ok(false);
        }

        let next: Vec<Product> = state
            .products
            .iter()
            .filter(|p| &p.id != id)
            .cloned()
            .collect();
        self.persist_catalog(&next).await?;
        state.products = next;

        info!("Product deleted");
        Ok(true)
    }

    /// Replace the site settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the write fails.
    #[instrument(skip(self, session, settings))]
    pub async fn save_settings(
        &self,
        session: &AdminSession,
        settings: SiteSettings,
    ) -> Result<SiteSettings, CatalogError> {
        validate_settings(&settings)?;

        let mut state = self.state.write().await;
        session.ensure_live(Utc::now())?;
        let store = self.store.clone();
        let record = settings.clone();
        tokio::task::spawn_blocking(move || store.save_settings(&record)).await??;
        state.settings = settings.clone();

        info!("Settings saved");
        Ok(settings)
    }

    async fn persist_catalog(&self, catalog: &[Product]) -> Result<(), CatalogError> {
        let store = self.store.clone();
        let record = catalog.to_vec();
        tokio::task::spawn_blocking(move || store.save_catalog(&record)).await??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use handset_core::{ProductSpecs, seed_catalog};
    use rust_decimal::Decimal;
    use secrecy::SecretString;

    use super::*;
    use crate::services::admin::AdminSessions;
    use crate::store::{CATALOG_KEY, KeyValueStore, MemoryStore, SETTINGS_KEY};

    /// Backend whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn put(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::other("read-only"),
            })
        }
    }

    fn session() -> AdminSession {
        AdminSessions::new(SecretString::from("pass"), Duration::from_secs(60))
            .login("pass", Utc::now())
            .expect("login")
    }

    fn service() -> (CatalogService, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        let (service, _) =
            CatalogService::load(CatalogStore::new(backend.clone()), CurrencyCode::BRL);
        (service, backend)
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            brand: "Google".to_string(),
            price: Decimal::from(5999),
            image: "https://example.com/pixel.jpg".to_string(),
            specs: ProductSpecs {
                display: "6.3\" OLED".to_string(),
                processor: "Tensor G4".to_string(),
                memory: "12GB".to_string(),
                storage: "128GB".to_string(),
                battery: "4.700 mAh".to_string(),
                camera: "50MP".to_string(),
            },
            description: "Clean Android.".to_string(),
            rating: 4.5,
            release_date: "2024-08".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_with_empty_query_and_all_brands_returns_catalog() {
        let (service, _) = service();
        assert_eq!(service.search("", &BrandFilter::All).await, seed_catalog());
    }

    #[tokio::test]
    async fn test_expired_session_cannot_mutate() {
        let (service, backend) = service();
        let before = backend.get(CATALOG_KEY).expect("get");
        let expired = AdminSessions::new(SecretString::from("pass"), Duration::ZERO)
            .login("pass", Utc::now())
            .expect("login");

        let err = service
            .add_product(&expired, draft("Pixel 9"))
            .await
            .expect_err("expired");
        assert!(matches!(err, CatalogError::Session(AuthError::Expired)));

        let err = service
            .delete_product(&expired, &ProductId::new("1"))
            .await
            .expect_err("expired");
        assert!(matches!(err, CatalogError::Session(AuthError::Expired)));

        let err = service
            .save_settings(&expired, SiteSettings::default())
            .await
            .expect_err("expired");
        assert!(matches!(err, CatalogError::Session(AuthError::Expired)));

        assert_eq!(service.products().await, seed_catalog());
        assert_eq!(backend.get(CATALOG_KEY).expect("get"), before);
        assert!(backend.get(SETTINGS_KEY).expect("get").is_none());
    }

    #[tokio::test]
    async fn test_add_product_trims_name_and_brand() {
        let (service, _) = service();
        let mut input = draft(" Pixel 9 ");
        input.brand = "Google ".to_string();

        let product = service.add_product(&session(), input).await.expect("add");
        assert_eq!(product.name, "Pixel 9");
        assert_eq!(product.brand, "Google");
        assert!(service.brands().await.contains(&"Google".to_string()));
        let google = service.search("", &BrandFilter::parse(Some("Google"))).await;
        assert_eq!(google, vec![product]);
    }

    #[tokio::test]
    async fn test_add_product_appends_and_writes_through() {
        let (service, backend) = service();
        let product = service
            .add_product(&session(), draft("Pixel 9"))
            .await
            .expect("add");

        let products = service.products().await;
        assert_eq!(products.last(), Some(&product));
        assert_eq!(products.len(), seed_catalog().len() + 1);

        let stored = backend.get(CATALOG_KEY).expect("get").expect("record");
        let stored: Vec<Product> = serde_json::from_str(&stored).expect("parse");
        assert_eq!(stored, products);
    }

    #[tokio::test]
    async fn test_added_ids_are_unique() {
        let (service, _) = service();
        let a = service.add_product(&session(), draft("A")).await.expect("a");
        let b = service.add_product(&session(), draft("B")).await.expect("b");
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_invalid_draft_leaves_catalog_untouched() {
        let (service, _) = service();
        let mut bad = draft("Pixel 9");
        bad.image.clear();

        let result = service.add_product(&session(), bad).await;
        assert!(matches!(
            result,
            Err(CatalogError::Validation(ValidationError::MissingImage))
        ));
        assert_eq!(service.products().await, seed_catalog());
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_noop() {
        let (service, backend) = service();
        let before = backend.get(CATALOG_KEY).expect("get");

        let removed = service
            .delete_product(&session(), &ProductId::new("nope"))
            .await
            .expect("delete");
        assert!(!removed);
        assert_eq!(service.products().await, seed_catalog());
        assert_eq!(backend.get(CATALOG_KEY).expect("get"), before);
    }

    #[tokio::test]
    async fn test_delete_present_id() {
        let (service, _) = service();
        let removed = service
            .delete_product(&session(), &ProductId::new("1"))
            .await
            .expect("delete");
        assert!(removed);
        assert!(service.product(&ProductId::new("1")).await.is_none());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_unchanged() {
        let (service, _) =
            CatalogService::load(CatalogStore::new(Arc::new(ReadOnlyStore)), CurrencyCode::BRL);

        let result = service.add_product(&session(), draft("Pixel 9")).await;
        assert!(matches!(result, Err(CatalogError::Store(_))));
        assert_eq!(service.products().await, seed_catalog());
    }

    #[tokio::test]
    async fn test_save_settings_round_trip() {
        let (service, backend) = service();
        let settings = SiteSettings {
            site_name: "Costa Phones".to_string(),
            ..SiteSettings::default()
        };

        service
            .save_settings(&session(), settings.clone())
            .await
            .expect("save");
        assert_eq!(service.settings().await, settings);
        assert!(backend.get(SETTINGS_KEY).expect("get").is_some());

        let (reloaded, _) =
            CatalogService::load(CatalogStore::new(backend.clone()), CurrencyCode::BRL);
        assert_eq!(reloaded.settings().await, settings);
    }

    #[tokio::test]
    async fn test_detail_includes_similar_and_contact() {
        let (service, _) = service();
        let detail = service
            .detail(&ProductId::new("1"))
            .await
            .expect("detail");
        assert!(detail.similar.iter().all(|p| p.id != detail.product.id));
        assert!(detail.similar.len() <= SIMILAR_LIMIT);
        assert!(detail.contact.whatsapp_detail.starts_with("https://wa.me/"));
    }

    #[tokio::test]
    async fn test_products_by_id_keeps_order_and_skips_unknown() {
        let (service, _) = service();
        let ids = [
            ProductId::new("2"),
            ProductId::new("missing"),
            ProductId::new("1"),
        ];
        let found: Vec<_> = service
            .products_by_id(&ids)
            .await
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(found, vec![ProductId::new("2"), ProductId::new("1")]);
    }
}
