//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use handset_core::{BrandFilter, CurrencyCode, Price, Product, ProductId, SiteSettings};

use crate::error::{AppError, Result};
use crate::services::contact::ContactLinks;
use crate::state::AppState;

/// A product with its formatted price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub price_display: String,
}

impl ProductView {
    #[must_use]
    pub fn new(product: Product, currency: CurrencyCode) -> Self {
        let price_display = Price::new(product.price, currency).display();
        Self {
            product,
            price_display,
        }
    }
}

/// Product detail payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView {
    pub product: ProductView,
    /// "You may also like" suggestions.
    pub similar: Vec<ProductView>,
    pub contact: ContactLinks,
}

/// Catalog filter parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive name search.
    pub q: Option<String>,
    /// Brand name, or `all`.
    pub brand: Option<String>,
}

/// List products matching the search text and brand.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<ProductView>> {
    let brand = BrandFilter::parse(query.brand.as_deref());
    let text = query.q.unwrap_or_default();
    let currency = state.catalog().currency();

    let products = state
        .catalog()
        .search(&text, &brand)
        .await
        .into_iter()
        .map(|p| ProductView::new(p, currency))
        .collect();
    Json(products)
}

/// Show one product with suggestions and contact links.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailView>> {
    let detail = state
        .catalog()
        .detail(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let currency = state.catalog().currency();

    Ok(Json(ProductDetailView {
        product: ProductView::new(detail.product, currency),
        similar: detail
            .similar
            .into_iter()
            .map(|p| ProductView::new(p, currency))
            .collect(),
        contact: detail.contact,
    }))
}

/// Brand selector options, `all` first.
pub async fn brands(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog().brands().await)
}

/// Public site settings.
pub async fn settings(State(state): State<AppState>) -> Json<SiteSettings> {
    Json(state.catalog().settings().await)
}
