//! Catalog editor handlers.
//!
//! Everything except login requires [`RequireAdmin`].

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use handset_core::{Product, ProductDraft, ProductId, SiteSettings};

use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireAdmin;
use crate::services::admin::AdminSession;
use crate::state::AppState;

// No Debug: keeps the passcode out of logs.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub passcode: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// `false` if no product had this id.
    pub removed: bool,
}

/// Exchange the passcode for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AdminSession>> {
    let session = state
        .admin()
        .login(&request.passcode, Utc::now())?;
    add_breadcrumb("admin", "Logged in", None);
    Ok(Json(session))
}

/// Revoke the presented session.
pub async fn logout(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
) -> StatusCode {
    state.admin().revoke(session.token());
    add_breadcrumb("admin", "Logged out", None);
    StatusCode::NO_CONTENT
}

/// Add a product to the end of the catalog.
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.catalog().add_product(&session, draft).await?;
    add_breadcrumb(
        "admin",
        "Added product",
        Some(&[("product_id", product.id.as_str())]),
    );
    Ok((StatusCode::CREATED, Json(product)))
}

/// Delete a product. Unknown ids succeed without changing anything.
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<DeleteResponse>> {
    let removed = state.catalog().delete_product(&session, &id).await?;
    add_breadcrumb(
        "admin",
        "Deleted product",
        Some(&[("product_id", id.as_str())]),
    );
    Ok(Json(DeleteResponse { removed }))
}

/// Replace the site settings.
pub async fn update_settings(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    Json(settings): Json<SiteSettings>,
) -> Result<Json<SiteSettings>> {
    let saved = state.catalog().save_settings(&session, settings).await?;
    add_breadcrumb("admin", "Saved settings", None);
    Ok(Json(saved))
}
