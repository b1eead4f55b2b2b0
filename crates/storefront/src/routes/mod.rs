//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Health check
//!
//! # Catalog
//! GET    /api/products?q=&brand=    - Filtered catalog
//! GET    /api/products/{id}         - Product, similar products, contact links
//! GET    /api/brands                - Brand selector options
//! GET    /api/settings              - Public site settings
//!
//! # Compare
//! POST   /api/compare/toggle        - Toggle a product in a selection
//! POST   /api/compare/remove        - Drop a product from a selection
//! POST   /api/compare               - Spec table + assistant analysis
//!
//! # Assistant
//! POST   /api/chat                  - Ask a question
//! GET    /api/chat/{id}             - Transcript
//! POST   /api/chat/{id}/cancel      - Abandon the outstanding question
//!
//! # Admin (bearer token)
//! POST   /admin/login               - Passcode -> session token
//! POST   /admin/logout              - Revoke session
//! POST   /admin/products            - Add product
//! DELETE /admin/products/{id}       - Delete product
//! PUT    /admin/settings            - Replace settings
//! ```

pub mod admin;
pub mod chat;
pub mod compare;
pub mod products;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Request body limit for admin writes. Base64 inflates a 2 MiB image to
/// about 2.7 MiB.
const ADMIN_BODY_LIMIT: usize = 4 * 1024 * 1024;

/// Create the public API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/brands", get(products::brands))
        .route("/settings", get(products::settings))
        .route("/compare", post(compare::compare))
        .route("/compare/toggle", post(compare::toggle))
        .route("/compare/remove", post(compare::remove))
        .route("/chat", post(chat::send))
        .route("/chat/{id}", get(chat::transcript))
        .route("/chat/{id}/cancel", post(chat::cancel))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/products", post(admin::create_product))
        .route("/products/{id}", delete(admin::delete_product))
        .route("/settings", put(admin::update_settings))
        .layer(DefaultBodyLimit::max(ADMIN_BODY_LIMIT))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .nest("/admin", admin_routes())
}
