//! Integration tests for the public catalog endpoints.
//!
//! Run with: `cargo test -p handset-integration-tests --test catalog_api`

use axum::http::StatusCode;

use handset_integration_tests::{TestApp, ids};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

// ============================================================================
// Listing and filtering
// ============================================================================

#[tokio::test]
async fn test_empty_query_returns_whole_catalog_in_order() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), ["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = TestApp::new();
    let (_, body) = app.get("/api/products?q=IPHONE").await;
    assert_eq!(ids(&body), ["1", "3"]);
}

#[tokio::test]
async fn test_brand_filter_combines_with_search() {
    let app = TestApp::new();

    let (_, samsung) = app.get("/api/products?brand=Samsung").await;
    assert_eq!(ids(&samsung), ["2"]);

    let (_, none) = app.get("/api/products?q=iphone&brand=Samsung").await;
    assert_eq!(ids(&none), Vec::<String>::new());

    let (_, all) = app.get("/api/products?brand=all").await;
    assert_eq!(ids(&all).len(), 4);
}

#[tokio::test]
async fn test_products_carry_price_display() {
    let app = TestApp::new();
    let (_, body) = app.get("/api/products?q=xiaomi").await;
    let display = body[0]["priceDisplay"].as_str().expect("priceDisplay");
    assert!(display.starts_with("R$ "), "got {display}");
    assert!(display.contains("6.899"), "got {display}");
}

#[tokio::test]
async fn test_brands_start_with_all() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/brands").await;
    assert_eq!(status, StatusCode::OK);

    let brands: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|b| b.as_str())
        .collect();
    assert_eq!(brands.first(), Some(&"all"));
    assert!(brands.contains(&"Apple"));
    assert_eq!(brands.iter().filter(|b| **b == "Apple").count(), 1);
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_detail_includes_similar_and_contact_links() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/products/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["name"], "iPhone 15 Pro Max");

    let similar = ids(&body["similar"]);
    assert!(!similar.is_empty());
    assert!(similar.len() <= 4);
    assert!(!similar.contains(&"1".to_string()));

    let whatsapp = body["contact"]["whatsappDetail"].as_str().expect("link");
    assert!(whatsapp.starts_with("https://wa.me/5573981629453?text="));
    assert!(whatsapp.contains("iPhone%2015%20Pro%20Max"));
    assert_eq!(
        body["contact"]["instagram"],
        "https://instagram.com/costaiphones"
    );
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/products/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_public_settings() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["siteName"], "COSTAiPhones");
}
