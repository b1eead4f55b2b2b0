//! Compare selection and comparison handlers.
//!
//! The selection lives with the client. Each request carries the current
//! selection as product ids; the server rebuilds the [`CompareSet`] from the
//! live catalog, applies the change and returns the new selection.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use handset_core::{CompareSet, ComparisonSummary, ProductId, ToggleOutcome};

use crate::assistant::{ComparisonAnalysis, ReplyStatus};
use crate::error::{AppError, Result};
use crate::routes::products::ProductView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionChange {
    /// Current selection, oldest first.
    #[serde(default)]
    pub selection: Vec<ProductId>,
    pub product_id: ProductId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub selection: Vec<ProductId>,
    pub complete: bool,
    /// Label for the compare button, e.g. `1/2 Compare`.
    pub label: String,
}

impl From<&CompareSet> for SelectionView {
    fn from(set: &CompareSet) -> Self {
        Self {
            selection: set.ids(),
            complete: set.is_complete(),
            label: set.status_label(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub outcome: ToggleOutcome,
    #[serde(flatten)]
    pub selection: SelectionView,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub selection: Vec<ProductId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub status: ReplyStatus,
    #[serde(flatten)]
    pub analysis: ComparisonAnalysis,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub products: [ProductView; 2],
    pub summary: ComparisonSummary,
    pub analysis: AnalysisView,
}

async fn rebuild(state: &AppState, ids: &[ProductId]) -> CompareSet {
    CompareSet::from_products(state.catalog().products_by_id(ids).await)
}

/// Toggle a product in the client's selection.
pub async fn toggle(
    State(state): State<AppState>,
    Json(change): Json<SelectionChange>,
) -> Result<Json<ToggleResponse>> {
    let product = state
        .catalog()
        .product(&change.product_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {}", change.product_id)))?;

    let mut set = rebuild(&state, &change.selection).await;
    let outcome = set.toggle(product);

    Ok(Json(ToggleResponse {
        outcome,
        selection: SelectionView::from(&set),
    }))
}

/// Drop a product from the client's selection. Absent ids are ignored.
pub async fn remove(
    State(state): State<AppState>,
    Json(change): Json<SelectionChange>,
) -> Json<SelectionView> {
    let mut set = rebuild(&state, &change.selection).await;
    set.remove(&change.product_id);
    Json(SelectionView::from(&set))
}

/// Spec table plus assistant analysis for a complete selection.
pub async fn compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>> {
    let set = rebuild(&state, &request.selection).await;
    let (a, b) = set
        .pair()
        .ok_or_else(|| AppError::BadRequest("Select two products to compare".to_string()))?;

    let currency = state.catalog().currency();
    let summary = ComparisonSummary::new(a, b, currency);
    let reply = state.assistant().compare(a, b).await;

    Ok(Json(CompareResponse {
        products: [
            ProductView::new(a.clone(), currency),
            ProductView::new(b.clone(), currency),
        ],
        summary,
        analysis: AnalysisView {
            status: reply.status,
            analysis: ComparisonAnalysis::parse(&reply.text),
        },
    }))
}
