//! Spec-by-spec comparison.

use tracing::info;

use handset_core::{Advantage, CompareSet, ComparisonSummary, CurrencyCode, ProductId};
use handset_storefront::store::CatalogStore;

use crate::error::{CliError, Result};

/// Print the comparison table for two products.
///
/// # Errors
///
/// Returns an error if either id is unknown or both name the same product.
pub fn run(
    store: &CatalogStore,
    a: &str,
    b: &str,
    currency: CurrencyCode,
) -> Result<()> {
    let catalog = store.load().catalog;
    let find = |id: &str| {
        let id = ProductId::new(id);
        catalog
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CliError::UnknownProduct(id))
    };

    let selection = CompareSet::from_products([find(a)?, find(b)?]);
    let (a, b) = selection.pair().ok_or(CliError::SameProduct)?;

    let summary = ComparisonSummary::new(a, b, currency);
    info!("{:<10} {:<28} {:<28}", "", a.name, b.name);
    for row in &summary.rows {
        let marker = match row.advantage {
            Advantage::A => "<",
            Advantage::B => ">",
            Advantage::Tie => "=",
        };
        info!("{:<10} {:<28} {:<28} {marker}", row.label, row.a, row.b);
    }
    info!(
        "Wins: {} {} / {} {}",
        a.name, summary.wins_a, b.name, summary.wins_b
    );
    info!("Price difference: {}", summary.price_delta_display);
    Ok(())
}
