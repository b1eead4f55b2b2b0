//! Catalog commands.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use handset_core::{
    BrandFilter, CurrencyCode, Price, Product, ProductDraft, ProductId, brands as brand_options,
    filter_catalog,
};
use handset_storefront::services::validation::validate_draft;
use handset_storefront::store::{CatalogSource, CatalogStore};

use crate::error::{CliError, Result};

/// Print products matching `query` and `brand`.
pub fn list(store: &CatalogStore, query: &str, brand: Option<&str>, currency: CurrencyCode) {
    let snapshot = store.load();
    let brand = BrandFilter::parse(brand);
    let matches = filter_catalog(&snapshot.catalog, query, &brand);

    info!(
        "{} of {} products (brand: {})",
        matches.len(),
        snapshot.catalog.len(),
        brand.as_str()
    );
    for product in matches {
        info!(
            "  {:>14}  {:<10} {:<28} {}",
            product.id.as_str(),
            product.brand,
            product.name,
            Price::new(product.price, currency)
        );
    }
}

/// Print the brand selector options.
pub fn brands(store: &CatalogStore) {
    for brand in brand_options(&store.load().catalog) {
        info!("  {brand}");
    }
}

/// Append every product in a YAML file.
///
/// All entries are validated before anything is written; one bad entry
/// aborts the whole import.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an entry is
/// invalid, or the write fails.
pub fn import(store: &CatalogStore, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let drafts = parse_drafts(&content)?;
    info!(path = %path.display(), entries = drafts.len(), "Parsed import file");

    let snapshot = store.load();
    refuse_recovered(snapshot.source)?;

    let catalog = append_drafts(snapshot.catalog, drafts)?;
    store.save_catalog(&catalog)?;
    info!(products = catalog.len(), "Import complete");
    Ok(())
}

/// Delete a product. Absent ids are reported and leave the store untouched.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn delete(store: &CatalogStore, id: &str) -> Result<()> {
    let id = ProductId::new(id);
    let snapshot = store.load();
    refuse_recovered(snapshot.source)?;

    if !snapshot.catalog.iter().any(|p| p.id == id) {
        warn!(%id, "No such product, nothing deleted");
        return Ok(());
    }

    let catalog: Vec<Product> = snapshot
        .catalog
        .into_iter()
        .filter(|p| p.id != id)
        .collect();
    store.save_catalog(&catalog)?;
    info!(%id, "Product deleted");
    Ok(())
}

fn parse_drafts(content: &str) -> Result<Vec<ProductDraft>> {
    Ok(serde_yaml::from_str(content)?)
}

fn append_drafts(mut catalog: Vec<Product>, drafts: Vec<ProductDraft>) -> Result<Vec<Product>> {
    for (index, draft) in drafts.iter().enumerate() {
        validate_draft(draft).map_err(|source| CliError::InvalidEntry {
            index: index + 1,
            name: draft.name.clone(),
            source,
        })?;
    }

    let now = Utc::now();
    for draft in drafts {
        let id = ProductId::from_timestamp(now, |candidate| {
            catalog.iter().any(|p| &p.id == candidate)
        });
        catalog.push(draft.into_product(id));
    }
    Ok(catalog)
}

fn refuse_recovered(source: CatalogSource) -> Result<()> {
    if source == CatalogSource::Recovered {
        return Err(CliError::CatalogUnreadable);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use handset_core::seed_catalog;
    use handset_storefront::store::FileStore;

    use super::*;

    const IMPORT: &str = r#"
- name: Pixel 9 Pro
  brand: Google
  price: 6999
  image: https://example.com/pixel.jpg
  rating: 4.6
  releaseDate: 2024-08
  specs:
    display: 6.3" LTPO OLED
    processor: Tensor G4
    memory: 16GB
    storage: 256GB
    battery: 4.700 mAh
    camera: 50MP
- name: Pixel 9
  brand: Google
  price: 5499
  image: https://example.com/pixel9.jpg
  specs:
    display: 6.3" OLED
    processor: Tensor G4
    ram: 12GB
    storage: 128GB
    battery: 4.700 mAh
    camera: 50MP
"#;

    fn store() -> (tempfile::TempDir, CatalogStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CatalogStore::new(Arc::new(FileStore::open(dir.path()).expect("open")));
        (dir, store)
    }

    #[test]
    fn test_append_drafts_assigns_unique_ids() {
        let drafts = parse_drafts(IMPORT).expect("parse");
        let catalog = append_drafts(seed_catalog(), drafts).expect("append");

        assert_eq!(catalog.len(), seed_catalog().len() + 2);
        let new: Vec<_> = catalog.iter().skip(seed_catalog().len()).collect();
        assert_ne!(new[0].id, new[1].id);
        assert_eq!(new[1].specs.memory, "12GB");
    }

    #[test]
    fn test_invalid_entry_aborts_import() {
        let yaml = IMPORT.replace("price: 5499", "price: -1");
        let drafts = parse_drafts(&yaml).expect("parse");
        let err = append_drafts(seed_catalog(), drafts).expect_err("should fail");
        assert!(matches!(err, CliError::InvalidEntry { index: 2, .. }), "got {err}");
        assert!(err.to_string().starts_with("entry 2 (Pixel 9)"));
    }

    #[test]
    fn test_import_and_delete_through_file_store() {
        let (dir, store) = store();
        let path = dir.path().join("import.yaml");
        std::fs::write(&path, IMPORT).expect("write");

        import(&store, &path).expect("import");
        let catalog = store.load().catalog;
        assert_eq!(catalog.len(), seed_catalog().len() + 2);

        let added = catalog.last().expect("added").id.clone();
        delete(&store, added.as_str()).expect("delete");
        delete(&store, "does-not-exist").expect("noop delete");
        assert_eq!(store.load().catalog.len(), seed_catalog().len() + 1);
    }

    #[test]
    fn test_import_refuses_unreadable_catalog() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("catalog.json"), "{ not json").expect("corrupt");
        let path = dir.path().join("import.yaml");
        std::fs::write(&path, IMPORT).expect("write");

        let err = import(&store, &path).expect_err("unreadable catalog");
        assert!(matches!(err, CliError::CatalogUnreadable));
        let record = std::fs::read_to_string(dir.path().join("catalog.json")).expect("read");
        assert_eq!(record, "{ not json");
    }

    #[test]
    fn test_import_missing_file_names_path() {
        let (dir, store) = store();
        let path = dir.path().join("missing.yaml");
        let err = import(&store, &path).expect_err("missing file");
        assert!(matches!(err, CliError::ReadFile { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }
}
