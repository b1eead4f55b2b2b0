//! Search and brand filtering over the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::Product;

/// Wire value of the "every brand" selector.
pub const ALL_BRANDS: &str = "all";

/// Price window for "similar products" suggestions.
const SIMILAR_PRICE_WINDOW: i64 = 2000;

/// Brand selector for the catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrandFilter {
    /// No brand restriction.
    #[default]
    All,
    /// Exact (case-sensitive) brand match.
    Brand(String),
}

impl BrandFilter {
    /// Parse a selector from an optional query value.
    ///
    /// A missing or empty value and the [`ALL_BRANDS`] sentinel both mean
    /// "every brand".
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | ALL_BRANDS) => Self::All,
            Some(brand) => Self::Brand(brand.to_string()),
        }
    }

    /// Whether a product of `brand` passes this selector. Surrounding
    /// whitespace on the stored brand is ignored, as it is in [`brands`].
    #[must_use]
    pub fn matches(&self, brand: &str) -> bool {
        match self {
            Self::All => true,
            Self::Brand(wanted) => wanted == brand.trim(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_BRANDS,
            Self::Brand(brand) => brand,
        }
    }
}

impl Serialize for BrandFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BrandFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Self::parse(value.as_deref()))
    }
}

/// Products whose name contains `query` (case-insensitive) and whose brand
/// passes `brand`, in catalog order.
#[must_use]
pub fn filter_catalog<'a>(
    catalog: &'a [Product],
    query: &str,
    brand: &BrandFilter,
) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle) && brand.matches(&p.brand))
        .collect()
}

/// The brand selector options: the sentinel, then each brand in order of
/// first appearance.
#[must_use]
pub fn brands(catalog: &[Product]) -> Vec<String> {
    let mut out = vec![ALL_BRANDS.to_string()];
    for product in catalog {
        let brand = product.brand.trim();
        if !brand.is_empty() && !out.iter().skip(1).any(|b| b == brand) {
            out.push(brand.to_string());
        }
    }
    out
}

/// Up to `limit` other products sharing the brand or priced within the
/// similarity window of `product`.
#[must_use]
pub fn similar_products<'a>(
    catalog: &'a [Product],
    product: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    let window = Decimal::from(SIMILAR_PRICE_WINDOW);
    catalog
        .iter()
        .filter(|p| {
            p.id != product.id
                && (p.brand.trim() == product.brand.trim()
                    || (p.price - product.price).abs() < window)
        })
        .take(limit)
        .collect()
}
