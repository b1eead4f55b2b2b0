//! Prompt construction for recommendation and comparison requests.

use rust_decimal::Decimal;
use serde::Serialize;

use handset_core::{Product, ProductSpecs};

pub const RECOMMEND_SYSTEM: &str = "You are a mobile technology specialist (Tech Guru) for this store. \
Your goal is to help customers choose the ideal smartphone from the store's catalog.";

pub const COMPARE_SYSTEM: &str = "You are a senior hardware analyst (Tech Analyst) for this store. \
Your language is technical, direct and grounded in realistic hardware benchmarks.";

pub const RECOMMEND_TEMPERATURE: f32 = 0.7;
pub const COMPARE_TEMPERATURE: f32 = 0.5;

/// Product fields sent to the model. Images are left out: they may be
/// multi-megabyte `data:` URIs and carry nothing the model can use.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptProduct<'a> {
    id: &'a str,
    name: &'a str,
    brand: &'a str,
    price: Decimal,
    specs: &'a ProductSpecs,
    description: &'a str,
    rating: f64,
    release_date: &'a str,
}

impl<'a> From<&'a Product> for PromptProduct<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            id: p.id.as_str(),
            name: &p.name,
            brand: &p.brand,
            price: p.price,
            specs: &p.specs,
            description: &p.description,
            rating: p.rating,
            release_date: &p.release_date,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

/// User prompt for a catalog-constrained recommendation.
#[must_use]
pub fn recommend_prompt(query: &str, catalog: &[Product]) -> String {
    let products: Vec<PromptProduct<'_>> = catalog.iter().map(PromptProduct::from).collect();
    format!(
        "The customer asked: \"{query}\".\n\
         Based on this smartphone catalog: {catalog},\n\
         recommend the best device and explain why in at most 3 sentences.\n\
         Be technical and objective.",
        catalog = to_json(&products),
    )
}

/// User prompt for a structured two-product comparison.
///
/// The response format ends with a `CONCLUSION:` line, which the storefront
/// highlights.
#[must_use]
pub fn compare_prompt(a: &Product, b: &Product) -> String {
    format!(
        "Run an in-depth comparative analysis between {name_a} and {name_b}.\n\
         Product records: {records}\n\
         Use the following format:\n\
         - Performance Verdict: [short text]\n\
         - Photography: [short text]\n\
         - Energy Efficiency: [short text]\n\
         - {marker}: State which is the better investment for the average user.",
        name_a = a.name,
        name_b = b.name,
        records = to_json(&[PromptProduct::from(a), PromptProduct::from(b)]),
        marker = super::CONCLUSION_MARKER,
    )
}
