//! Catalog logic: filtering, compare selection and spec comparison.
//!
//! Everything here is pure and operates on an in-memory catalog slice.

mod compare;
mod filter;
mod seed;
mod specs;

pub use compare::{CompareSet, MAX_COMPARE, ToggleOutcome};
pub use filter::{ALL_BRANDS, BrandFilter, brands, filter_catalog, similar_products};
pub use seed::seed_catalog;
pub use specs::{Advantage, ComparisonSummary, FieldComparison, compare_field, extract_number};
