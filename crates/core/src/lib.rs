//! Handset Core - Shared types and catalog logic.
//!
//! This crate provides the domain used across all storefront components:
//! - `storefront` - JSON API server and persistence
//! - `cli` - Command-line tools for operating on the durable catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Products, prices, site settings, chat messages and IDs
//! - [`catalog`] - Filtering, compare selection and spec comparison

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::{
    Advantage, BrandFilter, CompareSet, ComparisonSummary, FieldComparison, ToggleOutcome,
    brands, compare_field, filter_catalog, seed_catalog, similar_products,
};
pub use types::*;
