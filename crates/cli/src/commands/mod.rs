//! CLI command implementations.

pub mod compare;
pub mod products;
pub mod settings;
