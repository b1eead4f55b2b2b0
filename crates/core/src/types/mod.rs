//! Core types for the handset storefront.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod chat;
pub mod id;
pub mod price;
pub mod product;
pub mod settings;

pub use chat::{ChatMessage, ChatRole};
pub use id::{ConversationId, ProductId, SessionToken};
pub use price::{CurrencyCode, Price, UnknownCurrency};
pub use product::{Product, ProductDraft, ProductSpecs, SpecField};
pub use settings::SiteSettings;
