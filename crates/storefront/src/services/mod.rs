//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - The hydrated catalog and settings, with write-through mutations
//! - `admin` - Passcode login and expiring admin sessions
//! - `chat` - Assistant transcripts with an in-flight gate
//! - `contact` - Messaging deep links
//! - `validation` - Checks on admin submissions

pub mod admin;
pub mod catalog;
pub mod chat;
pub mod contact;
pub mod validation;
