//! Input checks for admin submissions.
//!
//! Everything here runs before any state is touched, so a rejected
//! submission leaves the catalog and settings exactly as they were.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use handset_core::{ProductDraft, SiteSettings};

/// Largest accepted product image, in decoded bytes.
pub const MAX_PRODUCT_IMAGE_BYTES: usize = 2 * 1024 * 1024;
/// Largest accepted logo, in decoded bytes.
pub const MAX_LOGO_BYTES: usize = 1024 * 1024;

const MAX_RATING: f64 = 5.0;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Blank(&'static str),
    #[error("a product image is required")]
    MissingImage,
    #[error("{field} is too large ({size} bytes, limit {limit})")]
    TooLarge {
        field: &'static str,
        size: usize,
        limit: usize,
    },
    #[error("{0} must be an http(s) URL or a base64 data URI")]
    InvalidImage(&'static str),
    #[error("{0} must be an http(s) URL")]
    InvalidUrl(&'static str),
    #[error("price must not be negative")]
    NegativePrice,
    #[error("rating must be between 0 and 5 (got {0})")]
    RatingOutOfRange(f64),
}

/// Check a product submission.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_draft(draft: &ProductDraft) -> Result<(), ValidationError> {
    require("name", &draft.name)?;
    require("brand", &draft.brand)?;
    if let Some(field) = draft.specs.blank_fields().first() {
        return Err(ValidationError::Blank(field.label()));
    }
    if draft.price < Decimal::ZERO {
        return Err(ValidationError::NegativePrice);
    }
    if !(0.0..=MAX_RATING).contains(&draft.rating) {
        return Err(ValidationError::RatingOutOfRange(draft.rating));
    }
    if draft.image.trim().is_empty() {
        return Err(ValidationError::MissingImage);
    }
    check_image("image", &draft.image, MAX_PRODUCT_IMAGE_BYTES)
}

/// Check a settings submission.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_settings(settings: &SiteSettings) -> Result<(), ValidationError> {
    require("site name", &settings.site_name)?;
    if !settings.whatsapp.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::Blank("whatsapp number"));
    }
    if !settings.instagram.trim().is_empty() && !is_http_url(&settings.instagram) {
        return Err(ValidationError::InvalidUrl("instagram"));
    }
    match settings.logo.as_deref() {
        Some(logo) if !logo.trim().is_empty() => check_image("logo", logo, MAX_LOGO_BYTES),
        _ => Ok(()),
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Blank(field))
    } else {
        Ok(())
    }
}

fn check_image(field: &'static str, value: &str, limit: usize) -> Result<(), ValidationError> {
    if is_http_url(value) {
        return Ok(());
    }
    let size = data_uri_len(value).ok_or(ValidationError::InvalidImage(field))?;
    if size > limit {
        return Err(ValidationError::TooLarge { field, size, limit });
    }
    Ok(())
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Decoded payload size of a base64 `data:` URI, or `None` if `value` is
/// not one.
#[must_use]
pub fn data_uri_len(value: &str) -> Option<usize> {
    let rest = value.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    STANDARD.decode(payload.trim()).ok().map(|bytes| bytes.len())
}
