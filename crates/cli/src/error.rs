//! CLI error type.

use std::path::PathBuf;

use thiserror::Error;

use handset_core::ProductId;
use handset_storefront::services::validation::ValidationError;
use handset_storefront::store::StoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid import file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("entry {index} ({name}): {source}")]
    InvalidEntry {
        index: usize,
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] ValidationError),

    #[error("no product with id {0}")]
    UnknownProduct(ProductId),

    #[error("pick two different products to compare")]
    SameProduct,

    /// Writing over an unreadable catalog would replace it with the seed list.
    #[error("catalog record is unreadable; fix or remove it first")]
    CatalogUnreadable,
}

pub type Result<T> = std::result::Result<T, CliError>;
