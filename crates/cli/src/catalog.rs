//! Product lookup in an exported catalog file.
//!
//! Accepts both the products endpoint payload (`{"products": [...]}`) and a
//! bare JSON array of product records.

use std::fs;
use std::path::{Path, PathBuf};

use glory_core::{CatalogListing, ProductRecord};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Product not found in catalog: {0}")]
    NotFound(String),
}

/// Load every product from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a product listing.
pub fn load(path: &Path) -> Result<Vec<ProductRecord>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let listing: CatalogListing =
        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let products = listing.into_products();
    debug!(path = %path.display(), products = products.len(), "Loaded catalog");
    Ok(products)
}

/// Load `path` and return the product whose slug is `key`.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if no product matches.
pub fn find(path: &Path, key: &str) -> Result<ProductRecord, CatalogError> {
    load(path)?
        .into_iter()
        .find(|product| product.slug == key.trim())
        .ok_or_else(|| CatalogError::NotFound(key.to_owned()))
}
