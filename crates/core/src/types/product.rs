//! Catalog product records.
//!
//! These mirror the JSON served by the catalog endpoint. The client state
//! only ever reads them to snapshot display fields at add-time; it never
//! re-validates a line against the live catalog.

use serde::{Deserialize, Serialize};

use super::key::ProductKey;
use super::price::Price;

/// Category assigned by the catalog when none is set.
pub const DEFAULT_CATEGORY: &str = "Watches";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_owned()
}

/// A product as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Database id, when the catalog exposes it.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// URL slug, used as the product key.
    pub slug: ProductKey,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub inventory: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl ProductRecord {
    /// The first image, which is the only one carried into cart lines.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.inventory > 0
    }
}

/// A catalog listing payload.
///
/// The products endpoint wraps its results as `{"products": [...]}`; exported
/// catalog files are often a bare array. Both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CatalogListing {
    Wrapped { products: Vec<ProductRecord> },
    Bare(Vec<ProductRecord>),
}

impl CatalogListing {
    /// Consume the listing and return its products.
    #[must_use]
    pub fn into_products(self) -> Vec<ProductRecord> {
        match self {
            Self::Wrapped { products } | Self::Bare(products) => products,
        }
    }
}
