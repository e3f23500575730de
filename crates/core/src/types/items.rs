//! Entries held by the client-side stores.
//!
//! Field names on the wire follow the persisted blob format (`slug`,
//! `price`, `image`, `_id`) so state written by earlier clients hydrates
//! unchanged.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::key::ProductKey;
use super::price::Price;
use super::product::ProductRecord;

/// Display fields captured when a product is added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "slug")]
    pub product_key: ProductKey,
    pub title: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl NewCartItem {
    /// Create an item without a catalog id.
    #[must_use]
    pub fn new(
        product_key: ProductKey,
        title: impl Into<String>,
        unit_price: Price,
        image_ref: Option<String>,
    ) -> Self {
        Self {
            id: None,
            product_key,
            title: title.into(),
            unit_price,
            image_ref,
        }
    }

    /// Turn the item into a cart line with the given quantity.
    #[must_use]
    pub fn into_line(self, quantity: NonZeroU32) -> CartLineItem {
        CartLineItem {
            id: self.id,
            product_key: self.product_key,
            title: self.title,
            unit_price: self.unit_price,
            image_ref: self.image_ref,
            quantity,
        }
    }
}

impl From<&ProductRecord> for NewCartItem {
    fn from(product: &ProductRecord) -> Self {
        Self {
            id: product.id.clone(),
            product_key: product.slug.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            image_ref: product.primary_image().map(str::to_owned),
        }
    }
}

/// A cart row: product identity, cached display fields and a quantity.
///
/// The quantity is never zero; stores remove the line instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "slug")]
    pub product_key: ProductKey,
    pub title: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub quantity: NonZeroU32,
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl CartLineItem {
    /// Quantity as a plain integer.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.times(self.quantity.get())
    }
}

/// A saved product in the wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    #[serde(rename = "slug")]
    pub product_key: ProductKey,
    pub title: String,
    pub price: Price,
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl WishlistEntry {
    /// Create an entry with only the required display fields.
    #[must_use]
    pub fn new(product_key: ProductKey, title: impl Into<String>, price: Price) -> Self {
        Self {
            product_key,
            title: title.into(),
            price,
            image_ref: None,
            category: None,
            rating: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }
}

impl From<&ProductRecord> for WishlistEntry {
    fn from(product: &ProductRecord) -> Self {
        Self {
            product_key: product.slug.clone(),
            title: product.title.clone(),
            price: product.price,
            image_ref: product.primary_image().map(str::to_owned),
            category: Some(product.category.clone()),
            rating: product.rating,
        }
    }
}

/// A product selected for side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "slug")]
    pub product_key: ProductKey,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl From<&ProductRecord> for ComparisonEntry {
    fn from(product: &ProductRecord) -> Self {
        Self {
            id: product.id.clone(),
            product_key: product.slug.clone(),
            title: product.title.clone(),
            price: product.price,
            category: product.category.clone(),
            description: product.description.clone(),
            rating: product.rating,
        }
    }
}
