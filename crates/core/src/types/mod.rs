//! Core types for the Glory storefront client.
//!
//! This module provides type-safe wrappers for product identity, prices and
//! the entries held by the client-side stores.

pub mod items;
pub mod key;
pub mod price;
pub mod product;

pub use items::{CartLineItem, ComparisonEntry, NewCartItem, WishlistEntry};
pub use key::{KeyError, ProductKey};
pub use price::{CurrencyCode, Price, PriceError, format_amount};
pub use product::{CatalogListing, DEFAULT_CATEGORY, ProductRecord};
