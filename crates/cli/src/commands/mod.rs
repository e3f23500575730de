//! Subcommand implementations.
//!
//! Each command hydrates nothing itself: it receives the already hydrated
//! store, applies one operation and prints the resulting state.

pub mod cart;
pub mod checkout;
pub mod compare;
pub mod wishlist;

use std::path::PathBuf;

use clap::Args;
use glory_core::{ComparisonEntry, KeyError, NewCartItem, Price, ProductKey, WishlistEntry};
use thiserror::Error;

use crate::catalog::{self, CatalogError};

/// Errors raised while turning command-line arguments into store entries.
#[derive(Debug, Error)]
pub enum ArgsError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid product key: {0}")]
    InvalidKey(#[from] KeyError),

    #[error("Missing --{0} (or pass --catalog to look the product up)")]
    MissingField(&'static str),
}

/// Identify a product either by catalog lookup or by explicit fields.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product key (catalog slug)
    #[arg(short, long)]
    pub key: String,

    /// Catalog JSON file to read the product from
    #[arg(long, conflicts_with_all = ["title", "price", "image", "category", "rating", "description"])]
    pub catalog: Option<PathBuf>,

    /// Display title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Unit price, e.g. 249 or 19.99
    #[arg(short, long)]
    pub price: Option<Price>,

    /// Image URL or path
    #[arg(long)]
    pub image: Option<String>,

    /// Product category
    #[arg(long)]
    pub category: Option<String>,

    /// Average rating
    #[arg(long)]
    pub rating: Option<f32>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,
}

impl ProductArgs {
    fn manual_fields(&self) -> Result<(ProductKey, String, Price), ArgsError> {
        let key = ProductKey::parse(&self.key)?;
        let title = self.title.clone().ok_or(ArgsError::MissingField("title"))?;
        let price = self.price.ok_or(ArgsError::MissingField("price"))?;
        Ok((key, title, price))
    }

    /// Build the item added to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog lookup fails or required fields are
    /// missing.
    pub fn cart_item(&self) -> Result<NewCartItem, ArgsError> {
        if let Some(path) = &self.catalog {
            return Ok(NewCartItem::from(&catalog::find(path, &self.key)?));
        }
        let (key, title, price) = self.manual_fields()?;
        Ok(NewCartItem::new(key, title, price, self.image.clone()))
    }

    /// Build the entry saved to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog lookup fails or required fields are
    /// missing.
    pub fn wishlist_entry(&self) -> Result<WishlistEntry, ArgsError> {
        if let Some(path) = &self.catalog {
            return Ok(WishlistEntry::from(&catalog::find(path, &self.key)?));
        }
        let (key, title, price) = self.manual_fields()?;
        Ok(WishlistEntry {
            product_key: key,
            title,
            price,
            image_ref: self.image.clone(),
            category: self.category.clone(),
            rating: self.rating,
        })
    }

    /// Build the entry added to the comparison list.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog lookup fails or required fields are
    /// missing.
    pub fn comparison_entry(&self) -> Result<ComparisonEntry, ArgsError> {
        if let Some(path) = &self.catalog {
            return Ok(ComparisonEntry::from(&catalog::find(path, &self.key)?));
        }
        let (key, title, price) = self.manual_fields()?;
        Ok(ComparisonEntry {
            id: None,
            product_key: key,
            title,
            price,
            category: self.category.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            rating: self.rating,
        })
    }
}
