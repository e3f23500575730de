//! Glory Core - Shared types library.
//!
//! This crate provides the types used across all Glory storefront components:
//! - `state` - Client-side cart, wishlist and comparison stores
//! - `cli` - Command-line front end driving the stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product keys and prices, catalog
//!   records, and store entries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
