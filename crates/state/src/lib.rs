//! Glory State - Client-side storefront stores.
//!
//! Holds what a shopper accumulates during a session:
//!
//! - [`CartStore`] - line items with merged quantities, a derived subtotal
//!   and the cart panel's open flag
//! - [`WishlistStore`] - saved products with set semantics
//! - [`ComparisonStore`] - a bounded list of products to compare
//!
//! # Persistence
//!
//! Every mutation writes the store's full state through to a
//! [`KeyValueStorage`] slot, and each store hydrates from its slot once at
//! construction. Unreadable state hydrates as empty and failed writes are
//! logged and ignored: the in-memory store stays authoritative for the
//! session. Two sessions sharing a slot do not coordinate; the last writer
//! wins.
//!
//! # Modules
//!
//! - [`cart`], [`wishlist`], [`comparison`] - the stores
//! - [`storage`] - storage slot trait and backends
//! - [`events`] - change subscriptions
//! - [`checkout`] - payment request built from the cart
//! - [`config`] - environment configuration
//! - [`session`] - all stores of one session

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod comparison;
pub mod config;
pub mod events;
pub mod persist;
pub mod session;
pub mod storage;
pub mod wishlist;

pub use cart::CartStore;
pub use checkout::{CheckoutConfig, CheckoutError, CheckoutLineItem, CheckoutRequest};
pub use comparison::{AddOutcome, ComparisonStore};
pub use config::{ConfigError, StateConfig};
pub use events::{CartEvent, ComparisonEvent, SubscriptionId, WishlistEvent};
pub use session::ClientState;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError, StorageKeys};
pub use wishlist::WishlistStore;
