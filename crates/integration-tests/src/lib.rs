//! Integration tests for the Glory client state.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p glory-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart write-through and hydration against real files
//! - `saved_lists` - Wishlist, comparison list and checkout across sessions
//!
//! Every test works in its own temporary directory, so no setup is needed.
