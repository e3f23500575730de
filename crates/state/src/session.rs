//! All client stores for one session, sharing a storage backend.

use std::sync::Arc;

use tracing::info;

use crate::cart::CartStore;
use crate::checkout::{CheckoutConfig, CheckoutError, CheckoutRequest};
use crate::comparison::ComparisonStore;
use crate::config::StateConfig;
use crate::storage::{KeyValueStorage, StorageKeys};
use crate::wishlist::WishlistStore;

/// The cart, wishlist and comparison list of one client session.
///
/// Constructed explicitly and handed to whatever presents it; there is no
/// global instance.
#[derive(Debug)]
pub struct ClientState<S> {
    pub cart: CartStore<Arc<S>>,
    pub wishlist: WishlistStore<Arc<S>>,
    pub comparison: ComparisonStore<Arc<S>>,
    checkout: CheckoutConfig,
}

impl<S: KeyValueStorage> ClientState<S> {
    /// Hydrate every store from `storage` using the configured keys.
    pub fn hydrate(storage: Arc<S>, config: &StateConfig) -> Self {
        Self::hydrate_with_keys(
            storage,
            &config.storage_keys(),
            config.comparison_limit,
            config.checkout(),
        )
    }

    /// Hydrate every store from explicit keys.
    pub fn hydrate_with_keys(
        storage: Arc<S>,
        keys: &StorageKeys,
        comparison_limit: usize,
        checkout: CheckoutConfig,
    ) -> Self {
        let state = Self {
            cart: CartStore::hydrate_with_key(Arc::clone(&storage), keys.cart.clone()),
            wishlist: WishlistStore::hydrate_with_key(Arc::clone(&storage), keys.wishlist.clone()),
            comparison: ComparisonStore::hydrate_with_key(
                storage,
                keys.comparison.clone(),
                comparison_limit,
            ),
            checkout,
        };
        info!(
            cart_lines = state.cart.len(),
            wishlist_entries = state.wishlist.len(),
            comparing = state.comparison.len(),
            "Client state hydrated"
        );
        state
    }

    /// Build a checkout request from the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart is empty.
    pub fn checkout_request(&self) -> Result<CheckoutRequest, CheckoutError> {
        CheckoutRequest::from_cart(&self.cart, &self.checkout)
    }

    #[must_use]
    pub const fn checkout_config(&self) -> &CheckoutConfig {
        &self.checkout
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use glory_core::{NewCartItem, Price, ProductKey, WishlistEntry};

    use super::*;
    use crate::storage::MemoryStorage;

    fn config() -> StateConfig {
        StateConfig::from_lookup(|name| match name {
            "GLORY_STORAGE_NAMESPACE" => Some("test".to_owned()),
            "GLORY_COMPARISON_LIMIT" => Some("2".to_owned()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_stores_use_namespaced_keys() {
        let storage = Arc::new(MemoryStorage::new());
        let mut state = ClientState::hydrate(Arc::clone(&storage), &config());

        let key = ProductKey::parse("w1").unwrap();
        let price = Price::from_cents(24_900).unwrap();
        state
            .cart
            .add_one(NewCartItem::new(key.clone(), "Aurelius", price, None));
        state
            .wishlist
            .toggle_wishlist(WishlistEntry::new(key, "Aurelius", price));

        assert!(storage.get("test:cart").unwrap().is_some());
        assert!(storage.get("test:wishlist").unwrap().is_some());
        assert_eq!(state.comparison.capacity(), 2);
    }

    #[test]
    fn test_checkout_request_uses_config() {
        let storage = Arc::new(MemoryStorage::new());
        let mut state = ClientState::hydrate(storage, &config());
        assert_eq!(state.checkout_request().unwrap_err(), CheckoutError::EmptyCart);

        state.cart.add_item(
            NewCartItem::new(
                ProductKey::parse("w1").unwrap(),
                "Aurelius",
                Price::from_cents(24_900).unwrap(),
                None,
            ),
            2,
        );
        let request = state.checkout_request().unwrap();
        assert_eq!(request.cancel_url, "http://localhost:3000/cart");
        assert_eq!(request.total_minor_units(), 49_800);
    }
}
