//! Wishlist store.
//!
//! A set of saved products kept in append order. `toggle_wishlist` is the
//! single save/unsave control; `add_item`, `remove_item` and
//! `is_in_wishlist` operate on the same entries.

use glory_core::WishlistEntry;
use tracing::{debug, instrument, warn};

use crate::events::{Subscribers, SubscriptionId, WishlistEvent};
use crate::persist::{has_duplicate_keys, hydrate, write_through};
use crate::storage::{KeyValueStorage, StorageKeys};

/// The session's saved products.
#[derive(Debug)]
pub struct WishlistStore<S> {
    storage: S,
    key: String,
    items: Vec<WishlistEntry>,
    subscribers: Subscribers<WishlistEvent>,
}

impl<S: KeyValueStorage> WishlistStore<S> {
    /// Build a wishlist from the default `glory:wishlist` slot.
    pub fn hydrate(storage: S) -> Self {
        Self::hydrate_with_key(storage, StorageKeys::default().wishlist)
    }

    /// Build a wishlist from the given slot. Unusable data yields an empty
    /// wishlist.
    pub fn hydrate_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = match hydrate::<Vec<WishlistEntry>, _>(&storage, &key) {
            Some(items) if has_duplicate_keys(items.iter().map(|i| &i.product_key)) => {
                warn!(key = %key, "Persisted wishlist has duplicate entries, starting empty");
                Vec::new()
            }
            Some(items) => items,
            None => Vec::new(),
        };
        debug!(key = %key, entries = items.len(), "Hydrated wishlist");

        Self {
            storage,
            key,
            items,
            subscribers: Subscribers::new(),
        }
    }

    /// Entries in the order they were saved.
    #[must_use]
    pub fn items(&self) -> &[WishlistEntry] {
        &self.items
    }

    #[must_use]
    pub fn is_in_wishlist(&self, key: &str) -> bool {
        self.items.iter().any(|entry| entry.product_key == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Save `entry` unless its key is already saved.
    #[instrument(level = "debug", skip(self, entry), fields(key = %entry.product_key))]
    pub fn add_item(&mut self, entry: WishlistEntry) {
        let added = if self.is_in_wishlist(entry.product_key.as_str()) {
            None
        } else {
            let key = entry.product_key.clone();
            self.items.push(entry);
            Some(key)
        };

        self.persist();
        if let Some(key) = added {
            debug!("Saved to wishlist");
            self.subscribers.emit(&WishlistEvent::Added { key });
        }
    }

    /// Remove the entry for `key`. Unknown keys are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_item(&mut self, key: &str) {
        let removed = self
            .items
            .iter()
            .position(|entry| entry.product_key == key)
            .map(|index| self.items.remove(index));

        self.persist();
        if let Some(entry) = removed {
            debug!("Removed from wishlist");
            self.subscribers.emit(&WishlistEvent::Removed {
                key: entry.product_key,
            });
        }
    }

    /// Remove `entry` if saved, otherwise append it.
    ///
    /// Returns whether the product is saved afterwards.
    pub fn toggle_wishlist(&mut self, entry: WishlistEntry) -> bool {
        if self.is_in_wishlist(entry.product_key.as_str()) {
            self.remove_item(entry.product_key.as_str());
            false
        } else {
            self.add_item(entry);
            true
        }
    }

    /// Remove every entry.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        let had_items = !self.items.is_empty();
        self.items.clear();

        self.persist();
        if had_items {
            self.subscribers.emit(&WishlistEvent::Cleared);
        }
    }

    /// Register a change callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&WishlistEvent) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Remove a change callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn persist(&self) {
        write_through(&self.storage, &self.key, &self.items);
    }
}
