//! Shopping cart store.
//!
//! Holds the session's cart lines, newest first, plus the open/closed flag
//! of the cart panel. Every mutating call writes the full line list through
//! to storage; the panel flag lives only in memory.
//!
//! # Example
//!
//! ```
//! use glory_core::{NewCartItem, Price, ProductKey};
//! use glory_state::{CartStore, MemoryStorage};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartStore::hydrate(MemoryStorage::new());
//! let item = NewCartItem::new(
//!     ProductKey::parse("w1").unwrap(),
//!     "Aurelius",
//!     Price::new(Decimal::from(249)).unwrap(),
//!     None,
//! );
//!
//! cart.add_item(item.clone(), 1);
//! cart.add_item(item, 2);
//! assert_eq!(cart.subtotal(), Decimal::from(747));
//!
//! cart.update_quantity("w1", 0);
//! assert!(cart.is_empty());
//! ```

use std::num::NonZeroU32;

use glory_core::{CartLineItem, NewCartItem};
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::events::{CartEvent, Subscribers, SubscriptionId};
use crate::persist::{has_duplicate_keys, hydrate, write_through};
use crate::storage::{KeyValueStorage, StorageKeys};

/// The session's shopping cart.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    items: Vec<CartLineItem>,
    is_open: bool,
    subscribers: Subscribers<CartEvent>,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Build a cart from the default `glory:cart` slot.
    pub fn hydrate(storage: S) -> Self {
        Self::hydrate_with_key(storage, StorageKeys::default().cart)
    }

    /// Build a cart from the given slot.
    ///
    /// Missing, malformed, or inconsistent data (duplicate keys) yields an
    /// empty cart.
    pub fn hydrate_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = match hydrate::<Vec<CartLineItem>, _>(&storage, &key) {
            Some(items) if has_duplicate_keys(items.iter().map(|i| &i.product_key)) => {
                warn!(key = %key, "Persisted cart has duplicate lines, starting empty");
                Vec::new()
            }
            Some(items) => items,
            None => Vec::new(),
        };
        debug!(key = %key, lines = items.len(), "Hydrated cart");

        Self {
            storage,
            key,
            items,
            is_open: false,
            subscribers: Subscribers::new(),
        }
    }

    /// Lines, most recently added first.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Owned copy of the current lines, e.g. for a checkout request.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartLineItem> {
        self.items.clone()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.product_key == key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Sum of `unit_price * quantity`, recomputed on every call.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_total()))
            .unwrap_or(Decimal::MAX)
    }

    /// Whether the cart panel is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// The storage key this cart writes to.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Add `quantity` units of a product and open the panel.
    ///
    /// An existing line for the same key grows by `quantity`; otherwise a new
    /// line is prepended. A quantity of zero adds nothing.
    #[instrument(level = "debug", skip(self, item), fields(key = %item.product_key))]
    pub fn add_item(&mut self, item: NewCartItem, quantity: u32) {
        let event = match NonZeroU32::new(quantity) {
            None => {
                debug!("Ignoring add with zero quantity");
                None
            }
            Some(added) => {
                if let Some(line) = self
                    .items
                    .iter_mut()
                    .find(|line| line.product_key == item.product_key)
                {
                    line.quantity = line.quantity.saturating_add(added.get());
                    Some(CartEvent::ItemMerged {
                        key: item.product_key,
                        added: added.get(),
                        quantity: line.quantity(),
                    })
                } else {
                    let key = item.product_key.clone();
                    self.items.insert(0, item.into_line(added));
                    Some(CartEvent::ItemAdded {
                        key,
                        quantity: added.get(),
                    })
                }
            }
        };

        self.persist();
        if let Some(event) = event {
            debug!(?event, "Cart updated");
            self.subscribers.emit(&event);
        }
        self.set_open(true);
    }

    /// Add a single unit.
    pub fn add_one(&mut self, item: NewCartItem) {
        self.add_item(item, 1);
    }

    /// Remove the line for `key`. Unknown keys are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_item(&mut self, key: &str) {
        let position = self.items.iter().position(|line| line.product_key == key);
        let removed = position.map(|index| self.items.remove(index));

        self.persist();
        if let Some(line) = removed {
            debug!("Removed cart line");
            self.subscribers.emit(&CartEvent::ItemRemoved {
                key: line.product_key,
            });
        }
    }

    /// Set the quantity of the line for `key`.
    ///
    /// Zero or negative quantities remove the line. Values above `u32::MAX`
    /// are clamped. Unknown keys are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn update_quantity(&mut self, key: &str, quantity: i64) {
        let clamped = u32::try_from(quantity.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX);
        let Some(quantity) = NonZeroU32::new(clamped) else {
            self.remove_item(key);
            return;
        };

        let event = self
            .items
            .iter_mut()
            .find(|line| line.product_key == key)
            .filter(|line| line.quantity != quantity)
            .map(|line| {
                line.quantity = quantity;
                CartEvent::QuantityUpdated {
                    key: line.product_key.clone(),
                    quantity: quantity.get(),
                }
            });

        self.persist();
        if let Some(event) = event {
            debug!(?event, "Cart updated");
            self.subscribers.emit(&event);
        }
    }

    /// Remove every line.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        let had_items = !self.items.is_empty();
        self.items.clear();

        self.persist();
        if had_items {
            self.subscribers.emit(&CartEvent::Cleared);
        }
    }

    /// Set the panel flag to `explicit`, or flip it when `None`.
    pub fn toggle_open(&mut self, explicit: Option<bool>) {
        let open = explicit.unwrap_or(!self.is_open);
        self.set_open(open);
    }

    /// Register a change callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&CartEvent) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Remove a change callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn set_open(&mut self, open: bool) {
        if self.is_open != open {
            self.is_open = open;
            self.subscribers.emit(&CartEvent::VisibilityChanged { open });
        }
    }

    fn persist(&self) {
        write_through(&self.storage, &self.key, &self.items);
    }
}
