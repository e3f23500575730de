//! Product comparison store.
//!
//! A short, bounded list of products shown side by side. Adding beyond the
//! capacity is refused rather than evicting an earlier pick.

use glory_core::ComparisonEntry;
use tracing::{debug, instrument, warn};

use crate::events::{ComparisonEvent, Subscribers, SubscriptionId};
use crate::persist::{has_duplicate_keys, hydrate, write_through};
use crate::storage::{KeyValueStorage, StorageKeys};

/// Products compared at once when not configured otherwise.
pub const DEFAULT_CAPACITY: usize = 3;

/// Result of [`ComparisonStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    /// The list already holds `capacity` products.
    Full,
}

/// The session's comparison list.
#[derive(Debug)]
pub struct ComparisonStore<S> {
    storage: S,
    key: String,
    capacity: usize,
    items: Vec<ComparisonEntry>,
    subscribers: Subscribers<ComparisonEvent>,
}

impl<S: KeyValueStorage> ComparisonStore<S> {
    /// Build a comparison list from the default slot with the default
    /// capacity.
    pub fn hydrate(storage: S) -> Self {
        Self::hydrate_with_key(storage, StorageKeys::default().comparison, DEFAULT_CAPACITY)
    }

    /// Build a comparison list from the given slot.
    ///
    /// A capacity of zero is raised to one. Persisted lists longer than the
    /// capacity keep their first `capacity` entries.
    pub fn hydrate_with_key(storage: S, key: impl Into<String>, capacity: usize) -> Self {
        let key = key.into();
        let capacity = capacity.max(1);
        let mut items = match hydrate::<Vec<ComparisonEntry>, _>(&storage, &key) {
            Some(items) if has_duplicate_keys(items.iter().map(|i| &i.product_key)) => {
                warn!(key = %key, "Persisted comparison list has duplicates, starting empty");
                Vec::new()
            }
            Some(items) => items,
            None => Vec::new(),
        };
        if items.len() > capacity {
            warn!(key = %key, len = items.len(), capacity, "Truncating persisted comparison list");
            items.truncate(capacity);
        }

        Self {
            storage,
            key,
            capacity,
            items,
            subscribers: Subscribers::new(),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[ComparisonEntry] {
        &self.items
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_comparing(&self, key: &str) -> bool {
        self.items.iter().any(|entry| entry.product_key == key)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `entry` if it is new and there is room.
    #[instrument(level = "debug", skip(self, entry), fields(key = %entry.product_key))]
    pub fn add(&mut self, entry: ComparisonEntry) -> AddOutcome {
        let key = entry.product_key.clone();
        let outcome = if self.is_comparing(key.as_str()) {
            AddOutcome::AlreadyPresent
        } else if self.is_full() {
            warn!(capacity = self.capacity, "Comparison list is full");
            AddOutcome::Full
        } else {
            self.items.push(entry);
            AddOutcome::Added
        };

        self.persist();
        if outcome == AddOutcome::Added {
            self.subscribers.emit(&ComparisonEvent::Added { key });
        }
        outcome
    }

    /// Remove the entry for `key`. Unknown keys are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, key: &str) {
        let removed = self
            .items
            .iter()
            .position(|entry| entry.product_key == key)
            .map(|index| self.items.remove(index));

        self.persist();
        if let Some(entry) = removed {
            debug!("Removed from comparison");
            self.subscribers.emit(&ComparisonEvent::Removed {
                key: entry.product_key,
            });
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        let had_items = !self.items.is_empty();
        self.items.clear();

        self.persist();
        if had_items {
            self.subscribers.emit(&ComparisonEvent::Cleared);
        }
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ComparisonEvent) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn persist(&self) {
        write_through(&self.storage, &self.key, &self.items);
    }
}
