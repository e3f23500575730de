//! Change notifications emitted by the stores.
//!
//! Subscribers are called synchronously after a mutation has been applied
//! and written through, so a callback that reads the store observes the new
//! state. Operations that change nothing emit nothing.

use core::fmt;

use glory_core::ProductKey;

type Callback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An ordered list of callbacks for one event type.
pub struct Subscribers<E> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Subscribers<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }

    /// Register a callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Call every callback in subscription order.
    pub fn emit(&self, event: &E) {
        for (_, callback) in &self.callbacks {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

/// Cart changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was prepended.
    ItemAdded { key: ProductKey, quantity: u32 },
    /// An existing line's quantity grew by `added`.
    ItemMerged {
        key: ProductKey,
        added: u32,
        quantity: u32,
    },
    /// A line's quantity was set to a new value.
    QuantityUpdated { key: ProductKey, quantity: u32 },
    ItemRemoved { key: ProductKey },
    Cleared,
    /// The slide-over panel was opened or closed.
    VisibilityChanged { open: bool },
}

/// Wishlist changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistEvent {
    Added { key: ProductKey },
    Removed { key: ProductKey },
    Cleared,
}

/// Comparison list changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonEvent {
    Added { key: ProductKey },
    Removed { key: ProductKey },
    Cleared,
}
