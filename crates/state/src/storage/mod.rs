//! Persistent key-value slots backing the client stores.
//!
//! # Keys
//!
//! Each store owns one key under the configured namespace:
//!
//! - `<ns>:cart` - cart line items
//! - `<ns>:wishlist` - saved products
//! - `<ns>:comparison` - products selected for comparison
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map, optional per-value quota
//! - [`FileStorage`] - one JSON file per key under a directory
//!
//! Backends take `&self` and use interior mutability so a single backend can
//! be shared between stores through `Arc`.

pub mod file;
pub mod memory;

use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "glory";

/// Errors raised by storage backends.
///
/// Stores never surface these; they log and keep their in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value exceeds the backend's size limit.
    #[error("quota exceeded for {key}: {size} bytes (limit {limit})")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    /// Storage is disabled or otherwise unreachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A lock guarding the backend was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-valued key-value slot.
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Succeeds if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// The storage keys used by each store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub cart: String,
    pub wishlist: String,
    pub comparison: String,
}

impl StorageKeys {
    /// Build the keys for a namespace, e.g. `glory` -> `glory:cart`.
    #[must_use]
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            cart: format!("{namespace}:cart"),
            wishlist: format!("{namespace}:wishlist"),
            comparison: format!("{namespace}:comparison"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let keys = StorageKeys::default();
        assert_eq!(keys.cart, "glory:cart");
        assert_eq!(keys.wishlist, "glory:wishlist");
        assert_eq!(keys.comparison, "glory:comparison");
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys = StorageKeys::with_namespace("shop");
        assert_ne!(keys.cart, keys.wishlist);
        assert_ne!(keys.wishlist, keys.comparison);
        assert_eq!(keys.cart, "shop:cart");
    }

    #[test]
    fn test_shared_backend_through_arc() {
        let storage = Arc::new(MemoryStorage::new());
        let handle = Arc::clone(&storage);
        handle.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}
