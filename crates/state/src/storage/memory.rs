//! In-process storage backend.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{KeyValueStorage, StorageError};

/// A map-backed storage slot.
///
/// Behaves like browser local storage: values are strings, an optional
/// per-value quota rejects oversized writes, and the slot can be switched
/// off to simulate disabled storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
    disabled: AtomicBool,
}

impl MemoryStorage {
    /// Create an empty, unlimited storage slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty slot that rejects values larger than `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Enable or disable the slot. A disabled slot fails every operation.
    pub fn set_enabled(&self, enabled: bool) {
        self.disabled.store(!enabled, Ordering::SeqCst);
    }

    /// Number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Poisoned`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self
            .values
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .len())
    }

    /// Whether nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Poisoned`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    fn ensure_enabled(&self) -> Result<(), StorageError> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("storage is disabled".to_owned()));
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_enabled()?;
        let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_enabled()?;
        match self.quota {
            Some(limit) if value.len() > limit => {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    size: value.len(),
                    limit,
                });
            }
            _ => {}
        }
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.ensure_enabled()?;
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        storage.set("glory:cart", "[]").unwrap();
        assert_eq!(storage.get("glory:cart").unwrap().as_deref(), Some("[]"));
        storage.remove("glory:cart").unwrap();
        assert!(storage.is_empty().unwrap());
        storage.remove("glory:cart").unwrap();
    }

    #[test]
    fn test_quota_rejects_large_values() {
        let storage = MemoryStorage::with_quota(4);
        storage.set("k", "1234").unwrap();
        let err = storage.set("k", "12345").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 4, .. }));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_disabled_storage_fails() {
        let storage = MemoryStorage::new();
        storage.set_enabled(false);
        assert!(matches!(
            storage.set("k", "v"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.get("k").is_err());
        storage.set_enabled(true);
        storage.set("k", "v").unwrap();
    }
}
