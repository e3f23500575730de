//! Hydration and write-through helpers shared by the stores.
//!
//! Both directions fail open: a missing or unreadable slot hydrates as
//! nothing, and a rejected write is logged and dropped.

use std::collections::HashSet;

use glory_core::ProductKey;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::storage::KeyValueStorage;

/// Read and decode the value under `key`.
///
/// Returns `None` when the slot is empty, unreadable, or does not decode as
/// `T`.
pub fn hydrate<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No persisted state");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted state, starting empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding malformed persisted state");
            None
        }
    }
}

/// Serialize `value` and write it under `key`.
///
/// Returns whether the write succeeded; failures are logged, never raised.
pub fn write_through<T, S>(storage: &S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!(key, error = %e, "Failed to serialize state");
            return false;
        }
    };

    match storage.set(key, &json) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "Failed to persist state, keeping in-memory copy");
            false
        }
    }
}

/// Whether any product key appears more than once.
pub fn has_duplicate_keys<'a>(keys: impl IntoIterator<Item = &'a ProductKey>) -> bool {
    let mut seen = HashSet::new();
    keys.into_iter().any(|key| !seen.insert(key))
}
