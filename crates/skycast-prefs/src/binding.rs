//! Binding between one in-memory value and one storage slot.
//!
//! Faults never reach the caller. A slot that can't be read or parsed seeds
//! the default; a write that fails is logged and the in-memory value stays
//! authoritative for the rest of the session.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::KeyValueStore;

/// Read `key` and parse it as JSON, falling back to `default` on any fault.
///
/// An absent slot and an empty slot both yield `default`.
pub fn initialize<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    let raw = match store.get(key) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(slot = key, error = %e, "Error reading preference slot");
            return default;
        }
    };

    match decode_slot(raw.as_deref()) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            tracing::error!(slot = key, error = %e, "Error parsing preference slot, using default");
            default
        }
    }
}

/// `Ok(None)` for an absent or empty slot. Anything else must parse,
/// including whitespace-only contents.
fn decode_slot<T: DeserializeOwned>(raw: Option<&str>) -> Result<Option<T>, serde_json::Error> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => serde_json::from_str(raw).map(Some),
    }
}

/// Serialize `value` to JSON and write it to `key`. Failures are logged only.
pub fn persist<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(slot = key, error = %e, "Error serializing preference slot");
            return;
        }
    };

    if let Err(e) = store.set(key, &json) {
        tracing::error!(slot = key, error = %e, "Error writing preference slot");
    } else {
        tracing::trace!(slot = key, bytes = json.len(), "Preference slot written");
    }
}

/// A value kept in sync with a named slot.
///
/// Seeded once on construction; every [`set`](Self::set) or
/// [`update`](Self::update) is followed by exactly one write attempt.
pub struct PersistentBinding<T> {
    key: String,
    value: T,
    store: Arc<dyn KeyValueStore>,
}

impl<T> std::fmt::Debug for PersistentBinding<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentBinding")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T> PersistentBinding<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = initialize(store.as_ref(), &key, default);
        Self { key, value, store }
    }

    /// Adjust the seeded value in place without writing it back.
    pub fn normalized(mut self, fix: impl FnOnce(&mut T)) -> Self {
        fix(&mut self.value);
        self
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    /// Mutate the value, then persist it.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.persist();
        out
    }

    fn persist(&self) {
        persist(self.store.as_ref(), &self.key, &self.value);
    }
}
