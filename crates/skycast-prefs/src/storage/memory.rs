use std::collections::HashMap;

use parking_lot::Mutex;

use super::{KeyValueStore, StorageError};

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    write_attempts: usize,
}

/// Process-local slots.
///
/// Used when no durable backend can be opened, and by tests, which can make
/// reads or writes fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot without counting it as a write attempt.
    pub fn with_slot(self, key: &str, value: &str) -> Self {
        self.inner
            .lock()
            .slots
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().fail_writes = fail;
    }

    /// Number of `set` calls seen, successful or not.
    pub fn write_attempts(&self) -> usize {
        self.inner.lock().write_attempts
    }

    /// Raw slot contents, bypassing fault injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.lock().slots.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.lock();
        if inner.fail_reads {
            return Err(StorageError::read(key, "read fault injected"));
        }
        Ok(inner.slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock();
        inner.write_attempts += 1;
        if inner.fail_writes {
            return Err(StorageError::write(key, "quota exceeded"));
        }
        inner.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
