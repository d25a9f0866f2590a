//! Durable key-value slots.
//!
//! A slot is one named string value. Backends only move strings; JSON
//! encoding happens in [`crate::binding`].

mod file;
mod memory;
mod sqlite;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("invalid slot key: {0:?}")]
    InvalidKey(String),

    #[error("failed to read slot {key:?}: {message}")]
    Read { key: String, message: String },

    #[error("failed to write slot {key:?}: {message}")]
    Write { key: String, message: String },
}

impl StorageError {
    pub(crate) fn read(key: &str, message: impl ToString) -> Self {
        Self::Read {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn write(key: &str, message: impl ToString) -> Self {
        Self::Write {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<StorageError> for skycast_core::StorageError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Unavailable(msg) => skycast_core::StorageError::Unavailable(msg),
            StorageError::InvalidKey(key) => {
                skycast_core::StorageError::Unavailable(format!("invalid slot key {key:?}"))
            }
            e @ StorageError::Read { .. } => skycast_core::StorageError::ReadFailed(e.to_string()),
            e @ StorageError::Write { .. } => {
                skycast_core::StorageError::WriteFailed(e.to_string())
            }
        }
    }
}

impl From<StorageError> for skycast_core::AppError {
    fn from(e: StorageError) -> Self {
        skycast_core::AppError::Storage(e.into())
    }
}

/// A durable string-valued key-value store.
///
/// Implementations must tolerate being shared between the bindings of one
/// preference store; each binding only ever touches its own key.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` means the slot has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace a slot's contents.
    ///
    /// On error the previously stored value must be left as it was.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Slot keys become file names and table keys; keep them to a safe alphabet.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("weatherFavorites").is_ok());
        assert!(validate_key("recent-searches_2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
    }

    #[test]
    fn test_maps_into_core_error() {
        let core: skycast_core::StorageError = StorageError::write("k", "disk full").into();
        assert!(matches!(core, skycast_core::StorageError::WriteFailed(ref m) if m.contains("disk full")));

        let app: skycast_core::AppError = StorageError::Unavailable("locked".into()).into();
        assert!(matches!(app, skycast_core::AppError::Storage(_)));
    }
}
