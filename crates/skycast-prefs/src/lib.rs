//! Preference persistence for SkyCast.
//!
//! Three independent slots (favorites, temperature unit, recent searches)
//! are each bound to an in-memory value by a [`PersistentBinding`]. The
//! [`PreferenceStore`] owns those bindings and enforces the invariants the
//! views rely on: one favorite per city id, at most five distinct recent
//! searches, most recent first.

pub mod binding;
pub mod storage;
pub mod store;
pub mod types;

pub use binding::PersistentBinding;
pub use storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use store::{
    PreferenceStore, FAVORITES_SLOT, MAX_RECENT_SEARCHES, RECENT_SEARCHES_SLOT, UNIT_SLOT,
};
pub use types::FavoriteCity;
