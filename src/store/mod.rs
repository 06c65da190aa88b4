//! Item persistence
//!
//! The whole collection is read and rewritten on every operation; there is no
//! cache between requests and no locking around load-modify-save.

mod file;
pub mod item;

pub use file::JsonFileStore;
pub use item::{next_id, Collection, Item};

use std::fmt;
use std::sync::Arc;

/// Errors a store can report from `ensure_storage_exists` or `save`
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem problem (create dir, write, rename)
    Io(std::io::Error),
    /// Collection could not be turned into JSON
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Serialize(e) => write!(f, "serialization error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialize(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

/// Storage backend for the shopping list
pub trait ItemStore: Send + Sync {
    /// Create whatever the backend needs (directory, empty document). Idempotent.
    fn ensure_storage_exists(&self) -> Result<(), StoreError>;

    /// Read the full collection. Failures are logged and yield an empty list.
    fn load(&self) -> Collection;

    /// Replace the persisted collection with `items`.
    fn save(&self, items: &[Item]) -> Result<(), StoreError>;
}

pub type SharedItemStore = Arc<dyn ItemStore>;
