//! Persistence adapter for best-effort project durability.
//!
//! # Responsibility
//! - Define the key-value blob contract (`KeyValueStore`) the core writes to.
//! - Provide in-memory and SQLite-backed implementations.
//! - Map the project collection onto one fixed key (`ProjectStorage`).
//!
//! # Invariants
//! - The whole collection lives under a single key as one JSON blob.
//! - Storage failures are logged by callers of `ProjectStorage`, never
//!   surfaced to store operations.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod project_storage;
pub mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use project_storage::{ProjectStorage, StorageInfo, DEFAULT_STORAGE_KEY};
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a key-value backend.
#[derive(Debug)]
pub enum StorageError {
    /// Write would exceed the backend's byte quota.
    QuotaExceeded { needed_bytes: usize, quota_bytes: usize },
    /// Backend is disabled or cannot be reached.
    Unavailable(String),
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded {
                needed_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded: {needed_bytes} bytes needed, {quota_bytes} allowed"
            ),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode projects: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::QuotaExceeded { .. } | Self::Unavailable(_) => None,
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value blob store (browser local storage equivalent).
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
