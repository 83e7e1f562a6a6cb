//! In-memory key-value backend with an optional byte quota.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::BTreeMap;

/// Process-local key-value store.
///
/// Quota accounting counts UTF-8 bytes of every key and value, mirroring how
/// browser storage limits are enforced.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes growing past `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Toggles availability; an unavailable store fails every call.
    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_available(&self) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable(
                "memory store disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_available()?;
        if let Some(quota_bytes) = self.quota_bytes {
            let needed_bytes = self.used_bytes_without(key) + key.len() + value.len();
            if needed_bytes > quota_bytes {
                return Err(StorageError::QuotaExceeded {
                    needed_bytes,
                    quota_bytes,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.ensure_available()?;
        self.entries.remove(key);
        Ok(())
    }
}
