//! Project collection persistence on top of a key-value backend.
//!
//! # Responsibility
//! - Save/load/clear the whole collection under one fixed key.
//! - Report storage usage for diagnostics.
//!
//! # Invariants
//! - `load_projects` never fails: absent key, unreadable backend and
//!   malformed blobs all yield an empty collection.
//! - Best-effort entry points (`save_projects`, `clear_projects`) log failures
//!   and return normally.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::model::project::Project;
use log::{debug, error, warn};

pub const DEFAULT_STORAGE_KEY: &str = "projects_showcase_app";

/// Storage usage snapshot for the project key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StorageInfo {
    /// UTF-8 size of the stored blob.
    pub size_in_bytes: usize,
    /// Number of projects in the stored blob.
    pub item_count: usize,
}

impl StorageInfo {
    pub fn size_in_kb(&self) -> f64 {
        self.size_in_bytes as f64 / 1024.0
    }
}

/// Key-bound project persistence.
pub struct ProjectStorage<S: KeyValueStore = Box<dyn KeyValueStore>> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ProjectStorage<S> {
    /// Binds `backend` to [`DEFAULT_STORAGE_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Writes the whole collection, returning the backend failure if any.
    pub fn try_save_projects(&mut self, projects: &[Project]) -> StorageResult<()> {
        let blob = serde_json::to_string(projects).map_err(StorageError::Serialize)?;
        self.backend.set(&self.key, &blob)?;
        debug!(
            "event=projects_save module=storage status=ok count={} bytes={}",
            projects.len(),
            blob.len()
        );
        Ok(())
    }

    /// Best-effort save. Returns `true` when the write landed.
    pub fn save_projects(&mut self, projects: &[Project]) -> bool {
        match self.try_save_projects(projects) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=projects_save module=storage status=error count={} error={}",
                    projects.len(),
                    err
                );
                false
            }
        }
    }

    /// Loads the stored collection, falling back to empty on any failure.
    pub fn load_projects(&self) -> Vec<Project> {
        let blob = match self.backend.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!("event=projects_load module=storage status=error error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Project>>(&blob) {
            Ok(projects) => {
                debug!(
                    "event=projects_load module=storage status=ok count={}",
                    projects.len()
                );
                projects
            }
            Err(err) => {
                warn!(
                    "event=projects_load module=storage status=error error_code=malformed_blob error={err}"
                );
                Vec::new()
            }
        }
    }

    pub fn try_clear_projects(&mut self) -> StorageResult<()> {
        self.backend.remove(&self.key)
    }

    /// Best-effort removal of the stored collection.
    pub fn clear_projects(&mut self) -> bool {
        match self.try_clear_projects() {
            Ok(()) => true,
            Err(err) => {
                error!("event=projects_clear module=storage status=error error={err}");
                false
            }
        }
    }

    /// Returns size and item count of the stored blob.
    ///
    /// Failures are logged and reported as an empty snapshot.
    pub fn storage_info(&self) -> StorageInfo {
        let blob = match self.backend.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return StorageInfo::default(),
            Err(err) => {
                error!("event=storage_info module=storage status=error error={err}");
                return StorageInfo::default();
            }
        };

        match serde_json::from_str::<Vec<serde_json::Value>>(&blob) {
            Ok(items) => StorageInfo {
                size_in_bytes: blob.len(),
                item_count: items.len(),
            },
            Err(err) => {
                warn!(
                    "event=storage_info module=storage status=error error_code=malformed_blob error={err}"
                );
                StorageInfo::default()
            }
        }
    }
}
