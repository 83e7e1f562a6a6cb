//! Session configuration for the showcase core.
//!
//! # Invariants
//! - `storage_key` is a lowercase identifier (`[a-z0-9][a-z0-9_.-]*`).
//! - `log_level` is accepted by `init_logging`.

use crate::logging::{default_log_level, init_logging, normalize_level};
use crate::storage::DEFAULT_STORAGE_KEY;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static STORAGE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_.\-]*$").expect("valid storage key regex"));

/// Configuration rejected by [`ShowcaseConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidStorageKey(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStorageKey(key) => write!(f, "invalid storage key: `{key}`"),
            Self::InvalidLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Options chosen once per application session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseConfig {
    /// Key holding the serialized collection in the key-value backend.
    pub storage_key: String,
    /// When `false`, the store never touches the backend.
    pub persistence_enabled: bool,
    /// Level applied by [`ShowcaseConfig::start_logging`].
    pub log_level: String,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persistence_enabled: true,
            log_level: default_log_level().to_string(),
        }
    }
}

impl ShowcaseConfig {
    /// In-memory only session, no persistence.
    pub fn ephemeral() -> Self {
        Self {
            persistence_enabled: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !STORAGE_KEY_RE.is_match(&self.storage_key) {
            return Err(ConfigError::InvalidStorageKey(self.storage_key.clone()));
        }
        normalize_level(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))?;
        Ok(())
    }

    /// Starts core logging at `log_level` into absolute directory `log_dir`.
    ///
    /// # Errors
    /// Same as [`init_logging`].
    pub fn start_logging(&self, log_dir: &str) -> Result<(), String> {
        init_logging(&self.log_level, log_dir)
    }
}
