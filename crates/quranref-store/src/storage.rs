//! Durable key-value substrate for preferences.
//!
//! Preferences live in a single JSON object file in the platform config
//! directory:
//! - macOS: ~/Library/Application Support/com.quranref.QuranRef/
//! - Windows: %APPDATA%/quranref/config/
//! - Linux: ~/.config/quranref/

use directories::ProjectDirs;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "quranref";
const APP_NAME: &str = "QuranRef";
const PREFS_FILENAME: &str = "preferences.json";

/// Error from the durable substrate.
///
/// Preference writes are best-effort: callers log these and keep the
/// in-memory value authoritative for the session.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Platform config directory could not be determined.
    #[error("no configuration directory available")]
    ConfigDirUnavailable,

    /// File I/O failed.
    #[error("failed to {operation} preference store: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store contents could not be serialized.
    #[error("failed to serialize preference store")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Synchronous key-value storage for preference values.
///
/// Writes to different keys do not interact; there are no transactions.
pub trait Storage: Send + Sync {
    /// The stored value for `key`, or `None` when no entry exists.
    fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn write(&self, key: &str, value: &Value) -> Result<()>;
}

/// Storage backed by a JSON object file, read and rewritten per
/// operation so separate handles never see stale data.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at the platform-specific preferences path.
    pub fn in_config_dir() -> Result<Self> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .ok_or(StorageError::ConfigDirUnavailable)?;
        Ok(Self {
            path: dirs.config_dir().join(PREFS_FILENAME),
        })
    }

    /// Storage at an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file all preferences are stored in.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn load_map(&self) -> Result<HashMap<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(StorageError::Io {
                    operation: "read",
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(
                    "Preference store at {:?} is not valid JSON ({}), starting fresh",
                    self.path,
                    e
                );
                Ok(HashMap::new())
            }
        }
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load_map()?.remove(key))
    }

    fn write(&self, key: &str, value: &Value) -> Result<()> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), value.clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                operation: "create directory for",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(&map)
            .map_err(|e| StorageError::Serialization { source: e })?;
        fs::write(&self.path, content).map_err(|e| StorageError::Io {
            operation: "write",
            path: self.path.clone(),
            source: e,
        })
    }
}

/// In-process storage for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        let map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(key).cloned())
    }

    fn write(&self, key: &str, value: &Value) -> Result<()> {
        let mut map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_string(), value.clone());
        Ok(())
    }
}
