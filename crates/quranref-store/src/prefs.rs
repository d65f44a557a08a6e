//! Persisted preference cells.
//!
//! A [`PrefCell`] binds one named value to the durable key-value
//! substrate with read-through and synchronous write-through. Cells
//! sharing a key never diverge because reads go back to the substrate;
//! when the substrate is unavailable, the last in-memory value stays
//! authoritative for the session.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex, PoisonError};

use crate::storage::Storage;

/// Durable key for the Arabic script variant preference.
pub const ARABIC_TEXT_TYPE_KEY: &str = "quranref-arabic-text-type";

/// Durable key for the selected translations list.
pub const SELECTED_TRANSLATIONS_KEY: &str = "quranref-selected-translations";

/// Durable key for the dark mode flag. Absence of this key is what
/// triggers first-run seeding from the ambient scheme.
pub const DARK_MODE_KEY: &str = "quranref-dark-mode";

/// A single named value backed by durable storage.
pub struct PrefCell<T> {
    storage: Arc<dyn Storage>,
    key: String,
    current: Mutex<T>,
}

impl<T> PrefCell<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Binds `key` in `storage`.
    ///
    /// When the substrate has no entry for `key` the cell starts at
    /// `default` and the substrate is seeded with it immediately; an
    /// existing entry is loaded verbatim and `default` is ignored.
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let stored = match storage.read(&key) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Failed to read preference '{}': {}", key, e);
                None
            }
        };

        let initial = stored
            .and_then(|value| match serde_json::from_value(value) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Stored preference '{}' has unexpected shape: {}", key, e);
                    None
                }
            })
            .unwrap_or_else(|| {
                persist(storage.as_ref(), &key, &default);
                default
            });

        Self {
            storage,
            key,
            current: Mutex::new(initial),
        }
    }

    /// The current value.
    ///
    /// Re-reads the substrate so writes through other cells bound to the
    /// same key are visible; falls back to the in-memory value when the
    /// substrate fails or holds an undecodable entry.
    pub fn get(&self) -> T {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);

        if let Ok(Some(value)) = self.storage.read(&self.key)
            && let Ok(value) = serde_json::from_value::<T>(value)
        {
            *current = value;
        }
        current.clone()
    }

    /// Replaces the value, writing through to the substrate.
    ///
    /// Persistence failures are logged and swallowed; the in-memory
    /// value is updated regardless.
    pub fn set(&self, value: T) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = value.clone();
        drop(current);

        persist(self.storage.as_ref(), &self.key, &value);
    }
}

fn persist<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) {
    let json = match serde_json::to_value(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to serialize preference '{}': {}", key, e);
            return;
        }
    };
    if let Err(e) = storage.write(key, &json) {
        tracing::warn!("Failed to persist preference '{}': {}", key, e);
    }
}
