//! Application state store for the QuranRef client.
//!
//! The [`Store`] caches reference data (surahs, the text-type catalog),
//! tracks display preferences with durable persistence, and mediates the
//! auth session. Frontends drive it through action methods and observe
//! it through snapshot getters plus a change-event channel.
//!
//! # Architecture
//!
//! - `storage` - durable key-value substrate ([`Storage`],
//!   [`FileStorage`], [`MemoryStorage`])
//! - `prefs` - [`PrefCell`]: one named value with read-through and
//!   best-effort write-through
//! - `gateway` - injectable port over the remote API
//! - `events` - change notification ([`StoreEvent`])
//! - `theme` - ambient scheme and theme-sink ports
//! - `store` - the store itself

mod events;
mod gateway;
mod prefs;
mod storage;
mod store;
mod theme;

pub use events::StoreEvent;
pub use gateway::Gateway;
pub use prefs::{
    ARABIC_TEXT_TYPE_KEY, DARK_MODE_KEY, PrefCell, SELECTED_TRANSLATIONS_KEY,
};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{DEFAULT_ARABIC_TEXT_TYPE, LoadingFlags, Store};
pub use theme::{AmbientScheme, LightAmbient, NoopTheme, ThemeSink};
