//! Gateway configuration.

use serde::{Deserialize, Serialize};

/// Base URL used when none is configured.
///
/// Points at a locally running QuranRef backend with its `/api/v1` route
/// prefix.
pub const DEFAULT_BASE_URL: &str = "http://localhost:41148/api/v1";

/// Environment variable consulted by [`ApiConfig::from_env`].
pub const BASE_URL_ENV: &str = "QURANREF_API_URL";

/// Configuration for the API gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is resolved against, including the API
    /// route prefix (e.g. `https://quranref.info/api/v1`).
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Configuration pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Configuration from the `QURANREF_API_URL` environment variable,
    /// falling back to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}
