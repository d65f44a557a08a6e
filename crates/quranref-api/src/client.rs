//! HTTP client for the QuranRef corpus API.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use quranref_model::{AyaResult, Bookmark, BookmarksList, SurahInfo, TextTypeCatalog, UserInfo};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// Client for the QuranRef API.
///
/// Built with a cookie store so the auth session cookie set by the login
/// flow rides on every request; dropping the cookies would silently sign
/// the user out between calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: String,
}

#[derive(Deserialize)]
struct MeResponse {
    user: Option<UserInfo>,
}

impl ApiClient {
    /// Creates a client for the given configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Issues a GET and decodes the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    /// Issues a POST with an optional JSON body and decodes the response.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    async fn send_for_status(&self, request: reqwest::RequestBuilder) -> Result<()> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        response.json().await.map_err(|e| ApiError::Json(e.to_string()))
    }

    // --- Corpus reference data ---

    /// All surahs with their metadata.
    pub async fn surahs(&self) -> Result<Vec<SurahInfo>> {
        self.get("/surahs").await
    }

    /// The text-type catalog: available translations per language plus the
    /// Arabic script variants under the reserved `arabic` key.
    pub async fn text_types(&self) -> Result<TextTypeCatalog> {
        self.get("/text-types").await
    }

    /// The Arabic alphabet as used for word browsing.
    pub async fn letters(&self) -> Result<Vec<String>> {
        self.get("/letters").await
    }

    /// Words starting with the given letter, with occurrence counts.
    pub async fn words_by_letter(&self, letter: &str) -> Result<Vec<(String, u64)>> {
        self.get(&format!("/words-by-letter/{letter}")).await
    }

    /// Ayas containing the given word, rendered in the requested
    /// languages.
    ///
    /// `languages` is the wire spec used for translation-filtered
    /// queries: `language:variant` items joined by `_`, e.g.
    /// `arabic:simple_urdu:maududi`.
    pub async fn ayas_by_word(&self, word: &str, languages: &str) -> Result<Vec<AyaResult>> {
        self.get(&format!("/ayas-by-word/{word}/{languages}")).await
    }

    // --- Auth session ---

    /// The currently signed-in user, or `None` when the session cookie is
    /// absent or expired. The endpoint never answers 401.
    pub async fn me(&self) -> Result<Option<UserInfo>> {
        let response: MeResponse = self.get("/auth/me").await?;
        Ok(response.user)
    }

    /// Absolute URL of the login endpoint.
    ///
    /// Logging in is a browser navigation (OAuth redirect chain), not a
    /// JSON request, so the gateway only hands out the target.
    #[must_use]
    pub fn login_url(&self) -> String {
        self.url("/auth/login")
    }

    /// Ends the server-side session. Any 2xx counts as success; the body
    /// is ignored.
    pub async fn logout(&self) -> Result<()> {
        let url = self.url("/auth/logout");
        tracing::debug!("POST {}", url);
        self.send_for_status(self.client.post(&url)).await
    }

    // --- Bookmarks ---

    /// All bookmarks for the signed-in user.
    pub async fn bookmarks(&self) -> Result<BookmarksList> {
        self.get("/bookmarks").await
    }

    /// Sets or replaces the reading-position bookmark.
    pub async fn put_reading_bookmark(&self, aya_key: &str) -> Result<Bookmark> {
        let url = self.url("/bookmarks/reading");
        tracing::debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .json(&json!({ "aya_key": aya_key }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    /// Removes the reading-position bookmark.
    pub async fn delete_reading_bookmark(&self) -> Result<()> {
        let url = self.url("/bookmarks/reading");
        tracing::debug!("DELETE {}", url);
        self.send_for_status(self.client.delete(&url)).await
    }

    /// Adds a note bookmark for the given aya.
    pub async fn add_note_bookmark(&self, aya_key: &str, note: &str) -> Result<Bookmark> {
        self.post(
            "/bookmarks/notes",
            Some(&json!({ "aya_key": aya_key, "note": note })),
        )
        .await
    }

    /// Replaces the text of an existing note bookmark.
    pub async fn update_note_bookmark(&self, id: i64, note: &str) -> Result<Bookmark> {
        let url = self.url(&format!("/bookmarks/notes/{id}"));
        tracing::debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .json(&json!({ "note": note }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    /// Deletes a note bookmark.
    pub async fn delete_note_bookmark(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("/bookmarks/notes/{id}"));
        tracing::debug!("DELETE {}", url);
        self.send_for_status(self.client.delete(&url)).await
    }
}
