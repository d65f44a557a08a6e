//! Injectable port over the remote API.
//!
//! Store actions talk to this trait rather than to [`ApiClient`]
//! directly so tests can substitute scripted gateways.

use async_trait::async_trait;

use quranref_api::{ApiClient, Result};
use quranref_model::{Bookmark, BookmarksList, SurahInfo, TextTypeCatalog, UserInfo};

/// The subset of the remote API the store drives.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn surahs(&self) -> Result<Vec<SurahInfo>>;
    async fn text_types(&self) -> Result<TextTypeCatalog>;
    async fn me(&self) -> Result<Option<UserInfo>>;
    fn login_url(&self) -> String;
    async fn logout(&self) -> Result<()>;
    async fn bookmarks(&self) -> Result<BookmarksList>;
    async fn put_reading_bookmark(&self, aya_key: &str) -> Result<Bookmark>;
    async fn delete_reading_bookmark(&self) -> Result<()>;
    async fn add_note_bookmark(&self, aya_key: &str, note: &str) -> Result<Bookmark>;
    async fn update_note_bookmark(&self, id: i64, note: &str) -> Result<Bookmark>;
    async fn delete_note_bookmark(&self, id: i64) -> Result<()>;
}

#[async_trait]
impl Gateway for ApiClient {
    async fn surahs(&self) -> Result<Vec<SurahInfo>> {
        ApiClient::surahs(self).await
    }

    async fn text_types(&self) -> Result<TextTypeCatalog> {
        ApiClient::text_types(self).await
    }

    async fn me(&self) -> Result<Option<UserInfo>> {
        ApiClient::me(self).await
    }

    fn login_url(&self) -> String {
        ApiClient::login_url(self)
    }

    async fn logout(&self) -> Result<()> {
        ApiClient::logout(self).await
    }

    async fn bookmarks(&self) -> Result<BookmarksList> {
        ApiClient::bookmarks(self).await
    }

    async fn put_reading_bookmark(&self, aya_key: &str) -> Result<Bookmark> {
        ApiClient::put_reading_bookmark(self, aya_key).await
    }

    async fn delete_reading_bookmark(&self) -> Result<()> {
        ApiClient::delete_reading_bookmark(self).await
    }

    async fn add_note_bookmark(&self, aya_key: &str, note: &str) -> Result<Bookmark> {
        ApiClient::add_note_bookmark(self, aya_key, note).await
    }

    async fn update_note_bookmark(&self, id: i64, note: &str) -> Result<Bookmark> {
        ApiClient::update_note_bookmark(self, id, note).await
    }

    async fn delete_note_bookmark(&self, id: i64) -> Result<()> {
        ApiClient::delete_note_bookmark(self, id).await
    }
}
