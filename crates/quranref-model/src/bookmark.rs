use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of bookmark: the single reading position or a per-aya note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkType {
    Reading,
    Note,
}

impl fmt::Display for BookmarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkType::Reading => write!(f, "reading"),
            BookmarkType::Note => write!(f, "note"),
        }
    }
}

/// A server-side bookmark record for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub bookmark_type: BookmarkType,
    /// Aya position in `surah:aya` form.
    pub aya_key: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// All bookmarks for the current user: at most one reading position plus
/// any number of notes, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarksList {
    pub reading: Option<Bookmark>,
    pub notes: Vec<Bookmark>,
}
