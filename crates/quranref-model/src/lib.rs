pub mod aya;
pub mod bookmark;
pub mod surah;
pub mod text_types;
pub mod user;

pub use aya::{AyaKey, AyaResult};
pub use bookmark::{Bookmark, BookmarkType, BookmarksList};
pub use surah::{NuzoolLocation, SurahInfo};
pub use text_types::{ARABIC_KEY, TextTypeCatalog, Translation};
pub use user::UserInfo;
