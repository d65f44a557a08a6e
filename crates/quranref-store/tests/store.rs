//! Store behavior against scripted gateways.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use quranref_api::{ApiError, Result};
use quranref_model::{
    AyaKey, Bookmark, BookmarkType, BookmarksList, NuzoolLocation, SurahInfo, TextTypeCatalog,
    Translation, UserInfo,
};
use quranref_store::{
    AmbientScheme, DARK_MODE_KEY, Gateway, MemoryStorage, Storage, Store, StoreEvent, ThemeSink,
};

fn surah(number: u32, english_name: &str, total_ayas: u32) -> SurahInfo {
    SurahInfo {
        key: number.to_string(),
        surah_number: number,
        arabic_name: format!("surah {number}"),
        english_name: english_name.to_string(),
        translated_name: english_name.to_string(),
        nuzool_location: NuzoolLocation::Meccan,
        nuzool_order: number,
        rukus: 1,
        total_ayas,
    }
}

fn user() -> UserInfo {
    UserInfo {
        id: 7,
        email: "reader@example.com".to_string(),
        name: "Reader".to_string(),
        picture_url: String::new(),
    }
}

fn note(id: i64, aya_key: &str, note: &str) -> Bookmark {
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    Bookmark {
        id,
        bookmark_type: BookmarkType::Note,
        aya_key: aya_key.to_string(),
        note: note.to_string(),
        created_at: at,
        updated_at: at,
    }
}

fn reading(aya_key: &str) -> Bookmark {
    Bookmark {
        bookmark_type: BookmarkType::Reading,
        ..note(1, aya_key, "")
    }
}

fn catalog() -> TextTypeCatalog {
    [
        ("arabic".to_string(), vec!["simple".to_string(), "uthmani".to_string()]),
        ("urdu".to_string(), vec!["maududi".to_string()]),
        (
            "english".to_string(),
            vec!["pickthall".to_string(), "yusufali".to_string()],
        ),
    ]
    .into_iter()
    .collect()
}

/// How a scripted gateway should fail.
#[derive(Clone, Copy)]
enum Fail {
    Transport,
    Http(u16),
}

impl Fail {
    fn error(self) -> ApiError {
        match self {
            Fail::Transport => ApiError::Transport("connection refused".to_string()),
            Fail::Http(status) => ApiError::Http { status },
        }
    }
}

/// Happy-path gateway with optional per-endpoint failures.
#[derive(Default)]
struct FixtureGateway {
    user: Option<UserInfo>,
    logout_failure: Option<Fail>,
    fail_next_surahs: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl Gateway for FixtureGateway {
    async fn surahs(&self) -> Result<Vec<SurahInfo>> {
        if self.fail_next_surahs.swap(false, Ordering::SeqCst) {
            return Err(Fail::Http(500).error());
        }
        Ok(vec![surah(1, "Al-Faatiha", 7), surah(2, "Al-Baqara", 286)])
    }

    async fn text_types(&self) -> Result<TextTypeCatalog> {
        Ok(catalog())
    }

    async fn me(&self) -> Result<Option<UserInfo>> {
        Ok(self.user.clone())
    }

    fn login_url(&self) -> String {
        "http://localhost:41148/api/v1/auth/login".to_string()
    }

    async fn logout(&self) -> Result<()> {
        match self.logout_failure {
            Some(fail) => Err(fail.error()),
            None => Ok(()),
        }
    }

    async fn bookmarks(&self) -> Result<BookmarksList> {
        Ok(BookmarksList {
            reading: Some(reading("2:255")),
            notes: vec![note(10, "1:1", "opening")],
        })
    }

    async fn put_reading_bookmark(&self, aya_key: &str) -> Result<Bookmark> {
        Ok(reading(aya_key))
    }

    async fn delete_reading_bookmark(&self) -> Result<()> {
        Ok(())
    }

    async fn add_note_bookmark(&self, aya_key: &str, text: &str) -> Result<Bookmark> {
        Ok(note(11, aya_key, text))
    }

    async fn update_note_bookmark(&self, id: i64, text: &str) -> Result<Bookmark> {
        Ok(note(id, "1:1", text))
    }

    async fn delete_note_bookmark(&self, _id: i64) -> Result<()> {
        Ok(())
    }
}

/// Gateway where every endpoint fails the same way.
struct FailingGateway(Fail);

#[async_trait]
impl Gateway for FailingGateway {
    async fn surahs(&self) -> Result<Vec<SurahInfo>> {
        Err(self.0.error())
    }

    async fn text_types(&self) -> Result<TextTypeCatalog> {
        Err(self.0.error())
    }

    async fn me(&self) -> Result<Option<UserInfo>> {
        Err(self.0.error())
    }

    fn login_url(&self) -> String {
        String::new()
    }

    async fn logout(&self) -> Result<()> {
        Err(self.0.error())
    }

    async fn bookmarks(&self) -> Result<BookmarksList> {
        Err(self.0.error())
    }

    async fn put_reading_bookmark(&self, _aya_key: &str) -> Result<Bookmark> {
        Err(self.0.error())
    }

    async fn delete_reading_bookmark(&self) -> Result<()> {
        Err(self.0.error())
    }

    async fn add_note_bookmark(&self, _aya_key: &str, _note: &str) -> Result<Bookmark> {
        Err(self.0.error())
    }

    async fn update_note_bookmark(&self, _id: i64, _note: &str) -> Result<Bookmark> {
        Err(self.0.error())
    }

    async fn delete_note_bookmark(&self, _id: i64) -> Result<()> {
        Err(self.0.error())
    }
}

/// Gateway whose first `surahs` call resolves slowly, after later ones.
struct StaggeredGateway {
    calls: AtomicUsize,
}

#[async_trait]
impl Gateway for StaggeredGateway {
    async fn surahs(&self) -> Result<Vec<SurahInfo>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(vec![surah(1, "Al-Faatiha", 7), surah(2, "Al-Baqara", 286)])
        } else {
            Ok(vec![surah(114, "An-Naas", 6)])
        }
    }

    async fn text_types(&self) -> Result<TextTypeCatalog> {
        Ok(TextTypeCatalog::default())
    }

    async fn me(&self) -> Result<Option<UserInfo>> {
        Ok(None)
    }

    fn login_url(&self) -> String {
        String::new()
    }

    async fn logout(&self) -> Result<()> {
        Ok(())
    }

    async fn bookmarks(&self) -> Result<BookmarksList> {
        Ok(BookmarksList::default())
    }

    async fn put_reading_bookmark(&self, aya_key: &str) -> Result<Bookmark> {
        Ok(reading(aya_key))
    }

    async fn delete_reading_bookmark(&self) -> Result<()> {
        Ok(())
    }

    async fn add_note_bookmark(&self, aya_key: &str, text: &str) -> Result<Bookmark> {
        Ok(note(11, aya_key, text))
    }

    async fn update_note_bookmark(&self, id: i64, text: &str) -> Result<Bookmark> {
        Ok(note(id, "1:1", text))
    }

    async fn delete_note_bookmark(&self, _id: i64) -> Result<()> {
        Ok(())
    }
}

struct FixedAmbient(bool);

impl AmbientScheme for FixedAmbient {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// Theme sink recording every applied state.
#[derive(Default)]
struct RecordingTheme(Mutex<Vec<bool>>);

impl ThemeSink for RecordingTheme {
    fn apply(&self, dark: bool) {
        self.0.lock().unwrap().push(dark);
    }
}

fn fixture_store() -> Store {
    Store::new(
        Arc::new(FixtureGateway::default()),
        Arc::new(MemoryStorage::new()),
    )
}

// --- Selected translations ---

#[test]
fn add_translation_ignores_duplicates() {
    let store = fixture_store();
    store.add_translation(Translation::new("urdu", "maududi"));
    store.add_translation(Translation::new("english", "pickthall"));
    store.add_translation(Translation::new("urdu", "maududi"));

    assert_eq!(
        store.selected_translations(),
        vec![
            Translation::new("urdu", "maududi"),
            Translation::new("english", "pickthall"),
        ]
    );
}

#[test]
fn remove_translation_is_a_noop_out_of_range() {
    let store = fixture_store();
    store.add_translation(Translation::new("urdu", "maududi"));
    store.add_translation(Translation::new("english", "pickthall"));

    store.remove_translation(1);
    store.remove_translation(1);
    store.remove_translation(usize::MAX);

    assert_eq!(
        store.selected_translations(),
        vec![Translation::new("urdu", "maududi")]
    );
}

#[test]
fn selected_translations_string_uses_wire_form() {
    let store = fixture_store();
    assert_eq!(store.selected_translations_string(), "");

    store.add_translation(Translation::new("urdu", "maududi"));
    store.add_translation(Translation::new("english", "pickthall"));
    assert_eq!(
        store.selected_translations_string(),
        "urdu:maududi_english:pickthall"
    );
}

#[test]
fn display_languages_spec_leads_with_arabic_variant() {
    let store = fixture_store();
    assert_eq!(store.display_languages_spec(), "arabic:simple");

    store.set_arabic_text_type("uthmani");
    store.add_translation(Translation::new("urdu", "maududi"));
    assert_eq!(store.display_languages_spec(), "arabic:uthmani_urdu:maududi");
}

#[test]
fn translations_persist_across_store_instances() {
    let storage = Arc::new(MemoryStorage::new());
    let store = Store::new(Arc::new(FixtureGateway::default()), storage.clone());
    store.add_translation(Translation::new("urdu", "maududi"));
    drop(store);

    let store = Store::new(Arc::new(FixtureGateway::default()), storage);
    assert_eq!(
        store.selected_translations(),
        vec![Translation::new("urdu", "maududi")]
    );
}

// --- Reference data loaders ---

#[tokio::test]
async fn load_text_types_splits_catalog() {
    let store = fixture_store();
    store.load_text_types().await;

    assert_eq!(store.available_text_types(), ["simple", "uthmani"]);
    assert_eq!(
        store.available_translations(),
        vec![
            Translation::new("urdu", "maududi"),
            Translation::new("english", "pickthall"),
            Translation::new("english", "yusufali"),
        ]
    );
    assert!(!store.loading().text_types);
}

#[tokio::test]
async fn load_surah_info_replaces_collection() {
    let store = fixture_store();
    store.load_surah_info().await;

    let surahs = store.surah_info();
    assert_eq!(surahs.len(), 2);
    assert_eq!(surahs[0].surah_number, 1);
    assert!(!store.loading().surahs);
}

#[tokio::test]
async fn failed_load_leaves_prior_data_untouched() {
    let gateway = Arc::new(FixtureGateway::default());
    let store = Store::new(gateway.clone(), Arc::new(MemoryStorage::new()));
    store.load_surah_info().await;
    assert_eq!(store.surah_info().len(), 2);

    gateway.fail_next_surahs.store(true, Ordering::SeqCst);
    store.load_surah_info().await;

    assert_eq!(store.surah_info().len(), 2);
    assert!(!store.loading().surahs);
}

#[tokio::test]
async fn failed_loads_never_populate_empty_state() {
    let store = Store::new(
        Arc::new(FailingGateway(Fail::Http(500))),
        Arc::new(MemoryStorage::new()),
    );
    store.load_surah_info().await;
    store.load_text_types().await;

    assert!(store.surah_info().is_empty());
    assert!(store.available_text_types().is_empty());
    assert!(store.available_translations().is_empty());
    let flags = store.loading();
    assert!(!flags.surahs && !flags.text_types);
}

#[tokio::test]
async fn overlapping_surah_loads_settle_cleanly() {
    let store = Arc::new(Store::new(
        Arc::new(StaggeredGateway {
            calls: AtomicUsize::new(0),
        }),
        Arc::new(MemoryStorage::new()),
    ));

    let slow = {
        let store = store.clone();
        tokio::spawn(async move { store.load_surah_info().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(store.loading().surahs);

    let fast = {
        let store = store.clone();
        tokio::spawn(async move { store.load_surah_info().await })
    };

    slow.await.expect("slow load");
    fast.await.expect("fast load");

    // The slow first call resolves last and overwrites wholesale.
    let surahs = store.surah_info();
    assert_eq!(surahs.len(), 2);
    assert_eq!(surahs[0].surah_number, 1);
    assert!(!store.loading().surahs);
}

// --- Auth session ---

#[tokio::test]
async fn check_auth_sets_reported_user() {
    let store = Store::new(
        Arc::new(FixtureGateway {
            user: Some(user()),
            ..FixtureGateway::default()
        }),
        Arc::new(MemoryStorage::new()),
    );
    store.check_auth().await;

    assert_eq!(store.current_user(), Some(user()));
    assert!(!store.loading().auth);
}

#[tokio::test]
async fn check_auth_fails_closed_on_transport_error() {
    let store = Store::new(
        Arc::new(FailingGateway(Fail::Transport)),
        Arc::new(MemoryStorage::new()),
    );
    store.check_auth().await;

    assert_eq!(store.current_user(), None);
    assert!(!store.loading().auth);
}

#[tokio::test]
async fn logout_clears_session_even_when_server_rejects() {
    let store = Store::new(
        Arc::new(FixtureGateway {
            user: Some(user()),
            logout_failure: Some(Fail::Http(500)),
            ..FixtureGateway::default()
        }),
        Arc::new(MemoryStorage::new()),
    );
    store.check_auth().await;
    assert!(store.current_user().is_some());

    store.logout().await;
    assert_eq!(store.current_user(), None);
    assert!(!store.loading().auth);
}

#[tokio::test]
async fn logout_keeps_session_on_transport_failure() {
    let store = Store::new(
        Arc::new(FixtureGateway {
            user: Some(user()),
            logout_failure: Some(Fail::Transport),
            ..FixtureGateway::default()
        }),
        Arc::new(MemoryStorage::new()),
    );
    store.check_auth().await;

    store.logout().await;
    assert_eq!(store.current_user(), Some(user()));
    assert!(!store.loading().auth);
}

#[test]
fn login_exposes_navigation_target() {
    let store = fixture_store();
    assert!(store.login().ends_with("/auth/login"));
}

// --- Bookmarks ---

#[tokio::test]
async fn bookmark_actions_update_cache() {
    let store = fixture_store();
    store.load_bookmarks().await;

    let bookmarks = store.bookmarks().expect("bookmarks loaded");
    assert_eq!(bookmarks.reading.as_ref().map(|b| b.aya_key.as_str()), Some("2:255"));
    assert_eq!(bookmarks.notes.len(), 1);

    store
        .add_note_bookmark(AyaKey::new(2, 255), "throne verse")
        .await;
    let bookmarks = store.bookmarks().expect("bookmarks cached");
    assert_eq!(bookmarks.notes.len(), 2);
    assert_eq!(bookmarks.notes[0].note, "throne verse");

    store.update_note_bookmark(10, "revised").await;
    let bookmarks = store.bookmarks().expect("bookmarks cached");
    assert_eq!(
        bookmarks.notes.iter().find(|n| n.id == 10).map(|n| n.note.as_str()),
        Some("revised")
    );

    store.remove_note_bookmark(10).await;
    assert_eq!(store.bookmarks().expect("bookmarks cached").notes.len(), 1);

    store.set_reading_bookmark(AyaKey::new(3, 1)).await;
    assert_eq!(
        store
            .bookmarks()
            .and_then(|b| b.reading)
            .map(|b| b.aya_key),
        Some("3:1".to_string())
    );

    store.clear_reading_bookmark().await;
    assert!(store.bookmarks().expect("bookmarks cached").reading.is_none());
}

#[tokio::test]
async fn failed_bookmark_actions_leave_cache_untouched() {
    let store = Store::new(
        Arc::new(FailingGateway(Fail::Http(401))),
        Arc::new(MemoryStorage::new()),
    );

    store.load_bookmarks().await;
    store.set_reading_bookmark(AyaKey::new(1, 1)).await;
    store.add_note_bookmark(AyaKey::new(1, 1), "note").await;
    store.remove_note_bookmark(1).await;

    assert!(store.bookmarks().is_none());
    assert!(!store.loading().bookmarks);
}

#[tokio::test]
async fn logout_drops_cached_bookmarks() {
    let store = Store::new(
        Arc::new(FixtureGateway {
            user: Some(user()),
            ..FixtureGateway::default()
        }),
        Arc::new(MemoryStorage::new()),
    );
    store.load_bookmarks().await;
    assert!(store.bookmarks().is_some());

    store.logout().await;
    assert!(store.bookmarks().is_none());
}

// --- Dark mode ---

#[test]
fn first_run_seeds_dark_mode_from_ambient_signal() {
    let storage = Arc::new(MemoryStorage::new());
    let theme = Arc::new(RecordingTheme::default());
    let store = Store::with_environment(
        Arc::new(FixtureGateway::default()),
        storage.clone(),
        &FixedAmbient(true),
        Box::new(SharedTheme(theme.clone())),
    );

    assert!(store.dark_mode());
    assert_eq!(
        storage.read(DARK_MODE_KEY).expect("read"),
        Some(serde_json::Value::Bool(true))
    );
    assert_eq!(*theme.0.lock().unwrap(), vec![true]);

    assert!(!store.toggle_dark_mode());
    assert!(!store.dark_mode());
    assert_eq!(
        storage.read(DARK_MODE_KEY).expect("read"),
        Some(serde_json::Value::Bool(false))
    );
    assert_eq!(*theme.0.lock().unwrap(), vec![true, false]);

    // A fresh store against the same storage ignores the ambient signal.
    let store = Store::with_environment(
        Arc::new(FixtureGateway::default()),
        storage,
        &FixedAmbient(true),
        Box::new(quranref_store::NoopTheme),
    );
    assert!(!store.dark_mode());
}

/// Wrapper so a test can keep a handle on the sink it hands to the store.
struct SharedTheme(Arc<RecordingTheme>);

impl ThemeSink for SharedTheme {
    fn apply(&self, dark: bool) {
        self.0.apply(dark);
    }
}

// --- Events ---

#[test]
fn mutations_notify_subscribers() {
    let store = fixture_store();
    let events = store.subscribe();

    store.add_translation(Translation::new("urdu", "maududi"));
    store.set_arabic_text_type("uthmani");
    store.toggle_dark_mode();

    assert_eq!(events.try_recv(), Ok(StoreEvent::TranslationsChanged));
    assert_eq!(events.try_recv(), Ok(StoreEvent::ArabicTextTypeChanged));
    assert_eq!(events.try_recv(), Ok(StoreEvent::DarkModeChanged(true)));
    assert!(events.try_recv().is_err());
}

#[test]
fn duplicate_translation_add_does_not_notify() {
    let store = fixture_store();
    store.add_translation(Translation::new("urdu", "maududi"));

    let events = store.subscribe();
    store.add_translation(Translation::new("urdu", "maududi"));
    assert!(events.try_recv().is_err());
}

// --- Properties ---

mod properties {
    use super::*;
    use proptest::prelude::*;

    const LANGUAGES: [&str; 3] = ["urdu", "english", "french"];
    const TRANSLATORS: [&str; 3] = ["a", "b", "c"];

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, usize),
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..LANGUAGES.len(), 0..TRANSLATORS.len()).prop_map(|(l, t)| Op::Add(l, t)),
            (0..10usize).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn selected_translations_stay_duplicate_free(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let store = fixture_store();
            let mut model: Vec<Translation> = Vec::new();

            for op in ops {
                match op {
                    Op::Add(l, t) => {
                        let translation = Translation::new(LANGUAGES[l], TRANSLATORS[t]);
                        if !model.contains(&translation) {
                            model.push(translation.clone());
                        }
                        store.add_translation(translation);
                    }
                    Op::Remove(index) => {
                        if index < model.len() {
                            model.remove(index);
                        }
                        store.remove_translation(index);
                    }
                }

                let selected = store.selected_translations();
                prop_assert_eq!(&selected, &model);
                for (i, a) in selected.iter().enumerate() {
                    for b in &selected[i + 1..] {
                        prop_assert_ne!(a, b);
                    }
                }
            }
        }
    }
}
