//! The application store.
//!
//! Owns all cached reference data, preference cells, and the auth
//! session. Actions call the gateway asynchronously and reconcile
//! results into state; failures are logged at the action boundary and
//! never propagate to callers. State lives behind a mutex that is never
//! held across an await point, so concurrent action invocations are
//! safe; the last response to resolve wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::Receiver;

use quranref_model::{AyaKey, BookmarksList, SurahInfo, Translation, UserInfo};

use crate::events::{EventHub, StoreEvent};
use crate::gateway::Gateway;
use crate::prefs::{ARABIC_TEXT_TYPE_KEY, DARK_MODE_KEY, PrefCell, SELECTED_TRANSLATIONS_KEY};
use crate::storage::Storage;
use crate::theme::{AmbientScheme, LightAmbient, NoopTheme, ThemeSink};

/// Arabic text type used until the user picks one.
pub const DEFAULT_ARABIC_TEXT_TYPE: &str = "simple";

/// In-flight request flags, one per async resource.
///
/// Under overlapping invocations of the same loader the flag is
/// last-writer-wins; it approximates "at least one call in flight".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub surahs: bool,
    pub text_types: bool,
    pub auth: bool,
    pub bookmarks: bool,
}

#[derive(Default)]
struct StoreState {
    surah_info: Vec<SurahInfo>,
    available_text_types: Vec<String>,
    available_translations: Vec<Translation>,
    current_user: Option<UserInfo>,
    bookmarks: Option<BookmarksList>,
    loading: LoadingFlags,
}

/// Central state and coordination for a QuranRef frontend.
///
/// Constructed once per application instance and shared via `Arc`;
/// frontends mutate state only through the action methods and read it
/// through snapshot getters.
pub struct Store {
    gateway: Arc<dyn Gateway>,
    state: Mutex<StoreState>,
    arabic_text_type: PrefCell<String>,
    selected_translations: PrefCell<Vec<Translation>>,
    dark_mode: PrefCell<bool>,
    theme: Box<dyn ThemeSink>,
    events: EventHub,
}

impl Store {
    /// Store with the default presentation environment (light ambient,
    /// no theme sink).
    pub fn new(gateway: Arc<dyn Gateway>, storage: Arc<dyn Storage>) -> Self {
        Self::with_environment(gateway, storage, &LightAmbient, Box::new(NoopTheme))
    }

    /// Store with an injected ambient scheme and theme sink.
    ///
    /// The ambient scheme is consulted only when no dark-mode preference
    /// has ever been persisted; the resulting value is itself persisted,
    /// so the ambient signal is read at most once per profile. The theme
    /// sink receives the effective state immediately.
    pub fn with_environment(
        gateway: Arc<dyn Gateway>,
        storage: Arc<dyn Storage>,
        ambient: &dyn AmbientScheme,
        theme: Box<dyn ThemeSink>,
    ) -> Self {
        let arabic_text_type = PrefCell::new(
            storage.clone(),
            ARABIC_TEXT_TYPE_KEY,
            DEFAULT_ARABIC_TEXT_TYPE.to_string(),
        );
        let selected_translations =
            PrefCell::new(storage.clone(), SELECTED_TRANSLATIONS_KEY, Vec::new());

        let dark_seeded = matches!(storage.read(DARK_MODE_KEY), Ok(Some(_)));
        let dark_default = !dark_seeded && ambient.prefers_dark();
        let dark_mode = PrefCell::new(storage, DARK_MODE_KEY, dark_default);

        let store = Self {
            gateway,
            state: Mutex::new(StoreState::default()),
            arabic_text_type,
            selected_translations,
            dark_mode,
            theme,
            events: EventHub::default(),
        };
        store.theme.apply(store.dark_mode.get());
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Receiver of change events. Observers re-read getters on receipt.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        self.events.subscribe()
    }

    // --- Reference data ---

    /// Replaces the cached surah collection with the server's.
    pub async fn load_surah_info(&self) {
        self.lock().loading.surahs = true;
        let result = self.gateway.surahs().await;

        let mut state = self.lock();
        state.loading.surahs = false;
        match result {
            Ok(surahs) => {
                state.surah_info = surahs;
                drop(state);
                self.events.emit(StoreEvent::SurahsLoaded);
            }
            Err(e) => {
                drop(state);
                tracing::error!("Failed to load surah info: {}", e);
            }
        }
    }

    /// Refreshes available text types and translation options from the
    /// server catalog.
    pub async fn load_text_types(&self) {
        self.lock().loading.text_types = true;
        let result = self.gateway.text_types().await;

        let mut state = self.lock();
        state.loading.text_types = false;
        match result {
            Ok(catalog) => {
                state.available_text_types = catalog.arabic_text_types().to_vec();
                state.available_translations = catalog.translations();
                drop(state);
                self.events.emit(StoreEvent::TextTypesLoaded);
            }
            Err(e) => {
                drop(state);
                tracing::error!("Failed to load text types: {}", e);
            }
        }
    }

    /// Cached surah metadata, in server order.
    pub fn surah_info(&self) -> Vec<SurahInfo> {
        self.lock().surah_info.clone()
    }

    /// Arabic script variants from the last loaded catalog.
    pub fn available_text_types(&self) -> Vec<String> {
        self.lock().available_text_types.clone()
    }

    /// Translation options from the last loaded catalog.
    pub fn available_translations(&self) -> Vec<Translation> {
        self.lock().available_translations.clone()
    }

    /// Current in-flight request flags.
    pub fn loading(&self) -> LoadingFlags {
        self.lock().loading
    }

    // --- Auth session ---

    /// Refreshes the session: sets the current user to whatever the
    /// server reports, or signs out locally when the check fails.
    pub async fn check_auth(&self) {
        self.lock().loading.auth = true;
        let result = self.gateway.me().await;

        let user = match result {
            Ok(user) => user,
            Err(e) => {
                // Fail closed: an unreachable or broken auth endpoint
                // means no session.
                tracing::warn!("Auth check failed: {}", e);
                None
            }
        };

        let mut state = self.lock();
        state.loading.auth = false;
        let changed = state.current_user != user;
        state.current_user = user;
        drop(state);
        if changed {
            self.events.emit(StoreEvent::AuthChanged);
        }
    }

    /// The URL a frontend must navigate to for the OAuth login flow.
    #[must_use]
    pub fn login(&self) -> String {
        self.gateway.login_url()
    }

    /// Ends the session. The local session is cleared whenever the
    /// request reached the server, even if it answered with an error;
    /// only a transport failure leaves the session state untouched.
    pub async fn logout(&self) {
        self.lock().loading.auth = true;
        let result = self.gateway.logout().await;

        let mut state = self.lock();
        state.loading.auth = false;
        match result {
            Err(e) if e.is_transport() => {
                drop(state);
                tracing::error!("Logout failed: {}", e);
            }
            result => {
                if let Err(e) = result {
                    tracing::warn!("Logout rejected by server, clearing session anyway: {}", e);
                }
                state.current_user = None;
                state.bookmarks = None;
                drop(state);
                self.events.emit(StoreEvent::AuthChanged);
            }
        }
    }

    /// The signed-in user, or `None` when signed out.
    pub fn current_user(&self) -> Option<UserInfo> {
        self.lock().current_user.clone()
    }

    // --- Bookmarks ---

    /// Replaces the cached bookmarks with the server's.
    pub async fn load_bookmarks(&self) {
        self.lock().loading.bookmarks = true;
        let result = self.gateway.bookmarks().await;

        let mut state = self.lock();
        state.loading.bookmarks = false;
        match result {
            Ok(list) => {
                state.bookmarks = Some(list);
                drop(state);
                self.events.emit(StoreEvent::BookmarksChanged);
            }
            Err(e) => {
                drop(state);
                tracing::warn!("Failed to load bookmarks: {}", e);
            }
        }
    }

    /// Sets or replaces the reading-position bookmark.
    pub async fn set_reading_bookmark(&self, aya_key: AyaKey) {
        match self.gateway.put_reading_bookmark(&aya_key.to_string()).await {
            Ok(bookmark) => {
                let mut state = self.lock();
                state.bookmarks.get_or_insert_with(BookmarksList::default).reading = Some(bookmark);
                drop(state);
                self.events.emit(StoreEvent::BookmarksChanged);
            }
            Err(e) => tracing::warn!("Failed to set reading bookmark: {}", e),
        }
    }

    /// Removes the reading-position bookmark.
    pub async fn clear_reading_bookmark(&self) {
        match self.gateway.delete_reading_bookmark().await {
            Ok(()) => {
                let mut state = self.lock();
                if let Some(bookmarks) = state.bookmarks.as_mut() {
                    bookmarks.reading = None;
                }
                drop(state);
                self.events.emit(StoreEvent::BookmarksChanged);
            }
            Err(e) => tracing::warn!("Failed to clear reading bookmark: {}", e),
        }
    }

    /// Adds a note bookmark for the given aya.
    pub async fn add_note_bookmark(&self, aya_key: AyaKey, note: &str) {
        match self
            .gateway
            .add_note_bookmark(&aya_key.to_string(), note)
            .await
        {
            Ok(bookmark) => {
                let mut state = self.lock();
                // Server lists notes newest first.
                state
                    .bookmarks
                    .get_or_insert_with(BookmarksList::default)
                    .notes
                    .insert(0, bookmark);
                drop(state);
                self.events.emit(StoreEvent::BookmarksChanged);
            }
            Err(e) => tracing::warn!("Failed to add note bookmark: {}", e),
        }
    }

    /// Replaces the text of an existing note bookmark.
    pub async fn update_note_bookmark(&self, id: i64, note: &str) {
        match self.gateway.update_note_bookmark(id, note).await {
            Ok(updated) => {
                let mut state = self.lock();
                if let Some(bookmarks) = state.bookmarks.as_mut()
                    && let Some(entry) = bookmarks.notes.iter_mut().find(|n| n.id == id)
                {
                    *entry = updated;
                }
                drop(state);
                self.events.emit(StoreEvent::BookmarksChanged);
            }
            Err(e) => tracing::warn!("Failed to update note bookmark: {}", e),
        }
    }

    /// Deletes a note bookmark.
    pub async fn remove_note_bookmark(&self, id: i64) {
        match self.gateway.delete_note_bookmark(id).await {
            Ok(()) => {
                let mut state = self.lock();
                if let Some(bookmarks) = state.bookmarks.as_mut() {
                    bookmarks.notes.retain(|n| n.id != id);
                }
                drop(state);
                self.events.emit(StoreEvent::BookmarksChanged);
            }
            Err(e) => tracing::warn!("Failed to remove note bookmark: {}", e),
        }
    }

    /// Cached bookmarks; `None` until loaded.
    pub fn bookmarks(&self) -> Option<BookmarksList> {
        self.lock().bookmarks.clone()
    }

    // --- Preferences ---

    /// The preferred Arabic script variant.
    pub fn arabic_text_type(&self) -> String {
        self.arabic_text_type.get()
    }

    /// Overwrites the Arabic script variant.
    ///
    /// The value is not validated against the loaded catalog; offering
    /// only valid choices is a frontend concern.
    pub fn set_arabic_text_type(&self, text_type: impl Into<String>) {
        self.arabic_text_type.set(text_type.into());
        self.events.emit(StoreEvent::ArabicTextTypeChanged);
    }

    /// The selected translations, in selection order.
    pub fn selected_translations(&self) -> Vec<Translation> {
        self.selected_translations.get()
    }

    /// Appends a translation unless an equal pair is already selected.
    pub fn add_translation(&self, translation: Translation) {
        let mut selected = self.selected_translations.get();
        if selected.contains(&translation) {
            return;
        }
        selected.push(translation);
        self.selected_translations.set(selected);
        self.events.emit(StoreEvent::TranslationsChanged);
    }

    /// Removes the translation at `index`; out-of-range indices are
    /// ignored.
    pub fn remove_translation(&self, index: usize) {
        let mut selected = self.selected_translations.get();
        if index >= selected.len() {
            return;
        }
        selected.remove(index);
        self.selected_translations.set(selected);
        self.events.emit(StoreEvent::TranslationsChanged);
    }

    /// The selected translations in the wire form used for
    /// translation-filtered queries: `language:translator` pairs joined
    /// by `_`, empty when nothing is selected.
    pub fn selected_translations_string(&self) -> String {
        self.selected_translations
            .get()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Wire spec for text queries: the Arabic variant first, then every
    /// selected translation.
    pub fn display_languages_spec(&self) -> String {
        let mut spec = format!("arabic:{}", self.arabic_text_type.get());
        let translations = self.selected_translations_string();
        if !translations.is_empty() {
            spec.push('_');
            spec.push_str(&translations);
        }
        spec
    }

    /// Whether dark mode is active.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode.get()
    }

    /// Flips dark mode, persists it, and re-applies the theme sink.
    /// Returns the new state.
    pub fn toggle_dark_mode(&self) -> bool {
        let dark = !self.dark_mode.get();
        self.dark_mode.set(dark);
        self.theme.apply(dark);
        self.events.emit(StoreEvent::DarkModeChanged(dark));
        dark
    }
}
