//! Command implementations.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};

use quranref_api::{ApiClient, ApiConfig};
use quranref_model::{AyaKey, Translation};
use quranref_store::{FileStorage, MemoryStorage, Storage, Store};

use crate::cli::{AuthCommand, BookmarksCommand, Cli, Command, PrefsCommand, SearchArgs, WordsArgs};

pub async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.api_url {
        Some(url) => ApiConfig::new(url.clone()),
        None => ApiConfig::from_env(),
    };
    let client = ApiClient::new(&config).context("create API client")?;
    let store = Store::new(Arc::new(client.clone()), open_storage());

    match cli.command {
        Command::Surahs => run_surahs(&store).await,
        Command::TextTypes => run_text_types(&store).await,
        Command::Search(args) => run_search(&store, &client, &args).await,
        Command::Words(args) => run_words(&client, &args).await,
        Command::Prefs(command) => run_prefs(&store, &command),
        Command::Auth(command) => run_auth(&store, command).await,
        Command::Bookmarks(command) => run_bookmarks(&store, command).await,
    }
}

/// Preferences live in the platform config directory; when that is
/// unavailable the session falls back to in-memory storage.
fn open_storage() -> Arc<dyn Storage> {
    match FileStorage::in_config_dir() {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            tracing::warn!("Preferences will not persist: {}", e);
            Arc::new(MemoryStorage::new())
        }
    }
}

async fn run_surahs(store: &Store) -> Result<()> {
    store.load_surah_info().await;
    let surahs = store.surah_info();
    if surahs.is_empty() {
        bail!("no surahs received; is the QuranRef API reachable?");
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Arabic", "Translated", "Revealed", "Ayas"]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for surah in &surahs {
        table.add_row(vec![
            surah.surah_number.to_string(),
            surah.english_name.clone(),
            surah.arabic_name.clone(),
            surah.translated_name.clone(),
            surah.nuzool_location.to_string(),
            surah.total_ayas.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn run_text_types(store: &Store) -> Result<()> {
    store.load_text_types().await;
    let text_types = store.available_text_types();
    if text_types.is_empty() {
        bail!("no text types received; is the QuranRef API reachable?");
    }

    println!("Arabic text types: {}", text_types.join(", "));

    let selected = store.selected_translations();
    let mut table = Table::new();
    table.set_header(vec!["Language", "Translator", "Selected"]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for translation in store.available_translations() {
        let mark = if selected.contains(&translation) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            translation.language.clone(),
            translation.translator.clone(),
            mark.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn run_search(store: &Store, client: &ApiClient, args: &SearchArgs) -> Result<()> {
    let languages = store.display_languages_spec();
    tracing::info!("Searching for '{}' with languages {}", args.word, languages);

    let results = client
        .ayas_by_word(&args.word, &languages)
        .await
        .map_err(|e| anyhow!("{}: {}", e.user_message(), e))
        .with_context(|| format!("search for '{}'", args.word))?;

    if results.is_empty() {
        println!("No ayas found.");
        return Ok(());
    }

    for aya in &results {
        println!("{}", aya.aya_key);
        for (language, texts) in &aya.texts {
            for (variant, text) in texts {
                println!("  [{language}:{variant}] {text}");
            }
        }
        println!();
    }
    println!("{} ayas", results.len());
    Ok(())
}

async fn run_words(client: &ApiClient, args: &WordsArgs) -> Result<()> {
    let Some(letter) = &args.letter else {
        let letters = client
            .letters()
            .await
            .map_err(|e| anyhow!("{}: {}", e.user_message(), e))
            .context("list letters")?;
        println!("{}", letters.join(" "));
        return Ok(());
    };

    let words = client
        .words_by_letter(letter)
        .await
        .map_err(|e| anyhow!("{}: {}", e.user_message(), e))
        .with_context(|| format!("list words for '{letter}'"))?;

    if words.is_empty() {
        println!("No words found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Word", "Occurrences"]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (word, count) in &words {
        table.add_row(vec![word.clone(), count.to_string()]);
    }
    println!("{table}");
    Ok(())
}

fn run_prefs(store: &Store, command: &PrefsCommand) -> Result<()> {
    match command {
        PrefsCommand::Show => {
            println!("Arabic text type: {}", store.arabic_text_type());
            println!("Dark mode: {}", on_off(store.dark_mode()));
            let selected = store.selected_translations();
            if selected.is_empty() {
                println!("Selected translations: none");
            } else {
                println!("Selected translations:");
                for (index, translation) in selected.iter().enumerate() {
                    println!("  {index}: {translation}");
                }
            }
        }
        PrefsCommand::SetTextType { text_type } => {
            store.set_arabic_text_type(text_type.clone());
            println!("Arabic text type set to {text_type}");
        }
        PrefsCommand::AddTranslation { translation } => {
            let translation: Translation = translation.parse().map_err(|e: String| anyhow!(e))?;
            store.add_translation(translation.clone());
            println!("Selected {translation}");
        }
        PrefsCommand::RemoveTranslation { index } => {
            let before = store.selected_translations().len();
            store.remove_translation(*index);
            if store.selected_translations().len() < before {
                println!("Removed translation at position {index}");
            } else {
                println!("No translation at position {index}");
            }
        }
        PrefsCommand::ToggleDark => {
            println!("Dark mode {}", on_off(store.toggle_dark_mode()));
        }
    }
    Ok(())
}

async fn run_auth(store: &Store, command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Status => {
            store.check_auth().await;
            match store.current_user() {
                Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
                None => println!("Not signed in."),
            }
        }
        AuthCommand::Login => {
            println!("Open this URL in a browser to sign in:");
            println!("  {}", store.login());
        }
        AuthCommand::Logout => {
            store.check_auth().await;
            store.logout().await;
            if store.current_user().is_some() {
                bail!("could not reach the server; session unchanged");
            }
            println!("Signed out.");
        }
    }
    Ok(())
}

async fn run_bookmarks(store: &Store, command: BookmarksCommand) -> Result<()> {
    match command {
        BookmarksCommand::List => {
            store.load_bookmarks().await;
            let Some(bookmarks) = store.bookmarks() else {
                bail!("could not load bookmarks; are you signed in?");
            };

            match &bookmarks.reading {
                Some(bookmark) => println!("Reading position: {}", bookmark.aya_key),
                None => println!("Reading position: none"),
            }
            if bookmarks.notes.is_empty() {
                println!("Notes: none");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Id", "Aya", "Note", "Updated"]);
            apply_table_style(&mut table);
            align_column(&mut table, 0, CellAlignment::Right);
            for note in &bookmarks.notes {
                table.add_row(vec![
                    note.id.to_string(),
                    note.aya_key.clone(),
                    note.note.clone(),
                    note.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                ]);
            }
            println!("{table}");
        }
        BookmarksCommand::SetReading { aya_key } => {
            let key: AyaKey = aya_key.parse().map_err(|e: String| anyhow!(e))?;
            store.set_reading_bookmark(key).await;
            match store.bookmarks().and_then(|b| b.reading) {
                Some(bookmark) => println!("Reading position set to {}", bookmark.aya_key),
                None => bail!("could not set the reading position; are you signed in?"),
            }
        }
        BookmarksCommand::ClearReading => {
            store.clear_reading_bookmark().await;
            println!("Reading position cleared.");
        }
        BookmarksCommand::Note { aya_key, note } => {
            let key: AyaKey = aya_key.parse().map_err(|e: String| anyhow!(e))?;
            store.add_note_bookmark(key, &note).await;
            match store.bookmarks().and_then(|b| b.notes.first().cloned()) {
                Some(added) if added.note == note => {
                    println!("Added note {} at {}", added.id, added.aya_key);
                }
                _ => bail!("could not add the note; are you signed in?"),
            }
        }
        BookmarksCommand::UpdateNote { id, note } => {
            store.update_note_bookmark(id, &note).await;
            println!("Note {id} updated.");
        }
        BookmarksCommand::RemoveNote { id } => {
            store.remove_note_bookmark(id).await;
            println!("Note {id} removed.");
        }
    }
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
