//! CLI argument definitions for the QuranRef client.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "quranref",
    version,
    about = "QuranRef command-line client",
    long_about = "Browse the QuranRef corpus from the terminal.\n\n\
                  Lists surahs and available translations, searches ayas by word,\n\
                  and manages display preferences, bookmarks, and the auth session."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the QuranRef API (overrides QURANREF_API_URL).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all surahs.
    Surahs,

    /// Show available Arabic text types and translations.
    TextTypes,

    /// Find ayas containing a word, rendered per current preferences.
    Search(SearchArgs),

    /// Browse words by starting letter; without a letter, list the
    /// alphabet.
    Words(WordsArgs),

    /// Show or change persisted display preferences.
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Inspect or end the auth session.
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Manage bookmarks (requires a signed-in session).
    #[command(subcommand)]
    Bookmarks(BookmarksCommand),
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Arabic word to search for.
    #[arg(value_name = "WORD")]
    pub word: String,
}

#[derive(Parser)]
pub struct WordsArgs {
    /// Arabic letter to list words for.
    #[arg(value_name = "LETTER")]
    pub letter: Option<String>,
}

#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Print all preferences.
    Show,

    /// Set the Arabic text type (e.g. simple, uthmani).
    SetTextType {
        #[arg(value_name = "TEXT_TYPE")]
        text_type: String,
    },

    /// Select a translation, given as language:translator.
    AddTranslation {
        #[arg(value_name = "TRANSLATION")]
        translation: String,
    },

    /// Unselect the translation at the given position (see `prefs show`).
    RemoveTranslation {
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Toggle dark mode.
    ToggleDark,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Show the signed-in user, if any.
    Status,

    /// Print the login URL to open in a browser.
    Login,

    /// End the current session.
    Logout,
}

#[derive(Subcommand)]
pub enum BookmarksCommand {
    /// List the reading position and all notes.
    List,

    /// Set the reading position (aya given as surah:aya).
    SetReading {
        #[arg(value_name = "AYA")]
        aya_key: String,
    },

    /// Clear the reading position.
    ClearReading,

    /// Add a note bookmark (aya given as surah:aya).
    Note {
        #[arg(value_name = "AYA")]
        aya_key: String,
        #[arg(value_name = "TEXT")]
        note: String,
    },

    /// Replace the text of a note bookmark.
    UpdateNote {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(value_name = "TEXT")]
        note: String,
    },

    /// Delete a note bookmark.
    RemoveNote {
        #[arg(value_name = "ID")]
        id: i64,
    },
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
