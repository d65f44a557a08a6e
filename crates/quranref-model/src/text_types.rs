use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved catalog key whose entries are Arabic script variants rather
/// than translations.
pub const ARABIC_KEY: &str = "arabic";

/// One translation variant: a (language, translator) pair.
///
/// Serializes as a two-element string array, the shape used both by the
/// API and by persisted preferences. The wire form used in query paths is
/// `language:translator`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Translation {
    pub language: String,
    pub translator: String,
}

impl Translation {
    pub fn new(language: impl Into<String>, translator: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            translator: translator.into(),
        }
    }
}

impl From<(String, String)> for Translation {
    fn from((language, translator): (String, String)) -> Self {
        Self {
            language,
            translator,
        }
    }
}

impl From<Translation> for (String, String) {
    fn from(t: Translation) -> Self {
        (t.language, t.translator)
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.language, self.translator)
    }
}

impl FromStr for Translation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((language, translator)) if !language.is_empty() && !translator.is_empty() => {
                Ok(Self::new(language, translator))
            }
            _ => Err(format!("expected language:translator, got '{}'", s)),
        }
    }
}

/// The catalog served by `GET /text-types`: language name mapped to the
/// translators available for it, plus the reserved `arabic` entry listing
/// script variants.
///
/// Key order is the server's encounter order and is significant for how
/// translation options are presented, so the map preserves insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextTypeCatalog(IndexMap<String, Vec<String>>);

impl TextTypeCatalog {
    /// Arabic script variants (e.g. "simple", "uthmani"); empty when the
    /// reserved key is absent.
    pub fn arabic_text_types(&self) -> &[String] {
        self.0.get(ARABIC_KEY).map_or(&[], Vec::as_slice)
    }

    /// All translation options in key encounter order, then array order,
    /// excluding the reserved `arabic` entry.
    pub fn translations(&self) -> Vec<Translation> {
        self.0
            .iter()
            .filter(|(language, _)| language.as_str() != ARABIC_KEY)
            .flat_map(|(language, translators)| {
                translators
                    .iter()
                    .map(|translator| Translation::new(language.clone(), translator.clone()))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for TextTypeCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
