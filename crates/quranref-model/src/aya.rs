use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of an aya, written `surah:aya` (e.g. `2:255`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AyaKey {
    pub surah: u32,
    pub aya: u32,
}

impl AyaKey {
    pub fn new(surah: u32, aya: u32) -> Self {
        Self { surah, aya }
    }
}

impl fmt::Display for AyaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.aya)
    }
}

impl FromStr for AyaKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| part.parse::<u32>().ok();
        match s.split_once(':') {
            Some((surah, aya)) => match (parse(surah), parse(aya)) {
                (Some(surah), Some(aya)) => Ok(Self { surah, aya }),
                _ => Err(format!("aya key must be 'surah:aya', got '{}'", s)),
            },
            None => Err(format!("aya key must be 'surah:aya', got '{}'", s)),
        }
    }
}

/// One aya in a query result: its key plus the requested renderings,
/// keyed by language and then by text type or translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyaResult {
    pub aya_key: String,
    pub texts: IndexMap<String, IndexMap<String, String>>,
}

impl AyaResult {
    /// Text for a given language/variant pair, if present.
    pub fn text(&self, language: &str, variant: &str) -> Option<&str> {
        self.texts
            .get(language)
            .and_then(|by_variant| by_variant.get(variant))
            .map(String::as_str)
    }
}
