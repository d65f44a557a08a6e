use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Place of revelation for a surah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NuzoolLocation {
    Meccan,
    Medinan,
}

impl NuzoolLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            NuzoolLocation::Meccan => "Meccan",
            NuzoolLocation::Medinan => "Medinan",
        }
    }
}

impl fmt::Display for NuzoolLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NuzoolLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Meccan" => Ok(NuzoolLocation::Meccan),
            "Medinan" => Ok(NuzoolLocation::Medinan),
            _ => Err(format!("Unknown nuzool location: {}", s)),
        }
    }
}

/// Metadata for a single surah as served by `GET /surahs`.
///
/// The collection is fetched in full and cached for the session;
/// `surah_number` is unique across it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahInfo {
    /// Database key; the surah number as a string.
    #[serde(rename = "_key")]
    pub key: String,
    pub surah_number: u32,
    pub arabic_name: String,
    pub english_name: String,
    pub translated_name: String,
    pub nuzool_location: NuzoolLocation,
    pub nuzool_order: u32,
    /// Number of rukus (sections) in the surah.
    pub rukus: u32,
    pub total_ayas: u32,
}
