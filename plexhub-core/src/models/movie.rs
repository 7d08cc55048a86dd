use plexhub_providers::MediaLeaf;
use serde::{Deserialize, Serialize};

/// Normalized media item, whatever shape the backend listed it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: Option<u16>,
    #[serde(rename = "added-at")]
    pub added_at: u64,
}

impl Movie {
    /// `year` is kept only when it parses as a `u16`; `added_at` falls back to 0.
    #[must_use]
    pub fn from_raw(title: impl Into<String>, year_raw: Option<&str>, added_at_raw: Option<&str>) -> Self {
        Self {
            title: title.into(),
            year: year_raw.and_then(|raw| raw.parse::<u16>().ok()),
            added_at: added_at_raw
                .and_then(|raw| raw.parse::<u64>().ok())
                .unwrap_or(0),
        }
    }
}

impl From<MediaLeaf> for Movie {
    fn from(leaf: MediaLeaf) -> Self {
        Self::from_raw(leaf.title, leaf.year_raw.as_deref(), leaf.added_at_raw.as_deref())
    }
}
