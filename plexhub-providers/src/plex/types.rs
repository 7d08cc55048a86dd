//! Plex library protocol types
//!
//! XML wire shapes (`MediaContainer`, `Directory`, `Video`) and the typed
//! containers the client hands to callers.

use quick_xml::{events::Event, Reader};
use serde::Deserialize;

use super::error::PlexError;

/// One configured Plex server.
///
/// The token is sent as `X-Plex-Token` on every request and never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Backend {
    pub name: String,
    pub base_url: String,
    pub token: String,
}

impl Backend {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A library section (or a nested directory such as a single show).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub title: String,
    /// Category label advertised by the server ("movie", "show", "artist", ...)
    pub category: String,
    /// Opaque identifier used to fetch the entry's content
    pub content_locator: String,
}

/// A playable item. Raw attributes are kept as the server sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLeaf {
    pub title: String,
    pub year_raw: Option<String>,
    pub added_at_raw: Option<String>,
}

/// Content of a section: either playable leaves or further directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContent {
    Leaves(Vec<MediaLeaf>),
    Nested(Vec<SectionEntry>),
}

impl SectionContent {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Leaves(leaves) => leaves.len(),
            Self::Nested(entries) => entries.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ------------------------------------------------------------------
// Wire types
// ------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct MediaContainer {
    #[serde(rename = "Directory", default)]
    pub directories: Vec<Directory>,
    #[serde(rename = "Video", default)]
    pub videos: Vec<Video>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Directory {
    #[serde(rename = "@title", default)]
    pub title: String,
    #[serde(rename = "@type", default)]
    pub r#type: String,
    #[serde(rename = "@key", default)]
    pub key: String,
    #[serde(rename = "Location", default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Location {
    #[serde(rename = "@id", default)]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Video {
    #[serde(rename = "@title", default)]
    pub title: String,
    #[serde(rename = "@year", default)]
    pub year: Option<String>,
    #[serde(rename = "@addedAt", default)]
    pub added_at: Option<String>,
}

impl From<Directory> for SectionEntry {
    fn from(dir: Directory) -> Self {
        let content_locator = dir
            .locations
            .into_iter()
            .map(|loc| loc.id)
            .find(|id| !id.is_empty())
            .unwrap_or(dir.key);

        Self {
            title: dir.title,
            category: dir.r#type,
            content_locator,
        }
    }
}

impl From<Video> for MediaLeaf {
    fn from(video: Video) -> Self {
        Self {
            title: video.title,
            year_raw: video.year,
            added_at_raw: video.added_at,
        }
    }
}

impl From<MediaContainer> for SectionContent {
    fn from(container: MediaContainer) -> Self {
        if container.videos.is_empty() && !container.directories.is_empty() {
            Self::Nested(container.directories.into_iter().map(Into::into).collect())
        } else {
            Self::Leaves(container.videos.into_iter().map(Into::into).collect())
        }
    }
}

// ------------------------------------------------------------------
// Decoding
// ------------------------------------------------------------------

/// Decode a `library/sections` body.
pub fn decode_sections(body: &[u8]) -> Result<Vec<SectionEntry>, PlexError> {
    let container = decode_container(body)?;
    Ok(container.directories.into_iter().map(Into::into).collect())
}

/// Decode a section (or nested directory) content body.
pub fn decode_content(body: &[u8]) -> Result<SectionContent, PlexError> {
    decode_container(body).map(Into::into)
}

fn decode_container(body: &[u8]) -> Result<MediaContainer, PlexError> {
    let xml = std::str::from_utf8(body).map_err(|e| PlexError::Decode(e.to_string()))?;
    ensure_media_container(xml)?;
    Ok(quick_xml::de::from_str(xml)?)
}

/// The deserializer ignores the root element name, so check it up front.
fn ensure_media_container(xml: &str) -> Result<(), PlexError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                let name = e.name();
                if name.as_ref() == b"MediaContainer" {
                    return Ok(());
                }
                return Err(PlexError::Decode(format!(
                    "unexpected root element <{}>",
                    String::from_utf8_lossy(name.as_ref())
                )));
            }
            Ok(Event::Text(text)) if !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(PlexError::Decode("text content outside of root element".to_string()));
            }
            Ok(Event::Eof) => {
                return Err(PlexError::Decode("missing MediaContainer root element".to_string()));
            }
            Ok(_) => {}
            Err(e) => return Err(PlexError::Decode(e.to_string())),
        }
    }
}
