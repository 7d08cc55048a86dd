//! Plex Provider Client Error Types

use thiserror::Error;

use crate::error::ProviderClientError;

/// Longest slice of a non-200 body kept as diagnostic context.
pub const MAX_DIAGNOSTIC_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum PlexError {
    /// The request could not complete (DNS, connect, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a status other than 200 OK.
    #[error("HTTP error {status} for {url}: {body}")]
    BackendStatus {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    /// A 200 body that is not a `MediaContainer` document.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Response too large ({size} bytes)")]
    ResponseTooLarge { size: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl PlexError {
    /// Whether the failure happened before a response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::ResponseTooLarge { .. })
    }
}

/// Build a `BackendStatus` error, keeping at most `MAX_DIAGNOSTIC_BODY` bytes of the body.
pub fn status_error(status: reqwest::StatusCode, url: &str, body: &[u8]) -> PlexError {
    let text = String::from_utf8_lossy(body);
    let body = match text.char_indices().nth(MAX_DIAGNOSTIC_BODY) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    };
    PlexError::BackendStatus {
        status,
        url: url.to_string(),
        body: body.trim().to_string(),
    }
}

impl From<ProviderClientError> for PlexError {
    fn from(err: ProviderClientError) -> Self {
        match err {
            ProviderClientError::ResponseTooLarge { size } => Self::ResponseTooLarge { size },
            other => Self::Transport(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for PlexError {
    fn from(err: reqwest::Error) -> Self {
        ProviderClientError::from(err).into()
    }
}

impl From<quick_xml::de::DeError> for PlexError {
    fn from(err: quick_xml::de::DeError) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<url::ParseError> for PlexError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
