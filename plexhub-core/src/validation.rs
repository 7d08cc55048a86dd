//! Input validation for values that reach the engine from outside
//!
//! Category names and `since` timestamps come from HTTP requests; backend
//! URLs and tokens come from configuration.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

/// Directory names the HTTP layer accepts.
pub const KNOWN_CATEGORIES: &[&str] = &["show", "movie"];

/// Opaque Plex token alphabet: letters, digits, `-` and `_`.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid token regex"));

/// Accept only categories from the allow-list.
pub fn validate_category(name: &str) -> Result<&str> {
    if KNOWN_CATEGORIES.contains(&name) {
        Ok(name)
    } else {
        Err(Error::UnknownCategory(name.to_string()))
    }
}

/// Parse the external form of a `since` threshold.
pub fn parse_since(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| Error::InvalidInput(format!("since must be a non-negative integer, got {raw:?}")))
}

#[must_use]
pub fn is_valid_token(token: &str) -> bool {
    TOKEN.is_match(token)
}

/// Base URLs must be absolute http(s) URLs with a host.
pub fn validate_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidInput(format!("invalid url {raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(Error::InvalidInput(format!("url {raw:?} has no host"))),
        other => Err(Error::InvalidInput(format!("unsupported url scheme {other:?}"))),
    }
}
