//! Plex HTTP Client

use std::time::Duration;

use reqwest::{header::{HeaderMap, HeaderValue, ACCEPT}, Client, StatusCode};
use url::Url;

use super::error::{status_error, PlexError};
use super::types::{decode_content, decode_sections, Backend, SectionContent, SectionEntry};
use crate::error::body_with_limit;

/// Per-call timeout mandated for every backend request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const X_PLEX_TOKEN: &str = "X-Plex-Token";
const SECTIONS_PATH: &str = "library/sections";

/// Plex HTTP Client
///
/// Holds no per-backend state: the same client serves every configured
/// backend, each call carrying its own base URL and token.
/// Redirects are disabled so a backend cannot bounce the token elsewhere.
#[derive(Debug, Clone)]
pub struct PlexClient {
    client: Client,
    timeout: Duration,
}

impl PlexClient {
    /// Create a client with the default 30 second per-call timeout
    pub fn new() -> Result<Self, PlexError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-call timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, PlexError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| PlexError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// List the library sections advertised by a backend
    pub async fn sections(&self, backend: &Backend) -> Result<Vec<SectionEntry>, PlexError> {
        let url = Self::build_url(backend, SECTIONS_PATH)?;
        let body = self.get(backend, url).await?;
        let sections = decode_sections(&body)?;

        tracing::debug!(server = %backend.name, count = sections.len(), "Listed Plex library sections");
        Ok(sections)
    }

    /// Fetch the content behind a section or nested directory locator
    pub async fn content(&self, backend: &Backend, locator: &str) -> Result<SectionContent, PlexError> {
        let url = Self::build_url(backend, &Self::content_path(locator))?;
        let body = self.get(backend, url).await?;
        let content = decode_content(&body)?;

        tracing::debug!(
            server = %backend.name,
            locator,
            count = content.len(),
            nested = matches!(content, SectionContent::Nested(_)),
            "Fetched Plex section content"
        );
        Ok(content)
    }

    /// Relative path for a content locator.
    ///
    /// Absolute keys (`/library/metadata/42/children`) are used as-is,
    /// anything else is a section id.
    fn content_path(locator: &str) -> String {
        match locator.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("{SECTIONS_PATH}/{locator}/all"),
        }
    }

    /// Join `path` onto the backend base URL and attach the token.
    fn build_url(backend: &Backend, path: &str) -> Result<Url, PlexError> {
        let mut base = Url::parse(&backend.base_url)?;
        if !base.path().ends_with('/') {
            let path_with_slash = format!("{}/", base.path());
            base.set_path(&path_with_slash);
        }

        let mut url = base.join(path)?;
        url.query_pairs_mut().append_pair(X_PLEX_TOKEN, &backend.token);
        Ok(url)
    }

    /// URL with the query string stripped, safe for logs and error messages.
    fn redacted(url: &Url) -> String {
        let mut url = url.clone();
        url.set_query(None);
        url.to_string()
    }

    /// Single attempt: send, read body, require 200 OK.
    async fn get(&self, backend: &Backend, url: Url) -> Result<Vec<u8>, PlexError> {
        let display_url = Self::redacted(&url);
        tracing::debug!(server = %backend.name, url = %display_url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::debug!(server = %backend.name, url = %display_url, error = %e, "Plex request failed");
            PlexError::from(e.without_url())
        })?;

        let status = response.status();
        let body = body_with_limit(response).await?;

        if status != StatusCode::OK {
            return Err(status_error(status, &display_url, &body));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PlexClient::new().unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(30));

        let client = PlexClient::with_timeout(Duration::from_millis(250)).unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_build_url_appends_token() {
        let backend = Backend::new("home", "http://plex.local:32400", "abc123");
        let url = PlexClient::build_url(&backend, SECTIONS_PATH).unwrap();
        assert_eq!(
            url.as_str(),
            "http://plex.local:32400/library/sections?X-Plex-Token=abc123"
        );
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let backend = Backend::new("proxied", "https://media.example.com/plex/", "t-_1");
        let url = PlexClient::build_url(&backend, &PlexClient::content_path("5")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://media.example.com/plex/library/sections/5/all?X-Plex-Token=t-_1"
        );

        let backend = Backend::new("proxied", "https://media.example.com/plex", "t");
        let url = PlexClient::build_url(&backend, SECTIONS_PATH).unwrap();
        assert_eq!(url.path(), "/plex/library/sections");
    }

    #[test]
    fn test_content_path_for_absolute_key() {
        assert_eq!(PlexClient::content_path("3"), "library/sections/3/all");
        assert_eq!(
            PlexClient::content_path("/library/metadata/42/children"),
            "library/metadata/42/children"
        );
    }

    #[test]
    fn test_build_url_rejects_invalid_base() {
        let backend = Backend::new("broken", "not a url", "t");
        let err = PlexClient::build_url(&backend, SECTIONS_PATH).unwrap_err();
        assert!(matches!(err, PlexError::InvalidUrl(_)));
    }

    #[test]
    fn test_redacted_url_hides_token() {
        let backend = Backend::new("home", "http://plex.local:32400", "s3cr3t");
        let url = PlexClient::build_url(&backend, SECTIONS_PATH).unwrap();
        let shown = PlexClient::redacted(&url);
        assert_eq!(shown, "http://plex.local:32400/library/sections");
    }
}
