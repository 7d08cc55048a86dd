//! Library client interface
//!
//! The seam between the protocol client and the directory resolver.
//! `PlexClient` is the production implementation; tests substitute mocks.

use async_trait::async_trait;

use super::{client::PlexClient, Backend, PlexError, SectionContent, SectionEntry};

/// Read-only access to a backend's library hierarchy.
#[async_trait]
pub trait LibraryClient: Send + Sync {
    /// List the library sections advertised by `backend`.
    async fn fetch_sections(&self, backend: &Backend) -> Result<Vec<SectionEntry>, PlexError>;

    /// Fetch the content behind `locator` on `backend`.
    async fn fetch_content(&self, backend: &Backend, locator: &str) -> Result<SectionContent, PlexError>;
}

#[async_trait]
impl LibraryClient for PlexClient {
    async fn fetch_sections(&self, backend: &Backend) -> Result<Vec<SectionEntry>, PlexError> {
        self.sections(backend).await
    }

    async fn fetch_content(&self, backend: &Backend, locator: &str) -> Result<SectionContent, PlexError> {
        self.content(backend, locator).await
    }
}
