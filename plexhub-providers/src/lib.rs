// plexhub Provider Clients
//
// This crate contains the pure HTTP client for Plex media servers.
// The client knows nothing about aggregation or filtering; it issues one
// authenticated request per call and decodes the XML library protocol.
//
// Architecture:
// - plexhub-providers: Pure HTTP client + XML decoding (Plex)
// - plexhub-core/service: directory resolution and multi-server aggregation
// - plexhub-api: HTTP routes serializing the aggregate outcome

// Shared error types
pub mod error;

// HTTP clients
pub mod plex;

// Re-export client types for convenience
pub use error::ProviderClientError;
pub use plex::error::PlexError;
pub use plex::{Backend, LibraryClient, MediaLeaf, PlexClient, SectionContent, SectionEntry};
