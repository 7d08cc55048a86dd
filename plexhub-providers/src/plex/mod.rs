//! Plex Provider Client
//!
//! Pure HTTP client for the Plex library protocol (XML `MediaContainer`).
//! Only the three read calls the resolver needs are covered: list sections,
//! list a section's content, list a nested directory's content.
//!
//! # Example
//!
//! ```no_run
//! use plexhub_providers::plex::{Backend, PlexClient, SectionContent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PlexClient::new()?;
//! let backend = Backend::new("living-room", "http://192.168.1.10:32400", "token");
//! for section in client.sections(&backend).await? {
//!     if let SectionContent::Leaves(leaves) = client.content(&backend, &section.content_locator).await? {
//!         println!("{}: {} items", section.title, leaves.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::{PlexClient, DEFAULT_TIMEOUT};
pub use error::PlexError;
pub use service::LibraryClient;
pub use types::{Backend, MediaLeaf, SectionContent, SectionEntry};
