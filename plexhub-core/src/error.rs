use plexhub_providers::PlexError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown directory: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure while resolving a category on one backend.
///
/// Any variant aborts the whole resolution; nothing collected before the
/// failure is returned.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("failed to list sections: {0}")]
    Sections(#[source] PlexError),

    #[error("failed to retrieve library [{locator}] {title}: {source}")]
    Content {
        title: String,
        locator: String,
        #[source]
        source: PlexError,
    },

    #[error("library [{locator}] {title} nests directories more than {max_depth} levels deep")]
    TooDeep {
        title: String,
        locator: String,
        max_depth: usize,
    },
}

impl ResolveError {
    /// The protocol error underneath the resolution context.
    #[must_use]
    pub fn plex_error(&self) -> Option<&PlexError> {
        match self {
            Self::Sections(err) | Self::Content { source: err, .. } => Some(err),
            Self::TooDeep { .. } => None,
        }
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.plex_error().is_some_and(PlexError::is_transport)
    }
}
