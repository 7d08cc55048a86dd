//! Directory resolution
//!
//! Turns a category name into a flat list of movies for one backend. A
//! category is either flat (sections list videos) or nested (sections list
//! directories such as shows, which may list seasons before reaching the
//! videos). The shape is decided by the fetched content, never by the
//! category name.

use std::sync::Arc;

use plexhub_providers::{Backend, LibraryClient, SectionContent, SectionEntry};

use crate::error::ResolveError;
use crate::models::Movie;

/// Directory levels followed below a section (show, then season).
pub const MAX_NESTING_DEPTH: usize = 2;

#[derive(Clone)]
pub struct DirectoryResolver {
    client: Arc<dyn LibraryClient>,
}

impl std::fmt::Debug for DirectoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryResolver").finish_non_exhaustive()
    }
}

impl DirectoryResolver {
    pub fn new(client: Arc<dyn LibraryClient>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &Arc<dyn LibraryClient> {
        &self.client
    }

    /// Resolve every section of `category` on `backend`.
    ///
    /// Sections are visited in listing order and their items concatenated.
    /// A backend without such a section yields an empty list. Any fetch
    /// failure, or directories nested past [`MAX_NESTING_DEPTH`], aborts the
    /// call.
    pub async fn resolve(&self, backend: &Backend, category: &str) -> Result<Vec<Movie>, ResolveError> {
        let sections = self
            .client
            .fetch_sections(backend)
            .await
            .map_err(ResolveError::Sections)?;

        let mut movies = Vec::new();
        for section in sections.iter().filter(|section| section.category == category) {
            self.collect(backend, section, &mut movies).await?;
        }

        tracing::debug!(server = %backend.name, category, count = movies.len(), "Resolved directory");
        Ok(movies)
    }

    /// Depth-first walk below `section`, appending leaves in listing order.
    async fn collect(
        &self,
        backend: &Backend,
        section: &SectionEntry,
        movies: &mut Vec<Movie>,
    ) -> Result<(), ResolveError> {
        // Popped from the back, so children are pushed in reverse.
        let mut pending = vec![(section.clone(), 0)];
        while let Some((entry, depth)) = pending.pop() {
            match self.fetch(backend, &entry).await? {
                SectionContent::Leaves(leaves) => {
                    movies.extend(leaves.into_iter().map(Movie::from));
                }
                SectionContent::Nested(children) if depth < MAX_NESTING_DEPTH => {
                    tracing::debug!(
                        server = %backend.name,
                        entry = %entry.title,
                        depth,
                        children = children.len(),
                        "Descending into nested directories"
                    );
                    pending.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
                }
                SectionContent::Nested(_) => {
                    return Err(ResolveError::TooDeep {
                        title: entry.title,
                        locator: entry.content_locator,
                        max_depth: MAX_NESTING_DEPTH,
                    });
                }
            }
        }
        Ok(())
    }

    async fn fetch(&self, backend: &Backend, entry: &SectionEntry) -> Result<SectionContent, ResolveError> {
        self.client
            .fetch_content(backend, &entry.content_locator)
            .await
            .map_err(|source| ResolveError::Content {
                title: entry.title.clone(),
                locator: entry.content_locator.clone(),
                source,
            })
    }
}
