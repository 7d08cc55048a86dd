//! Multi-server aggregation
//!
//! Resolves the same category on every configured backend. Backends run
//! concurrently and never affect each other: a failure is recorded on that
//! backend's `ServerResult` and the others carry on.

use std::sync::Arc;

use futures::future::join_all;
use plexhub_providers::{Backend, LibraryClient};

use super::library::DirectoryResolver;
use crate::models::{AggregateOutcome, ServerResult, ServerStatus};

#[derive(Debug, Clone)]
pub struct ServerAggregator {
    resolver: DirectoryResolver,
}

impl ServerAggregator {
    #[must_use]
    pub const fn new(resolver: DirectoryResolver) -> Self {
        Self { resolver }
    }

    pub fn with_client(client: Arc<dyn LibraryClient>) -> Self {
        Self::new(DirectoryResolver::new(client))
    }

    /// Resolve `category` on each backend. Results keep the configured order.
    pub async fn aggregate(&self, backends: &[Backend], category: &str) -> AggregateOutcome {
        let results = join_all(
            backends
                .iter()
                .map(|backend| self.resolve_one(backend, category)),
        )
        .await;

        let outcome = AggregateOutcome::new(results);
        if outcome.all_failed {
            tracing::error!(
                category,
                servers = backends.len(),
                "No configured server could be resolved"
            );
        } else {
            tracing::info!(
                category,
                servers = backends.len(),
                failed = outcome.failed_count(),
                "Aggregated directory"
            );
        }
        outcome
    }

    async fn resolve_one(&self, backend: &Backend, category: &str) -> ServerResult {
        match self.resolver.resolve(backend, category).await {
            Ok(movies) => ServerResult::success(&backend.name, movies),
            Err(e) => {
                tracing::warn!(
                    server = %backend.name,
                    category,
                    transport = e.is_transport(),
                    error = %e,
                    "Failed to resolve directory"
                );
                ServerResult::failure(&backend.name, format!("failed to retrieve movies: {e}"))
            }
        }
    }

    /// Check each backend answers the section listing.
    pub async fn probe(&self, backends: &[Backend]) -> Vec<ServerStatus> {
        let client = self.resolver.client();
        join_all(backends.iter().map(|backend| async move {
            let error = match client.fetch_sections(backend).await {
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(server = %backend.name, error = %e, "Server probe failed");
                    Some(e.to_string())
                }
            };
            ServerStatus {
                name: backend.name.clone(),
                url: backend.base_url.clone(),
                error,
            }
        }))
        .await
    }
}
