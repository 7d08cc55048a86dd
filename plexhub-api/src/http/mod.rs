// Module: http
// HTTP/JSON REST API

pub mod error;
pub mod health;
pub mod library;

use std::sync::Arc;

use axum::{http::Uri, Router};
use plexhub_core::ServerAggregator;
use plexhub_providers::Backend;
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub aggregator: Arc<ServerAggregator>,
    /// Validated backends, in configured order
    pub backends: Arc<Vec<Backend>>,
}

impl AppState {
    pub fn new(aggregator: ServerAggregator, backends: Vec<Backend>) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            backends: Arc::new(backends),
        }
    }
}

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints (for monitoring probes)
        .merge(health::create_health_router())
        .merge(library::library_routes())
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback(uri: Uri) -> AppError {
    AppError::not_found(format!("no route for {}", uri.path()))
}
