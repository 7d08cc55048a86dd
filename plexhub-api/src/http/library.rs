//! Library HTTP Routes
//!
//! Directory listings aggregated over every configured Plex server.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use plexhub_core::{
    filter_since,
    validation::{parse_since, validate_category},
    ServerStatus,
};
use serde::Deserialize;

use crate::http::{
    error::{AggregateProblem, AppResult},
    AppState,
};

/// Build library HTTP routes
pub fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/servers", get(list_servers))
        .route("/directories/{name}", get(get_directory))
        .route("/movies", get(get_movies))
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    /// Only items added at or after this unix timestamp
    pub since: Option<String>,
}

/// GET /servers - Configured servers and whether they answer
async fn list_servers(State(state): State<AppState>) -> Json<Vec<ServerStatus>> {
    Json(state.aggregator.probe(&state.backends).await)
}

/// GET /directories/{name} - Aggregate one directory over all servers
async fn get_directory(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<DirectoryQuery>,
) -> AppResult<Response> {
    let category = validate_category(&name)?;
    let since = query.since.as_deref().map(parse_since).transpose()?;

    tracing::info!(category, ?since, servers = state.backends.len(), "Directory request");
    Ok(aggregate_response(&state, category, since).await)
}

/// GET /movies - Legacy alias for `/directories/movie`
async fn get_movies(State(state): State<AppState>) -> Response {
    aggregate_response(&state, "movie", None).await
}

async fn aggregate_response(state: &AppState, category: &str, since: Option<u64>) -> Response {
    let outcome = state.aggregator.aggregate(&state.backends, category).await;

    if outcome.all_failed {
        return AggregateProblem::from_outcome(category, outcome).into_response();
    }

    let results = match since {
        Some(threshold) => filter_since(outcome, threshold),
        None => outcome.results,
    };
    Json(results).into_response()
}
