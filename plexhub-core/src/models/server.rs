use serde::{Deserialize, Serialize};

use super::Movie;

/// Outcome of resolving one category on one backend.
///
/// `movies` keeps the backend's listing order and is empty when `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResult {
    #[serde(rename = "name")]
    pub server_name: String,
    pub movies: Vec<Movie>,
    pub error: Option<String>,
}

impl ServerResult {
    pub fn success(server_name: impl Into<String>, movies: Vec<Movie>) -> Self {
        Self {
            server_name: server_name.into(),
            movies,
            error: None,
        }
    }

    pub fn failure(server_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            movies: Vec::new(),
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-backend results in configured order plus the overall verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOutcome {
    pub results: Vec<ServerResult>,
    pub all_failed: bool,
}

impl AggregateOutcome {
    /// `all_failed` holds when every result carries an error, including when there are none.
    #[must_use]
    pub fn new(results: Vec<ServerResult>) -> Self {
        let all_failed = results.iter().all(|result| !result.is_ok());
        Self { results, all_failed }
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|result| !result.is_ok()).count()
    }
}

/// Reachability of one configured backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub name: String,
    pub url: String,
    pub error: Option<String>,
}
