// HTTP error handling

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use plexhub_core::AggregateOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// Application error with HTTP status code
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

/// Error response JSON structure
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = Json(ErrorResponse {
            error: self.message,
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}

/// Convert plexhub_core validation errors to HTTP errors
impl From<plexhub_core::Error> for AppError {
    fn from(err: plexhub_core::Error) -> Self {
        use plexhub_core::Error;

        match err {
            Error::InvalidInput(msg) => AppError::bad_request(msg),
            Error::UnknownCategory(name) => AppError::bad_request(format!(
                "directory name '{name}' is not valid, expected one of: {}",
                plexhub_core::validation::KNOWN_CATEGORIES.join(", ")
            )),
        }
    }
}

/// RFC 7807 body returned when no configured server could be resolved.
#[derive(Debug, Serialize, Deserialize)]
pub struct AggregateProblem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub servers: Vec<plexhub_core::ServerResult>,
}

impl AggregateProblem {
    pub const TYPE: &'static str = "urn:plexhub:problem:all-servers-failed";

    #[must_use]
    pub fn from_outcome(category: &str, outcome: AggregateOutcome) -> Self {
        let detail = if outcome.results.is_empty() {
            "no servers are configured".to_string()
        } else {
            format!(
                "all {} configured server(s) failed to resolve '{category}'",
                outcome.results.len()
            )
        };

        Self {
            problem_type: Self::TYPE.to_string(),
            title: "Failed to retrieve movies".to_string(),
            status: StatusCode::BAD_GATEWAY.as_u16(),
            detail,
            servers: outcome.results,
        }
    }
}

impl IntoResponse for AggregateProblem {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_GATEWAY,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}
