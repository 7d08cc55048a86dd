pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod validation;

pub use config::Config;
pub use error::{Error, ResolveError, Result};
pub use models::{AggregateOutcome, Movie, ServerResult, ServerStatus};
pub use service::{filter_since, DirectoryResolver, ServerAggregator};
