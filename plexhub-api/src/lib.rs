// plexhub API Library
//
// HTTP/JSON routes over the aggregation engine

pub mod http;

// Re-export commonly used types
pub use http::{create_router, AppState};
