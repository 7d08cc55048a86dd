pub mod movie;
pub mod server;

pub use movie::Movie;
pub use server::{AggregateOutcome, ServerResult, ServerStatus};
