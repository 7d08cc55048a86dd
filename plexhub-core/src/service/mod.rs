pub mod aggregator;
pub mod filter;
pub mod library;

pub use aggregator::ServerAggregator;
pub use filter::filter_since;
pub use library::DirectoryResolver;
