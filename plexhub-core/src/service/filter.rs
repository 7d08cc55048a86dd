use crate::models::{AggregateOutcome, ServerResult};

/// Keep movies added at or after `threshold` (seconds since the epoch).
///
/// Only successful results take part; a result left with no movies is
/// dropped rather than returned empty.
#[must_use]
pub fn filter_since(outcome: AggregateOutcome, threshold: u64) -> Vec<ServerResult> {
    outcome
        .results
        .into_iter()
        .filter(ServerResult::is_ok)
        .filter_map(|mut result| {
            result.movies.retain(|movie| movie.added_at >= threshold);
            (!result.movies.is_empty()).then_some(result)
        })
        .collect()
}
