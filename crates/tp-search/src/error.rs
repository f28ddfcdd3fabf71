//! Search contract violations.

use thiserror::Error;

use crate::SearchState;

/// Misuse of a search session.  "No path" is not an error here; it is a
/// [`SearchOutcome`](crate::SearchOutcome).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search has no start node")]
    NoStart,

    #[error("starts can only be added before running (state {0:?})")]
    NotIdle(SearchState),
}

pub type SearchResult<T> = Result<T, SearchError>;
