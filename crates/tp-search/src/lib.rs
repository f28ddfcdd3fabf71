//! `tp-search` — the transport-agnostic search engine.
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`visited`] | `VisitedSet`: oriented node → best g, fixed-size arena     |
//! | [`aystar`]  | `AyStar` session, the `Problem` trait, `SearchStats`       |
//! | [`error`]   | `SearchError`, `SearchResult<T>`                           |
//!
//! A session is created per query, seeded with one or more starts and run
//! to completion.  Everything transport specific (which neighbours exist,
//! what a step costs, when the target is reached) comes from a [`Problem`].

pub mod aystar;
pub mod error;
pub mod visited;


pub use aystar::{AyStar, Problem, SearchConfig, SearchOutcome, SearchState, SearchStats, Step, Termination};
pub use error::{SearchError, SearchResult};
pub use visited::{Visit, VisitedSet};
