//! Route query errors.

use thiserror::Error;

use tp_core::{OrientedNode, TpError, Trackdir};
use tp_search::{SearchError, SearchStats};

/// Where the search got closest to its target, for callers that still want
/// to move somewhere sensible when no full path exists.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ClosestApproach {
    /// First trackdir of the path towards the closest node.
    pub trackdir:  Option<Trackdir>,
    pub node:      Option<OrientedNode>,
    /// Heuristic distance from that node to the target.
    pub bird_dist: u32,
}

impl Default for ClosestApproach {
    fn default() -> Self {
        Self { trackdir: None, node: None, bird_dist: u32::MAX }
    }
}

#[derive(Debug, Error)]
pub enum RouteError {
    /// The frontier ran dry: the target is unreachable.
    #[error("no path to the target")]
    NoPath { closest: ClosestApproach, stats: SearchStats },

    /// The node budget ran out first.
    #[error("node budget exhausted before reaching the target")]
    BudgetExceeded { closest: ClosestApproach, stats: SearchStats },

    #[error("start {0} is outside the map")]
    InvalidStart(OrientedNode),

    #[error(transparent)]
    Settings(#[from] TpError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl RouteError {
    /// `true` for the two "no route" outcomes.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RouteError::NoPath { .. } | RouteError::BudgetExceeded { .. })
    }

    pub fn closest(&self) -> Option<ClosestApproach> {
        match self {
            RouteError::NoPath { closest, .. } | RouteError::BudgetExceeded { closest, .. } => Some(*closest),
            _ => None,
        }
    }

    pub fn stats(&self) -> Option<SearchStats> {
        match self {
            RouteError::NoPath { stats, .. } | RouteError::BudgetExceeded { stats, .. } => Some(*stats),
            _ => None,
        }
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
