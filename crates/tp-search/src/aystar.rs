//! A* search session and the [`Problem`] trait.
//!
//! # Session lifecycle
//!
//! ```text
//! Idle ──add_start()──▶ Idle ──run()──▶ Running ──▶ Found
//!                                              ├──▶ Exhausted   (frontier empty)
//!                                              └──▶ Aborted     (node budget spent)
//! ```
//!
//! One `AyStar` answers one query.  It owns the frontier, the visited set
//! and an append-only arena of path records, so nothing leaks between
//! queries; [`AyStar::reset`] keeps the allocations for a pooled session.
//!
//! # Ordering
//!
//! The frontier is a min-heap on `(f, seq)` where `seq` is a per-session
//! insertion counter, so nodes of equal `f` come out first-in first-out and
//! a query is fully reproducible.  Heap entries superseded by a cheaper path
//! stay in the heap and are skipped when popped (lazy deletion), as in the
//! Dijkstra router this engine grew out of.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use tracing::{debug, trace};

use tp_core::{OrientedNode, PathfinderSettings};

use crate::visited::{Visit, VisitedSet};
use crate::{SearchError, SearchResult};

// ── Problem ───────────────────────────────────────────────────────────────────

/// A popped node as seen by the [`Problem`] callbacks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Step<D> {
    pub node:   OrientedNode,
    /// Cumulative cost from the start.
    pub g:      u32,
    pub data:   D,
    /// Predecessor on the best path; `None` for a start node.
    pub parent: Option<OrientedNode>,
}

impl<D> Step<D> {
    #[inline]
    pub fn is_start(&self) -> bool {
        self.parent.is_none()
    }
}

/// Everything transport specific about one query.
///
/// The engine copies a parent's `data` into each child before calling
/// [`cost`](Problem::cost), which may update it (flags raised along the
/// path, the first decision taken).
pub trait Problem {
    /// Per-node payload carried along paths.
    type Data: Copy + Default + fmt::Debug;

    /// Push every node reachable from `current` in one step onto `out`.
    fn neighbours(&mut self, current: &Step<Self::Data>, out: &mut Vec<OrientedNode>);

    /// Cost of stepping from `parent` to `node`, or `None` if the step is
    /// not allowed after all.
    fn cost(&mut self, parent: &Step<Self::Data>, node: OrientedNode, data: &mut Self::Data) -> Option<u32>;

    /// Lower bound on the remaining cost from `node` to any target.
    fn estimate(&mut self, node: OrientedNode, data: &Self::Data) -> u32;

    /// Whether `node` satisfies the query.
    fn is_end(&mut self, node: OrientedNode, data: &Self::Data) -> bool;

    /// Called once with the winning end node.
    fn found(&mut self, _end: &Step<Self::Data>) {}
}

// ── Config / state / stats ────────────────────────────────────────────────────

/// Limits of one search session.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SearchConfig {
    /// Expansions before giving up.
    pub max_search_nodes: u32,
    /// Children whose g exceeds this are dropped.
    pub max_path_cost:    Option<u32>,
    pub hash_bits:        u8,
    pub visited_capacity: u32,
}

impl SearchConfig {
    pub fn from_settings(s: &PathfinderSettings) -> Self {
        Self {
            max_search_nodes: s.max_search_nodes,
            max_path_cost:    None,
            hash_bits:        s.hash_bits,
            visited_capacity: s.visited_capacity,
        }
    }

    pub fn with_max_path_cost(mut self, max: u32) -> Self {
        self.max_path_cost = Some(max);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::from_settings(&PathfinderSettings::default())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SearchState {
    Idle,
    Running,
    Found,
    /// Frontier ran dry: no path.
    Exhausted,
    /// Node budget spent before a target was popped.
    Aborted,
}

/// How a finished search ended.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Termination {
    Found,
    NoPath,
    BudgetExceeded,
}

impl Termination {
    pub fn as_str(self) -> &'static str {
        match self {
            Termination::Found => "found",
            Termination::NoPath => "no_path",
            Termination::BudgetExceeded => "budget_exceeded",
        }
    }
}

/// Diagnostic counters for tuning and tests.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct SearchStats {
    /// Nodes popped and expanded (the budgeted quantity).
    pub nodes_expanded:  u32,
    /// Popped entries skipped because a cheaper path had superseded them.
    pub stale_skipped:   u32,
    /// Children accepted into the frontier.
    pub nodes_opened:    u32,
    /// Unseen nodes pruned because the visited arena was full.
    pub arena_exhausted: u32,
    pub termination:     Option<Termination>,
}

/// Result of [`AyStar::run`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SearchOutcome<D> {
    Found(Step<D>),
    NoPath,
    BudgetExceeded,
}

// ── AyStar ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct PathRecord<D> {
    node:   OrientedNode,
    g:      u32,
    parent: Option<u32>,
    data:   D,
}

/// One search session over a [`Problem`].
pub struct AyStar<P: Problem> {
    problem:    P,
    config:     SearchConfig,
    state:      SearchState,
    visited:    VisitedSet,
    frontier:   BinaryHeap<Reverse<(u32, u64, u32)>>,
    records:    Vec<PathRecord<P::Data>>,
    seq:        u64,
    stats:      SearchStats,
    found:      Option<u32>,
    scratch:    Vec<OrientedNode>,
}

impl<P: Problem> AyStar<P> {
    pub fn new(problem: P, config: SearchConfig) -> Self {
        Self {
            problem,
            config,
            state:    SearchState::Idle,
            visited:  VisitedSet::new(config.hash_bits, config.visited_capacity as usize),
            frontier: BinaryHeap::new(),
            records:  Vec::new(),
            seq:      0,
            stats:    SearchStats::default(),
            found:    None,
            scratch:  Vec::with_capacity(8),
        }
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        SearchStats { arena_exhausted: self.visited.refused(), ..self.stats }
    }

    #[inline]
    pub fn problem(&self) -> &P {
        &self.problem
    }

    #[inline]
    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }

    pub fn into_problem(self) -> P {
        self.problem
    }

    /// Return to `Idle`, dropping all search state but keeping allocations.
    pub fn reset(&mut self) {
        self.state = SearchState::Idle;
        self.visited.clear();
        self.frontier.clear();
        self.records.clear();
        self.seq = 0;
        self.stats = SearchStats::default();
        self.found = None;
    }

    fn push(&mut self, record: PathRecord<P::Data>, h: u32) {
        let f = record.g.saturating_add(h);
        let idx = self.records.len() as u32;
        self.records.push(record);
        self.frontier.push(Reverse((f, self.seq, idx)));
        self.seq += 1;
    }

    fn step_of(&self, idx: u32) -> Step<P::Data> {
        let r = &self.records[idx as usize];
        Step {
            node:   r.node,
            g:      r.g,
            data:   r.data,
            parent: r.parent.map(|p| self.records[p as usize].node),
        }
    }

    /// Seed the frontier with `node` at cost `g`.
    ///
    /// A start already present with a lower or equal cost is ignored.
    pub fn add_start(&mut self, node: OrientedNode, g: u32, data: P::Data) -> SearchResult<()> {
        if self.state != SearchState::Idle {
            return Err(SearchError::NotIdle(self.state));
        }
        if self.visited.lookup_or_insert(node, g) == Visit::Improved {
            let h = self.problem.estimate(node, &data);
            trace!(%node, g, h, "start");
            self.push(PathRecord { node, g, parent: None, data }, h);
        }
        Ok(())
    }

    /// Expand the best frontier node once.
    ///
    /// Returns the new state; `Running` means call again.
    pub fn step(&mut self) -> SearchState {
        if self.state == SearchState::Idle {
            self.state = SearchState::Running;
        }
        if self.state != SearchState::Running {
            return self.state;
        }

        let Some(Reverse((f, _, idx))) = self.frontier.pop() else {
            self.state = SearchState::Exhausted;
            return self.state;
        };
        let current = self.step_of(idx);

        // Skip stale heap entries.
        if self.visited.get(current.node).is_some_and(|best| current.g > best) {
            self.stats.stale_skipped += 1;
            return self.state;
        }

        if self.problem.is_end(current.node, &current.data) {
            self.problem.found(&current);
            self.found = Some(idx);
            self.state = SearchState::Found;
            return self.state;
        }

        trace!(node = %current.node, g = current.g, f, "expand");
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        self.problem.neighbours(&current, &mut scratch);
        for &next in &scratch {
            let mut data = current.data;
            let Some(cost) = self.problem.cost(&current, next, &mut data) else {
                continue;
            };
            let Some(g) = current.g.checked_add(cost) else {
                continue;
            };
            if self.config.max_path_cost.is_some_and(|max| g > max) {
                continue;
            }
            if self.visited.lookup_or_insert(next, g) == Visit::NotImproved {
                continue;
            }
            let h = self.problem.estimate(next, &data);
            trace!(node = %next, g, h, "open");
            self.push(PathRecord { node: next, g, parent: Some(idx), data }, h);
            self.stats.nodes_opened += 1;
        }
        self.scratch = scratch;

        self.stats.nodes_expanded += 1;
        if self.stats.nodes_expanded >= self.config.max_search_nodes {
            self.state = SearchState::Aborted;
        }
        self.state
    }

    /// Step until a target is popped, the frontier empties or the node
    /// budget is spent.
    pub fn run(&mut self) -> SearchResult<SearchOutcome<P::Data>> {
        if self.state == SearchState::Idle && self.records.is_empty() {
            return Err(SearchError::NoStart);
        }
        while self.step() == SearchState::Running {}

        let (termination, outcome) = match (self.state, self.found) {
            (SearchState::Found, Some(idx)) => (Termination::Found, SearchOutcome::Found(self.step_of(idx))),
            (SearchState::Aborted, _) => (Termination::BudgetExceeded, SearchOutcome::BudgetExceeded),
            _ => (Termination::NoPath, SearchOutcome::NoPath),
        };
        self.stats.termination = Some(termination);
        debug!(
            outcome = termination.as_str(),
            expanded = self.stats.nodes_expanded,
            stale = self.stats.stale_skipped,
            refused = self.visited.refused(),
            "search finished"
        );
        Ok(outcome)
    }

    /// Nodes of the winning path, start first.  Empty unless `Found`.
    pub fn path(&self) -> Vec<OrientedNode> {
        let mut path = Vec::new();
        let mut cur = self.found;
        while let Some(i) = cur {
            let r = &self.records[i as usize];
            path.push(r.node);
            cur = r.parent;
        }
        path.reverse();
        path
    }
}
