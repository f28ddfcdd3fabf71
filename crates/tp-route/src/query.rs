//! Route queries: the [`Pathfinder`] facade and the search problem behind it.
//!
//! # Queries
//!
//! | Method                         | Target              | Heuristic   | Cost bound                    |
//! |--------------------------------|---------------------|-------------|-------------------------------|
//! | [`Pathfinder::find_path`]      | any strategy        | per target  | none                          |
//! | [`Pathfinder::choose_trackdir`]| any strategy        | per target  | none                          |
//! | [`Pathfinder::check_reverse`]  | any strategy        | per target  | none                          |
//! | [`Pathfinder::find_nearest_depot`] | [`AnyDepot`]    | zero        | `maximum_go_to_depot_penalty` |
//! | [`Pathfinder::find_nearest_depot_pruned`] | each depot in turn | track distance | `maximum_go_to_depot_penalty` |
//!
//! Each query runs a fresh [`AyStar`] session.  The settings are validated
//! once, when the facade is built.

use tracing::{debug, trace};

use tp_core::{OrientedNode, PathfinderSettings, TileIndex, Trackdir, TransportDescriptor, TransportType};
use tp_map::Grid;
use tp_search::{AyStar, Problem, SearchConfig, SearchOutcome, SearchStats, Step, Termination};

use crate::cost::{CostModel, Edge};
use crate::follow::follow;
use crate::rail::RailCost;
use crate::road::RoadCost;
use crate::target::{AnyDepot, ExactTile, TargetStrategy};
use crate::water::WaterCost;
use crate::{ClosestApproach, NodeData, NodeFlags, RouteError, RouteResult};

// ── Starts ────────────────────────────────────────────────────────────────────

/// Where a vehicle begins.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Start {
    pub node:              OrientedNode,
    /// Skip the checks on leaving the start tile (depot and stop exits,
    /// tunnel mouths).  For vehicles already part-way off their tile.
    pub ignore_start_tile: bool,
}

impl Start {
    pub fn new(node: OrientedNode) -> Self {
        Self { node, ignore_start_tile: false }
    }

    pub fn ignoring_tile(node: OrientedNode) -> Self {
        Self { node, ignore_start_tile: true }
    }

    fn data(self) -> NodeData {
        let flags = if self.ignore_start_tile { NodeFlags::IGNORE_START_TILE } else { NodeFlags::NONE };
        NodeData { first_trackdir: None, flags }
    }
}

impl From<OrientedNode> for Start {
    fn from(node: OrientedNode) -> Self {
        Start::new(node)
    }
}

/// One start, or a forward start plus a reversed alternative that pays
/// `reverse_penalty` up front.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Starts {
    One(Start),
    Two { forward: Start, reverse: Start, reverse_penalty: u32 },
}

impl Starts {
    pub fn one(node: OrientedNode) -> Self {
        Starts::One(Start::new(node))
    }

    pub fn two(forward: OrientedNode, reverse: OrientedNode, reverse_penalty: u32) -> Self {
        Starts::Two { forward: Start::new(forward), reverse: Start::new(reverse), reverse_penalty }
    }

    /// `(node, initial g, data)` for each start, forward first.
    fn seeds(&self) -> Vec<(OrientedNode, u32, NodeData)> {
        match *self {
            Starts::One(s) => vec![(s.node, 0, s.data())],
            Starts::Two { forward, reverse, reverse_penalty } => {
                let mut data = reverse.data();
                data.flags.set(NodeFlags::REVERSE, true);
                vec![(forward.node, 0, forward.data()), (reverse.node, reverse_penalty, data)]
            }
        }
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// A path that reached its target.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FoundTarget {
    /// Trackdir to take on leaving the start; `None` if a start already
    /// satisfied the target.
    pub first_trackdir: Option<Trackdir>,
    pub cost:           u32,
    /// The end node.
    pub node:           OrientedNode,
    /// Heuristic distance to the target at the best node seen; 0 once the
    /// target is reached.
    pub bird_dist:      u32,
    /// The path began at the reversed start.
    pub reversed:       bool,
    /// Nodes from start to end.
    pub path:           Vec<OrientedNode>,
    pub stats:          SearchStats,
}

/// Answer of [`Pathfinder::choose_trackdir`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TrackdirChoice {
    pub trackdir:   Option<Trackdir>,
    /// `false` when `trackdir` only leads towards the closest approach.
    pub path_found: bool,
}

// ── RouteProblem ──────────────────────────────────────────────────────────────

/// A [`Problem`] over a [`Grid`] for one transport mode and one target.
///
/// Besides answering the engine's callbacks it keeps track of the node that
/// got closest to the target by the heuristic, for callers that need a best
/// guess when no path exists.
pub struct RouteProblem<'a, G: ?Sized, C, T> {
    grid:     &'a G,
    settings: &'a PathfinderSettings,
    desc:     TransportDescriptor,
    model:    C,
    target:   &'a T,
    closest:  ClosestApproach,
}

impl<'a, G, C, T> RouteProblem<'a, G, C, T>
where
    G: Grid + ?Sized,
    C: CostModel,
    T: TargetStrategy,
{
    pub fn new(grid: &'a G, settings: &'a PathfinderSettings, desc: TransportDescriptor, model: C, target: &'a T) -> Self {
        Self { grid, settings, desc, model, target, closest: ClosestApproach::default() }
    }

    #[inline]
    pub fn closest(&self) -> ClosestApproach {
        self.closest
    }
}

impl<G, C, T> Problem for RouteProblem<'_, G, C, T>
where
    G: Grid + ?Sized,
    C: CostModel,
    T: TargetStrategy,
{
    type Data = NodeData;

    fn neighbours(&mut self, current: &Step<NodeData>, out: &mut Vec<OrientedNode>) {
        follow(self.grid, &self.desc, self.settings.forbid_90_deg, current, out);
    }

    /// Never rejects: [`follow`] only yields legal successors, so every
    /// step it returns has a price.
    fn cost(&mut self, parent: &Step<NodeData>, node: OrientedNode, data: &mut NodeData) -> Option<u32> {
        if parent.is_start() {
            data.first_trackdir = Some(node.trackdir);
        }
        let is_end = self.target.is_end(self.grid, &self.desc, node);
        let edge = Edge { parent, node, is_end };
        let cost = self.model.cost(self.grid, self.settings, &edge, data);
        trace!(%node, cost, flags = ?data.flags, "step cost");
        Some(cost)
    }

    fn estimate(&mut self, node: OrientedNode, data: &NodeData) -> u32 {
        let Some(aim) = self.target.aim(self.grid, node.tile) else {
            return 0;
        };
        let dist = self.model.distance(node.tile, aim);
        if dist < self.closest.bird_dist {
            self.closest = ClosestApproach { trackdir: data.first_trackdir, node: Some(node), bird_dist: dist };
        }
        dist
    }

    fn is_end(&mut self, node: OrientedNode, _data: &NodeData) -> bool {
        self.target.is_end(self.grid, &self.desc, node)
    }

    fn found(&mut self, end: &Step<NodeData>) {
        self.closest = ClosestApproach { trackdir: end.data.first_trackdir, node: Some(end.node), bird_dist: 0 };
    }
}

// ── Pathfinder ────────────────────────────────────────────────────────────────

/// Entry point for route queries over one world.
///
/// Cheap to build; holds only borrowed state.  One `Pathfinder` may answer
/// any number of queries for vehicles of any mode.
pub struct Pathfinder<'a, G: ?Sized> {
    grid:     &'a G,
    settings: &'a PathfinderSettings,
}

impl<'a, G: Grid + ?Sized> Pathfinder<'a, G> {
    pub fn new(grid: &'a G, settings: &'a PathfinderSettings) -> RouteResult<Self> {
        settings.validate()?;
        Ok(Self { grid, settings })
    }

    #[inline]
    pub fn settings(&self) -> &PathfinderSettings {
        self.settings
    }

    /// Cheapest path from `starts` to a node satisfying `target`.
    pub fn find_path<T: TargetStrategy>(
        &self,
        desc: &TransportDescriptor,
        starts: &Starts,
        target: &T,
    ) -> RouteResult<FoundTarget> {
        self.search(desc, starts, target, None)
    }

    /// First trackdir to take from `start` towards `target`.
    ///
    /// Without a path this still answers with the first trackdir towards the
    /// node that got closest, so a vehicle keeps moving sensibly.
    pub fn choose_trackdir<T: TargetStrategy>(
        &self,
        desc: &TransportDescriptor,
        start: Start,
        target: &T,
    ) -> RouteResult<TrackdirChoice> {
        match self.find_path(desc, &Starts::One(start), target) {
            Ok(found) => Ok(TrackdirChoice { trackdir: found.first_trackdir, path_found: true }),
            Err(err) => match err.closest() {
                Some(closest) => Ok(TrackdirChoice { trackdir: closest.trackdir, path_found: false }),
                None => Err(err),
            },
        }
    }

    /// Whether a train should turn around.
    ///
    /// Searches from the front of the train as it heads and from the rear
    /// turned around, at no extra charge; `true` if the cheapest path starts
    /// from the rear.  `tail` is the rear node in the train's current
    /// direction of travel.
    pub fn check_reverse<T: TargetStrategy>(
        &self,
        desc: &TransportDescriptor,
        front: OrientedNode,
        tail: OrientedNode,
        target: &T,
    ) -> RouteResult<bool> {
        match self.find_path(desc, &Starts::two(front, tail.reversed(), 0), target) {
            Ok(found) => Ok(found.reversed),
            Err(err) if err.is_unreachable() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Cheapest depot reachable within `maximum_go_to_depot_penalty`
    /// (unbounded when that is 0).
    pub fn find_nearest_depot(&self, desc: &TransportDescriptor, starts: &Starts) -> RouteResult<FoundTarget> {
        self.search(desc, starts, &AnyDepot, self.depot_cost_bound())
    }

    /// Same answer as [`find_nearest_depot`](Self::find_nearest_depot), by
    /// trying depots one at a time with a targeted search.
    ///
    /// Candidates come from the grid's spatial index and are tried in order
    /// of their heuristic distance; once that lower bound reaches the best
    /// cost found the rest cannot win.  Cheaper than a blind search when
    /// depots are few and the network is large.
    pub fn find_nearest_depot_pruned(&self, desc: &TransportDescriptor, start: Start) -> RouteResult<FoundTarget> {
        let from = start.node.tile;
        let mut candidates: Vec<(u32, usize, TileIndex)> = self
            .grid
            .depots_by_distance(from, desc.transport)
            .into_iter()
            .enumerate()
            .map(|(rank, depot)| (self.distance(desc.transport, from, depot), rank, depot))
            .collect();
        candidates.sort_unstable();
        debug!(transport = %desc.transport, candidates = candidates.len(), "depot trial search");

        let starts = Starts::One(start);
        let bound = self.depot_cost_bound();
        let mut best: Option<FoundTarget> = None;
        let mut expanded = 0;
        for (lower_bound, _, depot) in candidates {
            if best.as_ref().is_some_and(|b| lower_bound >= b.cost) {
                break;
            }
            match self.search(desc, &starts, &AnyDepotAt(ExactTile::new(depot)), bound) {
                Ok(found) => {
                    expanded += found.stats.nodes_expanded;
                    if best.as_ref().is_none_or(|b| found.cost < b.cost) {
                        best = Some(found);
                    }
                }
                Err(err) if err.is_unreachable() => {
                    expanded += err.stats().map_or(0, |s| s.nodes_expanded);
                }
                Err(err) => return Err(err),
            }
        }

        match best {
            Some(mut found) => {
                found.stats.nodes_expanded = expanded;
                Ok(found)
            }
            None => {
                let stats = SearchStats {
                    nodes_expanded: expanded,
                    termination: Some(Termination::NoPath),
                    ..SearchStats::default()
                };
                Err(RouteError::NoPath { closest: ClosestApproach::default(), stats })
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn depot_cost_bound(&self) -> Option<u32> {
        Some(self.settings.maximum_go_to_depot_penalty).filter(|&max| max > 0)
    }

    fn distance(&self, transport: TransportType, from: TileIndex, to: TileIndex) -> u32 {
        match transport {
            TransportType::Rail => RailCost.distance(from, to),
            TransportType::Road => RoadCost.distance(from, to),
            TransportType::Water => WaterCost.distance(from, to),
        }
    }

    fn search<T: TargetStrategy>(
        &self,
        desc: &TransportDescriptor,
        starts: &Starts,
        target: &T,
        max_path_cost: Option<u32>,
    ) -> RouteResult<FoundTarget> {
        let seeds = starts.seeds();
        let size = self.grid.map_size();
        if let Some(&(node, ..)) = seeds.iter().find(|(node, ..)| !size.contains(node.tile)) {
            return Err(RouteError::InvalidStart(node));
        }
        debug!(transport = %desc.transport, ?starts, ?target, "route query");
        match desc.transport {
            TransportType::Rail => self.run(RailCost, desc, &seeds, target, max_path_cost),
            TransportType::Road => self.run(RoadCost, desc, &seeds, target, max_path_cost),
            TransportType::Water => self.run(WaterCost, desc, &seeds, target, max_path_cost),
        }
    }

    fn run<C: CostModel, T: TargetStrategy>(
        &self,
        model: C,
        desc: &TransportDescriptor,
        seeds: &[(OrientedNode, u32, NodeData)],
        target: &T,
        max_path_cost: Option<u32>,
    ) -> RouteResult<FoundTarget> {
        debug_assert_eq!(C::TRANSPORT, desc.transport);
        let problem = RouteProblem::new(self.grid, self.settings, *desc, model, target);
        let config = SearchConfig { max_path_cost, ..SearchConfig::from_settings(self.settings) };
        let mut search = AyStar::new(problem, config);
        for &(node, g, data) in seeds {
            search.add_start(node, g, data)?;
        }

        let outcome = search.run()?;
        let stats = search.stats();
        let closest = search.problem().closest();
        match outcome {
            SearchOutcome::Found(end) => {
                debug!(end = %end.node, cost = end.g, expanded = stats.nodes_expanded, "route found");
                Ok(FoundTarget {
                    first_trackdir: end.data.first_trackdir,
                    cost:           end.g,
                    node:           end.node,
                    bird_dist:      closest.bird_dist,
                    reversed:       end.data.flags.contains(NodeFlags::REVERSE),
                    path:           search.path(),
                    stats,
                })
            }
            SearchOutcome::NoPath => Err(RouteError::NoPath { closest, stats }),
            SearchOutcome::BudgetExceeded => Err(RouteError::BudgetExceeded { closest, stats }),
        }
    }
}

/// One specific depot, accepted only if the vehicle may use it.
#[derive(Copy, Clone, Debug)]
struct AnyDepotAt(ExactTile);

impl TargetStrategy for AnyDepotAt {
    fn is_end<G: Grid + ?Sized>(&self, grid: &G, desc: &TransportDescriptor, node: OrientedNode) -> bool {
        self.0.is_end(grid, desc, node) && AnyDepot.is_end(grid, desc, node)
    }

    fn aim<G: Grid + ?Sized>(&self, grid: &G, from: TileIndex) -> Option<TileIndex> {
        self.0.aim(grid, from)
    }
}
