//! What a query is looking for.
//!
//! A [`TargetStrategy`] decides which nodes end the search and which tile
//! the heuristic aims at.  Returning `None` from [`aim`](TargetStrategy::aim)
//! turns the query into a uniform-cost search, which is what "nearest of
//! many" queries need.

use std::fmt;

use tp_core::{OrientedNode, StationId, TileIndex, Trackdir, TransportDescriptor, TransportType};
use tp_map::{Grid, RoadStopKind, StationKind};

pub trait TargetStrategy: fmt::Debug {
    fn is_end<G: Grid + ?Sized>(&self, grid: &G, desc: &TransportDescriptor, node: OrientedNode) -> bool;

    /// Tile the heuristic measures towards from `from`.
    fn aim<G: Grid + ?Sized>(&self, grid: &G, from: TileIndex) -> Option<TileIndex>;
}

// ── ExactTile ─────────────────────────────────────────────────────────────────

/// A specific tile, optionally on a specific trackdir.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ExactTile {
    pub tile:     TileIndex,
    pub trackdir: Option<Trackdir>,
}

impl ExactTile {
    pub fn new(tile: TileIndex) -> Self {
        Self { tile, trackdir: None }
    }

    pub fn on_trackdir(tile: TileIndex, trackdir: Trackdir) -> Self {
        Self { tile, trackdir: Some(trackdir) }
    }
}

impl TargetStrategy for ExactTile {
    fn is_end<G: Grid + ?Sized>(&self, _grid: &G, _desc: &TransportDescriptor, node: OrientedNode) -> bool {
        node.tile == self.tile && self.trackdir.is_none_or(|td| td == node.trackdir)
    }

    #[inline]
    fn aim<G: Grid + ?Sized>(&self, _grid: &G, _from: TileIndex) -> Option<TileIndex> {
        Some(self.tile)
    }
}

// ── StationTarget ─────────────────────────────────────────────────────────────

/// Any suitable tile of a station.
///
/// Trains accept any platform tile.  Road vehicles need a road stop of the
/// requested kind, and articulated vehicles a drive-through one.  Ships
/// accept any tile of the station they can float on.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StationTarget {
    pub station:     StationId,
    pub stop_kind:   Option<RoadStopKind>,
    pub articulated: bool,
}

impl StationTarget {
    pub fn new(station: StationId) -> Self {
        Self { station, stop_kind: None, articulated: false }
    }

    pub fn road_stop(station: StationId, kind: RoadStopKind, articulated: bool) -> Self {
        Self { station, stop_kind: Some(kind), articulated }
    }
}

impl TargetStrategy for StationTarget {
    fn is_end<G: Grid + ?Sized>(&self, grid: &G, desc: &TransportDescriptor, node: OrientedNode) -> bool {
        let Some(st) = grid.station_at(node.tile).filter(|st| st.station == self.station) else {
            return false;
        };
        match (desc.transport, st.kind) {
            (TransportType::Rail, StationKind::Rail { .. }) => true,
            (TransportType::Road, StationKind::RoadStop { kind, drive_through, .. }) => {
                self.stop_kind.is_none_or(|k| k == kind) && (drive_through || !self.articulated)
            }
            (TransportType::Water, _) => true,
            _ => false,
        }
    }

    /// Nearest point of the station's bounding rectangle.
    fn aim<G: Grid + ?Sized>(&self, grid: &G, from: TileIndex) -> Option<TileIndex> {
        grid.closest_station_tile(self.station, from)
    }
}

// ── AnyDepot ──────────────────────────────────────────────────────────────────

/// Any depot the vehicle may use.  Has no aim, so searches for it expand
/// breadth-first by cost.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct AnyDepot;

impl TargetStrategy for AnyDepot {
    fn is_end<G: Grid + ?Sized>(&self, grid: &G, desc: &TransportDescriptor, node: OrientedNode) -> bool {
        grid.is_depot(node.tile, desc.transport)
            && (desc.transport == TransportType::Water || grid.owner_of(node.tile) == desc.owner)
    }

    #[inline]
    fn aim<G: Grid + ?Sized>(&self, _grid: &G, _from: TileIndex) -> Option<TileIndex> {
        None
    }
}
