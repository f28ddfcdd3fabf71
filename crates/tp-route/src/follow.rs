//! Neighbour expansion shared by every transport mode.
//!
//! One expansion moves a vehicle off its current tile through the exit edge
//! of its trackdir.  In order of precedence:
//!
//! | Situation                               | Successors                          |
//! |-----------------------------------------|-------------------------------------|
//! | start node flagged `IGNORE_START_TILE`  | driveable trackdirs of the next tile |
//! | on a tunnel/bridge mouth, facing in     | same trackdir on the far mouth      |
//! | single-entry tile, not facing its exit  | reversed trackdir, same tile        |
//! | next tile off-map or not enterable      | road: reverse in place; else none   |
//! | next tile has no driveable trackdir     | road: reverse in place; else none   |
//! | otherwise                               | driveable trackdirs of the next tile |
//!
//! Trams count as rail-like here: they only turn back on a tram stub.

use tracing::trace;

use tp_core::{DiagDir, OrientedNode, Owner, TileIndex, Trackdir, TrackdirBits, TransportDescriptor, TransportType};
use tp_map::{Grid, StationKind, TileClass};
use tp_search::Step;

use crate::{NodeData, NodeFlags};

/// Push every successor of `current` onto `out`.
pub fn follow<G: Grid + ?Sized>(
    grid: &G,
    desc: &TransportDescriptor,
    forbid_90: bool,
    current: &Step<NodeData>,
    out: &mut Vec<OrientedNode>,
) {
    let src_tile = current.node.tile;
    let mut src_td = current.node.trackdir;
    let exitdir = src_td.exitdir();
    let can_turn_back = desc.transport == TransportType::Road && !desc.is_tram();
    let ignore_src = current.is_start() && current.data.flags.contains(NodeFlags::IGNORE_START_TILE);

    let (dst_tile, trackdirs) = if ignore_src {
        let dst = grid.tile_offset(src_tile, exitdir);
        if !dst.is_valid() {
            return;
        }
        (dst, driveable(grid, desc, forbid_90, dst, src_td))
    } else if let Some(tb) = grid.tunnel_bridge(src_tile).filter(|tb| tb.direction == exitdir) {
        (tb.other_end, TrackdirBits::single(src_td))
    } else if force_reverse(grid, desc, src_tile, exitdir) {
        (src_tile, TrackdirBits::single(src_td.reverse()))
    } else {
        let mut dst = grid.tile_offset(src_tile, exitdir);
        if !dst.is_valid() || !can_enter(grid, desc, dst, exitdir) {
            if !can_turn_back {
                return;
            }
            dst = src_tile;
            src_td = src_td.reverse();
        }
        let mut tds = driveable(grid, desc, forbid_90, dst, src_td);
        if tds.is_empty() {
            if !can_turn_back {
                return;
            }
            dst = src_tile;
            src_td = src_td.reverse();
            tds = driveable(grid, desc, forbid_90, dst, src_td);
        }
        (dst, tds)
    };

    for td in trackdirs.iter() {
        if desc.transport == TransportType::Rail && faces_one_way_signal(grid, dst_tile, td) {
            trace!(tile = %dst_tile, %td, "one-way signal from behind");
            continue;
        }
        out.push(OrientedNode::new(dst_tile, td));
    }
}

/// Trackdirs on `tile` a vehicle arriving on `from` (a trackdir of the
/// previous tile) may continue on.
pub fn driveable<G: Grid + ?Sized>(
    grid: &G,
    desc: &TransportDescriptor,
    forbid_90: bool,
    tile: TileIndex,
    from: Trackdir,
) -> TrackdirBits {
    let mut tds = grid.trackdirs(tile, desc) & from.reaches();
    if forbid_90 && desc.transport != TransportType::Road {
        tds &= !from.crosses();
    }
    tds
}

/// Whether a vehicle moving in `dir` may enter `tile` at all.
pub fn can_enter<G: Grid + ?Sized>(grid: &G, desc: &TransportDescriptor, tile: TileIndex, dir: DiagDir) -> bool {
    if grid.tunnel_bridge(tile).is_some_and(|tb| tb.direction != dir) {
        return false;
    }
    if !owner_allows(grid, desc.owner, tile, dir) {
        return false;
    }
    if desc.transport == TransportType::Rail && !grid.rail_type(tile).is_some_and(|rt| desc.rail_types.contains(rt)) {
        return false;
    }
    // Single-entry tiles are entered through their open edge only.
    grid.single_entry(tile, desc).is_none_or(|entry| entry == dir.reverse())
}

/// Private infrastructure may only be entered by its owner; public roads,
/// drive-through stops, water and buoys are open to everyone.
pub fn owner_allows<G: Grid + ?Sized>(grid: &G, owner: Owner, tile: TileIndex, enterdir: DiagDir) -> bool {
    let private = match grid.tile_class(tile) {
        TileClass::Rail => true,
        TileClass::Station => matches!(
            grid.station_at(tile).map(|s| s.kind),
            Some(StationKind::Rail { .. } | StationKind::RoadStop { drive_through: false, .. })
        ),
        TileClass::Road => {
            grid.is_depot(tile, TransportType::Road)
                || grid.level_crossing(tile).is_some_and(|road_axis| road_axis != enterdir.axis())
        }
        TileClass::TunnelBridge => grid.tunnel_bridge(tile).is_some_and(|tb| tb.transport == TransportType::Rail),
        TileClass::Clear | TileClass::Water => false,
    };
    !private || grid.owner_of(tile) == owner
}

/// A vehicle on a single-entry tile not heading for its exit must turn.
#[inline]
fn force_reverse<G: Grid + ?Sized>(grid: &G, desc: &TransportDescriptor, tile: TileIndex, exitdir: DiagDir) -> bool {
    grid.single_entry(tile, desc).is_some_and(|entry| entry != exitdir)
}

/// A one-way signal guards the opposite trackdir and nothing guards `td`.
#[inline]
fn faces_one_way_signal<G: Grid + ?Sized>(grid: &G, tile: TileIndex, td: Trackdir) -> bool {
    grid.signal(tile, td).is_none() && grid.signal(tile, td.reverse()).is_some_and(|s| s.kind.is_one_way())
}
