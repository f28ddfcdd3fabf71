//! Road vehicle costs.
//!
//! Every road tile costs a full tile length regardless of the piece, so
//! turning is charged through `road_curve_penalty` alone.  Road stops are
//! priced by how busy they are.

use tp_core::{DiagDir, OrientedNode, PathfinderSettings, TILE_LENGTH, TileIndex, TransportType};
use tp_map::{Grid, StationTile, TileClass};

use crate::cost::{CostModel, Edge, slope_cost, structure_cost};
use crate::heuristic::manhattan_distance;
use crate::NodeData;

#[derive(Copy, Clone, Debug, Default)]
pub struct RoadCost;

impl CostModel for RoadCost {
    const TRANSPORT: TransportType = TransportType::Road;

    fn cost<G: Grid + ?Sized>(
        &self,
        grid: &G,
        s: &PathfinderSettings,
        edge: &Edge<'_>,
        _data: &mut NodeData,
    ) -> u32 {
        let node = edge.node;
        let mut cost = match grid.tile_class(node.tile) {
            TileClass::TunnelBridge => structure_cost(grid, node),
            TileClass::Road if grid.level_crossing(node.tile).is_some() => TILE_LENGTH + s.crossing_penalty,
            TileClass::Station => TILE_LENGTH + stop_cost(grid, s, node),
            _ => TILE_LENGTH,
        };

        cost += slope_cost(grid, node, s.rail_slope_penalty);

        if !node.trackdir.is_axial() {
            cost += s.road_curve_penalty;
        }
        cost
    }

    #[inline]
    fn distance(&self, from: TileIndex, to: TileIndex) -> u32 {
        manhattan_distance(from, to)
    }
}

/// Extra cost of driving into the road stop under `node`.
fn stop_cost<G: Grid + ?Sized>(grid: &G, s: &PathfinderSettings, node: OrientedNode) -> u32 {
    let Some(stop) = grid.station_at(node.tile) else {
        return 0;
    };
    let dir = node.trackdir.exitdir();
    if stop.is_drive_through() {
        let mut cost = s.road_drive_through_penalty;
        // A run of drive-through tiles is priced once, on its first tile.
        if !continues_run(grid, node.tile, dir, stop) {
            if let Some(occ) = grid.road_stop_occupancy(node.tile, dir).filter(|o| o.capacity > 0) {
                cost += s.road_dt_occupied_penalty * occ.occupied.min(occ.capacity) / occ.capacity;
            }
        }
        cost
    } else if stop.is_bay_stop() {
        let occupied = grid.road_stop_occupancy(node.tile, dir).map_or(0, |o| o.occupied.min(2));
        s.road_bay_occupied_penalty * occupied / 2
    } else {
        0
    }
}

/// The tile behind `tile` belongs to the same run of drive-through stops.
fn continues_run<G: Grid + ?Sized>(grid: &G, tile: TileIndex, dir: DiagDir, stop: StationTile) -> bool {
    let prev = grid.tile_offset(tile, dir.reverse());
    prev.is_valid()
        && grid
            .station_at(prev)
            .is_some_and(|p| p.station == stop.station && p.is_drive_through())
}
