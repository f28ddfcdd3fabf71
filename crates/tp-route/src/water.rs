//! Ship costs.

use tp_core::{PathfinderSettings, TileIndex, TransportType};
use tp_map::{Grid, StationKind, TileClass};

use crate::cost::{CostModel, Edge, is_curve, slope_cost, structure_cost, trackdir_length};
use crate::heuristic::track_distance;
use crate::NodeData;

#[derive(Copy, Clone, Debug, Default)]
pub struct WaterCost;

impl CostModel for WaterCost {
    const TRANSPORT: TransportType = TransportType::Water;

    fn cost<G: Grid + ?Sized>(
        &self,
        grid: &G,
        s: &PathfinderSettings,
        edge: &Edge<'_>,
        _data: &mut NodeData,
    ) -> u32 {
        let node = edge.node;
        let mut cost = match grid.tile_class(node.tile) {
            // Aqueducts.
            TileClass::TunnelBridge => structure_cost(grid, node),
            _ => trackdir_length(node.trackdir),
        };

        // Ships sailing straight over a buoy must swerve around it.
        if node.trackdir.is_axial()
            && grid.station_at(node.tile).is_some_and(|st| st.kind == StationKind::Buoy)
        {
            cost += s.buoy_penalty;
        }

        cost += slope_cost(grid, node, s.rail_slope_penalty);

        if is_curve(edge.parent.node.trackdir, node.trackdir) {
            cost += s.water_curve_penalty;
        }
        cost
    }

    #[inline]
    fn distance(&self, from: TileIndex, to: TileIndex) -> u32 {
        track_distance(from, to)
    }
}
