//! Train costs.
//!
//! Besides track length, a train pays for the signals it will meet:
//!
//! | Event                                          | Penalty                    |
//! |------------------------------------------------|----------------------------|
//! | first red block/entry signal on the path       | `rail_firstred_penalty`      |
//! | first red exit/combo presignal on the path     | `rail_firstred_exit_penalty` |
//! | path ends with the last passed signal red      | `rail_lastred_penalty`       |
//! | passing the back of a two-way path signal      | `rail_pbs_signal_back_penalty` (until the third signal) |
//!
//! Only the first red signal costs extra because later ones are likely to
//! have cleared by the time the train gets there.

use tp_core::{PathfinderSettings, TILE_LENGTH, TileIndex, TransportType};
use tp_map::{Grid, TileClass};

use crate::cost::{CostModel, Edge, is_curve, slope_cost, structure_cost, trackdir_length};
use crate::heuristic::track_distance;
use crate::{NodeData, NodeFlags};

#[derive(Copy, Clone, Debug, Default)]
pub struct RailCost;

impl CostModel for RailCost {
    const TRANSPORT: TransportType = TransportType::Rail;

    fn cost<G: Grid + ?Sized>(
        &self,
        grid: &G,
        s: &PathfinderSettings,
        edge: &Edge<'_>,
        data: &mut NodeData,
    ) -> u32 {
        let tile = edge.node.tile;
        let td = edge.node.trackdir;

        let mut cost = match grid.tile_class(tile) {
            TileClass::TunnelBridge => structure_cost(grid, edge.node),
            TileClass::Rail => trackdir_length(td),
            // Level crossing.
            TileClass::Road => TILE_LENGTH,
            TileClass::Station => TILE_LENGTH + s.rail_station_penalty,
            TileClass::Clear | TileClass::Water => 0,
        };

        if let Some(signal) = grid.signal(tile, td) {
            let flags = &mut data.flags;
            if signal.is_red() {
                if !flags.contains(NodeFlags::SEEN_SIGNAL) && !signal.kind.is_path() {
                    cost += if signal.kind.is_exit_like() {
                        s.rail_firstred_exit_penalty
                    } else {
                        s.rail_firstred_penalty
                    };
                }
                flags.set(NodeFlags::LAST_SIGNAL_RED, !signal.kind.is_path());
            } else {
                flags.set(NodeFlags::LAST_SIGNAL_RED, false);
            }
            if !flags.contains(NodeFlags::SEEN_SIGNAL) {
                flags.set(NodeFlags::SEEN_SIGNAL, true);
            } else if !flags.contains(NodeFlags::SECOND_SIGNAL) {
                flags.set(NodeFlags::SECOND_SIGNAL, true);
            } else {
                flags.set(NodeFlags::THIRD_SIGNAL, true);
            }
            flags.set(NodeFlags::LAST_SIGNAL_BLOCK, !signal.kind.is_path());
        }

        if !data.flags.contains(NodeFlags::THIRD_SIGNAL)
            && grid.signal(tile, td.reverse()).is_some_and(|sig| sig.kind.is_path())
        {
            cost += s.rail_pbs_signal_back_penalty;
        }

        if edge.is_end && data.flags.contains(NodeFlags::LAST_SIGNAL_RED) {
            cost += s.rail_lastred_penalty;
        }

        cost += slope_cost(grid, edge.node, s.rail_slope_penalty);

        if is_curve(edge.parent.node.trackdir, td) {
            cost += s.rail_curve_penalty;
        }

        // Reversing in a depot on the way somewhere else.
        if !edge.is_end && grid.is_depot(tile, TransportType::Rail) {
            cost += s.rail_depot_reverse_penalty;
        }

        cost
    }

    #[inline]
    fn distance(&self, from: TileIndex, to: TileIndex) -> u32 {
        track_distance(from, to)
    }
}
