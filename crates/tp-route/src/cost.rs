//! The [`CostModel`] seam and the building blocks shared by all modes.

use tp_core::{
    CORNER_LENGTH, DiagDir, OrientedNode, PathfinderSettings, TILE_LENGTH, TileIndex, Trackdir, TransportType,
};
use tp_map::{Grid, Slope};
use tp_search::Step;

use crate::NodeData;

/// Height units per height level.
pub const LEVEL_HEIGHT: i32 = 8;

/// One candidate step handed to a cost model.
#[derive(Copy, Clone, Debug)]
pub struct Edge<'a> {
    pub parent: &'a Step<NodeData>,
    pub node:   OrientedNode,
    /// Whether `node` satisfies the query's target.
    pub is_end: bool,
}

/// Per-mode edge cost and distance estimate.
///
/// `cost` may update the node flags in `data`; the rail model uses them to
/// remember which signals the path has passed.
pub trait CostModel {
    const TRANSPORT: TransportType;

    fn cost<G: Grid + ?Sized>(
        &self,
        grid: &G,
        settings: &PathfinderSettings,
        edge: &Edge<'_>,
        data: &mut NodeData,
    ) -> u32;

    /// Admissible estimate of the cost from `from` to `to`.
    fn distance(&self, from: TileIndex, to: TileIndex) -> u32;
}

// ── Shared building blocks ────────────────────────────────────────────────────

/// Length of the piece a trackdir runs along.
#[inline]
pub fn trackdir_length(td: Trackdir) -> u32 {
    if td.is_axial() { TILE_LENGTH } else { CORNER_LENGTH }
}

/// Surface height at the quarter point of `tile` nearest its `edge`.
fn quarter_height<G: Grid + ?Sized>(grid: &G, tile: TileIndex, edge: DiagDir) -> i32 {
    let base = i32::from(grid.tile_height(tile)) * LEVEL_HEIGHT;
    base + match grid.tile_slope(tile) {
        Slope::Flat => 0,
        Slope::Inclined(up) if up == edge => 6,
        Slope::Inclined(up) if up == edge.reverse() => 2,
        Slope::Inclined(_) => 4,
    }
}

/// Whether leaving `node` across its exit edge climbs.
///
/// Samples the surface a quarter tile either side of the edge; a rise of
/// more than one height unit counts as uphill.
pub fn is_uphill<G: Grid + ?Sized>(grid: &G, node: OrientedNode) -> bool {
    let exit = node.trackdir.exitdir();
    let next = grid.tile_offset(node.tile, exit);
    if !next.is_valid() {
        return false;
    }
    let z1 = quarter_height(grid, node.tile, exit);
    let z2 = quarter_height(grid, next, exit.reverse());
    z2 - z1 > 1
}

#[inline]
pub fn slope_cost<G: Grid + ?Sized>(grid: &G, node: OrientedNode, penalty: u32) -> u32 {
    if is_uphill(grid, node) { penalty } else { 0 }
}

/// Cost of a node on a tunnel or bridge mouth.
///
/// Entering a mouth costs one tile; arriving at the far mouth after passing
/// through costs the whole length of the structure.
pub fn structure_cost<G: Grid + ?Sized>(grid: &G, node: OrientedNode) -> u32 {
    match grid.tunnel_bridge(node.tile) {
        Some(tb) if tb.direction == node.trackdir.exitdir().reverse() => {
            TILE_LENGTH * grid.structure_length(node.tile, tb.other_end)
        }
        _ => TILE_LENGTH,
    }
}

/// Not a straight or 45° continuation of the parent's trackdir.
#[inline]
pub fn is_curve(parent: Trackdir, td: Trackdir) -> bool {
    td != parent.next()
}
