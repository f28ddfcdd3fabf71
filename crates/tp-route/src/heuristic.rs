//! Distance estimates used as A* heuristics.
//!
//! Both are admissible: they never exceed the cheapest possible cost of
//! covering the distance with the cost models in this crate, since every
//! entered tile costs at least a corner piece and every penalty is
//! non-negative.

use tp_core::{CORNER_LENGTH, TILE_LENGTH, TileIndex};

/// Lower bound on the track cost from `from` to `to`.
///
/// A run of `n` moves covers `dx` tiles along one axis and `dy` along the
/// other (`dx ≥ dy`).  Each tile entered is a corner piece when the run turns
/// there and an axial piece otherwise; at most `2·dy` turns fit, and the
/// final tile may always be a corner.
///
/// | dx, dy        | bound                                      |
/// |---------------|--------------------------------------------|
/// | 0, 0          | 0                                          |
/// | d, d          | `2·d · CORNER`                             |
/// | dx > dy       | `(dx-dy-1) · TILE + 2·dy · CORNER + CORNER`|
pub fn track_distance(from: TileIndex, to: TileIndex) -> u32 {
    let ax = from.x().abs_diff(to.x());
    let ay = from.y().abs_diff(to.y());
    let (dx, dy) = if ax >= ay { (ax, ay) } else { (ay, ax) };
    if dx == 0 {
        0
    } else if dx == dy {
        2 * dy * CORNER_LENGTH
    } else {
        (dx - dy - 1) * TILE_LENGTH + 2 * dy * CORNER_LENGTH + CORNER_LENGTH
    }
}

/// Manhattan distance in tile lengths.  Road tiles cost a full tile length
/// whatever the piece.
#[inline]
pub fn manhattan_distance(from: TileIndex, to: TileIndex) -> u32 {
    from.manhattan(to) * TILE_LENGTH
}
