//! Tile coordinates and bounds-checked tile arithmetic.
//!
//! # Encoding
//!
//! A [`TileIndex`] packs `(x, y)` as `y << 16 | x`.  The packing does not
//! depend on the map size, so `x()`/`y()` are free bit operations and the
//! index stays valid if a caller keeps it around while holding a different
//! map handle.  All arithmetic that could leave the map goes through
//! [`MapSize::offset`], which returns [`TileIndex::INVALID`] instead of
//! wrapping into an unrelated cell.
//!
//! Map dimensions are powers of two (`2^log_x × 2^log_y`), so bounds checks
//! are a mask test.

use std::fmt;

use crate::{DiagDir, TpError, TpResult};

// ── TileIndex ─────────────────────────────────────────────────────────────────

/// Opaque address of one map cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileIndex(pub u32);

impl TileIndex {
    /// Sentinel for "off the map".  Never produced for a valid `(x, y)`
    /// because map sides are capped at `2^MapSize::MAX_LOG`.
    pub const INVALID: TileIndex = TileIndex(u32::MAX);

    /// Pack `(x, y)` without checking it against any map.
    #[inline(always)]
    pub const fn xy(x: u32, y: u32) -> TileIndex {
        TileIndex((y << 16) | (x & 0xFFFF))
    }

    #[inline(always)]
    pub fn x(self) -> u32 {
        self.0 & 0xFFFF
    }

    #[inline(always)]
    pub fn y(self) -> u32 {
        self.0 >> 16
    }

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Manhattan distance in tiles.
    #[inline]
    pub fn manhattan(self, other: TileIndex) -> u32 {
        self.x().abs_diff(other.x()) + self.y().abs_diff(other.y())
    }

    /// Chebyshev ("king move") distance in tiles.
    #[inline]
    pub fn chebyshev(self, other: TileIndex) -> u32 {
        self.x().abs_diff(other.x()).max(self.y().abs_diff(other.y()))
    }
}

impl Default for TileIndex {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "({}, {})", self.x(), self.y())
        } else {
            f.write_str("(invalid)")
        }
    }
}

// ── MapSize ───────────────────────────────────────────────────────────────────

/// Dimensions of a power-of-two map.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSize {
    log_x: u8,
    log_y: u8,
}

impl MapSize {
    /// Smallest supported side: 2^2 = 4 tiles.
    pub const MIN_LOG: u8 = 2;
    /// Largest supported side: 2^15 tiles, keeping `INVALID` unreachable.
    pub const MAX_LOG: u8 = 15;

    /// A `2^log_x × 2^log_y` map.
    pub fn new(log_x: u8, log_y: u8) -> TpResult<Self> {
        for log in [log_x, log_y] {
            if !(Self::MIN_LOG..=Self::MAX_LOG).contains(&log) {
                return Err(TpError::Config(format!(
                    "map side 2^{log} outside 2^{}..=2^{}",
                    Self::MIN_LOG,
                    Self::MAX_LOG
                )));
            }
        }
        Ok(Self { log_x, log_y })
    }

    #[inline]
    pub fn width(self) -> u32 {
        1 << self.log_x
    }

    #[inline]
    pub fn height(self) -> u32 {
        1 << self.log_y
    }

    #[inline]
    pub fn tile_count(self) -> usize {
        (self.width() as usize) << self.log_y
    }

    #[inline]
    pub fn contains(self, tile: TileIndex) -> bool {
        tile.is_valid() && tile.x() & !(self.width() - 1) == 0 && tile.y() & !(self.height() - 1) == 0
    }

    /// Tile at `(x, y)`, or `INVALID` if outside the map.
    #[inline]
    pub fn tile(self, x: u32, y: u32) -> TileIndex {
        let t = TileIndex::xy(x, y);
        if x < self.width() && y < self.height() { t } else { TileIndex::INVALID }
    }

    /// Dense row-major position of `tile`, for per-tile `Vec` storage.
    #[inline]
    pub fn linear(self, tile: TileIndex) -> usize {
        ((tile.y() as usize) << self.log_x) | tile.x() as usize
    }

    /// The neighbour of `tile` one step in `dir`.
    ///
    /// Coordinates are computed with wrapping arithmetic and then masked
    /// against the map; anything that leaves the map (including stepping
    /// "below zero") is `INVALID`.
    #[inline]
    pub fn offset(self, tile: TileIndex, dir: DiagDir) -> TileIndex {
        if !self.contains(tile) {
            return TileIndex::INVALID;
        }
        let (dx, dy) = dir.offset();
        let x = tile.x().wrapping_add_signed(dx);
        let y = tile.y().wrapping_add_signed(dy);
        self.tile(x, y)
    }

    /// The tile `n` steps away from `tile` in `dir`, or `INVALID`.
    pub fn offset_n(self, tile: TileIndex, dir: DiagDir, n: u32) -> TileIndex {
        (0..n).try_fold(tile, |t, _| {
            let next = self.offset(t, dir);
            next.is_valid().then_some(next)
        })
        .unwrap_or(TileIndex::INVALID)
    }
}
