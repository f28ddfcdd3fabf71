//! The oriented search node.

use std::fmt;

use crate::{TileIndex, Trackdir};

/// A position plus the direction of travel used on it.
///
/// The same tile can be occupied on different trackdirs with different
/// legality and cost, so the pair, not the tile, is the unit of search.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientedNode {
    pub tile: TileIndex,
    pub trackdir: Trackdir,
}

impl OrientedNode {
    #[inline]
    pub fn new(tile: TileIndex, trackdir: Trackdir) -> Self {
        Self { tile, trackdir }
    }

    /// Same tile, travelled the other way.
    #[inline]
    pub fn reversed(self) -> Self {
        Self { tile: self.tile, trackdir: self.trackdir.reverse() }
    }
}

impl fmt::Display for OrientedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.trackdir, self.tile)
    }
}
