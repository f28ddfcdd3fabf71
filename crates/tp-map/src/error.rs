//! Map-construction error type.

use thiserror::Error;

use tp_core::{TileIndex, TpError, Trackdir};

/// Errors produced while building a [`TileMap`](crate::TileMap).
#[derive(Debug, Error)]
pub enum MapError {
    #[error("tile {0} is outside the map")]
    OutOfBounds(TileIndex),

    #[error("tunnel/bridge ends {a} and {b} are not on one axis")]
    BadStructure { a: TileIndex, b: TileIndex },

    #[error("signal {trackdir} on {tile} needs a rail tile carrying that track")]
    BadSignal { tile: TileIndex, trackdir: Trackdir },

    #[error(transparent)]
    Core(#[from] TpError),
}

pub type MapResult<T> = Result<T, MapError>;
