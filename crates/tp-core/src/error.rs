//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `TpError` as one variant
//! where they surface configuration problems.

use thiserror::Error;

use crate::TileIndex;

/// Errors produced by `tp-core` constructors and validators.
#[derive(Debug, Error)]
pub enum TpError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("tile {0} is outside the map")]
    TileOutOfBounds(TileIndex),
}

/// Shorthand result type for `tp-core`.
pub type TpResult<T> = Result<T, TpError>;
