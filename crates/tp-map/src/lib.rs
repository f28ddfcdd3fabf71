//! `tp-map` — the world as seen by the pathfinder.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`grid`]    | `Grid` trait (read-only adapter), slopes, signals, structures |
//! | [`tilemap`] | `TileMap` (dense tile array + R-tree of depots), `TileMapBuilder` |
//! | [`error`]   | `MapError`, `MapResult<T>`                                   |
//!
//! The search crates only ever talk to [`Grid`]; `TileMap` is a complete,
//! self-contained world model for embedding applications and tests.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod tilemap;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use grid::{
    Grid, RoadStopKind, Signal, SignalKind, SignalState, Slope, StationKind, StationTile,
    StopOccupancy, StructureKind, TileClass, TunnelBridge,
};
pub use tilemap::{RoadBits, Tile, TileKind, TileMap, TileMapBuilder};
