//! `tp-core` — foundational types for the `trackpath` workspace.
//!
//! This crate is a dependency of every other `tp-*` crate.  It intentionally
//! has no `tp-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `StationId`, `Owner`                                      |
//! | [`tile`]        | `TileIndex`, `MapSize` (bounds-checked tile arithmetic)  |
//! | [`track`]       | `DiagDir`, `Axis`, `Track`, `Trackdir` and their bitsets  |
//! | [`node`]        | `OrientedNode`, the unit of search                        |
//! | [`transport`]   | `TransportType`, rail/road sub-types, `TransportDescriptor` |
//! | [`settings`]    | `PathfinderSettings`, cost-unit constants                 |
//! | [`error`]       | `TpError`, `TpResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod node;
pub mod settings;
pub mod tile;
pub mod track;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TpError, TpResult};
pub use ids::{Owner, StationId};
pub use node::OrientedNode;
pub use settings::{CORNER_LENGTH, PathfinderSettings, TILE_LENGTH};
pub use tile::{MapSize, TileIndex};
pub use track::{Axis, DiagDir, Track, TrackBits, Trackdir, TrackdirBits};
pub use transport::{RailType, RailTypes, RoadType, RoadTypes, TransportDescriptor, TransportType};
