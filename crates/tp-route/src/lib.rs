//! `tp-route` — transport-specific route finding on top of `tp-search`.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`query`]     | `Pathfinder` facade, `Starts`, `FoundTarget`, `RouteProblem`   |
//! | [`follow`]    | Neighbour expansion: tunnels, depots, reversing, ownership     |
//! | [`cost`]      | `CostModel` trait and shared slope/structure/length costs      |
//! | [`rail`]      | `RailCost`: signals, stations, depots, curves                  |
//! | [`road`]      | `RoadCost`: crossings, road stops, turns                       |
//! | [`water`]     | `WaterCost`: buoys, turns                                      |
//! | [`heuristic`] | Admissible track and Manhattan distances                       |
//! | [`target`]    | `TargetStrategy`: exact tile, station, any depot               |
//! | [`flags`]     | `NodeFlags`, `NodeData` carried along paths                    |
//! | [`error`]     | `RouteError`, `RouteResult<T>`, `ClosestApproach`              |
//!
//! # Example
//!
//! ```
//! use tp_core::{DiagDir, OrientedNode, Owner, PathfinderSettings, RailTypes, Trackdir, TransportDescriptor};
//! use tp_map::TileMapBuilder;
//! use tp_route::{ExactTile, Pathfinder, Starts};
//!
//! let mut b = TileMapBuilder::new(4, 4).unwrap();
//! let west = b.tile(0, 3);
//! b.owner(Owner(0)).rail_line(west, DiagDir::SW, 8);
//! let map = b.build().unwrap();
//!
//! let settings = PathfinderSettings::default();
//! let pf = Pathfinder::new(&map, &settings).unwrap();
//! let train = TransportDescriptor::rail(Owner(0), RailTypes::ALL);
//! let found = pf
//!     .find_path(&train, &Starts::one(OrientedNode::new(west, Trackdir::XSw)), &ExactTile::new(map.tile(7, 3)))
//!     .unwrap();
//! assert_eq!(found.cost, 700);
//! assert_eq!(found.first_trackdir, Some(Trackdir::XSw));
//! ```

pub mod cost;
pub mod error;
pub mod flags;
pub mod follow;
pub mod heuristic;
pub mod query;
pub mod rail;
pub mod road;
pub mod target;
pub mod water;


pub use cost::{CostModel, Edge};
pub use error::{ClosestApproach, RouteError, RouteResult};
pub use flags::{NodeData, NodeFlags};
pub use query::{FoundTarget, Pathfinder, RouteProblem, Start, Starts, TrackdirChoice};
pub use rail::RailCost;
pub use road::RoadCost;
pub use target::{AnyDepot, ExactTile, StationTarget, TargetStrategy};
pub use water::WaterCost;
