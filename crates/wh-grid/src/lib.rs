//! `wh-grid`: grid world, warehouse layout, and pathfinding.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`grid`]       | `GridWorld` (multi-occupancy cells), `Connectivity`        |
//! | [`layout`]     | `WarehouseLayout`: the fixed 14×13 shelf/belt/charger map  |
//! | [`occupancy`]  | `RobotOccupancy`: per-tick robot position index            |
//! | [`pathfinder`] | `Pathfinder` trait, `Path`, `AStarPathfinder`              |
//! | [`error`]      | `GridError`, `GridResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for position-keyed maps.         |
//! | `serde`   | Derives `Serialize`/`Deserialize` on core types.           |

pub mod error;
pub mod grid;
pub mod layout;
pub mod occupancy;
pub mod pathfinder;


pub use error::{GridError, GridResult};
pub use grid::{Connectivity, GridWorld};
pub use layout::WarehouseLayout;
pub use occupancy::{PosMap, PosSet, RobotOccupancy};
pub use pathfinder::{AStarPathfinder, GoalRule, Path, PathRequest, Pathfinder};
