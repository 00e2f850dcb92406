//! `wh-core` — foundational types for the warehouse robot simulation.
//!
//! This crate is a dependency of every other `wh-*` crate.  It intentionally
//! has no `wh-*` dependencies and minimal external ones (`rand`, `thiserror`,
//! `uuid`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `SimulationId`                            |
//! | [`pos`]         | `GridPos`, Manhattan / Chebyshev distance             |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `SimConfig`, `RegistryConfig`                         |
//! | [`rng`]         | `SimRng` (per simulation instance)                    |
//! | [`error`]       | `WhError`, `WhResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, positions, configs. |

pub mod config;
pub mod error;
pub mod ids;
pub mod pos;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RegistryConfig, SimConfig};
pub use error::{WhError, WhResult};
pub use ids::{EntityId, SimulationId};
pub use pos::{GridPos, ORTHOGONAL};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
