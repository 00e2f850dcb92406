//! `wh-agent` — entities, their registry, and the assembled warehouse world.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`entity`]     | `Entity` tagged enum, per-kind state, `Navigation`, `BoxLocation` |
//! | [`registry`]   | `EntityRegistry` (id-keyed storage with typed accessors)        |
//! | [`world`]      | `World` (grid + registry + layout), box hand-over primitives    |
//! | [`builder`]    | `WorldBuilder` (fixture layout and robot placement)             |
//! | [`error`]      | `AgentError`, `AgentResult<T>`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on entity state.     |

pub mod builder;
pub mod entity;
pub mod error;
pub mod registry;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use entity::{
    BoxItem, BoxLocation, Charger, ConveyorBelt, Entity, EntityKind, Navigation, Robot, Shelf,
};
pub use error::{AgentError, AgentResult};
pub use registry::EntityRegistry;
pub use world::World;
