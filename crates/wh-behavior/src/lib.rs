//! `wh-behavior`: the decide phase: robot and belt decision logic.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`intent`]  | `RobotDecision`, `RobotAction`, `BeltDecision`, `BoxSpawn`      |
//! | [`context`] | `DecideContext<'a>`: read-only tick snapshot shared by robots   |
//! | [`model`]   | `RobotBehavior` trait                                           |
//! | [`robot`]   | `RobotController`: the default pathfinding robot                |
//! | [`belt`]    | `BeltController`: box spawning and lane transport               |
//! | [`select`]  | Nearest charger / free shelf / idle robot searches              |
//! | [`noop`]    | `HoldBehavior`: robots that never move                          |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! The two-phase tick loop in wh-sim works as follows:
//!
//! 1. **Decide phase**: for every robot, call `RobotBehavior::decide`.
//!    All reads go through `&DecideContext`; no mutation.
//!
//! 2. **Commit phase** (sequential): resolve head-on conflicts, then apply
//!    each `RobotDecision` to the world.
//!
//! The belt runs its own decide/commit pass after the robots.

pub mod belt;
pub mod context;
pub mod error;
pub mod intent;
pub mod model;
pub mod noop;
pub mod robot;
pub mod select;

#[cfg(test)]
mod tests;

pub use belt::BeltController;
pub use context::DecideContext;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::{BeltDecision, BoxSpawn, RobotAction, RobotDecision};
pub use model::RobotBehavior;
pub use noop::HoldBehavior;
pub use robot::RobotController;
