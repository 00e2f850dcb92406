//! The `RobotBehavior` trait, the extension point for robot decision logic.

use wh_core::EntityId;

use crate::{BehaviorResult, DecideContext, RobotDecision};

/// Pluggable robot decision logic.
///
/// Called once per robot per tick during the decide phase.  Implementations
/// read the world only through `ctx` and return a [`RobotDecision`]; every
/// mutation happens later in the commit phase.
///
/// # Thread safety
///
/// The simulation may call `decide` for many robots in parallel via Rayon,
/// so implementations must be `Send + Sync`.  Per-robot state lives on the
/// robot entity, not in the behavior.
pub trait RobotBehavior: Send + Sync + 'static {
    fn decide(&self, robot: EntityId, ctx: &DecideContext<'_>) -> BehaviorResult<RobotDecision>;
}
