//! A behavior that never moves.

use wh_core::EntityId;

use crate::{BehaviorResult, DecideContext, RobotBehavior, RobotDecision};

/// A [`RobotBehavior`] that keeps every robot where it is with its state
/// untouched.
///
/// Useful in tests that exercise the belt or the commit phase in isolation.
pub struct HoldBehavior;

impl RobotBehavior for HoldBehavior {
    fn decide(&self, robot: EntityId, ctx: &DecideContext<'_>) -> BehaviorResult<RobotDecision> {
        let state = ctx.world.entities.robot(robot)?;
        let pos = ctx.world.robot_pos(robot)?;
        Ok(RobotDecision::hold(robot, pos, state.nav.clone(), state.waiting))
    }
}
