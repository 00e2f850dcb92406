//! Read-only simulation state passed to every decide callback.

use wh_agent::World;
use wh_core::Tick;
use wh_grid::RobotOccupancy;

/// A read-only snapshot of the warehouse passed to every
/// [`RobotBehavior`][crate::RobotBehavior] call.
///
/// Built once per tick by wh-sim from the committed state and shared
/// immutably by all robots during the decide phase.  No robot can observe
/// another robot's decision through it.
///
/// # Lifetimes
///
/// All borrows live for one tick's decide phase.  wh-sim never allows
/// mutable access to the world while a `DecideContext` is live.
pub struct DecideContext<'a> {
    pub tick:      Tick,
    pub world:     &'a World,
    /// Robot positions at the start of the tick.
    pub occupancy: &'a RobotOccupancy,
}

impl<'a> DecideContext<'a> {
    #[inline]
    pub fn new(tick: Tick, world: &'a World, occupancy: &'a RobotOccupancy) -> Self {
        Self { tick, world, occupancy }
    }
}
