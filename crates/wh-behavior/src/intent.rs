//! Decisions produced in the decide phase and applied in the commit phase.

use wh_agent::Navigation;
use wh_core::{EntityId, GridPos};

/// A world-changing action a robot performs this tick, in addition to its
/// move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotAction {
    /// Take `bx` off `belt`.
    PickUp { bx: EntityId, belt: EntityId },
    /// Put the carried box into `shelf`.
    DropOff { shelf: EntityId },
    /// Draw one tick of charge from `charger`.
    Charge { charger: EntityId },
}

/// Everything one robot decided this tick.
///
/// `nav` and `waiting` replace the robot's current values wholesale when the
/// decision is committed; `next_pos` is the cell it wants to stand on after
/// the commit (its own cell to hold).
#[derive(Debug, Clone, PartialEq)]
pub struct RobotDecision {
    pub robot:    EntityId,
    pub next_pos: GridPos,
    pub nav:      Navigation,
    pub waiting:  bool,
    pub action:   Option<RobotAction>,
}

impl RobotDecision {
    /// Stay put and keep all navigation state.
    pub fn hold(robot: EntityId, pos: GridPos, nav: Navigation, waiting: bool) -> Self {
        Self { robot, next_pos: pos, nav, waiting, action: None }
    }

    #[inline]
    pub fn is_move(&self, from: GridPos) -> bool {
        self.next_pos != from
    }
}

/// A new box entering the lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxSpawn {
    /// First lane cell.
    pub at:        GridPos,
    pub weight:    u8,
    /// Transit countdown for the new box.
    pub remaining: u8,
}

/// What the active belt does this tick.  At most one of `spawn` and
/// `advance_to` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BeltDecision {
    pub spawn:      Option<BoxSpawn>,
    /// Next lane cell for the riding box.
    pub advance_to: Option<GridPos>,
    /// Idle robot to send to the pickup point for the (new or riding) box.
    pub assign:     Option<EntityId>,
}

impl BeltDecision {
    pub fn is_idle(&self) -> bool {
        self.spawn.is_none() && self.advance_to.is_none() && self.assign.is_none()
    }
}
