//! The conveyor-belt controller.

use wh_agent::World;
use wh_core::{EntityId, SimRng};

use crate::select::nearest_idle_robot;
use crate::{BehaviorError, BehaviorResult, BeltDecision, BoxSpawn};

/// Spawns boxes at the head of the lane and moves them toward the pickup
/// point one cell per tick.
///
/// An empty belt spawns with probability `box_probability`.  A box without a
/// carrier keeps looking for the nearest idle robot every tick it rides.
#[derive(Copy, Clone, Debug)]
pub struct BeltController {
    pub box_probability: f64,
}

impl BeltController {
    /// Weights are drawn uniformly from `0..MAX_WEIGHT`.
    pub const MAX_WEIGHT: u8 = 10;

    pub fn new(box_probability: f64) -> Self {
        Self { box_probability }
    }

    pub fn decide(&self, belt: EntityId, world: &World, rng: &mut SimRng) -> BehaviorResult<BeltDecision> {
        let state = world.entities.belt(belt)?;
        let layout = &world.layout;
        let pickup = layout.pickup_point;

        let Some(bx) = state.cargo else {
            if !rng.gen_bool(self.box_probability) {
                return Ok(BeltDecision::default());
            }
            let at = *layout.belt_lane.first().ok_or(BehaviorError::NoLane(belt))?;
            let weight = rng.gen_range(0..Self::MAX_WEIGHT);
            return Ok(BeltDecision {
                spawn:      Some(BoxSpawn { at, weight, remaining: layout.belt_transit_ticks() }),
                advance_to: None,
                assign:     nearest_idle_robot(world, pickup),
            });
        };

        let lane = &layout.belt_lane;
        let advance_to = match state.remaining as usize {
            0 => None,
            r => lane.len().checked_sub(r).and_then(|i| lane.get(i)).copied(),
        };
        let assign = match world.entities.box_item(bx)?.carrier {
            Some(_) => None,
            None => nearest_idle_robot(world, pickup),
        };
        Ok(BeltDecision { spawn: None, advance_to, assign })
    }
}
