//! The default robot controller.
//!
//! A robot is never given an explicit state.  Each tick the controller looks
//! at its cargo, battery, destination, and route and picks one of:
//!
//! | Situation                                   | Result                                  |
//! |---------------------------------------------|-----------------------------------------|
//! | low battery, empty-handed, no other errand  | destination := nearest charger          |
//! | carrying, target shelf full or unset        | destination := nearest free shelf       |
//! | at the end of its route                     | pick up / charge / drop off / re-approach |
//! | on a route                                  | step to the next route cell             |
//! | destination but no route                    | plan a route (no move this tick)        |
//!
//! Pathfinding misses are not errors here: the route is cleared and the
//! robot retries on a later tick.

use wh_agent::{EntityKind, Robot};
use wh_core::{EntityId, GridPos};
use wh_grid::{AStarPathfinder, Connectivity, PathRequest, Pathfinder};

use crate::select::{approach_cells, is_free_shelf, nearest_charger, nearest_free_shelf};
use crate::{BehaviorResult, DecideContext, RobotAction, RobotBehavior, RobotDecision};

pub struct RobotController<P: Pathfinder = AStarPathfinder> {
    pathfinder: P,
}

impl RobotController<AStarPathfinder> {
    pub fn new() -> Self {
        Self { pathfinder: AStarPathfinder }
    }
}

impl Default for RobotController<AStarPathfinder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Pathfinder> RobotController<P> {
    pub fn with_pathfinder(pathfinder: P) -> Self {
        Self { pathfinder }
    }

    fn plan(
        &self,
        ctx:     &DecideContext<'_>,
        robot:   EntityId,
        request: PathRequest,
    ) -> Option<Vec<GridPos>> {
        match self.pathfinder.find_path(&ctx.world.layout, ctx.occupancy, &request.requester(robot)) {
            Ok(path) => Some(path.cells),
            Err(err) => {
                tracing::trace!(%robot, %err, "no route this tick");
                None
            }
        }
    }

    // ── Destination upkeep ────────────────────────────────────────────────

    fn retarget(&self, ctx: &DecideContext<'_>, state: &Robot, pos: GridPos, d: &mut RobotDecision) {
        let layout = &ctx.world.layout;

        if state.is_carrying() {
            let stale = d.nav.destination.is_none_or(|dst| !is_free_shelf(ctx.world, dst));
            if stale {
                if let Some(shelf) = nearest_free_shelf(ctx.world, pos) {
                    d.nav.destination = Some(shelf);
                    d.nav.clear_route();
                }
            }
            return;
        }

        let errand_free = d.nav.destination.is_none_or(|dst| layout.is_charger(dst));
        if errand_free && state.is_low_battery() {
            if let Some(charger) = nearest_charger(layout, pos) {
                if d.nav.destination != Some(charger) {
                    d.nav.destination = Some(charger);
                    d.nav.clear_route();
                }
            }
        }
    }

    // ── End of route ──────────────────────────────────────────────────────

    fn at_route_end(
        &self,
        ctx:   &DecideContext<'_>,
        state: &Robot,
        pos:   GridPos,
        d:     &mut RobotDecision,
    ) {
        let world = ctx.world;
        let layout = &world.layout;

        if pos == layout.pickup_point && !state.is_carrying() {
            self.pick_up(ctx, pos, d);
            return;
        }

        if let Some(charger) = docked_charger(ctx, pos, d.nav.destination) {
            d.action = Some(RobotAction::Charge { charger });
            return;
        }

        if state.is_carrying() {
            let target = d
                .nav
                .destination
                .filter(|&dst| dst.is_orthogonal_to(pos) && is_free_shelf(world, dst))
                .and_then(|dst| world.shelf_at(dst));
            if let Some(shelf) = target {
                d.action = Some(RobotAction::DropOff { shelf });
                return;
            }
        }

        self.re_approach(ctx, pos, d);
    }

    /// The relaxed search stopped short of the destination.  Walk to a cell
    /// next to it on an exact route instead.
    fn re_approach(&self, ctx: &DecideContext<'_>, pos: GridPos, d: &mut RobotDecision) {
        let Some(dst) = d.nav.destination else {
            d.nav.clear_route();
            return;
        };
        let layout = &ctx.world.layout;
        let goals = if layout.is_obstacle(dst) {
            approach_cells(ctx.world, dst, pos, ctx.occupancy, d.robot)
        } else {
            vec![dst]
        };

        for goal in goals {
            if goal == pos {
                continue;
            }
            let request = PathRequest::new(pos, goal).exact();
            if let Some(cells) = self.plan(ctx, d.robot, request) {
                tracing::trace!(robot = %d.robot, from = %pos, to = %goal, "re-approaching");
                d.nav.set_route(cells);
                if let Some(next) = d.nav.advance() {
                    d.next_pos = next;
                }
                return;
            }
        }
        d.nav.clear_route();
    }

    fn pick_up(&self, ctx: &DecideContext<'_>, pos: GridPos, d: &mut RobotDecision) {
        let world = ctx.world;
        let bx = world
            .grid
            .neighbors(pos, Connectivity::Orthogonal, false)
            .find(|&e| world.entities.kind_of(e) == Some(EntityKind::Box));

        let Some(bx) = bx else {
            d.waiting = true;
            return;
        };
        if d.waiting {
            d.waiting = false;
            return;
        }

        let Some(belt) = world.entities.belts().find(|(_, b)| b.cargo == Some(bx)).map(|(id, _)| id)
        else {
            return;
        };
        let Some(shelf) = nearest_free_shelf(world, pos) else {
            tracing::trace!(robot = %d.robot, "no free shelf, leaving box on belt");
            return;
        };

        d.action = Some(RobotAction::PickUp { bx, belt });
        d.nav.destination = Some(shelf);
        match self.plan(ctx, d.robot, PathRequest::new(pos, shelf).carrying(true)) {
            Some(cells) => {
                d.nav.set_route(cells);
                if let Some(next) = d.nav.advance() {
                    d.next_pos = next;
                }
            }
            None => d.nav.clear_route(),
        }
    }
}

/// The charger a robot at `pos` can draw from: the one under it, or, when it
/// is headed for a charger, one orthogonally next to it.
fn docked_charger(
    ctx:         &DecideContext<'_>,
    pos:         GridPos,
    destination: Option<GridPos>,
) -> Option<EntityId> {
    let world = ctx.world;
    if let Some(id) = world.charger_at(pos) {
        return Some(id);
    }
    let dst = destination.filter(|&d| world.layout.is_charger(d))?;
    if dst.is_orthogonal_to(pos) {
        return world.charger_at(dst);
    }
    pos.orthogonal_neighbors().find_map(|p| world.charger_at(p))
}

impl<P: Pathfinder + 'static> RobotBehavior for RobotController<P> {
    fn decide(&self, robot: EntityId, ctx: &DecideContext<'_>) -> BehaviorResult<RobotDecision> {
        let state = ctx.world.entities.robot(robot)?;
        let pos = ctx.world.robot_pos(robot)?;
        let mut d = RobotDecision::hold(robot, pos, state.nav.clone(), state.waiting);

        self.retarget(ctx, state, pos, &mut d);

        if d.nav.has_route() {
            if d.nav.route_end() == Some(pos) {
                self.at_route_end(ctx, state, pos, &mut d);
            } else {
                match d.nav.advance() {
                    Some(next) if next.is_orthogonal_to(pos) => d.next_pos = next,
                    // Knocked off the route, or ran past its end.
                    _ => d.nav.clear_route(),
                }
            }
        }

        // A flat robot cannot move, so a route would only go stale.
        if let Some(dst) = d.nav.destination.filter(|_| state.battery > 0.0) {
            if !d.nav.has_route() {
                let request = PathRequest::new(pos, dst).carrying(state.is_carrying());
                if let Some(cells) = self.plan(ctx, robot, request) {
                    d.nav.set_route(cells);
                }
            }
        }

        Ok(d)
    }
}
