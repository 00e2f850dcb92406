//! Unit tests for wh-behavior.

use wh_agent::{World, WorldBuilder};
use wh_core::{EntityId, GridPos, SimRng, Tick};
use wh_grid::WarehouseLayout;

use crate::{DecideContext, RobotBehavior, RobotDecision};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn p(x: i32, y: i32) -> GridPos {
    GridPos::new(x, y)
}

fn world_with(robots: &[GridPos]) -> World {
    let mut rng = SimRng::new(0);
    WorldBuilder::new(WarehouseLayout::standard())
        .robot_positions(robots.to_vec())
        .build(&mut rng)
        .unwrap()
}

fn robot_at(world: &World, pos: GridPos) -> EntityId {
    world.robot_at(pos).unwrap()
}

fn decide_with<B: RobotBehavior>(behavior: &B, world: &World, robot: EntityId) -> RobotDecision {
    let occ = world.occupancy();
    let ctx = DecideContext::new(Tick(0), world, &occ);
    behavior.decide(robot, &ctx).unwrap()
}

/// Write the decided navigation back, as the commit phase would (minus moves).
fn adopt(world: &mut World, d: &RobotDecision) {
    let r = world.entities.robot_mut(d.robot).unwrap();
    r.nav = d.nav.clone();
    r.waiting = d.waiting;
}

// ── DecideContext / HoldBehavior ──────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use super::*;
    use crate::HoldBehavior;

    #[test]
    fn fields_accessible() {
        let world = world_with(&[p(0, 0)]);
        let occ = world.occupancy();
        let ctx = DecideContext::new(Tick(4), &world, &occ);
        assert_eq!(ctx.tick, Tick(4));
        assert_eq!(ctx.occupancy.len(), 1);
    }

    #[test]
    fn hold_keeps_everything() {
        let mut world = world_with(&[p(0, 0)]);
        let id = robot_at(&world, p(0, 0));
        world.entities.robot_mut(id).unwrap().nav.destination = Some(p(5, 5));
        let d = decide_with(&HoldBehavior, &world, id);
        assert_eq!(d.next_pos, p(0, 0));
        assert_eq!(d.nav.destination, Some(p(5, 5)));
        assert!(d.action.is_none());
    }

    #[test]
    fn behavior_is_object_safe() {
        let world = world_with(&[p(0, 0)]);
        let id = robot_at(&world, p(0, 0));
        let b: Box<dyn RobotBehavior> = Box::new(HoldBehavior);
        let occ = world.occupancy();
        let ctx = DecideContext::new(Tick(0), &world, &occ);
        assert!(b.decide(id, &ctx).is_ok());
    }

    #[test]
    fn non_robot_id_is_an_error() {
        let world = world_with(&[]);
        let shelf = world.shelf_at(p(2, 0)).unwrap();
        let occ = world.occupancy();
        let ctx = DecideContext::new(Tick(0), &world, &occ);
        assert!(HoldBehavior.decide(shelf, &ctx).is_err());
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod select_tests {
    use super::*;
    use crate::select::{nearest_charger, nearest_free_shelf, nearest_idle_robot};

    #[test]
    fn nearest_charger_by_manhattan() {
        let layout = WarehouseLayout::standard();
        assert_eq!(nearest_charger(&layout, p(12, 2)), Some(p(13, 2)));
        assert_eq!(nearest_charger(&layout, p(12, 5)), Some(p(13, 4)));
        assert_eq!(nearest_charger(&layout, p(0, 12)), Some(p(13, 4)));
    }

    #[test]
    fn free_shelf_nearest_row_then_nearest_shelf() {
        let world = world_with(&[]);
        // From the pickup point rows y=4 and y=8 tie at 11; y=4 is listed first.
        assert_eq!(nearest_free_shelf(&world, p(11, 6)), Some(p(6, 4)));
    }

    #[test]
    fn full_row_is_skipped() {
        let mut world = world_with(&[]);
        for x in 2..7 {
            let id = world.shelf_at(p(x, 4)).unwrap();
            world.entities.shelf_mut(id).unwrap().stored_box = Some(EntityId(9_000 + x as u32));
        }
        assert_eq!(nearest_free_shelf(&world, p(11, 6)), Some(p(6, 8)));
    }

    #[test]
    fn no_free_shelf_anywhere() {
        let mut world = world_with(&[]);
        let ids: Vec<_> = world.entities.shelves().map(|(id, _)| id).collect();
        for id in ids {
            world.entities.shelf_mut(id).unwrap().stored_box = Some(EntityId(1));
        }
        assert_eq!(nearest_free_shelf(&world, p(11, 6)), None);
    }

    #[test]
    fn idle_robot_skips_low_battery_and_busy() {
        let mut world = world_with(&[p(10, 6), p(9, 6), p(0, 0)]);
        let near = robot_at(&world, p(10, 6));
        let mid = robot_at(&world, p(9, 6));
        let far = robot_at(&world, p(0, 0));
        world.entities.robot_mut(near).unwrap().battery = 20.0;
        world.entities.robot_mut(mid).unwrap().nav.destination = Some(p(1, 1));
        assert_eq!(nearest_idle_robot(&world, p(11, 6)), Some(far));
    }
}

// ── RobotController ───────────────────────────────────────────────────────────

#[cfg(test)]
mod robot_tests {
    use wh_agent::Robot;

    use super::*;
    use crate::{RobotAction, RobotController};

    #[test]
    fn idle_robot_stays_put() {
        let world = world_with(&[p(0, 0)]);
        let id = robot_at(&world, p(0, 0));
        let d = decide_with(&RobotController::new(), &world, id);
        assert_eq!(d.next_pos, p(0, 0));
        assert!(d.nav.destination.is_none());
        assert!(d.action.is_none());
    }

    #[test]
    fn fresh_destination_plans_without_moving() {
        let mut world = world_with(&[p(8, 6)]);
        let id = robot_at(&world, p(8, 6));
        world.entities.robot_mut(id).unwrap().nav.destination = Some(p(11, 6));
        let d = decide_with(&RobotController::new(), &world, id);
        assert_eq!(d.next_pos, p(8, 6));
        assert_eq!(d.nav.route.first(), Some(&p(8, 6)));
        assert_eq!(d.nav.route_end(), Some(p(11, 6)));
        assert_eq!(d.nav.route_index, 1);
    }

    #[test]
    fn follows_route_one_cell_per_tick() {
        let mut world = world_with(&[p(8, 6)]);
        let id = robot_at(&world, p(8, 6));
        world.entities.robot_mut(id).unwrap().nav.destination = Some(p(11, 6));
        let c = RobotController::new();
        let d = decide_with(&c, &world, id);
        adopt(&mut world, &d);

        let d = decide_with(&c, &world, id);
        assert_eq!(d.next_pos, p(9, 6));
        assert_eq!(d.nav.route_index, 2);
    }

    #[test]
    fn low_battery_heads_for_nearest_charger() {
        let mut world = world_with(&[p(12, 2)]);
        let id = robot_at(&world, p(12, 2));
        world.entities.robot_mut(id).unwrap().battery = 10.0;
        let c = RobotController::new();

        let d = decide_with(&c, &world, id);
        assert_eq!(d.nav.destination, Some(p(13, 2)));
        assert_eq!(d.nav.route, vec![p(12, 2)]);
        adopt(&mut world, &d);

        let d = decide_with(&c, &world, id);
        let charger = world.charger_at(p(13, 2)).unwrap();
        assert_eq!(d.action, Some(RobotAction::Charge { charger }));
        assert_eq!(d.next_pos, p(12, 2));
        // Same charger chosen again: the route is not thrown away.
        assert_eq!(d.nav.route, vec![p(12, 2)]);
    }

    #[test]
    fn carrying_robot_never_seeks_charge() {
        let mut world = world_with(&[p(12, 2)]);
        let id = robot_at(&world, p(12, 2));
        {
            let r = world.entities.robot_mut(id).unwrap();
            r.battery = 5.0;
            r.cargo = Some(EntityId(7_000));
        }
        let d = decide_with(&RobotController::new(), &world, id);
        assert!(d.nav.destination.is_some_and(|dst| world.layout.is_shelf(dst)));
    }

    #[test]
    fn pickup_waits_then_settles_then_takes() {
        let mut world = world_with(&[p(11, 6)]);
        let id = robot_at(&world, p(11, 6));
        world.entities.robot_mut(id).unwrap().nav.destination = Some(p(11, 6));
        world.entities.robot_mut(id).unwrap().nav.set_route(vec![p(11, 6)]);
        let c = RobotController::new();

        // No box yet.
        let d = decide_with(&c, &world, id);
        assert!(d.waiting);
        assert_eq!(d.next_pos, p(11, 6));
        assert!(d.action.is_none());
        adopt(&mut world, &d);

        // Box arrives; one settle tick.
        let belt = world.active_belt().unwrap();
        let bx = world.load_belt(belt, p(12, 6), 3, Some(id), 0).unwrap();
        let d = decide_with(&c, &world, id);
        assert!(!d.waiting);
        assert!(d.action.is_none());
        adopt(&mut world, &d);

        // Take it and start toward the nearest free shelf.
        let d = decide_with(&c, &world, id);
        assert_eq!(d.action, Some(RobotAction::PickUp { bx, belt }));
        assert_eq!(d.nav.destination, Some(p(6, 4)));
        assert!(d.next_pos.is_orthogonal_to(p(11, 6)));
        assert_eq!(d.nav.route_index, 2);
        let end = d.nav.route_end().unwrap();
        assert!(end.is_orthogonal_to(p(6, 4)));
    }

    #[test]
    fn pickup_without_free_shelf_leaves_box() {
        let mut world = world_with(&[p(11, 6)]);
        let id = robot_at(&world, p(11, 6));
        world.entities.robot_mut(id).unwrap().nav.destination = Some(p(11, 6));
        world.entities.robot_mut(id).unwrap().nav.set_route(vec![p(11, 6)]);
        let ids: Vec<_> = world.entities.shelves().map(|(s, _)| s).collect();
        for s in ids {
            world.entities.shelf_mut(s).unwrap().stored_box = Some(EntityId(1));
        }
        let belt = world.active_belt().unwrap();
        world.load_belt(belt, p(12, 6), 3, Some(id), 0).unwrap();

        let d = decide_with(&RobotController::new(), &world, id);
        assert!(d.action.is_none());
        assert_eq!(d.next_pos, p(11, 6));
    }

    #[test]
    fn drop_off_beside_free_destination_shelf() {
        let mut world = world_with(&[p(7, 4)]);
        let id = robot_at(&world, p(7, 4));
        {
            let r = world.entities.robot_mut(id).unwrap();
            r.cargo = Some(EntityId(7_000));
            r.nav.destination = Some(p(6, 4));
            r.nav.set_route(vec![p(8, 4), p(7, 4)]);
        }
        let d = decide_with(&RobotController::new(), &world, id);
        let shelf = world.shelf_at(p(6, 4)).unwrap();
        assert_eq!(d.action, Some(RobotAction::DropOff { shelf }));
    }

    #[test]
    fn full_destination_shelf_is_replaced() {
        let mut world = world_with(&[p(7, 4)]);
        let id = robot_at(&world, p(7, 4));
        let full = world.shelf_at(p(6, 4)).unwrap();
        world.entities.shelf_mut(full).unwrap().stored_box = Some(EntityId(1));
        {
            let r = world.entities.robot_mut(id).unwrap();
            r.cargo = Some(EntityId(7_000));
            r.nav.destination = Some(p(6, 4));
            r.nav.set_route(vec![p(8, 4), p(7, 4)]);
        }
        let d = decide_with(&RobotController::new(), &world, id);
        assert_ne!(d.nav.destination, Some(p(6, 4)));
        assert!(d.nav.destination.is_some_and(|dst| world.layout.is_shelf(dst)));
        assert!(d.action.is_none());
    }

    #[test]
    fn stranded_short_of_pickup_reapproaches() {
        // The charger relaxation ends routes to the pickup point at (12, 4).
        let mut world = world_with(&[p(12, 4)]);
        let id = robot_at(&world, p(12, 4));
        {
            let r = world.entities.robot_mut(id).unwrap();
            r.nav.destination = Some(p(11, 6));
            r.nav.set_route(vec![p(12, 3), p(12, 4)]);
        }
        let d = decide_with(&RobotController::new(), &world, id);
        assert_ne!(d.next_pos, p(12, 4));
        assert_eq!(d.nav.route_end(), Some(p(11, 6)));
    }

    #[test]
    fn knocked_off_route_replans() {
        let mut world = world_with(&[p(5, 6)]);
        let id = robot_at(&world, p(5, 6));
        {
            let r = world.entities.robot_mut(id).unwrap();
            r.nav.destination = Some(p(11, 6));
            r.nav.set_route(vec![p(5, 5), p(6, 5), p(7, 5), p(8, 5)]);
        }
        let d = decide_with(&RobotController::new(), &world, id);
        assert_eq!(d.next_pos, p(5, 6));
        assert_eq!(d.nav.route.first(), Some(&p(5, 6)));
    }

    #[test]
    fn enclosed_robot_keeps_destination_without_route() {
        let walls = [p(7, 2), p(9, 2), p(8, 1), p(8, 3)];
        let mut cells = vec![p(8, 2)];
        cells.extend(walls);
        let mut world = world_with(&cells);
        let id = robot_at(&world, p(8, 2));
        world.entities.robot_mut(id).unwrap().nav.destination = Some(p(0, 10));
        let c = RobotController::new();

        let d = decide_with(&c, &world, id);
        assert!(!d.nav.has_route());
        assert_eq!(d.next_pos, p(8, 2));
        assert_eq!(d.nav.destination, Some(p(0, 10)));
        assert!(d.action.is_none());

        // Plans as soon as a neighbour clears.
        adopt(&mut world, &d);
        let west = robot_at(&world, p(7, 2));
        world.move_robot(west, p(7, 1)).unwrap();
        let d = decide_with(&c, &world, id);
        assert!(d.nav.has_route());
        assert_eq!(d.nav.route.first(), Some(&p(8, 2)));
    }

    #[test]
    fn flat_battery_skips_planning() {
        let mut world = world_with(&[p(8, 6)]);
        let id = robot_at(&world, p(8, 6));
        {
            let r = world.entities.robot_mut(id).unwrap();
            r.battery = 0.0;
            r.nav.destination = Some(p(11, 6));
        }
        let d = decide_with(&RobotController::new(), &world, id);
        assert!(!d.nav.has_route());
        assert_eq!(d.next_pos, p(8, 6));
        assert_eq!(d.nav.destination, Some(p(11, 6)));
    }

    #[test]
    fn fully_charged_robot_with_no_errand_is_idle() {
        let mut world = world_with(&[p(0, 0)]);
        let id = robot_at(&world, p(0, 0));
        world.entities.robot_mut(id).unwrap().battery = Robot::BATTERY_MAX;
        let d = decide_with(&RobotController::new(), &world, id);
        assert!(d.nav.destination.is_none());
    }
}

// ── BeltController ────────────────────────────────────────────────────────────

#[cfg(test)]
mod belt_tests {
    use super::*;
    use crate::BeltController;

    #[test]
    fn certain_spawn_assigns_idle_robot() {
        let world = world_with(&[p(10, 6), p(0, 0)]);
        let belt = world.active_belt().unwrap();
        let mut rng = SimRng::new(1);
        let d = BeltController::new(1.0).decide(belt, &world, &mut rng).unwrap();
        let spawn = d.spawn.unwrap();
        assert_eq!(spawn.at, p(13, 12));
        assert_eq!(spawn.remaining, 7);
        assert!(spawn.weight < 10);
        assert_eq!(d.assign, Some(robot_at(&world, p(10, 6))));
        assert!(d.advance_to.is_none());
    }

    #[test]
    fn zero_probability_never_spawns() {
        let world = world_with(&[p(10, 6)]);
        let belt = world.active_belt().unwrap();
        let mut rng = SimRng::new(1);
        for _ in 0..50 {
            let d = BeltController::new(0.0).decide(belt, &world, &mut rng).unwrap();
            assert!(d.is_idle());
        }
    }

    #[test]
    fn riding_box_walks_the_lane() {
        let mut world = world_with(&[]);
        let belt = world.active_belt().unwrap();
        let c = BeltController::new(1.0);
        let mut rng = SimRng::new(1);
        world.load_belt(belt, p(13, 12), 2, Some(EntityId(1)), 7).unwrap();

        let mut visited = Vec::new();
        loop {
            let d = c.decide(belt, &world, &mut rng).unwrap();
            assert!(d.spawn.is_none());
            let Some(to) = d.advance_to else { break };
            world.advance_belt(belt, to).unwrap();
            visited.push(to);
        }
        assert_eq!(visited.len(), 7);
        assert_eq!(visited.first(), Some(&p(13, 11)));
        assert_eq!(visited[5], p(13, 6));
        assert_eq!(visited.last(), Some(&p(12, 6)));
    }

    #[test]
    fn unassigned_box_keeps_looking() {
        let mut world = world_with(&[p(10, 6)]);
        let id = robot_at(&world, p(10, 6));
        world.entities.robot_mut(id).unwrap().battery = 10.0;
        let belt = world.active_belt().unwrap();
        world.load_belt(belt, p(13, 12), 2, None, 7).unwrap();
        let c = BeltController::new(1.0);
        let mut rng = SimRng::new(1);

        assert_eq!(c.decide(belt, &world, &mut rng).unwrap().assign, None);

        world.entities.robot_mut(id).unwrap().battery = 80.0;
        assert_eq!(c.decide(belt, &world, &mut rng).unwrap().assign, Some(id));
    }
}
