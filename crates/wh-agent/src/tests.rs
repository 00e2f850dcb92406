//! Unit tests for wh-agent.

#[cfg(test)]
mod navigation {
    use wh_core::GridPos;

    use crate::Navigation;

    fn line(n: i32) -> Vec<GridPos> {
        (0..n).map(|x| GridPos::new(x, 0)).collect()
    }

    #[test]
    fn set_route_skips_own_cell() {
        let mut nav = Navigation::default();
        nav.set_route(line(3));
        assert_eq!(nav.route_index, 1);
        assert_eq!(nav.advance(), Some(GridPos::new(1, 0)));
        assert_eq!(nav.advance(), Some(GridPos::new(2, 0)));
        assert_eq!(nav.advance(), None);
        assert_eq!(nav.route_index, 3);
    }

    #[test]
    fn empty_route_has_zero_cursor() {
        let mut nav = Navigation::default();
        nav.set_route(vec![]);
        assert_eq!(nav.route_index, 0);
        assert!(!nav.has_route());
    }

    #[test]
    fn clear_route_keeps_destination() {
        let mut nav = Navigation { destination: Some(GridPos::new(5, 5)), ..Default::default() };
        nav.set_route(line(4));
        nav.clear_route();
        assert_eq!(nav.destination, Some(GridPos::new(5, 5)));
        assert!(nav.route.is_empty());

        nav.clear();
        assert!(nav.destination.is_none());
    }
}

#[cfg(test)]
mod robot {
    use wh_core::{EntityId, GridPos};

    use crate::Robot;

    #[test]
    fn battery_clamped_on_construction() {
        assert_eq!(Robot::with_battery(150.0).battery, 100.0);
        assert_eq!(Robot::with_battery(-3.0).battery, 0.0);
        assert_eq!(Robot::new().battery, 50.0);
    }

    #[test]
    fn spend_move_never_goes_negative() {
        let mut r = Robot::with_battery(0.25);
        r.spend_move();
        assert_eq!(r.battery, 0.0);
        assert_eq!(r.moves, 1);
    }

    #[test]
    fn charge_caps_at_max() {
        let mut r = Robot::with_battery(90.0);
        assert!(r.charge());
        assert_eq!(r.battery, 100.0);

        let mut r = Robot::with_battery(10.0);
        assert!(!r.charge());
        assert_eq!(r.battery, 30.0);
    }

    #[test]
    fn idle_requires_charge_no_destination_no_box() {
        let mut r = Robot::new();
        assert!(r.is_idle());

        r.battery = 25.0;
        assert!(!r.is_idle());
        assert!(r.is_low_battery());

        let mut r = Robot::new();
        r.nav.destination = Some(GridPos::new(11, 6));
        assert!(!r.is_idle());

        let mut r = Robot::new();
        r.cargo = Some(EntityId(9));
        assert!(!r.is_idle());
    }
}

#[cfg(test)]
mod registry {
    use wh_core::EntityId;

    use crate::{AgentError, Entity, EntityKind, EntityRegistry, Robot, Shelf};

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut reg = EntityRegistry::new();
        let a = reg.insert(Entity::EmptyCell);
        let b = reg.insert(Entity::Shelf(Shelf::default()));
        reg.remove(a).unwrap();
        let c = reg.insert(Entity::Robot(Robot::new()));
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(c, EntityId(2));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn typed_access_checks_kind() {
        let mut reg = EntityRegistry::new();
        let shelf = reg.insert(Entity::Shelf(Shelf::default()));
        assert!(reg.shelf(shelf).is_ok());
        match reg.robot(shelf) {
            Err(AgentError::WrongKind { id, expected }) => {
                assert_eq!(id, shelf);
                assert_eq!(expected, EntityKind::Robot);
            }
            other => panic!("expected WrongKind, got {other:?}"),
        }
    }

    #[test]
    fn missing_id_is_not_found() {
        let reg = EntityRegistry::new();
        assert!(matches!(reg.robot(EntityId(4)), Err(AgentError::Core(_))));
    }

    #[test]
    fn kind_iterators_ascend() {
        let mut reg = EntityRegistry::new();
        let r1 = reg.insert(Entity::Robot(Robot::new()));
        reg.insert(Entity::EmptyCell);
        let r2 = reg.insert(Entity::Robot(Robot::new()));
        assert_eq!(reg.robot_ids(), vec![r1, r2]);
        assert_eq!(reg.count_of(EntityKind::EmptyCell), 1);
    }
}

#[cfg(test)]
mod builder {
    use wh_core::{GridPos, SimRng};
    use wh_grid::WarehouseLayout;

    use crate::{AgentError, EntityKind, WorldBuilder};

    #[test]
    fn standard_floor_entity_counts() {
        let mut rng = SimRng::new(1);
        let world = WorldBuilder::new(WarehouseLayout::standard())
            .robots(5)
            .build(&mut rng)
            .unwrap();
        let e = &world.entities;
        assert_eq!(e.count_of(EntityKind::Shelf), 30);
        assert_eq!(e.count_of(EntityKind::ConveyorBelt), 8);
        assert_eq!(e.count_of(EntityKind::Charger), 5);
        assert_eq!(e.count_of(EntityKind::EmptyCell), 139);
        assert_eq!(e.count_of(EntityKind::Robot), 5);
        assert_eq!(e.count_of(EntityKind::Box), 0);
    }

    #[test]
    fn only_spawn_belt_is_active() {
        let mut rng = SimRng::new(1);
        let world = WorldBuilder::new(WarehouseLayout::standard()).build(&mut rng).unwrap();
        let active: Vec<_> = world.entities.belts().filter(|(_, b)| b.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(world.position_of(active[0].0), Some(GridPos::new(12, 6)));
        assert_eq!(world.active_belt(), Some(active[0].0));
    }

    #[test]
    fn sampled_robots_on_distinct_free_cells() {
        let mut rng = SimRng::new(99);
        let world = WorldBuilder::new(WarehouseLayout::standard())
            .robots(20)
            .build(&mut rng)
            .unwrap();
        let positions: Vec<_> = world.robot_positions().into_iter().map(|(_, p)| p).collect();
        let unique: std::collections::HashSet<_> = positions.iter().collect();
        assert_eq!(unique.len(), 20);
        assert!(positions.iter().all(|&p| !world.layout.is_obstacle(p)));
    }

    #[test]
    fn same_seed_same_placement() {
        let build = |seed| {
            let mut rng = SimRng::new(seed);
            WorldBuilder::new(WarehouseLayout::standard())
                .robots(5)
                .build(&mut rng)
                .unwrap()
                .robot_positions()
        };
        assert_eq!(build(7), build(7));
    }

    #[test]
    fn too_many_robots_is_insufficient_space() {
        let mut rng = SimRng::new(1);
        let err = WorldBuilder::new(WarehouseLayout::standard())
            .robots(140)
            .build(&mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::InsufficientSpace { requested: 140, available: 139 }
        ));
    }

    #[test]
    fn pinned_positions_validated() {
        let mut rng = SimRng::new(1);
        let on_shelf = WorldBuilder::new(WarehouseLayout::standard())
            .robot_positions(vec![GridPos::new(2, 0)])
            .build(&mut rng);
        assert!(matches!(on_shelf, Err(AgentError::InvalidPlacement(_))));

        let twice = WorldBuilder::new(WarehouseLayout::standard())
            .robot_positions(vec![GridPos::new(0, 0), GridPos::new(0, 0)])
            .build(&mut rng);
        assert!(matches!(twice, Err(AgentError::InvalidPlacement(_))));

        let ok = WorldBuilder::new(WarehouseLayout::standard())
            .robot_positions(vec![GridPos::new(10, 6)])
            .build(&mut rng)
            .unwrap();
        assert_eq!(ok.robot_positions()[0].1, GridPos::new(10, 6));
    }
}

#[cfg(test)]
mod world {
    use wh_core::{GridPos, SimRng};
    use wh_grid::WarehouseLayout;

    use crate::{AgentError, BoxLocation, World, WorldBuilder};

    fn world_with_robot() -> World {
        let mut rng = SimRng::new(3);
        WorldBuilder::new(WarehouseLayout::standard())
            .robot_positions(vec![GridPos::new(11, 6)])
            .build(&mut rng)
            .unwrap()
    }

    #[test]
    fn box_moves_belt_to_robot_to_shelf() {
        let mut w = world_with_robot();
        let robot = w.robot_at(GridPos::new(11, 6)).unwrap();
        let belt = w.active_belt().unwrap();
        let shelf = w.shelf_at(GridPos::new(6, 4)).unwrap();

        let bx = w.load_belt(belt, GridPos::new(13, 12), 4, Some(robot), 7).unwrap();
        assert_eq!(w.locate_box(bx), Some(BoxLocation::OnBelt(GridPos::new(13, 12))));

        w.advance_belt(belt, GridPos::new(13, 11)).unwrap();
        assert_eq!(w.entities.belt(belt).unwrap().remaining, 6);
        assert_eq!(w.box_at(GridPos::new(13, 11)), Some(bx));

        w.pick_up(robot, bx, belt).unwrap();
        assert_eq!(w.locate_box(bx), Some(BoxLocation::CarriedBy(robot)));
        assert!(w.entities.belt(belt).unwrap().is_empty());
        assert!(w.position_of(bx).is_none());

        let stored = w.drop_off(robot, shelf).unwrap();
        assert_eq!(stored, bx);
        assert_eq!(w.locate_box(bx), Some(BoxLocation::StoredIn(shelf)));
        assert!(w.entities.robot(robot).unwrap().cargo.is_none());
        assert_eq!(w.entities.shelf(shelf).unwrap().stored_box, Some(bx));
    }

    #[test]
    fn drop_off_into_full_shelf_changes_nothing() {
        let mut w = world_with_robot();
        let robot = w.robot_at(GridPos::new(11, 6)).unwrap();
        let belt = w.active_belt().unwrap();
        let shelf = w.shelf_at(GridPos::new(6, 4)).unwrap();

        let first = w.load_belt(belt, GridPos::new(12, 6), 1, None, 0).unwrap();
        w.pick_up(robot, first, belt).unwrap();
        w.drop_off(robot, shelf).unwrap();

        let second = w.load_belt(belt, GridPos::new(12, 6), 2, None, 0).unwrap();
        w.pick_up(robot, second, belt).unwrap();
        let err = w.drop_off(robot, shelf).unwrap_err();
        assert!(matches!(err, AgentError::ShelfFull(s) if s == shelf));
        assert_eq!(w.entities.robot(robot).unwrap().cargo, Some(second));
        assert_eq!(w.entities.shelf(shelf).unwrap().stored_box, Some(first));
    }

    #[test]
    fn pick_up_from_wrong_belt_changes_nothing() {
        let mut w = world_with_robot();
        let robot = w.robot_at(GridPos::new(11, 6)).unwrap();
        let belt = w.active_belt().unwrap();
        let shelf = w.shelf_at(GridPos::new(6, 4)).unwrap();
        let bx = w.load_belt(belt, GridPos::new(12, 6), 5, Some(robot), 0).unwrap();

        let err = w.pick_up(robot, bx, shelf).unwrap_err();
        assert!(matches!(err, AgentError::WrongKind { id, .. } if id == shelf));
        assert_eq!(w.locate_box(bx), Some(BoxLocation::OnBelt(GridPos::new(12, 6))));
        assert_eq!(w.entities.belt(belt).unwrap().cargo, Some(bx));
        assert!(w.entities.robot(robot).unwrap().cargo.is_none());
    }

    #[test]
    fn drop_off_without_cargo_fails() {
        let mut w = world_with_robot();
        let robot = w.robot_at(GridPos::new(11, 6)).unwrap();
        let shelf = w.shelf_at(GridPos::new(6, 4)).unwrap();
        assert!(matches!(w.drop_off(robot, shelf), Err(AgentError::NotCarrying(_))));
    }

    #[test]
    fn move_robot_rejects_non_robot() {
        let mut w = world_with_robot();
        let shelf = w.shelf_at(GridPos::new(6, 4)).unwrap();
        assert!(w.move_robot(shelf, GridPos::new(0, 0)).is_err());
        assert_eq!(w.position_of(shelf), Some(GridPos::new(6, 4)));
    }

    #[test]
    fn occupancy_indexes_robots_only() {
        let w = world_with_robot();
        let occ = w.occupancy();
        assert_eq!(occ.len(), 1);
        assert!(occ.robot_at(GridPos::new(11, 6)).is_some());
        assert!(occ.robot_at(GridPos::new(2, 0)).is_none());
    }
}
