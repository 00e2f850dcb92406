//! Fluent builder that lays out a warehouse floor and drops robots onto it.
//!
//! # Usage
//!
//! ```rust
//! use wh_agent::WorldBuilder;
//! use wh_core::SimRng;
//! use wh_grid::WarehouseLayout;
//!
//! let mut rng = SimRng::new(42);
//! let world = WorldBuilder::new(WarehouseLayout::standard())
//!     .robots(5)
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(world.entities.robots().count(), 5);
//! ```
//!
//! Entities are created in a fixed order (shelves row by row, belts,
//! chargers, empty cells, robots), so the ids of fixtures are stable for a
//! given layout regardless of seed.

use std::collections::HashSet;

use wh_core::{GridPos, SimRng};
use wh_grid::WarehouseLayout;

use crate::entity::{Charger, ConveyorBelt, Entity, Robot, Shelf};
use crate::{AgentError, AgentResult, World};

pub struct WorldBuilder {
    layout:          WarehouseLayout,
    num_robots:      usize,
    robot_positions: Option<Vec<GridPos>>,
    battery:         f32,
}

impl WorldBuilder {
    pub fn new(layout: WarehouseLayout) -> Self {
        Self {
            layout,
            num_robots:      0,
            robot_positions: None,
            battery:         Robot::BATTERY_INITIAL,
        }
    }

    /// Number of robots to sample onto free cells.  Ignored when
    /// [`robot_positions`](Self::robot_positions) is set.
    pub fn robots(mut self, n: usize) -> Self {
        self.num_robots = n;
        self
    }

    /// Place one robot at each of `positions` instead of sampling.
    pub fn robot_positions(mut self, positions: Vec<GridPos>) -> Self {
        self.robot_positions = Some(positions);
        self
    }

    /// Starting battery for every robot.
    pub fn battery(mut self, battery: f32) -> Self {
        self.battery = battery;
        self
    }

    /// Construct the world.
    ///
    /// Fails with [`AgentError::InsufficientSpace`] when more robots are
    /// requested than there are free cells, and with
    /// [`AgentError::InvalidPlacement`] when a pinned position is off the
    /// grid, on a fixture, or listed twice.
    pub fn build(self, rng: &mut SimRng) -> AgentResult<World> {
        let free = self.layout.free_cells();
        let robot_cells = match self.robot_positions {
            Some(pinned) => validate_pinned(&self.layout, pinned)?,
            None => rng.sample(&free, self.num_robots).ok_or(AgentError::InsufficientSpace {
                requested: self.num_robots,
                available: free.len(),
            })?,
        };

        let mut world = World::new(self.layout);

        let shelves: Vec<GridPos> = world.layout.shelves().collect();
        for pos in shelves {
            world.spawn(Entity::Shelf(Shelf::default()), pos)?;
        }

        let spawn = world.layout.belt_spawn();
        let belts = world.layout.belt_cells.clone();
        for pos in belts {
            let belt = ConveyorBelt { active: Some(pos) == spawn, ..Default::default() };
            world.spawn(Entity::ConveyorBelt(belt), pos)?;
        }

        let chargers = world.layout.chargers.clone();
        for pos in chargers {
            world.spawn(Entity::Charger(Charger::default()), pos)?;
        }

        for &pos in &free {
            world.spawn(Entity::EmptyCell, pos)?;
        }

        for pos in robot_cells {
            world.spawn(Entity::Robot(Robot::with_battery(self.battery)), pos)?;
        }

        tracing::debug!(
            robots = world.entities.robots().count(),
            entities = world.entities.len(),
            "warehouse floor laid out"
        );
        Ok(world)
    }
}

fn validate_pinned(layout: &WarehouseLayout, pinned: Vec<GridPos>) -> AgentResult<Vec<GridPos>> {
    let available = layout.free_cell_count();
    if pinned.len() > available {
        return Err(AgentError::InsufficientSpace { requested: pinned.len(), available });
    }
    let mut seen = HashSet::new();
    for &pos in &pinned {
        if !layout.in_bounds(pos) || layout.is_obstacle(pos) || !seen.insert(pos) {
            return Err(AgentError::InvalidPlacement(pos));
        }
    }
    Ok(pinned)
}
