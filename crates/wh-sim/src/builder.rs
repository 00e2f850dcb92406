//! Fluent builder for constructing a [`Warehouse`].

use wh_agent::{AgentError, WorldBuilder};
use wh_behavior::{BeltController, RobotBehavior, RobotController};
use wh_core::{GridPos, SimClock, SimConfig, SimRng, WhError};
use wh_grid::WarehouseLayout;

use crate::{SimError, SimResult, Warehouse, WarehouseStats};

/// Fluent builder for [`Warehouse<B>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.layout(l)`            | `WarehouseLayout::standard()`    |
/// | `.behavior(b)`          | `RobotController::new()`         |
/// | `.robot_positions(v)`   | `config.num_robots` random cells |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = WarehouseBuilder::new(SimConfig::new(5, 0.37)).build()?;
/// sim.run(100, &mut NoopObserver)?;
/// ```
pub struct WarehouseBuilder<B: RobotBehavior = RobotController> {
    config:          SimConfig,
    layout:          WarehouseLayout,
    behavior:        B,
    robot_positions: Option<Vec<GridPos>>,
}

impl WarehouseBuilder<RobotController> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            layout:          WarehouseLayout::standard(),
            behavior:        RobotController::new(),
            robot_positions: None,
        }
    }
}

impl<B: RobotBehavior> WarehouseBuilder<B> {
    /// Swap in a different robot behavior.
    pub fn behavior<B2: RobotBehavior>(self, behavior: B2) -> WarehouseBuilder<B2> {
        WarehouseBuilder {
            config:          self.config,
            layout:          self.layout,
            behavior,
            robot_positions: self.robot_positions,
        }
    }

    pub fn layout(mut self, layout: WarehouseLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Pin robots to these cells instead of sampling `config.num_robots`
    /// random ones.  One robot per position.
    pub fn robot_positions(mut self, positions: Vec<GridPos>) -> Self {
        self.robot_positions = Some(positions);
        self
    }

    /// Validate the configuration, lay out the floor, and return a ready
    /// [`Warehouse`].  Nothing is returned half-built.
    pub fn build(self) -> SimResult<Warehouse<B>> {
        self.config.validate().map_err(|e| match e {
            WhError::Config(msg) => SimError::Config(msg),
            other => SimError::Config(other.to_string()),
        })?;
        if self.config.num_robots > SimConfig::MAX_ROBOTS {
            tracing::warn!(
                robots = self.config.num_robots,
                max = SimConfig::MAX_ROBOTS,
                "robot count above the usual range"
            );
        }

        let mut rng = SimRng::new(self.config.seed);
        let mut world = WorldBuilder::new(self.layout).robots(self.config.num_robots);
        if let Some(positions) = self.robot_positions {
            world = world.robot_positions(positions);
        }
        let world = world.build(&mut rng).map_err(|e| match e {
            AgentError::InsufficientSpace { requested, available } => {
                SimError::InsufficientSpace { requested, available }
            }
            AgentError::InvalidPlacement(pos) => {
                SimError::Config(format!("robot cannot start at {pos}"))
            }
            other => SimError::Agent(other),
        })?;

        Ok(Warehouse {
            clock:    SimClock::new(),
            belt:     BeltController::new(self.config.box_percentage),
            config:   self.config,
            world,
            behavior: self.behavior,
            stats:    WarehouseStats::default(),
            rng,
        })
    }
}
