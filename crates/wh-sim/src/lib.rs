//! `wh-sim` — tick loop orchestrator for the warehouse robot simulation.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for each tick:
//!   ① Decide   — RobotBehavior::decide for every robot against the
//!                tick-start world (parallel with the `parallel` feature).
//!   ② Redirect — head-on conflicts: the robot without a destination
//!                steps aside along its column.
//!   ③ Commit   — in ascending robot id order:
//!                  navigation state   → copied onto the robot
//!                  PickUp / DropOff   → box changes hands
//!                  Charge             → +20 battery
//!                  moves              → into free cells only, 0.5 battery each
//!   ④ Belt     — spawn or advance the riding box; assign an idle robot.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decide phase on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash for the per-tick robot occupancy index.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_core::SimConfig;
//! use wh_sim::{DataCollector, WarehouseBuilder};
//!
//! let mut sim = WarehouseBuilder::new(SimConfig::new(5, 0.37)).build()?;
//! let mut collector = DataCollector::new();
//! sim.run(100, &mut collector)?;
//! println!("{}", serde_json::to_string(&sim.snapshot())?);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod registry;
pub mod sim;
pub mod snapshot;


pub use builder::WarehouseBuilder;
pub use error::{SimError, SimResult};
pub use observer::{DataCollector, NoopObserver, SimObserver};
pub use registry::{CreatedSimulation, SimulationRegistry, LOCATION_PREFIX};
pub use sim::{TickSummary, Warehouse, WarehouseStats};
pub use snapshot::{BeltRecord, BoxRecord, ChargerRecord, RobotRecord, ShelfRecord, TickSnapshot};
