//! Simulation and registry configuration.

use std::time::Duration;

use crate::{WhError, WhResult};

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Construction-time parameters of one warehouse simulation.
///
/// Both knobs are the ones exposed by the visualization layer: the robot
/// count (an integer slider) and the per-tick box spawn probability (a
/// fraction slider).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Robots placed at random free cells when the warehouse is built.
    pub num_robots: usize,

    /// Probability in `[0, 1]` that an empty conveyor belt spawns a box on a
    /// given tick.
    pub box_percentage: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// Upper bound of the robot-count slider.  Larger counts are accepted as
    /// long as the grid has room; they are only logged as unusual.
    pub const MAX_ROBOTS: usize = 20;

    /// Robot count used when a service creates an instance without options.
    pub const DEFAULT_ROBOTS: usize = 5;

    /// Spawn probability used when a service creates an instance without options.
    pub const DEFAULT_BOX_PERCENTAGE: f64 = 0.37;

    pub fn new(num_robots: usize, box_percentage: f64) -> Self {
        Self { num_robots, box_percentage, ..Self::default() }
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject values that can never produce a meaningful simulation.
    ///
    /// Whether `num_robots` fits the grid is checked later, against the
    /// actual layout, by the warehouse builder.
    pub fn validate(&self) -> WhResult<()> {
        if !(0.0..=1.0).contains(&self.box_percentage) {
            return Err(WhError::Config(format!(
                "box_percentage must lie in [0, 1], got {}",
                self.box_percentage
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_robots:     Self::DEFAULT_ROBOTS,
            box_percentage: Self::DEFAULT_BOX_PERCENTAGE,
            seed:           0x5eed_0f_b0c5,
        }
    }
}

// ── RegistryConfig ────────────────────────────────────────────────────────────

/// Lifecycle policy of a simulation instance registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum number of live instances.  Creating one more evicts the least
    /// recently used instance.
    pub capacity: usize,

    /// Instances untouched for longer than this are dropped by
    /// `evict_idle`.  `None` disables idle eviction.
    pub max_idle: Option<Duration>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            max_idle: Some(Duration::from_secs(30 * 60)),
        }
    }
}
