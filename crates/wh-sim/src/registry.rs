//! Process-wide map of live simulation instances.
//!
//! This is the boundary a service layer talks to: create an instance, step
//! it by id, drop it.  The registry takes `&mut self` everywhere; a server
//! that shares it between request handlers wraps it in a `Mutex`, which also
//! keeps at most one tick in flight per instance.

use std::collections::HashMap;
use std::time::Instant;

use wh_core::{RegistryConfig, SimConfig, SimulationId};

use crate::{SimError, SimResult, TickSnapshot, Warehouse, WarehouseBuilder};

/// Path prefix under which instances are addressed.
pub const LOCATION_PREFIX: &str = "/warehouseSimulations";

/// Returned by [`SimulationRegistry::create`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedSimulation {
    pub id:       SimulationId,
    /// `/warehouseSimulations/{id}`
    pub location: String,
}

struct Entry {
    sim:       Warehouse,
    last_used: Instant,
}

pub struct SimulationRegistry {
    config: RegistryConfig,
    sims:   HashMap<SimulationId, Entry>,
}

impl SimulationRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config, sims: HashMap::new() }
    }

    /// Build a warehouse from `config` and register it under a fresh id.
    ///
    /// At capacity, the least recently used instance is dropped first.
    pub fn create(&mut self, config: SimConfig) -> SimResult<CreatedSimulation> {
        let sim = WarehouseBuilder::new(config).build()?;
        let id = SimulationId::new_v4();

        while self.config.capacity > 0 && self.sims.len() >= self.config.capacity {
            let Some(oldest) = self.least_recently_used() else { break };
            self.sims.remove(&oldest);
            tracing::info!(%oldest, "evicted least recently used simulation");
        }

        self.sims.insert(id, Entry { sim, last_used: Instant::now() });
        tracing::info!(%id, "simulation created");
        Ok(CreatedSimulation { id, location: format!("{LOCATION_PREFIX}/{id}") })
    }

    /// Create an instance with the service defaults.  Each default instance
    /// draws its seed from its id, so instances do not replay each other.
    pub fn create_default(&mut self) -> SimResult<CreatedSimulation> {
        let (seed, _) = SimulationId::new_v4().0.as_u64_pair();
        self.create(SimConfig::default().with_seed(seed))
    }

    /// Step instance `id` forward `steps` ticks and return a snapshot taken
    /// after each one.  Zero steps returns an empty list and leaves the clock
    /// alone, but still counts as a use.
    pub fn advance(&mut self, id: SimulationId, steps: u64) -> SimResult<Vec<TickSnapshot>> {
        let entry = self.sims.get_mut(&id).ok_or(SimError::NotFound(id))?;
        entry.last_used = Instant::now();

        let mut out = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            entry.sim.step()?;
            out.push(entry.sim.snapshot());
        }
        Ok(out)
    }

    pub fn get(&self, id: SimulationId) -> Option<&Warehouse> {
        self.sims.get(&id).map(|e| &e.sim)
    }

    pub fn contains(&self, id: SimulationId) -> bool {
        self.sims.contains_key(&id)
    }

    pub fn remove(&mut self, id: SimulationId) -> SimResult<()> {
        self.sims.remove(&id).map(|_| ()).ok_or(SimError::NotFound(id))
    }

    /// Drop every instance not touched within `max_idle` of `now`.
    /// Returns the evicted ids.
    pub fn evict_idle(&mut self, now: Instant) -> Vec<SimulationId> {
        let Some(max_idle) = self.config.max_idle else {
            return Vec::new();
        };
        let stale: Vec<SimulationId> = self
            .sims
            .iter()
            .filter(|(_, e)| now.saturating_duration_since(e.last_used) > max_idle)
            .map(|(&id, _)| id)
            .collect();
        for id in &stale {
            self.sims.remove(id);
            tracing::info!(%id, "evicted idle simulation");
        }
        stale
    }

    pub fn len(&self) -> usize {
        self.sims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sims.is_empty()
    }

    fn least_recently_used(&self) -> Option<SimulationId> {
        self.sims.iter().min_by_key(|(_, e)| e.last_used).map(|(&id, _)| id)
    }
}

impl Default for SimulationRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
