//! Simulation observer trait for progress reporting and data collection.

use wh_agent::World;
use wh_core::Tick;

use crate::{TickSnapshot, TickSummary};

/// Callbacks invoked by [`Warehouse::run_ticks`][crate::Warehouse::run_ticks]
/// at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} boxes stored", summary.tick, summary.boxes_stored);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any robot decides.
    /// `world` is the state the tick starts from.
    fn on_tick_start(&mut self, _tick: Tick, _world: &World) {}

    /// Called at the end of each tick with its counters.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called after every tick with read-only access to the resulting world,
    /// so output writers can record state without the simulation knowing
    /// any output format.
    fn on_snapshot(&mut self, _tick: Tick, _world: &World) {}

    /// Called once by [`Warehouse::run`][crate::Warehouse::run] after the
    /// final tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Records a snapshot of the world at the start of every tick, before the
/// tick mutates it.
#[derive(Debug, Default)]
pub struct DataCollector {
    pub history: Vec<TickSnapshot>,
}

impl DataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&TickSnapshot> {
        self.history.last()
    }
}

impl SimObserver for DataCollector {
    fn on_tick_start(&mut self, tick: Tick, world: &World) {
        self.history.push(TickSnapshot::capture(tick, world));
    }
}
