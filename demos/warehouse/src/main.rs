//! warehouse — end-to-end demo of the warehouse robot simulation.
//!
//! Two parts:
//!
//! 1. Drives an instance through the [`SimulationRegistry`] the way a
//!    service would (create, advance, print the JSON snapshot).
//! 2. Runs a longer simulation directly with CSV output and prints a
//!    per-robot summary.
//!
//! `RUST_LOG=debug cargo run -p warehouse` shows per-tick logs.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use wh_agent::World;
use wh_core::{SimConfig, Tick};
use wh_output::{CsvWriter, OutputWriter, SimOutputObserver};
use wh_sim::{SimObserver, SimulationRegistry, TickSummary, WarehouseBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROBOTS:         usize = 8;
const BOX_PERCENTAGE: f64   = 0.37;
const SEED:           u64   = 42;
const TICKS:          u64   = 500;
const SERVICE_STEPS:  u64   = 3;
const OUTPUT_DIR:     &str  = "output/warehouse";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    peak_charging: u32,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, peak_charging: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summary_rows += 1;
        self.peak_charging = self.peak_charging.max(summary.robots_charging);
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, world: &World) {
        self.snapshot_rows += world.entities.robots().count();
        self.inner.on_snapshot(tick, world);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    println!("=== warehouse robot simulation ===");
    println!();

    // 1. Service-style access through the registry.
    let mut registry = SimulationRegistry::default();
    let created = registry.create_default()?;
    println!("Created {}", created.location);

    let snapshots = registry.advance(created.id, SERVICE_STEPS)?;
    if let Some(last) = snapshots.last() {
        println!("Snapshot after {} steps:", snapshots.len());
        println!("{}", serde_json::to_string_pretty(last)?);
    }
    registry.remove(created.id)?;
    println!();

    // 2. Direct run with CSV output.
    let config = SimConfig::new(ROBOTS, BOX_PERCENTAGE).with_seed(SEED);
    println!("Robots: {ROBOTS}  |  Box probability: {BOX_PERCENTAGE}  |  Ticks: {TICKS}  |  Seed: {SEED}");
    let mut sim = WarehouseBuilder::new(config).build()?;

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    sim.run(TICKS, &mut obs)?;
    let elapsed = t0.elapsed();
    tracing::info!(ticks = TICKS, elapsed_ms = elapsed.as_millis() as u64, "run finished");

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  robot_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!(
        "  boxes spawned {}  |  stored {}  |  peak charging {}",
        sim.stats.boxes_spawned, sim.stats.boxes_stored, obs.peak_charging
    );
    println!();

    let snap = sim.snapshot();
    println!("{:<8} {:<10} {:<6} {:<9} {:<6}", "Robot", "Position", "Box", "Battery", "Moves");
    println!("{}", "-".repeat(43));
    for r in &snap.robots {
        println!(
            "{:<8} {:<10} {:<6} {:<9.1} {:<6}",
            r.unique_id,
            format!("({}, {})", r.position[0], r.position[1]),
            if r.has_box { "yes" } else { "no" },
            r.battery,
            r.moves,
        );
    }

    Ok(())
}
