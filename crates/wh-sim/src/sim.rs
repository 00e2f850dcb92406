//! The `Warehouse` struct and its tick loop.

use wh_agent::{AgentError, World};
use wh_behavior::{BeltController, DecideContext, RobotAction, RobotBehavior, RobotController, RobotDecision};
use wh_core::{EntityId, GridPos, SimClock, SimConfig, SimRng, Tick};

use crate::{SimObserver, SimResult, TickSnapshot};

// ── Statistics ────────────────────────────────────────────────────────────────

/// Running totals since construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WarehouseStats {
    pub boxes_spawned: u64,
    pub boxes_stored:  u64,
}

/// What happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:            Tick,
    /// Robot moves committed this tick.
    pub moves:           u32,
    pub robots_charging: u32,
    /// Totals after the tick.
    pub boxes_spawned:   u64,
    pub boxes_stored:    u64,
}

// ── Warehouse ─────────────────────────────────────────────────────────────────

/// One running warehouse simulation.
///
/// Each tick runs two passes, robots first, then the belt:
///
/// 1. **Robot decide phase** (optionally parallel with the `parallel`
///    feature): every robot's [`RobotBehavior::decide`] reads the world as it
///    stood at the start of the tick.
/// 2. **Robot commit phase** (sequential, ascending robot id):
///    - head-on conflicts between neighboring robots are redirected;
///    - navigation state and pickup / drop-off / charge actions are applied;
///    - moves are committed into cells no robot occupies, blocked robots
///      hold and replan next tick.
/// 3. **Belt pass**: the active belt spawns or advances its box and looks
///    for an idle robot to fetch it.
///
/// Create via [`WarehouseBuilder`][crate::WarehouseBuilder].
pub struct Warehouse<B: RobotBehavior = RobotController> {
    pub config:   SimConfig,
    pub clock:    SimClock,
    pub world:    World,
    pub behavior: B,
    pub belt:     BeltController,
    pub stats:    WarehouseStats,
    pub(crate) rng: SimRng,
}

impl<B: RobotBehavior> Warehouse<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance one tick without observation.
    pub fn step(&mut self) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        let summary = self.process_tick(now)?;
        self.clock.advance();
        Ok(summary)
    }

    /// Run exactly `n` ticks, calling observer hooks around each one.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now, &self.world);
            let summary = self.process_tick(now)?;
            observer.on_tick_end(&summary);
            observer.on_snapshot(now, &self.world);
            self.clock.advance();
        }
        Ok(())
    }

    /// [`run_ticks`](Self::run_ticks), then signal the end of the run.
    pub fn run<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        self.run_ticks(n, observer)?;
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// The current state in the exchange schema.
    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot::capture(self.clock.current_tick, &self.world)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        let decisions = self.decide_all(now)?;
        let mut summary = self.commit_all(decisions)?;
        self.belt_pass()?;

        summary.tick = now;
        summary.boxes_spawned = self.stats.boxes_spawned;
        summary.boxes_stored = self.stats.boxes_stored;
        tracing::debug!(
            tick = %now,
            moves = summary.moves,
            charging = summary.robots_charging,
            spawned = summary.boxes_spawned,
            stored = summary.boxes_stored,
            "tick complete"
        );
        Ok(summary)
    }

    /// Collect every robot's decision against the tick-start world.
    ///
    /// Decisions come back in ascending robot id order whether or not the
    /// `parallel` feature is on.
    fn decide_all(&self, now: Tick) -> SimResult<Vec<RobotDecision>> {
        let robots = self.world.entities.robot_ids();
        let occupancy = self.world.occupancy();
        let ctx = DecideContext::new(now, &self.world, &occupancy);
        let behavior = &self.behavior;

        #[cfg(not(feature = "parallel"))]
        {
            robots
                .iter()
                .map(|&robot| behavior.decide(robot, &ctx).map_err(Into::into))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            robots
                .par_iter()
                .map(|&robot| behavior.decide(robot, &ctx).map_err(Into::into))
                .collect()
        }
    }

    /// Apply all robot decisions.
    fn commit_all(&mut self, mut decisions: Vec<RobotDecision>) -> SimResult<TickSummary> {
        let starts: Vec<GridPos> = decisions
            .iter()
            .map(|d| self.world.robot_pos(d.robot))
            .collect::<Result<_, _>>()?;

        self.redirect_head_on(&starts, &mut decisions);

        // ── Navigation state ──────────────────────────────────────────────
        for d in &decisions {
            let robot = self.world.entities.robot_mut(d.robot)?;
            robot.nav = d.nav.clone();
            robot.waiting = d.waiting;
            robot.next_pos = Some(d.next_pos);
        }

        // ── Actions ───────────────────────────────────────────────────────
        let mut summary = TickSummary::default();
        for (_, charger) in self.world.entities.chargers_mut() {
            charger.is_occupied = false;
        }
        for d in &decisions {
            let Some(action) = d.action else { continue };
            match action {
                RobotAction::PickUp { bx, belt } => {
                    self.world.pick_up(d.robot, bx, belt)?;
                    tracing::debug!(robot = %d.robot, bx = %bx, "picked up box");
                }
                RobotAction::DropOff { shelf } => match self.world.drop_off(d.robot, shelf) {
                    Ok(bx) => {
                        self.world.entities.robot_mut(d.robot)?.nav.clear();
                        self.stats.boxes_stored += 1;
                        tracing::debug!(robot = %d.robot, bx = %bx, shelf = %shelf, "stored box");
                    }
                    // Filled earlier in this commit; retarget next tick.
                    Err(AgentError::ShelfFull(_)) => {
                        tracing::trace!(robot = %d.robot, shelf = %shelf, "shelf taken");
                    }
                    Err(e) => return Err(e.into()),
                },
                RobotAction::Charge { charger } => {
                    self.world.entities.charger_mut(charger)?.is_occupied = true;
                    let robot = self.world.entities.robot_mut(d.robot)?;
                    if robot.charge() {
                        robot.nav.clear();
                        tracing::debug!(robot = %d.robot, "fully charged");
                    }
                    summary.robots_charging += 1;
                }
            }
        }

        // ── Moves ─────────────────────────────────────────────────────────
        let mut pending: Vec<(EntityId, GridPos)> = Vec::new();
        for (d, &from) in decisions.iter().zip(&starts) {
            if !d.is_move(from) {
                continue;
            }
            let layout = &self.world.layout;
            let movable = self.world.entities.robot(d.robot)?.battery > 0.0;
            if movable && layout.in_bounds(d.next_pos) && !layout.is_obstacle(d.next_pos) {
                pending.push((d.robot, d.next_pos));
            } else {
                self.block(d.robot, from)?;
            }
        }

        // Repeat until no pending move can go ahead: a robot leaving a cell
        // may unblock one that was queued behind it.
        loop {
            let before = pending.len();
            let mut still_blocked = Vec::with_capacity(before);
            for (robot, to) in pending {
                if self.world.robot_at(to).is_some() {
                    still_blocked.push((robot, to));
                    continue;
                }
                self.world.move_robot(robot, to)?;
                self.world.entities.robot_mut(robot)?.spend_move();
                summary.moves += 1;
            }
            pending = still_blocked;
            if pending.len() == before {
                break;
            }
        }
        for (robot, _) in pending {
            let from = self.world.robot_pos(robot)?;
            tracing::trace!(%robot, at = %from, "move blocked");
            self.block(robot, from)?;
        }

        Ok(summary)
    }

    /// Hold `robot` at `at` and drop its route.
    fn block(&mut self, robot: EntityId, at: GridPos) -> SimResult<()> {
        let state = self.world.entities.robot_mut(robot)?;
        state.next_pos = Some(at);
        state.nav.clear_route();
        Ok(())
    }

    /// Resolve head-on conflicts: two robots one king-move apart that want the
    /// same cell.  Whichever has no destination steps aside along its column,
    /// forward on a through lane and backward elsewhere.  When both have
    /// destinations nothing changes here; the move commit keeps them apart.
    fn redirect_head_on(&self, starts: &[GridPos], decisions: &mut [RobotDecision]) {
        let n = decisions.len();
        for i in 0..n {
            for j in 0..n {
                if i == j || starts[i].chebyshev(starts[j]) != 1 {
                    continue;
                }
                if decisions[i].next_pos != decisions[j].next_pos {
                    continue;
                }
                if decisions[i].nav.destination.is_none() {
                    decisions[i].next_pos = self.step_aside(starts[i]);
                } else if decisions[j].nav.destination.is_none() {
                    decisions[j].next_pos = self.step_aside(starts[j]);
                }
            }
        }
    }

    fn step_aside(&self, from: GridPos) -> GridPos {
        let layout = &self.world.layout;
        let dy = if layout.through_lanes.contains(&from.y) { 1 } else { -1 };
        let to = from.offset(0, dy);
        if layout.in_bounds(to) && !layout.is_obstacle(to) {
            tracing::trace!(from = %from, to = %to, "redirected");
            to
        } else {
            from
        }
    }

    /// Decide and apply the active belt's move for this tick.
    fn belt_pass(&mut self) -> SimResult<()> {
        let Some(belt) = self.world.active_belt() else {
            return Ok(());
        };
        let decision = self.belt.decide(belt, &self.world, &mut self.rng)?;

        let bx = if let Some(spawn) = decision.spawn {
            let bx = self.world.load_belt(belt, spawn.at, spawn.weight, decision.assign, spawn.remaining)?;
            self.stats.boxes_spawned += 1;
            tracing::debug!(bx = %bx, weight = spawn.weight, "box spawned");
            Some(bx)
        } else {
            if let Some(to) = decision.advance_to {
                self.world.advance_belt(belt, to)?;
            }
            self.world.entities.belt(belt)?.cargo
        };

        if let (Some(robot), Some(bx)) = (decision.assign, bx) {
            self.world.entities.box_item_mut(bx)?.carrier = Some(robot);
            let pickup = self.world.layout.pickup_point;
            self.world.entities.robot_mut(robot)?.nav.destination = Some(pickup);
            tracing::debug!(%robot, bx = %bx, "robot assigned to box");
        }
        Ok(())
    }
}
