//! Pathfinding trait and default A* implementation.
//!
//! # Pluggability
//!
//! Robot controllers call routing through the [`Pathfinder`] trait, so a
//! different search (jump-point, cached paths, …) can be swapped in without
//! touching the controller.
//!
//! # Goal relaxation
//!
//! Shelves and chargers are impassable, so a robot never needs to stand *on*
//! one; it only needs to reach a cell next to it.  Under
//! [`GoalRule::Relaxed`] the search redefines its goal mid-flight:
//!
//! - while the requester carries a box, the first expanded cell that touches
//!   any shelf becomes the goal;
//! - regardless of cargo, the first expanded cell that touches any charger
//!   becomes the goal.
//!
//! The termination test compares against the *current* goal.  The heuristic
//! keeps pointing at the nominal target, which is what steers the first
//! qualifying expansion toward it.
//!
//! [`GoalRule::Exact`] turns relaxation off; controllers use it to approach a
//! specific free cell beside their target.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use wh_core::{EntityId, GridPos};

use crate::occupancy::{PosMap, PosSet};
use crate::{GridError, GridResult, RobotOccupancy, WarehouseLayout};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a path query: every cell from the start to the reached goal,
/// both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub cells: Vec<GridPos>,
}

impl Path {
    /// Number of moves needed to walk the path.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// `true` if the start already satisfied the goal.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() <= 1
    }

    /// The cell the search terminated on.
    pub fn goal(&self) -> Option<GridPos> {
        self.cells.last().copied()
    }
}

// ── Requests ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum GoalRule {
    /// Shelf- and charger-adjacency may end the search early.
    #[default]
    Relaxed,
    /// Only the requested cell ends the search.
    Exact,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathRequest {
    pub from:      GridPos,
    pub to:        GridPos,
    /// The robot asking.  Its own cell never counts as blocked.
    pub requester: Option<EntityId>,
    /// Whether the requester holds a box (enables shelf relaxation).
    pub carrying:  bool,
    pub goal:      GoalRule,
}

impl PathRequest {
    pub fn new(from: GridPos, to: GridPos) -> Self {
        Self { from, to, requester: None, carrying: false, goal: GoalRule::Relaxed }
    }

    pub fn requester(mut self, robot: EntityId) -> Self {
        self.requester = Some(robot);
        self
    }

    pub fn carrying(mut self, carrying: bool) -> Self {
        self.carrying = carrying;
        self
    }

    pub fn exact(mut self) -> Self {
        self.goal = GoalRule::Exact;
        self
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable path search over the warehouse floor.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across rayon
/// worker threads during a parallel decide phase.
pub trait Pathfinder: Send + Sync {
    /// Find a path for `request`.
    ///
    /// Fixtures in `layout` are always blocked; cells in `robots` are blocked
    /// unless they hold the requester.  Returns [`GridError::NoPath`] when
    /// the goal cannot be reached this tick.
    fn find_path(
        &self,
        layout:  &WarehouseLayout,
        robots:  &RobotOccupancy,
        request: &PathRequest,
    ) -> GridResult<Path>;
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* over the 4-connected grid with unit step cost and a Manhattan
/// heuristic toward the nominal target.
///
/// Equal priorities pop in insertion order (a monotonically increasing
/// sequence number is the secondary heap key), which keeps path shapes
/// deterministic.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn find_path(
        &self,
        layout:  &WarehouseLayout,
        robots:  &RobotOccupancy,
        request: &PathRequest,
    ) -> GridResult<Path> {
        astar(layout, robots, request)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

fn astar(
    layout:  &WarehouseLayout,
    robots:  &RobotOccupancy,
    request: &PathRequest,
) -> GridResult<Path> {
    let start = request.from;
    let target = request.to;
    let mut goal = target;

    let mut came_from: PosMap<GridPos> = PosMap::default();
    let mut g_score:   PosMap<u32>     = PosMap::default();
    let mut closed:    PosSet          = PosSet::default();

    // Min-heap: (f, seq, cell).  `seq` is unique, so cells are never compared.
    let mut open: BinaryHeap<Reverse<(u32, u64, GridPos)>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    g_score.insert(start, 0);
    open.push(Reverse((start.manhattan(target), seq, start)));

    while let Some(Reverse((_, _, current))) = open.pop() {
        // Skip stale heap entries.
        if !closed.insert(current) {
            continue;
        }

        if request.goal == GoalRule::Relaxed {
            if request.carrying && layout.is_adjacent_to_shelf(current) {
                goal = current;
            }
            if layout.is_adjacent_to_charger(current) {
                goal = current;
            }
        }

        if current == goal {
            return Ok(reconstruct(&came_from, current));
        }

        let g_current = g_score.get(&current).copied().unwrap_or(u32::MAX);

        for neighbor in current.orthogonal_neighbors() {
            if !layout.in_bounds(neighbor)
                || layout.is_obstacle(neighbor)
                || robots.is_blocked_for(neighbor, request.requester)
            {
                continue;
            }

            let tentative = g_current.saturating_add(1);
            if tentative < g_score.get(&neighbor).copied().unwrap_or(u32::MAX) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                seq += 1;
                open.push(Reverse((tentative + neighbor.manhattan(target), seq, neighbor)));
            }
        }
    }

    tracing::trace!(from = %start, to = %target, "open set exhausted");
    Err(GridError::NoPath { from: start, to: target })
}

fn reconstruct(came_from: &PosMap<GridPos>, end: GridPos) -> Path {
    let mut cells = vec![end];
    let mut cur = end;
    while let Some(&prev) = came_from.get(&cur) {
        cells.push(prev);
        cur = prev;
    }
    cells.reverse();
    Path { cells }
}
