//! The fixed warehouse floor plan.
//!
//! ```text
//!   y\x 0 1 2 3 4 5 6 7 8 9 10 11 12 13
//!    0  . . S S S S S . . .  .  .  .  C
//!    1  . . . . . . . . . .  .  .  .  C      S  shelf
//!    2  . . . . . . . . . .  .  .  .  C      C  charger
//!    3  . . S S S S S . . .  .  .  .  C      B  conveyor belt
//!    4  . . S S S S S . . .  .  .  .  C      P  pickup point
//!    5  . . . . . . . . . .  .  .  .  .
//!    6  . . . . . . . . . .  .  P  B  B
//!    7  . . . . . . . . . .  .  .  .  B
//!    8  . . S S S S S . . .  .  .  .  B
//!    9  . . S S S S S . . .  .  .  .  B
//!   10  . . . . . . . . . .  .  .  .  B
//!   11  . . . . . . . . . .  .  .  .  B
//!   12  . . S S S S S . . .  .  .  .  B
//! ```
//!
//! Boxes enter the belt at (13, 12), ride the corridor north to (13, 6), and
//! on their last transit tick step west onto the spawn belt at (12, 6), which
//! touches the pickup point (11, 6).

use std::collections::HashSet;

use wh_core::GridPos;

/// Static geometry of one warehouse: where shelves, belts, and chargers
/// stand, where robots pick boxes up, and which rows act as through lanes
/// for collision redirects.
#[derive(Clone, Debug)]
pub struct WarehouseLayout {
    pub width:  u32,
    pub height: u32,

    /// Shelf positions grouped into rows.  Nearest-row search measures the
    /// distance to each row's first position.
    pub shelf_rows: Vec<Vec<GridPos>>,

    /// Every belt cell.  The first entry is the active spawn belt.
    pub belt_cells: Vec<GridPos>,

    /// Cells a box visits from entry to hand-off, in order.  The last cell
    /// is the spawn belt, orthogonally adjacent to `pickup_point`.
    pub belt_lane: Vec<GridPos>,

    pub chargers: Vec<GridPos>,

    /// The only cell from which a robot can take a box off the belt.
    pub pickup_point: GridPos,

    /// Rows whose robots are redirected "forward" (y + 1) when yielding in a
    /// head-on conflict; robots on any other row yield backward (y - 1).
    pub through_lanes: Vec<i32>,

    shelf_set:   HashSet<GridPos>,
    charger_set: HashSet<GridPos>,
    belt_set:    HashSet<GridPos>,
}

impl WarehouseLayout {
    /// The standard 14×13 warehouse.
    pub fn standard() -> Self {
        let shelf_rows = [0, 3, 4, 8, 9, 12]
            .into_iter()
            .map(|y| (2..7).map(|x| GridPos::new(x, y)).collect())
            .collect();

        let spawn = GridPos::new(12, 6);
        let corridor: Vec<GridPos> = (6..13).map(|y| GridPos::new(13, y)).collect();

        let mut belt_cells = vec![spawn];
        belt_cells.extend(corridor.iter().copied());

        let mut belt_lane: Vec<GridPos> = corridor.iter().rev().copied().collect();
        belt_lane.push(spawn);

        Self::new(
            14,
            13,
            shelf_rows,
            belt_cells,
            belt_lane,
            (0..5).map(|y| GridPos::new(13, y)).collect(),
            GridPos::new(11, 6),
            vec![1, 5, 10],
        )
    }

    /// A floor with no fixtures at all.  Handy for pathfinding in isolation.
    pub fn open(width: u32, height: u32) -> Self {
        Self::new(width, height, vec![], vec![], vec![], vec![], GridPos::new(0, 0), vec![])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width:         u32,
        height:        u32,
        shelf_rows:    Vec<Vec<GridPos>>,
        belt_cells:    Vec<GridPos>,
        belt_lane:     Vec<GridPos>,
        chargers:      Vec<GridPos>,
        pickup_point:  GridPos,
        through_lanes: Vec<i32>,
    ) -> Self {
        let shelf_set = shelf_rows.iter().flatten().copied().collect();
        let charger_set = chargers.iter().copied().collect();
        let belt_set = belt_cells.iter().copied().collect();
        Self {
            width,
            height,
            shelf_rows,
            belt_cells,
            belt_lane,
            chargers,
            pickup_point,
            through_lanes,
            shelf_set,
            charger_set,
            belt_set,
        }
    }

    // ── Cell classification ───────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        (0..self.width as i32).contains(&pos.x) && (0..self.height as i32).contains(&pos.y)
    }

    #[inline]
    pub fn is_shelf(&self, pos: GridPos) -> bool {
        self.shelf_set.contains(&pos)
    }

    #[inline]
    pub fn is_charger(&self, pos: GridPos) -> bool {
        self.charger_set.contains(&pos)
    }

    #[inline]
    pub fn is_belt(&self, pos: GridPos) -> bool {
        self.belt_set.contains(&pos)
    }

    /// Shelves, chargers, and belt cells are never walkable.
    #[inline]
    pub fn is_obstacle(&self, pos: GridPos) -> bool {
        self.is_shelf(pos) || self.is_charger(pos) || self.is_belt(pos)
    }

    /// `true` if some shelf is at Manhattan distance exactly 1.
    pub fn is_adjacent_to_shelf(&self, pos: GridPos) -> bool {
        pos.orthogonal_neighbors().any(|p| self.is_shelf(p))
    }

    /// `true` if some charger is at Manhattan distance exactly 1.
    pub fn is_adjacent_to_charger(&self, pos: GridPos) -> bool {
        pos.orthogonal_neighbors().any(|p| self.is_charger(p))
    }

    // ── Derived geometry ──────────────────────────────────────────────────

    /// All shelf positions in row order.
    pub fn shelves(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.shelf_rows.iter().flatten().copied()
    }

    /// The active belt that drives spawning, if the layout has a belt at all.
    pub fn belt_spawn(&self) -> Option<GridPos> {
        self.belt_lane.last().copied()
    }

    /// Ticks a spawned box spends in transit before it reaches the spawn belt.
    pub fn belt_transit_ticks(&self) -> u8 {
        self.belt_lane.len().saturating_sub(1) as u8
    }

    /// Number of cells not taken by a fixture.
    pub fn free_cell_count(&self) -> usize {
        let total = (self.width * self.height) as usize;
        total - self.shelf_set.len() - self.charger_set.len() - self.belt_set.len()
    }

    /// Cells not taken by a fixture, column-major.
    pub fn free_cells(&self) -> Vec<GridPos> {
        (0..self.width as i32)
            .flat_map(|x| (0..self.height as i32).map(move |y| GridPos::new(x, y)))
            .filter(|&p| !self.is_obstacle(p))
            .collect()
    }
}

impl Default for WarehouseLayout {
    fn default() -> Self {
        Self::standard()
    }
}
