//! `GridWorld` — a fixed-size 2D grid whose cells hold any number of entities.
//!
//! The grid stores only [`EntityId`]s; what an entity *is* lives in the
//! entity registry.  Alongside the cell vectors the grid keeps a reverse
//! index (`EntityId → GridPos`) so `remove` and `move_entity` are O(cell
//! occupancy) rather than a full scan.
//!
//! Cells are stored column-major (`x` outer, `y` inner), which is also the
//! order [`GridWorld::all_cells`] yields them in.

use std::collections::HashMap;

use wh_core::{EntityId, GridPos, WhError};

use crate::{GridError, GridResult};

/// Neighborhood used by [`GridWorld::neighbors`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Connectivity {
    /// 4-connected (von Neumann): shares an edge.
    Orthogonal,
    /// 8-connected (Moore): shares an edge or a corner.
    Moore,
}

/// Multi-occupancy grid of entity ids.
#[derive(Clone, Debug)]
pub struct GridWorld {
    width:     i32,
    height:    i32,
    cells:     Vec<Vec<EntityId>>,
    positions: HashMap<EntityId, GridPos>,
}

impl GridWorld {
    /// An empty grid of `width` columns × `height` rows.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width as i32;
        let height = height as i32;
        Self {
            width,
            height,
            cells:     vec![Vec::new(); (width * height) as usize],
            positions: HashMap::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    #[inline]
    fn index(&self, pos: GridPos) -> usize {
        (pos.x * self.height + pos.y) as usize
    }

    fn checked_index(&self, pos: GridPos) -> GridResult<usize> {
        if self.in_bounds(pos) {
            Ok(self.index(pos))
        } else {
            Err(WhError::OutOfBounds(pos).into())
        }
    }

    // ── Mutation primitives ───────────────────────────────────────────────

    /// Put `entity` into the cell at `pos`.
    pub fn place(&mut self, entity: EntityId, pos: GridPos) -> GridResult<()> {
        let idx = self.checked_index(pos)?;
        if self.positions.contains_key(&entity) {
            return Err(GridError::AlreadyPlaced(entity));
        }
        self.cells[idx].push(entity);
        self.positions.insert(entity, pos);
        Ok(())
    }

    /// Take `entity` off the grid, returning the cell it occupied.
    pub fn remove(&mut self, entity: EntityId) -> GridResult<GridPos> {
        let pos = self
            .positions
            .remove(&entity)
            .ok_or(WhError::EntityNotFound(entity))?;
        let idx = self.index(pos);
        self.cells[idx].retain(|&e| e != entity);
        Ok(pos)
    }

    /// Relocate an already-placed `entity` to `pos`.
    ///
    /// The destination is validated before the entity leaves its old cell,
    /// so a failed move leaves the grid unchanged.
    pub fn move_entity(&mut self, entity: EntityId, pos: GridPos) -> GridResult<()> {
        let to = self.checked_index(pos)?;
        let from = self
            .positions
            .get(&entity)
            .copied()
            .ok_or(WhError::EntityNotFound(entity))?;
        if from == pos {
            return Ok(());
        }
        let from = self.index(from);
        self.cells[from].retain(|&e| e != entity);
        self.cells[to].push(entity);
        self.positions.insert(entity, pos);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Where `entity` currently is, or `None` if it is not on the grid.
    #[inline]
    pub fn position_of(&self, entity: EntityId) -> Option<GridPos> {
        self.positions.get(&entity).copied()
    }

    /// Entities in the cell at `pos`, in placement order.  Out-of-bounds
    /// positions have no contents.
    pub fn contents_at(&self, pos: GridPos) -> &[EntityId] {
        if self.in_bounds(pos) {
            &self.cells[self.index(pos)]
        } else {
            &[]
        }
    }

    /// In-bounds cells around `pos`, optionally including `pos` itself.
    pub fn neighbor_cells(
        &self,
        pos:            GridPos,
        connectivity:   Connectivity,
        include_center: bool,
    ) -> impl Iterator<Item = GridPos> + '_ {
        (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
            .filter(move |&(dx, dy)| match (dx, dy) {
                (0, 0) => include_center,
                _ if connectivity == Connectivity::Orthogonal => dx == 0 || dy == 0,
                _ => true,
            })
            .map(move |(dx, dy)| pos.offset(dx, dy))
            .filter(move |&p| self.in_bounds(p))
    }

    /// Every entity in the neighborhood of `pos`.
    pub fn neighbors(
        &self,
        pos:            GridPos,
        connectivity:   Connectivity,
        include_center: bool,
    ) -> impl Iterator<Item = EntityId> + '_ {
        self.neighbor_cells(pos, connectivity, include_center)
            .flat_map(move |p| self.contents_at(p).iter().copied())
    }

    /// Lazily walk every cell as `(contents, pos)`.
    pub fn all_cells(&self) -> impl Iterator<Item = (&[EntityId], GridPos)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).map(move |y| {
                let pos = GridPos::new(x, y);
                (self.contents_at(pos), pos)
            })
        })
    }

    /// Number of entities currently on the grid.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.positions.len()
    }
}
