//! `World` — the grid, the entity registry, and the floor plan together.
//!
//! The grid answers "what is at this cell", the registry answers "what is
//! this entity".  Every mutation that touches both goes through a method
//! here so the two never disagree.

use wh_core::{EntityId, GridPos, WhError};
use wh_grid::{GridWorld, RobotOccupancy, WarehouseLayout};

use crate::entity::{BoxItem, BoxLocation, Entity, EntityKind};
use crate::{AgentError, AgentResult, EntityRegistry};

#[derive(Clone, Debug)]
pub struct World {
    pub grid:     GridWorld,
    pub entities: EntityRegistry,
    pub layout:   WarehouseLayout,
}

impl World {
    /// An empty grid sized to `layout`.  Fixtures are placed by the builder.
    pub fn new(layout: WarehouseLayout) -> Self {
        Self {
            grid:     GridWorld::new(layout.width, layout.height),
            entities: EntityRegistry::new(),
            layout,
        }
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Register `entity` and put it on the grid at `pos`.
    pub fn spawn(&mut self, entity: Entity, pos: GridPos) -> AgentResult<EntityId> {
        if !self.grid.in_bounds(pos) {
            return Err(WhError::OutOfBounds(pos).into());
        }
        let id = self.entities.insert(entity);
        self.grid.place(id, pos)?;
        Ok(id)
    }

    /// Take `id` off the grid.  The entity stays in the registry.
    pub fn lift(&mut self, id: EntityId) -> AgentResult<GridPos> {
        Ok(self.grid.remove(id)?)
    }

    /// Move a robot.  Only robots ever change cells.
    pub fn move_robot(&mut self, robot: EntityId, to: GridPos) -> AgentResult<()> {
        self.entities.robot(robot)?;
        self.grid.move_entity(robot, to)?;
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn position_of(&self, id: EntityId) -> Option<GridPos> {
        self.grid.position_of(id)
    }

    /// Position of a robot, which is always on the grid.
    pub fn robot_pos(&self, robot: EntityId) -> AgentResult<GridPos> {
        self.grid
            .position_of(robot)
            .ok_or_else(|| WhError::EntityNotFound(robot).into())
    }

    /// First entity of `kind` in the cell at `pos`.
    pub fn entity_at(&self, pos: GridPos, kind: EntityKind) -> Option<EntityId> {
        self.grid
            .contents_at(pos)
            .iter()
            .copied()
            .find(|&id| self.entities.kind_of(id) == Some(kind))
    }

    #[inline]
    pub fn shelf_at(&self, pos: GridPos) -> Option<EntityId> {
        self.entity_at(pos, EntityKind::Shelf)
    }

    #[inline]
    pub fn belt_at(&self, pos: GridPos) -> Option<EntityId> {
        self.entity_at(pos, EntityKind::ConveyorBelt)
    }

    #[inline]
    pub fn charger_at(&self, pos: GridPos) -> Option<EntityId> {
        self.entity_at(pos, EntityKind::Charger)
    }

    #[inline]
    pub fn box_at(&self, pos: GridPos) -> Option<EntityId> {
        self.entity_at(pos, EntityKind::Box)
    }

    #[inline]
    pub fn robot_at(&self, pos: GridPos) -> Option<EntityId> {
        self.entity_at(pos, EntityKind::Robot)
    }

    /// The belt that drives spawning.
    pub fn active_belt(&self) -> Option<EntityId> {
        self.entities.belts().find(|(_, b)| b.active).map(|(id, _)| id)
    }

    /// `(id, position)` of every robot, ascending id.
    pub fn robot_positions(&self) -> Vec<(EntityId, GridPos)> {
        self.entities
            .robots()
            .filter_map(|(id, _)| self.grid.position_of(id).map(|p| (id, p)))
            .collect()
    }

    /// Index of the current robot positions.
    pub fn occupancy(&self) -> RobotOccupancy {
        RobotOccupancy::build(self.robot_positions())
    }

    /// Resolve where box `id` is.  `None` means it is in none of the three
    /// places a box may be.
    pub fn locate_box(&self, id: EntityId) -> Option<BoxLocation> {
        if let Some(pos) = self.grid.position_of(id) {
            return Some(BoxLocation::OnBelt(pos));
        }
        if let Some((robot, _)) = self.entities.robots().find(|(_, r)| r.cargo == Some(id)) {
            return Some(BoxLocation::CarriedBy(robot));
        }
        self.entities
            .shelves()
            .find(|(_, s)| s.stored_box == Some(id))
            .map(|(shelf, _)| BoxLocation::StoredIn(shelf))
    }

    /// Every box with its resolved location, ascending id.
    pub fn box_locations(&self) -> Vec<(EntityId, Option<BoxLocation>)> {
        self.entities
            .boxes()
            .map(|(id, _)| (id, self.locate_box(id)))
            .collect()
    }

    // ── Box hand-over ─────────────────────────────────────────────────────

    /// Put a new box on the grid at `pos` and load it onto `belt`.
    pub fn load_belt(
        &mut self,
        belt:      EntityId,
        pos:       GridPos,
        weight:    u8,
        carrier:   Option<EntityId>,
        remaining: u8,
    ) -> AgentResult<EntityId> {
        let bx = self.spawn(Entity::Box(BoxItem { weight, carrier }), pos)?;
        let belt = self.entities.belt_mut(belt)?;
        belt.cargo = Some(bx);
        belt.remaining = remaining;
        Ok(bx)
    }

    /// Shift the riding box one lane cell to `to` and tick the countdown.
    pub fn advance_belt(&mut self, belt: EntityId, to: GridPos) -> AgentResult<()> {
        let entry = self.entities.belt_mut(belt)?;
        let Some(bx) = entry.cargo else {
            return Ok(());
        };
        entry.remaining = entry.remaining.saturating_sub(1);
        self.grid.move_entity(bx, to)?;
        Ok(())
    }

    /// Move the box from the belt into the robot's hands.  The box leaves the
    /// grid and the belt becomes empty.  All three ids are checked before
    /// anything changes.
    pub fn pick_up(&mut self, robot: EntityId, bx: EntityId, belt: EntityId) -> AgentResult<()> {
        self.entities.robot(robot)?;
        self.entities.box_item(bx)?;
        self.entities.belt(belt)?;
        self.lift(bx)?;
        self.entities.belt_mut(belt)?.cargo = None;
        self.entities.box_item_mut(bx)?.carrier = Some(robot);
        self.entities.robot_mut(robot)?.cargo = Some(bx);
        Ok(())
    }

    /// Move the robot's box into `shelf`.  Fails without changing anything
    /// when the shelf is already full.
    pub fn drop_off(&mut self, robot: EntityId, shelf: EntityId) -> AgentResult<EntityId> {
        if !self.entities.shelf(shelf)?.is_free() {
            return Err(AgentError::ShelfFull(shelf));
        }
        let bx = self
            .entities
            .robot_mut(robot)?
            .cargo
            .take()
            .ok_or(AgentError::NotCarrying(robot))?;
        self.entities.shelf_mut(shelf)?.stored_box = Some(bx);
        self.entities.box_item_mut(bx)?.carrier = None;
        Ok(bx)
    }
}
