//! Id-keyed entity storage.
//!
//! All entities live in one ordered map so iteration is always in ascending
//! id order.  Ids come from a single counter shared by fixtures, robots, and
//! boxes, and are never reused.

use std::collections::BTreeMap;

use wh_core::{EntityId, WhError};

use crate::entity::{BoxItem, Charger, ConveyorBelt, Entity, EntityKind, Robot, Shelf};
use crate::{AgentError, AgentResult};

/// Generate `&T` / `&mut T` accessors that fail with `WrongKind` when the id
/// names an entity of a different kind.
macro_rules! typed_access {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self, id: EntityId) -> AgentResult<&$ty> {
            match self.entities.get(&id) {
                Some(Entity::$variant(inner)) => Ok(inner),
                Some(_) => Err(AgentError::WrongKind { id, expected: EntityKind::$variant }),
                None => Err(WhError::EntityNotFound(id).into()),
            }
        }

        pub fn $get_mut(&mut self, id: EntityId) -> AgentResult<&mut $ty> {
            match self.entities.get_mut(&id) {
                Some(Entity::$variant(inner)) => Ok(inner),
                Some(_) => Err(AgentError::WrongKind { id, expected: EntityKind::$variant }),
                None => Err(WhError::EntityNotFound(id).into()),
            }
        }
    };
}

/// Generate an ascending-id iterator over entities of one kind.
macro_rules! typed_iter {
    ($name:ident, $variant:ident, $ty:ty) => {
        pub fn $name(&self) -> impl Iterator<Item = (EntityId, &$ty)> + '_ {
            self.entities.iter().filter_map(|(&id, e)| match e {
                Entity::$variant(inner) => Some((id, inner)),
                _ => None,
            })
        }
    };
}

#[derive(Clone, Debug)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
    next_id:  EntityId,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self { entities: BTreeMap::new(), next_id: EntityId(0) }
    }

    /// Store `entity` under a fresh id.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = self.next_id;
        self.next_id = id.next();
        self.entities.insert(id, entity);
        id
    }

    /// Drop an entity from the registry entirely.
    pub fn remove(&mut self, id: EntityId) -> AgentResult<Entity> {
        self.entities
            .remove(&id)
            .ok_or_else(|| WhError::EntityNotFound(id).into())
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    #[inline]
    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(&id).map(Entity::kind)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The id the next `insert` will hand out.
    #[inline]
    pub fn peek_next_id(&self) -> EntityId {
        self.next_id
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind() == kind).count()
    }

    // ── Typed access ──────────────────────────────────────────────────────

    typed_access!(robot, robot_mut, Robot, Robot);
    typed_access!(shelf, shelf_mut, Shelf, Shelf);
    typed_access!(belt, belt_mut, ConveyorBelt, ConveyorBelt);
    typed_access!(charger, charger_mut, Charger, Charger);
    typed_access!(box_item, box_item_mut, Box, BoxItem);

    typed_iter!(robots, Robot, Robot);
    typed_iter!(shelves, Shelf, Shelf);
    typed_iter!(belts, ConveyorBelt, ConveyorBelt);
    typed_iter!(chargers, Charger, Charger);
    typed_iter!(boxes, Box, BoxItem);

    /// Robot ids in ascending order.
    pub fn robot_ids(&self) -> Vec<EntityId> {
        self.robots().map(|(id, _)| id).collect()
    }

    /// Mutable iteration over every robot, ascending id.
    pub fn robots_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Robot)> + '_ {
        self.entities.iter_mut().filter_map(|(&id, e)| match e {
            Entity::Robot(r) => Some((id, r)),
            _ => None,
        })
    }

    /// Mutable iteration over every charger, ascending id.
    pub fn chargers_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Charger)> + '_ {
        self.entities.iter_mut().filter_map(|(&id, e)| match e {
            Entity::Charger(c) => Some((id, c)),
            _ => None,
        })
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
