//! Per-tick index of robot positions.
//!
//! Built once at the start of a tick from the committed robot positions and
//! shared read-only by every robot's decide step, so no robot ever observes
//! another robot's in-progress move.

use wh_core::{EntityId, GridPos};

#[cfg(feature = "fx-hash")]
pub type PosMap<V> = rustc_hash::FxHashMap<GridPos, V>;
#[cfg(not(feature = "fx-hash"))]
pub type PosMap<V> = std::collections::HashMap<GridPos, V>;

#[cfg(feature = "fx-hash")]
pub type PosSet = rustc_hash::FxHashSet<GridPos>;
#[cfg(not(feature = "fx-hash"))]
pub type PosSet = std::collections::HashSet<GridPos>;

/// `GridPos → robot` map of the committed robot positions.
#[derive(Clone, Debug, Default)]
pub struct RobotOccupancy {
    by_pos: PosMap<EntityId>,
}

impl RobotOccupancy {
    /// Index `robots` given as `(id, position)` pairs.
    pub fn build(robots: impl IntoIterator<Item = (EntityId, GridPos)>) -> Self {
        let mut by_pos = PosMap::default();
        for (id, pos) in robots {
            by_pos.insert(pos, id);
        }
        Self { by_pos }
    }

    #[inline]
    pub fn robot_at(&self, pos: GridPos) -> Option<EntityId> {
        self.by_pos.get(&pos).copied()
    }

    /// `true` if a robot other than `requester` stands at `pos`.
    #[inline]
    pub fn is_blocked_for(&self, pos: GridPos, requester: Option<EntityId>) -> bool {
        match self.robot_at(pos) {
            Some(other) => Some(other) != requester,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.by_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pos.is_empty()
    }
}
