//! Grid entity types.
//!
//! Every occupant of the grid is one variant of the tagged [`Entity`] enum.
//! Each variant carries only the state its kind needs; behavior dispatches by
//! matching on the tag instead of probing dynamic types.  Links between
//! entities (a robot's cargo, a shelf's stored box, a box's assigned carrier)
//! are [`EntityId`]s resolved through the registry.

use wh_core::{EntityId, GridPos};

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// The tag of an [`Entity`], used for filtering and error reporting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    EmptyCell,
    Shelf,
    ConveyorBelt,
    Charger,
    Box,
    Robot,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entity {
    EmptyCell,
    Shelf(Shelf),
    ConveyorBelt(ConveyorBelt),
    Charger(Charger),
    Box(BoxItem),
    Robot(Robot),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::EmptyCell       => EntityKind::EmptyCell,
            Entity::Shelf(_)        => EntityKind::Shelf,
            Entity::ConveyorBelt(_) => EntityKind::ConveyorBelt,
            Entity::Charger(_)      => EntityKind::Charger,
            Entity::Box(_)          => EntityKind::Box,
            Entity::Robot(_)        => EntityKind::Robot,
        }
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// A storage slot that holds at most one box.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shelf {
    /// Set while a box is stored here; that box is then off the grid.
    pub stored_box: Option<EntityId>,
}

impl Shelf {
    pub const CAPACITY: usize = 1;

    #[inline]
    pub fn is_free(&self) -> bool {
        self.stored_box.is_none()
    }
}

/// One belt segment.  Only the active (spawn) segment is scheduled; the rest
/// are walls of the transport corridor.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConveyorBelt {
    pub active:    bool,
    /// The box currently riding the lane.
    pub cargo:     Option<EntityId>,
    /// Transit ticks left before the riding box reaches the spawn belt.
    pub remaining: u8,
}

impl ConveyorBelt {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cargo.is_none()
    }
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Charger {
    /// Observational: a robot charged here during the last tick.
    pub is_occupied: bool,
}

// ── Box ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxItem {
    /// Random integer in `[0, 10)`.
    pub weight:  u8,
    /// Robot assigned to fetch (or carrying) this box.
    pub carrier: Option<EntityId>,
}

/// Where a box is right now.  Derived by lookup, never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoxLocation {
    OnBelt(GridPos),
    CarriedBy(EntityId),
    StoredIn(EntityId),
}

// ── Robot ─────────────────────────────────────────────────────────────────────

/// Destination and route cursor of a robot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Navigation {
    pub destination: Option<GridPos>,
    /// Cells from the robot's position (at planning time) to the goal.
    pub route:       Vec<GridPos>,
    /// Index of the next route cell to step onto; `<= route.len()`.
    pub route_index: usize,
}

impl Navigation {
    #[inline]
    pub fn has_route(&self) -> bool {
        !self.route.is_empty()
    }

    /// Last cell of the current route.
    #[inline]
    pub fn route_end(&self) -> Option<GridPos> {
        self.route.last().copied()
    }

    /// Install a freshly planned route.  The first cell is the robot's own,
    /// so the cursor starts on the second.
    pub fn set_route(&mut self, route: Vec<GridPos>) {
        self.route_index = 1.min(route.len());
        self.route = route;
    }

    /// Drop the route but keep the destination; it is replanned next tick.
    pub fn clear_route(&mut self) {
        self.route.clear();
        self.route_index = 0;
    }

    /// Forget destination and route.
    pub fn clear(&mut self) {
        self.destination = None;
        self.clear_route();
    }

    /// Pop the next route cell, advancing the cursor.
    pub fn advance(&mut self) -> Option<GridPos> {
        let next = self.route.get(self.route_index).copied()?;
        self.route_index += 1;
        Some(next)
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Robot {
    pub nav:      Navigation,
    /// Charge level in `[0, 100]`.
    pub battery:  f32,
    /// The box being carried.
    pub cargo:    Option<EntityId>,
    /// Cell chosen during the decide phase, applied during commit.
    pub next_pos: Option<GridPos>,
    /// Set while stalled at the pickup point waiting for the belt.
    pub waiting:  bool,
    /// Committed moves so far.
    pub moves:    u32,
}

impl Robot {
    pub const BATTERY_MAX:     f32 = 100.0;
    pub const BATTERY_INITIAL: f32 = 50.0;
    /// At or below this level an empty-handed robot heads for a charger.
    pub const BATTERY_LOW:     f32 = 25.0;
    pub const MOVE_COST:       f32 = 0.5;
    pub const CHARGE_RATE:     f32 = 20.0;

    pub fn new() -> Self {
        Self::with_battery(Self::BATTERY_INITIAL)
    }

    pub fn with_battery(battery: f32) -> Self {
        Self {
            nav:      Navigation::default(),
            battery:  battery.clamp(0.0, Self::BATTERY_MAX),
            cargo:    None,
            next_pos: None,
            waiting:  false,
            moves:    0,
        }
    }

    #[inline]
    pub fn is_carrying(&self) -> bool {
        self.cargo.is_some()
    }

    #[inline]
    pub fn is_low_battery(&self) -> bool {
        self.battery <= Self::BATTERY_LOW
    }

    /// Free to be assigned a box: charged enough, no destination, empty-handed.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.battery > Self::BATTERY_LOW && self.nav.destination.is_none() && self.cargo.is_none()
    }

    /// Deduct the cost of one committed move.
    pub fn spend_move(&mut self) {
        self.battery = (self.battery - Self::MOVE_COST).max(0.0);
        self.moves += 1;
    }

    /// Add one tick of charge.  Returns `true` once the battery is full.
    pub fn charge(&mut self) -> bool {
        self.battery = (self.battery + Self::CHARGE_RATE).min(Self::BATTERY_MAX);
        self.battery >= Self::BATTERY_MAX
    }
}

impl Default for Robot {
    fn default() -> Self {
        Self::new()
    }
}
