//! Per-tick state snapshots in the exchange schema.
//!
//! Serialized, a snapshot is a JSON object with five lists:
//!
//! ```json
//! {
//!   "Robots":        [{"unique_id": 191, "position": [3, 7], "has_box": false, "battery": 49.5, "moves": 1}],
//!   "ConveyorBelts": [{"unique_id": 30, "position": [12, 6], "has_box": true}],
//!   "Shelves":       [{"unique_id": 0, "position": [2, 0], "stored_box": null}],
//!   "Boxes":         [{"unique_id": 196, "position": [13, 9], "weight": 4, "carried_by_robot": 191}],
//!   "Chargers":      [{"unique_id": 38, "position": [13, 0], "is_occupied": false}]
//! }
//! ```
//!
//! Boxes on the grid are listed in cell order, followed by carried boxes at
//! their carrier's position.  Stored boxes are not listed.

use serde::{Deserialize, Serialize};

use wh_agent::World;
use wh_core::{GridPos, Tick};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TickSnapshot {
    /// Tick the snapshot was taken at.  Not part of the wire format.
    #[serde(skip)]
    pub tick:           Tick,
    pub robots:         Vec<RobotRecord>,
    pub conveyor_belts: Vec<BeltRecord>,
    pub shelves:        Vec<ShelfRecord>,
    pub boxes:          Vec<BoxRecord>,
    pub chargers:       Vec<ChargerRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotRecord {
    pub unique_id: u32,
    pub position:  [i32; 2],
    pub has_box:   bool,
    pub battery:   f32,
    pub moves:     u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeltRecord {
    pub unique_id: u32,
    pub position:  [i32; 2],
    pub has_box:   bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfRecord {
    pub unique_id:  u32,
    pub position:   [i32; 2],
    pub stored_box: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub unique_id:        u32,
    pub position:         [i32; 2],
    pub weight:           u8,
    pub carried_by_robot: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargerRecord {
    pub unique_id:   u32,
    pub position:    [i32; 2],
    pub is_occupied: bool,
}

impl TickSnapshot {
    /// Read the whole world into a snapshot.
    pub fn capture(tick: Tick, world: &World) -> Self {
        let e = &world.entities;
        let at = |id| world.position_of(id).map(GridPos::as_array).unwrap_or([-1, -1]);

        let robots = e
            .robots()
            .map(|(id, r)| RobotRecord {
                unique_id: id.0,
                position:  at(id),
                has_box:   r.is_carrying(),
                battery:   r.battery,
                moves:     r.moves,
            })
            .collect();

        let conveyor_belts = e
            .belts()
            .filter(|(_, b)| b.active)
            .map(|(id, b)| BeltRecord { unique_id: id.0, position: at(id), has_box: !b.is_empty() })
            .collect();

        let shelves = e
            .shelves()
            .map(|(id, s)| ShelfRecord {
                unique_id:  id.0,
                position:   at(id),
                stored_box: s.stored_box.map(|b| b.0),
            })
            .collect();

        let mut boxes: Vec<BoxRecord> = world
            .grid
            .all_cells()
            .flat_map(|(contents, pos)| contents.iter().map(move |&id| (id, pos)))
            .filter_map(|(id, pos)| {
                let bx = e.box_item(id).ok()?;
                Some(BoxRecord {
                    unique_id:        id.0,
                    position:         pos.as_array(),
                    weight:           bx.weight,
                    carried_by_robot: bx.carrier.map(|r| r.0),
                })
            })
            .collect();
        boxes.extend(e.robots().filter_map(|(rid, r)| {
            let bid = r.cargo?;
            let bx = e.box_item(bid).ok()?;
            Some(BoxRecord {
                unique_id:        bid.0,
                position:         at(rid),
                weight:           bx.weight,
                carried_by_robot: Some(rid.0),
            })
        }));

        let chargers = e
            .chargers()
            .map(|(id, c)| ChargerRecord { unique_id: id.0, position: at(id), is_occupied: c.is_occupied })
            .collect();

        Self { tick, robots, conveyor_belts, shelves, boxes, chargers }
    }

    /// Number of boxes currently riding the belt or being carried.
    pub fn boxes_in_flight(&self) -> usize {
        self.boxes.len()
    }
}
