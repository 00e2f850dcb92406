//! Render hints for a grid visualizer.
//!
//! A visualizer draws one [`Portrayal`] per entity per cell.  Hints are
//! derived from a [`TickSnapshot`] alone, so a client that only receives the
//! exchange schema can render it the same way.

use wh_sim::{BoxRecord, TickSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Brown,
    Gray,
    Blue,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Brown => "brown",
            Color::Gray  => "gray",
            Color::Blue  => "blue",
        }
    }
}

/// How to draw one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Portrayal {
    pub unique_id: u32,
    pub position:  [i32; 2],
    pub shape:     Shape,
    pub color:     Color,
    /// Draw order; higher layers go on top.
    pub layer:     u8,
    /// Label drawn over the shape.  Robots show their battery level.
    pub text:      Option<String>,
}

impl Portrayal {
    fn rect(unique_id: u32, position: [i32; 2], color: Color) -> Self {
        Self { unique_id, position, shape: Shape::Rect, color, layer: 0, text: None }
    }
}

/// Every entity in `snapshot`, fixtures first, then boxes, then robots.
pub fn portray(snapshot: &TickSnapshot) -> Vec<Portrayal> {
    let mut out = Vec::with_capacity(
        snapshot.shelves.len()
            + snapshot.chargers.len()
            + snapshot.conveyor_belts.len()
            + snapshot.boxes.len()
            + snapshot.robots.len(),
    );

    out.extend(snapshot.shelves.iter().map(|s| {
        let color = if s.stored_box.is_some() { Color::Brown } else { Color::Gray };
        Portrayal::rect(s.unique_id, s.position, color)
    }));
    out.extend(snapshot.chargers.iter().map(|c| Portrayal::rect(c.unique_id, c.position, Color::Blue)));
    out.extend(
        snapshot
            .conveyor_belts
            .iter()
            .map(|b| Portrayal::rect(b.unique_id, b.position, Color::Black)),
    );
    out.extend(
        snapshot
            .boxes
            .iter()
            .filter(|b| !is_held(snapshot, b))
            .map(|b| Portrayal { layer: 1, ..Portrayal::rect(b.unique_id, b.position, Color::Brown) }),
    );
    out.extend(snapshot.robots.iter().map(|r| Portrayal {
        unique_id: r.unique_id,
        position:  r.position,
        shape:     Shape::Circle,
        color:     if r.has_box { Color::Brown } else { Color::Black },
        layer:     2,
        text:      Some(format!("{:.1}", r.battery)),
    }));
    out
}

/// A box in a robot's hands shows as the robot's color, not on its own.
fn is_held(snapshot: &TickSnapshot, bx: &BoxRecord) -> bool {
    let Some(carrier) = bx.carried_by_robot else {
        return false;
    };
    snapshot
        .robots
        .iter()
        .any(|r| r.unique_id == carrier && r.has_box && r.position == bx.position)
}
