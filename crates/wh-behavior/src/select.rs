//! Nearest-target selection by Manhattan distance.
//!
//! Ties go to the candidate found first in iteration order, so every search
//! keeps a strictly-smaller comparison rather than using `min_by_key` (which
//! keeps the last of equal minima).

use wh_agent::World;
use wh_core::{EntityId, GridPos};
use wh_grid::WarehouseLayout;

/// First strictly-nearest item of `candidates` to `from`.
fn first_nearest<T: Copy>(
    from:       GridPos,
    candidates: impl IntoIterator<Item = (T, GridPos)>,
) -> Option<T> {
    let mut best: Option<(u32, T)> = None;
    for (item, pos) in candidates {
        let d = from.manhattan(pos);
        if best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, item));
        }
    }
    best.map(|(_, item)| item)
}

/// Nearest charger position in layout order.
pub fn nearest_charger(layout: &WarehouseLayout, from: GridPos) -> Option<GridPos> {
    first_nearest(from, layout.chargers.iter().map(|&p| (p, p)))
}

/// `true` if a shelf stands at `pos` and holds nothing.
pub fn is_free_shelf(world: &World, pos: GridPos) -> bool {
    world
        .shelf_at(pos)
        .and_then(|id| world.entities.shelf(id).ok())
        .is_some_and(|s| s.is_free())
}

/// Storage target for a box picked up at `from`.
///
/// The nearest row that still has a free shelf wins (distance measured to
/// the row's first position); within that row, the nearest free shelf.
pub fn nearest_free_shelf(world: &World, from: GridPos) -> Option<GridPos> {
    let rows = world.layout.shelf_rows.iter().filter_map(|row| {
        let head = *row.first()?;
        row.iter().any(|&p| is_free_shelf(world, p)).then_some((row, head))
    });
    let row = first_nearest(from, rows)?;
    first_nearest(
        from,
        row.iter().copied().filter(|&p| is_free_shelf(world, p)).map(|p| (p, p)),
    )
}

/// Nearest idle robot to `target`.  Equal distances go to the robot whose
/// cell comes first column-major.
pub fn nearest_idle_robot(world: &World, target: GridPos) -> Option<EntityId> {
    world
        .entities
        .robots()
        .filter(|(_, r)| r.is_idle())
        .filter_map(|(id, _)| world.position_of(id).map(|p| (target.manhattan(p), p, id)))
        .min()
        .map(|(_, _, id)| id)
}

/// Free cells orthogonally adjacent to `target` that no other robot stands
/// on, nearest to `from` first.
pub fn approach_cells(
    world:     &World,
    target:    GridPos,
    from:      GridPos,
    occupancy: &wh_grid::RobotOccupancy,
    requester: EntityId,
) -> Vec<GridPos> {
    let layout = &world.layout;
    let mut cells: Vec<GridPos> = target
        .orthogonal_neighbors()
        .filter(|&p| layout.in_bounds(p) && !layout.is_obstacle(p))
        .filter(|&p| !occupancy.is_blocked_for(p, Some(requester)))
        .collect();
    cells.sort_by_key(|&p| from.manhattan(p));
    cells
}
