//! Plain data row types written by output backends.

/// One robot at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotSnapshotRow {
    pub tick:     u64,
    pub robot_id: u32,
    pub x:        i32,
    pub y:        i32,
    pub has_box:  bool,
    pub battery:  f32,
}

/// Counters for one simulation tick.  Box counts are running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:            u64,
    pub boxes_spawned:   u64,
    pub boxes_stored:    u64,
    pub robots_charging: u32,
}
