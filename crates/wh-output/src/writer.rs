//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, RobotSnapshotRow, TickSummaryRow};

/// A sink for per-tick simulation output.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when the writer is driven by an observer.
pub trait OutputWriter {
    /// Write the state of every robot at one tick.
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.  Safe to call more than
    /// once.
    fn finish(&mut self) -> OutputResult<()>;
}
