//! Grid-subsystem error type.

use thiserror::Error;

use wh_core::{EntityId, GridPos, WhError};

/// Errors produced by `wh-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    /// The open set was exhausted before the (possibly relaxed) goal was
    /// reached.  Expected during normal operation; callers retry later.
    #[error("no path from {from} to {to}")]
    NoPath { from: GridPos, to: GridPos },

    #[error("entity {0} is already placed on the grid")]
    AlreadyPlaced(EntityId),

    #[error(transparent)]
    Core(#[from] WhError),
}

pub type GridResult<T> = Result<T, GridError>;
