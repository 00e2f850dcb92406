//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `WhError` as one variant
//! via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

use crate::{EntityId, GridPos};

/// The top-level error type for `wh-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WhError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("position {0} is outside the grid")]
    OutOfBounds(GridPos),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `wh-*` crates.
pub type WhResult<T> = Result<T, WhError>;
