//! Entity-layer error type.

use thiserror::Error;

use wh_core::{EntityId, GridPos, WhError};
use wh_grid::GridError;

use crate::EntityKind;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("entity {id} is not a {expected:?}")]
    WrongKind { id: EntityId, expected: EntityKind },

    #[error("shelf {0} already holds a box")]
    ShelfFull(EntityId),

    #[error("robot {0} is not carrying a box")]
    NotCarrying(EntityId),

    #[error("cannot place {requested} robots: only {available} free cells")]
    InsufficientSpace { requested: usize, available: usize },

    #[error("robot cannot start at {0}: out of bounds, on a fixture, or taken")]
    InvalidPlacement(GridPos),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Core(#[from] WhError),
}

pub type AgentResult<T> = Result<T, AgentError>;
