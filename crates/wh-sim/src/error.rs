use thiserror::Error;

use wh_agent::AgentError;
use wh_behavior::BehaviorError;
use wh_core::SimulationId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("cannot place {requested} robots: only {available} free cells")]
    InsufficientSpace { requested: usize, available: usize },

    #[error("no simulation with id {0}")]
    NotFound(SimulationId),

    #[error("entity error: {0}")]
    Agent(#[from] AgentError),

    #[error("decide phase error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
