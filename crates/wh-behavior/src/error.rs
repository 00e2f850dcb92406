use thiserror::Error;

use wh_agent::AgentError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("belt {0} has no lane to move boxes along")]
    NoLane(wh_core::EntityId),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
