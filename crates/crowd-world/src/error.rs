use std::time::Duration;

use crowd_core::ActorId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("world did not acknowledge the tick within {0:?}")]
    TickTimeout(Duration),

    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("world connection lost: {0}")]
    Disconnected(String),
}

pub type WorldResult<T> = Result<T, WorldError>;
