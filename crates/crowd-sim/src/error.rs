use crowd_core::{AgentKind, CrowdError};
use crowd_rvo::RvoError;
use crowd_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CrowdError),

    #[error("no {0} route map supplied, or the map is empty")]
    EmptyMap(AgentKind),

    #[error("world offers no {0} blueprints")]
    NoBlueprints(AgentKind),

    #[error("solver has {got} slots, slot table expects {expected}")]
    SlotCountMismatch { expected: usize, got: usize },

    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("solver error: {0}")]
    Solver(#[from] RvoError),
}

pub type SimResult<T> = Result<T, SimError>;
