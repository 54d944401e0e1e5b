//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CrowdError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::ActorId;

/// The top-level error type for `crowd-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CrowdError {
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `crowd-*` crates.
pub type CrowdResult<T> = Result<T, CrowdError>;
