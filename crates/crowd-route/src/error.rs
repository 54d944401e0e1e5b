//! Route-subsystem error type.

use thiserror::Error;

use crowd_core::NodeId;

/// Errors produced while building route maps.  Path operations themselves
/// never fail with an error: a dead end is reported as `false` / `None`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("edge from {from} to {to} has zero length")]
    DegenerateEdge { from: NodeId, to: NodeId },

    #[error("edge from {from} to {to} has no lanes")]
    NoLanes { from: NodeId, to: NodeId },

    #[error("sidewalk polygon {index} is degenerate: {reason}")]
    DegeneratePolygon { index: usize, reason: &'static str },
}

pub type RouteResult<T> = Result<T, RouteError>;
