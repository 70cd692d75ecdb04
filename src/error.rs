//! Error types for graph construction and route queries.

use crate::waypoint::NodeId;
use thiserror::Error;

/// Failures reported while building a passage graph or routing over it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// Two input records share a passage and order, so they would collapse
    /// into a single node id.
    #[error("duplicate waypoint {0}")]
    DuplicateWaypoint(NodeId),

    /// A passage that must link to its neighbour has no intersection
    /// waypoint, leaving the facility disconnected at that seam.
    #[error("passage {0} has no intersection waypoint")]
    MissingIntersection(u32),

    /// The id does not name a node of this graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Start and end lie on different connected components.
    #[error("no path from {start} to {end}")]
    NoPath { start: NodeId, end: NodeId },

    /// The graph has no nodes to query.
    #[error("graph has no nodes")]
    EmptyGraph,
}

pub type Result<T> = std::result::Result<T, RoutingError>;
