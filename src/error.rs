//! Error types for graph mutation and rule configuration.

use crate::hypergraph::{EdgeKind, NodeHandle, NodeKind};
use thiserror::Error;

/// Violated precondition of a graph operation.
///
/// These indicate a bug in the calling code (or in a production's rewrite), never a "no match"
/// outcome, which is reported as `Ok(false)` by [`crate::production::Production::apply`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0} already exists")]
    DuplicateNode(NodeHandle),
    #[error("node {0} does not exist")]
    NodeNotFound(NodeHandle),
    #[error("edge {0} -- {1} does not exist")]
    EdgeNotFound(NodeHandle, NodeHandle),
    #[error("self loop on node {0} is not allowed")]
    SelfLoop(NodeHandle),
    #[error("{kind} hyperedge needs {expected} members, got {actual}")]
    ArityMismatch {
        kind: EdgeKind,
        expected: usize,
        actual: usize,
    },
    #[error("node {0} appears more than once among hyperedge members")]
    DuplicateMember(NodeHandle),
    #[error("expected a hyperedge edge kind, got {0}")]
    NotAHyperedgeKind(EdgeKind),
    #[error("node {handle} has kind {actual}, expected {expected}")]
    KindMismatch {
        handle: NodeHandle,
        expected: NodeKind,
        actual: NodeKind,
    },
    #[error("node {0} is not a hyperedge center")]
    NotAHyperedge(NodeHandle),
    #[error("no unique vertex between {0} and {1}")]
    NoUniqueIntermediate(NodeHandle, NodeHandle),
    #[error("cells need 4 or 5 corners, got {0}")]
    UnsupportedCellSize(usize),
    #[error("{kind} cell has {expected} sides, got a mask of length {actual}")]
    SideMaskMismatch {
        kind: EdgeKind,
        expected: usize,
        actual: usize,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;
