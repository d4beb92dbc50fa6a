//! Error types for graph validation and reliability analysis.
//!
//! Every failure is a local validation failure detected before any
//! exponential work starts. Nothing here is retried.

use std::fmt;

use thiserror::Error;

use crate::graph::NodeId;

/// Failure raised while building a graph or starting an analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The node collection (or a filtered view of it) is empty.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// The same node identifier appears twice in the node collection.
    #[error("node {node} is listed more than once")]
    DuplicateNode {
        /// Repeated identifier.
        node: NodeId,
    },

    /// An edge refers to a node that is not in the graph.
    #[error("edge {edge} references unknown node {node}")]
    UnknownNode {
        /// Position of the offending edge.
        edge: usize,
        /// Identifier that could not be resolved.
        node: NodeId,
    },

    /// A search filter names a node that is not in the graph.
    #[error("filter entry {entry} names unknown node {node}")]
    UnknownFilterNode {
        /// Position of the offending entry in the node filter.
        entry: usize,
        /// Identifier that could not be resolved.
        node: NodeId,
    },

    /// An edge success probability is NaN or outside `[0, 1]`.
    #[error("edge {edge} has success probability {value}, expected a value in [0, 1]")]
    ProbabilityOutOfRange {
        /// Position of the offending edge.
        edge: usize,
        /// Rejected probability.
        value: f64,
    },

    /// Exhaustive enumeration would exceed the configured edge bound.
    #[error("{edges} edges exceed the enumeration limit of {max_edges} (2^{edges} edge states)")]
    ComputationTooLarge {
        /// Edge count of the graph.
        edges: usize,
        /// Configured bound.
        max_edges: usize,
    },
}

/// Coarse error taxonomy exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidGraph,
    ProbabilityOutOfRange,
    ComputationTooLarge,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidGraph => "InvalidGraph",
            ErrorKind::ProbabilityOutOfRange => "ProbabilityOutOfRange",
            ErrorKind::ComputationTooLarge => "ComputationTooLarge",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GraphError {
    /// Taxonomy bucket for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::EmptyGraph
            | GraphError::DuplicateNode { .. }
            | GraphError::UnknownNode { .. }
            | GraphError::UnknownFilterNode { .. } => ErrorKind::InvalidGraph,
            GraphError::ProbabilityOutOfRange { .. } => ErrorKind::ProbabilityOutOfRange,
            GraphError::ComputationTooLarge { .. } => ErrorKind::ComputationTooLarge,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::EmptyGraph => "GRAPH_EMPTY",
            GraphError::DuplicateNode { .. } => "GRAPH_DUPLICATE_NODE",
            GraphError::UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
            GraphError::UnknownFilterNode { .. } => "FILTER_UNKNOWN_NODE",
            GraphError::ProbabilityOutOfRange { .. } => "EDGE_PROBABILITY_OUT_OF_RANGE",
            GraphError::ComputationTooLarge { .. } => "COMPUTATION_TOO_LARGE",
        }
    }
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, GraphError>;
