// Netstab: structural reliability for unreliable networks
//
// Pairwise connection probabilities by exhaustive edge-state enumeration,
// full-graph connectivity, and node/edge disconnection counters.

pub mod cli;
pub mod connectivity;
pub mod error;
pub mod graph;
pub mod output;
pub mod reliability;
pub mod report;

pub use connectivity::{count_edge_connectivity, count_node_connectivity, is_connected};
pub use error::{ErrorKind, GraphError, Result};
pub use graph::{Edge, Graph, GraphInput, NodeId, SearchFilter};
pub use reliability::{compute_reliability, PairReliability, ReliabilityLimits};
pub use report::{analyze, StabilityReport};
