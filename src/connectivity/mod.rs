//! Full-graph connectivity and the node/edge disconnection counters

pub mod counters;

pub use counters::{count_connectivity, count_edge_connectivity, count_node_connectivity, Element};

use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;

use crate::graph::Graph;
use crate::reliability::{build_topology, EdgeState};

/// Check if every node is reachable from the first node with all edges up
///
/// Fails closed: a graph with no nodes or no edges is reported as not
/// connected, including a lone node. Otherwise the sweep is rooted at the
/// first node in stored order.
pub fn is_connected(graph: &Graph) -> bool {
    if graph.node_count() < 1 || graph.edge_count() < 1 {
        return false;
    }

    let topology = build_topology(graph, &EdgeState::all_present(graph.edge_count()));
    let root = NodeIndex::new(0);

    let mut dfs = Dfs::new(&topology, root);
    let mut visited = 0;
    while dfs.next(&topology).is_some() {
        visited += 1;
    }

    visited == graph.node_count()
}
