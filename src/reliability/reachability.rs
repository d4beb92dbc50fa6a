//! Reachability under a fixed edge state
//!
//! Only edges marked present in the [`EdgeState`] are inserted into the
//! adjacency structure, each traversable in both directions.

use petgraph::algo::{has_path_connecting, DfsSpace};
use petgraph::graph::{NodeIndex, UnGraph};

use super::EdgeState;
use crate::graph::{Graph, NodeId};

/// Undirected adjacency over node positions
pub type Topology = UnGraph<(), ()>;

type Space = DfsSpace<NodeIndex, <Topology as petgraph::visit::Visitable>::Map>;

/// Build the adjacency structure of `graph` keeping only present edges
pub fn build_topology(graph: &Graph, state: &EdgeState) -> Topology {
    let mut topology = Topology::with_capacity(graph.node_count(), graph.edge_count());
    for _ in 0..graph.node_count() {
        topology.add_node(());
    }
    add_present_edges(&mut topology, graph, state);
    topology
}

fn add_present_edges(topology: &mut Topology, graph: &Graph, state: &EdgeState) {
    for (i, source, target) in graph.edge_endpoints() {
        if state.is_present(i) {
            topology.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
        }
    }
}

/// Check if `source` can reach `target` when only the present edges are up
///
/// A node always reaches itself. A node that is not in the graph has no
/// adjacency, so it reaches nothing but itself.
///
/// # Example
/// ```rust
/// # use netstab::graph::{Edge, Graph, NodeId};
/// # use netstab::reliability::{is_reachable, EdgeState};
/// let graph = Graph::new(
///     vec![NodeId::from("A"), NodeId::from("B")],
///     vec![Edge::new("A", "B", 0.9)],
/// ).unwrap();
/// let up = EdgeState::all_present(1);
/// assert!(is_reachable(&graph, &up, &NodeId::from("A"), &NodeId::from("B")));
/// ```
pub fn is_reachable(graph: &Graph, state: &EdgeState, source: &NodeId, target: &NodeId) -> bool {
    if source == target {
        return true;
    }
    let (from, to) = match (graph.node_index(source), graph.node_index(target)) {
        (Some(from), Some(to)) => (from, to),
        _ => return false,
    };
    let topology = build_topology(graph, state);
    has_path_connecting(&topology, NodeIndex::new(from), NodeIndex::new(to), None)
}

/// Reusable scratch space for repeated reachability queries on one graph
///
/// Holds the adjacency structure and DFS visited-set so a worker can answer
/// many queries without reallocating. Each worker owns its own cache; nothing
/// is shared between queries except this private buffer.
///
/// # Example
/// ```rust
/// # use netstab::graph::{Edge, Graph, NodeId};
/// # use netstab::reliability::{EdgeStates, ReachabilityCache};
/// # let graph = Graph::new(
/// #     vec![NodeId::from("A"), NodeId::from("B")],
/// #     vec![Edge::new("A", "B", 0.9)],
/// # ).unwrap();
/// let mut cache = ReachabilityCache::new(&graph);
/// let connected_worlds = EdgeStates::new(graph.edge_count())
///     .unwrap()
///     .filter(|state| cache.can_reach(&graph, state, 0, 1))
///     .count();
/// assert_eq!(connected_worlds, 1);
/// ```
pub struct ReachabilityCache {
    topology: Topology,
    space: Space,
}

impl ReachabilityCache {
    /// Create a cache sized for `graph`
    pub fn new(graph: &Graph) -> Self {
        let topology = build_topology(graph, &EdgeState::from_bools(Vec::new()));
        let space = DfsSpace::new(&topology);
        Self { topology, space }
    }

    /// Check if node position `from` reaches node position `to` under `state`
    pub fn can_reach(&mut self, graph: &Graph, state: &EdgeState, from: usize, to: usize) -> bool {
        if from == to {
            return true;
        }
        if from >= self.topology.node_count() || to >= self.topology.node_count() {
            return false;
        }
        self.topology.clear_edges();
        add_present_edges(&mut self.topology, graph, state);
        has_path_connecting(
            &self.topology,
            NodeIndex::new(from),
            NodeIndex::new(to),
            Some(&mut self.space),
        )
    }
}
