//! Node and edge disconnection counters (xG and alphaG)
//!
//! Each round tests the current graph by removing every element once, on
//! its own. If no single removal disconnects the graph or leaves fewer than
//! two elements, the first element is removed for good and the count goes up
//! by one. The count is returned as soon as a trial removal fails.
//!
//! This is not a minimum-cut search: combinations of elements are never
//! tried, and the permanent removal always takes position 0. Results depend
//! on the stored node and edge order.

use tracing::{debug, trace};

use super::is_connected;
use crate::graph::Graph;

/// Kind of graph element a counter strips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Node,
    Edge,
}

impl Element {
    /// Number of elements of this kind in `graph`
    pub fn count(self, graph: &Graph) -> usize {
        match self {
            Element::Node => graph.node_count(),
            Element::Edge => graph.edge_count(),
        }
    }

    /// Derived copy of `graph` with element `index` removed
    ///
    /// Removing a node also removes its incident edges.
    pub fn remove(self, graph: &Graph, index: usize) -> Graph {
        match self {
            Element::Node => graph.without_node(index),
            Element::Edge => graph.without_edge(index),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Element::Node => "node",
            Element::Edge => "edge",
        }
    }
}

/// Node-removal counter (xG)
pub fn count_node_connectivity(graph: &Graph) -> usize {
    count_connectivity(graph, Element::Node)
}

/// Edge-removal counter (alphaG)
pub fn count_edge_connectivity(graph: &Graph) -> usize {
    count_connectivity(graph, Element::Edge)
}

/// Run the disconnection counter over `element`s of `graph`
///
/// Always terminates: the working copy loses one element per round, and a
/// collection of one element fails its trial (nothing would be left). A
/// graph with no elements of the requested kind returns 1.
pub fn count_connectivity(graph: &Graph, element: Element) -> usize {
    let mut count = 1;
    let mut current = graph.clone();

    loop {
        let len = element.count(&current);
        if len == 0 {
            debug!(element = element.as_str(), count, "no elements left to strip");
            return count;
        }

        for i in 0..len {
            let derived = element.remove(&current, i);
            if element.count(&derived) < 2 || !is_connected(&derived) {
                debug!(element = element.as_str(), index = i, count, "trial removal disconnected graph");
                return count;
            }
        }

        trace!(element = element.as_str(), count, "all trial removals survived, stripping first element");
        current = element.remove(&current, 0);
        count += 1;
    }
}
