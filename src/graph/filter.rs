//! Restricted views of a stored graph
//!
//! Callers may ask for a computation over part of a graph rather than the
//! whole. The filter only selects; it never reorders nodes or edges.

use serde::{Deserialize, Serialize};

use super::{Graph, NodeId};
use crate::error::{GraphError, Result};

/// Partial node/edge subset to compute over
///
/// `None` on either side means "keep everything".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    pub nodes: Option<Vec<NodeId>>,
    /// Edges to keep, by endpoints (direction ignored)
    #[serde(default)]
    pub edges: Option<Vec<(NodeId, NodeId)>>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(mut self, nodes: Vec<NodeId>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    pub fn with_edges(mut self, edges: Vec<(NodeId, NodeId)>) -> Self {
        self.edges = Some(edges);
        self
    }

    /// True if the filter selects the whole graph
    pub fn is_empty(&self) -> bool {
        self.nodes.is_none() && self.edges.is_none()
    }

    /// Apply the filter, producing a new validated graph
    ///
    /// Filter ids are matched with [`Graph::resolve`], so `1` selects a node
    /// stored as either the integer or the string. Unknown node ids are an
    /// error; edge entries naming unknown nodes match nothing, and edges whose
    /// endpoints fall outside the kept nodes are dropped silently.
    pub fn apply(&self, graph: &Graph) -> Result<Graph> {
        if self.is_empty() {
            return Ok(graph.clone());
        }

        let keep = match &self.nodes {
            Some(wanted) => {
                let mut keep = vec![false; graph.node_count()];
                for (entry, node) in wanted.iter().enumerate() {
                    let index = graph.resolve(node).ok_or_else(|| GraphError::UnknownFilterNode {
                        entry,
                        node: node.clone(),
                    })?;
                    keep[index] = true;
                }
                keep
            }
            None => vec![true; graph.node_count()],
        };

        let nodes: Vec<NodeId> = graph
            .nodes()
            .iter()
            .zip(&keep)
            .filter(|(_, kept)| **kept)
            .map(|(node, _)| node.clone())
            .collect();
        if nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let wanted_edges: Option<Vec<(&NodeId, &NodeId)>> = self.edges.as_ref().map(|wanted| {
            wanted
                .iter()
                .filter_map(|(a, b)| Some((stored(graph, a)?, stored(graph, b)?)))
                .collect()
        });

        let edges = graph
            .edges()
            .iter()
            .zip(graph.edge_endpoints())
            .filter(|(_, (_, s, t))| keep[*s] && keep[*t])
            .filter(|(e, _)| match &wanted_edges {
                Some(wanted) => wanted.iter().any(|(a, b)| e.connects(a, b)),
                None => true,
            })
            .map(|(e, _)| e.clone())
            .collect();

        Graph::new(nodes, edges)
    }
}

/// Stored identifier a caller-supplied id refers to
fn stored<'g>(graph: &'g Graph, node: &NodeId) -> Option<&'g NodeId> {
    graph.resolve(node).map(|i| &graph.nodes()[i])
}
