//! Graph model: nodes, unreliable edges and derived copies
//!
//! A [`Graph`] is validated once at construction and never mutated
//! afterwards. Operations that strip a node or an edge return a new graph,
//! so concurrent readers of the original always see the same snapshot.

pub mod edge;
pub mod filter;

pub use edge::Edge;
pub use filter::SearchFilter;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Opaque node identifier
///
/// Identifiers are only compared for equality; they carry no index
/// semantics. JSON input may use integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Number(i64),
    Name(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Number(n) => write!(f, "{}", n),
            NodeId::Name(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Number(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Name(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Name(s)
    }
}

impl FromStr for NodeId {
    type Err = std::convert::Infallible;

    /// Integers parse as [`NodeId::Number`], everything else is a name
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => NodeId::Number(n),
            Err(_) => NodeId::Name(s.to_string()),
        })
    }
}

/// Wire shape of a graph as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl TryFrom<GraphInput> for Graph {
    type Error = GraphError;

    fn try_from(input: GraphInput) -> Result<Self> {
        Graph::new(input.nodes, input.edges)
    }
}

impl From<&Graph> for GraphInput {
    fn from(graph: &Graph) -> Self {
        GraphInput {
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
        }
    }
}

/// Immutable undirected graph with per-edge success probabilities
///
/// Node order is significant: the first node roots connectivity sweeps and
/// pairs are enumerated in stored order. Edge order fixes the bit position of
/// each edge in an [`EdgeState`](crate::reliability::EdgeState).
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
    /// Node positions of each edge's endpoints, aligned with `edges`
    endpoints: Vec<(usize, usize)>,
}

impl Graph {
    /// Build a validated graph
    ///
    /// Fails with:
    /// - [`GraphError::EmptyGraph`] if `nodes` is empty
    /// - [`GraphError::DuplicateNode`] if an identifier repeats
    /// - [`GraphError::UnknownNode`] if an edge endpoint is not in `nodes`
    /// - [`GraphError::ProbabilityOutOfRange`] if a success chance is outside `[0, 1]`
    pub fn new(nodes: Vec<NodeId>, edges: Vec<Edge>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        for (i, node) in nodes.iter().enumerate() {
            if nodes[..i].contains(node) {
                return Err(GraphError::DuplicateNode { node: node.clone() });
            }
        }

        let mut endpoints = Vec::with_capacity(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            let source = position(&nodes, &edge.source).ok_or_else(|| GraphError::UnknownNode {
                edge: i,
                node: edge.source.clone(),
            })?;
            let target = position(&nodes, &edge.target).ok_or_else(|| GraphError::UnknownNode {
                edge: i,
                node: edge.target.clone(),
            })?;
            if !edge.has_valid_chance() {
                return Err(GraphError::ProbabilityOutOfRange {
                    edge: i,
                    value: edge.success_chance,
                });
            }
            endpoints.push((source, target));
        }

        Ok(Self {
            nodes,
            edges,
            endpoints,
        })
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Position of `node` in the stored node order
    pub fn node_index(&self, node: &NodeId) -> Option<usize> {
        position(&self.nodes, node)
    }

    /// Position of a caller-supplied `node`, tolerating integer/string mixups
    ///
    /// Identifiers typed on a command line cannot say whether `7` means the
    /// JSON integer or the JSON string. An exact match wins; otherwise a
    /// stored identifier with the same textual form is accepted.
    pub fn resolve(&self, node: &NodeId) -> Option<usize> {
        self.node_index(node).or_else(|| {
            let text = node.to_string();
            self.nodes.iter().position(|n| n.to_string() == text)
        })
    }

    /// Node positions of the endpoints of edge `edge`
    pub fn endpoints(&self, edge: usize) -> Option<(usize, usize)> {
        self.endpoints.get(edge).copied()
    }

    /// Iterate `(edge_index, source_position, target_position)`
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.endpoints
            .iter()
            .enumerate()
            .map(|(i, &(s, t))| (i, s, t))
    }

    /// All unordered pairs of distinct node positions
    ///
    /// Pairs come out as `(i, j)` with `i < j`, outer index first, so
    /// `n` nodes give exactly `n * (n - 1) / 2` pairs with no reversals.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.nodes.len();
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
    }

    /// Derived copy with the node at `index` and all its incident edges removed
    ///
    /// Out-of-range indices return an unchanged copy.
    pub fn without_node(&self, index: usize) -> Graph {
        if index >= self.nodes.len() {
            return self.clone();
        }

        let shift = |p: usize| if p > index { p - 1 } else { p };

        let mut nodes = Vec::with_capacity(self.nodes.len() - 1);
        nodes.extend(self.nodes[..index].iter().cloned());
        nodes.extend(self.nodes[index + 1..].iter().cloned());

        let removed = &self.nodes[index];
        let mut edges = Vec::with_capacity(self.edges.len());
        let mut endpoints = Vec::with_capacity(self.edges.len());
        for (edge, &(s, t)) in self.edges.iter().zip(&self.endpoints) {
            if edge.is_incident(removed) {
                continue;
            }
            edges.push(edge.clone());
            endpoints.push((shift(s), shift(t)));
        }

        Graph {
            nodes,
            edges,
            endpoints,
        }
    }

    /// Derived copy with only the edge at `index` removed
    ///
    /// Out-of-range indices return an unchanged copy.
    pub fn without_edge(&self, index: usize) -> Graph {
        let mut graph = self.clone();
        if index < graph.edges.len() {
            graph.edges.remove(index);
            graph.endpoints.remove(index);
        }
        graph
    }

    /// Content hash of the snapshot (BLAKE3, hex)
    ///
    /// Covers node order, edge order, endpoints and probabilities, so two
    /// graphs hash equal exactly when every computed result would match.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();

        hasher.update(&(self.nodes.len() as u64).to_le_bytes());
        for node in &self.nodes {
            hash_node(&mut hasher, node);
        }

        hasher.update(&(self.edges.len() as u64).to_le_bytes());
        for (edge, &(s, t)) in self.edges.iter().zip(&self.endpoints) {
            hasher.update(&(s as u64).to_le_bytes());
            hasher.update(&(t as u64).to_le_bytes());
            hasher.update(&edge.success_chance.to_bits().to_le_bytes());
        }

        hasher.finalize().to_hex().to_string()
    }
}

fn position(nodes: &[NodeId], node: &NodeId) -> Option<usize> {
    nodes.iter().position(|n| n == node)
}

fn hash_node(hasher: &mut blake3::Hasher, node: &NodeId) {
    match node {
        NodeId::Number(n) => {
            hasher.update(&[0u8]);
            hasher.update(&n.to_le_bytes());
        }
        NodeId::Name(s) => {
            hasher.update(&[1u8]);
            hasher.update(&(s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        }
    }
}
