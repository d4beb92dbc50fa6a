//! Edge-state enumeration
//!
//! Every possible present/absent assignment over an edge set, one per integer
//! in `0..2^m`. Bit `i` of the integer decides edge `i`.

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Widest edge set the enumerator can address (bits of a `u64` index, minus one
/// so that `2^m` itself still fits)
pub const MAX_ENUMERABLE_EDGES: usize = 63;

/// One hypothetical world: which edges are up
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeState {
    present: Vec<bool>,
}

impl EdgeState {
    /// Decode assignment number `index` over `edge_count` edges
    pub fn from_index(index: u64, edge_count: usize) -> Self {
        let present = (0..edge_count)
            .map(|bit| bit < 64 && (index >> bit) & 1 == 1)
            .collect();
        Self { present }
    }

    /// Every edge up
    pub fn all_present(edge_count: usize) -> Self {
        Self {
            present: vec![true; edge_count],
        }
    }

    pub fn from_bools(present: Vec<bool>) -> Self {
        Self { present }
    }

    /// Whether edge `edge` is up; edges past the end count as down
    #[inline]
    pub fn is_present(&self, edge: usize) -> bool {
        self.present.get(edge).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.present
    }

    /// Probability mass of this world
    ///
    /// Product over all edges of `p` when present and `1 - p` when absent.
    pub fn probability(&self, graph: &Graph) -> f64 {
        graph
            .edges()
            .iter()
            .enumerate()
            .map(|(i, edge)| edge.chance(self.is_present(i)))
            .product()
    }
}

/// Lazy power-set iterator over edge states
///
/// Finite (`2^m` items) and restartable by cloning or by calling
/// [`EdgeStates::new`] again.
#[derive(Debug, Clone)]
pub struct EdgeStates {
    edge_count: usize,
    next: u64,
    end: u64,
}

impl EdgeStates {
    /// Enumerate all assignments over `edge_count` edges
    ///
    /// Refuses edge counts the `u64` index space cannot cover.
    pub fn new(edge_count: usize) -> Result<Self> {
        if edge_count > MAX_ENUMERABLE_EDGES {
            return Err(GraphError::ComputationTooLarge {
                edges: edge_count,
                max_edges: MAX_ENUMERABLE_EDGES,
            });
        }
        Ok(Self {
            edge_count,
            next: 0,
            end: 1u64 << edge_count,
        })
    }
}

impl Iterator for EdgeStates {
    type Item = EdgeState;

    fn next(&mut self) -> Option<EdgeState> {
        if self.next >= self.end {
            return None;
        }
        let state = EdgeState::from_index(self.next, self.edge_count);
        self.next += 1;
        Some(state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for EdgeStates {}
