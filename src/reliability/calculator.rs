//! Pairwise reliability table

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use super::{EdgeStates, ExecutionStrategy, ReachabilityCache, ReliabilityLimits};
use crate::error::Result;
use crate::graph::{Graph, NodeId};

/// Connection probability of one unordered node pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairReliability {
    pub source: NodeId,
    pub target: NodeId,
    pub probability: f64,
}

/// Exact probability that nodes at positions `source` and `target` stay
/// connected under independent edge failures
///
/// Sums the mass of every edge state in which the pair is reachable. The
/// states partition the probability space; rounding over `2^m` terms can
/// still drift past 1, so the sum is clamped to `[0, 1]`.
pub fn pair_reliability(
    graph: &Graph,
    cache: &mut ReachabilityCache,
    source: usize,
    target: usize,
) -> Result<f64> {
    let mut probability = 0.0;
    for state in EdgeStates::new(graph.edge_count())? {
        if cache.can_reach(graph, &state, source, target) {
            probability += state.probability(graph);
        }
    }
    Ok(probability.clamp(0.0, 1.0))
}

/// Compute the reliability of every unordered node pair
///
/// Rows follow [`Graph::pairs`] order: `(nodes[i], nodes[j])` with `i < j`,
/// outer index first. The parallel strategy yields the same rows in the same
/// order, since each pair is summed sequentially by a single worker.
///
/// Fails with [`GraphError::ComputationTooLarge`](crate::error::GraphError::ComputationTooLarge)
/// before any enumeration if the edge count is over `limits.max_edges`.
pub fn compute_reliability(graph: &Graph, limits: &ReliabilityLimits) -> Result<Vec<PairReliability>> {
    limits.check(graph.edge_count())?;

    let pairs: Vec<(usize, usize)> = graph.pairs().collect();
    let _span = debug_span!(
        "compute_reliability",
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        pairs = pairs.len()
    )
    .entered();
    debug!(strategy = ?limits.strategy, "enumerating edge states");

    let row = |cache: &mut ReachabilityCache, &(i, j): &(usize, usize)| -> Result<PairReliability> {
        let probability = pair_reliability(graph, cache, i, j)?;
        Ok(PairReliability {
            source: graph.nodes()[i].clone(),
            target: graph.nodes()[j].clone(),
            probability,
        })
    };

    let rows = match limits.strategy {
        ExecutionStrategy::Sequential => {
            let mut cache = ReachabilityCache::new(graph);
            pairs
                .iter()
                .map(|pair| row(&mut cache, pair))
                .collect::<Result<Vec<_>>>()?
        }
        ExecutionStrategy::Parallel => pairs
            .par_iter()
            .map_init(|| ReachabilityCache::new(graph), row)
            .collect::<Result<Vec<_>>>()?,
    };

    debug!(rows = rows.len(), "reliability table complete");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::tests::{cycle4, ids, k4, path3, triangle};
    use crate::graph::Edge;

    const EPS: f64 = 1e-12;

    fn sequential() -> ReliabilityLimits {
        ReliabilityLimits::default().with_strategy(ExecutionStrategy::Sequential)
    }

    fn probability_of(rows: &[PairReliability], a: &str, b: &str) -> f64 {
        rows.iter()
            .find(|r| r.source == NodeId::from(a) && r.target == NodeId::from(b))
            .map(|r| r.probability)
            .unwrap()
    }

    #[test]
    fn test_single_edge() {
        let graph = Graph::new(ids(&["A", "B"]), vec![Edge::new("A", "B", 0.83)]).unwrap();
        let rows = compute_reliability(&graph, &sequential()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source, NodeId::from("A"));
        assert_eq!(rows[0].target, NodeId::from("B"));
        assert!((rows[0].probability - 0.83).abs() < EPS);
    }

    #[test]
    fn test_triangle() {
        for p in [0.0, 0.3, 0.5, 0.9, 1.0] {
            let rows = compute_reliability(&triangle(p), &sequential()).unwrap();
            let expected = p + (1.0 - p) * p * p;
            for row in &rows {
                assert!((row.probability - expected).abs() < EPS, "p={} row={:?}", p, row);
            }
        }
    }

    #[test]
    fn test_path_multiplies_along_chain() {
        let rows = compute_reliability(&path3(0.9, 0.8), &sequential()).unwrap();
        assert!((probability_of(&rows, "A", "B") - 0.9).abs() < EPS);
        assert!((probability_of(&rows, "A", "C") - 0.72).abs() < EPS);
        assert!((probability_of(&rows, "B", "C") - 0.8).abs() < EPS);
    }

    #[test]
    fn test_four_cycle() {
        // Two disjoint routes between adjacent nodes: direct edge, or the other three
        let p: f64 = 0.6;
        let rows = compute_reliability(&cycle4(p), &sequential()).unwrap();
        let adjacent = p + (1.0 - p) * p.powi(3);
        assert!((probability_of(&rows, "A", "B") - adjacent).abs() < EPS);
        // Opposite corners: two independent two-edge routes
        let route = p * p;
        let opposite = 1.0 - (1.0 - route) * (1.0 - route);
        assert!((probability_of(&rows, "A", "C") - opposite).abs() < EPS);
    }

    #[test]
    fn test_disconnected_pair_is_zero() {
        let graph = Graph::new(ids(&["A", "B", "C"]), vec![Edge::new("A", "B", 0.7)]).unwrap();
        let rows = compute_reliability(&graph, &sequential()).unwrap();
        assert_eq!(probability_of(&rows, "A", "C"), 0.0);
        assert_eq!(probability_of(&rows, "B", "C"), 0.0);
    }

    #[test]
    fn test_pair_enumeration() {
        let graph = k4(0.5);
        let rows = compute_reliability(&graph, &sequential()).unwrap();
        assert_eq!(rows.len(), 6);
        let pairs: Vec<(String, String)> = rows
            .iter()
            .map(|r| (r.source.to_string(), r.target.to_string()))
            .collect();
        let expected: Vec<(String, String)> = [("A", "B"), ("A", "C"), ("A", "D"), ("B", "C"), ("B", "D"), ("C", "D")]
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_single_node_has_no_pairs() {
        let graph = Graph::new(ids(&["A"]), vec![]).unwrap();
        assert!(compute_reliability(&graph, &sequential()).unwrap().is_empty());
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let graph = Graph::new(
            ids(&["A", "B", "C", "D"]),
            vec![
                Edge::new("A", "B", 0.99),
                Edge::new("B", "C", 0.01),
                Edge::new("C", "D", 1.0),
                Edge::new("D", "A", 0.0),
                Edge::new("A", "C", 0.5),
            ],
        )
        .unwrap();
        for row in compute_reliability(&graph, &sequential()).unwrap() {
            assert!((0.0..=1.0).contains(&row.probability), "{:?}", row);
        }
    }

    /// Complete graph on `n` nodes with every pair joined by two parallel edges
    fn doubled_complete(n: usize, p: f64) -> Graph {
        let nodes: Vec<NodeId> = (0..n as i64).map(NodeId::from).collect();
        let mut edges = Vec::new();
        for i in 0..n as i64 {
            for j in i + 1..n as i64 {
                edges.push(Edge::new(i, j, p));
                edges.push(Edge::new(j, i, p));
            }
        }
        Graph::new(nodes, edges).unwrap()
    }

    #[test]
    fn test_rounding_never_exceeds_one() {
        // Near-certain links: almost all mass sits in connected states
        for n in 2..=4 {
            for p in [0.9, 0.99, 0.999, 0.9999] {
                let graph = doubled_complete(n, p);
                for row in compute_reliability(&graph, &sequential()).unwrap() {
                    assert!(
                        (0.0..=1.0).contains(&row.probability),
                        "n={} p={} row={:?}",
                        n,
                        p,
                        row
                    );
                }
            }
        }
    }

    #[test]
    fn test_pair_reliability_clamped() {
        let graph = doubled_complete(4, 0.999);
        let mut cache = ReachabilityCache::new(&graph);
        for (i, j) in graph.pairs() {
            let p = pair_reliability(&graph, &mut cache, i, j).unwrap();
            assert!(p <= 1.0, "pair ({}, {}) = {}", i, j, p);
            assert!(p > 0.999);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let graph = k4(0.42);
        let seq = compute_reliability(&graph, &sequential()).unwrap();
        let par = compute_reliability(&graph, &ReliabilityLimits::default()).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_too_large_fails_before_enumeration() {
        let limits = sequential().with_max_edges(5);
        let err = compute_reliability(&k4(0.5), &limits).unwrap_err();
        assert_eq!(err, GraphError::ComputationTooLarge { edges: 6, max_edges: 5 });
    }

    #[test]
    fn test_parallel_edges_and_self_loops() {
        let graph = Graph::new(
            ids(&["A", "B"]),
            vec![Edge::new("A", "B", 0.5), Edge::new("B", "A", 0.5), Edge::new("A", "A", 0.9)],
        )
        .unwrap();
        let rows = compute_reliability(&graph, &sequential()).unwrap();
        assert!((rows[0].probability - 0.75).abs() < EPS);
    }
}
