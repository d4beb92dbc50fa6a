//! Combined stability report
//!
//! Bundles the four outputs computed from one graph snapshot into the record
//! a caller persists or serves. Identifiers and storage are the caller's job.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::connectivity::{count_edge_connectivity, count_node_connectivity, is_connected};
use crate::error::Result;
use crate::graph::Graph;
use crate::reliability::{compute_reliability, PairReliability, ReliabilityLimits};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    /// BLAKE3 fingerprint of the analysed snapshot
    pub graph_hash: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub connected: bool,
    /// Node-removal counter
    #[serde(rename = "xG")]
    pub x_g: usize,
    /// Edge-removal counter
    #[serde(rename = "alphaG")]
    pub alpha_g: usize,
    pub probabilities: Vec<PairReliability>,
}

impl StabilityReport {
    /// Lowest pairwise reliability, if there is at least one pair
    pub fn weakest_pair(&self) -> Option<&PairReliability> {
        self.probabilities
            .iter()
            .min_by(|a, b| a.probability.total_cmp(&b.probability))
    }
}

/// Compute every metric for `graph`
///
/// The edge bound is checked first, so an oversized graph fails before any
/// work is done and no partial report is produced.
pub fn analyze(graph: &Graph, limits: &ReliabilityLimits) -> Result<StabilityReport> {
    limits.check(graph.edge_count())?;

    let probabilities = compute_reliability(graph, limits)?;
    let connected = is_connected(graph);
    let x_g = count_node_connectivity(graph);
    let alpha_g = count_edge_connectivity(graph);

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        connected,
        x_g,
        alpha_g,
        "stability analysis complete"
    );

    Ok(StabilityReport {
        graph_hash: graph.fingerprint(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        connected,
        x_g,
        alpha_g,
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::tests::{k4, path3, triangle};

    #[test]
    fn test_triangle_report() {
        let graph = triangle(0.5);
        let report = analyze(&graph, &ReliabilityLimits::default()).unwrap();
        assert!(report.connected);
        assert_eq!(report.x_g, 2);
        assert_eq!(report.alpha_g, 2);
        assert_eq!(report.probabilities.len(), 3);
        assert_eq!(report.graph_hash, graph.fingerprint());
    }

    #[test]
    fn test_weakest_pair() {
        let report = analyze(&path3(0.9, 0.8), &ReliabilityLimits::default()).unwrap();
        let weakest = report.weakest_pair().unwrap();
        assert_eq!(weakest.source.to_string(), "A");
        assert_eq!(weakest.target.to_string(), "C");
    }

    #[test]
    fn test_no_partial_report_when_too_large() {
        let limits = ReliabilityLimits::default().with_max_edges(2);
        let err = analyze(&k4(0.5), &limits).unwrap_err();
        assert!(matches!(err, GraphError::ComputationTooLarge { edges: 6, max_edges: 2 }));
    }

    #[test]
    fn test_stored_field_names() {
        let report = analyze(&triangle(0.5), &ReliabilityLimits::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["xG"], 2);
        assert_eq!(json["alphaG"], 2);
        assert_eq!(json["probabilities"][0]["source"], "A");
        assert!(json["probabilities"][0]["probability"].is_number());
    }
}
