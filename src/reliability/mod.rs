//! Pairwise reliability by exhaustive edge-state enumeration
//!
//! For every pair of nodes, the probability that they stay connected is the
//! sum of the probability masses of all edge states in which a path exists.
//! Cost is exponential in the edge count, so every computation is bounded by
//! [`ReliabilityLimits`].

pub mod calculator;
pub mod reachability;
pub mod states;

pub use calculator::{compute_reliability, pair_reliability, PairReliability};
pub use reachability::{build_topology, is_reachable, ReachabilityCache, Topology};
pub use states::{EdgeState, EdgeStates, MAX_ENUMERABLE_EDGES};

use crate::error::{GraphError, Result};

/// Default bound on edges for exhaustive enumeration (about one million states)
pub const DEFAULT_MAX_EDGES: usize = 20;

/// How node pairs are distributed over threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Evaluate pairs one after another on the calling thread
    Sequential,
    /// Evaluate pairs on the rayon thread pool
    #[default]
    Parallel,
}

/// Configurable limits for reliability enumeration
///
/// Prevents the `2^m` state space from being entered for edge sets the
/// caller has not agreed to pay for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReliabilityLimits {
    /// Maximum number of edges to enumerate over (clamped to [`MAX_ENUMERABLE_EDGES`])
    pub max_edges: usize,
    pub strategy: ExecutionStrategy,
}

impl Default for ReliabilityLimits {
    fn default() -> Self {
        Self {
            max_edges: DEFAULT_MAX_EDGES,
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl ReliabilityLimits {
    /// Create limits with a custom edge bound
    pub fn with_max_edges(mut self, max_edges: usize) -> Self {
        self.max_edges = max_edges.min(MAX_ENUMERABLE_EDGES);
        self
    }

    /// Create limits with a custom execution strategy
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Fail with [`GraphError::ComputationTooLarge`] if `edges` is over the bound
    pub fn check(&self, edges: usize) -> Result<()> {
        let max_edges = self.max_edges.min(MAX_ENUMERABLE_EDGES);
        if edges > max_edges {
            return Err(GraphError::ComputationTooLarge { edges, max_edges });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = ReliabilityLimits::default();
        assert_eq!(limits.max_edges, DEFAULT_MAX_EDGES);
        assert_eq!(limits.strategy, ExecutionStrategy::Parallel);
    }

    #[test]
    fn test_builders_clamp() {
        let limits = ReliabilityLimits::default()
            .with_max_edges(500)
            .with_strategy(ExecutionStrategy::Sequential);
        assert_eq!(limits.max_edges, MAX_ENUMERABLE_EDGES);
        assert_eq!(limits.strategy, ExecutionStrategy::Sequential);
    }

    #[test]
    fn test_check() {
        let limits = ReliabilityLimits::default().with_max_edges(3);
        assert!(limits.check(3).is_ok());
        assert_eq!(
            limits.check(4),
            Err(GraphError::ComputationTooLarge { edges: 4, max_edges: 3 })
        );
    }

    #[test]
    fn test_check_clamps_hand_built_limits() {
        let limits = ReliabilityLimits {
            max_edges: 1000,
            strategy: ExecutionStrategy::Sequential,
        };
        assert!(limits.check(64).is_err());
    }
}
