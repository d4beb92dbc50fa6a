//! Unreliable undirected links

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Undirected edge carrying an independent success probability
///
/// `source`/`target` only fix how the edge was written down; traversal is
/// allowed in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Probability that the link is up, in `[0, 1]`
    #[serde(rename = "successChance", alias = "success_chance")]
    pub success_chance: f64,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, success_chance: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            success_chance,
        }
    }

    /// Probability that the link is down
    pub fn failure_chance(&self) -> f64 {
        1.0 - self.success_chance
    }

    /// Probability of this edge being in the given state
    #[inline]
    pub fn chance(&self, present: bool) -> f64 {
        if present {
            self.success_chance
        } else {
            self.failure_chance()
        }
    }

    /// Check if the edge has `node` as one of its endpoints
    pub fn is_incident(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }

    /// Check if the edge joins `a` and `b`, in either direction
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }

    /// Same edge with endpoints swapped
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            success_chance: self.success_chance,
        }
    }

    pub(crate) fn has_valid_chance(&self) -> bool {
        (0.0..=1.0).contains(&self.success_chance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chance() {
        let edge = Edge::new("A", "B", 0.75);
        assert_eq!(edge.chance(true), 0.75);
        assert_eq!(edge.chance(false), 0.25);
    }

    #[test]
    fn test_connects_is_undirected() {
        let edge = Edge::new("A", "B", 0.5);
        let a = NodeId::from("A");
        let b = NodeId::from("B");
        let c = NodeId::from("C");
        assert!(edge.connects(&a, &b));
        assert!(edge.connects(&b, &a));
        assert!(!edge.connects(&a, &c));
        assert!(edge.is_incident(&b));
        assert!(!edge.is_incident(&c));
    }

    #[test]
    fn test_valid_chance() {
        assert!(Edge::new(1i64, 2i64, 0.0).has_valid_chance());
        assert!(Edge::new(1i64, 2i64, 1.0).has_valid_chance());
        assert!(!Edge::new(1i64, 2i64, 1.01).has_valid_chance());
        assert!(!Edge::new(1i64, 2i64, -0.1).has_valid_chance());
        assert!(!Edge::new(1i64, 2i64, f64::NAN).has_valid_chance());
    }

    #[test]
    fn test_wire_names() {
        let edge: Edge =
            serde_json::from_str(r#"{"source": 1, "target": "x", "successChance": 0.9}"#).unwrap();
        assert_eq!(edge.source, NodeId::Number(1));
        assert_eq!(edge.target, NodeId::from("x"));
        assert_eq!(edge.success_chance, 0.9);

        let edge: Edge =
            serde_json::from_str(r#"{"source": 1, "target": 2, "success_chance": 0.1}"#).unwrap();
        assert_eq!(edge.success_chance, 0.1);

        let json = serde_json::to_string(&Edge::new(1i64, 2i64, 0.5)).unwrap();
        assert!(json.contains("\"successChance\":0.5"));
    }
}
