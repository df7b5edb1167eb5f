//! Directed, typed edges between existing nodes

use super::node::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directed, typed relation between two nodes
///
/// Edges are keyed by the ordered `(source, target)` pair: the atlas holds at
/// most one edge per pair, and re-adding the pair overwrites the edge type
/// (last-write-wins). Self-loops are permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
    /// Type of relationship (e.g. "validates", "refines", "depends_on")
    pub edge_type: String,
    /// When the edge was created
    pub created_at: DateTime<Utc>,
}

impl Edge {
    /// Create a new edge
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_type: edge_type.into(),
            created_at: Utc::now(),
        }
    }

    /// The ordered pair this edge is keyed by
    pub fn key(&self) -> (NodeId, NodeId) {
        (self.source.clone(), self.target.clone())
    }

    /// Whether this edge starts and ends at the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
