//! Atlas: the node store and edge index
//!
//! Single source of truth for "does this node exist". Nodes are create-only
//! and live for the lifetime of the atlas; edges are keyed by their ordered
//! `(source, target)` pair with last-write-wins overwrite semantics.

use super::edge::Edge;
use super::node::{Node, NodeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in atlas operations
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("node already exists: {0}")]
    DuplicateNode(NodeId),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("edge endpoint missing: {0} -> {1}")]
    MissingEndpoint(NodeId, NodeId),

    #[error("atlas not found: {0}")]
    AtlasNotFound(AtlasId),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for atlas operations
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Unique identifier for an atlas
///
/// Serializes as a plain string (UUID or semantic ID like "atlas:helios-core")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtlasId(String);

impl AtlasId {
    /// Create a new random AtlasId (UUID-based)
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create an AtlasId from a string (semantic ID)
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AtlasId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AtlasId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AtlasId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AtlasId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Metadata about an atlas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtlasMetadata {
    /// When the atlas was created
    pub created_at: Option<DateTime<Utc>>,
    /// When the atlas was last mutated
    pub updated_at: Option<DateTime<Utc>>,
}

/// The in-memory knowledge graph: node store plus edge index
///
/// All operations assume exclusive, serialized access (`&mut self` for
/// mutation). [`AtlasEngine`](super::AtlasEngine) provides the
/// single-writer/multiple-reader discipline for concurrent callers.
#[derive(Debug, Clone)]
pub struct Atlas {
    /// Unique identifier
    pub id: AtlasId,
    /// Human-readable name
    pub name: String,
    /// Atlas metadata
    pub metadata: AtlasMetadata,
    /// Nodes by ID
    nodes: HashMap<NodeId, Node>,
    /// Node IDs in insertion order, for deterministic iteration
    node_order: Vec<NodeId>,
    /// Edges in insertion order; overwrites keep the original slot
    edges: Vec<Edge>,
    /// `(source, target)` pair to slot in `edges`
    edge_slots: HashMap<(NodeId, NodeId), usize>,
    /// Derived outgoing-neighbor sets; BTreeSet keeps them sorted by ID
    adjacency: HashMap<NodeId, BTreeSet<NodeId>>,
}

impl Atlas {
    /// Create a new atlas with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(AtlasId::new(), name)
    }

    /// Create a new atlas with a specific ID and name
    pub fn with_id(id: AtlasId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            metadata: AtlasMetadata {
                created_at: Some(Utc::now()),
                ..Default::default()
            },
            nodes: HashMap::new(),
            node_order: Vec::new(),
            edges: Vec::new(),
            edge_slots: HashMap::new(),
            adjacency: HashMap::new(),
        }
    }

    /// Add a node to the atlas
    ///
    /// Insertion is create-only: an ID that is already present fails with
    /// [`AtlasError::DuplicateNode`] and leaves the atlas untouched.
    pub fn add_node(&mut self, node: Node) -> AtlasResult<NodeId> {
        if self.nodes.contains_key(&node.id) {
            return Err(AtlasError::DuplicateNode(node.id));
        }
        let id = node.id.clone();
        tracing::debug!(atlas = %self.id, node = %id, node_type = %node.node_type, "add_node");
        self.node_order.push(id.clone());
        self.adjacency.insert(id.clone(), BTreeSet::new());
        self.nodes.insert(id.clone(), node);
        self.touch();
        Ok(id)
    }

    /// Add an edge to the atlas
    ///
    /// Both endpoints must already exist; otherwise the call fails with
    /// [`AtlasError::MissingEndpoint`] and nothing is mutated. A second edge
    /// for the same ordered pair overwrites the first (last-write-wins) but
    /// keeps its slot in scan order. The edge record and the source node's
    /// neighbor set are updated as one indivisible step.
    pub fn add_edge(&mut self, edge: Edge) -> AtlasResult<()> {
        if !self.nodes.contains_key(&edge.source) || !self.nodes.contains_key(&edge.target) {
            return Err(AtlasError::MissingEndpoint(edge.source, edge.target));
        }
        tracing::debug!(
            atlas = %self.id,
            source = %edge.source,
            target = %edge.target,
            edge_type = %edge.edge_type,
            "add_edge"
        );
        let key = edge.key();
        let target = edge.target.clone();
        match self.edge_slots.get(&key).copied() {
            Some(slot) => self.edges[slot] = edge,
            None => {
                self.edge_slots.insert(key.clone(), self.edges.len());
                self.edges.push(edge);
            }
        }
        self.adjacency.entry(key.0).or_default().insert(target);
        self.touch();
        Ok(())
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &NodeId) -> AtlasResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| AtlasError::NodeNotFound(id.clone()))
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Neighbors of a node, with two distinct semantics:
    ///
    /// - `edge_filter` absent: the node's derived neighbor set, deduplicated
    ///   and sorted by node ID.
    /// - `edge_filter` present: every target reachable from the node via an
    ///   edge of exactly that type, in edge insertion order. This is a linear
    ///   scan over all edges — a known scalability ceiling; an index keyed by
    ///   `(source, edge_type)` would replace it without changing the output.
    ///
    /// Fails with [`AtlasError::NodeNotFound`] if the node itself is absent.
    pub fn neighbors(&self, id: &NodeId, edge_filter: Option<&str>) -> AtlasResult<Vec<&Node>> {
        if !self.nodes.contains_key(id) {
            return Err(AtlasError::NodeNotFound(id.clone()));
        }
        let neighbors = match edge_filter {
            None => self
                .adjacency
                .get(id)
                .into_iter()
                .flatten()
                .filter_map(|n| self.nodes.get(n))
                .collect(),
            Some(filter) => self
                .edges
                .iter()
                .filter(|e| &e.source == id && e.edge_type == filter)
                .filter_map(|e| self.nodes.get(&e.target))
                .collect(),
        };
        Ok(neighbors)
    }

    /// Get the edge for an ordered pair, if any
    pub fn edge_between(&self, source: &NodeId, target: &NodeId) -> Option<&Edge> {
        self.edge_slots
            .get(&(source.clone(), target.clone()))
            .map(|&slot| &self.edges[slot])
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Update the last modified timestamp
    fn touch(&mut self) {
        self.metadata.updated_at = Some(Utc::now());
    }
}
