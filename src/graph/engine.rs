//! AtlasEngine: registry of named atlases for concurrent callers
//!
//! The [`Atlas`] core is single-threaded and `&mut self`-disciplined. The
//! engine routes all access through a [`DashMap`], so mutations hold the
//! entry's write guard for the whole call: concurrent readers never observe
//! an edge whose neighbor-set update has not landed yet.

use super::atlas::{Atlas, AtlasError, AtlasId, AtlasResult};
use super::edge::Edge;
use super::node::{Node, NodeId};
use crate::pack::{ContextPack, PackQuery};
use dashmap::DashMap;

/// The main engine: manages atlases and routes operations to them
#[derive(Debug, Default)]
pub struct AtlasEngine {
    /// All atlases managed by this engine
    atlases: DashMap<AtlasId, Atlas>,
}

impl AtlasEngine {
    /// Create a new AtlasEngine
    pub fn new() -> Self {
        Self {
            atlases: DashMap::new(),
        }
    }

    /// Create or replace an atlas
    ///
    /// If an atlas with the same ID already exists, it is replaced.
    /// Returns the atlas ID.
    pub fn upsert_atlas(&self, atlas: Atlas) -> AtlasId {
        let id = atlas.id.clone();
        tracing::info!(atlas = %id, name = %atlas.name, "upsert_atlas");
        self.atlases.insert(id.clone(), atlas);
        id
    }

    /// Get a snapshot of an atlas by ID
    pub fn get_atlas(&self, id: &AtlasId) -> Option<Atlas> {
        self.atlases.get(id).map(|r| r.clone())
    }

    /// Remove an atlas
    pub fn remove_atlas(&self, id: &AtlasId) -> Option<Atlas> {
        self.atlases.remove(id).map(|(_, atlas)| atlas)
    }

    /// List all atlas IDs
    pub fn list_atlases(&self) -> Vec<AtlasId> {
        self.atlases.iter().map(|r| r.key().clone()).collect()
    }

    /// Get the number of atlases
    pub fn atlas_count(&self) -> usize {
        self.atlases.len()
    }

    /// Check if an atlas exists
    pub fn has_atlas(&self, id: &AtlasId) -> bool {
        self.atlases.contains_key(id)
    }

    /// Add a node to an atlas
    pub fn add_node(&self, id: &AtlasId, node: Node) -> AtlasResult<NodeId> {
        self.atlases
            .get_mut(id)
            .ok_or_else(|| AtlasError::AtlasNotFound(id.clone()))?
            .add_node(node)
    }

    /// Add an edge to an atlas
    ///
    /// The edge record and the source node's neighbor set are updated under
    /// one write guard, so the two-step mutation is indivisible to readers.
    pub fn add_edge(&self, id: &AtlasId, edge: Edge) -> AtlasResult<()> {
        self.atlases
            .get_mut(id)
            .ok_or_else(|| AtlasError::AtlasNotFound(id.clone()))?
            .add_edge(edge)
    }

    /// Get a node from an atlas
    pub fn get_node(&self, id: &AtlasId, node_id: &NodeId) -> AtlasResult<Node> {
        self.atlases
            .get(id)
            .ok_or_else(|| AtlasError::AtlasNotFound(id.clone()))?
            .get_node(node_id)
            .cloned()
    }

    /// Neighbors of a node in an atlas (see [`Atlas::neighbors`])
    pub fn neighbors(
        &self,
        id: &AtlasId,
        node_id: &NodeId,
        edge_filter: Option<&str>,
    ) -> AtlasResult<Vec<Node>> {
        let atlas = self
            .atlases
            .get(id)
            .ok_or_else(|| AtlasError::AtlasNotFound(id.clone()))?;
        Ok(atlas
            .neighbors(node_id, edge_filter)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// Assemble a context pack against an atlas
    pub fn generate_context_pack(&self, id: &AtlasId, query: &PackQuery) -> AtlasResult<ContextPack> {
        let atlas = self
            .atlases
            .get(id)
            .ok_or_else(|| AtlasError::AtlasNotFound(id.clone()))?;
        query.assemble(atlas.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_engine() {
        let engine = AtlasEngine::new();
        assert_eq!(engine.atlas_count(), 0);
    }

    #[test]
    fn test_upsert_atlas() {
        let engine = AtlasEngine::new();
        let atlas = Atlas::new("test-atlas");
        let id = atlas.id.clone();

        let returned_id = engine.upsert_atlas(atlas);
        assert_eq!(id, returned_id);
        assert_eq!(engine.atlas_count(), 1);
        assert!(engine.has_atlas(&id));
    }

    #[test]
    fn test_get_atlas() {
        let engine = AtlasEngine::new();
        let atlas = Atlas::new("test-atlas");
        let id = atlas.id.clone();

        engine.upsert_atlas(atlas);

        let retrieved = engine.get_atlas(&id);
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().name, "test-atlas");
    }

    #[test]
    fn test_remove_atlas() {
        let engine = AtlasEngine::new();
        let atlas = Atlas::new("test-atlas");
        let id = atlas.id.clone();

        engine.upsert_atlas(atlas);
        assert_eq!(engine.atlas_count(), 1);

        let removed = engine.remove_atlas(&id);
        assert!(removed.is_some());
        assert_eq!(engine.atlas_count(), 0);
    }

    #[test]
    fn test_routed_operations() {
        let engine = AtlasEngine::new();
        let id = engine.upsert_atlas(Atlas::new("routed"));

        engine.add_node(&id, Node::new("a", "atom")).unwrap();
        engine.add_node(&id, Node::new("b", "test")).unwrap();
        engine.add_edge(&id, Edge::new("b", "a", "validates")).unwrap();

        let node = engine.get_node(&id, &NodeId::from("a")).unwrap();
        assert_eq!(node.node_type, "atom");

        let neighbors = engine
            .neighbors(&id, &NodeId::from("b"), Some("validates"))
            .unwrap();
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].id.as_str(), "a");
    }

    #[test]
    fn test_missing_atlas_fails() {
        let engine = AtlasEngine::new();
        let ghost = AtlasId::from_string("ghost");

        let err = engine.add_node(&ghost, Node::new("a", "atom")).unwrap_err();
        assert!(matches!(err, AtlasError::AtlasNotFound(_)));
    }
}
