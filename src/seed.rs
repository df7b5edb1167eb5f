//! Graph seed files: declarative JSON/YAML descriptions of an atlas
//!
//! A seed lists nodes and edges; applying it goes through the normal
//! [`Atlas::add_node`]/[`Atlas::add_edge`] contracts, so a seed with a
//! duplicate node or a floating edge fails with the same errors a caller
//! would see.

use crate::graph::{Atlas, AtlasError, Attributes, Edge, Node, Summary};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or applying a seed
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON seed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML seed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Graph(#[from] AtlasError),
}

/// A node entry in a seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSeed {
    /// Node ID
    pub id: String,
    /// Free-form type tag
    pub node_type: String,
    /// Open-ended metadata
    #[serde(default)]
    pub attributes: Attributes,
    /// Tiered summary (all tiers optional)
    #[serde(default)]
    pub summary: Summary,
}

/// An edge entry in a seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSeed {
    /// Source node ID
    pub source: String,
    /// Target node ID
    pub target: String,
    /// Relationship type
    pub edge_type: String,
}

/// A declarative graph description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSeed {
    /// Atlas name (defaults to the seed file stem, or "atlas")
    #[serde(default)]
    pub name: Option<String>,
    /// Nodes, applied in order
    #[serde(default)]
    pub nodes: Vec<NodeSeed>,
    /// Edges, applied after all nodes
    #[serde(default)]
    pub edges: Vec<EdgeSeed>,
}

impl GraphSeed {
    /// Load a seed from a JSON or YAML file, chosen by extension
    /// (`.json` is JSON, everything else parses as YAML — a superset of JSON)
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let mut seed: GraphSeed = if is_json {
            serde_json::from_str(&raw)?
        } else {
            serde_yaml::from_str(&raw)?
        };
        if seed.name.is_none() {
            seed.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string());
        }
        Ok(seed)
    }

    /// Build an atlas from this seed
    pub fn build(&self) -> Result<Atlas, SeedError> {
        let name = self.name.as_deref().unwrap_or("atlas");
        let mut atlas = Atlas::new(name);
        for node in &self.nodes {
            let mut n = Node::new(node.id.as_str(), node.node_type.as_str())
                .with_summary(node.summary.clone())
                .with_source(format!("seed:{}", name));
            n.attributes = node.attributes.clone();
            atlas.add_node(n)?;
        }
        for edge in &self.edges {
            atlas.add_edge(Edge::new(
                edge.source.as_str(),
                edge.target.as_str(),
                edge.edge_type.as_str(),
            ))?;
        }
        tracing::info!(
            atlas = %atlas.id,
            nodes = atlas.node_count(),
            edges = atlas.edge_count(),
            "built atlas from seed"
        );
        Ok(atlas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;
    use std::io::Write;

    const YAML_SEED: &str = r#"
name: demo
nodes:
  - id: atom:email-format-validator
    node_type: atom
    attributes:
      language: rust
    summary:
      macro: Email validator used in authentication
      invariants: [deterministic, null_safety]
  - id: test:property/email_unicode_fuzz
    node_type: test
edges:
  - source: test:property/email_unicode_fuzz
    target: atom:email-format-validator
    edge_type: validates
"#;

    #[test]
    fn yaml_seed_builds_atlas() {
        let seed: GraphSeed = serde_yaml::from_str(YAML_SEED).unwrap();
        let atlas = seed.build().unwrap();

        assert_eq!(atlas.name, "demo");
        assert_eq!(atlas.node_count(), 2);
        assert_eq!(atlas.edge_count(), 1);

        let node = atlas
            .get_node(&NodeId::from("atom:email-format-validator"))
            .unwrap();
        assert_eq!(node.summary.invariants, vec!["deterministic", "null_safety"]);
        assert_eq!(node.attributes.get("language").map(String::as_str), Some("rust"));
    }

    #[test]
    fn json_seed_loads_from_file() {
        let seed_json = serde_json::json!({
            "nodes": [
                {"id": "a", "node_type": "atom"},
                {"id": "b", "node_type": "test"}
            ],
            "edges": [
                {"source": "b", "target": "a", "edge_type": "validates"}
            ]
        });

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", seed_json).unwrap();

        let seed = GraphSeed::from_path(file.path()).unwrap();
        let atlas = seed.build().unwrap();
        assert_eq!(atlas.node_count(), 2);
        assert_eq!(atlas.edge_count(), 1);
        // Name fell back to the file stem
        assert!(seed.name.is_some());
    }

    #[test]
    fn floating_edge_fails_the_build() {
        let seed: GraphSeed = serde_yaml::from_str(
            r#"
nodes:
  - id: a
    node_type: atom
edges:
  - source: a
    target: ghost
    edge_type: refines
"#,
        )
        .unwrap();

        let err = seed.build().unwrap_err();
        assert!(matches!(err, SeedError::Graph(AtlasError::MissingEndpoint(_, _))));
    }

    #[test]
    fn duplicate_node_fails_the_build() {
        let seed: GraphSeed = serde_yaml::from_str(
            r#"
nodes:
  - id: a
    node_type: atom
  - id: a
    node_type: test
"#,
        )
        .unwrap();

        let err = seed.build().unwrap_err();
        assert!(matches!(err, SeedError::Graph(AtlasError::DuplicateNode(_))));
    }
}
