//! Node representation: identity, attributes, and tiered summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a node
///
/// Serializes as a plain string. Semantic IDs like "atom:email-format-validator"
/// are the norm; the ordering (`Ord`) gives neighbor sets a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Open-ended node metadata (string key/value pairs)
pub type Attributes = BTreeMap<String, String>;

/// Hierarchical summary of a node at three independent tiers
///
/// - `macro`: whole-system framing
/// - `meso`: module/process-level detail
/// - `micro`: finest granularity (a signature, a snippet, a command)
///
/// `invariants` is the ordered list of named properties the node guarantees
/// (e.g. "deterministic"). All tiers default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Whole-system framing
    #[serde(rename = "macro", default)]
    pub macro_tier: String,
    /// Module/process-level detail
    #[serde(rename = "meso", default)]
    pub meso_tier: String,
    /// Smallest-granularity detail
    #[serde(rename = "micro", default)]
    pub micro_tier: String,
    /// Named properties the node guarantees
    #[serde(default)]
    pub invariants: Vec<String>,
}

impl Summary {
    /// Create an all-empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the macro tier
    pub fn with_macro(mut self, text: impl Into<String>) -> Self {
        self.macro_tier = text.into();
        self
    }

    /// Set the meso tier
    pub fn with_meso(mut self, text: impl Into<String>) -> Self {
        self.meso_tier = text.into();
        self
    }

    /// Set the micro tier
    pub fn with_micro(mut self, text: impl Into<String>) -> Self {
        self.micro_tier = text.into();
        self
    }

    /// Append a named invariant
    pub fn with_invariant(mut self, invariant: impl Into<String>) -> Self {
        self.invariants.push(invariant.into());
        self
    }
}

/// Node metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// When the node was created
    pub created_at: Option<DateTime<Utc>>,
    /// Where the node came from (seed file, tool call, etc.)
    pub source: Option<String>,
}

/// A node in the atlas
///
/// Neighbors are deliberately NOT a field here: adjacency is derived state
/// owned by the [`Atlas`](super::Atlas), kept consistent with its edge index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Free-form type tag (e.g. "atom", "test")
    pub node_type: String,
    /// Open-ended metadata
    #[serde(default)]
    pub attributes: Attributes,
    /// Tiered summary
    #[serde(default)]
    pub summary: Summary,
    /// Node metadata
    #[serde(default)]
    pub metadata: NodeMetadata,
}

impl Node {
    /// Create a new node with empty attributes and an all-empty summary
    pub fn new(id: impl Into<NodeId>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            attributes: BTreeMap::new(),
            summary: Summary::default(),
            metadata: NodeMetadata {
                created_at: Some(Utc::now()),
                ..Default::default()
            },
        }
    }

    /// Add an attribute to the node
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the summary
    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summary = summary;
        self
    }

    /// Set the source location
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }
}
