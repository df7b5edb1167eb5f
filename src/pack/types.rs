//! Context pack result structures
//!
//! Field names and nesting are the compatibility surface when packs are
//! consumed by another system; keep the serde representation stable.

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// Echo of the caller's request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackRequest {
    /// Focus node IDs, in request order
    pub focus_nodes: Vec<NodeId>,
    /// Token budget; carried in the response but not yet applied to prune
    /// or re-tier the contents
    pub target_tokens: u32,
    /// Opaque caller-supplied correlation token (serialized as null when
    /// absent, so the field is always present)
    pub capsule_id: Option<String>,
}

/// A single macro or micro entry for one focus node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierEntry {
    /// The focus node ID
    pub node: NodeId,
    /// The tier text
    pub summary: String,
}

/// A meso entry: module-level detail plus neighbor types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MesoEntry {
    /// The focus node ID
    pub node: NodeId,
    /// The meso tier text
    pub summary: String,
    /// Node types of the focus node's neighbors, sorted by neighbor ID
    pub neighbors: Vec<String>,
}

/// The assembled contents, with four parallel lists in focus-node order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackContents {
    /// Whole-system framing per focus node
    pub macro_outline: Vec<TierEntry>,
    /// Module-level detail plus neighbor types per focus node
    pub meso_details: Vec<MesoEntry>,
    /// Finest-granularity detail per focus node
    pub micro_snippets: Vec<TierEntry>,
    /// Sources of "validates" edges into each focus node, evaluated
    /// independently per focus node (duplicates preserved)
    pub related_tests: Vec<NodeId>,
    /// Union of the focus nodes' invariants, deduplicated and sorted —
    /// the only ordered/deduplicated output field
    pub invariants: Vec<String>,
}

/// A fully assembled context pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPack {
    /// Echo of the request
    pub request: PackRequest,
    /// The assembled contents
    pub contents: PackContents,
}
