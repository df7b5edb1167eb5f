//! MCP tool parameter structs with schemars-derived JSON schemas.

use schemars::JsonSchema;
use serde::Deserialize;
use std::collections::BTreeMap;

// ── Atlas params ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AtlasNameParams {
    #[schemars(description = "The atlas name")]
    pub name: String,
}

// ── Node params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SummaryParams {
    #[schemars(description = "Whole-system framing")]
    pub r#macro: Option<String>,
    #[schemars(description = "Module/process-level detail")]
    pub meso: Option<String>,
    #[schemars(description = "Smallest-granularity detail (signature, snippet)")]
    pub micro: Option<String>,
    #[schemars(description = "Named properties the node guarantees")]
    pub invariants: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddNodeParams {
    #[schemars(description = "Name of the atlas to add the node to")]
    pub atlas: String,
    #[schemars(description = "Unique node ID (e.g. 'atom:email-format-validator')")]
    pub id: String,
    #[schemars(description = "Freeform type tag (e.g. 'atom', 'test')")]
    pub node_type: String,
    #[schemars(description = "Open-ended string metadata")]
    pub attributes: Option<BTreeMap<String, String>>,
    #[schemars(description = "Tiered summary")]
    pub summary: Option<SummaryParams>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetNodeParams {
    #[schemars(description = "Name of the atlas")]
    pub atlas: String,
    #[schemars(description = "The node ID")]
    pub id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NeighborsParams {
    #[schemars(description = "Name of the atlas")]
    pub atlas: String,
    #[schemars(description = "The node ID")]
    pub id: String,
    #[schemars(description = "Restrict to targets of edges of this type (full edge scan)")]
    pub edge_type: Option<String>,
}

// ── Edge params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddEdgeParams {
    #[schemars(description = "Name of the atlas")]
    pub atlas: String,
    #[schemars(description = "Source node ID (must exist)")]
    pub source: String,
    #[schemars(description = "Target node ID (must exist)")]
    pub target: String,
    #[schemars(description = "Relationship type (e.g. 'validates'); re-adding a pair overwrites the type")]
    pub edge_type: String,
}

// ── Pack params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContextPackParams {
    #[schemars(description = "Name of the atlas")]
    pub atlas: String,
    #[schemars(description = "Focus node IDs, in order")]
    pub focus_nodes: Vec<String>,
    #[schemars(description = "Token budget (echoed in the pack; defaults to 2048)")]
    pub target_tokens: Option<u32>,
    #[schemars(description = "Opaque correlation token echoed in the pack")]
    pub capsule_id: Option<String>,
}
