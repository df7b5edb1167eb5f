//! MCP server for Helios Atlas — exposes atlas management, graph mutation,
//! and context pack assembly via the Model Context Protocol.
//!
//! State is held in-process by an [`AtlasEngine`]; the server starts empty
//! and atlases live for the lifetime of the process.

pub mod params;

use crate::graph::{Atlas, AtlasEngine, AtlasId, Edge, Node, NodeId, Summary};
use crate::pack::PackQuery;
use params::*;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ok_text(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn err_text(msg: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg)]))
}

/// Find an atlas by name, return its AtlasId.
fn find_atlas_by_name(engine: &AtlasEngine, name: &str) -> Option<AtlasId> {
    engine.list_atlases().into_iter().find(|id| {
        engine
            .get_atlas(id)
            .map(|a| a.name == name)
            .unwrap_or(false)
    })
}

fn summary_from_params(p: SummaryParams) -> Summary {
    Summary {
        macro_tier: p.r#macro.unwrap_or_default(),
        meso_tier: p.meso.unwrap_or_default(),
        micro_tier: p.micro.unwrap_or_default(),
        invariants: p.invariants.unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// AtlasMcpServer
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AtlasMcpServer {
    engine: Arc<AtlasEngine>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AtlasMcpServer {
    pub fn new(engine: Arc<AtlasEngine>) -> Self {
        Self {
            engine,
            tool_router: Self::tool_router(),
        }
    }

    fn resolve(&self, name: &str) -> Result<AtlasId, String> {
        find_atlas_by_name(&self.engine, name).ok_or_else(|| format!("atlas '{}' not found", name))
    }

    // ── Atlas tools ─────────────────────────────────────────────────────

    #[tool(description = "Create a named atlas (an independent knowledge graph)")]
    fn atlas_create(
        &self,
        Parameters(p): Parameters<AtlasNameParams>,
    ) -> Result<CallToolResult, McpError> {
        if find_atlas_by_name(&self.engine, &p.name).is_some() {
            return err_text(format!("atlas '{}' already exists", p.name));
        }
        let atlas = Atlas::new(&p.name);
        let id = self.engine.upsert_atlas(atlas);
        ok_text(
            serde_json::to_string_pretty(&serde_json::json!({
                "created": id.to_string(),
                "name": p.name,
            }))
            .unwrap(),
        )
    }

    #[tool(description = "List all atlases with node/edge counts")]
    fn atlas_list(&self) -> Result<CallToolResult, McpError> {
        let summaries: Vec<serde_json::Value> = self
            .engine
            .list_atlases()
            .iter()
            .filter_map(|id| {
                let atlas = self.engine.get_atlas(id)?;
                Some(serde_json::json!({
                    "name": atlas.name,
                    "id": id.to_string(),
                    "nodes": atlas.node_count(),
                    "edges": atlas.edge_count(),
                }))
            })
            .collect();
        ok_text(serde_json::to_string_pretty(&summaries).unwrap())
    }

    #[tool(description = "Delete an atlas by name")]
    fn atlas_delete(
        &self,
        Parameters(p): Parameters<AtlasNameParams>,
    ) -> Result<CallToolResult, McpError> {
        match find_atlas_by_name(&self.engine, &p.name) {
            Some(id) => {
                self.engine.remove_atlas(&id);
                ok_text(format!("deleted atlas '{}'", p.name))
            }
            None => err_text(format!("atlas '{}' not found", p.name)),
        }
    }

    // ── Node tools ──────────────────────────────────────────────────────

    #[tool(description = "Add a node with a tiered summary (create-only; duplicate IDs fail)")]
    fn add_node(
        &self,
        Parameters(p): Parameters<AddNodeParams>,
    ) -> Result<CallToolResult, McpError> {
        let atlas_id = match self.resolve(&p.atlas) {
            Ok(id) => id,
            Err(msg) => return err_text(msg),
        };
        let mut node = Node::new(p.id.as_str(), p.node_type.as_str()).with_source("mcp");
        if let Some(attributes) = p.attributes {
            node.attributes = attributes;
        }
        if let Some(summary) = p.summary {
            node = node.with_summary(summary_from_params(summary));
        }
        match self.engine.add_node(&atlas_id, node) {
            Ok(id) => ok_text(
                serde_json::to_string_pretty(&serde_json::json!({ "created": id.to_string() }))
                    .unwrap(),
            ),
            Err(e) => err_text(e.to_string()),
        }
    }

    #[tool(description = "Get a node by ID")]
    fn get_node(
        &self,
        Parameters(p): Parameters<GetNodeParams>,
    ) -> Result<CallToolResult, McpError> {
        let atlas_id = match self.resolve(&p.atlas) {
            Ok(id) => id,
            Err(msg) => return err_text(msg),
        };
        match self.engine.get_node(&atlas_id, &NodeId::from(p.id.as_str())) {
            Ok(node) => ok_text(serde_json::to_string_pretty(&node).unwrap()),
            Err(e) => err_text(e.to_string()),
        }
    }

    #[tool(description = "Neighbors of a node: derived set (sorted by ID), or targets via edges of a given type")]
    fn neighbors(
        &self,
        Parameters(p): Parameters<NeighborsParams>,
    ) -> Result<CallToolResult, McpError> {
        let atlas_id = match self.resolve(&p.atlas) {
            Ok(id) => id,
            Err(msg) => return err_text(msg),
        };
        match self.engine.neighbors(
            &atlas_id,
            &NodeId::from(p.id.as_str()),
            p.edge_type.as_deref(),
        ) {
            Ok(nodes) => ok_text(serde_json::to_string_pretty(&nodes).unwrap()),
            Err(e) => err_text(e.to_string()),
        }
    }

    // ── Edge tools ──────────────────────────────────────────────────────

    #[tool(description = "Add a directed, typed edge between two existing nodes (last-write-wins per pair)")]
    fn add_edge(
        &self,
        Parameters(p): Parameters<AddEdgeParams>,
    ) -> Result<CallToolResult, McpError> {
        let atlas_id = match self.resolve(&p.atlas) {
            Ok(id) => id,
            Err(msg) => return err_text(msg),
        };
        let edge = Edge::new(p.source.as_str(), p.target.as_str(), p.edge_type.as_str());
        match self.engine.add_edge(&atlas_id, edge) {
            Ok(()) => ok_text(format!("linked {} -> {} ({})", p.source, p.target, p.edge_type)),
            Err(e) => err_text(e.to_string()),
        }
    }

    // ── Pack tools ──────────────────────────────────────────────────────

    #[tool(description = "Assemble a context pack for a set of focus nodes under a token budget")]
    fn context_pack(
        &self,
        Parameters(p): Parameters<ContextPackParams>,
    ) -> Result<CallToolResult, McpError> {
        let atlas_id = match self.resolve(&p.atlas) {
            Ok(id) => id,
            Err(msg) => return err_text(msg),
        };
        let mut query = PackQuery::new(p.focus_nodes);
        if let Some(target_tokens) = p.target_tokens {
            query = query.with_target_tokens(target_tokens);
        }
        if let Some(capsule_id) = p.capsule_id {
            query = query.with_capsule(capsule_id);
        }
        match self.engine.generate_context_pack(&atlas_id, &query) {
            Ok(pack) => ok_text(serde_json::to_string_pretty(&pack).unwrap()),
            Err(e) => err_text(e.to_string()),
        }
    }
}

#[tool_handler]
impl ServerHandler for AtlasMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Helios Atlas MCP server — knowledge graph with tiered summaries and context pack assembly"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run_mcp_server() -> i32 {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };

    rt.block_on(async {
        let engine = Arc::new(AtlasEngine::new());
        let server = AtlasMcpServer::new(engine);

        tracing::info!("atlas mcp server starting on stdio");

        let service = match server.serve(rmcp::transport::stdio()).await {
            Ok(s) => s,
            Err(e) => {
                eprintln!("failed to start MCP server: {}", e);
                return 1;
            }
        };

        if let Err(e) = service.waiting().await {
            eprintln!("MCP server error: {}", e);
            return 1;
        }

        0
    })
}
