//! PackQuery: builds a context pack for a set of focus nodes

use super::types::{ContextPack, MesoEntry, PackContents, PackRequest, TierEntry};
use crate::graph::{Atlas, AtlasResult, NodeId};
use std::collections::BTreeSet;

/// Edge type that marks a source node as validating its target
pub const VALIDATES_EDGE: &str = "validates";

/// Token budget used when the caller does not supply one
pub const DEFAULT_TARGET_TOKENS: u32 = 2048;

/// Query for assembling a context pack around a set of focus nodes
///
/// Focus-node order is semantically meaningful: it determines the order of
/// entries in every output list.
#[derive(Debug, Clone)]
pub struct PackQuery {
    /// Focus node IDs, in order
    pub focus_nodes: Vec<NodeId>,
    /// Token budget (echoed in the pack; budgeting is not yet applied)
    pub target_tokens: u32,
    /// Opaque correlation token echoed in the pack
    pub capsule_id: Option<String>,
}

impl PackQuery {
    /// Create a query for the given focus nodes with the default budget
    pub fn new<I, T>(focus_nodes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        Self {
            focus_nodes: focus_nodes.into_iter().map(Into::into).collect(),
            target_tokens: DEFAULT_TARGET_TOKENS,
            capsule_id: None,
        }
    }

    /// Set the token budget
    pub fn with_target_tokens(mut self, target_tokens: u32) -> Self {
        self.target_tokens = target_tokens;
        self
    }

    /// Set the capsule ID
    pub fn with_capsule(mut self, capsule_id: impl Into<String>) -> Self {
        self.capsule_id = Some(capsule_id.into());
        self
    }

    /// Assemble a context pack against an atlas
    ///
    /// Reads the atlas, mutates nothing, and performs no I/O. For each focus
    /// node in order: one macro, meso, and micro entry is appended; the meso
    /// entry lists the node types of the node's neighbors sorted by neighbor
    /// ID; the node's invariants join a running union; and the full edge
    /// collection is scanned for `"validates"` edges into the node, whose
    /// sources are appended to `related_tests` (duplicates across focus
    /// nodes preserved).
    ///
    /// Fail-fast: any missing focus ID fails the whole call with
    /// [`NodeNotFound`](crate::AtlasError::NodeNotFound) — no partial pack.
    ///
    /// `target_tokens` is echoed in the response but does not yet influence
    /// selection, truncation, or tier granularity.
    pub fn assemble(&self, atlas: &Atlas) -> AtlasResult<ContextPack> {
        tracing::debug!(
            atlas = %atlas.id,
            focus = self.focus_nodes.len(),
            target_tokens = self.target_tokens,
            "assemble context pack"
        );

        let mut contents = PackContents::default();
        let mut invariants: BTreeSet<String> = BTreeSet::new();

        for focus in &self.focus_nodes {
            let node = atlas.get_node(focus)?;

            contents.macro_outline.push(TierEntry {
                node: focus.clone(),
                summary: node.summary.macro_tier.clone(),
            });
            contents.meso_details.push(MesoEntry {
                node: focus.clone(),
                summary: node.summary.meso_tier.clone(),
                neighbors: atlas
                    .neighbors(focus, None)?
                    .iter()
                    .map(|n| n.node_type.clone())
                    .collect(),
            });
            contents.micro_snippets.push(TierEntry {
                node: focus.clone(),
                summary: node.summary.micro_tier.clone(),
            });
            invariants.extend(node.summary.invariants.iter().cloned());

            for edge in atlas.edges() {
                if edge.edge_type == VALIDATES_EDGE && &edge.target == focus {
                    contents.related_tests.push(edge.source.clone());
                }
            }
        }

        contents.invariants = invariants.into_iter().collect();

        Ok(ContextPack {
            request: PackRequest {
                focus_nodes: self.focus_nodes.clone(),
                target_tokens: self.target_tokens,
                capsule_id: self.capsule_id.clone(),
            },
            contents,
        })
    }
}
