//! Helios Atlas: In-Memory Knowledge Graph with Context Pack Assembly
//!
//! An in-memory store of typed nodes carrying hierarchical macro/meso/micro
//! summaries, typed directed edges between them, and an assembler that builds
//! a bounded "context pack" for a set of focus nodes under a token budget.
//!
//! # Core Concepts
//!
//! - **Nodes**: typed entities with a three-tier summary and named invariants
//! - **Edges**: directed, typed relations — at most one per ordered pair
//! - **Context Packs**: per-focus-node bundles of summaries, neighbor types,
//!   related validating nodes, and a deduplicated invariant set
//!
//! # Example
//!
//! ```
//! use helios_atlas::{Atlas, Edge, Node, PackQuery, Summary};
//!
//! let mut atlas = Atlas::new("demo");
//! atlas.add_node(Node::new("atom:validator", "atom").with_summary(
//!     Summary::new().with_macro("Email validator").with_invariant("deterministic"),
//! ))?;
//! atlas.add_node(Node::new("test:fuzz", "test"))?;
//! atlas.add_edge(Edge::new("test:fuzz", "atom:validator", "validates"))?;
//!
//! let pack = PackQuery::new(["atom:validator"]).assemble(&atlas)?;
//! assert_eq!(pack.contents.related_tests.len(), 1);
//! # Ok::<(), helios_atlas::AtlasError>(())
//! ```

mod graph;
pub mod mcp;
pub mod pack;
pub mod seed;

pub use graph::{
    Atlas, AtlasEngine, AtlasError, AtlasId, AtlasMetadata, AtlasResult, Attributes, Edge, Node,
    NodeId, NodeMetadata, Summary,
};
pub use pack::{ContextPack, MesoEntry, PackContents, PackQuery, PackRequest, TierEntry};
pub use seed::{GraphSeed, SeedError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
