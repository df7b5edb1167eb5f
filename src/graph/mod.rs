//! Core graph data structures

mod atlas;
mod edge;
mod engine;
mod node;


pub use atlas::{Atlas, AtlasError, AtlasId, AtlasMetadata, AtlasResult};
pub use edge::Edge;
pub use engine::AtlasEngine;
pub use node::{Attributes, Node, NodeId, NodeMetadata, Summary};
