//! Context pack assembly
//!
//! A context pack is a curated, per-focus-node bundle of tiered summaries,
//! neighbor types, related validating nodes, and a deduplicated invariant
//! set, assembled against a read-only [`Atlas`](crate::Atlas).

mod assembler;
mod types;

pub use assembler::{PackQuery, DEFAULT_TARGET_TOKENS, VALIDATES_EDGE};
pub use types::{ContextPack, MesoEntry, PackContents, PackRequest, TierEntry};
