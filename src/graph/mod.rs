//! Graph representation and the text-to-graph boundary.
//!
//! The [`Graph`] type is the canonical directed adjacency structure every
//! executor reads: insertion-ordered nodes, duplicate-free neighbor lists,
//! and every referenced identifier materialized as a node. [`parse_adjacency`]
//! is the sole boundary between free text and that structure.

mod adjacency;
mod parse;

pub use adjacency::{Graph, GraphExport};
pub use parse::parse_adjacency;
