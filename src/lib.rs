//! # `stepgraph` - Resumable Graph-Algorithm Executors
//!
//! A family of single-step graph-algorithm executors sharing one execution
//! contract: each executor holds the full mutable state of a textbook
//! traversal or ordering algorithm and exposes [`Stepwise::step`], which
//! advances the algorithm by exactly one observable unit of work and returns
//! an immutable snapshot of the new state.
//!
//! The point of the decomposition is that algorithms naturally written as
//! straight-line loops become externally drivable state machines: a caller
//! can advance them manually, on a fixed-cadence timer, or to completion in
//! one call, and always observes the algorithm at whiteboard-explanation
//! granularity. Results are identical regardless of how the executor is
//! driven.
//!
//! ## Architecture
//!
//! - [`graph`]: the canonical directed adjacency structure plus the
//!   text-to-graph parser. Graphs are immutable for an executor's lifetime,
//!   so several executors may share one graph.
//! - [`collections`]: the indegree-keyed binary min-heap backing the
//!   topological executor's frontier.
//! - [`exec`]: the six executors (breadth-first, depth-first, connected
//!   components, cycle detection, bipartiteness, topological order) and the
//!   [`Stepwise`] contract they share.
//!
//! Every executor owns its state exclusively; no locking or shared mutation
//! exists anywhere in the crate.
//!
//! ## Example
//!
//! ```rust
//! use stepgraph::{parse_adjacency, Stepwise, TopoExecutor};
//!
//! let graph = parse_adjacency("A: B C\nB: D\nC: D\nD:");
//! let mut topo = TopoExecutor::new(&graph);
//!
//! let fin = topo.run_to_completion();
//! assert!(fin.done);
//! assert!(!fin.has_cycle);
//! assert_eq!(fin.result.first().map(String::as_str), Some("A"));
//! assert_eq!(fin.result.last().map(String::as_str), Some("D"));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]

pub mod collections;
pub mod exec;
pub mod graph;

pub use collections::IndegreeHeap;
pub use exec::{
    BfsExecutor, BipartiteExecutor, ComponentsExecutor, CycleExecutor, DfsExecutor, Stepwise,
    TopoExecutor,
};
pub use graph::{parse_adjacency, Graph};
