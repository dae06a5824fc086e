//! The executors and the stepwise contract they share.
//!
//! Every executor is a state machine over an immutable [`Graph`](crate::Graph)
//! borrow: construction seeds the frontier (and performs any setup logging),
//! and each [`Stepwise::step`] call advances the algorithm by exactly one
//! externally observable transition. Once the terminal flag is set an
//! executor never mutates again; further steps return identical snapshots.
//!
//! Snapshots are plain owned values carrying the frontier, the spotlighted
//! node and neighbor set, visited/colored/parent data, the full trace log,
//! the terminal flag, and the algorithm's verdict. Node references in
//! snapshots are identifier strings so a renderer can consume them directly.

mod bfs;
mod bipartite;
mod components;
mod cycle;
mod dfs;
mod topo;

pub use bfs::{BfsExecutor, BfsSnapshot};
pub use bipartite::{BipartiteExecutor, BipartiteSnapshot, Color};
pub use components::{ComponentsExecutor, ComponentsSnapshot};
pub use cycle::{CycleExecutor, CycleSnapshot};
pub use dfs::{DfsExecutor, DfsSnapshot};
pub use topo::{TopoExecutor, TopoHeapEntry, TopoSnapshot};

use crate::graph::Graph;
use serde::{Deserialize, Serialize};

/// The uniform single-step execution contract.
///
/// `step` advances the algorithm by one observable unit of work; `snapshot`
/// observes without mutating; `run_to_completion` drives `step` until the
/// terminal flag is set and is therefore indistinguishable from stepping
/// manually the same number of times.
pub trait Stepwise {
    /// The immutable state snapshot this executor produces.
    type Snapshot: Clone + PartialEq;

    /// Advances by exactly one externally observable transition and returns
    /// the new state. No-op once terminal.
    fn step(&mut self) -> Self::Snapshot;

    /// Returns the current state without mutating.
    fn snapshot(&self) -> Self::Snapshot;

    /// Returns `true` once the executor has reached its terminal state.
    fn is_terminal(&self) -> bool;

    /// Steps until terminal and returns the final snapshot.
    fn run_to_completion(&mut self) -> Self::Snapshot {
        while !self.is_terminal() {
            self.step();
        }
        self.snapshot()
    }
}

/// A directed edge reported alongside a verdict (cycle edge, color
/// conflict), as identifier strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeReport {
    /// Tail of the edge: the node whose neighbor scan found the conflict.
    pub from: String,
    /// Head of the edge: the already-visited or same-colored neighbor.
    pub to: String,
}

impl EdgeReport {
    pub(crate) fn new(graph: &Graph, from: usize, to: usize) -> Self {
        Self {
            from: graph.name(from).to_string(),
            to: graph.name(to).to_string(),
        }
    }
}

/// Maps dense node indices to owned identifier strings for snapshots.
pub(crate) fn names<'a, I>(graph: &Graph, ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a usize>,
{
    ids.into_iter()
        .map(|&u| graph.name(u).to_string())
        .collect()
}
