//! Iterative depth-first traversal with explicit backtrack reporting.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{names, Stepwise};
use crate::graph::Graph;

/// Immutable state of a [`DfsExecutor`] after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfsSnapshot {
    /// The explicit recursion stack, bottom first.
    pub stack: Vec<String>,
    /// Visited nodes in visit order.
    pub visited: Vec<String>,
    /// The node under the spotlight, if any.
    pub current_node: Option<String>,
    /// The spotlighted neighbor set: the full neighbor list on a discover,
    /// the single explored neighbor on a descend, the popped node on a
    /// backtrack.
    pub current_neighbors: Vec<String>,
    /// Full trace log, append-only across the run.
    pub log: Vec<String>,
    /// Terminal flag.
    pub done: bool,
    /// `true` when the last transition was a backtrack.
    pub backtracking: bool,
}

/// Depth-first traversal restructured into four explicit transitions:
/// discover, descend, backtrack, halt.
///
/// The recursion of the textbook formulation becomes an explicit stack plus
/// a per-node resume index into its neighbor list, so each backtrack is an
/// individually observable step rather than post-recursive cleanup. Stack
/// depth never exceeds the longest simple path from the start.
pub struct DfsExecutor<'g> {
    graph: &'g Graph,
    stack: Vec<usize>,
    /// Next neighbor-list position to scan for each node.
    resume: Vec<usize>,
    visited: Vec<bool>,
    visit_order: Vec<usize>,
    current: Option<usize>,
    current_neighbors: Vec<usize>,
    log: Vec<String>,
    done: bool,
    backtracking: bool,
}

impl<'g> DfsExecutor<'g> {
    /// Creates an executor seeded with `start`. An unknown or absent start
    /// yields a run that terminalizes on the first step with an empty
    /// result.
    pub fn new(graph: &'g Graph, start: Option<&str>) -> Self {
        let mut stack = Vec::new();
        if let Some(u) = start.and_then(|s| graph.node_idx(s)) {
            stack.push(u);
        }
        Self {
            graph,
            stack,
            resume: vec![0; graph.node_count()],
            visited: vec![false; graph.node_count()],
            visit_order: Vec::new(),
            current: None,
            current_neighbors: Vec::new(),
            log: Vec::new(),
            done: false,
            backtracking: false,
        }
    }

    /// Discards all state and reinitializes as if freshly constructed.
    pub fn reset(&mut self, start: Option<&str>) {
        *self = Self::new(self.graph, start);
    }
}

impl Stepwise for DfsExecutor<'_> {
    type Snapshot = DfsSnapshot;

    fn step(&mut self) -> DfsSnapshot {
        if self.done || self.stack.is_empty() {
            self.done = true;
            self.current = None;
            self.current_neighbors.clear();
            self.backtracking = false;
            trace!("dfs terminal");
            return self.snapshot();
        }

        let top = self.stack[self.stack.len() - 1];

        // Discover: first time the top of the stack is examined.
        if !self.visited[top] {
            self.visited[top] = true;
            self.visit_order.push(top);
            self.log.push(format!("Visited {}", self.graph.name(top)));
            trace!(node = %self.graph.name(top), "dfs visit");

            self.backtracking = false;
            self.current = Some(top);
            self.current_neighbors = self.graph.neighbors(top).to_vec();
            return self.snapshot();
        }

        // Descend: resume the neighbor scan where it left off.
        let neighbors = self.graph.neighbors(top);
        for i in self.resume[top]..neighbors.len() {
            let v = neighbors[i];
            if !self.visited[v] {
                self.stack.push(v);
                self.resume[top] = i + 1;
                self.log.push(format!(
                    "  -> Exploring {} from {}",
                    self.graph.name(v),
                    self.graph.name(top)
                ));
                self.backtracking = false;
                self.current = Some(top);
                self.current_neighbors = vec![v];
                return self.snapshot();
            }
        }

        // Backtrack: the top is exhausted.
        let popped = top;
        self.stack.pop();
        self.log
            .push(format!("<- Backtracking from {}", self.graph.name(popped)));
        self.backtracking = true;
        if let Some(&new_top) = self.stack.last() {
            self.current = Some(new_top);
            self.current_neighbors = vec![popped];
        } else {
            self.current = None;
            self.current_neighbors.clear();
        }
        self.snapshot()
    }

    fn snapshot(&self) -> DfsSnapshot {
        DfsSnapshot {
            stack: names(self.graph, &self.stack),
            visited: names(self.graph, &self.visit_order),
            current_node: self.current.map(|u| self.graph.name(u).to_string()),
            current_neighbors: names(self.graph, &self.current_neighbors),
            log: self.log.clone(),
            done: self.done,
            backtracking: self.backtracking,
        }
    }

    fn is_terminal(&self) -> bool {
        self.done
    }
}
