//! Breadth-first traversal as a stepwise state machine.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{names, Stepwise};
use crate::graph::Graph;

/// Immutable state of a [`BfsExecutor`] after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BfsSnapshot {
    /// Frontier contents, front of the queue first.
    pub queue: Vec<String>,
    /// Visited nodes in visit order.
    pub visited: Vec<String>,
    /// The node under the spotlight, if any.
    pub current_node: Option<String>,
    /// The spotlighted neighbor set.
    pub current_neighbors: Vec<String>,
    /// Full trace log, append-only across the run.
    pub log: Vec<String>,
    /// Terminal flag.
    pub done: bool,
}

/// Single-start breadth-first traversal, one observable transition per step.
///
/// Every node reachable from the start is visited exactly once, in
/// non-decreasing distance order. This variant does not restart on other
/// components; unreachable nodes are simply never visited.
pub struct BfsExecutor<'g> {
    graph: &'g Graph,
    queue: VecDeque<usize>,
    visited: Vec<bool>,
    visit_order: Vec<usize>,
    current: Option<usize>,
    current_neighbors: Vec<usize>,
    log: Vec<String>,
    done: bool,
}

impl<'g> BfsExecutor<'g> {
    /// Creates an executor seeded with `start`. An unknown or absent start
    /// yields a run that terminalizes on the first step with an empty
    /// result.
    pub fn new(graph: &'g Graph, start: Option<&str>) -> Self {
        let mut queue = VecDeque::new();
        if let Some(u) = start.and_then(|s| graph.node_idx(s)) {
            queue.push_back(u);
        }
        Self {
            graph,
            queue,
            visited: vec![false; graph.node_count()],
            visit_order: Vec::new(),
            current: None,
            current_neighbors: Vec::new(),
            log: Vec::new(),
            done: false,
        }
    }

    /// Discards all state and reinitializes as if freshly constructed.
    pub fn reset(&mut self, start: Option<&str>) {
        *self = Self::new(self.graph, start);
    }

    fn terminalize(&mut self) {
        self.done = true;
        self.current = None;
        self.current_neighbors.clear();
        trace!("bfs terminal");
    }
}

impl Stepwise for BfsExecutor<'_> {
    type Snapshot = BfsSnapshot;

    fn step(&mut self) -> BfsSnapshot {
        if self.done || self.queue.is_empty() {
            self.terminalize();
            return self.snapshot();
        }

        // Dequeue until an unvisited node surfaces. Bounded by the queue
        // length and produces no extra observable transition.
        let u = loop {
            let Some(u) = self.queue.pop_front() else {
                self.terminalize();
                return self.snapshot();
            };
            if self.visited[u] {
                self.log
                    .push(format!("Skipped {} (already visited)", self.graph.name(u)));
                continue;
            }
            break u;
        };

        self.visited[u] = true;
        self.visit_order.push(u);
        self.log.push(format!("Visited {}", self.graph.name(u)));
        trace!(node = %self.graph.name(u), "bfs visit");

        self.current = Some(u);
        self.current_neighbors = self.graph.neighbors(u).to_vec();

        for &v in self.graph.neighbors(u) {
            if !self.visited[v] && !self.queue.contains(&v) {
                self.queue.push_back(v);
                self.log
                    .push(format!("  -> Enqueued {}", self.graph.name(v)));
            }
        }

        self.snapshot()
    }

    fn snapshot(&self) -> BfsSnapshot {
        BfsSnapshot {
            queue: names(self.graph, &self.queue),
            visited: names(self.graph, &self.visit_order),
            current_node: self.current.map(|u| self.graph.name(u).to_string()),
            current_neighbors: names(self.graph, &self.current_neighbors),
            log: self.log.clone(),
            done: self.done,
        }
    }

    fn is_terminal(&self) -> bool {
        self.done
    }
}
