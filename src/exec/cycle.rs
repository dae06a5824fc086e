//! Undirected cycle detection as a stepwise state machine.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{names, EdgeReport, Stepwise};
use crate::graph::Graph;

/// Parent assignment for a node in the BFS forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    /// Not yet enqueued.
    Unset,
    /// A component root: enqueued with no parent.
    Root,
    /// Discovered through the contained node.
    Of(usize),
}

/// Immutable state of a [`CycleExecutor`] after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSnapshot {
    /// Frontier contents, front of the queue first.
    pub queue: Vec<String>,
    /// Visited nodes in visit order.
    pub visited: Vec<String>,
    /// Parent of every enqueued node; `None` marks a component root.
    pub parent: BTreeMap<String, Option<String>>,
    /// The node under the spotlight, if any.
    pub current_node: Option<String>,
    /// The spotlighted neighbor set.
    pub current_neighbors: Vec<String>,
    /// Full trace log, append-only across the run.
    pub log: Vec<String>,
    /// Terminal flag.
    pub done: bool,
    /// `true` once a cycle has been found.
    pub has_cycle: bool,
    /// The first conflicting edge found, if any.
    pub cycle_edge: Option<EdgeReport>,
}

/// BFS-based cycle detection with undirected semantics.
///
/// A visited neighbor that is not the current node's parent closes a cycle;
/// the executor records that edge and terminalizes immediately, so the
/// reported edge is the first conflict in scan order, not necessarily part
/// of a shortest cycle. The input must list both directions of each logical
/// undirected edge; no symmetric closure is performed. Components are
/// scanned exhaustively, each refill being its own observable step.
pub struct CycleExecutor<'g> {
    graph: &'g Graph,
    queue: VecDeque<usize>,
    visited: Vec<bool>,
    visit_order: Vec<usize>,
    parent: Vec<Parent>,
    current: Option<usize>,
    current_neighbors: Vec<usize>,
    log: Vec<String>,
    done: bool,
    has_cycle: bool,
    cycle_edge: Option<(usize, usize)>,
}

impl<'g> CycleExecutor<'g> {
    /// Creates an executor starting from `start`, or from the first node in
    /// input order when `start` is absent or unknown.
    pub fn new(graph: &'g Graph, start: Option<&str>) -> Self {
        let n = graph.node_count();
        let mut queue = VecDeque::new();
        let mut parent = vec![Parent::Unset; n];
        let mut log = Vec::new();

        let seed = start
            .and_then(|s| graph.node_idx(s))
            .or_else(|| (n > 0).then_some(0));
        if let Some(u) = seed {
            queue.push_back(u);
            parent[u] = Parent::Root;
            log.push(format!("Starting cycle detection from {}", graph.name(u)));
        }

        Self {
            graph,
            queue,
            visited: vec![false; n],
            visit_order: Vec::new(),
            parent,
            current: None,
            current_neighbors: Vec::new(),
            log,
            done: false,
            has_cycle: false,
            cycle_edge: None,
        }
    }

    /// Discards all state and reinitializes as if freshly constructed.
    pub fn reset(&mut self, start: Option<&str>) {
        *self = Self::new(self.graph, start);
    }

    fn first_unvisited(&self) -> Option<usize> {
        (0..self.graph.node_count()).find(|&u| !self.visited[u])
    }
}

impl Stepwise for CycleExecutor<'_> {
    type Snapshot = CycleSnapshot;

    fn step(&mut self) -> CycleSnapshot {
        if self.done {
            return self.snapshot();
        }

        loop {
            if self.queue.is_empty() {
                // A refill is its own observable transition.
                if let Some(seed) = self.first_unvisited() {
                    self.queue.push_back(seed);
                    self.parent[seed] = Parent::Root;
                    self.log.push(format!(
                        "New component: Starting from {}",
                        self.graph.name(seed)
                    ));
                    return self.snapshot();
                }

                self.done = true;
                self.current = None;
                self.current_neighbors.clear();
                self.log.push(if self.has_cycle {
                    "CYCLE DETECTED in graph!".to_string()
                } else {
                    "NO CYCLE found - Graph is acyclic".to_string()
                });
                trace!(has_cycle = self.has_cycle, "cycle-detection terminal");
                return self.snapshot();
            }

            let Some(u) = self.queue.pop_front() else {
                continue;
            };
            if self.visited[u] {
                continue;
            }

            self.visited[u] = true;
            self.visit_order.push(u);
            self.log.push(format!("Visited {}", self.graph.name(u)));
            trace!(node = %self.graph.name(u), "cycle-detection visit");

            self.current = Some(u);
            self.current_neighbors = self.graph.neighbors(u).to_vec();

            for &v in self.graph.neighbors(u) {
                if !self.visited[v] {
                    if !self.queue.contains(&v) {
                        self.queue.push_back(v);
                        self.parent[v] = Parent::Of(u);
                        self.log.push(format!(
                            "  -> Enqueued {} (parent: {})",
                            self.graph.name(v),
                            self.graph.name(u)
                        ));
                    }
                } else if self.parent[u] != Parent::Of(v) {
                    // Visited and not our parent: this edge closes a cycle.
                    self.has_cycle = true;
                    self.cycle_edge = Some((u, v));
                    self.log.push(format!(
                        "  CYCLE: {} -> {} (already visited, not parent)",
                        self.graph.name(u),
                        self.graph.name(v)
                    ));
                    self.done = true;
                    return self.snapshot();
                } else {
                    self.log
                        .push(format!("  {} is parent, skipping", self.graph.name(v)));
                }
            }

            return self.snapshot();
        }
    }

    fn snapshot(&self) -> CycleSnapshot {
        let parent = self
            .parent
            .iter()
            .enumerate()
            .filter_map(|(u, p)| match p {
                Parent::Unset => None,
                Parent::Root => Some((self.graph.name(u).to_string(), None)),
                Parent::Of(w) => Some((
                    self.graph.name(u).to_string(),
                    Some(self.graph.name(*w).to_string()),
                )),
            })
            .collect();

        CycleSnapshot {
            queue: names(self.graph, &self.queue),
            visited: names(self.graph, &self.visit_order),
            parent,
            current_node: self.current.map(|u| self.graph.name(u).to_string()),
            current_neighbors: names(self.graph, &self.current_neighbors),
            log: self.log.clone(),
            done: self.done,
            has_cycle: self.has_cycle,
            cycle_edge: self
                .cycle_edge
                .map(|(u, v)| EdgeReport::new(self.graph, u, v)),
        }
    }

    fn is_terminal(&self) -> bool {
        self.done
    }
}
