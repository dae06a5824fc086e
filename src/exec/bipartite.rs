//! Bipartiteness checking (BFS 2-coloring) as a stepwise state machine.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{names, EdgeReport, Stepwise};
use crate::graph::Graph;

/// One of the two partition colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// The color given to every component root.
    Red,
    /// The opposite color.
    Black,
}

impl Color {
    /// The other color.
    pub fn opposite(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Black => "BLACK",
        }
    }
}

/// Immutable state of a [`BipartiteExecutor`] after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BipartiteSnapshot {
    /// Frontier contents, front of the queue first.
    pub queue: Vec<String>,
    /// Color of every node; `None` while uncolored.
    pub colors: BTreeMap<String, Option<Color>>,
    /// The node under the spotlight, if any.
    pub current_node: Option<String>,
    /// The spotlighted neighbor set.
    pub current_neighbors: Vec<String>,
    /// Full trace log, append-only across the run.
    pub log: Vec<String>,
    /// Terminal flag.
    pub done: bool,
    /// The verdict so far; final once terminal.
    pub is_bipartite: bool,
    /// The first same-color adjacency found, if any.
    pub conflict_edge: Option<EdgeReport>,
}

/// BFS 2-coloring over every component.
///
/// Each component root is colored red; neighbors alternate. A neighbor that
/// already carries the current node's color invalidates the graph and the
/// executor terminalizes on that first conflict. The verdict covers every
/// component: when the queue drains, the next uncolored node (input order)
/// seeds a new component as its own observable step. Assumes the input
/// lists both directions of each logical undirected edge.
pub struct BipartiteExecutor<'g> {
    graph: &'g Graph,
    queue: VecDeque<usize>,
    color: Vec<Option<Color>>,
    current: Option<usize>,
    current_neighbors: Vec<usize>,
    log: Vec<String>,
    done: bool,
    is_bipartite: bool,
    conflict_edge: Option<(usize, usize)>,
}

impl<'g> BipartiteExecutor<'g> {
    /// Creates an executor starting from `start`, or from the first node in
    /// input order when `start` is absent or unknown.
    pub fn new(graph: &'g Graph, start: Option<&str>) -> Self {
        let n = graph.node_count();
        let mut queue = VecDeque::new();
        let mut color = vec![None; n];
        let mut log = Vec::new();

        let seed = start
            .and_then(|s| graph.node_idx(s))
            .or_else(|| (n > 0).then_some(0));
        if let Some(u) = seed {
            queue.push_back(u);
            color[u] = Some(Color::Red);
            log.push(format!("Starting from {}, colored RED", graph.name(u)));
        }

        Self {
            graph,
            queue,
            color,
            current: None,
            current_neighbors: Vec::new(),
            log,
            done: false,
            is_bipartite: true,
            conflict_edge: None,
        }
    }

    /// Discards all state and reinitializes as if freshly constructed.
    pub fn reset(&mut self, start: Option<&str>) {
        *self = Self::new(self.graph, start);
    }

    fn first_uncolored(&self) -> Option<usize> {
        (0..self.graph.node_count()).find(|&u| self.color[u].is_none())
    }
}

impl Stepwise for BipartiteExecutor<'_> {
    type Snapshot = BipartiteSnapshot;

    fn step(&mut self) -> BipartiteSnapshot {
        if self.done {
            return self.snapshot();
        }

        if self.queue.is_empty() {
            // A new-component seed is its own observable transition.
            if let Some(seed) = self.first_uncolored() {
                self.queue.push_back(seed);
                self.color[seed] = Some(Color::Red);
                self.log.push(format!(
                    "New component: {}, colored RED",
                    self.graph.name(seed)
                ));
                return self.snapshot();
            }

            self.done = true;
            self.current = None;
            self.current_neighbors.clear();
            self.log.push(if self.is_bipartite {
                "Graph is BIPARTITE!".to_string()
            } else {
                "Graph is NOT BIPARTITE!".to_string()
            });
            trace!(is_bipartite = self.is_bipartite, "bipartite terminal");
            return self.snapshot();
        }

        let Some(u) = self.queue.pop_front() else {
            return self.snapshot();
        };
        let Some(c) = self.color[u] else {
            // Queue only ever holds colored nodes.
            return self.snapshot();
        };

        self.log
            .push(format!("Processing {} ({})", self.graph.name(u), c.label()));
        trace!(node = %self.graph.name(u), color = c.label(), "bipartite visit");

        self.current = Some(u);
        self.current_neighbors = self.graph.neighbors(u).to_vec();

        for &v in self.graph.neighbors(u) {
            match self.color[v] {
                None => {
                    let opposite = c.opposite();
                    self.color[v] = Some(opposite);
                    self.queue.push_back(v);
                    self.log.push(format!(
                        "  -> {} colored {}",
                        self.graph.name(v),
                        opposite.label()
                    ));
                }
                Some(cv) if cv == c => {
                    // Same color on both ends: first conflict wins.
                    self.is_bipartite = false;
                    self.conflict_edge = Some((u, v));
                    self.log.push(format!(
                        "  CONFLICT: {} already {} (same as {})",
                        self.graph.name(v),
                        cv.label(),
                        self.graph.name(u)
                    ));
                    self.done = true;
                    return self.snapshot();
                }
                Some(cv) => {
                    self.log.push(format!(
                        "  {} already {} (valid)",
                        self.graph.name(v),
                        cv.label()
                    ));
                }
            }
        }

        self.snapshot()
    }

    fn snapshot(&self) -> BipartiteSnapshot {
        let colors = self
            .color
            .iter()
            .enumerate()
            .map(|(u, c)| (self.graph.name(u).to_string(), *c))
            .collect();

        BipartiteSnapshot {
            queue: names(self.graph, &self.queue),
            colors,
            current_node: self.current.map(|u| self.graph.name(u).to_string()),
            current_neighbors: names(self.graph, &self.current_neighbors),
            log: self.log.clone(),
            done: self.done,
            is_bipartite: self.is_bipartite,
            conflict_edge: self
                .conflict_edge
                .map(|(u, v)| EdgeReport::new(self.graph, u, v)),
        }
    }

    fn is_terminal(&self) -> bool {
        self.done
    }
}
