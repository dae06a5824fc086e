//! Topological ordering (Kahn's algorithm) as a stepwise state machine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{names, Stepwise};
use crate::collections::IndegreeHeap;
use crate::graph::Graph;

/// A heap entry as exposed in snapshots, in heap-array order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopoHeapEntry {
    /// Node identifier.
    pub node: String,
    /// The node's indegree when it entered the heap.
    pub indegree: usize,
}

/// Immutable state of a [`TopoExecutor`] after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopoSnapshot {
    /// The min-heap frontier in its internal array order.
    pub heap: Vec<TopoHeapEntry>,
    /// Current indegree of every node.
    pub indegree: BTreeMap<String, usize>,
    /// Nodes whose indegree was decremented by the last step, with their
    /// new values.
    pub indegree_updates: BTreeMap<String, usize>,
    /// The topological order built so far.
    pub result: Vec<String>,
    /// The node under the spotlight, if any.
    pub current_node: Option<String>,
    /// The spotlighted neighbor set.
    pub current_neighbors: Vec<String>,
    /// Full trace log, append-only across the run.
    pub log: Vec<String>,
    /// Terminal flag.
    pub done: bool,
    /// `true` when the heap stalled before every node was ordered.
    pub has_cycle: bool,
}

/// Kahn's algorithm with an indegree-keyed min-heap frontier.
///
/// Indegrees are computed once from the raw directed graph (no symmetric
/// assumption). Construction inserts every indegree-0 node in input order
/// and logs the full indegree ladder; each step extracts the minimum entry,
/// appends it to the result, and decrements the indegree of each outgoing
/// neighbor, inserting those that reach exactly zero. The graph has a
/// directed cycle iff the final result is shorter than the node count; no
/// partial order beyond the stalled prefix is produced.
pub struct TopoExecutor<'g> {
    graph: &'g Graph,
    indegree: Vec<usize>,
    heap: IndegreeHeap,
    result: Vec<usize>,
    /// Indegree deltas applied by the last step, cleared at step entry.
    updates: BTreeMap<usize, usize>,
    current: Option<usize>,
    current_neighbors: Vec<usize>,
    log: Vec<String>,
    done: bool,
    has_cycle: bool,
}

impl<'g> TopoExecutor<'g> {
    /// Creates an executor over the whole graph. Every indegree-0 node is
    /// seeded into the heap in input order.
    pub fn new(graph: &'g Graph) -> Self {
        let indegree = graph.indegrees();
        let mut heap = IndegreeHeap::with_capacity(graph.node_count());
        let mut log = Vec::new();

        log.push("Initialized indegrees:".to_string());
        for u in 0..graph.node_count() {
            log.push(format!("  {}: indegree = {}", graph.name(u), indegree[u]));
        }
        for u in 0..graph.node_count() {
            if indegree[u] == 0 {
                heap.push(u, 0);
            }
        }
        log.push("Nodes with indegree 0 added to heap".to_string());

        Self {
            graph,
            indegree,
            heap,
            result: Vec::new(),
            updates: BTreeMap::new(),
            current: None,
            current_neighbors: Vec::new(),
            log,
            done: false,
            has_cycle: false,
        }
    }

    /// Discards all state and reinitializes as if freshly constructed.
    pub fn reset(&mut self) {
        *self = Self::new(self.graph);
    }
}

impl Stepwise for TopoExecutor<'_> {
    type Snapshot = TopoSnapshot;

    fn step(&mut self) -> TopoSnapshot {
        if self.done {
            return self.snapshot();
        }

        // The delta map describes one step only.
        self.updates.clear();

        let Some(entry) = self.heap.pop() else {
            if self.result.len() < self.graph.node_count() {
                self.has_cycle = true;
                self.log
                    .push("Cycle detected! Cannot complete topological sort.".to_string());
                self.log.push(format!(
                    "Processed {}/{} nodes",
                    self.result.len(),
                    self.graph.node_count()
                ));
            } else {
                self.log
                    .push("Topological sort completed successfully!".to_string());
            }
            self.done = true;
            self.current = None;
            self.current_neighbors.clear();
            trace!(has_cycle = self.has_cycle, "topological terminal");
            return self.snapshot();
        };

        let u = entry.node;
        self.current = Some(u);
        self.result.push(u);
        self.log.push(format!(
            "Popped {} from heap (indegree: {})",
            self.graph.name(u),
            entry.indegree
        ));
        self.log.push(format!(
            "  -> Result: [{}]",
            names(self.graph, &self.result).join(", ")
        ));
        trace!(node = %self.graph.name(u), "topological extract");

        self.current_neighbors = self.graph.neighbors(u).to_vec();

        if !self.current_neighbors.is_empty() {
            self.log.push("  -> Updating neighbors' indegrees:".to_string());
            for &v in self.graph.neighbors(u) {
                let old = self.indegree[v];
                self.indegree[v] -= 1;
                self.updates.insert(v, self.indegree[v]);
                self.log.push(format!(
                    "     {}: {} -> {}",
                    self.graph.name(v),
                    old,
                    self.indegree[v]
                ));
                if self.indegree[v] == 0 {
                    self.heap.push(v, 0);
                    self.log
                        .push(format!("     {} added to heap", self.graph.name(v)));
                }
            }
        }

        self.snapshot()
    }

    fn snapshot(&self) -> TopoSnapshot {
        let heap = self
            .heap
            .as_slice()
            .iter()
            .map(|e| TopoHeapEntry {
                node: self.graph.name(e.node).to_string(),
                indegree: e.indegree,
            })
            .collect();

        let indegree = self
            .indegree
            .iter()
            .enumerate()
            .map(|(u, &d)| (self.graph.name(u).to_string(), d))
            .collect();

        let indegree_updates = self
            .updates
            .iter()
            .map(|(&u, &d)| (self.graph.name(u).to_string(), d))
            .collect();

        TopoSnapshot {
            heap,
            indegree,
            indegree_updates,
            result: names(self.graph, &self.result),
            current_node: self.current.map(|u| self.graph.name(u).to_string()),
            current_neighbors: names(self.graph, &self.current_neighbors),
            log: self.log.clone(),
            done: self.done,
            has_cycle: self.has_cycle,
        }
    }

    fn is_terminal(&self) -> bool {
        self.done
    }
}
