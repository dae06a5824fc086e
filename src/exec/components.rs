//! Connected-components counting as a stepwise state machine.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{names, Stepwise};
use crate::graph::Graph;

/// Immutable state of a [`ComponentsExecutor`] after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentsSnapshot {
    /// Frontier contents, front of the queue first.
    pub queue: Vec<String>,
    /// Visited nodes in visit order, across all components.
    pub visited: Vec<String>,
    /// The node under the spotlight, if any.
    pub current_node: Option<String>,
    /// The spotlighted neighbor set.
    pub current_neighbors: Vec<String>,
    /// Full trace log, append-only across the run.
    pub log: Vec<String>,
    /// Terminal flag.
    pub done: bool,
    /// Number of components discovered so far; final count once terminal.
    pub component_count: usize,
    /// Component id (1-based) for every visited node.
    pub component_map: BTreeMap<String, usize>,
    /// Members of the component currently being expanded.
    pub current_component: Vec<String>,
}

/// Counts maximal connected subgraphs by running BFS from each not-yet-
/// visited node in input order.
///
/// When the queue drains, the next unvisited node (input order) starts a new
/// component and its first dequeue-and-expand happens within the same step.
/// The final count equals the number of maximal connected subgraphs provided
/// the input lists both directions of each undirected edge.
pub struct ComponentsExecutor<'g> {
    graph: &'g Graph,
    queue: VecDeque<usize>,
    visited: Vec<bool>,
    visit_order: Vec<usize>,
    current: Option<usize>,
    current_neighbors: Vec<usize>,
    log: Vec<String>,
    done: bool,
    component_count: usize,
    component_of: Vec<Option<usize>>,
    current_component: Vec<usize>,
}

impl<'g> ComponentsExecutor<'g> {
    /// Creates an executor over the whole graph; no start node is taken
    /// because every node is eventually examined in input order.
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            queue: VecDeque::new(),
            visited: vec![false; n],
            visit_order: Vec::new(),
            current: None,
            current_neighbors: Vec::new(),
            log: vec![format!("Finding connected components in {n} nodes")],
            done: false,
            component_count: 0,
            component_of: vec![None; n],
            current_component: Vec::new(),
        }
    }

    /// Discards all state and reinitializes as if freshly constructed.
    pub fn reset(&mut self) {
        *self = Self::new(self.graph);
    }

    fn first_unvisited(&self) -> Option<usize> {
        (0..self.graph.node_count()).find(|&u| !self.visited[u])
    }
}

impl Stepwise for ComponentsExecutor<'_> {
    type Snapshot = ComponentsSnapshot;

    fn step(&mut self) -> ComponentsSnapshot {
        if self.done {
            return self.snapshot();
        }

        loop {
            if self.queue.is_empty() {
                let Some(seed) = self.first_unvisited() else {
                    self.done = true;
                    self.current = None;
                    self.current_neighbors.clear();
                    self.log.push(format!(
                        "Found {} connected component(s)",
                        self.component_count
                    ));
                    trace!(count = self.component_count, "components terminal");
                    return self.snapshot();
                };

                // New component: seed it and fall through to the first
                // dequeue-and-expand of the same step.
                self.component_count += 1;
                self.current_component.clear();
                self.queue.push_back(seed);
                self.log.push(format!(
                    "Component {}: Starting from {}",
                    self.component_count,
                    self.graph.name(seed)
                ));
            }

            let Some(u) = self.queue.pop_front() else {
                continue;
            };
            if self.visited[u] {
                continue;
            }

            self.visited[u] = true;
            self.visit_order.push(u);
            self.component_of[u] = Some(self.component_count);
            self.current_component.push(u);
            self.log.push(format!("  Visited {}", self.graph.name(u)));
            trace!(node = %self.graph.name(u), component = self.component_count, "components visit");

            self.current = Some(u);
            self.current_neighbors = self.graph.neighbors(u).to_vec();

            for &v in self.graph.neighbors(u) {
                if !self.visited[v] && !self.queue.contains(&v) {
                    self.queue.push_back(v);
                    self.log
                        .push(format!("    -> Enqueued {}", self.graph.name(v)));
                }
            }

            if self.queue.is_empty() && !self.current_component.is_empty() {
                let members = names(self.graph, &self.current_component).join(", ");
                self.log.push(format!(
                    "  Component {}: {{{members}}}",
                    self.component_count
                ));
            }

            return self.snapshot();
        }
    }

    fn snapshot(&self) -> ComponentsSnapshot {
        let component_map = self
            .component_of
            .iter()
            .enumerate()
            .filter_map(|(u, c)| c.map(|c| (self.graph.name(u).to_string(), c)))
            .collect();

        ComponentsSnapshot {
            queue: names(self.graph, &self.queue),
            visited: names(self.graph, &self.visit_order),
            current_node: self.current.map(|u| self.graph.name(u).to_string()),
            current_neighbors: names(self.graph, &self.current_neighbors),
            log: self.log.clone(),
            done: self.done,
            component_count: self.component_count,
            component_map,
            current_component: names(self.graph, &self.current_component),
        }
    }

    fn is_terminal(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::parse_adjacency;

    #[test]
    fn test_three_components() {
        let g = parse_adjacency("A: B\nB: A\nC: D\nD: C\nE:");
        let mut exec = ComponentsExecutor::new(&g);
        let fin = exec.run_to_completion();

        assert!(fin.done);
        assert_eq!(fin.component_count, 3);
        assert_eq!(fin.component_map["A"], 1);
        assert_eq!(fin.component_map["B"], 1);
        assert_eq!(fin.component_map["C"], 2);
        assert_eq!(fin.component_map["D"], 2);
        assert_eq!(fin.component_map["E"], 3);
    }

    #[test]
    fn test_every_node_gets_exactly_one_component() {
        let g = parse_adjacency("A: B\nB: A C\nC: B\nD:");
        let mut exec = ComponentsExecutor::new(&g);
        let fin = exec.run_to_completion();

        assert_eq!(fin.component_map.len(), g.node_count());
    }

    #[test]
    fn test_refill_fuses_with_first_visit() {
        let g = parse_adjacency("A:\nB:");
        let mut exec = ComponentsExecutor::new(&g);

        // One step opens component 1 and visits A within the same call.
        let s = exec.step();
        assert_eq!(s.component_count, 1);
        assert_eq!(s.current_node.as_deref(), Some("A"));
        assert_eq!(s.current_component, vec!["A"]);

        let s = exec.step();
        assert_eq!(s.component_count, 2);
        assert_eq!(s.current_node.as_deref(), Some("B"));

        let s = exec.step();
        assert!(s.done);
        assert_eq!(s.component_count, 2);
    }

    #[test]
    fn test_member_set_logged_when_component_completes() {
        let g = parse_adjacency("A: B\nB: A");
        let mut exec = ComponentsExecutor::new(&g);
        let fin = exec.run_to_completion();

        assert!(fin.log.iter().any(|l| l == "  Component 1: {A, B}"));
        assert!(fin.log.iter().any(|l| l == "Found 1 connected component(s)"));
    }

    #[test]
    fn test_zero_node_graph() {
        let g = parse_adjacency("");
        let mut exec = ComponentsExecutor::new(&g);
        let fin = exec.run_to_completion();

        assert!(fin.done);
        assert_eq!(fin.component_count, 0);
    }
}
