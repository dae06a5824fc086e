//! Core directed graph structure with adjacency lists.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A directed graph with insertion-ordered nodes and adjacency lists.
///
/// Node identifiers are strings; internally every node is addressed by its
/// dense index (its insertion position), which is what the executors work
/// with. "Input order" throughout the crate means this insertion order.
///
/// The structure is normalized: every identifier that appears anywhere,
/// whether as a key or as a neighbor, is a node, and neighbor lists are
/// duplicate-free, so there is at most one directed edge per ordered pair.
/// Edges are directed; algorithms with undirected semantics rely on the
/// caller supplying both `(u, v)` and `(v, u)` for each logical edge. No
/// symmetric closure is ever performed here.
pub struct Graph {
    /// Node identifiers in insertion order.
    nodes: Vec<String>,
    /// Reverse lookup: identifier -> index.
    index: HashMap<String, usize>,
    /// `adj[u]` = indices of the nodes `u` points to, in first-seen order.
    adj: Vec<Vec<usize>>,
    /// Directed edge count.
    edge_count: usize,
}

/// Serializable graph form for import/export.
#[derive(Serialize, Deserialize)]
pub struct GraphExport {
    /// Node identifiers in insertion order.
    pub nodes: Vec<String>,
    /// Directed edges as `(from, to)` index pairs.
    pub edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            adj: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates a graph with pre-allocated node capacity.
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_capacity),
            index: HashMap::with_capacity(node_capacity),
            adj: Vec::with_capacity(node_capacity),
            edge_count: 0,
        }
    }

    /// Adds a node and returns its index. Idempotent: an existing identifier
    /// returns its original index.
    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        self.adj.push(Vec::new());
        idx
    }

    /// Adds a directed edge `from -> to`. Idempotent; out-of-bounds indices
    /// are ignored.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        if from >= self.nodes.len() || to >= self.nodes.len() {
            return;
        }
        if self.adj[from].contains(&to) {
            return;
        }
        self.adj[from].push(to);
        self.edge_count += 1;
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node identifier for an index.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    pub fn name(&self, idx: usize) -> &str {
        &self.nodes[idx]
    }

    /// Node index for an identifier, if present.
    pub fn node_idx(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All node identifiers in insertion order.
    pub fn node_names(&self) -> &[String] {
        &self.nodes
    }

    /// Outgoing neighbors of a node, in first-seen order. Out-of-bounds
    /// indices yield an empty slice.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adj.get(node).map_or(&[], Vec::as_slice)
    }

    /// Out-degree of a node.
    pub fn out_degree(&self, node: usize) -> usize {
        self.adj.get(node).map_or(0, Vec::len)
    }

    /// Indegree of every node, computed from the raw directed edges.
    pub fn indegrees(&self) -> Vec<usize> {
        let mut indeg = vec![0usize; self.nodes.len()];
        for nbrs in &self.adj {
            for &v in nbrs {
                indeg[v] += 1;
            }
        }
        indeg
    }

    /// Iterates over all directed edges as `(from, to)` index pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(from, tos)| tos.iter().map(move |&to| (from, to)))
    }

    /// Exports the graph as JSON.
    pub fn to_json(&self) -> String {
        let export = GraphExport {
            nodes: self.nodes.clone(),
            edges: self.edges().collect(),
        };
        serde_json::to_string(&export).unwrap_or_default()
    }

    /// Imports a graph from the JSON produced by [`Graph::to_json`].
    ///
    /// # Errors
    /// Returns the underlying deserialization error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let export: GraphExport = serde_json::from_str(json)?;
        let mut graph = Graph::with_capacity(export.nodes.len());
        for id in &export.nodes {
            graph.add_node(id);
        }
        for (from, to) in export.edges {
            graph.add_edge(from, to);
        }
        Ok(graph)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph() {
        let g = Graph::new();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn test_add_node_idempotent() {
        let mut g = Graph::new();
        let a1 = g.add_node("A");
        let a2 = g.add_node("A");
        assert_eq!(a1, a2);
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut g = Graph::new();
        let a = g.add_node("A");
        let b = g.add_node("B");
        g.add_edge(a, b);
        g.add_edge(a, b);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(a), &[b]);
    }

    #[test]
    fn test_out_of_bounds_edge_ignored() {
        let mut g = Graph::new();
        let a = g.add_node("A");
        g.add_edge(a, 7);
        g.add_edge(7, a);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_degrees_and_indegrees() {
        let mut g = Graph::new();
        let a = g.add_node("A");
        let b = g.add_node("B");
        let c = g.add_node("C");
        g.add_edge(a, b);
        g.add_edge(a, c);
        g.add_edge(b, c);

        assert_eq!(g.out_degree(a), 2);
        assert_eq!(g.out_degree(c), 0);
        assert_eq!(g.indegrees(), vec![0, 1, 2]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut g = Graph::new();
        g.add_node("Z");
        g.add_node("A");
        g.add_node("M");
        assert_eq!(g.node_names(), &["Z", "A", "M"]);
        assert_eq!(g.node_idx("M"), Some(2));
        assert_eq!(g.node_idx("Q"), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut g = Graph::new();
        let a = g.add_node("A");
        let b = g.add_node("B");
        g.add_edge(a, b);

        let g2 = Graph::from_json(&g.to_json()).unwrap();
        assert_eq!(g2.node_count(), 2);
        assert_eq!(g2.edge_count(), 1);
        assert_eq!(g2.name(0), "A");
        assert_eq!(g2.neighbors(0), &[1]);
    }
}
