//! Property tests for the indegree min-heap and the ordering it drives.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use proptest::prelude::*;

use stepgraph::graph::Graph;
use stepgraph::{IndegreeHeap, Stepwise, TopoExecutor};

proptest! {
    #[test]
    fn test_extraction_is_non_decreasing(keys in proptest::collection::vec(0usize..1000, 0..200)) {
        let mut heap = IndegreeHeap::new();
        for (node, &k) in keys.iter().enumerate() {
            heap.push(node, k);
        }

        let mut prev = None;
        while let Some(entry) = heap.pop() {
            if let Some(p) = prev {
                prop_assert!(p <= entry.indegree);
            }
            prev = Some(entry.indegree);
        }
        prop_assert!(heap.is_empty());
    }

    #[test]
    fn test_pop_matches_std_binary_heap(
        ops in proptest::collection::vec(prop_oneof![
            (0usize..64).prop_map(Some),
            Just(None),
        ], 1..150)
    ) {
        let mut heap = IndegreeHeap::new();
        let mut oracle = BinaryHeap::new();
        let mut next_node = 0usize;

        for op in ops {
            match op {
                Some(k) => {
                    heap.push(next_node, k);
                    oracle.push(Reverse(k));
                    next_node += 1;
                }
                None => {
                    let got = heap.pop().map(|e| e.indegree);
                    let want = oracle.pop().map(|Reverse(k)| k);
                    prop_assert_eq!(got, want);
                }
            }
            prop_assert_eq!(heap.len(), oracle.len());
            prop_assert_eq!(
                heap.peek().map(|e| e.indegree),
                oracle.peek().map(|&Reverse(k)| k)
            );
        }
    }

    #[test]
    fn test_topo_on_random_dag_covers_and_respects_edges(
        n in 1usize..20,
        raw_edges in proptest::collection::vec((0usize..20, 0usize..20), 0..60)
    ) {
        // Forward-only edges keep the graph acyclic by construction.
        let mut g = Graph::new();
        for i in 0..n {
            g.add_node(&format!("n{i}"));
        }
        for (a, b) in raw_edges {
            let (u, v) = (a % n, b % n);
            if u < v {
                g.add_edge(u, v);
            }
        }

        let mut topo = TopoExecutor::new(&g);
        let fin = topo.run_to_completion();

        prop_assert!(!fin.has_cycle);
        prop_assert_eq!(fin.result.len(), n);

        let pos = |name: &str| fin.result.iter().position(|r| r == name);
        for (u, v) in g.edges() {
            prop_assert!(pos(g.name(u)) < pos(g.name(v)));
        }
    }
}
