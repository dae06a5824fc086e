//! Parsing `NODE: neighbor neighbor ...` text into a [`Graph`].

use super::Graph;

/// Parses newline-separated adjacency text into a normalized [`Graph`].
///
/// Each line has the form `NODE: n1 n2, n3` — the segment before the first
/// colon names the node, the segment between the first and second colon
/// lists its neighbors, split on whitespace or commas. Duplicate neighbors
/// are dropped. Blank lines and lines without a colon are ignored. A
/// repeated `NODE:` line replaces that node's earlier neighbor list.
///
/// Node order is the order of `NODE:` lines, followed by identifiers that
/// only ever appear as neighbors, which are materialized as isolated nodes
/// in first-reference order.
pub fn parse_adjacency(text: &str) -> Graph {
    // First pass over the text builds name-level entries so that node order
    // is line order, not first-mention order.
    let mut order: Vec<String> = Vec::new();
    let mut lists: Vec<Vec<String>> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split(':');
        let Some(node) = parts.next() else { continue };
        let Some(rest) = parts.next() else { continue };
        let node = node.trim();

        let mut neighbors: Vec<String> = Vec::new();
        for part in rest.split(|c: char| c.is_whitespace() || c == ',') {
            let part = part.trim();
            if part.is_empty() || neighbors.iter().any(|n| n == part) {
                continue;
            }
            neighbors.push(part.to_string());
        }

        match order.iter().position(|n| n == node) {
            Some(pos) => lists[pos] = neighbors,
            None => {
                order.push(node.to_string());
                lists.push(neighbors);
            }
        }
    }

    let mut graph = Graph::with_capacity(order.len());
    for node in &order {
        graph.add_node(node);
    }
    // Neighbors never seen as a NODE: line land here, after all listed nodes.
    for (node, neighbors) in order.iter().zip(&lists) {
        let u = graph.add_node(node);
        for neighbor in neighbors {
            let v = graph.add_node(neighbor);
            graph.add_edge(u, v);
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parse() {
        let g = parse_adjacency("A: B C\nB: D\nC: D\nD:");
        assert_eq!(g.node_names(), &["A", "B", "C", "D"]);
        assert_eq!(g.edge_count(), 4);
        let b = g.node_idx("B").unwrap();
        let d = g.node_idx("D").unwrap();
        assert_eq!(g.neighbors(b), &[d]);
        assert!(g.neighbors(d).is_empty());
    }

    #[test]
    fn test_commas_and_extra_whitespace() {
        let g = parse_adjacency("A:  B,C ,  D\n");
        assert_eq!(g.node_names(), &["A", "B", "C", "D"]);
        assert_eq!(g.out_degree(0), 3);
    }

    #[test]
    fn test_blank_and_colonless_lines_ignored() {
        let g = parse_adjacency("\nA: B\n\njust some words\nB:\n");
        assert_eq!(g.node_names(), &["A", "B"]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_neighbors_dropped() {
        let g = parse_adjacency("A: B B B");
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_referenced_isolates_materialized_last() {
        // X is only ever a neighbor: it becomes an empty-adjacency node
        // after every listed node.
        let g = parse_adjacency("A: X\nB:");
        assert_eq!(g.node_names(), &["A", "B", "X"]);
        assert!(g.neighbors(2).is_empty());
    }

    #[test]
    fn test_repeated_node_line_replaces_list() {
        let g = parse_adjacency("A: B\nA: C");
        assert_eq!(g.node_names(), &["A", "C"]);
        let a = g.node_idx("A").unwrap();
        let c = g.node_idx("C").unwrap();
        assert_eq!(g.neighbors(a), &[c]);
    }

    #[test]
    fn test_empty_input() {
        let g = parse_adjacency("");
        assert!(g.is_empty());
    }
}
