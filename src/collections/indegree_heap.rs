//! `IndegreeHeap` — a binary min-heap of `(node, indegree)` pairs.
//!
//! This is the frontier of the topological executor: nodes enter the heap
//! tagged with their indegree at insertion time, and extraction always
//! yields an entry with the minimum such indegree. The backing store is a
//! zero-indexed array with children at `2i+1`/`2i+2` and parent at
//! `floor((i-1)/2)`; the array order is exposed so snapshots can show the
//! heap exactly as it sits in memory.

/// A heap entry: a node index paired with its indegree at insertion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapEntry {
    /// Dense node index into the graph.
    pub node: usize,
    /// The node's indegree when it was pushed. The ordering key.
    pub indegree: usize,
}

/// A priority queue implemented with a binary min-heap.
///
/// Ordering is strictly by `indegree`; entries with equal indegrees resolve
/// by heap-internal position, not by node identity, so insertion history
/// determines tie order.
#[derive(Debug, Clone, Default)]
pub struct IndegreeHeap {
    heap: Vec<HeapEntry>,
}

impl IndegreeHeap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    /// Creates an empty heap with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of entries in the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the minimum entry without removing it.
    pub fn peek(&self) -> Option<&HeapEntry> {
        self.heap.first()
    }

    /// The backing array in heap order, for snapshots.
    pub fn as_slice(&self) -> &[HeapEntry] {
        &self.heap
    }

    /// Pushes an entry and restores the heap property by sifting up.
    pub fn push(&mut self, node: usize, indegree: usize) {
        self.heap.push(HeapEntry { node, indegree });
        self.sift_up(self.heap.len() - 1);
    }

    /// Pops the minimum entry and restores the heap property by sifting down.
    pub fn pop(&mut self) -> Option<HeapEntry> {
        match self.heap.len() {
            0 => None,
            1 => self.heap.pop(),
            n => {
                self.heap.swap(0, n - 1);
                let root = self.heap.pop();
                self.sift_down(0);
                root
            }
        }
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            // Swap only on strict violation: equal keys keep their positions.
            if self.heap[parent].indegree <= self.heap[node].indegree {
                break;
            }
            self.heap.swap(parent, node);
            node = parent;
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.heap.len();
        loop {
            let mut smallest = node;
            let left = 2 * node + 1;
            let right = 2 * node + 2;

            if left < len && self.heap[left].indegree < self.heap[smallest].indegree {
                smallest = left;
            }
            if right < len && self.heap[right].indegree < self.heap[smallest].indegree {
                smallest = right;
            }
            if smallest == node {
                break;
            }
            self.heap.swap(node, smallest);
            node = smallest;
        }
    }
}
