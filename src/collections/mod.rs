//! Supporting data structures for the executors.

mod indegree_heap;

pub use indegree_heap::{HeapEntry, IndegreeHeap};
