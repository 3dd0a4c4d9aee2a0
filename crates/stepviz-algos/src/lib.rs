//! Traced implementations of the classic teaching algorithms.
//!
//! Every function here is a tracer: it runs the algorithm on an owned copy
//! of its input and simultaneously appends a [`stepviz_core::Trace`] step
//! for each observable micro-action (comparison, swap, visit, discover,
//! ...). The returned trace's `result` always equals what an untraced
//! reference implementation would produce -- tracing is strictly additive.
//!
//! # Families
//!
//! - [`sorting`]: bubble, quick (Lomuto), and top-down merge sort.
//! - [`searching`]: linear and binary search.
//! - [`graph`]: BFS (plus shortest-path and connected-components variants)
//!   and DFS (recursive, iterative, cycle detection, topological sort) over
//!   [`stepviz_core::Graph`] inputs.
//! - [`tree`]: binary search tree insert/search/remove and the three
//!   classical traversals.
//! - [`generate`]: seeded random inputs for demos and tests.

pub mod generate;
pub mod graph;
pub mod searching;
pub mod sorting;
pub mod tree;

pub use graph::{
    bfs, bfs_connected_components, bfs_shortest_path, dfs, dfs_cycle_detection, dfs_iterative,
    dfs_topological_sort, GraphStep, ShortestPath,
};
pub use searching::{binary_search, linear_search, SearchStep};
pub use sorting::{bubble_sort, merge_sort, quick_sort, SortStep};
pub use tree::{Bst, TreeStep};
