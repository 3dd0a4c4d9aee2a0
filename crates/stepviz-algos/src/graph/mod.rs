//! Traced graph traversals over [`stepviz_core::Graph`] inputs.
//!
//! BFS and DFS share one step vocabulary ([`GraphStep`]). Steps carry node
//! *labels* and label snapshots of the visited set and frontier, resolved at
//! emission time, so every step is self-contained no matter how the consumer
//! scrubs through the trace. The programmatic API addresses nodes by
//! [`NodeId`].
//!
//! Determinism falls out of the input model: neighbor enumeration follows
//! edge insertion order, whole-graph scans follow node insertion order, and
//! visited sets are insertion-ordered.

mod bfs;
mod dfs;

pub use bfs::{bfs, bfs_connected_components, bfs_shortest_path, ShortestPath};
pub use dfs::{dfs, dfs_cycle_detection, dfs_iterative, dfs_topological_sort};

use std::fmt;

use serde::{Deserialize, Serialize};
use stepviz_core::{Graph, NodeId, StepRecord};

/// One micro-action of a graph traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GraphStep {
    /// Traversal set up: the start node is marked visited (BFS) or about to
    /// be walked (DFS).
    Initialize {
        start: String,
        visited: Vec<String>,
        frontier: Vec<String>,
    },
    /// A node is taken off the frontier (or entered by recursion) and added
    /// to the traversal order.
    Visit {
        node: String,
        visited: Vec<String>,
        frontier: Vec<String>,
    },
    /// The node's neighbor list was enumerated, in edge-list order.
    GetNeighbors {
        node: String,
        neighbors: Vec<String>,
    },
    /// A neighbor was seen for the first time: marked visited and queued.
    Discover {
        node: String,
        visited: Vec<String>,
        frontier: Vec<String>,
    },
    /// A neighbor had already been visited; nothing changes.
    AlreadyVisited { node: String },
    /// Recursive descent into an unvisited neighbor.
    GoDeeper { from: String, to: String },
    /// Return from a recursive descent (`to` absent at the walk's root).
    Backtrack {
        from: String,
        to: Option<String>,
    },
    /// Iterative DFS pushed a neighbor onto the explicit stack.
    PushStack {
        node: String,
        frontier: Vec<String>,
    },
    /// Cycle detection skipped the edge back to the traversal parent.
    SkipParent { node: String },
    /// An edge into a node on the current recursion path: a cycle.
    CycleFound { from: String, to: String },
    /// A whole-graph scan restarted from an unvisited node.
    NewComponent { start: String },
    /// The current component has been fully explored.
    ComponentComplete { members: Vec<String> },
    /// Shortest-path search dequeued the target; the carried path wins.
    PathFound { path: Vec<String>, distance: usize },
    /// The frontier emptied without reaching the target.
    NoPath { target: String },
    /// Topological sort finished a node and pushed it post-order.
    OrderPush { node: String, order: Vec<String> },
}

impl fmt::Display for GraphStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphStep::Initialize { start, .. } => write!(f, "start traversal at {}", start),
            GraphStep::Visit { node, .. } => write!(f, "visit node {}", node),
            GraphStep::GetNeighbors { node, neighbors } => {
                if neighbors.is_empty() {
                    write!(f, "node {} has no neighbors", node)
                } else {
                    write!(f, "neighbors of {}: {}", node, neighbors.join(", "))
                }
            }
            GraphStep::Discover { node, .. } => write!(f, "discover node {}", node),
            GraphStep::AlreadyVisited { node } => write!(f, "node {} already visited", node),
            GraphStep::GoDeeper { from, to } => write!(f, "descend from {} to {}", from, to),
            GraphStep::Backtrack { from, to } => match to {
                Some(to) => write!(f, "backtrack from {} to {}", from, to),
                None => write!(f, "backtrack from {}", from),
            },
            GraphStep::PushStack { node, .. } => write!(f, "push {} onto the stack", node),
            GraphStep::SkipParent { node } => write!(f, "skip parent node {}", node),
            GraphStep::CycleFound { from, to } => {
                write!(f, "cycle found: back edge from {} to {}", from, to)
            }
            GraphStep::NewComponent { start } => {
                write!(f, "new component starting at {}", start)
            }
            GraphStep::ComponentComplete { members } => {
                write!(f, "component complete: {}", members.join(", "))
            }
            GraphStep::PathFound { path, distance } => {
                write!(f, "path found: {} (distance {})", path.join(" -> "), distance)
            }
            GraphStep::NoPath { target } => write!(f, "no path to {}", target),
            GraphStep::OrderPush { node, .. } => {
                write!(f, "push {} onto the topological order stack", node)
            }
        }
    }
}

impl StepRecord for GraphStep {
    fn kind(&self) -> &'static str {
        match self {
            GraphStep::Initialize { .. } => "initialize",
            GraphStep::Visit { .. } => "visit",
            GraphStep::GetNeighbors { .. } => "get-neighbors",
            GraphStep::Discover { .. } => "discover",
            GraphStep::AlreadyVisited { .. } => "already-visited",
            GraphStep::GoDeeper { .. } => "go-deeper",
            GraphStep::Backtrack { .. } => "backtrack",
            GraphStep::PushStack { .. } => "push-stack",
            GraphStep::SkipParent { .. } => "skip-parent",
            GraphStep::CycleFound { .. } => "cycle-found",
            GraphStep::NewComponent { .. } => "new-component",
            GraphStep::ComponentComplete { .. } => "component-complete",
            GraphStep::PathFound { .. } => "path-found",
            GraphStep::NoPath { .. } => "no-path",
            GraphStep::OrderPush { .. } => "order-push",
        }
    }
}

/// Resolves one node's label; internal ids always resolve.
pub(crate) fn label_of(graph: &Graph, id: NodeId) -> String {
    graph.label(id).unwrap_or_default().to_string()
}

/// Resolves a sequence of node ids into a label snapshot.
pub(crate) fn labels_of<'a, I>(graph: &Graph, ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a NodeId>,
{
    ids.into_iter().map(|&id| label_of(graph, id)).collect()
}
