//! Depth-first search: recursive and iterative forms, cycle detection, and
//! topological sort.
//!
//! The iterative form pushes neighbors in reverse order so its pop order
//! matches the recursive visit order; popping an already-visited node is
//! silent, matching the recursive form which never re-enters one.

use indexmap::IndexSet;
use stepviz_core::{CoreError, Graph, NodeId, Trace, TraceBuilder};

use super::{label_of, labels_of, GraphStep};

/// Recursive depth-first traversal from `start`, returning the visit order.
///
/// Each entered node emits `visit` and `get-neighbors`; each unvisited
/// neighbor is bracketed by `go-deeper` / `backtrack`, each visited one
/// reports `already-visited`.
pub fn dfs(graph: &Graph, start: NodeId) -> Result<Trace<Vec<String>, GraphStep>, CoreError> {
    if !graph.contains(start) {
        return Err(CoreError::NodeNotFound { id: start });
    }

    let mut steps = TraceBuilder::new();
    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut order: Vec<NodeId> = Vec::new();

    steps.push(GraphStep::Initialize {
        start: label_of(graph, start),
        visited: Vec::new(),
        frontier: Vec::new(),
    });
    dfs_walk(graph, start, &mut visited, &mut order, &mut steps);

    Ok(steps.finish(labels_of(graph, &order)))
}

fn dfs_walk(
    graph: &Graph,
    node: NodeId,
    visited: &mut IndexSet<NodeId>,
    order: &mut Vec<NodeId>,
    steps: &mut TraceBuilder<GraphStep>,
) {
    visited.insert(node);
    order.push(node);
    steps.push(GraphStep::Visit {
        node: label_of(graph, node),
        visited: labels_of(graph, visited.iter()),
        frontier: Vec::new(),
    });

    let neighbors = graph.neighbors(node);
    steps.push(GraphStep::GetNeighbors {
        node: label_of(graph, node),
        neighbors: labels_of(graph, &neighbors),
    });

    for &neighbor in &neighbors {
        if !visited.contains(&neighbor) {
            steps.push(GraphStep::GoDeeper {
                from: label_of(graph, node),
                to: label_of(graph, neighbor),
            });
            dfs_walk(graph, neighbor, visited, order, steps);
            steps.push(GraphStep::Backtrack {
                from: label_of(graph, neighbor),
                to: Some(label_of(graph, node)),
            });
        } else {
            steps.push(GraphStep::AlreadyVisited {
                node: label_of(graph, neighbor),
            });
        }
    }
}

/// Iterative depth-first traversal with an explicit stack.
///
/// Produces the same visit order as [`dfs`] given the same neighbor
/// ordering: unvisited neighbors are pushed in reverse so the pop order
/// matches the recursion.
pub fn dfs_iterative(
    graph: &Graph,
    start: NodeId,
) -> Result<Trace<Vec<String>, GraphStep>, CoreError> {
    if !graph.contains(start) {
        return Err(CoreError::NodeNotFound { id: start });
    }

    let mut steps = TraceBuilder::new();
    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut stack: Vec<NodeId> = vec![start];
    let mut order: Vec<NodeId> = Vec::new();

    steps.push(GraphStep::Initialize {
        start: label_of(graph, start),
        visited: Vec::new(),
        frontier: labels_of(graph, &stack),
    });

    while let Some(current) = stack.pop() {
        // A node can sit on the stack twice; the later push won.
        if visited.contains(&current) {
            continue;
        }
        visited.insert(current);
        order.push(current);
        steps.push(GraphStep::Visit {
            node: label_of(graph, current),
            visited: labels_of(graph, visited.iter()),
            frontier: labels_of(graph, &stack),
        });

        let neighbors = graph.neighbors(current);
        steps.push(GraphStep::GetNeighbors {
            node: label_of(graph, current),
            neighbors: labels_of(graph, &neighbors),
        });

        for &neighbor in neighbors.iter().rev() {
            if !visited.contains(&neighbor) {
                stack.push(neighbor);
                steps.push(GraphStep::PushStack {
                    node: label_of(graph, neighbor),
                    frontier: labels_of(graph, &stack),
                });
            } else {
                steps.push(GraphStep::AlreadyVisited {
                    node: label_of(graph, neighbor),
                });
            }
        }
    }

    Ok(steps.finish(labels_of(graph, &order)))
}

/// Detects whether the graph contains a cycle.
///
/// Runs DFS from every unvisited node in node-list order, tracking the
/// recursion path; an edge into a node currently on the path -- other than
/// the traversal parent -- is a back edge and signals a cycle.
pub fn dfs_cycle_detection(graph: &Graph) -> Trace<bool, GraphStep> {
    let mut steps = TraceBuilder::new();
    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut on_path: IndexSet<NodeId> = IndexSet::new();
    let mut has_cycle = false;

    for node in graph.nodes() {
        if visited.contains(&node) {
            continue;
        }
        steps.push(GraphStep::NewComponent {
            start: label_of(graph, node),
        });
        if cycle_walk(graph, node, None, &mut visited, &mut on_path, &mut steps) {
            has_cycle = true;
            break;
        }
    }

    steps.finish(has_cycle)
}

fn cycle_walk(
    graph: &Graph,
    node: NodeId,
    parent: Option<NodeId>,
    visited: &mut IndexSet<NodeId>,
    on_path: &mut IndexSet<NodeId>,
    steps: &mut TraceBuilder<GraphStep>,
) -> bool {
    visited.insert(node);
    on_path.insert(node);
    steps.push(GraphStep::Visit {
        node: label_of(graph, node),
        visited: labels_of(graph, visited.iter()),
        frontier: labels_of(graph, on_path.iter()),
    });

    for &neighbor in &graph.neighbors(node) {
        if Some(neighbor) == parent {
            steps.push(GraphStep::SkipParent {
                node: label_of(graph, neighbor),
            });
            continue;
        }
        if on_path.contains(&neighbor) {
            steps.push(GraphStep::CycleFound {
                from: label_of(graph, node),
                to: label_of(graph, neighbor),
            });
            return true;
        }
        if !visited.contains(&neighbor) {
            steps.push(GraphStep::GoDeeper {
                from: label_of(graph, node),
                to: label_of(graph, neighbor),
            });
            if cycle_walk(graph, neighbor, Some(node), visited, on_path, steps) {
                return true;
            }
        }
    }

    on_path.shift_remove(&node);
    steps.push(GraphStep::Backtrack {
        from: label_of(graph, node),
        to: parent.map(|p| label_of(graph, p)),
    });
    false
}

/// Topological sort of a directed acyclic graph.
///
/// Post-order DFS: each finished node is pushed onto an order stack
/// (`order-push`), and the reversed stack is the result. Any back edge into
/// the current recursion path means the graph is not a DAG; the result is
/// then absent.
pub fn dfs_topological_sort(graph: &Graph) -> Trace<Option<Vec<String>>, GraphStep> {
    let mut steps = TraceBuilder::new();
    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut on_path: IndexSet<NodeId> = IndexSet::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut is_dag = true;

    for node in graph.nodes() {
        if visited.contains(&node) {
            continue;
        }
        steps.push(GraphStep::NewComponent {
            start: label_of(graph, node),
        });
        if !topo_walk(graph, node, &mut visited, &mut on_path, &mut stack, &mut steps) {
            is_dag = false;
            break;
        }
    }

    let result = if is_dag {
        let mut order = stack;
        order.reverse();
        Some(labels_of(graph, &order))
    } else {
        None
    };
    steps.finish(result)
}

fn topo_walk(
    graph: &Graph,
    node: NodeId,
    visited: &mut IndexSet<NodeId>,
    on_path: &mut IndexSet<NodeId>,
    stack: &mut Vec<NodeId>,
    steps: &mut TraceBuilder<GraphStep>,
) -> bool {
    visited.insert(node);
    on_path.insert(node);
    steps.push(GraphStep::Visit {
        node: label_of(graph, node),
        visited: labels_of(graph, visited.iter()),
        frontier: labels_of(graph, on_path.iter()),
    });

    for &neighbor in &graph.neighbors(node) {
        if on_path.contains(&neighbor) {
            steps.push(GraphStep::CycleFound {
                from: label_of(graph, node),
                to: label_of(graph, neighbor),
            });
            return false;
        }
        if !visited.contains(&neighbor) {
            steps.push(GraphStep::GoDeeper {
                from: label_of(graph, node),
                to: label_of(graph, neighbor),
            });
            if !topo_walk(graph, neighbor, visited, on_path, stack, steps) {
                return false;
            }
        }
    }

    on_path.shift_remove(&node);
    stack.push(node);
    steps.push(GraphStep::OrderPush {
        node: label_of(graph, node),
        order: labels_of(graph, stack.iter()),
    });
    true
}
