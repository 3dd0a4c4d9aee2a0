//! Breadth-first search and its variants.
//!
//! The FIFO frontier makes BFS level-ordered, which is what the shortest
//! path variant relies on: the first time the target is dequeued, the path
//! carried alongside it is a shortest one.

use std::collections::VecDeque;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use stepviz_core::{CoreError, Graph, NodeId, Trace, TraceBuilder};

use super::{label_of, labels_of, GraphStep};

/// Result of a successful shortest-path search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// Node labels from start to target, inclusive.
    pub path: Vec<String>,
    /// Number of edges on the path.
    pub distance: usize,
}

/// Breadth-first traversal from `start`, returning the visit order.
///
/// The start node is marked visited before the loop. Each dequeued node
/// emits `visit`, then `get-neighbors`, then `discover` or
/// `already-visited` per neighbor in edge-list order.
pub fn bfs(graph: &Graph, start: NodeId) -> Result<Trace<Vec<String>, GraphStep>, CoreError> {
    if !graph.contains(start) {
        return Err(CoreError::NodeNotFound { id: start });
    }

    let mut steps = TraceBuilder::new();
    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    let mut order: Vec<NodeId> = Vec::new();

    visited.insert(start);
    queue.push_back(start);
    steps.push(GraphStep::Initialize {
        start: label_of(graph, start),
        visited: labels_of(graph, &visited),
        frontier: labels_of(graph, &queue),
    });

    while let Some(current) = queue.pop_front() {
        order.push(current);
        steps.push(GraphStep::Visit {
            node: label_of(graph, current),
            visited: labels_of(graph, &visited),
            frontier: labels_of(graph, &queue),
        });

        let neighbors = graph.neighbors(current);
        steps.push(GraphStep::GetNeighbors {
            node: label_of(graph, current),
            neighbors: labels_of(graph, &neighbors),
        });

        for &neighbor in &neighbors {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
                steps.push(GraphStep::Discover {
                    node: label_of(graph, neighbor),
                    visited: labels_of(graph, &visited),
                    frontier: labels_of(graph, &queue),
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

/// Shortest unweighted path from `start` to `target`.
///
/// Carries the path alongside each queued node and stops at the first
/// dequeue of the target; BFS's level-order property guarantees that path
/// is shortest.
pub fn bfs_shortest_path(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
) -> Result<Trace<Option<ShortestPath>, GraphStep>, CoreError> {
    if !graph.contains(start) {
        return Err(CoreError::NodeNotFound { id: start });
    }
    if !graph.contains(target) {
        return Err(CoreError::NodeNotFound { id: target });
    }

    let mut steps = TraceBuilder::new();
    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut queue: VecDeque<(NodeId, Vec<NodeId>)> = VecDeque::new();

    visited.insert(start);
    queue.push_back((start, vec![start]));
    steps.push(GraphStep::Initialize {
        start: label_of(graph, start),
        visited: labels_of(graph, &visited),
        frontier: labels_of(graph, queue.iter().map(|(n, _)| n)),
    });

    while let Some((current, path)) = queue.pop_front() {
        steps.push(GraphStep::Visit {
            node: label_of(graph, current),
            visited: labels_of(graph, &visited),
            frontier: labels_of(graph, queue.iter().map(|(n, _)| n)),
        });

        if current == target {
            let path = labels_of(graph, &path);
            let distance = path.len() - 1;
            steps.push(GraphStep::PathFound {
                path: path.clone(),
                distance,
            });
            return Ok(steps.finish(Some(ShortestPath { path, distance })));
        }

        let neighbors = graph.neighbors(current);
        steps.push(GraphStep::GetNeighbors {
            node: label_of(graph, current),
            neighbors: labels_of(graph, &neighbors),
        });

        for &neighbor in &neighbors {
            if visited.insert(neighbor) {
                let mut next_path = path.clone();
                next_path.push(neighbor);
                queue.push_back((neighbor, next_path));
                steps.push(GraphStep::Discover {
                    node: label_of(graph, neighbor),
                    visited: labels_of(graph, &visited),
                    frontier: labels_of(graph, queue.iter().map(|(n, _)| n)),
                });
            } else {
                steps.push(GraphStep::AlreadyVisited {
                    node: label_of(graph, neighbor),
                });
            }
        }
    }

    steps.push(GraphStep::NoPath {
        target: label_of(graph, target),
    });
    Ok(steps.finish(None))
}

/// Partitions the graph's nodes into connected components.
///
/// Restarts BFS from every unvisited node in node-list order; each restart
/// is framed by `new-component` / `component-complete` steps.
pub fn bfs_connected_components(graph: &Graph) -> Trace<Vec<Vec<String>>, GraphStep> {
    let mut steps = TraceBuilder::new();
    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut components: Vec<Vec<String>> = Vec::new();

    for node in graph.nodes() {
        if visited.contains(&node) {
            continue;
        }

        visited.insert(node);
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        queue.push_back(node);
        let mut component: Vec<NodeId> = Vec::new();
        steps.push(GraphStep::NewComponent {
            start: label_of(graph, node),
        });

        while let Some(current) = queue.pop_front() {
            component.push(current);
            steps.push(GraphStep::Visit {
                node: label_of(graph, current),
                visited: labels_of(graph, &visited),
                frontier: labels_of(graph, &queue),
            });

            for &neighbor in &graph.neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                    steps.push(GraphStep::Discover {
                        node: label_of(graph, neighbor),
                        visited: labels_of(graph, &visited),
                        frontier: labels_of(graph, &queue),
                    });
                }
            }
        }

        let members = labels_of(graph, &component);
        steps.push(GraphStep::ComponentComplete {
            members: members.clone(),
        });
        components.push(members);
    }

    steps.finish(components)
}
