//! The input graph model for traced traversals.
//!
//! [`Graph`] is a thin wrapper over a petgraph `StableGraph` holding opaque
//! string labels on nodes and optional weights on edges, plus a runtime
//! `directed` flag. It is the single entry point for constructing traversal
//! inputs; all mutations validate their ids.
//!
//! Neighbor enumeration is contractual, not incidental: it scans the edge
//! list in insertion order, considers both endpoints when the graph is
//! undirected, and de-duplicates keeping first-seen order. Traversal traces
//! are deterministic because this ordering is.

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Directed;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::CoreError;
use crate::id::{EdgeId, NodeId};

/// A traversal input graph: labeled nodes, optionally weighted edges, and
/// an explicit directedness flag.
///
/// The backing store is always a directed `StableGraph`; undirected
/// semantics are applied at neighbor-lookup time so that edge insertion
/// order stays visible to the traversal algorithms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    inner: StableGraph<String, Option<f64>, Directed, u32>,
    directed: bool,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new(directed: bool) -> Self {
        Graph {
            inner: StableGraph::new(),
            directed,
        }
    }

    /// Whether edges are interpreted as directed.
    pub fn directed(&self) -> bool {
        self.directed
    }

    /// Adds a node with the given label, returning its id.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        NodeId::from(self.inner.add_node(label.into()))
    }

    /// Adds an edge between two existing nodes.
    ///
    /// Both endpoints must exist. Returns the new [`EdgeId`].
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Option<f64>,
    ) -> Result<EdgeId, CoreError> {
        let from_idx: NodeIndex<u32> = from.into();
        let to_idx: NodeIndex<u32> = to.into();

        if !self.inner.contains_node(from_idx) {
            return Err(CoreError::NodeNotFound { id: from });
        }
        if !self.inner.contains_node(to_idx) {
            return Err(CoreError::NodeNotFound { id: to });
        }

        let idx = self.inner.add_edge(from_idx, to_idx, weight);
        Ok(EdgeId(idx.index() as u32))
    }

    /// Returns true if the node id is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.contains_node(id.into())
    }

    /// Looks up a node's label.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.inner.node_weight(id.into()).map(|s| s.as_str())
    }

    /// Finds the first node whose label equals `label`, in insertion order.
    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.inner
            .node_indices()
            .find(|&idx| self.inner[idx] == label)
            .map(NodeId::from)
    }

    /// All node ids in insertion order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.inner.node_indices().map(NodeId::from).collect()
    }

    /// All edges as `(from, to, weight)` in insertion order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId, Option<f64>)> {
        self.inner
            .edge_references()
            .map(|e| (NodeId::from(e.source()), NodeId::from(e.target()), *e.weight()))
            .collect()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Enumerates the neighbors of `node` in edge-list order.
    ///
    /// Scans every edge in insertion order; an edge contributes its target
    /// when it leaves `node` and, in undirected graphs, its source when it
    /// arrives at `node`. Duplicates keep their first-seen position.
    pub fn neighbors(&self, node: NodeId) -> SmallVec<[NodeId; 8]> {
        let idx: NodeIndex<u32> = node.into();
        let mut out: SmallVec<[NodeId; 8]> = SmallVec::new();

        for edge in self.inner.edge_references() {
            if edge.source() == idx {
                let id = NodeId::from(edge.target());
                if !out.contains(&id) {
                    out.push(id);
                }
            }
            if !self.directed && edge.target() == idx {
                let id = NodeId::from(edge.source());
                if !out.contains(&id) {
                    out.push(id);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The undirected graph from the BFS contract example:
    /// nodes A..E, edges A-B, A-C, B-C, B-D, C-D, C-E, D-E.
    fn sample_graph() -> (Graph, Vec<NodeId>) {
        let mut g = Graph::new(false);
        let ids: Vec<NodeId> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|l| g.add_node(*l))
            .collect();
        for (f, t) in [(0, 1), (0, 2), (1, 2), (1, 3), (2, 3), (2, 4), (3, 4)] {
            g.add_edge(ids[f], ids[t], None).unwrap();
        }
        (g, ids)
    }

    fn labels(g: &Graph, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| g.label(id).map(|s| s.to_string()))
            .collect()
    }

    #[test]
    fn construction_and_counts() {
        let (g, _) = sample_graph();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 7);
        assert!(!g.directed());
    }

    #[test]
    fn neighbors_follow_edge_list_order() {
        let (g, ids) = sample_graph();

        // A touches edges A-B then A-C.
        assert_eq!(labels(&g, &g.neighbors(ids[0])), vec!["B", "C"]);
        // B touches A-B (as target), B-C, B-D.
        assert_eq!(labels(&g, &g.neighbors(ids[1])), vec!["A", "C", "D"]);
        // C touches A-C, B-C, C-D, C-E.
        assert_eq!(labels(&g, &g.neighbors(ids[2])), vec!["A", "B", "D", "E"]);
    }

    #[test]
    fn directed_neighbors_ignore_incoming_edges() {
        let mut g = Graph::new(true);
        let a = g.add_node("A");
        let b = g.add_node("B");
        let c = g.add_node("C");
        g.add_edge(a, b, None).unwrap();
        g.add_edge(c, a, None).unwrap();

        assert_eq!(labels(&g, &g.neighbors(a)), vec!["B"]);
        assert_eq!(labels(&g, &g.neighbors(b)), Vec::<String>::new());
        assert_eq!(labels(&g, &g.neighbors(c)), vec!["A"]);
    }

    #[test]
    fn parallel_edges_deduplicate() {
        let mut g = Graph::new(false);
        let a = g.add_node("A");
        let b = g.add_node("B");
        g.add_edge(a, b, None).unwrap();
        g.add_edge(b, a, None).unwrap();

        assert_eq!(labels(&g, &g.neighbors(a)), vec!["B"]);
        assert_eq!(labels(&g, &g.neighbors(b)), vec!["A"]);
    }

    #[test]
    fn add_edge_missing_endpoint_errors() {
        let mut g = Graph::new(false);
        let a = g.add_node("A");
        let ghost = NodeId(99);

        match g.add_edge(a, ghost, None) {
            Err(CoreError::NodeNotFound { id }) => assert_eq!(id, ghost),
            other => panic!("expected NodeNotFound, got {:?}", other),
        }
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn label_lookup_both_directions() {
        let (g, ids) = sample_graph();
        assert_eq!(g.label(ids[3]), Some("D"));
        assert_eq!(g.node_by_label("D"), Some(ids[3]));
        assert_eq!(g.node_by_label("Z"), None);
        assert_eq!(g.label(NodeId(42)), None);
    }

    #[test]
    fn edge_weights_are_preserved() {
        let mut g = Graph::new(true);
        let a = g.add_node("A");
        let b = g.add_node("B");
        g.add_edge(a, b, Some(2.5)).unwrap();
        g.add_edge(b, a, None).unwrap();

        let edges = g.edges();
        assert_eq!(edges, vec![(a, b, Some(2.5)), (b, a, None)]);
    }

    #[test]
    fn serde_roundtrip_preserves_structure() {
        let (g, ids) = sample_graph();
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();

        assert_eq!(back.node_count(), g.node_count());
        assert_eq!(back.edge_count(), g.edge_count());
        assert_eq!(back.directed(), g.directed());
        assert_eq!(
            labels(&back, &back.neighbors(ids[2])),
            vec!["A", "B", "D", "E"]
        );
    }
}
