//! Seeded random input generators for demos and tests.
//!
//! All generators take an explicit `u64` seed and run a `ChaCha8Rng`, so
//! the same seed always yields the same input -- and therefore, by the
//! determinism invariant, the same trace.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stepviz_core::Graph;

use crate::tree::Bst;

/// A random array of `len` values drawn uniformly from `min..=max`.
pub fn random_array(len: usize, min: i64, max: i64, seed: u64) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(min..=max)).collect()
}

/// A BST built by inserting `size` random values in generation order.
pub fn random_bst(size: usize, min: i64, max: i64, seed: u64) -> Bst<i64> {
    Bst::from_values(random_array(size, min, max, seed))
}

/// A random graph with `nodes` nodes (labeled `N0`, `N1`, ...) and up to
/// `edges` edges; self-loops are skipped, parallel edges allowed (neighbor
/// enumeration de-duplicates them).
pub fn random_graph(nodes: usize, edges: usize, directed: bool, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = Graph::new(directed);

    let ids: Vec<_> = (0..nodes)
        .map(|i| graph.add_node(format!("N{}", i)))
        .collect();

    if nodes > 1 {
        for _ in 0..edges {
            let from = rng.gen_range(0..nodes);
            let to = rng.gen_range(0..nodes);
            if from != to {
                // Endpoints come straight from the id list, so this cannot fail.
                let _ = graph.add_edge(ids[from], ids[to], None);
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_array() {
        let a = random_array(16, -50, 50, 7);
        let b = random_array(16, -50, 50, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.iter().all(|v| (-50..=50).contains(v)));
    }

    #[test]
    fn different_seeds_diverge() {
        // 16 draws over a 101-value range colliding across seeds would be
        // astronomically unlucky; a deterministic generator makes this exact.
        assert_ne!(random_array(16, -50, 50, 1), random_array(16, -50, 50, 2));
    }

    #[test]
    fn random_bst_is_ordered() {
        let tree = random_bst(24, 0, 100, 42);
        assert_eq!(tree.len(), 24);
        let values = tree.in_order().result;
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn random_graph_shape() {
        let g = random_graph(8, 12, false, 3);
        assert_eq!(g.node_count(), 8);
        assert!(g.edge_count() <= 12);
        assert_eq!(g.label(g.nodes()[0]), Some("N0"));

        let same = random_graph(8, 12, false, 3);
        assert_eq!(g.edges(), same.edges());
    }

    #[test]
    fn single_node_graph_has_no_edges() {
        let g = random_graph(1, 10, true, 9);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }
}
