//! Cross-family contract tests: the testable properties every tracer must
//! hold, exercised through the public API only.

use stepviz_algos::{
    bfs, binary_search, bubble_sort, dfs, dfs_topological_sort, merge_sort, quick_sort, Bst,
    GraphStep,
};
use stepviz_core::{Graph, NodeId, StepRecord, Trace};

fn contract_graph() -> (Graph, Vec<NodeId>) {
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

#[test]
fn all_sorts_agree_with_each_other() {
    let input = vec![42, -7, 13, 0, 42, 99, -100, 5];
    let bubble = bubble_sort(&input).result;
    let quick = quick_sort(&input).result;
    let merge = merge_sort(&input).result;

    let mut expected = input.clone();
    expected.sort();
    assert_eq!(bubble, expected);
    assert_eq!(quick, expected);
    assert_eq!(merge, expected);
}

#[test]
fn sorted_output_feeds_binary_search() {
    let input = vec![81, 10, 56, 95, 23, 74, 42, 100, 35, 68];
    let sorted = merge_sort(&input).result;
    assert_eq!(sorted, vec![10, 23, 35, 42, 56, 68, 74, 81, 95, 100]);

    let trace = binary_search(&sorted, &56);
    assert_eq!(trace.result, Some(4));
    assert!(trace.count("check") <= 4);
}

#[test]
fn swap_count_equals_adjacent_inversions_resolved() {
    // Bubble sort resolves exactly one inversion per swap.
    let input = vec![5i64, 3, 8, 1];
    let mut inversions = 0;
    for i in 0..input.len() {
        for j in i + 1..input.len() {
            if input[i] > input[j] {
                inversions += 1;
            }
        }
    }
    assert_eq!(bubble_sort(&input).count("swap"), inversions);
}

#[test]
fn bfs_and_dfs_visit_every_node_once() {
    let (g, ids) = contract_graph();
    let bfs_order = bfs(&g, ids[0]).unwrap().result;
    let dfs_order = dfs(&g, ids[0]).unwrap().result;

    assert_eq!(bfs_order, vec!["A", "B", "C", "D", "E"]);
    assert_eq!(dfs_order.len(), 5);
    let mut sorted = dfs_order.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn graph_trace_survives_json_roundtrip() {
    let (g, ids) = contract_graph();
    let trace = bfs(&g, ids[0]).unwrap();

    let json = serde_json::to_string(&trace).unwrap();
    let back: Trace<Vec<String>, GraphStep> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, trace);
}

#[test]
fn every_step_has_a_kind_and_message() {
    let (g, ids) = contract_graph();
    let trace = bfs(&g, ids[0]).unwrap();
    for step in &trace.steps {
        assert!(!step.kind().is_empty());
        assert!(!step.to_string().is_empty());
    }
}

#[test]
fn topological_order_is_a_valid_linearization() {
    let mut g = Graph::new(true);
    let labels = ["A", "B", "C", "D", "E"];
    let ids: Vec<NodeId> = labels.iter().map(|l| g.add_node(*l)).collect();
    for (f, t) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)] {
        g.add_edge(ids[f], ids[t], None).unwrap();
    }

    let order = dfs_topological_sort(&g).result.unwrap();
    let pos = |l: &str| order.iter().position(|x| x == l).unwrap();
    for (f, t) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)] {
        assert!(pos(labels[f]) < pos(labels[t]));
    }
}

#[test]
fn bst_round_trip_through_delete() {
    // Build, delete the root, and verify the exact reshaped tree.
    let mut tree = Bst::from_values([50, 30, 70, 20, 40, 60, 80]);
    let trace = tree.remove(&50);
    assert!(trace.result);

    assert_eq!(tree.in_order().result, vec![20, 30, 40, 60, 70, 80]);
    assert_eq!(tree.pre_order().result, vec![60, 30, 20, 40, 70, 80]);
}

#[test]
fn traced_operations_never_disturb_untouched_state() {
    let mut tree = Bst::from_values([50, 30, 70]);
    let before = tree.in_order().result;

    // A failed search and a failed delete leave the tree as it was.
    assert!(!tree.search(&99).result);
    assert!(!tree.remove(&99).result);
    assert_eq!(tree.in_order().result, before);
}
