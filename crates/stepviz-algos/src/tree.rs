//! Traced binary search tree operations.
//!
//! [`Bst`] owns its nodes through `Box` links; insertion order determines
//! shape (no rebalancing). The ordering invariant is left `<` node,
//! right `>=` node -- duplicate values go right.
//!
//! Deletion reproduces the classical in-order-successor strategy exactly:
//! a two-child node takes the value of the leftmost node of its right
//! subtree, then that successor is deleted recursively from the right
//! subtree. The resulting shape depends on this choice, so it is part of
//! the contract, not an implementation detail.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use stepviz_core::{StepRecord, Trace, TraceBuilder};

/// One micro-action of a BST operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TreeStep<T> {
    /// The tree was empty; the value becomes the root.
    InsertRoot { value: T },
    /// An insert walk examined a node.
    Compare { node: T, value: T },
    /// The value was attached as a left child.
    InsertLeft { parent: T, value: T },
    /// The value was attached as a right child.
    InsertRight { parent: T, value: T },
    /// A search/delete walk examined a node.
    Visit { node: T },
    /// The walk moved into the left subtree.
    GoLeft { node: T },
    /// The walk moved into the right subtree.
    GoRight { node: T },
    /// The target value was found.
    Found { value: T },
    /// The target value is not in the tree.
    NotFound { value: T },
    /// Deletion located its target node.
    FoundDelete { value: T },
    /// The target was a leaf and was removed outright.
    DeleteLeaf { value: T },
    /// The target had one child, which took its place.
    ReplaceWithChild { value: T, replacement: T },
    /// The target had two children; its in-order successor replaces it.
    FindSuccessor { node: T, successor: T },
}

impl<T: fmt::Display> fmt::Display for TreeStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeStep::InsertRoot { value } => write!(f, "insert {} as root", value),
            TreeStep::Compare { node, value } => {
                write!(f, "compare {} against node {}", value, node)
            }
            TreeStep::InsertLeft { parent, value } => {
                write!(f, "insert {} as left child of {}", value, parent)
            }
            TreeStep::InsertRight { parent, value } => {
                write!(f, "insert {} as right child of {}", value, parent)
            }
            TreeStep::Visit { node } => write!(f, "visit node {}", node),
            TreeStep::GoLeft { node } => write!(f, "go left from {}", node),
            TreeStep::GoRight { node } => write!(f, "go right from {}", node),
            TreeStep::Found { value } => write!(f, "found {}", value),
            TreeStep::NotFound { value } => write!(f, "{} not found", value),
            TreeStep::FoundDelete { value } => write!(f, "found {} for deletion", value),
            TreeStep::DeleteLeaf { value } => write!(f, "remove leaf {}", value),
            TreeStep::ReplaceWithChild { value, replacement } => {
                write!(f, "replace {} with its child {}", value, replacement)
            }
            TreeStep::FindSuccessor { node, successor } => {
                write!(f, "in-order successor of {} is {}", node, successor)
            }
        }
    }
}

impl<T: fmt::Display> StepRecord for TreeStep<T> {
    fn kind(&self) -> &'static str {
        match self {
            TreeStep::InsertRoot { .. } => "insert-root",
            TreeStep::Compare { .. } => "compare",
            TreeStep::InsertLeft { .. } => "insert-left",
            TreeStep::InsertRight { .. } => "insert-right",
            TreeStep::Visit { .. } => "visit",
            TreeStep::GoLeft { .. } => "go-left",
            TreeStep::GoRight { .. } => "go-right",
            TreeStep::Found { .. } => "found",
            TreeStep::NotFound { .. } => "not-found",
            TreeStep::FoundDelete { .. } => "found-delete",
            TreeStep::DeleteLeaf { .. } => "delete-leaf",
            TreeStep::ReplaceWithChild { .. } => "replace-with-child",
            TreeStep::FindSuccessor { .. } => "find-successor",
        }
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn new(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            left: None,
            right: None,
        })
    }
}

/// An unbalanced binary search tree with traced operations.
#[derive(Debug, Clone, Default)]
pub struct Bst<T> {
    root: Option<Box<Node<T>>>,
    size: usize,
}

impl<T: Ord + Clone> Bst<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Bst {
            root: None,
            size: 0,
        }
    }

    /// Builds a tree by inserting values in order, discarding the traces.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut tree = Bst::new();
        for value in values {
            let _ = tree.insert(value);
        }
        tree
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Height of the tree (0 when empty).
    pub fn height(&self) -> usize {
        fn walk<T>(node: &Option<Box<Node<T>>>) -> usize {
            match node {
                None => 0,
                Some(n) => 1 + walk(&n.left).max(walk(&n.right)),
            }
        }
        walk(&self.root)
    }

    /// Inserts a value, walking from the root until an empty child slot.
    ///
    /// Emits `compare` per node examined and a terminal `insert-root` /
    /// `insert-left` / `insert-right`. Values `<` a node go left,
    /// everything else right (right-biased ties).
    pub fn insert(&mut self, value: T) -> Trace<(), TreeStep<T>> {
        let mut steps = TraceBuilder::new();

        match self.root {
            None => {
                steps.push(TreeStep::InsertRoot {
                    value: value.clone(),
                });
                self.root = Some(Node::new(value));
            }
            Some(ref mut root) => Self::insert_walk(root, value, &mut steps),
        }

        self.size += 1;
        steps.finish(())
    }

    fn insert_walk(node: &mut Box<Node<T>>, value: T, steps: &mut TraceBuilder<TreeStep<T>>) {
        steps.push(TreeStep::Compare {
            node: node.value.clone(),
            value: value.clone(),
        });

        if value < node.value {
            match node.left {
                Some(ref mut left) => Self::insert_walk(left, value, steps),
                None => {
                    steps.push(TreeStep::InsertLeft {
                        parent: node.value.clone(),
                        value: value.clone(),
                    });
                    node.left = Some(Node::new(value));
                }
            }
        } else {
            match node.right {
                Some(ref mut right) => Self::insert_walk(right, value, steps),
                None => {
                    steps.push(TreeStep::InsertRight {
                        parent: node.value.clone(),
                        value: value.clone(),
                    });
                    node.right = Some(Node::new(value));
                }
            }
        }
    }

    /// Searches for a value; the same walk as insert, terminating in
    /// `found` or `not-found`.
    pub fn search(&self, value: &T) -> Trace<bool, TreeStep<T>> {
        let mut steps = TraceBuilder::new();
        let found = Self::search_walk(&self.root, value, &mut steps);
        steps.finish(found)
    }

    fn search_walk(
        node: &Option<Box<Node<T>>>,
        value: &T,
        steps: &mut TraceBuilder<TreeStep<T>>,
    ) -> bool {
        let Some(node) = node else {
            steps.push(TreeStep::NotFound {
                value: value.clone(),
            });
            return false;
        };

        steps.push(TreeStep::Visit {
            node: node.value.clone(),
        });

        match value.cmp(&node.value) {
            Ordering::Equal => {
                steps.push(TreeStep::Found {
                    value: value.clone(),
                });
                true
            }
            Ordering::Less => {
                steps.push(TreeStep::GoLeft {
                    node: node.value.clone(),
                });
                Self::search_walk(&node.left, value, steps)
            }
            Ordering::Greater => {
                steps.push(TreeStep::GoRight {
                    node: node.value.clone(),
                });
                Self::search_walk(&node.right, value, steps)
            }
        }
    }

    /// Removes a value, returning whether it was present.
    ///
    /// Locates the node with the same visit steps as [`search`](Self::search),
    /// then: leaf -> removed outright; one child -> the child takes its
    /// place; two children -> the in-order successor's value replaces the
    /// node's and the successor is deleted from the right subtree.
    pub fn remove(&mut self, value: &T) -> Trace<bool, TreeStep<T>> {
        let mut steps = TraceBuilder::new();
        let mut removed = false;
        self.root = Self::remove_walk(self.root.take(), value, &mut steps, &mut removed);
        if removed {
            self.size -= 1;
        }
        steps.finish(removed)
    }

    fn remove_walk(
        node: Option<Box<Node<T>>>,
        value: &T,
        steps: &mut TraceBuilder<TreeStep<T>>,
        removed: &mut bool,
    ) -> Option<Box<Node<T>>> {
        let Some(mut node) = node else {
            steps.push(TreeStep::NotFound {
                value: value.clone(),
            });
            return None;
        };

        steps.push(TreeStep::Visit {
            node: node.value.clone(),
        });

        match value.cmp(&node.value) {
            Ordering::Less => {
                steps.push(TreeStep::GoLeft {
                    node: node.value.clone(),
                });
                node.left = Self::remove_walk(node.left.take(), value, steps, removed);
                Some(node)
            }
            Ordering::Greater => {
                steps.push(TreeStep::GoRight {
                    node: node.value.clone(),
                });
                node.right = Self::remove_walk(node.right.take(), value, steps, removed);
                Some(node)
            }
            Ordering::Equal => {
                *removed = true;
                steps.push(TreeStep::FoundDelete {
                    value: node.value.clone(),
                });

                match (node.left.take(), node.right.take()) {
                    (None, None) => {
                        steps.push(TreeStep::DeleteLeaf {
                            value: node.value.clone(),
                        });
                        None
                    }
                    (Some(child), None) | (None, Some(child)) => {
                        steps.push(TreeStep::ReplaceWithChild {
                            value: node.value.clone(),
                            replacement: child.value.clone(),
                        });
                        Some(child)
                    }
                    (Some(left), Some(right)) => {
                        let successor = Self::min_value(&right);
                        steps.push(TreeStep::FindSuccessor {
                            node: node.value.clone(),
                            successor: successor.clone(),
                        });
                        node.value = successor;
                        node.left = Some(left);
                        node.right =
                            Self::remove_walk(Some(right), &node.value, steps, removed);
                        Some(node)
                    }
                }
            }
        }
    }

    /// Leftmost value of a subtree.
    fn min_value(node: &Node<T>) -> T {
        let mut current = node;
        while let Some(ref left) = current.left {
            current = left;
        }
        current.value.clone()
    }

    /// In-order traversal: left, node, right.
    pub fn in_order(&self) -> Trace<Vec<T>, TreeStep<T>> {
        let mut steps = TraceBuilder::new();
        let mut out = Vec::new();
        Self::in_order_walk(&self.root, &mut out, &mut steps);
        steps.finish(out)
    }

    fn in_order_walk(
        node: &Option<Box<Node<T>>>,
        out: &mut Vec<T>,
        steps: &mut TraceBuilder<TreeStep<T>>,
    ) {
        if let Some(node) = node {
            steps.push(TreeStep::GoLeft {
                node: node.value.clone(),
            });
            Self::in_order_walk(&node.left, out, steps);

            steps.push(TreeStep::Visit {
                node: node.value.clone(),
            });
            out.push(node.value.clone());

            steps.push(TreeStep::GoRight {
                node: node.value.clone(),
            });
            Self::in_order_walk(&node.right, out, steps);
        }
    }

    /// Pre-order traversal: node, left, right.
    pub fn pre_order(&self) -> Trace<Vec<T>, TreeStep<T>> {
        let mut steps = TraceBuilder::new();
        let mut out = Vec::new();
        Self::pre_order_walk(&self.root, &mut out, &mut steps);
        steps.finish(out)
    }

    fn pre_order_walk(
        node: &Option<Box<Node<T>>>,
        out: &mut Vec<T>,
        steps: &mut TraceBuilder<TreeStep<T>>,
    ) {
        if let Some(node) = node {
            steps.push(TreeStep::Visit {
                node: node.value.clone(),
            });
            out.push(node.value.clone());

            steps.push(TreeStep::GoLeft {
                node: node.value.clone(),
            });
            Self::pre_order_walk(&node.left, out, steps);

            steps.push(TreeStep::GoRight {
                node: node.value.clone(),
            });
            Self::pre_order_walk(&node.right, out, steps);
        }
    }

    /// Post-order traversal: left, right, node.
    pub fn post_order(&self) -> Trace<Vec<T>, TreeStep<T>> {
        let mut steps = TraceBuilder::new();
        let mut out = Vec::new();
        Self::post_order_walk(&self.root, &mut out, &mut steps);
        steps.finish(out)
    }

    fn post_order_walk(
        node: &Option<Box<Node<T>>>,
        out: &mut Vec<T>,
        steps: &mut TraceBuilder<TreeStep<T>>,
    ) {
        if let Some(node) = node {
            steps.push(TreeStep::GoLeft {
                node: node.value.clone(),
            });
            Self::post_order_walk(&node.left, out, steps);

            steps.push(TreeStep::GoRight {
                node: node.value.clone(),
            });
            Self::post_order_walk(&node.right, out, steps);

            steps.push(TreeStep::Visit {
                node: node.value.clone(),
            });
            out.push(node.value.clone());
        }
    }
}
