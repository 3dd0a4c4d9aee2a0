//! Traced sorting algorithms: bubble, quick (Lomuto), and merge sort.
//!
//! Each function operates on an owned copy of its input and emits a
//! [`SortStep`] for every comparison, swap, array write, and finalized
//! position, in exactly the order the algorithm performs them. Recursive
//! helpers thread the [`TraceBuilder`] through every call so steps land in
//! call order.

use std::fmt;

use serde::{Deserialize, Serialize};
use stepviz_core::{StepRecord, Trace, TraceBuilder};

/// One micro-action of a sorting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SortStep<T> {
    /// Two positions are about to be compared.
    Compare { left: usize, right: usize },
    /// The elements at two positions were exchanged.
    Swap { left: usize, right: usize },
    /// A value was written into a position (merge step).
    Overwrite { index: usize, value: T },
    /// A position reached its final sorted place.
    Sorted { index: usize },
}

impl<T: fmt::Display> fmt::Display for SortStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortStep::Compare { left, right } => {
                write!(f, "compare indices {} and {}", left, right)
            }
            SortStep::Swap { left, right } => write!(f, "swap indices {} and {}", left, right),
            SortStep::Overwrite { index, value } => {
                write!(f, "overwrite index {} with {}", index, value)
            }
            SortStep::Sorted { index } => write!(f, "index {} is in final position", index),
        }
    }
}

impl<T: fmt::Display> StepRecord for SortStep<T> {
    fn kind(&self) -> &'static str {
        match self {
            SortStep::Compare { .. } => "compare",
            SortStep::Swap { .. } => "swap",
            SortStep::Overwrite { .. } => "overwrite",
            SortStep::Sorted { .. } => "sorted",
        }
    }
}

/// Bubble sort: adjacent compare/swap passes, each pass finalizing one more
/// position at the tail of the unsorted prefix.
///
/// Emits `compare` before every comparison, `swap` only when a swap happens,
/// and `sorted` for each finalized position (including index 0 at the end
/// on non-empty input).
pub fn bubble_sort<T: Ord + Clone>(input: &[T]) -> Trace<Vec<T>, SortStep<T>> {
    let mut arr = input.to_vec();
    let mut steps = TraceBuilder::new();
    let n = arr.len();

    if n > 0 {
        for i in 0..n - 1 {
            for j in 0..n - i - 1 {
                steps.push(SortStep::Compare {
                    left: j,
                    right: j + 1,
                });
                if arr[j] > arr[j + 1] {
                    steps.push(SortStep::Swap {
                        left: j,
                        right: j + 1,
                    });
                    arr.swap(j, j + 1);
                }
            }
            steps.push(SortStep::Sorted { index: n - i - 1 });
        }
        steps.push(SortStep::Sorted { index: 0 });
    }

    steps.finish(arr)
}

/// Quick sort with Lomuto partitioning, last element as pivot.
///
/// Emits `compare` for every element-vs-pivot comparison and `swap` for
/// every move the partition invariant requires -- including degenerate
/// self-swaps and the final pivot placement. Recurses into the left
/// partition, then the right.
pub fn quick_sort<T: Ord + Clone>(input: &[T]) -> Trace<Vec<T>, SortStep<T>> {
    let mut arr = input.to_vec();
    let mut steps = TraceBuilder::new();

    if !arr.is_empty() {
        let high = arr.len() - 1;
        quick_sort_range(&mut arr, 0, high, &mut steps);
    }

    steps.finish(arr)
}

fn quick_sort_range<T: Ord + Clone>(
    arr: &mut [T],
    low: usize,
    high: usize,
    steps: &mut TraceBuilder<SortStep<T>>,
) {
    if low < high {
        let pivot = partition(arr, low, high, steps);
        if pivot > 0 {
            quick_sort_range(arr, low, pivot - 1, steps);
        }
        quick_sort_range(arr, pivot + 1, high, steps);
    }
}

/// Lomuto partition over `arr[low..=high]` with `arr[high]` as pivot.
/// Returns the pivot's final index.
fn partition<T: Ord + Clone>(
    arr: &mut [T],
    low: usize,
    high: usize,
    steps: &mut TraceBuilder<SortStep<T>>,
) -> usize {
    // Next slot for an element smaller than the pivot.
    let mut i = low;

    for j in low..high {
        steps.push(SortStep::Compare {
            left: j,
            right: high,
        });
        if arr[j] < arr[high] {
            steps.push(SortStep::Swap { left: i, right: j });
            arr.swap(i, j);
            i += 1;
        }
    }

    steps.push(SortStep::Swap {
        left: i,
        right: high,
    });
    arr.swap(i, high);
    i
}

/// Top-down merge sort with midpoint split.
///
/// Emits `compare` for each element-vs-element comparison during the merge
/// and `overwrite` for every write into the working array, in left-to-right
/// merge order, drain loops included.
pub fn merge_sort<T: Ord + Clone>(input: &[T]) -> Trace<Vec<T>, SortStep<T>> {
    let mut arr = input.to_vec();
    let mut steps = TraceBuilder::new();

    if !arr.is_empty() {
        let high = arr.len() - 1;
        merge_sort_range(&mut arr, 0, high, &mut steps);
    }

    steps.finish(arr)
}

fn merge_sort_range<T: Ord + Clone>(
    arr: &mut [T],
    l: usize,
    r: usize,
    steps: &mut TraceBuilder<SortStep<T>>,
) {
    if l >= r {
        return;
    }
    let m = (l + r) / 2;
    merge_sort_range(arr, l, m, steps);
    merge_sort_range(arr, m + 1, r, steps);
    merge(arr, l, m, r, steps);
}

/// Merges the sorted runs `arr[l..=m]` and `arr[m+1..=r]` in place.
fn merge<T: Ord + Clone>(
    arr: &mut [T],
    l: usize,
    m: usize,
    r: usize,
    steps: &mut TraceBuilder<SortStep<T>>,
) {
    let left: Vec<T> = arr[l..=m].to_vec();
    let right: Vec<T> = arr[m + 1..=r].to_vec();

    let mut i = 0;
    let mut j = 0;
    let mut k = l;

    while i < left.len() && j < right.len() {
        steps.push(SortStep::Compare {
            left: l + i,
            right: m + 1 + j,
        });
        if left[i] <= right[j] {
            steps.push(SortStep::Overwrite {
                index: k,
                value: left[i].clone(),
            });
            arr[k] = left[i].clone();
            i += 1;
        } else {
            steps.push(SortStep::Overwrite {
                index: k,
                value: right[j].clone(),
            });
            arr[k] = right[j].clone();
            j += 1;
        }
        k += 1;
    }

    while i < left.len() {
        steps.push(SortStep::Overwrite {
            index: k,
            value: left[i].clone(),
        });
        arr[k] = left[i].clone();
        i += 1;
        k += 1;
    }

    while j < right.len() {
        steps.push(SortStep::Overwrite {
            index: k,
            value: right[j].clone(),
        });
        arr[k] = right[j].clone();
        j += 1;
        k += 1;
    }
}
