//! Traced searching algorithms: linear and binary search.

use std::fmt;

use serde::{Deserialize, Serialize};
use stepviz_core::{StepRecord, Trace, TraceBuilder};

/// One micro-action of a search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SearchStep {
    /// A position is examined.
    Check { index: usize },
    /// The target was found at a position.
    Found { index: usize },
    /// Binary search discarded the inclusive index range `low..=high`.
    Eliminate { low: usize, high: usize },
    /// The target is not present.
    NotFound,
}

impl fmt::Display for SearchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStep::Check { index } => write!(f, "check index {}", index),
            SearchStep::Found { index } => write!(f, "found at index {}", index),
            SearchStep::Eliminate { low, high } => {
                write!(f, "eliminate indices {} through {}", low, high)
            }
            SearchStep::NotFound => write!(f, "target not found"),
        }
    }
}

impl StepRecord for SearchStep {
    fn kind(&self) -> &'static str {
        match self {
            SearchStep::Check { .. } => "check",
            SearchStep::Found { .. } => "found",
            SearchStep::Eliminate { .. } => "eliminate",
            SearchStep::NotFound => "not-found",
        }
    }
}

/// Linear search: one `check` per index in order, `found` with an early
/// return on the first match, else a terminal `not-found`.
pub fn linear_search<T: PartialEq>(input: &[T], target: &T) -> Trace<Option<usize>, SearchStep> {
    let mut steps = TraceBuilder::new();

    for (i, item) in input.iter().enumerate() {
        steps.push(SearchStep::Check { index: i });
        if item == target {
            steps.push(SearchStep::Found { index: i });
            return steps.finish(Some(i));
        }
    }

    steps.push(SearchStep::NotFound);
    steps.finish(None)
}

/// Binary search over a sorted ascending slice.
///
/// Repeatedly computes `mid = floor((left + right) / 2)` over an inclusive
/// interval; emits `check`, then either `found` or an `eliminate` naming
/// the discarded half's boundary indices before narrowing. Terminal
/// `not-found` when the interval empties.
///
/// The input must already be sorted; validating that is the caller's job.
pub fn binary_search<T: Ord>(input: &[T], target: &T) -> Trace<Option<usize>, SearchStep> {
    let mut steps = TraceBuilder::new();

    let mut left: isize = 0;
    let mut right: isize = input.len() as isize - 1;

    while left <= right {
        let mid = ((left + right) / 2) as usize;
        steps.push(SearchStep::Check { index: mid });

        match input[mid].cmp(target) {
            std::cmp::Ordering::Equal => {
                steps.push(SearchStep::Found { index: mid });
                return steps.finish(Some(mid));
            }
            std::cmp::Ordering::Less => {
                steps.push(SearchStep::Eliminate {
                    low: left as usize,
                    high: mid,
                });
                left = mid as isize + 1;
            }
            std::cmp::Ordering::Greater => {
                steps.push(SearchStep::Eliminate {
                    low: mid,
                    high: right as usize,
                });
                right = mid as isize - 1;
            }
        }
    }

    steps.push(SearchStep::NotFound);
    steps.finish(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn linear_search_finds_and_stops() {
        let trace = linear_search(&[10, 23, 35], &23);
        assert_eq!(trace.result, Some(1));
        assert_eq!(
            trace.steps,
            vec![
                SearchStep::Check { index: 0 },
                SearchStep::Check { index: 1 },
                SearchStep::Found { index: 1 },
            ]
        );
    }

    #[test]
    fn linear_search_exhausts_to_not_found() {
        let trace = linear_search(&[10, 23, 35], &99);
        assert_eq!(trace.result, None);
        assert_eq!(trace.count("check"), 3);
        assert_eq!(trace.steps.last(), Some(&SearchStep::NotFound));
    }

    #[test]
    fn linear_search_empty_input() {
        let trace = linear_search::<i32>(&[], &5);
        assert_eq!(trace.result, None);
        assert_eq!(trace.steps, vec![SearchStep::NotFound]);
    }

    #[test]
    fn binary_search_contract_example() {
        // Spec example: mid of 0..=9 is 4, which already holds the target.
        let arr = [10, 23, 35, 42, 56, 68, 74, 81, 95, 100];
        let trace = binary_search(&arr, &56);
        assert_eq!(trace.result, Some(4));
        assert_eq!(
            trace.steps,
            vec![
                SearchStep::Check { index: 4 },
                SearchStep::Found { index: 4 },
            ]
        );
        // log2(10) rounds up to 4 probes at most.
        assert!(trace.count("check") <= 4);
    }

    #[test]
    fn binary_search_narrows_rightward() {
        let arr = [10, 23, 35, 42, 56, 68, 74, 81, 95, 100];
        let trace = binary_search(&arr, &95);
        assert_eq!(trace.result, Some(8));
        assert_eq!(
            trace.steps,
            vec![
                SearchStep::Check { index: 4 },
                SearchStep::Eliminate { low: 0, high: 4 },
                SearchStep::Check { index: 7 },
                SearchStep::Eliminate { low: 5, high: 7 },
                SearchStep::Check { index: 8 },
                SearchStep::Found { index: 8 },
            ]
        );
    }

    #[test]
    fn binary_search_missing_target_below_minimum() {
        // Drives `right` past the left edge without underflow.
        let arr = [10, 23, 35, 42, 56, 68, 74, 81, 95, 100];
        let trace = binary_search(&arr, &1);
        assert_eq!(trace.result, None);
        assert_eq!(trace.steps.last(), Some(&SearchStep::NotFound));
        // Probes mid 4, then 1, then 0 before the interval empties.
        assert_eq!(trace.count("check"), 3);
    }

    #[test]
    fn binary_search_empty_input() {
        let trace = binary_search::<i32>(&[], &5);
        assert_eq!(trace.result, None);
        assert_eq!(trace.steps, vec![SearchStep::NotFound]);
    }

    #[test]
    fn step_messages() {
        insta::assert_snapshot!(SearchStep::Check { index: 4 }.to_string(), @"check index 4");
        insta::assert_snapshot!(
            SearchStep::Eliminate { low: 0, high: 4 }.to_string(),
            @"eliminate indices 0 through 4"
        );
        insta::assert_snapshot!(SearchStep::NotFound.to_string(), @"target not found");
    }

    #[test]
    fn not_found_serde_shape() {
        let json = serde_json::to_string(&SearchStep::NotFound).unwrap();
        assert_eq!(json, r#"{"kind":"not-found"}"#);
    }

    proptest! {
        #[test]
        fn binary_matches_reference_on_sorted_input(
            mut v in proptest::collection::vec(-500i64..500, 0..48),
            target in -500i64..500,
        ) {
            v.sort();
            v.dedup();
            let trace = binary_search(&v, &target);
            match trace.result {
                Some(i) => prop_assert_eq!(v[i], target),
                None => prop_assert!(!v.contains(&target)),
            }
        }

        #[test]
        fn linear_matches_reference(
            v in proptest::collection::vec(-50i64..50, 0..32),
            target in -50i64..50,
        ) {
            let trace = linear_search(&v, &target);
            prop_assert_eq!(trace.result, v.iter().position(|x| x == &target));
        }
    }
}
