//! The trace data model: ordered step records plus a final result.
//!
//! Every traced algorithm returns a [`Trace`]: the algorithm's final result
//! together with the append-only list of [`StepRecord`]s describing each
//! observable micro-action, in exactly the order the computation performed
//! them. Steps are accumulated through a [`TraceBuilder`] threaded through
//! the call graph -- never a free-floating shared list -- so recursive
//! algorithms splice their steps in call order by construction.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single recorded micro-action of an algorithm's execution.
///
/// Implemented by each algorithm family's step enum. The `kind` tag is the
/// closed identifier matching the serde `kind` tag; the human-readable
/// message is derived from the variant via `Display` and is never an
/// independent source of truth.
pub trait StepRecord: fmt::Display {
    /// The closed kind tag for this step (kebab-case, e.g. `"compare"`).
    fn kind(&self) -> &'static str;
}

/// The ordered step sequence produced by one algorithm invocation, plus the
/// algorithm's final result.
///
/// A trace is fully determined by (algorithm, input): re-running the same
/// algorithm on an equal input reproduces an equal step sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace<R, S> {
    /// The algorithm's final result (sorted array, found index, ...).
    pub result: R,
    /// Every recorded step, in execution order.
    pub steps: Vec<S>,
}

impl<R, S> Trace<R, S> {
    /// Creates a trace from a result and a finished step list.
    pub fn new(result: R, steps: Vec<S>) -> Self {
        Trace { result, steps }
    }
}

impl<R, S: StepRecord> Trace<R, S> {
    /// Counts the steps whose kind tag equals `kind`.
    pub fn count(&self, kind: &str) -> usize {
        self.steps.iter().filter(|s| s.kind() == kind).count()
    }

    /// Aggregates the trace into per-kind counts, in first-seen order.
    pub fn summary(&self) -> TraceSummary {
        let mut by_kind: IndexMap<String, usize> = IndexMap::new();
        for step in &self.steps {
            *by_kind.entry(step.kind().to_string()).or_insert(0) += 1;
        }
        TraceSummary {
            total: self.steps.len(),
            by_kind,
        }
    }
}

/// Per-kind step counts for a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Total number of steps in the trace.
    pub total: usize,
    /// Count per kind tag, keyed in first-seen order.
    pub by_kind: IndexMap<String, usize>,
}

/// Append-only step accumulator threaded through an algorithm's execution.
#[derive(Debug)]
pub struct TraceBuilder<S> {
    steps: Vec<S>,
}

impl<S> TraceBuilder<S> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        TraceBuilder { steps: Vec::new() }
    }

    /// Appends one step.
    pub fn push(&mut self, step: S) {
        self.steps.push(step);
    }

    /// Returns the number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no steps have been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consumes the builder, pairing the steps with the final result.
    pub fn finish<R>(self, result: R) -> Trace<R, S> {
        Trace {
            result,
            steps: self.steps,
        }
    }
}

impl<S> Default for TraceBuilder<S> {
    fn default() -> Self {
        TraceBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal step enum standing in for an algorithm family.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "kebab-case")]
    enum ProbeStep {
        Compare { left: usize, right: usize },
        Swap { left: usize, right: usize },
    }

    impl fmt::Display for ProbeStep {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                ProbeStep::Compare { left, right } => {
                    write!(f, "compare indices {} and {}", left, right)
                }
                ProbeStep::Swap { left, right } => {
                    write!(f, "swap indices {} and {}", left, right)
                }
            }
        }
    }

    impl StepRecord for ProbeStep {
        fn kind(&self) -> &'static str {
            match self {
                ProbeStep::Compare { .. } => "compare",
                ProbeStep::Swap { .. } => "swap",
            }
        }
    }

    fn probe_trace() -> Trace<u32, ProbeStep> {
        let mut builder = TraceBuilder::new();
        builder.push(ProbeStep::Compare { left: 0, right: 1 });
        builder.push(ProbeStep::Swap { left: 0, right: 1 });
        builder.push(ProbeStep::Compare { left: 1, right: 2 });
        builder.finish(7)
    }

    #[test]
    fn builder_preserves_push_order() {
        let trace = probe_trace();
        assert_eq!(trace.result, 7);
        assert_eq!(trace.steps.len(), 3);
        assert_eq!(trace.steps[0], ProbeStep::Compare { left: 0, right: 1 });
        assert_eq!(trace.steps[1], ProbeStep::Swap { left: 0, right: 1 });
        assert_eq!(trace.steps[2], ProbeStep::Compare { left: 1, right: 2 });
    }

    #[test]
    fn count_filters_by_kind() {
        let trace = probe_trace();
        assert_eq!(trace.count("compare"), 2);
        assert_eq!(trace.count("swap"), 1);
        assert_eq!(trace.count("overwrite"), 0);
    }

    #[test]
    fn summary_counts_in_first_seen_order() {
        let summary = probe_trace().summary();
        assert_eq!(summary.total, 3);
        let kinds: Vec<&str> = summary.by_kind.keys().map(|k| k.as_str()).collect();
        assert_eq!(kinds, vec!["compare", "swap"]);
        assert_eq!(summary.by_kind["compare"], 2);
        assert_eq!(summary.by_kind["swap"], 1);
    }

    #[test]
    fn summary_serializes_deterministically() {
        let json = serde_json::to_string(&probe_trace().summary()).unwrap();
        insta::assert_snapshot!(
            json,
            @r#"{"total":3,"by_kind":{"compare":2,"swap":1}}"#
        );
    }

    #[test]
    fn step_serde_uses_kind_tag() {
        let step = ProbeStep::Swap { left: 2, right: 5 };
        let json = serde_json::to_string(&step).unwrap();
        assert_eq!(json, r#"{"kind":"swap","left":2,"right":5}"#);

        let back: ProbeStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn trace_serde_roundtrip() {
        let trace = probe_trace();
        let json = serde_json::to_string(&trace).unwrap();
        let back: Trace<u32, ProbeStep> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }

    #[test]
    fn empty_builder_yields_empty_trace() {
        let builder: TraceBuilder<ProbeStep> = TraceBuilder::new();
        assert!(builder.is_empty());
        let trace = builder.finish(());
        assert!(trace.steps.is_empty());
        assert_eq!(trace.summary().total, 0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn summary_accounts_for_every_step(
                flags in proptest::collection::vec(proptest::bool::ANY, 0..64),
            ) {
                let mut builder = TraceBuilder::new();
                for (i, flag) in flags.iter().enumerate() {
                    if *flag {
                        builder.push(ProbeStep::Compare { left: i, right: i + 1 });
                    } else {
                        builder.push(ProbeStep::Swap { left: i, right: i + 1 });
                    }
                }
                let trace = builder.finish(());
                prop_assert_eq!(trace.summary().total, flags.len());
                prop_assert_eq!(
                    trace.count("compare") + trace.count("swap"),
                    flags.len()
                );
            }
        }
    }
}
