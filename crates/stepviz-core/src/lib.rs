pub mod error;
pub mod graph;
pub mod id;
pub mod trace;

// Re-export commonly used types
pub use error::CoreError;
pub use graph::Graph;
pub use id::{EdgeId, NodeId};
pub use trace::{StepRecord, Trace, TraceBuilder, TraceSummary};
