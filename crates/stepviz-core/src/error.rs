//! Core error types for stepviz-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of the input graph model.

use crate::id::NodeId;
use thiserror::Error;

/// Core errors produced by the stepviz-core crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A node ID was not found in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },
}
