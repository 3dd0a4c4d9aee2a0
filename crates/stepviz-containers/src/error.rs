//! Container failure taxonomy.
//!
//! All failures are ordinary outcomes to narrate, not faults to propagate
//! blindly: every variant also appears inside an `error` step so a consumer
//! can render "nothing happened, here's why".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure outcomes of container operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "fault", rename_all = "kebab-case")]
pub enum ContainerError {
    /// Push/enqueue on a full bounded container.
    #[error("overflow: container is full (capacity {capacity})")]
    Overflow { capacity: usize },

    /// Pop/dequeue/peek on an empty container.
    #[error("underflow: container is empty")]
    Underflow,

    /// Write to an index outside the current length.
    #[error("out of bounds: index {index}, length {len}")]
    OutOfBounds { index: usize, len: usize },
}
