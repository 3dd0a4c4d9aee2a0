//! Dynamic array with step instrumentation.
//!
//! Unlike the bounded pair, the array cannot overflow: `push`, `pop`, and
//! `get` always succeed, recording an absent value where there was nothing
//! to return. Only an out-of-range `set` is refused, since a fixed-length
//! write target has to exist.

use std::fmt;

use serde::{Deserialize, Serialize};
use stepviz_core::StepRecord;

use crate::error::ContainerError;

/// One recorded array operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ArrayStep<T> {
    /// The array was created with initial contents.
    Create { items: Vec<T> },
    /// A value was appended.
    Push { value: T, items: Vec<T> },
    /// The last value was removed (absent when the array was empty).
    Pop { value: Option<T>, items: Vec<T> },
    /// A position was read (absent when out of range).
    Get { index: usize, value: Option<T> },
    /// A position was overwritten.
    Set {
        index: usize,
        old: T,
        new: T,
        items: Vec<T>,
    },
    /// The attempted operation failed; nothing changed.
    Error {
        error: ContainerError,
        items: Vec<T>,
    },
}

impl<T: fmt::Display> fmt::Display for ArrayStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayStep::Create { items } => write!(f, "created array of {} items", items.len()),
            ArrayStep::Push { value, .. } => write!(f, "pushed {}", value),
            ArrayStep::Pop { value, .. } => match value {
                Some(value) => write!(f, "popped {}", value),
                None => write!(f, "pop on empty array"),
            },
            ArrayStep::Get { index, value } => match value {
                Some(value) => write!(f, "accessed index {}: {}", index, value),
                None => write!(f, "accessed index {}: out of range", index),
            },
            ArrayStep::Set {
                index, old, new, ..
            } => write!(f, "set index {}: {} -> {}", index, old, new),
            ArrayStep::Error { error, .. } => write!(f, "error: {}", error),
        }
    }
}

impl<T: fmt::Display> StepRecord for ArrayStep<T> {
    fn kind(&self) -> &'static str {
        match self {
            ArrayStep::Create { .. } => "create",
            ArrayStep::Push { .. } => "push",
            ArrayStep::Pop { .. } => "pop",
            ArrayStep::Get { .. } => "get",
            ArrayStep::Set { .. } => "set",
            ArrayStep::Error { .. } => "error",
        }
    }
}

/// A growable array that records every operation.
#[derive(Debug, Clone)]
pub struct DynArray<T> {
    items: Vec<T>,
    steps: Vec<ArrayStep<T>>,
}

impl<T: Clone> DynArray<T> {
    /// Creates an array from its initial contents.
    pub fn new(items: Vec<T>) -> Self {
        DynArray {
            steps: vec![ArrayStep::Create {
                items: items.clone(),
            }],
            items,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The stored values.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The step log recorded so far.
    pub fn steps(&self) -> &[ArrayStep<T>] {
        &self.steps
    }

    /// Drains the step log.
    pub fn take_steps(&mut self) -> Vec<ArrayStep<T>> {
        std::mem::take(&mut self.steps)
    }

    /// Appends a value. Never fails.
    pub fn push(&mut self, value: T) {
        self.items.push(value.clone());
        self.steps.push(ArrayStep::Push {
            value,
            items: self.items.clone(),
        });
    }

    /// Removes and returns the last value, if any.
    pub fn pop(&mut self) -> Option<T> {
        let value = self.items.pop();
        self.steps.push(ArrayStep::Pop {
            value: value.clone(),
            items: self.items.clone(),
        });
        value
    }

    /// Reads the value at `index`, if in range.
    pub fn get(&mut self, index: usize) -> Option<T> {
        let value = self.items.get(index).cloned();
        self.steps.push(ArrayStep::Get {
            index,
            value: value.clone(),
        });
        value
    }

    /// Overwrites the value at `index`, returning the previous value.
    ///
    /// Fails with [`ContainerError::OutOfBounds`] -- recording an `error`
    /// step and mutating nothing -- when `index` is outside the current
    /// length.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, ContainerError> {
        if index >= self.items.len() {
            let error = ContainerError::OutOfBounds {
                index,
                len: self.items.len(),
            };
            self.steps.push(ArrayStep::Error {
                error: error.clone(),
                items: self.items.clone(),
            });
            return Err(error);
        }

        let old = std::mem::replace(&mut self.items[index], value.clone());
        self.steps.push(ArrayStep::Set {
            index,
            old: old.clone(),
            new: value,
            items: self.items.clone(),
        });
        Ok(old)
    }
}
