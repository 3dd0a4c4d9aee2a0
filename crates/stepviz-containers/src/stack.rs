//! Bounded LIFO stack with step instrumentation.

use std::fmt;

use serde::{Deserialize, Serialize};
use stepviz_core::StepRecord;

use crate::error::ContainerError;

/// One recorded stack operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StackStep<T> {
    /// The stack was created with a fixed capacity.
    Create {
        capacity: usize,
        slots: Vec<Option<T>>,
    },
    /// A value was pushed at `index`; snapshot after the write.
    Push {
        value: T,
        index: usize,
        slots: Vec<Option<T>>,
        top: Option<usize>,
    },
    /// A value was popped from `index`; snapshot and `top` after the pop.
    Pop {
        value: T,
        index: usize,
        slots: Vec<Option<T>>,
        top: Option<usize>,
    },
    /// The top value was read without removal.
    Peek { value: T, index: usize },
    /// A search probed the value at `position` (0 = top).
    Check { value: T, position: usize },
    /// A search found the target at `position` from the top.
    Found { value: T, position: usize },
    /// A search exhausted the stack without a match.
    NotFound { value: T },
    /// The attempted operation failed; nothing changed.
    Error {
        error: ContainerError,
        slots: Vec<Option<T>>,
    },
}

impl<T: fmt::Display> fmt::Display for StackStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackStep::Create { capacity, .. } => {
                write!(f, "created stack with capacity {}", capacity)
            }
            StackStep::Push { value, index, .. } => {
                write!(f, "pushed {} to position {}", value, index)
            }
            StackStep::Pop { value, index, .. } => {
                write!(f, "popped {} from position {}", value, index)
            }
            StackStep::Peek { value, .. } => write!(f, "top element is {}", value),
            StackStep::Check { value, position } => {
                write!(f, "check {} at position {} from top", value, position)
            }
            StackStep::Found { value, position } => {
                write!(f, "found {} at position {} from top", value, position)
            }
            StackStep::NotFound { value } => write!(f, "{} not found in stack", value),
            StackStep::Error { error, .. } => write!(f, "error: {}", error),
        }
    }
}

impl<T: fmt::Display> StepRecord for StackStep<T> {
    fn kind(&self) -> &'static str {
        match self {
            StackStep::Create { .. } => "create",
            StackStep::Push { .. } => "push",
            StackStep::Pop { .. } => "pop",
            StackStep::Peek { .. } => "peek",
            StackStep::Check { .. } => "check",
            StackStep::Found { .. } => "found",
            StackStep::NotFound { .. } => "not-found",
            StackStep::Error { .. } => "error",
        }
    }
}

/// A fixed-capacity LIFO stack that records every operation.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    slots: Vec<Option<T>>,
    top: Option<usize>,
    steps: Vec<StackStep<T>>,
}

impl<T: Clone> BoundedStack<T> {
    /// Creates an empty stack with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut stack = BoundedStack {
            slots: (0..capacity).map(|_| None).collect(),
            top: None,
            steps: Vec::new(),
        };
        stack.steps.push(StackStep::Create {
            capacity,
            slots: stack.slots.clone(),
        });
        stack
    }

    /// Fixed capacity of the backing slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.top.map_or(0, |t| t + 1)
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Returns true if no further value can be pushed.
    pub fn is_full(&self) -> bool {
        self.capacity() == 0 || self.top == Some(self.capacity() - 1)
    }

    /// The top cursor, if any value is stored.
    pub fn top(&self) -> Option<usize> {
        self.top
    }

    /// The backing slots, nulls included.
    pub fn contents(&self) -> &[Option<T>] {
        &self.slots
    }

    /// The step log recorded so far.
    pub fn steps(&self) -> &[StackStep<T>] {
        &self.steps
    }

    /// Drains the step log.
    pub fn take_steps(&mut self) -> Vec<StackStep<T>> {
        std::mem::take(&mut self.steps)
    }

    /// Pushes a value on top.
    ///
    /// Fails with [`ContainerError::Overflow`] -- recording an `error` step
    /// and mutating nothing -- when the stack is full.
    pub fn push(&mut self, value: T) -> Result<(), ContainerError> {
        if self.is_full() {
            let error = ContainerError::Overflow {
                capacity: self.capacity(),
            };
            self.steps.push(StackStep::Error {
                error: error.clone(),
                slots: self.slots.clone(),
            });
            return Err(error);
        }

        let index = self.top.map_or(0, |t| t + 1);
        self.top = Some(index);
        self.slots[index] = Some(value.clone());

        self.steps.push(StackStep::Push {
            value,
            index,
            slots: self.slots.clone(),
            top: self.top,
        });
        Ok(())
    }

    /// Removes and returns the top value.
    ///
    /// Fails with [`ContainerError::Underflow`] on an empty stack.
    pub fn pop(&mut self) -> Result<T, ContainerError> {
        let Some(index) = self.top else {
            let error = ContainerError::Underflow;
            self.steps.push(StackStep::Error {
                error: error.clone(),
                slots: self.slots.clone(),
            });
            return Err(error);
        };

        // The top cursor always points at an occupied slot.
        let value = self.slots[index].take().expect("top slot occupied");
        self.top = index.checked_sub(1);

        self.steps.push(StackStep::Pop {
            value: value.clone(),
            index,
            slots: self.slots.clone(),
            top: self.top,
        });
        Ok(value)
    }

    /// Reads the top value without removing it.
    ///
    /// Fails with [`ContainerError::Underflow`] on an empty stack.
    pub fn peek(&mut self) -> Result<T, ContainerError> {
        let Some(index) = self.top else {
            let error = ContainerError::Underflow;
            self.steps.push(StackStep::Error {
                error: error.clone(),
                slots: self.slots.clone(),
            });
            return Err(error);
        };

        let value = self.slots[index].clone().expect("top slot occupied");
        self.steps.push(StackStep::Peek {
            value: value.clone(),
            index,
        });
        Ok(value)
    }
}

impl<T: Clone + PartialEq> BoundedStack<T> {
    /// Scans top-to-bottom for `target`.
    ///
    /// Emits `check` per probe and terminates in `found` (returning the
    /// 0-based distance from the top) or `not-found`.
    pub fn search(&mut self, target: &T) -> Option<usize> {
        if let Some(top) = self.top {
            for index in (0..=top).rev() {
                let position = top - index;
                let value = self.slots[index].clone().expect("occupied below top");
                self.steps.push(StackStep::Check {
                    value: value.clone(),
                    position,
                });
                if &value == target {
                    self.steps.push(StackStep::Found { value, position });
                    return Some(position);
                }
            }
        }

        self.steps.push(StackStep::NotFound {
            value: target.clone(),
        });
        None
    }
}
