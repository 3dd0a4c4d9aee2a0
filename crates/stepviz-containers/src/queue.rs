//! Bounded FIFO queue with step instrumentation.
//!
//! The queue is linear, not circular: `rear` only moves forward, so a queue
//! whose `rear` has reached the last slot is full even if earlier slots
//! have been dequeued. That matches the sandbox container this models;
//! exhausting the capacity is part of the lesson.

use std::fmt;

use serde::{Deserialize, Serialize};
use stepviz_core::StepRecord;

use crate::error::ContainerError;

/// One recorded queue operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum QueueStep<T> {
    /// The queue was created with a fixed capacity.
    Create {
        capacity: usize,
        slots: Vec<Option<T>>,
    },
    /// A value entered at `index`; snapshot taken after the write.
    Enqueue {
        value: T,
        index: usize,
        slots: Vec<Option<T>>,
        front: Option<usize>,
        rear: Option<usize>,
    },
    /// A value left from `index`; snapshot taken after the slot cleared,
    /// cursors before they advance.
    Dequeue {
        value: T,
        index: usize,
        slots: Vec<Option<T>>,
        front: Option<usize>,
        rear: Option<usize>,
    },
    /// The attempted operation failed; nothing changed.
    Error {
        error: ContainerError,
        slots: Vec<Option<T>>,
    },
}

impl<T: fmt::Display> fmt::Display for QueueStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueStep::Create { capacity, .. } => {
                write!(f, "created queue with capacity {}", capacity)
            }
            QueueStep::Enqueue { value, index, .. } => {
                write!(f, "enqueued {} at position {}", value, index)
            }
            QueueStep::Dequeue { value, index, .. } => {
                write!(f, "dequeued {} from position {}", value, index)
            }
            QueueStep::Error { error, .. } => write!(f, "error: {}", error),
        }
    }
}

impl<T: fmt::Display> StepRecord for QueueStep<T> {
    fn kind(&self) -> &'static str {
        match self {
            QueueStep::Create { .. } => "create",
            QueueStep::Enqueue { .. } => "enqueue",
            QueueStep::Dequeue { .. } => "dequeue",
            QueueStep::Error { .. } => "error",
        }
    }
}

/// A fixed-capacity FIFO queue that records every operation.
#[derive(Debug, Clone)]
pub struct BoundedQueue<T> {
    slots: Vec<Option<T>>,
    front: Option<usize>,
    rear: Option<usize>,
    steps: Vec<QueueStep<T>>,
}

impl<T: Clone> BoundedQueue<T> {
    /// Creates an empty queue with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut queue = BoundedQueue {
            slots: (0..capacity).map(|_| None).collect(),
            front: None,
            rear: None,
            steps: Vec::new(),
        };
        queue.steps.push(QueueStep::Create {
            capacity,
            slots: queue.slots.clone(),
        });
        queue
    }

    /// Fixed capacity of the backing slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    /// Returns true if no further value can be enqueued.
    pub fn is_full(&self) -> bool {
        self.capacity() == 0 || self.rear == Some(self.capacity() - 1)
    }

    /// The front cursor, if any value is stored.
    pub fn front(&self) -> Option<usize> {
        self.front
    }

    /// The rear cursor, if any value has been enqueued.
    pub fn rear(&self) -> Option<usize> {
        self.rear
    }

    /// The backing slots, nulls included.
    pub fn contents(&self) -> &[Option<T>] {
        &self.slots
    }

    /// The step log recorded so far.
    pub fn steps(&self) -> &[QueueStep<T>] {
        &self.steps
    }

    /// Drains the step log.
    pub fn take_steps(&mut self) -> Vec<QueueStep<T>> {
        std::mem::take(&mut self.steps)
    }

    /// Adds a value at the rear.
    ///
    /// Fails with [`ContainerError::Overflow`] -- recording an `error` step
    /// and mutating nothing -- once `rear` has reached the last slot.
    pub fn enqueue(&mut self, value: T) -> Result<(), ContainerError> {
        if self.is_full() {
            let error = ContainerError::Overflow {
                capacity: self.capacity(),
            };
            self.steps.push(QueueStep::Error {
                error: error.clone(),
                slots: self.slots.clone(),
            });
            return Err(error);
        }

        if self.front.is_none() {
            self.front = Some(0);
        }
        let index = self.rear.map_or(0, |r| r + 1);
        self.rear = Some(index);
        self.slots[index] = Some(value.clone());

        self.steps.push(QueueStep::Enqueue {
            value,
            index,
            slots: self.slots.clone(),
            front: self.front,
            rear: self.rear,
        });
        Ok(())
    }

    /// Removes and returns the front value.
    ///
    /// Fails with [`ContainerError::Underflow`] on an empty queue.
    pub fn dequeue(&mut self) -> Result<T, ContainerError> {
        let Some(index) = self.front else {
            let error = ContainerError::Underflow;
            self.steps.push(QueueStep::Error {
                error: error.clone(),
                slots: self.slots.clone(),
            });
            return Err(error);
        };

        // The front cursor always points at an occupied slot.
        let value = self.slots[index].take().expect("front slot occupied");

        self.steps.push(QueueStep::Dequeue {
            value: value.clone(),
            index,
            slots: self.slots.clone(),
            front: self.front,
            rear: self.rear,
        });

        if self.front == self.rear {
            self.front = None;
            self.rear = None;
        } else {
            self.front = Some(index + 1);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepviz_core::StepRecord;

    #[test]
    fn create_records_initial_snapshot() {
        let queue: BoundedQueue<i64> = BoundedQueue::new(3);
        assert_eq!(queue.capacity(), 3);
        assert!(queue.is_empty());
        assert_eq!(
            queue.steps(),
            &[QueueStep::Create {
                capacity: 3,
                slots: vec![None, None, None],
            }]
        );
    }

    #[test]
    fn enqueue_dequeue_cursors() {
        let mut queue = BoundedQueue::new(3);
        queue.enqueue(10).unwrap();
        queue.enqueue(20).unwrap();
        assert_eq!(queue.front(), Some(0));
        assert_eq!(queue.rear(), Some(1));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.dequeue().unwrap(), 10);
        assert_eq!(queue.front(), Some(1));
        assert_eq!(queue.contents(), &[None, Some(20), None]);

        assert_eq!(queue.dequeue().unwrap(), 20);
        // Emptying the queue resets both cursors.
        assert_eq!(queue.front(), None);
        assert_eq!(queue.rear(), None);
    }

    #[test]
    fn overflow_leaves_contents_unchanged() {
        // Contract example: capacity 2, third enqueue fails as data.
        let mut queue = BoundedQueue::new(2);
        queue.enqueue(1).unwrap();
        queue.enqueue(2).unwrap();

        let before = queue.steps().len();
        assert_eq!(
            queue.enqueue(3),
            Err(ContainerError::Overflow { capacity: 2 })
        );
        assert_eq!(queue.contents(), &[Some(1), Some(2)]);
        assert_eq!(queue.steps().len(), before + 1);
        assert_eq!(
            queue.steps().last(),
            Some(&QueueStep::Error {
                error: ContainerError::Overflow { capacity: 2 },
                slots: vec![Some(1), Some(2)],
            })
        );
    }

    #[test]
    fn linear_queue_stays_full_after_dequeue() {
        // Not circular: rear has reached the last slot, so the queue is
        // full even though slot 0 is free again.
        let mut queue = BoundedQueue::new(2);
        queue.enqueue(1).unwrap();
        queue.enqueue(2).unwrap();
        queue.dequeue().unwrap();
        assert!(queue.is_full());
        assert_eq!(
            queue.enqueue(3),
            Err(ContainerError::Overflow { capacity: 2 })
        );
    }

    #[test]
    fn underflow_on_empty() {
        let mut queue: BoundedQueue<i64> = BoundedQueue::new(2);
        assert_eq!(queue.dequeue(), Err(ContainerError::Underflow));
        assert_eq!(queue.steps().last().map(StepRecord::kind), Some("error"));
    }

    #[test]
    fn zero_capacity_always_overflows() {
        let mut queue: BoundedQueue<i64> = BoundedQueue::new(0);
        assert!(queue.is_full());
        assert_eq!(
            queue.enqueue(1),
            Err(ContainerError::Overflow { capacity: 0 })
        );
    }

    #[test]
    fn dequeue_step_snapshots_cleared_slot() {
        let mut queue = BoundedQueue::new(2);
        queue.enqueue(5).unwrap();
        queue.enqueue(6).unwrap();
        queue.dequeue().unwrap();

        assert_eq!(
            queue.steps().last(),
            Some(&QueueStep::Dequeue {
                value: 5,
                index: 0,
                slots: vec![None, Some(6)],
                // Cursors as they stood when the step was recorded.
                front: Some(0),
                rear: Some(1),
            })
        );
    }

    #[test]
    fn take_steps_drains_log() {
        let mut queue = BoundedQueue::new(2);
        queue.enqueue(1).unwrap();
        let steps = queue.take_steps();
        assert_eq!(steps.len(), 2); // create + enqueue
        assert!(queue.steps().is_empty());
    }

    #[test]
    fn error_step_serde_shape() {
        let step: QueueStep<i64> = QueueStep::Error {
            error: ContainerError::Overflow { capacity: 2 },
            slots: vec![Some(1), Some(2)],
        };
        let json = serde_json::to_string(&step).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"error","error":{"fault":"overflow","capacity":2},"slots":[1,2]}"#
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Success or failure, every operation appends exactly one step
            /// and the stored count never exceeds the capacity.
            #[test]
            fn every_op_appends_exactly_one_step(
                ops in proptest::collection::vec(proptest::option::of(0i64..100), 0..32),
            ) {
                let mut queue = BoundedQueue::new(4);
                for op in ops {
                    let before = queue.steps().len();
                    match op {
                        Some(value) => {
                            let _ = queue.enqueue(value);
                        }
                        None => {
                            let _ = queue.dequeue();
                        }
                    }
                    prop_assert_eq!(queue.steps().len(), before + 1);
                    prop_assert!(queue.len() <= queue.capacity());
                }
            }
        }
    }
}
