//! Binary-heap waiting set.
//!
//! Holds tasks that have arrived but are not running. Entries are keyed by
//! `(priority desc, arrival asc, sequence asc)`, where the sequence is a
//! counter assigned at push time. Keys are unique, so pop order is fully
//! determined by the keys.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::SimulationError;
use crate::models::{Task, TaskId};

/// Ordering key captured when a task enters the waiting set.
///
/// `Greater` means "served first".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitingKey {
    /// Task priority at push time.
    pub priority: i64,
    /// Task arrival tick.
    pub arrival_tick: u64,
    /// Insertion sequence number.
    pub sequence: u64,
}

impl Ord for WaitingKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.arrival_tick.cmp(&self.arrival_tick))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for WaitingKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A waiting task and its key.
#[derive(Debug, Clone, Copy)]
pub struct WaitingEntry {
    /// Ordering key.
    pub key: WaitingKey,
    /// Waiting task.
    pub task: TaskId,
}

impl PartialEq for WaitingEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for WaitingEntry {}

impl Ord for WaitingEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for WaitingEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority-ordered holding area for arrived, non-running tasks.
///
/// # Example
/// ```
/// use u_preempt::dispatching::WaitingSet;
/// use u_preempt::models::{Task, TaskId, TaskSpec};
///
/// let low = Task::from_spec(&TaskSpec::new("low", 0, 1, 1));
/// let high = Task::from_spec(&TaskSpec::new("high", 0, 1, 9));
///
/// let mut waiting = WaitingSet::new();
/// waiting.push(TaskId::new(0), &low);
/// waiting.push(TaskId::new(1), &high);
/// assert_eq!(waiting.pop().unwrap(), TaskId::new(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaitingSet {
    heap: BinaryHeap<WaitingEntry>,
    next_sequence: u64,
}

impl WaitingSet {
    /// Creates an empty waiting set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a task, keyed by its current priority and arrival. O(log n).
    ///
    /// `id` is stored as given; callers pair it with the `task` it indexes.
    pub fn push(&mut self, id: TaskId, task: &Task) {
        let key = WaitingKey {
            priority: task.priority(),
            arrival_tick: task.arrival_tick(),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(WaitingEntry { key, task: id });
    }

    /// Removes and returns the highest-priority task. O(log n).
    ///
    /// # Errors
    /// [`SimulationError::EmptyWaitingSet`] if the set is empty.
    pub fn pop(&mut self) -> Result<TaskId, SimulationError> {
        self.heap
            .pop()
            .map(|entry| entry.task)
            .ok_or(SimulationError::EmptyWaitingSet)
    }

    /// The highest-priority entry, without removing it.
    pub fn peek(&self) -> Option<&WaitingEntry> {
        self.heap.peek()
    }

    /// Number of waiting tasks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no task is waiting.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Waiting tasks in heap storage order.
    ///
    /// The first item is the top-priority task; later items follow the
    /// heap's array layout and are not sorted.
    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.heap.iter().map(|entry| entry.task)
    }
}
