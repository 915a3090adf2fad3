//! Candidate selection.
//!
//! Picks the single best contender for the processor from the tick's new
//! arrivals and the waiting set. Task state is never mutated; at most one
//! task is removed from either collection.

use std::collections::VecDeque;

use crate::error::SimulationError;
use crate::models::{Processor, Task, TaskId};

use super::WaitingSet;

/// Selects the best candidate for dispatch.
///
/// `arrivals` must be ordered by `(arrival asc, priority desc)`, so its head
/// is the best newly arrived task.
///
/// | arrivals | waiting | result |
/// |----------|---------|--------|
/// | empty | empty | idle, nothing removed |
/// | empty | non-empty | waiting top (popped) |
/// | non-empty | empty | arrivals head (removed) |
/// | non-empty | non-empty | arrivals head if strictly higher, else waiting top |
///
/// Ties go to the waiting set.
///
/// # Panics
/// If the head of `arrivals` is not a valid index into `tasks`. Handles must
/// come from the same task table the waiting set was filled from.
///
/// # Errors
/// [`SimulationError::EmptyWaitingSet`] only if the waiting set's length and
/// top disagree, which the heap never allows.
pub fn select_candidate(
    arrivals: &mut VecDeque<TaskId>,
    waiting: &mut WaitingSet,
    tasks: &[Task],
) -> Result<Processor, SimulationError> {
    let head = arrivals
        .front()
        .map(|&id| (id, tasks[id.index()].priority()));
    let top_priority = waiting.peek().map(|entry| entry.key.priority);

    match (head, top_priority) {
        (None, None) => Ok(Processor::Idle),
        (None, Some(_)) => waiting.pop().map(Processor::Task),
        (Some((id, _)), None) => {
            arrivals.pop_front();
            Ok(Processor::Task(id))
        }
        (Some((id, priority)), Some(top)) if priority > top => {
            arrivals.pop_front();
            Ok(Processor::Task(id))
        }
        (Some(_), Some(_)) => waiting.pop().map(Processor::Task),
    }
}
