//! Waiting set and candidate selection.
//!
//! The waiting set is a binary heap ordered by
//! `(priority desc, arrival asc, insertion sequence asc)`. The selector
//! compares the best new arrival against the waiting set's top and yields
//! one contender per tick; the scheduler decides whether it preempts.
//!
//! # Usage
//!
//! ```
//! use std::collections::VecDeque;
//! use u_preempt::dispatching::{select_candidate, WaitingSet};
//! use u_preempt::models::{Processor, Task, TaskId, TaskSpec};
//!
//! let tasks = vec![
//!     Task::from_spec(&TaskSpec::new("new", 3, 2, 4)),
//!     Task::from_spec(&TaskSpec::new("old", 0, 2, 4)),
//! ];
//! let mut arrivals = VecDeque::from(vec![TaskId::new(0)]);
//! let mut waiting = WaitingSet::new();
//! waiting.push(TaskId::new(1), &tasks[1]);
//!
//! // Equal priority: the waiting task keeps precedence.
//! let candidate = select_candidate(&mut arrivals, &mut waiting, &tasks).unwrap();
//! assert_eq!(candidate, Processor::Task(TaskId::new(1)));
//! ```

mod selector;
mod waiting;

pub use selector::select_candidate;
pub use waiting::{WaitingEntry, WaitingKey, WaitingSet};
