//! Per-tick observations and aging notes emitted by the scheduler.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the processor did during one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Tick number (0-based).
    pub tick: u64,
    /// Name of the running task, or `-` for idle.
    pub running: String,
    /// Waiting task names in heap storage order. The first entry is the
    /// top-priority task; the rest are not sorted.
    pub waiting: Vec<String>,
}

/// A priority change caused by aging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingNote {
    /// Aged task name.
    pub task: String,
    /// Priority before aging.
    pub from: i64,
    /// Priority after aging.
    pub to: i64,
    /// Tick at which aging was applied.
    pub tick: u64,
}

impl AgingNote {
    /// Creates a note.
    pub fn new(task: impl Into<String>, from: i64, to: i64, tick: u64) -> Self {
        Self {
            task: task.into(),
            from,
            to,
            tick,
        }
    }
}

impl fmt::Display for AgingNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "priority of {} changed from {} to {} at tick {}",
            self.task, self.from, self.to, self.tick
        )
    }
}
