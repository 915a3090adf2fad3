//! Task (process) model.
//!
//! A task is one schedulable unit of work: static attributes fixed at
//! setup (arrival tick, duration, base priority) plus the runtime state the
//! scheduler mutates tick by tick (current priority, progress, completion).
//!
//! # Execution Model
//! Each task advances by exactly one unit of work per tick it occupies the
//! processor. `advance()` is the only suspension point.

use serde::{Deserialize, Serialize};

/// Display name used for the idle task in tick records.
pub const IDLE_TASK_NAME: &str = "-";

/// Priority shown for the idle task in aging notes. Display only: idle
/// still ranks below every real task when deciding preemption.
pub const IDLE_PRIORITY: i64 = -1;

/// Descriptor of a task, as supplied at the simulation boundary.
///
/// Fields are signed so that malformed input (negative arrival, zero or
/// negative duration) survives deserialization and is reported by
/// [`validate_specs`](crate::validation::validate_specs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Unique, non-empty task name.
    pub name: String,
    /// Tick at which the task becomes ready.
    pub arrival_tick: i64,
    /// Ticks of work required.
    pub duration: i64,
    /// Initial priority (higher = more important). Base of the aging formula.
    pub priority: i64,
}

impl TaskSpec {
    /// Creates a descriptor.
    pub fn new(name: impl Into<String>, arrival_tick: i64, duration: i64, priority: i64) -> Self {
        Self {
            name: name.into(),
            arrival_tick,
            duration,
            priority,
        }
    }
}

/// Opaque handle to a task owned by the scheduler's task table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(usize);

impl TaskId {
    /// Creates a handle for the task at `index`.
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index into the task table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What occupies the processor (or a candidate slot) during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processor {
    /// The idle task. Ranks below every real task, never finishes.
    Idle,
    /// A real task.
    Task(TaskId),
}

impl Processor {
    /// The task handle, if this is not the idle task.
    pub fn task(self) -> Option<TaskId> {
        match self {
            Processor::Idle => None,
            Processor::Task(id) => Some(id),
        }
    }

    /// Whether this is the idle task.
    pub fn is_idle(self) -> bool {
        matches!(self, Processor::Idle)
    }
}

/// Outcome of one [`Task::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Work continues; carries the ticks of work completed so far.
    Progress(u64),
    /// The final unit of work has been consumed.
    Finished,
}

/// Runtime task state.
#[derive(Debug, Clone)]
pub struct Task {
    name: String,
    arrival_tick: u64,
    duration: u64,
    initial_priority: i64,
    priority: i64,
    progress: u64,
    finished: bool,
}

impl Task {
    /// Builds runtime state from a descriptor.
    ///
    /// Negative arrivals clamp to 0 and durations below 1 clamp to 1;
    /// descriptors are expected to have passed validation already.
    pub fn from_spec(spec: &TaskSpec) -> Self {
        Self {
            name: spec.name.clone(),
            arrival_tick: spec.arrival_tick.max(0) as u64,
            duration: spec.duration.max(1) as u64,
            initial_priority: spec.priority,
            priority: spec.priority,
            progress: 0,
            finished: false,
        }
    }

    /// Task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arrival tick.
    pub fn arrival_tick(&self) -> u64 {
        self.arrival_tick
    }

    /// Total ticks of work.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Priority at setup, before any aging.
    pub fn initial_priority(&self) -> i64 {
        self.initial_priority
    }

    /// Current (possibly aged) priority.
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Ticks of work completed so far.
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Whether all work has been consumed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes one tick of work.
    ///
    /// The `duration`-th call returns [`Advance::Finished`]. Once finished,
    /// further calls report `Finished` and leave the task untouched.
    pub fn advance(&mut self) -> Advance {
        if self.finished {
            return Advance::Finished;
        }
        if self.progress + 1 >= self.duration {
            self.finished = true;
            return Advance::Finished;
        }
        self.progress += 1;
        Advance::Progress(self.progress)
    }

    /// Replaces the current priority with the aged value for `tick`.
    ///
    /// Returns the new priority. Previous aging results are discarded; only
    /// the initial priority and the tick matter.
    pub fn apply_aging(&mut self, tick: u64, ratio: f64) -> i64 {
        self.priority = aged_priority(self.initial_priority, ratio, tick);
        self.priority
    }
}

/// Cubic aging: `round(initial × ratio × tick³)`, halves rounded to even.
pub fn aged_priority(initial: i64, ratio: f64, tick: u64) -> i64 {
    let t = tick as f64;
    (initial as f64 * ratio * t * t * t).round_ties_even() as i64
}
