//! Per-task and run-level metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion | Tick during which the last unit of work ran |
//! | Turnaround | completion + 1 - arrival |
//! | Waiting | turnaround - duration |
//! | Preemptions | Times the task was displaced while running |
//! | Makespan | Ticks simulated |

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Outcome of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Task name.
    pub name: String,
    /// Arrival tick.
    pub arrival_tick: u64,
    /// Ticks of work.
    pub duration: u64,
    /// Tick of the final unit of work. `None` while unfinished.
    pub completion_tick: Option<u64>,
    /// Number of times the task was preempted.
    pub preemptions: u32,
}

impl TaskStats {
    /// Empty stats for a task that has not run yet.
    pub fn for_task(task: &Task) -> Self {
        Self {
            name: task.name().to_string(),
            arrival_tick: task.arrival_tick(),
            duration: task.duration(),
            completion_tick: None,
            preemptions: 0,
        }
    }

    /// Ticks from arrival until completion, inclusive.
    pub fn turnaround(&self) -> Option<u64> {
        self.completion_tick
            .map(|done| (done + 1).saturating_sub(self.arrival_tick))
    }

    /// Ticks spent ready but not running.
    pub fn waiting(&self) -> Option<u64> {
        self.turnaround()
            .map(|turnaround| turnaround.saturating_sub(self.duration))
    }
}

/// Aggregate metrics over a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunKpi {
    /// Ticks simulated.
    pub makespan: u64,
    /// Mean turnaround over completed tasks.
    pub avg_turnaround: f64,
    /// Mean waiting time over completed tasks.
    pub avg_waiting: f64,
    /// Total preemptions.
    pub total_preemptions: u32,
}

impl RunKpi {
    /// Computes run metrics from per-task stats.
    pub fn calculate(stats: &[TaskStats], makespan: u64) -> Self {
        let mut total_turnaround = 0u64;
        let mut total_waiting = 0u64;
        let mut completed = 0usize;

        for s in stats {
            if let (Some(turnaround), Some(waiting)) = (s.turnaround(), s.waiting()) {
                total_turnaround += turnaround;
                total_waiting += waiting;
                completed += 1;
            }
        }

        let mean = |total: u64| {
            if completed > 0 {
                total as f64 / completed as f64
            } else {
                0.0
            }
        };

        Self {
            makespan,
            avg_turnaround: mean(total_turnaround),
            avg_waiting: mean(total_waiting),
            total_preemptions: stats.iter().map(|s| s.preemptions).sum(),
        }
    }
}
