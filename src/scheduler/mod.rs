//! Preemptive scheduler and run metrics.
//!
//! `PreemptiveScheduler` drives a single simulated processor tick by tick:
//! the best candidate from new arrivals and the waiting set preempts the
//! running task only when its priority is strictly higher, and the running
//! task's priority is re-derived every `reset_interval` ticks by cubic aging.
//!
//! # KPI
//!
//! `TaskStats` and `RunKpi` summarize completion, turnaround, waiting time
//! and preemptions.

mod config;
mod engine;
mod kpi;
mod report;

pub use config::{SchedulerConfig, DEFAULT_AGING_RATIO, DEFAULT_RESET_INTERVAL};
pub use engine::PreemptiveScheduler;
pub use kpi::{RunKpi, TaskStats};
pub use report::{SimulationReport, TickObserver};
