//! Discrete-time preemptive priority scheduling simulator.
//!
//! Models a single processor that, at every tick, re-evaluates the best
//! ready task and preempts the running one when a strictly higher priority
//! contender appears. Every few ticks the running task's priority is
//! recomputed from its initial priority and the elapsed time cubed.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TaskSpec`, `Task`, `Processor`,
//!   `TickRecord`, `AgingNote`
//! - **`dispatching`**: `WaitingSet` (binary heap) and `select_candidate`
//! - **`scheduler`**: `PreemptiveScheduler` event loop, `SchedulerConfig`,
//!   `TickObserver`, KPIs
//! - **`validation`**: Descriptor integrity checks
//! - **`workload`**: Random workloads and task-count parsing
//!
//! # Example
//!
//! ```
//! use u_preempt::models::TaskSpec;
//! use u_preempt::scheduler::PreemptiveScheduler;
//!
//! let specs = vec![
//!     TaskSpec::new("A", 0, 3, 2),
//!     TaskSpec::new("B", 2, 1, 2),
//! ];
//! let report = PreemptiveScheduler::new(&specs).unwrap().run().unwrap();
//!
//! // Equal priority never preempts.
//! assert_eq!(report.running_sequence(), vec!["A", "A", "A", "B"]);
//! assert_eq!(
//!     report.aging[0].to_string(),
//!     "priority of A changed from 2 to 0 at tick 2"
//! );
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5 (CPU Scheduling)
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::SimulationError;
