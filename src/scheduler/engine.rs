//! Tick-driven preemptive priority scheduler.
//!
//! # Algorithm (per tick)
//!
//! 1. Collect tasks arriving this tick (excluding the running one), in
//!    `(arrival asc, priority desc)` order fixed at setup.
//! 2. Select one candidate from arrivals and the waiting set.
//! 3. If the running task finished, retire it (stop when none remain) and
//!    dispatch the candidate. Otherwise preempt when the candidate's
//!    priority is strictly higher, or push the candidate back.
//! 4. Every `reset_interval` ticks, age the running task.
//! 5. Park remaining arrivals in the waiting set.
//! 6. Emit the tick record, then advance the running task by one unit.

use std::collections::VecDeque;

use tracing::{debug, info, trace};

use super::{SchedulerConfig, SimulationReport, TaskStats, TickObserver};
use crate::dispatching::{select_candidate, WaitingSet};
use crate::error::SimulationError;
use crate::models::{
    Advance, AgingNote, Processor, Task, TaskId, TaskSpec, TickRecord, IDLE_PRIORITY,
    IDLE_TASK_NAME,
};
use crate::validation::validate_specs;

/// Single-processor preemptive scheduler with cubic priority aging.
///
/// Consumed by [`run`](Self::run); a simulation runs exactly once.
///
/// # Example
///
/// ```
/// use u_preempt::models::TaskSpec;
/// use u_preempt::scheduler::PreemptiveScheduler;
///
/// let specs = vec![TaskSpec::new("X", 0, 5, 1), TaskSpec::new("Y", 1, 2, 5)];
/// let report = PreemptiveScheduler::new(&specs).unwrap().run().unwrap();
/// assert_eq!(report.running_sequence(), vec!["X", "Y", "Y", "X", "X", "X", "X"]);
/// ```
#[derive(Debug, Clone)]
pub struct PreemptiveScheduler {
    config: SchedulerConfig,
    tasks: Vec<Task>,
    /// Task handles sorted by (arrival asc, priority desc), stable.
    order: Vec<TaskId>,
}

impl PreemptiveScheduler {
    /// Builds a scheduler with the default configuration.
    ///
    /// # Errors
    /// [`SimulationError::InvalidDescriptors`] if any descriptor is malformed.
    pub fn new(specs: &[TaskSpec]) -> Result<Self, SimulationError> {
        Self::with_config(specs, SchedulerConfig::default())
    }

    /// Builds a scheduler with an explicit configuration.
    pub fn with_config(specs: &[TaskSpec], config: SchedulerConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        validate_specs(specs).map_err(SimulationError::InvalidDescriptors)?;

        let tasks: Vec<Task> = specs.iter().map(Task::from_spec).collect();
        let mut order: Vec<TaskId> = (0..tasks.len()).map(TaskId::new).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&tasks[a.index()], &tasks[b.index()]);
            a.arrival_tick()
                .cmp(&b.arrival_tick())
                .then_with(|| b.priority().cmp(&a.priority()))
        });

        Ok(Self {
            config,
            tasks,
            order,
        })
    }

    /// Tasks in descriptor order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Runs to completion, collecting every tick record into the report.
    pub fn run(self) -> Result<SimulationReport, SimulationError> {
        let mut timeline = Vec::new();
        let mut report = self.run_with(&mut |record: &TickRecord| timeline.push(record.clone()))?;
        report.timeline = timeline;
        Ok(report)
    }

    /// Runs to completion, streaming tick records to `observer`.
    ///
    /// The returned report's `timeline` is left empty.
    ///
    /// # Errors
    /// [`SimulationError::EmptyWaitingSet`] if the waiting-set invariant is
    /// ever broken; the run is aborted.
    pub fn run_with<O>(mut self, observer: &mut O) -> Result<SimulationReport, SimulationError>
    where
        O: TickObserver + ?Sized,
    {
        let mut report = SimulationReport {
            stats: self.tasks.iter().map(TaskStats::for_task).collect(),
            ..Default::default()
        };

        let Some(&first) = self.order.first() else {
            info!("no tasks to schedule");
            return Ok(report);
        };

        info!(
            tasks = self.tasks.len(),
            reset_interval = self.config.reset_interval,
            "starting simulation"
        );

        let mut remaining = self.tasks.len();
        let mut waiting = WaitingSet::new();
        let mut running = if self.tasks[first.index()].arrival_tick() == 0 {
            Processor::Task(first)
        } else {
            Processor::Idle
        };
        let mut tick: u64 = 0;

        loop {
            let mut arrivals = self.arrivals_at(tick, running);
            let candidate = select_candidate(&mut arrivals, &mut waiting, &self.tasks)?;

            if self.is_finished(running) {
                remaining -= 1;
                if remaining == 0 {
                    break;
                }
                running = candidate;
                self.age(running, tick, &mut report.aging);
            } else if self.outranks(candidate, running) {
                if let Processor::Task(id) = running {
                    debug!(
                        tick,
                        preempted = self.tasks[id.index()].name(),
                        by = self.name_of(candidate),
                        "preempting"
                    );
                    report.stats[id.index()].preemptions += 1;
                    waiting.push(id, &self.tasks[id.index()]);
                }
                running = candidate;
                self.age(running, tick, &mut report.aging);
            } else {
                self.age(running, tick, &mut report.aging);
                if let Processor::Task(id) = candidate {
                    waiting.push(id, &self.tasks[id.index()]);
                }
            }

            for id in arrivals {
                waiting.push(id, &self.tasks[id.index()]);
            }

            let record = TickRecord {
                tick,
                running: self.name_of(running).to_string(),
                waiting: waiting
                    .iter()
                    .map(|id| self.tasks[id.index()].name().to_string())
                    .collect(),
            };
            trace!(tick, running = %record.running, waiting = ?record.waiting, "tick");
            observer.on_tick(&record);

            if let Processor::Task(id) = running {
                if self.tasks[id.index()].advance() == Advance::Finished {
                    debug!(tick, task = self.tasks[id.index()].name(), "task completed");
                    report.stats[id.index()].completion_tick = Some(tick);
                }
            }

            tick += 1;
        }

        report.ticks = tick;
        info!(
            ticks = tick,
            aging_events = report.aging.len(),
            "simulation finished"
        );
        Ok(report)
    }

    fn arrivals_at(&self, tick: u64, running: Processor) -> VecDeque<TaskId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| {
                self.tasks[id.index()].arrival_tick() == tick && running != Processor::Task(id)
            })
            .collect()
    }

    fn is_finished(&self, slot: Processor) -> bool {
        slot.task()
            .is_some_and(|id| self.tasks[id.index()].is_finished())
    }

    /// Strict priority comparison; idle ranks below every task.
    fn outranks(&self, candidate: Processor, running: Processor) -> bool {
        self.priority_of(candidate) > self.priority_of(running)
    }

    fn priority_of(&self, slot: Processor) -> Option<i64> {
        slot.task().map(|id| self.tasks[id.index()].priority())
    }

    fn name_of(&self, slot: Processor) -> &str {
        match slot {
            Processor::Idle => IDLE_TASK_NAME,
            Processor::Task(id) => self.tasks[id.index()].name(),
        }
    }

    fn age(&mut self, running: Processor, tick: u64, notes: &mut Vec<AgingNote>) {
        if !self.config.is_aging_tick(tick) {
            return;
        }
        let Processor::Task(id) = running else {
            // idle keeps its priority but the aging tick is still reported
            notes.push(AgingNote::new(IDLE_TASK_NAME, IDLE_PRIORITY, IDLE_PRIORITY, tick));
            return;
        };
        let task = &mut self.tasks[id.index()];
        let from = task.priority();
        let to = task.apply_aging(tick, self.config.aging_ratio);
        debug!(tick, task = task.name(), from, to, "priority aged");
        notes.push(AgingNote::new(task.name(), from, to, tick));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, arrival: i64, duration: i64, priority: i64) -> TaskSpec {
        TaskSpec::new(name, arrival, duration, priority)
    }

    fn run(specs: &[TaskSpec]) -> SimulationReport {
        PreemptiveScheduler::new(specs).unwrap().run().unwrap()
    }

    fn waiting_at(report: &SimulationReport, tick: usize) -> Vec<&str> {
        report.timeline[tick]
            .waiting
            .iter()
            .map(String::as_str)
            .collect()
    }

    fn notes(report: &SimulationReport) -> Vec<String> {
        report.aging.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_preemption_scenario() {
        let report = run(&[spec("X", 0, 5, 1), spec("Y", 1, 2, 5)]);

        assert_eq!(
            report.running_sequence(),
            vec!["X", "Y", "Y", "X", "X", "X", "X"]
        );
        assert!(waiting_at(&report, 0).is_empty());
        assert_eq!(waiting_at(&report, 1), vec!["X"]);
        assert_eq!(waiting_at(&report, 2), vec!["X"]);
        assert!(waiting_at(&report, 3).is_empty());
        assert_eq!(
            notes(&report),
            vec![
                "priority of Y changed from 5 to 0 at tick 2",
                "priority of X changed from 1 to 1 at tick 5",
            ]
        );
        assert_eq!(report.ticks, 7);
        assert_eq!(report.stats[0].preemptions, 1);
        assert_eq!(report.stats[0].completion_tick, Some(6));
        assert_eq!(report.stats[1].completion_tick, Some(2));
    }

    #[test]
    fn test_equal_priority_does_not_preempt() {
        let report = run(&[spec("A", 0, 3, 2), spec("B", 2, 1, 2)]);

        assert_eq!(report.running_sequence(), vec!["A", "A", "A", "B"]);
        assert_eq!(waiting_at(&report, 2), vec!["B"]);
        assert!(waiting_at(&report, 3).is_empty());
        assert_eq!(
            notes(&report),
            vec!["priority of A changed from 2 to 0 at tick 2"]
        );
        assert_eq!(report.stats[0].preemptions, 0);
    }

    #[test]
    fn test_idle_until_first_arrival() {
        let report = run(&[spec("P", 2, 2, 1)]);

        assert_eq!(report.running_sequence(), vec!["-", "-", "P", "P"]);
        assert_eq!(
            notes(&report),
            vec!["priority of P changed from 1 to 0 at tick 2"]
        );
        assert_eq!(report.stats[0].completion_tick, Some(3));
    }

    #[test]
    fn test_idle_aging_ticks_are_reported() {
        // idle runs through ticks 0..=5, covering aging ticks 2 and 5
        let report = run(&[spec("late", 6, 1, 0)]);
        assert_eq!(report.running_sequence(), vec!["-", "-", "-", "-", "-", "-", "late"]);
        assert_eq!(
            notes(&report),
            vec![
                "priority of - changed from -1 to -1 at tick 2",
                "priority of - changed from -1 to -1 at tick 5",
            ]
        );
    }

    #[test]
    fn test_idle_gap_between_tasks_is_reported() {
        let report = run(&[spec("X", 0, 1, 1), spec("Y", 4, 1, 1)]);
        assert_eq!(report.running_sequence(), vec!["X", "-", "-", "-", "Y"]);
        assert_eq!(
            notes(&report),
            vec!["priority of - changed from -1 to -1 at tick 2"]
        );
    }

    #[test]
    fn test_idle_note_does_not_change_ranking() {
        // a negative-priority arrival still displaces idle after an idle aging tick
        let report = run(&[spec("neg", 3, 1, -4)]);
        assert_eq!(report.running_sequence(), vec!["-", "-", "-", "neg"]);
        assert_eq!(report.aging.len(), 1);
        assert_eq!(report.aging[0].task, "-");
    }

    #[test]
    fn test_negative_priority_preempts_idle() {
        let report = run(&[spec("neg", 1, 1, -5)]);
        assert_eq!(report.running_sequence(), vec!["-", "neg"]);
    }

    #[test]
    fn test_mixed_workload_heap_order() {
        let report = run(&[
            spec("A", 0, 4, 3),
            spec("B", 1, 3, 5),
            spec("C", 1, 2, 5),
            spec("D", 2, 5, 1),
            spec("E", 4, 1, 7),
            spec("F", 4, 2, 0),
        ]);

        assert_eq!(
            report.running_sequence(),
            vec![
                "A", "B", "B", "C", "E", "C", "A", "A", "A", "D", "D", "D", "D", "D", "B", "F",
                "F",
            ]
        );
        assert_eq!(waiting_at(&report, 1), vec!["C", "A"]);
        assert_eq!(waiting_at(&report, 2), vec!["C", "A", "D"]);
        assert_eq!(waiting_at(&report, 3), vec!["A", "D", "B"]);
        // heap storage order, not sorted
        assert_eq!(waiting_at(&report, 4), vec!["C", "A", "B", "D", "F"]);
        assert_eq!(waiting_at(&report, 5), vec!["A", "D", "B", "F"]);
        assert_eq!(waiting_at(&report, 6), vec!["D", "F", "B"]);
        assert_eq!(waiting_at(&report, 9), vec!["B", "F"]);
        assert_eq!(waiting_at(&report, 14), vec!["F"]);
        assert_eq!(
            notes(&report),
            vec![
                "priority of B changed from 5 to 0 at tick 2",
                "priority of C changed from 5 to 6 at tick 5",
                "priority of A changed from 3 to 15 at tick 8",
                "priority of D changed from 1 to 13 at tick 11",
                "priority of B changed from 0 to 137 at tick 14",
            ]
        );

        let kpi = report.kpi();
        assert_eq!(kpi.makespan, 17);
        assert!((kpi.avg_turnaround - 9.0).abs() < 1e-10);
        assert_eq!(kpi.total_preemptions, 3);
    }

    #[test]
    fn test_empty_input_runs_no_ticks() {
        let mut calls = 0;
        let report = PreemptiveScheduler::new(&[])
            .unwrap()
            .run_with(&mut |_: &TickRecord| calls += 1)
            .unwrap();
        assert_eq!(calls, 0);
        assert_eq!(report.ticks, 0);
        assert!(report.timeline.is_empty());
    }

    #[test]
    fn test_observer_receives_every_tick() {
        let mut ticks = Vec::new();
        let report = PreemptiveScheduler::new(&[spec("A", 0, 2, 1), spec("B", 0, 1, 0)])
            .unwrap()
            .run_with(&mut |r: &TickRecord| ticks.push(r.tick))
            .unwrap();
        assert_eq!(ticks, vec![0, 1, 2]);
        assert!(report.timeline.is_empty());
        assert_eq!(report.ticks, 3);
    }

    #[test]
    fn test_same_tick_arrivals_sorted_by_priority() {
        let report = run(&[spec("low", 0, 1, 1), spec("high", 0, 1, 4)]);
        assert_eq!(report.running_sequence(), vec!["high", "low"]);
        assert_eq!(waiting_at(&report, 0), vec!["low"]);
    }

    #[test]
    fn test_invalid_descriptors_rejected() {
        let err = PreemptiveScheduler::new(&[spec("A", 0, 0, 1), spec("A", -1, 2, 1)])
            .unwrap_err();
        match err {
            SimulationError::InvalidDescriptors(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SchedulerConfig::new().with_reset_interval(0);
        let err = PreemptiveScheduler::with_config(&[spec("A", 0, 1, 1)], config).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn test_custom_reset_interval() {
        let config = SchedulerConfig::new().with_reset_interval(2);
        let report = PreemptiveScheduler::with_config(&[spec("A", 0, 4, 10)], config)
            .unwrap()
            .run()
            .unwrap();
        let ticks: Vec<u64> = report.aging.iter().map(|n| n.tick).collect();
        assert_eq!(ticks, vec![1, 3]);
        // 10 × 0.01 × 27 = 2.7
        assert_eq!(report.aging[1].to, 3);
    }

    #[test]
    fn test_every_task_completes() {
        let specs: Vec<TaskSpec> = (0..12)
            .map(|i| spec(&format!("T{i}"), i % 5, 1 + i % 4, (i * 7) % 6))
            .collect();
        let total: u64 = specs.iter().map(|s| s.duration as u64).sum();
        let report = run(&specs);

        assert!(report.stats.iter().all(|s| s.completion_tick.is_some()));
        assert!(report.ticks >= total);
        for s in &report.stats {
            let runs = report
                .timeline
                .iter()
                .filter(|r| r.running == s.name)
                .count() as u64;
            assert_eq!(runs, s.duration);
        }
    }
}
