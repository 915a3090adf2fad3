//! Simulation output and the per-tick observer seam.

use serde::{Deserialize, Serialize};

use super::{RunKpi, TaskStats};
use crate::models::{AgingNote, TickRecord};

/// Receives each tick's record as the simulation runs.
///
/// Rendering lives behind this seam; the scheduler never prints.
/// Implemented for every `FnMut(&TickRecord)` closure.
pub trait TickObserver {
    /// Called once per simulated tick, in tick order.
    fn on_tick(&mut self, record: &TickRecord);
}

impl<F> TickObserver for F
where
    F: FnMut(&TickRecord),
{
    fn on_tick(&mut self, record: &TickRecord) {
        self(record)
    }
}

/// Result of a completed simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Ticks simulated.
    pub ticks: u64,
    /// Per-tick records. Empty when records went to an observer instead.
    pub timeline: Vec<TickRecord>,
    /// Aging transitions in the order they happened.
    pub aging: Vec<AgingNote>,
    /// Per-task outcomes, in descriptor order.
    pub stats: Vec<TaskStats>,
}

impl SimulationReport {
    /// Aggregate metrics for this run.
    pub fn kpi(&self) -> RunKpi {
        RunKpi::calculate(&self.stats, self.ticks)
    }

    /// Names of the running task, one per tick.
    pub fn running_sequence(&self) -> Vec<&str> {
        self.timeline.iter().map(|r| r.running.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskSpec;
    use crate::scheduler::PreemptiveScheduler;

    #[test]
    fn test_report_json_round_trip() {
        let specs = vec![TaskSpec::new("X", 0, 5, 1), TaskSpec::new("Y", 1, 2, 5)];
        let report = PreemptiveScheduler::new(&specs).unwrap().run().unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let back: SimulationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert!(json.contains("\"running\":\"Y\""));
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        let mut observer = |r: &TickRecord| seen.push(r.running.clone());
        observer.on_tick(&TickRecord {
            tick: 0,
            running: "-".into(),
            waiting: vec![],
        });
        assert_eq!(seen, vec!["-".to_string()]);
    }
}
