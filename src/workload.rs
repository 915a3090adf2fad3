//! Synthetic workloads and task-count requests.
//!
//! Boundary collaborators of the simulator: random descriptor generation
//! and lenient parsing of "how many tasks" requests.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::warn;

use crate::error::SimulationError;
use crate::models::TaskSpec;

/// Generated task names: `A` through `Z`.
pub const MAX_GENERATED_TASKS: usize = 26;

/// Value ranges for generated descriptors (all inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Arrival tick range.
    pub arrival: RangeInclusive<i64>,
    /// Duration range. Lower bound should be at least 1.
    pub duration: RangeInclusive<i64>,
    /// Priority range.
    pub priority: RangeInclusive<i64>,
}

impl WorkloadConfig {
    /// Arrivals 0..=6, durations 1..=6, priorities 0..=6.
    pub fn new() -> Self {
        Self {
            arrival: 0..=6,
            duration: 1..=6,
            priority: 0..=6,
        }
    }

    /// Sets the arrival range.
    pub fn with_arrival(mut self, range: RangeInclusive<i64>) -> Self {
        self.arrival = range;
        self
    }

    /// Sets the duration range.
    pub fn with_duration(mut self, range: RangeInclusive<i64>) -> Self {
        self.duration = range;
        self
    }

    /// Sets the priority range.
    pub fn with_priority(mut self, range: RangeInclusive<i64>) -> Self {
        self.priority = range;
        self
    }

    /// Checks that every range is non-empty, arrivals start at 0 or later
    /// and durations at 1 or later.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let ranges = [
            ("arrival", &self.arrival, 0),
            ("duration", &self.duration, 1),
            ("priority", &self.priority, i64::MIN),
        ];
        for (field, range, floor) in ranges {
            if range.is_empty() {
                return Err(SimulationError::InvalidConfig(format!(
                    "{field} range {}..={} is empty",
                    range.start(),
                    range.end()
                )));
            }
            if *range.start() < floor {
                return Err(SimulationError::InvalidConfig(format!(
                    "{field} range must start at {floor} or above, got {}",
                    range.start()
                )));
            }
        }
        Ok(())
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates up to [`MAX_GENERATED_TASKS`] random descriptors named `A`, `B`, ...
///
/// # Errors
/// [`SimulationError::InvalidConfig`] if `config` fails
/// [`WorkloadConfig::validate`].
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_preempt::workload::{generate_workload, WorkloadConfig};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let specs = generate_workload(3, &WorkloadConfig::default(), &mut rng).unwrap();
/// assert_eq!(specs.len(), 3);
/// assert_eq!(specs[0].name, "A");
/// ```
pub fn generate_workload<R: Rng>(
    count: usize,
    config: &WorkloadConfig,
    rng: &mut R,
) -> Result<Vec<TaskSpec>, SimulationError> {
    config.validate()?;
    let specs = ('A'..='Z')
        .take(count.min(MAX_GENERATED_TASKS))
        .map(|name| {
            TaskSpec::new(
                name,
                rng.random_range(config.arrival.clone()),
                rng.random_range(config.duration.clone()),
                rng.random_range(config.priority.clone()),
            )
        })
        .collect();
    Ok(specs)
}

/// Resolves a textual task-count request against `available` descriptors.
///
/// Decimal digits at the very start of `input` are the request, capped at
/// `available`. Anything else in first position (whitespace or a sign
/// included), or a number too large to parse, falls back to `available`.
/// Trailing text such as a newline is ignored. `"0"` is honored and yields
/// an empty run.
pub fn resolve_task_count(input: &str, available: usize) -> usize {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let digits = &input[..end];

    if digits.is_empty() {
        warn!(input = %input.trim(), available, "unrecognized task count, scheduling all");
        return available;
    }

    match digits.parse::<usize>() {
        Ok(requested) => requested.min(available),
        Err(_) => available,
    }
}
