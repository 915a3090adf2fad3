//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Ticks between aging checks.
pub const DEFAULT_RESET_INTERVAL: u64 = 3;

/// Multiplier in the cubic aging formula.
pub const DEFAULT_AGING_RATIO: f64 = 0.01;

/// Tunables of the preemptive scheduler.
///
/// Aging fires on every tick `t` where `(t + 1) % reset_interval == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Aging period in ticks. Must be at least 1.
    pub reset_interval: u64,
    /// Aging ratio. Must be finite.
    pub aging_ratio: f64,
}

impl SchedulerConfig {
    /// Creates the default configuration (interval 3, ratio 0.01).
    pub fn new() -> Self {
        Self {
            reset_interval: DEFAULT_RESET_INTERVAL,
            aging_ratio: DEFAULT_AGING_RATIO,
        }
    }

    /// Sets the aging period.
    pub fn with_reset_interval(mut self, ticks: u64) -> Self {
        self.reset_interval = ticks;
        self
    }

    /// Sets the aging ratio.
    pub fn with_aging_ratio(mut self, ratio: f64) -> Self {
        self.aging_ratio = ratio;
        self
    }

    /// Whether aging fires at `tick`.
    #[inline]
    pub fn is_aging_tick(&self, tick: u64) -> bool {
        self.reset_interval != 0 && (tick + 1) % self.reset_interval == 0
    }

    pub(crate) fn validate(&self) -> Result<(), SimulationError> {
        if self.reset_interval == 0 {
            return Err(SimulationError::InvalidConfig(
                "reset_interval must be at least 1".into(),
            ));
        }
        if !self.aging_ratio.is_finite() {
            return Err(SimulationError::InvalidConfig(format!(
                "aging_ratio must be finite, got {}",
                self.aging_ratio
            )));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.reset_interval, 3);
        assert!((config.aging_ratio - 0.01).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_aging_ticks() {
        let config = SchedulerConfig::new();
        let ticks: Vec<u64> = (0..10).filter(|&t| config.is_aging_tick(t)).collect();
        assert_eq!(ticks, vec![2, 5, 8]);
    }

    #[test]
    fn test_invalid_config() {
        assert!(SchedulerConfig::new()
            .with_reset_interval(0)
            .validate()
            .is_err());
        assert!(SchedulerConfig::new()
            .with_aging_ratio(f64::NAN)
            .validate()
            .is_err());
    }
}
