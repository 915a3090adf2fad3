//! Error type for simulation setup and execution.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while building or running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// One or more task descriptors are malformed.
    #[error("invalid task descriptors: {}", join_errors(.0))]
    InvalidDescriptors(Vec<ValidationError>),

    /// Scheduler configuration is unusable.
    #[error("invalid scheduler configuration: {0}")]
    InvalidConfig(String),

    /// A pop was attempted on an empty waiting set. Internal invariant
    /// violation; aborts the run.
    #[error("pop from an empty waiting set")]
    EmptyWaitingSet,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_descriptor_error_message() {
        let err = SimulationError::InvalidDescriptors(vec![
            ValidationError::new(ValidationErrorKind::DuplicateName, "Duplicate task name: A"),
            ValidationError::new(ValidationErrorKind::NegativeArrival, "Task 'B' arrives at -1"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid task descriptors: Duplicate task name: A; Task 'B' arrives at -1"
        );
    }
}
