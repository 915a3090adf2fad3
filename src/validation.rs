//! Input validation for task descriptors.
//!
//! Checks descriptors before a simulation is built. Detects:
//! - Empty or reserved names
//! - Duplicate names
//! - Negative arrival ticks
//! - Durations below one tick
//!
//! All problems are collected; validation does not stop at the first.

use std::collections::HashSet;
use std::fmt;

use crate::models::{TaskSpec, IDLE_TASK_NAME};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two descriptors share the same name.
    DuplicateName,
    /// A descriptor has an empty name.
    EmptyName,
    /// A descriptor uses the idle task's display name.
    ReservedName,
    /// Arrival tick is below zero.
    NegativeArrival,
    /// Duration is below one tick.
    NonPositiveDuration,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates task descriptors.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_specs(specs: &[TaskSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for spec in specs {
        if spec.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Task name must not be empty",
            ));
        } else if spec.name == IDLE_TASK_NAME {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedName,
                format!("Task name '{IDLE_TASK_NAME}' is reserved for the idle task"),
            ));
        } else if !names.insert(spec.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate task name: {}", spec.name),
            ));
        }

        if spec.arrival_tick < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Task '{}' arrives at {}", spec.name, spec.arrival_tick),
            ));
        }

        if spec.duration < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!("Task '{}' has duration {}", spec.name, spec.duration),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
