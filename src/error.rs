//! Error types for simulation runs.
//!
//! There are no transient failures: a run is a pure function of its input.
//! Either the input is rejected up front ([`SimulationError::Configuration`])
//! or an internal consistency check failed ([`SimulationError::InvariantViolation`]).

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by process-set construction and simulation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The input was rejected before any simulation work.
    #[error("invalid configuration: {}", join_errors(.0))]
    Configuration(Vec<ValidationError>),
    /// An internal consistency check failed. Unreachable on valid input.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl SimulationError {
    /// Creates an invariant violation.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Wraps a single validation error.
    pub fn configuration(error: ValidationError) -> Self {
        Self::Configuration(vec![error])
    }

    /// Whether this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Validation errors carried by a configuration error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Configuration(errors) => errors,
            Self::InvariantViolation(_) => &[],
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
