//! Input validation for simulation runs.
//!
//! Checks the process set and the algorithm selection before any
//! simulation work. Detects:
//! - Empty process sets
//! - Zero service times
//! - Empty or duplicate process names
//! - Horizons that overflow the time type
//! - Non-positive Round Robin quanta
//!
//! Every check runs; all detected issues are returned together.

use std::collections::HashSet;

use crate::models::Process;
use crate::scheduler::Algorithm;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyProcessSet,
    /// A process needs zero units of CPU.
    ZeroServiceTime,
    /// A process has an empty name.
    EmptyName,
    /// Two processes share a name.
    DuplicateName,
    /// `max(arrival) + sum(service)` does not fit in `u32`.
    HorizonOverflow,
    /// Round Robin quantum is zero.
    InvalidQuantum,
    /// A process descriptor could not be parsed.
    MalformedDescriptor,
    /// An algorithm selector could not be parsed.
    UnknownAlgorithm,
    /// Round Robin was selected without a quantum.
    MissingQuantum,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process list.
///
/// Checks:
/// 1. At least one process
/// 2. Non-empty, unique names
/// 3. Positive service times
/// 4. Horizon fits in `u32`
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessSet,
            "No processes provided",
        ));
    }

    let mut names = HashSet::new();
    for p in processes {
        if p.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Process arriving at {} has an empty name", p.arrival),
            ));
        } else if !names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate process name: {}", p.name),
            ));
        }

        if p.service == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroServiceTime,
                format!("Process '{}' has zero service time", p.name),
            ));
        }
    }

    if horizon_of(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            "Simulation horizon (last arrival + total service) overflows u32",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates an algorithm selection.
pub fn validate_algorithm(algorithm: &Algorithm) -> ValidationResult {
    match algorithm {
        Algorithm::RoundRobin { quantum: 0 } => Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            "Round Robin quantum must be a positive integer",
        )]),
        _ => Ok(()),
    }
}

/// Validates processes and algorithm together, collecting every issue.
pub fn validate_input(processes: &[Process], algorithm: &Algorithm) -> ValidationResult {
    let mut errors = Vec::new();
    if let Err(e) = validate_processes(processes) {
        errors.extend(e);
    }
    if let Err(e) = validate_algorithm(algorithm) {
        errors.extend(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn horizon_of(processes: &[Process]) -> Option<u32> {
    let last_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |acc, p| acc.checked_add(p.service))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_processes() -> Vec<Process> {
        vec![
            Process::new("A", 0, 3),
            Process::new("B", 2, 6),
            Process::new("C", 4, 4),
        ]
    }

    #[test]
    fn test_valid_input() {
        let processes = sample_processes();
        assert!(validate_input(&processes, &Algorithm::Fcfs).is_ok());
        assert!(validate_input(&processes, &Algorithm::RoundRobin { quantum: 2 }).is_ok());
    }

    #[test]
    fn test_empty_set() {
        let errors = validate_processes(&[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyProcessSet);
    }

    #[test]
    fn test_zero_service() {
        let processes = vec![Process::new("A", 0, 0)];
        let errors = validate_processes(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroServiceTime));
    }

    #[test]
    fn test_duplicate_name() {
        let processes = vec![Process::new("A", 0, 1), Process::new("A", 3, 1)];
        let errors = validate_processes(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateName && e.message.contains("A")));
    }

    #[test]
    fn test_empty_name() {
        let processes = vec![Process::new("", 0, 1)];
        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyName);
    }

    #[test]
    fn test_horizon_overflow() {
        let processes = vec![Process::new("A", u32::MAX - 1, 1), Process::new("B", 0, 5)];
        let errors = validate_processes(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::HorizonOverflow));
    }

    #[test]
    fn test_zero_quantum() {
        let errors = validate_algorithm(&Algorithm::RoundRobin { quantum: 0 }).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidQuantum);
        assert!(validate_algorithm(&Algorithm::Srt).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        // Empty set + zero quantum
        let errors = validate_input(&[], &Algorithm::RoundRobin { quantum: 0 }).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
