//! Text input parsing.
//!
//! Reads the compact one-line invocation format:
//!
//! ```text
//! <algorithm> <name,arrival,service>... [quantum] [trace|log] [stats]
//! ```
//!
//! | Token | Meaning |
//! |-------|---------|
//! | first | algorithm: `1`..`4` or `fcfs`, `rr`, `spn`, `srt` |
//! | contains `,` | process descriptor |
//! | bare integer | Round Robin quantum |
//! | `trace` / `log` | print the timeline |
//! | `stats` | print the statistics table |
//!
//! Tokens after the algorithm may appear in any order. Every malformed
//! token is reported, not just the first.

use log::debug;

use crate::error::SimulationError;
use crate::models::{Process, ProcessSet};
use crate::scheduler::{Algorithm, AlgorithmKind};
use crate::validation::{ValidationError, ValidationErrorKind};

/// A parsed invocation line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Selected algorithm, with its quantum for Round Robin.
    pub algorithm: Algorithm,
    /// Processes in input order.
    pub processes: Vec<Process>,
    /// Whether the timeline was requested.
    pub show_timeline: bool,
    /// Whether the statistics table was requested.
    pub show_stats: bool,
}

impl Invocation {
    /// Validates the processes and builds the arrival-ordered set.
    pub fn process_set(&self) -> Result<ProcessSet, SimulationError> {
        ProcessSet::new(self.processes.clone())
    }
}

/// Parses a `name,arrival,service` descriptor.
///
/// # Example
/// ```
/// use u_cpusched::input::parse_process;
///
/// let p = parse_process("A,0,3").unwrap();
/// assert_eq!((p.name.as_str(), p.arrival, p.service), ("A", 0, 3));
/// assert!(parse_process("A,0").is_err());
/// ```
pub fn parse_process(descriptor: &str) -> Result<Process, SimulationError> {
    descriptor_to_process(descriptor).map_err(SimulationError::configuration)
}

/// Parses an algorithm selector (`1`..`4` or a case-insensitive name).
pub fn parse_algorithm(selector: &str) -> Result<AlgorithmKind, SimulationError> {
    selector.parse()
}

/// Parses a full invocation line.
///
/// # Errors
/// A configuration error carrying every problem found: unknown algorithm,
/// malformed descriptors, stray tokens, repeated quanta, or Round Robin
/// without a quantum.
pub fn parse_invocation(line: &str) -> Result<Invocation, SimulationError> {
    let mut tokens = line.split_whitespace();
    let Some(selector) = tokens.next() else {
        return Err(SimulationError::configuration(ValidationError::new(
            ValidationErrorKind::MalformedDescriptor,
            "Empty invocation",
        )));
    };

    let mut errors = Vec::new();
    let kind = match parse_algorithm(selector) {
        Ok(kind) => Some(kind),
        Err(e) => {
            errors.extend_from_slice(e.validation_errors());
            None
        }
    };

    let mut processes = Vec::new();
    let mut quantum = None;
    let mut show_timeline = false;
    let mut show_stats = false;

    for token in tokens {
        if token.contains(',') {
            match descriptor_to_process(token) {
                Ok(p) => processes.push(p),
                Err(e) => errors.push(e),
            }
        } else if let Ok(q) = token.parse::<u32>() {
            if quantum.replace(q).is_some() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedDescriptor,
                    format!("Quantum given more than once (last: {q})"),
                ));
            }
        } else {
            match token.to_ascii_lowercase().as_str() {
                "trace" | "log" => show_timeline = true,
                "stats" => show_stats = true,
                _ => errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedDescriptor,
                    format!("Unexpected token '{token}'"),
                )),
            }
        }
    }

    let algorithm = match kind.map(|k| k.with_quantum(quantum)) {
        Some(Ok(algorithm)) => Some(algorithm),
        Some(Err(e)) => {
            errors.extend_from_slice(e.validation_errors());
            None
        }
        None => None,
    };

    match algorithm {
        Some(algorithm) if errors.is_empty() => {
            debug!(
                "Parsed invocation: {} with {} processes",
                algorithm.label(),
                processes.len()
            );
            Ok(Invocation {
                algorithm,
                processes,
                show_timeline,
                show_stats,
            })
        }
        _ => Err(SimulationError::Configuration(errors)),
    }
}

fn descriptor_to_process(descriptor: &str) -> Result<Process, ValidationError> {
    let malformed = |why: &str| {
        ValidationError::new(
            ValidationErrorKind::MalformedDescriptor,
            format!("Malformed process '{descriptor}': {why}"),
        )
    };

    let fields: Vec<&str> = descriptor.split(',').map(str::trim).collect();
    let [name, arrival, service] = fields.as_slice() else {
        return Err(malformed("expected name,arrival,service"));
    };
    if name.is_empty() {
        return Err(malformed("empty name"));
    }
    let arrival = arrival
        .parse::<u32>()
        .map_err(|_| malformed("arrival is not a non-negative integer"))?;
    let service = service
        .parse::<u32>()
        .map_err(|_| malformed("service is not a non-negative integer"))?;

    Ok(Process::new(*name, arrival, service))
}
