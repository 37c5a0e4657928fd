//! Algorithm selection.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Fcfs, RoundRobin, SchedulingPolicy, ShortestProcessNext, ShortestRemainingTime};
use crate::error::SimulationError;
use crate::validation::{ValidationError, ValidationErrorKind};

/// A fully parameterized scheduling algorithm.
///
/// Serializes with an internal `kind` tag:
/// `{"kind": "fcfs"}`, `{"kind": "round_robin", "quantum": 4}`,
/// `{"kind": "spn"}`, `{"kind": "srt"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Algorithm {
    /// First Come First Serve (non-preemptive).
    Fcfs,
    /// Round Robin with a fixed quantum (preemptive).
    RoundRobin {
        /// Time-slice length in units.
        quantum: u32,
    },
    /// Shortest Process Next (non-preemptive).
    Spn,
    /// Shortest Remaining Time (preemptive).
    Srt,
}

impl Algorithm {
    /// Short label used in reports: `FCFS`, `RR-<q>`, `SPN`, `SRT`.
    pub fn label(&self) -> String {
        match self {
            Self::Fcfs => "FCFS".to_string(),
            Self::RoundRobin { quantum } => format!("RR-{quantum}"),
            Self::Spn => "SPN".to_string(),
            Self::Srt => "SRT".to_string(),
        }
    }

    /// Whether a running process can be interrupted.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin { .. } | Self::Srt)
    }

    /// Round Robin quantum, `None` for other algorithms.
    pub fn quantum(&self) -> Option<u32> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// The algorithm family.
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Fcfs => AlgorithmKind::Fcfs,
            Self::RoundRobin { .. } => AlgorithmKind::RoundRobin,
            Self::Spn => AlgorithmKind::Spn,
            Self::Srt => AlgorithmKind::Srt,
        }
    }

    /// Policy implementing this algorithm.
    pub fn policy(&self) -> Box<dyn SchedulingPolicy> {
        match *self {
            Self::Fcfs => Box::new(Fcfs),
            Self::RoundRobin { quantum } => Box::new(RoundRobin::new(quantum)),
            Self::Spn => Box::new(ShortestProcessNext),
            Self::Srt => Box::new(ShortestRemainingTime),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "Round Robin (quantum {quantum})"),
            other => write!(f, "{}", other.kind().description()),
        }
    }
}

/// Algorithm family without parameters.
///
/// Parses from names (`fcfs`, `rr`, `round_robin`, `spn`, `srt`, case
/// insensitive) or from the menu numbers `1`–`4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// First Come First Serve.
    Fcfs,
    /// Round Robin.
    RoundRobin,
    /// Shortest Process Next.
    Spn,
    /// Shortest Remaining Time.
    Srt,
}

impl AlgorithmKind {
    /// Full algorithm name.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fcfs => "First Come First Serve",
            Self::RoundRobin => "Round Robin",
            Self::Spn => "Shortest Process Next",
            Self::Srt => "Shortest Remaining Time",
        }
    }

    /// Whether the family needs a quantum.
    pub fn needs_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Builds the algorithm, attaching the quantum for Round Robin.
    ///
    /// Round Robin without a quantum is a configuration error; a quantum
    /// given to another family is ignored.
    pub fn with_quantum(self, quantum: Option<u32>) -> Result<Algorithm, SimulationError> {
        if let Some(q) = quantum.filter(|_| !self.needs_quantum()) {
            warn!("{} takes no quantum; ignoring {q}", self.description());
        }
        match (self, quantum) {
            (Self::Fcfs, _) => Ok(Algorithm::Fcfs),
            (Self::Spn, _) => Ok(Algorithm::Spn),
            (Self::Srt, _) => Ok(Algorithm::Srt),
            (Self::RoundRobin, Some(quantum)) => Ok(Algorithm::RoundRobin { quantum }),
            (Self::RoundRobin, None) => Err(SimulationError::configuration(ValidationError::new(
                ValidationErrorKind::MissingQuantum,
                "Round Robin requires a quantum",
            ))),
        }
    }
}

impl FromStr for AlgorithmKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "fcfs" => Ok(Self::Fcfs),
            "2" | "rr" | "round_robin" | "round-robin" => Ok(Self::RoundRobin),
            "3" | "spn" => Ok(Self::Spn),
            "4" | "srt" => Ok(Self::Srt),
            _ => Err(SimulationError::configuration(ValidationError::new(
                ValidationErrorKind::UnknownAlgorithm,
                format!("Unknown algorithm '{s}'"),
            ))),
        }
    }
}
