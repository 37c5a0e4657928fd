//! JSON run configuration.
//!
//! A configuration file names the algorithm, lists the processes and
//! selects the reports to print:
//!
//! ```json
//! {
//!   "algorithm": { "kind": "round_robin", "quantum": 4 },
//!   "processes": [
//!     { "name": "A", "arrival": 0, "service": 3 },
//!     { "name": "B", "arrival": 2, "service": 6 }
//!   ],
//!   "output": { "timeline": true, "stats": true }
//! }
//! ```
//!
//! `output` may be omitted; both reports are then off.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SimulationError;
use crate::input::Invocation;
use crate::models::{Process, ProcessSet};
use crate::scheduler::Algorithm;
use crate::validation::validate_algorithm;

/// Errors loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The contents are not valid configuration JSON.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration parsed but describes an invalid run.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Which reports to print after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Print the per-unit timeline.
    pub timeline: bool,
    /// Print the statistics table.
    pub stats: bool,
}

/// A complete simulation run description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Algorithm to run.
    pub algorithm: Algorithm,
    /// Processes, in any order.
    pub processes: Vec<Process>,
    /// Report selection.
    #[serde(default)]
    pub output: OutputOptions,
}

impl SimulationConfig {
    /// Creates a configuration with no reports selected.
    pub fn new(algorithm: Algorithm, processes: Vec<Process>) -> Self {
        Self {
            algorithm,
            processes,
            output: OutputOptions::default(),
        }
    }

    /// Sets the report selection.
    pub fn with_output(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates processes and algorithm together and builds the run inputs.
    ///
    /// Every problem in either part is reported in one configuration error.
    pub fn build(&self) -> Result<(ProcessSet, Algorithm), SimulationError> {
        let processes = ProcessSet::new(self.processes.clone());
        match (processes, validate_algorithm(&self.algorithm)) {
            (Ok(processes), Ok(())) => Ok((processes, self.algorithm)),
            (Ok(_), Err(errors)) => Err(SimulationError::Configuration(errors)),
            (Err(e), algorithm) => {
                let mut errors = e.validation_errors().to_vec();
                errors.extend(algorithm.err().unwrap_or_default());
                Err(SimulationError::Configuration(errors))
            }
        }
    }
}

impl From<Invocation> for SimulationConfig {
    fn from(invocation: Invocation) -> Self {
        Self {
            algorithm: invocation.algorithm,
            processes: invocation.processes,
            output: OutputOptions {
                timeline: invocation.show_timeline,
                stats: invocation.show_stats,
            },
        }
    }
}
