//! Process and process-set models.
//!
//! A process is a unit of CPU work known before the simulation starts:
//! it becomes eligible at its arrival time and needs `service` units of
//! CPU to complete.
//!
//! # Time Representation
//! All times are integer time units relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::validation::validate_processes;

/// A process to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Process name (row label in timelines and reports).
    pub name: String,
    /// Time unit at which the process becomes eligible to run.
    pub arrival: u32,
    /// Total execution units required.
    pub service: u32,
}

impl Process {
    /// Creates a new process.
    pub fn new(name: impl Into<String>, arrival: u32, service: u32) -> Self {
        Self {
            name: name.into(),
            arrival,
            service,
        }
    }

    /// Earliest possible finish time (run uninterrupted on arrival).
    #[inline]
    pub fn earliest_finish(&self) -> u32 {
        self.arrival + self.service
    }
}

/// A validated, arrival-ordered set of processes.
///
/// Processes are stably sorted by arrival time, so processes arriving at
/// the same instant keep their input order. Indices into the set are the
/// process identities used by timelines, metrics and ready queues.
///
/// # Invariants
/// - Non-empty.
/// - Every service time is positive.
/// - Names are unique.
/// - `horizon()` fits in `u32`.
///
/// # Example
/// ```
/// use u_cpusched::models::{Process, ProcessSet};
///
/// let set = ProcessSet::new(vec![
///     Process::new("B", 2, 6),
///     Process::new("A", 0, 3),
/// ]).unwrap();
///
/// assert_eq!(set.get(0).unwrap().name, "A");
/// assert_eq!(set.horizon(), 2 + 3 + 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSet {
    processes: Vec<Process>,
    horizon: u32,
}

impl ProcessSet {
    /// Validates and sorts the given processes.
    ///
    /// All validation problems are reported together as a
    /// [`SimulationError::Configuration`].
    pub fn new(mut processes: Vec<Process>) -> Result<Self, SimulationError> {
        validate_processes(&processes).map_err(SimulationError::Configuration)?;

        // Vec::sort_by_key is stable: equal arrivals keep input order.
        processes.sort_by_key(|p| p.arrival);

        // Validation guarantees this sum does not overflow.
        let last_arrival = processes.last().map_or(0, |p| p.arrival);
        let total_service: u32 = processes.iter().map(|p| p.service).sum();

        Ok(Self {
            processes,
            horizon: last_arrival + total_service,
        })
    }

    /// Number of processes.
    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the set is empty. Never true for a constructed set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Simulation horizon: `max(arrival) + sum(service)`.
    ///
    /// Every algorithm finishes every process within this many units.
    /// A run allocates a `horizon × len` timeline and the preemptive
    /// policies step through every unit, so a single very late arrival
    /// (e.g. at 3_000_000_000) costs gigabytes of memory and as many
    /// iterations even when the set is tiny.
    #[inline]
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Process at the given (arrival-sorted) index.
    pub fn get(&self, index: usize) -> Option<&Process> {
        self.processes.get(index)
    }

    /// Iterates processes in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    /// Processes as a slice, in arrival order.
    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    /// Index of the process with the given name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.processes.iter().position(|p| p.name == name)
    }

    /// Largest service time in the set.
    pub fn max_service(&self) -> u32 {
        self.processes.iter().map(|p| p.service).max().unwrap_or(0)
    }

    /// Sum of all service times (total busy units of any schedule).
    pub fn total_service(&self) -> u32 {
        self.processes.iter().map(|p| p.service).sum()
    }
}

impl std::ops::Index<usize> for ProcessSet {
    type Output = Process;

    fn index(&self, index: usize) -> &Process {
        &self.processes[index]
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
