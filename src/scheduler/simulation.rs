//! Simulation driver.
//!
//! Validates the algorithm, allocates fresh outputs, runs exactly one
//! policy and checks the result before handing it out. A failed run
//! returns no partial outcome.

use log::info;
use serde::Serialize;

use crate::error::SimulationError;
use crate::models::{Mark, MetricsTable, ProcessSet, Timeline};
use crate::validation::validate_algorithm;

use super::Algorithm;

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    /// Algorithm that produced this outcome.
    pub algorithm: Algorithm,
    /// Simulated processes, in arrival order.
    pub processes: ProcessSet,
    /// Per-unit execution grid.
    pub timeline: Timeline,
    /// Per-process completion metrics (complete for every process).
    pub metrics: MetricsTable,
}

/// Runs one algorithm over a process set.
///
/// Each call owns freshly allocated outputs, so consecutive runs over the
/// same process set are independent.
///
/// # Errors
/// - [`SimulationError::Configuration`] for a zero Round Robin quantum,
///   before any simulation work.
/// - [`SimulationError::InvariantViolation`] if the finished run is
///   inconsistent (unreachable on valid input).
///
/// # Example
/// ```
/// use u_cpusched::models::{Process, ProcessSet};
/// use u_cpusched::scheduler::{simulate, Algorithm};
///
/// let processes = ProcessSet::new(vec![
///     Process::new("A", 0, 3),
///     Process::new("B", 2, 6),
/// ]).unwrap();
///
/// let outcome = simulate(&processes, &Algorithm::Fcfs).unwrap();
/// assert_eq!(outcome.metrics.get(1).unwrap().finish, 9);
/// ```
pub fn simulate(
    processes: &ProcessSet,
    algorithm: &Algorithm,
) -> Result<SimulationOutcome, SimulationError> {
    validate_algorithm(algorithm).map_err(SimulationError::Configuration)?;

    let policy = algorithm.policy();
    info!(
        "Simulating {} over {} processes, horizon {}",
        algorithm.label(),
        processes.len(),
        processes.horizon()
    );

    let mut timeline = Timeline::for_processes(processes);
    let mut metrics = MetricsTable::new(processes.len());
    policy.run(processes, &mut timeline, &mut metrics)?;
    check_outcome(processes, &timeline, &metrics)?;

    info!(
        "{} done: makespan {}, mean turnaround {:.2}",
        algorithm.label(),
        metrics.makespan(),
        metrics.mean_turnaround()
    );

    Ok(SimulationOutcome {
        algorithm: *algorithm,
        processes: processes.clone(),
        timeline,
        metrics,
    })
}

impl SimulationOutcome {
    /// Mean turnaround time.
    pub fn mean_turnaround(&self) -> f64 {
        self.metrics.mean_turnaround()
    }

    /// Mean normalized turnaround time.
    pub fn mean_normalized_turnaround(&self) -> f64 {
        self.metrics.mean_normalized_turnaround()
    }

    /// Process names in completion order (ties by arrival order).
    pub fn completion_order(&self) -> Vec<&str> {
        let mut order: Vec<(u32, usize)> = self
            .metrics
            .iter()
            .enumerate()
            .map(|(i, m)| (m.finish, i))
            .collect();
        order.sort_unstable();
        order
            .into_iter()
            .map(|(_, i)| self.processes[i].name.as_str())
            .collect()
    }
}

/// Verifies a finished run.
///
/// Checks, per process: a metrics entry exists; running cells equal the
/// service time; no running cell lies outside `[arrival, finish)`; no
/// cell before arrival is marked. Per unit: at most one process runs.
fn check_outcome(
    processes: &ProcessSet,
    timeline: &Timeline,
    metrics: &MetricsTable,
) -> Result<(), SimulationError> {
    if !metrics.is_complete() {
        let missing: Vec<&str> = metrics
            .missing()
            .into_iter()
            .map(|i| processes[i].name.as_str())
            .collect();
        return Err(SimulationError::invariant(format!(
            "processes never completed within horizon {}: {}",
            processes.horizon(),
            missing.join(", ")
        )));
    }

    for (i, p) in processes.iter().enumerate() {
        let finish = metrics.get(i).map_or(0, |m| m.finish);

        let running = timeline.running_count(i);
        if running != p.service {
            return Err(SimulationError::invariant(format!(
                "process '{}' ran {running} units, service is {}",
                p.name, p.service
            )));
        }

        for (t, mark) in (0..).zip(timeline.row(i)) {
            let outside = t < p.arrival || t >= finish;
            if outside && mark != Mark::Idle {
                return Err(SimulationError::invariant(format!(
                    "process '{}' marked {mark:?} at t={t} outside [{}, {finish})",
                    p.name, p.arrival
                )));
            }
        }
    }

    for t in 0..timeline.horizon() {
        let busy = (0..timeline.process_count())
            .filter(|&i| timeline.get(t, i) == Some(Mark::Running))
            .count();
        if busy > 1 {
            return Err(SimulationError::invariant(format!(
                "{busy} processes running at t={t} on a single core"
            )));
        }
    }

    Ok(())
}
