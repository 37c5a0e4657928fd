//! Scheduling policies, simulation driver and KPI evaluation.
//!
//! Four single-core policies share one contract: given an arrival-ordered
//! [`ProcessSet`], fill a [`Timeline`] and a [`MetricsTable`] for every
//! process.
//!
//! | Policy | Preemptive | Ready structure |
//! |--------|-----------|-----------------|
//! | FCFS | no | arrival order |
//! | Round Robin | yes (quantum) | FIFO queue |
//! | SPN | no | ready set by service time |
//! | SRT | yes (every unit) | ready set by remaining time |
//!
//! # KPI
//!
//! `SimulationKpi` derives makespan, mean turnaround, mean normalized
//! turnaround, mean waiting time, CPU utilization and context switches.
//!
//! # References
//!
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 9
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

mod algorithm;
mod fcfs;
mod kpi;
mod round_robin;
mod simulation;
mod spn;
mod srt;

pub use algorithm::{Algorithm, AlgorithmKind};
pub use fcfs::Fcfs;
pub use kpi::SimulationKpi;
pub use round_robin::RoundRobin;
pub use simulation::{simulate, SimulationOutcome};
pub use spn::ShortestProcessNext;
pub use srt::ShortestRemainingTime;

use std::fmt::Debug;

use crate::error::SimulationError;
use crate::models::{MetricsTable, ProcessSet, Timeline};

/// A scheduling discipline.
///
/// `run` receives freshly allocated, all-idle outputs sized for the
/// process set and owns them for the duration of the call.
pub trait SchedulingPolicy: Debug {
    /// Policy name (e.g., "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Simulates the process set, populating timeline and metrics.
    fn run(
        &self,
        processes: &ProcessSet,
        timeline: &mut Timeline,
        metrics: &mut MetricsTable,
    ) -> Result<(), SimulationError>;
}

/// Marks every non-running cell between arrival and finish as waiting.
///
/// Processes without a recorded finish are left untouched; the
/// post-run check reports them.
pub(crate) fn fill_wait_times(
    processes: &ProcessSet,
    timeline: &mut Timeline,
    metrics: &MetricsTable,
) -> Result<(), SimulationError> {
    for (i, p) in processes.iter().enumerate() {
        if let Some(m) = metrics.get(i) {
            timeline.fill_wait(i, p.arrival, m.finish)?;
        }
    }
    Ok(())
}
