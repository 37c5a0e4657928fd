//! First Come First Serve.
//!
//! Non-preemptive. Processes run strictly in arrival order; each starts at
//! `max(arrival, previous finish)` and runs to completion.
//!
//! # Complexity
//! O(n + horizon) for n processes.

use log::debug;

use super::SchedulingPolicy;
use crate::error::SimulationError;
use crate::models::{Mark, MetricsTable, ProcessSet, Timeline};

/// First Come First Serve policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn run(
        &self,
        processes: &ProcessSet,
        timeline: &mut Timeline,
        metrics: &mut MetricsTable,
    ) -> Result<(), SimulationError> {
        let mut clock = 0;

        for (i, p) in processes.iter().enumerate() {
            let start = clock.max(p.arrival);
            let finish = start + p.service;

            timeline.set_span(i, p.arrival, start, Mark::Waiting)?;
            timeline.set_span(i, start, finish, Mark::Running)?;
            metrics.record(i, p, finish)?;
            debug!("FCFS: '{}' runs [{start}, {finish})", p.name);

            clock = finish;
        }

        Ok(())
    }
}
