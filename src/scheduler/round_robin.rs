//! Round Robin.
//!
//! Preemptive with a fixed quantum. A FIFO queue holds the runnable
//! processes; the head runs one unit at a time until its quantum is used
//! up or it completes.
//!
//! # Algorithm
//! For each unit `t`:
//! 1. The queue head (if any) runs: remaining and quantum counter drop by one.
//! 2. Processes arriving at `t + 1` are enqueued.
//! 3. Completed → recorded and dequeued. Quantum exhausted → moved to the
//!    tail. Either way the quantum counter resets.
//!
//! Step 2 precedes step 3, so a process arriving exactly when a quantum
//! expires is queued ahead of the preempted process.

use std::collections::VecDeque;

use log::{debug, trace};

use super::{fill_wait_times, SchedulingPolicy};
use crate::dispatching::{ArrivalCursor, ReadyEntry};
use crate::error::SimulationError;
use crate::models::{Mark, MetricsTable, ProcessSet, Timeline};
use crate::validation::validate_algorithm;

/// Round Robin policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: u32,
}

impl RoundRobin {
    /// Creates a Round Robin policy with the given quantum.
    ///
    /// A zero quantum is rejected by [`SchedulingPolicy::run`] before any
    /// simulation work.
    pub fn new(quantum: u32) -> Self {
        Self { quantum }
    }

    /// Time-slice length.
    pub fn quantum(&self) -> u32 {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn run(
        &self,
        processes: &ProcessSet,
        timeline: &mut Timeline,
        metrics: &mut MetricsTable,
    ) -> Result<(), SimulationError> {
        validate_algorithm(&super::Algorithm::RoundRobin {
            quantum: self.quantum,
        })
        .map_err(SimulationError::Configuration)?;

        let mut queue: VecDeque<ReadyEntry> = VecDeque::new();
        let mut arrivals = ArrivalCursor::new();
        let mut slice_left = self.quantum;

        enqueue_arrivals(&mut queue, &mut arrivals, processes, 0);

        for t in 0..processes.horizon() {
            let Some(head) = queue.front_mut() else {
                enqueue_arrivals(&mut queue, &mut arrivals, processes, t + 1);
                continue;
            };

            head.remaining -= 1;
            let entry = *head;
            slice_left -= 1;
            timeline.set(t, entry.index, Mark::Running)?;
            trace!("RR t={t}: '{}' runs, {} left", processes[entry.index].name, entry.remaining);

            enqueue_arrivals(&mut queue, &mut arrivals, processes, t + 1);

            if entry.is_done() {
                queue.pop_front();
                let p = &processes[entry.index];
                metrics.record(entry.index, p, t + 1)?;
                debug!("RR: '{}' finished at {}", p.name, t + 1);
                slice_left = self.quantum;
            } else if slice_left == 0 {
                if let Some(preempted) = queue.pop_front() {
                    queue.push_back(preempted);
                }
                slice_left = self.quantum;
            }
        }

        fill_wait_times(processes, timeline, metrics)
    }
}

fn enqueue_arrivals(
    queue: &mut VecDeque<ReadyEntry>,
    arrivals: &mut ArrivalCursor,
    processes: &ProcessSet,
    time: u32,
) {
    for i in arrivals.take_arrived(processes, time) {
        queue.push_back(ReadyEntry::fresh(i, &processes[i]));
    }
}
