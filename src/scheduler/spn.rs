//! Shortest Process Next.
//!
//! Non-preemptive. At time 0 and whenever the CPU frees up, every process
//! that has arrived is admitted to a ready set ordered by service time
//! (ties by arrival order); the shortest runs to completion and the clock
//! jumps to its finish. With nothing ready, the clock jumps to the next
//! arrival.

use log::debug;

use super::SchedulingPolicy;
use crate::dispatching::{rules, ArrivalCursor, DispatchContext, ReadyEntry, ReadySet};
use crate::error::SimulationError;
use crate::models::{Mark, MetricsTable, ProcessSet, Timeline};

/// Shortest Process Next policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestProcessNext;

impl SchedulingPolicy for ShortestProcessNext {
    fn name(&self) -> &'static str {
        "SPN"
    }

    fn run(
        &self,
        processes: &ProcessSet,
        timeline: &mut Timeline,
        metrics: &mut MetricsTable,
    ) -> Result<(), SimulationError> {
        let mut ready = ReadySet::new(rules::ShortestService);
        let mut arrivals = ArrivalCursor::new();
        let mut clock = 0;

        loop {
            for i in arrivals.take_arrived(processes, clock) {
                ready.admit(ReadyEntry::fresh(i, &processes[i]));
            }

            let ctx = DispatchContext::at_time(clock);
            if let Some(entry) = ready.take_best(processes, &ctx) {
                let p = &processes[entry.index];
                let finish = clock + p.service;

                timeline.set_span(entry.index, p.arrival, clock, Mark::Waiting)?;
                timeline.set_span(entry.index, clock, finish, Mark::Running)?;
                metrics.record(entry.index, p, finish)?;
                debug!(
                    "SPN: '{}' dispatched at {clock} over {} waiting, finishes at {finish}",
                    p.name,
                    ready.len()
                );

                clock = finish;
            } else if let Some(next) = arrivals.next_arrival(processes) {
                clock = next;
            } else {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn run(processes: &ProcessSet) -> (Timeline, MetricsTable) {
        let mut timeline = Timeline::for_processes(processes);
        let mut metrics = MetricsTable::new(processes.len());
        ShortestProcessNext
            .run(processes, &mut timeline, &mut metrics)
            .unwrap();
        (timeline, metrics)
    }

    #[test]
    fn test_no_preemption_by_shorter_arrival() {
        let processes = ProcessSet::new(vec![
            Process::new("long", 0, 6),
            Process::new("short", 1, 1),
        ])
        .unwrap();
        let (timeline, metrics) = run(&processes);

        assert_eq!(timeline.running_units(0), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(timeline.burst_count(0), 1);
        assert_eq!(metrics.get(0).unwrap().finish, 6);
        assert_eq!(metrics.get(1).unwrap().finish, 7);
    }

    #[test]
    fn test_shortest_first_among_ready() {
        let processes = ProcessSet::new(vec![
            Process::new("A", 0, 3),
            Process::new("B", 1, 5),
            Process::new("C", 2, 2),
        ])
        .unwrap();
        let (_, metrics) = run(&processes);

        // A runs 0..3; at t=3 B(5) and C(2) wait → C first
        assert_eq!(metrics.get(2).unwrap().finish, 5);
        assert_eq!(metrics.get(1).unwrap().finish, 10);
    }

    #[test]
    fn test_equal_service_uses_arrival_order() {
        let processes = ProcessSet::new(vec![
            Process::new("first", 0, 2),
            Process::new("second", 0, 2),
        ])
        .unwrap();
        let (_, metrics) = run(&processes);

        assert_eq!(metrics.get(0).unwrap().finish, 2);
        assert_eq!(metrics.get(1).unwrap().finish, 4);
    }

    #[test]
    fn test_jumps_over_idle_gap() {
        let processes = ProcessSet::new(vec![
            Process::new("A", 0, 1),
            Process::new("B", 4, 2),
        ])
        .unwrap();
        let (timeline, metrics) = run(&processes);

        assert_eq!(metrics.get(1).unwrap().finish, 6);
        let row: String = timeline.row(1).map(Mark::glyph).collect();
        assert_eq!(row, "    ** ");
    }
}
