//! Shortest Remaining Time.
//!
//! Preemptive. Every unit, newly arrived processes join a ready set
//! ordered by remaining service; the entry with the least remaining time
//! runs for one unit.
//!
//! # Tie-breaking
//! The process that ran in the previous unit keeps the CPU on an equal
//! remaining time: a newcomer preempts only when strictly shorter. Other
//! ties go to the earlier arrival.

use log::{debug, trace};

use super::{fill_wait_times, SchedulingPolicy};
use crate::dispatching::{rules, ArrivalCursor, DispatchContext, ReadyEntry, ReadySet, TieBreaker};
use crate::error::SimulationError;
use crate::models::{Mark, MetricsTable, ProcessSet, Timeline};

/// Shortest Remaining Time policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestRemainingTime;

impl SchedulingPolicy for ShortestRemainingTime {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn run(
        &self,
        processes: &ProcessSet,
        timeline: &mut Timeline,
        metrics: &mut MetricsTable,
    ) -> Result<(), SimulationError> {
        let mut ready =
            ReadySet::new(rules::ShortestRemaining).with_tie_breaker(TieBreaker::Incumbent);
        let mut arrivals = ArrivalCursor::new();
        let mut running: Option<usize> = None;

        for t in 0..processes.horizon() {
            for i in arrivals.take_arrived(processes, t) {
                ready.admit(ReadyEntry::fresh(i, &processes[i]));
            }

            let ctx = DispatchContext::at_time(t).with_running(running);
            let Some(mut entry) = ready.take_best(processes, &ctx) else {
                running = None;
                if arrivals.is_exhausted(processes) {
                    break;
                }
                continue;
            };

            if let Some(prev) = running.filter(|&r| r != entry.index) {
                debug!(
                    "SRT t={t}: '{}' preempts '{}'",
                    processes[entry.index].name, processes[prev].name
                );
            }

            timeline.set(t, entry.index, Mark::Running)?;
            entry.remaining -= 1;
            trace!("SRT t={t}: '{}' runs, {} left", processes[entry.index].name, entry.remaining);

            if entry.is_done() {
                let p = &processes[entry.index];
                metrics.record(entry.index, p, t + 1)?;
                debug!("SRT: '{}' finished at {}", p.name, t + 1);
                running = None;
            } else {
                running = Some(entry.index);
                ready.admit(entry);
            }
        }

        fill_wait_times(processes, timeline, metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn run(processes: &ProcessSet) -> (Timeline, MetricsTable) {
        let mut timeline = Timeline::for_processes(processes);
        let mut metrics = MetricsTable::new(processes.len());
        ShortestRemainingTime
            .run(processes, &mut timeline, &mut metrics)
            .unwrap();
        (timeline, metrics)
    }

    #[test]
    fn test_shorter_arrival_preempts() {
        let processes = ProcessSet::new(vec![
            Process::new("long", 0, 5),
            Process::new("short", 1, 2),
        ])
        .unwrap();
        let (timeline, metrics) = run(&processes);

        assert_eq!(timeline.running_units(0), vec![0, 3, 4, 5, 6]);
        assert_eq!(timeline.running_units(1), vec![1, 2]);
        assert_eq!(metrics.get(1).unwrap().finish, 3);
        assert_eq!(metrics.get(0).unwrap().finish, 7);
    }

    #[test]
    fn test_equal_newcomer_does_not_preempt() {
        // At t=1, A has 3 left and B arrives with 3: A keeps running.
        let processes = ProcessSet::new(vec![
            Process::new("A", 0, 4),
            Process::new("B", 1, 3),
        ])
        .unwrap();
        let (timeline, metrics) = run(&processes);

        assert_eq!(timeline.running_units(0), vec![0, 1, 2, 3]);
        assert_eq!(metrics.get(0).unwrap().finish, 4);
        assert_eq!(metrics.get(1).unwrap().finish, 7);
    }

    #[test]
    fn test_equal_waiting_uses_arrival_order() {
        // After C finishes, A and B both have 2 left: A arrived first.
        let processes = ProcessSet::new(vec![
            Process::new("A", 0, 3),
            Process::new("B", 0, 3),
            Process::new("C", 1, 1),
        ])
        .unwrap();
        let (timeline, _) = run(&processes);

        let order: Vec<Option<usize>> = (0..timeline.horizon()).map(|t| timeline.running_at(t)).collect();
        assert_eq!(
            order,
            vec![Some(0), Some(2), Some(0), Some(0), Some(1), Some(1), Some(1), None]
        );
    }

    #[test]
    fn test_wait_cells_between_bursts() {
        let processes = ProcessSet::new(vec![
            Process::new("long", 0, 3),
            Process::new("short", 1, 1),
        ])
        .unwrap();
        let (timeline, _) = run(&processes);

        let row: String = timeline.row(0).map(Mark::glyph).collect();
        assert_eq!(row, "*.** ");
    }
}
