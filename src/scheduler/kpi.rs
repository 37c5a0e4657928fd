//! Simulation quality metrics (KPIs).
//!
//! Computes aggregate performance indicators from a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest finish time |
//! | Mean Turnaround | mean(finish - arrival) |
//! | Mean Normalized Turnaround | mean(turnaround / service) |
//! | Mean Waiting | mean(turnaround - service) |
//! | CPU Utilization | busy units / makespan |
//! | Context Switches | changes of the running process between busy units |
//!
//! # Reference
//! Stallings (2018), "Operating Systems", Ch. 9.2: Scheduling Criteria

use serde::Serialize;

use super::SimulationOutcome;

/// Aggregate performance indicators of one run.
///
/// All time values are in simulation time units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationKpi {
    /// Latest finish time.
    pub makespan: u32,
    /// Mean turnaround time.
    pub mean_turnaround: f64,
    /// Mean normalized turnaround time.
    pub mean_normalized_turnaround: f64,
    /// Mean time spent ready but not running.
    pub mean_waiting: f64,
    /// Fraction of `[0, makespan)` with a process on the CPU (0.0..1.0).
    pub cpu_utilization: f64,
    /// Number of times the CPU switched to a different process.
    pub context_switches: usize,
}

impl SimulationKpi {
    /// Computes KPIs from a finished run.
    pub fn calculate(outcome: &SimulationOutcome) -> Self {
        let metrics = &outcome.metrics;
        let makespan = metrics.makespan();

        let mut total_waiting = 0.0;
        let mut counted = 0usize;
        for (i, p) in outcome.processes.iter().enumerate() {
            if let Some(m) = metrics.get(i) {
                total_waiting += f64::from(m.waiting(p));
                counted += 1;
            }
        }
        let mean_waiting = if counted == 0 {
            0.0
        } else {
            total_waiting / counted as f64
        };

        let busy = (0..makespan)
            .filter(|&t| outcome.timeline.running_at(t).is_some())
            .count();
        let cpu_utilization = if makespan == 0 {
            0.0
        } else {
            busy as f64 / f64::from(makespan)
        };

        let mut context_switches = 0;
        let mut previous: Option<usize> = None;
        for t in 0..makespan {
            if let Some(current) = outcome.timeline.running_at(t) {
                if previous.is_some_and(|p| p != current) {
                    context_switches += 1;
                }
                previous = Some(current);
            }
        }

        Self {
            makespan,
            mean_turnaround: metrics.mean_turnaround(),
            mean_normalized_turnaround: metrics.mean_normalized_turnaround(),
            mean_waiting,
            cpu_utilization,
            context_switches,
        }
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_mean_turnaround: f64, min_utilization: f64) -> bool {
        self.mean_turnaround <= max_mean_turnaround && self.cpu_utilization >= min_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, ProcessSet};
    use crate::scheduler::{simulate, Algorithm};

    fn textbook_set() -> ProcessSet {
        ProcessSet::new(vec![
            Process::new("A", 0, 3),
            Process::new("B", 2, 6),
            Process::new("C", 4, 4),
            Process::new("D", 6, 5),
            Process::new("E", 8, 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_kpi_fcfs() {
        let outcome = simulate(&textbook_set(), &Algorithm::Fcfs).unwrap();
        let kpi = SimulationKpi::calculate(&outcome);

        assert_eq!(kpi.makespan, 20);
        // (3 + 7 + 9 + 12 + 12) / 5
        assert!((kpi.mean_turnaround - 8.6).abs() < 1e-10);
        // (0 + 1 + 5 + 7 + 10) / 5
        assert!((kpi.mean_waiting - 4.6).abs() < 1e-10);
        assert!((kpi.cpu_utilization - 1.0).abs() < 1e-10);
        assert_eq!(kpi.context_switches, 4);
    }

    #[test]
    fn test_kpi_srt_switches() {
        let outcome = simulate(&textbook_set(), &Algorithm::Srt).unwrap();
        let kpi = SimulationKpi::calculate(&outcome);

        // A → B → C → E → B → D
        assert_eq!(kpi.context_switches, 5);
        assert!((kpi.mean_turnaround - 7.2).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_idle_gap_utilization() {
        let processes = ProcessSet::new(vec![
            Process::new("A", 0, 2),
            Process::new("B", 4, 2),
        ])
        .unwrap();
        let outcome = simulate(&processes, &Algorithm::Fcfs).unwrap();
        let kpi = SimulationKpi::calculate(&outcome);

        assert_eq!(kpi.makespan, 6);
        assert!((kpi.cpu_utilization - 4.0 / 6.0).abs() < 1e-10);
        assert_eq!(kpi.context_switches, 1);
        assert!((kpi.mean_waiting - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let outcome = simulate(&textbook_set(), &Algorithm::Fcfs).unwrap();
        let kpi = SimulationKpi::calculate(&outcome);

        assert!(kpi.meets_thresholds(8.6, 1.0));
        assert!(!kpi.meets_thresholds(8.0, 0.0));
        assert!(!kpi.meets_thresholds(100.0, 1.5));
    }
}
