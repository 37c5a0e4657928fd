//! Random workload generation.
//!
//! Builds valid process sets from a seeded RNG, for demos and for
//! exercising the policies on inputs nobody wrote by hand. The same seed
//! always yields the same set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::{Process, ProcessSet};

/// Parameters for a random process set.
///
/// # Example
/// ```
/// use u_cpusched::workload::WorkloadGenerator;
///
/// let set = WorkloadGenerator::new(42).with_process_count(8).generate().unwrap();
/// assert_eq!(set.len(), 8);
/// assert_eq!(set, WorkloadGenerator::new(42).with_process_count(8).generate().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// RNG seed.
    pub seed: u64,
    /// Number of processes (at least 1).
    pub process_count: usize,
    /// Arrivals are drawn from `0..=max_arrival`.
    pub max_arrival: u32,
    /// Service times are drawn from `1..=max_service`.
    pub max_service: u32,
}

impl WorkloadGenerator {
    /// Creates a generator with default bounds (5 processes, arrivals up
    /// to 10, service up to 8).
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            process_count: 5,
            max_arrival: 10,
            max_service: 8,
        }
    }

    /// Sets the number of processes.
    pub fn with_process_count(mut self, process_count: usize) -> Self {
        self.process_count = process_count;
        self
    }

    /// Sets the latest possible arrival.
    pub fn with_max_arrival(mut self, max_arrival: u32) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the longest possible service time.
    pub fn with_max_service(mut self, max_service: u32) -> Self {
        self.max_service = max_service;
        self
    }

    /// Generates processes named `P1..Pn`.
    ///
    /// Invalid parameters (zero processes) surface as the usual
    /// configuration errors of [`ProcessSet::new`].
    pub fn generate(&self) -> Result<ProcessSet, SimulationError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let max_service = self.max_service.max(1);

        let processes = (1..=self.process_count)
            .map(|n| {
                let arrival = rng.random_range(0..=self.max_arrival);
                let service = rng.random_range(1..=max_service);
                Process::new(format!("P{n}"), arrival, service)
            })
            .collect();

        ProcessSet::new(processes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mark;
    use crate::scheduler::{simulate, Algorithm, SimulationKpi};

    #[test]
    fn test_deterministic() {
        let a = WorkloadGenerator::new(7).generate().unwrap();
        let b = WorkloadGenerator::new(7).generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounds() {
        let set = WorkloadGenerator::new(3)
            .with_process_count(50)
            .with_max_arrival(4)
            .with_max_service(3)
            .generate()
            .unwrap();

        assert_eq!(set.len(), 50);
        assert!(set.iter().all(|p| p.arrival <= 4));
        assert!(set.iter().all(|p| (1..=3).contains(&p.service)));
    }

    #[test]
    fn test_zero_processes_rejected() {
        let err = WorkloadGenerator::new(1)
            .with_process_count(0)
            .generate()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_random_sets_satisfy_invariants() {
        let algorithms = [
            Algorithm::Fcfs,
            Algorithm::RoundRobin { quantum: 1 },
            Algorithm::RoundRobin { quantum: 3 },
            Algorithm::Spn,
            Algorithm::Srt,
        ];

        for seed in 0..40 {
            let processes = WorkloadGenerator::new(seed)
                .with_process_count(1 + (seed as usize % 9))
                .with_max_arrival(12)
                .with_max_service(6)
                .generate()
                .unwrap();

            for algorithm in &algorithms {
                let outcome = simulate(&processes, algorithm).unwrap();
                for (i, p) in processes.iter().enumerate() {
                    let m = outcome.metrics.get(i).unwrap();
                    assert_eq!(outcome.timeline.running_count(i), p.service);
                    assert!(m.finish >= p.earliest_finish());
                    for t in p.arrival..m.finish {
                        assert_ne!(outcome.timeline.get(t, i), Some(Mark::Idle));
                    }
                }

                let kpi = SimulationKpi::calculate(&outcome);
                assert!(kpi.cpu_utilization > 0.0 && kpi.cpu_utilization <= 1.0);
            }

            // Non-preemptive policies run every process in one burst.
            for algorithm in [Algorithm::Fcfs, Algorithm::Spn] {
                let outcome = simulate(&processes, &algorithm).unwrap();
                for i in 0..processes.len() {
                    assert_eq!(outcome.timeline.burst_count(i), 1);
                }
            }
        }
    }

    #[test]
    fn test_large_quantum_equals_fcfs_on_random_sets() {
        for seed in 100..120 {
            let processes = WorkloadGenerator::new(seed).generate().unwrap();
            let quantum = processes.max_service();
            let rr = simulate(&processes, &Algorithm::RoundRobin { quantum }).unwrap();
            let fcfs = simulate(&processes, &Algorithm::Fcfs).unwrap();
            assert_eq!(rr.timeline, fcfs.timeline);
        }
    }
}
