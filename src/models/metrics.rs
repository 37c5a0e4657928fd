//! Per-process completion metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Finish | Time unit right after the last execution unit |
//! | Turnaround | finish - arrival |
//! | Normalized turnaround | turnaround / service |
//!
//! Aggregates (means) are derived from the entries, never stored.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::Process;

/// Completion metrics of one process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Time unit after the last execution unit.
    pub finish: u32,
    /// `finish - arrival`.
    pub turnaround: u32,
    /// `turnaround / service`.
    pub normalized_turnaround: f64,
}

impl ProcessMetrics {
    /// Computes metrics for a process finishing at `finish`.
    ///
    /// # Errors
    /// [`SimulationError::InvariantViolation`] if `finish` precedes the
    /// arrival.
    pub fn compute(process: &Process, finish: u32) -> Result<Self, SimulationError> {
        let turnaround = finish.checked_sub(process.arrival).ok_or_else(|| {
            SimulationError::invariant(format!(
                "process '{}' finished at {finish}, before its arrival at {}",
                process.name, process.arrival
            ))
        })?;
        Ok(Self {
            finish,
            turnaround,
            normalized_turnaround: f64::from(turnaround) / f64::from(process.service),
        })
    }

    /// Units spent waiting: `turnaround - service`.
    #[inline]
    pub fn waiting(&self, process: &Process) -> u32 {
        self.turnaround.saturating_sub(process.service)
    }
}

/// Write-once metrics slots, one per process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsTable {
    entries: Vec<Option<ProcessMetrics>>,
}

impl MetricsTable {
    /// Creates a table with `process_count` empty slots.
    pub fn new(process_count: usize) -> Self {
        Self {
            entries: vec![None; process_count],
        }
    }

    /// Records the completion of process `index` at `finish`.
    ///
    /// Each slot may be written exactly once.
    pub fn record(
        &mut self,
        index: usize,
        process: &Process,
        finish: u32,
    ) -> Result<ProcessMetrics, SimulationError> {
        if finish < process.earliest_finish() {
            return Err(SimulationError::invariant(format!(
                "process '{}' finished at {finish}, before arrival + service = {}",
                process.name,
                process.earliest_finish()
            )));
        }
        let slot = self.entries.get_mut(index).ok_or_else(|| {
            SimulationError::invariant(format!("no metrics slot for process index {index}"))
        })?;
        if slot.is_some() {
            return Err(SimulationError::invariant(format!(
                "process '{}' completed twice",
                process.name
            )));
        }
        let metrics = ProcessMetrics::compute(process, finish)?;
        *slot = Some(metrics);
        Ok(metrics)
    }

    /// Metrics of process `index`, if recorded.
    pub fn get(&self, index: usize) -> Option<&ProcessMetrics> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no slots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every slot has been recorded.
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(Option::is_some)
    }

    /// Indices of processes without a recorded completion.
    pub fn missing(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.is_none().then_some(i))
            .collect()
    }

    /// Recorded entries in process order.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessMetrics> + '_ {
        self.entries.iter().flatten()
    }

    /// Mean turnaround over recorded entries (0.0 when none).
    pub fn mean_turnaround(&self) -> f64 {
        self.mean(|m| f64::from(m.turnaround))
    }

    /// Mean normalized turnaround over recorded entries (0.0 when none).
    pub fn mean_normalized_turnaround(&self) -> f64 {
        self.mean(|m| m.normalized_turnaround)
    }

    /// Latest finish time (0 when none).
    pub fn makespan(&self) -> u32 {
        self.iter().map(|m| m.finish).max().unwrap_or(0)
    }

    fn mean(&self, value: impl Fn(&ProcessMetrics) -> f64) -> f64 {
        let (sum, count) = self
            .iter()
            .fold((0.0, 0usize), |(sum, count), m| (sum + value(m), count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute() {
        let p = Process::new("B", 2, 6);
        let m = ProcessMetrics::compute(&p, 9).unwrap();
        assert_eq!(m.finish, 9);
        assert_eq!(m.turnaround, 7);
        assert!((m.normalized_turnaround - 7.0 / 6.0).abs() < 1e-10);
        assert_eq!(m.waiting(&p), 1);
    }

    #[test]
    fn test_compute_finish_before_arrival() {
        let p = Process::new("A", 5, 1);
        let err = ProcessMetrics::compute(&p, 2).unwrap_err();
        assert!(matches!(err, SimulationError::InvariantViolation(_)));
        assert!(err.to_string().contains("before its arrival"));
    }

    #[test]
    fn test_record_once() {
        let p = Process::new("A", 0, 3);
        let mut table = MetricsTable::new(1);
        assert!(!table.is_complete());
        assert_eq!(table.missing(), vec![0]);

        table.record(0, &p, 3).unwrap();
        assert!(table.is_complete());

        let err = table.record(0, &p, 4).unwrap_err();
        assert!(matches!(err, SimulationError::InvariantViolation(_)));
        assert_eq!(table.get(0).unwrap().finish, 3);
    }

    #[test]
    fn test_record_too_early() {
        let p = Process::new("A", 2, 3);
        let mut table = MetricsTable::new(1);
        assert!(table.record(0, &p, 4).is_err());
        assert!(table.get(0).is_none());
    }

    #[test]
    fn test_record_bad_index() {
        let p = Process::new("A", 0, 1);
        let mut table = MetricsTable::new(1);
        assert!(table.record(3, &p, 1).is_err());
    }

    #[test]
    fn test_means() {
        let a = Process::new("A", 0, 3);
        let b = Process::new("B", 2, 6);
        let mut table = MetricsTable::new(2);
        table.record(0, &a, 3).unwrap();
        table.record(1, &b, 9).unwrap();

        // (3 + 7) / 2
        assert!((table.mean_turnaround() - 5.0).abs() < 1e-10);
        // (1.0 + 7/6) / 2
        assert!((table.mean_normalized_turnaround() - (1.0 + 7.0 / 6.0) / 2.0).abs() < 1e-10);
        assert_eq!(table.makespan(), 9);
    }

    #[test]
    fn test_empty_means() {
        let table = MetricsTable::new(0);
        assert!(table.is_empty());
        assert_eq!(table.mean_turnaround(), 0.0);
        assert_eq!(table.makespan(), 0);
    }
}
