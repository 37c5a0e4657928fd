//! Execution timeline model.
//!
//! A timeline is a `horizon × process_count` grid recording, for every
//! time unit and process, whether the process was running, waiting in the
//! ready set, or idle (not yet arrived or already finished).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SimulationError;
use crate::models::ProcessSet;

/// State of one process during one time unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Not arrived yet, or already finished.
    #[default]
    Idle,
    /// Arrived but not on the CPU.
    Waiting,
    /// On the CPU.
    Running,
}

impl Mark {
    /// Single-character glyph used in text timelines.
    pub fn glyph(self) -> char {
        match self {
            Mark::Idle => ' ',
            Mark::Waiting => '.',
            Mark::Running => '*',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Per-time-unit, per-process execution grid.
///
/// Stored row-major by time: cell `(t, p)` lives at `t * process_count + p`.
/// Every cell starts as [`Mark::Idle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    horizon: u32,
    process_count: usize,
    cells: Vec<Mark>,
}

impl Timeline {
    /// Creates an all-idle timeline.
    pub fn new(horizon: u32, process_count: usize) -> Self {
        Self {
            horizon,
            process_count,
            cells: vec![Mark::Idle; horizon as usize * process_count],
        }
    }

    /// Creates an all-idle timeline sized for the given process set.
    pub fn for_processes(processes: &ProcessSet) -> Self {
        Self::new(processes.horizon(), processes.len())
    }

    /// Number of simulated time units.
    #[inline]
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Number of processes (columns).
    #[inline]
    pub fn process_count(&self) -> usize {
        self.process_count
    }

    /// Mark at `(time, process)`, or `None` outside the grid.
    pub fn get(&self, time: u32, process: usize) -> Option<Mark> {
        self.offset(time, process).map(|i| self.cells[i])
    }

    /// Sets the mark at `(time, process)`.
    ///
    /// Writing outside the grid is an invariant violation: the horizon is
    /// sized so that no valid schedule ever needs it.
    pub fn set(&mut self, time: u32, process: usize, mark: Mark) -> Result<(), SimulationError> {
        let i = self.offset(time, process).ok_or_else(|| {
            SimulationError::invariant(format!(
                "timeline write at t={time}, process {process} outside {}x{} grid",
                self.horizon, self.process_count
            ))
        })?;
        self.cells[i] = mark;
        Ok(())
    }

    /// Marks `[from, to)` for one process.
    pub fn set_span(
        &mut self,
        process: usize,
        from: u32,
        to: u32,
        mark: Mark,
    ) -> Result<(), SimulationError> {
        for t in from..to {
            self.set(t, process, mark)?;
        }
        Ok(())
    }

    /// Marks as waiting every non-running cell in `[arrival, finish)`.
    pub fn fill_wait(&mut self, process: usize, arrival: u32, finish: u32) -> Result<(), SimulationError> {
        for t in arrival..finish {
            if self.get(t, process) != Some(Mark::Running) {
                self.set(t, process, Mark::Waiting)?;
            }
        }
        Ok(())
    }

    /// Marks of one process across all time units.
    pub fn row(&self, process: usize) -> impl Iterator<Item = Mark> + '_ {
        (0..self.horizon).filter_map(move |t| self.get(t, process))
    }

    /// Number of units in which the process was running.
    pub fn running_count(&self, process: usize) -> u32 {
        self.row(process).filter(|m| *m == Mark::Running).count() as u32
    }

    /// Index of the process running at `time`, if any.
    pub fn running_at(&self, time: u32) -> Option<usize> {
        (0..self.process_count).find(|&p| self.get(time, p) == Some(Mark::Running))
    }

    /// Time units at which the process was running, ascending.
    pub fn running_units(&self, process: usize) -> Vec<u32> {
        (0..self.horizon)
            .filter(|&t| self.get(t, process) == Some(Mark::Running))
            .collect()
    }

    /// Number of maximal contiguous running bursts of one process.
    ///
    /// A value above 1 means the process was preempted at least once.
    pub fn burst_count(&self, process: usize) -> usize {
        let mut bursts = 0;
        let mut previous = Mark::Idle;
        for mark in self.row(process) {
            if mark == Mark::Running && previous != Mark::Running {
                bursts += 1;
            }
            previous = mark;
        }
        bursts
    }

    fn offset(&self, time: u32, process: usize) -> Option<usize> {
        if time < self.horizon && process < self.process_count {
            Some(time as usize * self.process_count + process)
        } else {
            None
        }
    }
}
