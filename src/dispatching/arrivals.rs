//! Admission of newly arrived processes.

use crate::models::ProcessSet;

/// Cursor over an arrival-ordered process set.
///
/// Hands out each process index exactly once, in arrival order, as soon
/// as the simulation clock reaches its arrival time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrivalCursor {
    next: usize,
}

impl ArrivalCursor {
    /// Creates a cursor positioned before the first process.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of not-yet-admitted processes with `arrival <= time`.
    pub fn take_arrived(&mut self, processes: &ProcessSet, time: u32) -> Vec<usize> {
        let start = self.next;
        while let Some(p) = processes.get(self.next) {
            if p.arrival > time {
                break;
            }
            self.next += 1;
        }
        (start..self.next).collect()
    }

    /// Arrival time of the next process not yet admitted.
    pub fn next_arrival(&self, processes: &ProcessSet) -> Option<u32> {
        processes.get(self.next).map(|p| p.arrival)
    }

    /// Whether every process has been admitted.
    pub fn is_exhausted(&self, processes: &ProcessSet) -> bool {
        self.next >= processes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    #[test]
    fn test_take_arrived_in_order() {
        let processes = ProcessSet::new(vec![
            Process::new("A", 0, 1),
            Process::new("B", 0, 1),
            Process::new("C", 3, 1),
        ])
        .unwrap();
        let mut cursor = ArrivalCursor::new();

        assert_eq!(cursor.take_arrived(&processes, 0), vec![0, 1]);
        assert_eq!(cursor.next_arrival(&processes), Some(3));
        assert!(cursor.take_arrived(&processes, 2).is_empty());
        assert_eq!(cursor.take_arrived(&processes, 5), vec![2]);
        assert!(cursor.is_exhausted(&processes));
        assert_eq!(cursor.next_arrival(&processes), None);
    }
}
