//! Ready set with rule-based selection.
//!
//! Holds admitted entries and removes the best one under a dispatching
//! rule. Equal scores never fall back on insertion or heap order: the
//! configured [`TieBreaker`] decides, and arrival order (process index)
//! is the final, total tie-break.

use std::cmp::Ordering;
use std::sync::Arc;

use log::trace;

use super::{DispatchContext, DispatchingRule, ReadyEntry};
use crate::models::ProcessSet;

/// How equal rule scores are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Lower process index (earlier arrival) wins.
    #[default]
    ArrivalOrder,
    /// The context's running process wins; otherwise arrival order.
    ///
    /// A newcomer preempts the incumbent only with a strictly better score.
    Incumbent,
}

/// Admitted entries plus the rule that orders them.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{rules, DispatchContext, ReadyEntry, ReadySet, TieBreaker};
/// use u_cpusched::models::{Process, ProcessSet};
///
/// let processes = ProcessSet::new(vec![
///     Process::new("A", 0, 4),
///     Process::new("B", 1, 3),
/// ]).unwrap();
///
/// // A has run once (3 left), B just arrived (3 left): A keeps the CPU.
/// let mut ready = ReadySet::new(rules::ShortestRemaining).with_tie_breaker(TieBreaker::Incumbent);
/// ready.admit(ReadyEntry::new(0, 3));
/// ready.admit(ReadyEntry::new(1, 3));
///
/// let ctx = DispatchContext::at_time(1).with_running(Some(0));
/// assert_eq!(ready.take_best(&processes, &ctx).unwrap().index, 0);
/// ```
#[derive(Clone)]
pub struct ReadySet {
    rule: Arc<dyn DispatchingRule>,
    tie_breaker: TieBreaker,
    entries: Vec<ReadyEntry>,
}

impl ReadySet {
    /// Creates an empty ready set ordered by `rule`.
    pub fn new<R: DispatchingRule + 'static>(rule: R) -> Self {
        Self {
            rule: Arc::new(rule),
            tie_breaker: TieBreaker::ArrivalOrder,
            entries: Vec::new(),
        }
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Adds an entry.
    pub fn admit(&mut self, entry: ReadyEntry) {
        self.entries.push(entry);
    }

    /// Number of admitted entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are admitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name of the ordering rule.
    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Returns the best entry without removing it.
    pub fn peek_best(&self, processes: &ProcessSet, context: &DispatchContext) -> Option<&ReadyEntry> {
        self.best_position(processes, context)
            .map(|pos| &self.entries[pos])
    }

    /// Removes and returns the best entry.
    pub fn take_best(
        &mut self,
        processes: &ProcessSet,
        context: &DispatchContext,
    ) -> Option<ReadyEntry> {
        let pos = self.best_position(processes, context)?;
        let best = self.entries.swap_remove(pos);
        trace!(
            "{} t={}: picked index {} ({} left) over {} others",
            self.rule.name(),
            context.current_time,
            best.index,
            best.remaining,
            self.entries.len()
        );
        Some(best)
    }

    fn best_position(&self, processes: &ProcessSet, context: &DispatchContext) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| self.compare(a, b, processes, context))
            .map(|(pos, _)| pos)
    }

    /// Total order over entries: rule score, then tie-breaker, then index.
    fn compare(
        &self,
        a: &ReadyEntry,
        b: &ReadyEntry,
        processes: &ProcessSet,
        context: &DispatchContext,
    ) -> Ordering {
        let score = |e: &ReadyEntry| {
            processes
                .get(e.index)
                .map_or(u64::MAX, |p| self.rule.evaluate(e, p, context))
        };

        score(a).cmp(&score(b)).then_with(|| {
            let incumbent = match self.tie_breaker {
                TieBreaker::Incumbent => context.running,
                TieBreaker::ArrivalOrder => None,
            };
            match incumbent {
                Some(r) if a.index == r && b.index != r => Ordering::Less,
                Some(r) if b.index == r && a.index != r => Ordering::Greater,
                _ => a.index.cmp(&b.index),
            }
        })
    }
}

impl std::fmt::Debug for ReadySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadySet")
            .field("rule", &self.rule.name())
            .field("tie_breaker", &self.tie_breaker)
            .field("entries", &self.entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::models::Process;

    fn sample_processes() -> ProcessSet {
        ProcessSet::new(vec![
            Process::new("A", 0, 5),
            Process::new("B", 1, 2),
            Process::new("C", 2, 2),
            Process::new("D", 3, 7),
        ])
        .unwrap()
    }

    #[test]
    fn test_shortest_service_ordering() {
        let processes = sample_processes();
        let ctx = DispatchContext::at_time(3);
        let mut ready = ReadySet::new(rules::ShortestService);
        for i in [3, 0, 2, 1] {
            ready.admit(ReadyEntry::fresh(i, processes.get(i).unwrap()));
        }

        let order: Vec<usize> = std::iter::from_fn(|| ready.take_best(&processes, &ctx))
            .map(|e| e.index)
            .collect();
        // B and C tie on service 2 → arrival order
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_arrival_order_ignores_admission_order() {
        let processes = sample_processes();
        let ctx = DispatchContext::at_time(3);
        let mut ready = ReadySet::new(rules::ShortestRemaining);
        ready.admit(ReadyEntry::new(2, 4));
        ready.admit(ReadyEntry::new(1, 4));

        assert_eq!(ready.peek_best(&processes, &ctx).unwrap().index, 1);
    }

    #[test]
    fn test_incumbent_wins_tie() {
        let processes = sample_processes();
        let ctx = DispatchContext::at_time(3).with_running(Some(2));
        let mut ready = ReadySet::new(rules::ShortestRemaining).with_tie_breaker(TieBreaker::Incumbent);
        ready.admit(ReadyEntry::new(1, 2));
        ready.admit(ReadyEntry::new(2, 2));

        assert_eq!(ready.take_best(&processes, &ctx).unwrap().index, 2);
    }

    #[test]
    fn test_incumbent_loses_to_strictly_shorter() {
        let processes = sample_processes();
        let ctx = DispatchContext::at_time(3).with_running(Some(0));
        let mut ready = ReadySet::new(rules::ShortestRemaining).with_tie_breaker(TieBreaker::Incumbent);
        ready.admit(ReadyEntry::new(0, 3));
        ready.admit(ReadyEntry::new(3, 2));

        assert_eq!(ready.take_best(&processes, &ctx).unwrap().index, 3);
    }

    #[test]
    fn test_empty() {
        let processes = sample_processes();
        let ctx = DispatchContext::at_time(0);
        let mut ready = ReadySet::new(rules::ShortestService);
        assert!(ready.is_empty());
        assert!(ready.peek_best(&processes, &ctx).is_none());
        assert!(ready.take_best(&processes, &ctx).is_none());
    }

    #[test]
    fn test_debug_shows_rule() {
        let ready = ReadySet::new(rules::ShortestService);
        assert_eq!(ready.rule_name(), "SPN");
        assert!(format!("{ready:?}").contains("SPN"));
    }
}
