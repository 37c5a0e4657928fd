//! Built-in dispatching rules.
//!
//! | Rule | Score | Used by |
//! |------|-------|---------|
//! | SPN | total service time | Shortest Process Next |
//! | SRT | remaining service time | Shortest Remaining Time |
//!
//! # Score Convention
//! All rules return lower scores for entries that should run first.

use super::{DispatchContext, DispatchingRule, ReadyEntry, RuleScore};
use crate::models::Process;

/// Shortest Process Next: shortest total service time first.
///
/// Non-preemptive use: the score ignores progress already made.
#[derive(Debug, Clone, Copy)]
pub struct ShortestService;

impl DispatchingRule for ShortestService {
    fn name(&self) -> &'static str {
        "SPN"
    }

    fn evaluate(&self, _entry: &ReadyEntry, process: &Process, _context: &DispatchContext) -> RuleScore {
        u64::from(process.service)
    }

    fn description(&self) -> &'static str {
        "Shortest Process Next"
    }
}

/// Shortest Remaining Time: least remaining service first.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl DispatchingRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(&self, entry: &ReadyEntry, _process: &Process, _context: &DispatchContext) -> RuleScore {
        u64::from(entry.remaining)
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_service_ignores_progress() {
        let ctx = DispatchContext::at_time(0);
        let p = Process::new("P", 0, 8);
        assert_eq!(ShortestService.evaluate(&ReadyEntry::new(0, 1), &p, &ctx), 8);
    }

    #[test]
    fn test_shortest_remaining_uses_progress() {
        let ctx = DispatchContext::at_time(0);
        let p = Process::new("P", 0, 8);
        assert_eq!(ShortestRemaining.evaluate(&ReadyEntry::new(0, 1), &p, &ctx), 1);
    }

    #[test]
    fn test_names() {
        assert_eq!(ShortestService.name(), "SPN");
        assert_eq!(ShortestService.description(), "Shortest Process Next");
        assert_eq!(ShortestRemaining.description(), "Shortest Remaining Time");
    }
}
