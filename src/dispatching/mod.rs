//! Ready-set dispatching for the scheduling policies.
//!
//! Provides the ready-queue entry type, selection rules (shortest service,
//! shortest remaining time) and a ready set that picks the best
//! entry under a rule with a deterministic tie-breaker.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{rules, DispatchContext, ReadyEntry, ReadySet, TieBreaker};
//! use u_cpusched::models::{Process, ProcessSet};
//!
//! let processes = ProcessSet::new(vec![
//!     Process::new("long", 0, 5),
//!     Process::new("short", 0, 2),
//! ]).unwrap();
//!
//! let mut ready = ReadySet::new(rules::ShortestService).with_tie_breaker(TieBreaker::ArrivalOrder);
//! ready.admit(ReadyEntry::new(0, 5));
//! ready.admit(ReadyEntry::new(1, 2));
//!
//! let best = ready.take_best(&processes, &DispatchContext::at_time(0)).unwrap();
//! assert_eq!(best.index, 1);
//! ```

mod arrivals;
mod context;
mod engine;
pub mod rules;

pub use arrivals::ArrivalCursor;
pub use context::DispatchContext;
pub use engine::{ReadySet, TieBreaker};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::Process;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = u64;

/// A runnable process in a ready structure.
///
/// `index` is the process's position in the arrival-ordered
/// [`ProcessSet`](crate::models::ProcessSet); `remaining` is the number of
/// service units it still needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadyEntry {
    /// Process index (arrival order).
    pub index: usize,
    /// Service units still required.
    pub remaining: u32,
}

impl ReadyEntry {
    /// Creates a ready entry.
    pub fn new(index: usize, remaining: u32) -> Self {
        Self { index, remaining }
    }

    /// Entry for a process that has not run yet.
    pub fn fresh(index: usize, process: &Process) -> Self {
        Self::new(index, process.service)
    }

    /// Whether no service remains.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }
}

/// A dispatching rule that scores ready entries.
///
/// # Score Convention
/// **Lower score = higher priority.** Ties are resolved by the
/// [`ReadySet`]'s [`TieBreaker`], never by container order.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPN", "SRT").
    fn name(&self) -> &'static str;

    /// Scores an entry given its process and the current dispatch context.
    fn evaluate(&self, entry: &ReadyEntry, process: &Process, context: &DispatchContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
