//! Dispatch context passed to rules and tie-breakers.

/// Runtime state at a dispatch decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    /// Current simulation time unit.
    pub current_time: u32,
    /// Process that ran during the previous unit, if any.
    pub running: Option<usize>,
}

impl DispatchContext {
    /// Creates a context at the given time with no incumbent.
    pub fn at_time(current_time: u32) -> Self {
        Self {
            current_time,
            running: None,
        }
    }

    /// Sets the incumbent process.
    pub fn with_running(mut self, running: Option<usize>) -> Self {
        self.running = running;
        self
    }
}
