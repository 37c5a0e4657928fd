//! Simulation domain models.
//!
//! Provides the data types shared by every scheduling policy: the input
//! process set and the two outputs a run fills in.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` / `ProcessSet` | Input: arrival and service times, arrival-ordered |
//! | `Timeline` / `Mark` | Output: time × process execution grid |
//! | `MetricsTable` / `ProcessMetrics` | Output: finish, turnaround, normalized turnaround |

mod metrics;
mod process;
mod timeline;

pub use metrics::{MetricsTable, ProcessMetrics};
pub use process::{Process, ProcessSet};
pub use timeline::{Mark, Timeline};
