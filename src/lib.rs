//! Single-core CPU scheduling simulator.
//!
//! Runs a fixed set of processes through one of four classic policies and
//! records, for every time unit, which process ran and which waited. The
//! result carries per-process finish, turnaround and normalized turnaround
//! times.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessSet`, `Timeline`, `Mark`,
//!   `MetricsTable`
//! - **`scheduler`**: FCFS, Round Robin, SPN, SRT; the `simulate` driver
//!   and `SimulationKpi`
//! - **`dispatching`**: Ready-set ordering rules shared by the policies
//! - **`validation`**: Input integrity checks (empty set, zero service,
//!   duplicate names, horizon overflow, zero quantum)
//! - **`input`** / **`config`**: One-line invocation format and JSON runs
//! - **`report`**: Text timeline and statistics table
//! - **`workload`**: Seeded random process sets
//!
//! # Example
//! ```
//! use u_cpusched::{simulate, Algorithm, Process, ProcessSet};
//!
//! let processes = ProcessSet::new(vec![
//!     Process::new("A", 0, 3),
//!     Process::new("B", 2, 6),
//!     Process::new("C", 4, 4),
//! ]).unwrap();
//!
//! let outcome = simulate(&processes, &Algorithm::Srt).unwrap();
//! assert_eq!(outcome.completion_order(), vec!["A", "C", "B"]);
//! ```
//!
//! # References
//!
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 9
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

pub mod config;
pub mod dispatching;
pub mod error;
pub mod input;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::SimulationError;
pub use models::{Mark, MetricsTable, Process, ProcessSet, Timeline};
pub use scheduler::{simulate, Algorithm, SimulationKpi, SimulationOutcome};
