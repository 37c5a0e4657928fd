//! Plain-text reports.
//!
//! Two fixed-width renderings of a finished run: the per-unit timeline
//! and the per-process statistics table. Both start with the algorithm
//! label (`FCFS`, `RR-<q>`, `SPN`, `SRT`) and end with a newline.
//!
//! # Timeline
//! ```text
//! FCFS
//!   |0|1|2|3|
//! A |*|*| | |
//! B | |.|*| |
//! -----------
//! ```
//! The header shows the last digit of each time unit. `*` is running,
//! `.` is waiting, blank is idle.

use std::fmt::Write;

use crate::scheduler::SimulationOutcome;

const STAT_LABEL_WIDTH: usize = 10;
const MIN_STAT_CELL_WIDTH: usize = 5;

/// Renders the per-unit timeline.
pub fn render_timeline(outcome: &SimulationOutcome) -> String {
    let name_width = outcome
        .processes
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);
    let horizon = outcome.timeline.horizon();

    let mut out = String::new();
    out.push_str(&outcome.algorithm.label());
    out.push('\n');

    out.push_str(&" ".repeat(name_width + 1));
    for t in 0..horizon {
        let _ = write!(out, "|{}", t % 10);
    }
    out.push_str("|\n");

    for (i, p) in outcome.processes.iter().enumerate() {
        let _ = write!(out, "{:<name_width$} ", p.name);
        for mark in outcome.timeline.row(i) {
            out.push('|');
            out.push(mark.glyph());
        }
        out.push_str("|\n");
    }

    out.push_str(&"-".repeat(name_width + 2 + 2 * horizon as usize));
    out.push('\n');
    out
}

/// Renders the statistics table with mean turnaround and mean
/// normalized turnaround.
pub fn render_stats(outcome: &SimulationOutcome) -> String {
    let processes = &outcome.processes;
    let metrics = &outcome.metrics;
    let width = processes
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_STAT_CELL_WIDTH);

    let finish = |i: usize| metrics.get(i).map(|m| m.finish);
    let turnaround = |i: usize| metrics.get(i).map(|m| m.turnaround);
    let normalized = |i: usize| metrics.get(i).map(|m| m.normalized_turnaround);
    let cell = |v: Option<u32>| v.map_or_else(|| "-".to_string(), |v| v.to_string());

    let mut out = String::new();
    out.push_str(&outcome.algorithm.label());
    out.push('\n');

    let rows: [(&str, Vec<String>, String); 6] = [
        (
            "Process",
            processes.iter().map(|p| p.name.clone()).collect(),
            "Mean".to_string(),
        ),
        (
            "Arrival",
            processes.iter().map(|p| p.arrival.to_string()).collect(),
            String::new(),
        ),
        (
            "Service",
            processes.iter().map(|p| p.service.to_string()).collect(),
            String::new(),
        ),
        (
            "Finish",
            (0..processes.len()).map(|i| cell(finish(i))).collect(),
            String::new(),
        ),
        (
            "Turnaround",
            (0..processes.len()).map(|i| cell(turnaround(i))).collect(),
            format!("{:.2}", metrics.mean_turnaround()),
        ),
        (
            "NormTurn",
            (0..processes.len())
                .map(|i| normalized(i).map_or_else(|| "-".to_string(), |v| format!("{v:.2}")))
                .collect(),
            format!("{:.2}", metrics.mean_normalized_turnaround()),
        ),
    ];

    for (label, cells, tail) in rows {
        let _ = write!(out, "{label:<label_width$} ", label_width = STAT_LABEL_WIDTH);
        for c in cells {
            let _ = write!(out, "|{c:>width$}");
        }
        let _ = writeln!(out, "|{tail:>width$}|");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, ProcessSet};
    use crate::scheduler::{simulate, Algorithm};

    fn small_fcfs() -> SimulationOutcome {
        let processes =
            ProcessSet::new(vec![Process::new("A", 0, 2), Process::new("B", 1, 1)]).unwrap();
        simulate(&processes, &Algorithm::Fcfs).unwrap()
    }

    #[test]
    fn test_render_timeline() {
        let expected = "\
FCFS
  |0|1|2|3|
A |*|*| | |
B | |.|*| |
-----------
";
        assert_eq!(render_timeline(&small_fcfs()), expected);
    }

    #[test]
    fn test_render_stats() {
        let expected = "\
FCFS
Process    |    A|    B| Mean|
Arrival    |    0|    1|     |
Service    |    2|    1|     |
Finish     |    2|    3|     |
Turnaround |    2|    2| 2.00|
NormTurn   | 1.00| 2.00| 1.50|
";
        assert_eq!(render_stats(&small_fcfs()), expected);
    }

    #[test]
    fn test_timeline_header_wraps_digits() {
        let processes = ProcessSet::new(vec![Process::new("long", 0, 12)]).unwrap();
        let outcome = simulate(&processes, &Algorithm::RoundRobin { quantum: 5 }).unwrap();
        let text = render_timeline(&outcome);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "RR-5");
        assert_eq!(lines[1], "     |0|1|2|3|4|5|6|7|8|9|0|1|");
        assert_eq!(lines[2], "long |*|*|*|*|*|*|*|*|*|*|*|*|");
        assert_eq!(lines[3].len(), lines[1].len());
    }

    #[test]
    fn test_stats_widen_for_long_names() {
        let processes = ProcessSet::new(vec![Process::new("worker", 0, 4)]).unwrap();
        let outcome = simulate(&processes, &Algorithm::Srt).unwrap();
        let text = render_stats(&outcome);

        assert!(text.starts_with("SRT\n"));
        assert!(text.contains("Process    |worker|  Mean|"));
        assert!(text.contains("NormTurn   |  1.00|  1.00|"));
    }
}
