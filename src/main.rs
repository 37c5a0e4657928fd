//! Command-line front end for the CPU scheduling simulator.
//!
//! Input comes from exactly one of: a JSON configuration file
//! (`--config`), a seeded random workload (`--random`), process
//! descriptors on the command line, or a single invocation line on stdin
//! (`<algorithm> <name,arrival,service>... [quantum] [trace] [stats]`).
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::info;

use u_cpusched::config::{ConfigError, OutputOptions, SimulationConfig};
use u_cpusched::error::SimulationError;
use u_cpusched::input::{parse_invocation, parse_process};
use u_cpusched::report::{render_stats, render_timeline};
use u_cpusched::scheduler::{simulate, Algorithm, AlgorithmKind, SimulationKpi};
use u_cpusched::workload::WorkloadGenerator;

/// Scheduling algorithm options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum AlgorithmArg {
    /// First Come First Serve
    Fcfs,
    /// Round Robin (requires --quantum)
    Rr,
    /// Shortest Process Next
    Spn,
    /// Shortest Remaining Time
    Srt,
}

impl From<AlgorithmArg> for AlgorithmKind {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Fcfs => AlgorithmKind::Fcfs,
            AlgorithmArg::Rr => AlgorithmKind::RoundRobin,
            AlgorithmArg::Spn => AlgorithmKind::Spn,
            AlgorithmArg::Srt => AlgorithmKind::Srt,
        }
    }
}

/// Single-core CPU scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "u-cpusched", version)]
#[command(about = "Simulate FCFS, Round Robin, SPN and SRT on a single core", long_about = None)]
struct Args {
    /// Scheduling algorithm (overrides the one in --config)
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Round Robin time slice (implies rr when --algorithm is omitted)
    #[arg(short, long)]
    quantum: Option<u32>,

    /// Print the per-unit timeline
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// Print the statistics table
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Print the outcome and KPIs as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Read the run from a JSON configuration file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["random", "processes"])]
    config: Option<PathBuf>,

    /// Generate N random processes
    #[arg(long, value_name = "N", conflicts_with = "processes")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Process descriptors (name,arrival,service)
    #[arg(value_name = "DESCRIPTOR")]
    processes: Vec<String>,
}

impl Args {
    fn output(&self) -> OutputOptions {
        OutputOptions {
            timeline: self.trace,
            stats: self.stats,
        }
    }

    fn algorithm_kind(&self) -> Option<AlgorithmKind> {
        self.algorithm.map(AlgorithmKind::from)
    }
}

fn main() -> ExitCode {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let config = load_config(args)?;
    let (processes, algorithm) = config.build()?;
    let outcome = simulate(&processes, &algorithm)?;
    let kpi = SimulationKpi::calculate(&outcome);

    if args.json {
        let report = serde_json::json!({ "outcome": outcome, "kpi": kpi });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if config.output.timeline {
        print!("{}", render_timeline(&outcome));
    }
    if config.output.stats {
        print!("{}", render_stats(&outcome));
    }
    if !config.output.timeline && !config.output.stats {
        println!(
            "{}: makespan {}, mean turnaround {:.2}, mean normalized turnaround {:.2}, utilization {:.1}%",
            algorithm.label(),
            kpi.makespan,
            kpi.mean_turnaround,
            kpi.mean_normalized_turnaround,
            kpi.cpu_utilization * 100.0
        );
    }
    Ok(())
}

/// Resolves the run description from whichever input source was given.
///
/// `--trace` and `--stats` add to the reports a config file or invocation
/// line already selects.
fn load_config(args: &Args) -> Result<SimulationConfig, ConfigError> {
    let mut config = if let Some(path) = &args.config {
        let mut config = SimulationConfig::from_file(path)?;
        if let Some(kind) = args.algorithm_kind() {
            config.algorithm = kind.with_quantum(args.quantum.or(config.algorithm.quantum()))?;
        }
        config
    } else if let Some(count) = args.random {
        let set = WorkloadGenerator::new(args.seed)
            .with_process_count(count)
            .generate()?;
        info!("Generated {count} processes from seed {}", args.seed);
        return Ok(SimulationConfig::new(selected_algorithm(args)?, set.as_slice().to_vec())
            .with_output(args.output()));
    } else if !args.processes.is_empty() {
        let mut processes = Vec::with_capacity(args.processes.len());
        let mut errors = Vec::new();
        for descriptor in &args.processes {
            match parse_process(descriptor) {
                Ok(p) => processes.push(p),
                Err(e) => errors.extend_from_slice(e.validation_errors()),
            }
        }
        if !errors.is_empty() {
            return Err(SimulationError::Configuration(errors).into());
        }
        return Ok(SimulationConfig::new(selected_algorithm(args)?, processes)
            .with_output(args.output()));
    } else {
        SimulationConfig::from(parse_invocation(&read_invocation()?)?)
    };

    let flags = args.output();
    config.output.timeline |= flags.timeline;
    config.output.stats |= flags.stats;
    Ok(config)
}

/// Algorithm for command-line workloads.
///
/// Defaults to FCFS, or to Round Robin when only `--quantum` is given.
fn selected_algorithm(args: &Args) -> Result<Algorithm, SimulationError> {
    let default = if args.quantum.is_some() {
        AlgorithmKind::RoundRobin
    } else {
        AlgorithmKind::Fcfs
    };
    args.algorithm_kind()
        .unwrap_or(default)
        .with_quantum(args.quantum)
}

fn read_invocation() -> io::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Select an algorithm:");
        eprintln!("1 - First Come First Serve (FCFS)");
        eprintln!("2 - Round Robin (RR)");
        eprintln!("3 - Shortest Process Next (SPN)");
        eprintln!("4 - Shortest Remaining Time (SRT)");
        eprintln!("then processes as name,arrival,service, a quantum for RR, and trace/stats");
    }

    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line)
}
