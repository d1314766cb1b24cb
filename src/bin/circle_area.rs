//! circle-area CLI
//!
//! Estimates the area covered by a union of circles with Monte Carlo sampling.
//!
//! # Example
//!
//! ```bash
//! # One sequential run over a million samples
//! circle-area run circles.txt 1000000
//!
//! # Eight OS threads, reproducible
//! circle-area run circles.txt 1000000 --model threads --workers 8 --seed 42
//!
//! # Four worker processes
//! circle-area run circles.txt 1000000 --model processes --workers 4
//!
//! # Timing sweep over 1, 2, 4 and 8 workers, five runs each
//! circle-area sweep circles.txt 1000000 --model pool --workers 1,2,4,8 --repeats 5
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use circle_area::execution::distributed::Communicator;
use circle_area::execution::{estimate_area, Distributed, ProcessGroup};
use circle_area::input::read_circles;
use circle_area::monte_carlo::distribute;
use circle_area::report::{Report, Stopwatch};
use circle_area::sweep::sweep;
use circle_area::{Domain, Error, Estimate, ExecutionModel, Result, RunConfig};
use tracing_subscriber::EnvFilter;

/// Monte Carlo area of a union of circles
#[derive(Parser, Debug)]
#[command(name = "circle-area")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one estimate and print its statistics
    Run(RunArgs),
    /// Time repeated runs for several worker counts
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// File of whitespace-separated `x y r` triples
    input: PathBuf,

    /// Total number of samples to draw
    samples: u64,

    /// Execution model: sequential, threads, pool or processes
    #[arg(short, long, default_value = "sequential")]
    model: ExecutionModel,

    /// Number of workers (threads or processes)
    #[arg(short, long, default_value = "4")]
    workers: usize,

    /// Random seed for reproducible results. Fresh OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// File of whitespace-separated `x y r` triples
    input: PathBuf,

    /// Total number of samples to draw per run
    samples: u64,

    /// Execution model: sequential, threads, pool or processes
    #[arg(short, long, default_value = "threads")]
    model: ExecutionModel,

    /// Comma-separated worker counts to compare
    #[arg(short, long, value_delimiter = ',', default_value = "1,2,4,8")]
    workers: Vec<usize>,

    /// Runs per worker count
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    repeats: u64,

    /// Random seed for reproducible results. Fresh OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

impl RunArgs {
    fn config(&self) -> RunConfig {
        RunConfig {
            model: self.model,
            workers: self.workers,
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    // Logs go to stderr; a worker process's stdout carries its reply.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,circle_area=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    if let Some(group) = ProcessGroup::from_env()? {
        return run_worker(cli, group);
    }
    match cli.command {
        Command::Run(args) => run_once(&args),
        Command::Sweep(args) => run_sweep(&args),
    }
}

fn run_once(args: &RunArgs) -> Result<()> {
    let domain = load_domain(&args.input)?;
    let (estimate, elapsed) = execute(&domain, &args.input, args.samples, &args.config())?;
    print!("{}", Report::new(estimate, elapsed));
    Ok(())
}

fn run_sweep(args: &SweepArgs) -> Result<()> {
    let domain = load_domain(&args.input)?;
    let config = |workers| RunConfig {
        model: args.model,
        workers,
        seed: args.seed,
    };
    // Rows are labelled with the workers a model really uses, so the
    // sequential model collapses to a single row.
    let mut counts: Vec<usize> = args
        .workers
        .iter()
        .map(|&workers| config(workers).effective_workers())
        .collect();
    counts.dedup();

    let report = sweep(&counts, args.repeats as usize, |workers| {
        execute(&domain, &args.input, args.samples, &config(workers))
    })?;
    print!("{report}");
    Ok(())
}

/// Rank `1..size` of a process group: sample this rank's share and reply.
fn run_worker(cli: Cli, group: ProcessGroup) -> Result<()> {
    let rank = group.rank();
    let Command::Run(args) = cli.command else {
        return Err(Error::WorkerFailure {
            worker: rank,
            reason: "worker processes only accept `run`".to_string(),
        });
    };
    log::debug!("worker rank {} of {} starting", rank, group.size());

    let domain = load_domain(&args.input)?;
    let mut strategy = Distributed::new(group, args.config().seed_source());
    estimate_area(&domain, args.samples, &mut strategy)?;
    Ok(())
}

fn load_domain(input: &Path) -> Result<Domain> {
    Domain::new(read_circles(input)?)
}

/// Times one estimate under `config`, launching worker processes if needed.
fn execute(
    domain: &Domain,
    input: &Path,
    samples: u64,
    config: &RunConfig,
) -> Result<(Estimate, Duration)> {
    let watch = Stopwatch::start();

    let estimate = match config.in_process_strategy() {
        Some(mut strategy) => estimate_area(domain, samples, &mut *strategy)?,
        None => {
            // Reject bad counts before any process is launched.
            distribute(samples, config.workers)?;
            let program = std::env::current_exe()?;
            let group = ProcessGroup::launch(
                &program,
                worker_args(input, samples, config),
                config.workers,
            )?;
            estimate_area(domain, samples, &mut Distributed::new(group, config.seed_source()))?
        }
    };

    let estimate = estimate.ok_or_else(|| Error::WorkerFailure {
        worker: 0,
        reason: "coordinator received no reduced result".to_string(),
    })?;
    Ok((estimate, watch.elapsed()))
}

fn worker_args(input: &Path, samples: u64, config: &RunConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "run".into(),
        input.as_os_str().to_owned(),
        samples.to_string().into(),
        "--model".into(),
        ExecutionModel::Processes.to_string().into(),
        "--workers".into(),
        config.workers.to_string().into(),
    ];
    if let Some(seed) = config.seed {
        args.push("--seed".into());
        args.push(seed.to_string().into());
    }
    args
}
