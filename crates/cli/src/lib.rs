//! Command-line driver comparing the sequential and concurrent quicksorts.
//!
//! Reads integers from a file, sorts them with both strategies and reports
//! the wall-clock time of each, plus the task count of the concurrent run.
//!
//! Command functions return `CliResult<T>`; only [`run`] exits the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use quicksort::{
    ConcurrencyConfig, ConcurrentSorter, DEFAULT_CONCURRENCY, DEFAULT_STACK_SIZE, SpawnPolicy,
    read_integers_from_path, sort_sequential,
};
use tracing::info;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// User-facing error plus the exit code to leave with.
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::failure(format!("Failed to write output: {err}"))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PolicyArg {
    /// Bounded rayon worker pool
    Pool,
    /// One OS thread per partition
    Threads,
}

impl From<PolicyArg> for SpawnPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Pool => SpawnPolicy::Pool,
            PolicyArg::Threads => SpawnPolicy::Threads,
        }
    }
}

/// Compare sequential and concurrent three-way quicksort
#[derive(Parser, Debug)]
#[command(name = "quicksort", version, long_about = None)]
pub struct Cli {
    /// Print the sequence before and after each sort
    #[arg(short = 'p', long = "print")]
    pub print: bool,

    /// File of whitespace-separated integers
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Where concurrent sort tasks run
    #[arg(long, value_enum, default_value_t = PolicyArg::Pool)]
    pub policy: PolicyArg,

    /// Worker threads for the pool policy (default: one per core)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Partitions smaller than this recurse without forking
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY.sequential_cutoff)]
    pub cutoff: usize,

    /// Stack size of each pool worker in MiB; bounds how deep sorted input can recurse
    #[arg(long, value_name = "MIB", default_value_t = DEFAULT_STACK_SIZE >> 20)]
    pub stack_mib: usize,
}

impl Cli {
    pub fn concurrency(&self) -> ConcurrencyConfig {
        ConcurrencyConfig {
            policy: self.policy.into(),
            sequential_cutoff: self.cutoff,
            threads: self.threads,
            stack_size: self.stack_mib.saturating_mul(1 << 20),
        }
    }
}

/// Parses arguments, runs both sorts and exits on failure.
///
/// Usage errors exit with status 1; `--help` and `--version` exit 0.
pub fn run() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            process::exit(code.0);
        }
    };

    let stdout = io::stdout();
    if let Err(err) = execute(&cli, &mut stdout.lock()) {
        eprintln!("{err}");
        process::exit(err.exit_code.0);
    }
}

pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> CliResult<()> {
    let data = read_integers_from_path(&cli.file).map_err(|err| {
        CliError::failure(format!("Error opening file {}: {err}", cli.file.display()))
    })?;
    let config = cli.concurrency();
    info!(
        count = data.len(),
        policy = config.policy.name(),
        cutoff = config.sequential_cutoff,
        threads = ?config.threads,
        "sorting input"
    );

    if cli.print {
        print_list(out, "Unsorted list before sequential quicksort", &data)?;
    }
    let start = Instant::now();
    let sorted = sort_sequential(&data)
        .map_err(|err| CliError::failure(format!("Sequential sort failed: {err}")))?;
    let elapsed = start.elapsed().as_secs_f64();
    writeln!(out, "Sequential time:    {elapsed:.6}")?;
    if cli.print {
        print_list(out, "Resulting list", &sorted)?;
    }
    drop(sorted);

    if cli.print {
        print_list(out, "Unsorted list before concurrent quicksort", &data)?;
    }
    let sorter = ConcurrentSorter::new(config)
        .map_err(|err| CliError::failure(format!("Concurrent sort failed: {err}")))?;
    let start = Instant::now();
    let outcome = sorter
        .sort(&data)
        .map_err(|err| CliError::failure(format!("Concurrent sort failed: {err}")))?;
    let elapsed = start.elapsed().as_secs_f64();
    writeln!(out, "Concurrent time:    {elapsed:.6}")?;
    writeln!(out, "Tasks spawned:      {}", outcome.tasks_spawned)?;
    if cli.print {
        print_list(out, "Resulting list", &outcome.sorted)?;
    }

    Ok(())
}

fn print_list<W: Write>(out: &mut W, label: &str, values: &[i32]) -> io::Result<()> {
    writeln!(out, "{label}: {}", format_sequence(values))
}

/// Joins values with `", "`.
pub fn format_sequence(values: &[i32]) -> String {
    values
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
