//! Batch runner for the yearly leave jobs.
//!
//! Loads a store snapshot, runs one job over every employee and writes the
//! snapshot back. The per-employee summary is printed as JSON on stdout.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use leave_engine::config::ConfigLoader;
use leave_engine::error::{EngineError, EngineResult};
use leave_engine::lifecycle::{BatchSummary, LeaveService, SystemClock};
use leave_engine::notify::TracingNotifier;
use leave_engine::store::{InMemoryStore, StoreSnapshot};
use leave_engine::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "leave-batch",
    about = "Run annual allotment and carry-over against a leave store snapshot",
    version
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Directory holding policy.yaml and onboarding.yaml
    #[arg(long, global = true, default_value = "./config/default")]
    config: PathBuf,
    /// Store snapshot to read and update
    #[arg(long, global = true, default_value = "./leave-store.json")]
    snapshot: PathBuf,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute allotments for all active employees
    Allot(YearArgs),
    /// Carry unused balances from a year into the next
    CarryOver(YearArgs),
}

#[derive(Args, Debug)]
struct YearArgs {
    /// Year to process (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
}

impl YearArgs {
    fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = telemetry::init(&cli.common.log_level) {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(summary) if summary.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(err) => {
            error!(error = %err, kind = ?err.kind(), "Batch aborted");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> EngineResult<BatchSummary> {
    let policy = ConfigLoader::load(&cli.common.config)?.into_policy();
    let snapshot = StoreSnapshot::load(&cli.common.snapshot)?;
    let store = Arc::new(InMemoryStore::from_snapshot(snapshot)?);

    let service = LeaveService::new(
        Arc::clone(&store),
        Arc::new(TracingNotifier),
        SystemClock,
        policy,
    );

    let summary = match &cli.command {
        Command::Allot(args) => {
            let year = args.year();
            info!(year, "Calculating annual allotments");
            service.run_annual_allotment(year)?
        }
        Command::CarryOver(args) => {
            let year = args.year();
            info!(from_year = year, to_year = year + 1, "Carrying over balances");
            service.carry_over(year)?
        }
    };

    store.snapshot().save(&cli.common.snapshot)?;

    let report = serde_json::to_string_pretty(&summary).map_err(|e| EngineError::StorageError {
        message: format!("cannot serialize batch summary: {}", e),
    })?;
    println!("{}", report);

    Ok(summary)
}
