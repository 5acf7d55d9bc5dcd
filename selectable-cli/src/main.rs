mod scenario;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use thiserror::Error;

use crate::scenario::{Output, Scenario};

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Select(#[from] selectable::SelectError),

    #[error("invariant violated: {0}")]
    Invariant(#[from] selectable::InvariantViolation),
}

#[derive(Debug, Parser)]
#[command(name = "selectable")]
#[command(version, about = "Walk through the selection engine and print its notifications")]
struct Args {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print notifications as JSON lines
    #[arg(long)]
    json: bool,

    /// Scenario to run
    #[arg(value_enum, default_value = "all")]
    scenario: Scenario,
}

fn init_logging(args: &Args) -> Result<(), CliError> {
    match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::LogFile {
                path: path.clone(),
                source,
            })?;
            WriteLogger::init(args.log_level, Config::default(), file)?;
        }
        None => TermLogger::init(
            args.log_level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?,
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    init_logging(&args)?;

    let output = if args.json { Output::Json } else { Output::Text };
    for scenario in args.scenario.expand() {
        scenario.run(output)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
