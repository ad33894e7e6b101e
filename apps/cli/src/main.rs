//! synthgrow CLI - inspect and check progressive-growing schedules
//!
//! Reads the progressive block of a synthesis training configuration
//! (YAML, JSON or TOML) and reports the stage schedule a training driver
//! would follow.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{check, locate, resolve, simulate, stage};

/// synthgrow - progressive-growing schedule tool
#[derive(Parser, Debug)]
#[command(
    name = "synthgrow",
    author,
    version,
    about = "Resolve and inspect progressive-growing training schedules"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved stage schedule
    Resolve {
        /// Path to the configuration document
        config: PathBuf,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a single stage; defaults to the configured forward step
    Stage {
        /// Path to the configuration document
        config: PathBuf,

        /// Stage index to print
        #[arg(long)]
        step: Option<usize>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the stage active at a cumulative, 0-indexed epoch
    Locate {
        /// Path to the configuration document
        config: PathBuf,

        /// Global epoch counter
        #[arg(long)]
        epoch: u64,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration
    Check {
        /// Path to the configuration document
        config: PathBuf,

        /// Epoch budget of the trainer; must match the schedule's total
        #[arg(long)]
        max_epochs: Option<u64>,
    },

    /// Dry-run the schedule and print progress events
    Simulate {
        /// Path to the configuration document
        config: PathBuf,

        /// Number of samples in the training dataset
        #[arg(long)]
        dataset_len: usize,

        /// Samples per batch
        #[arg(long, default_value_t = 1)]
        batch_size: usize,

        /// Emit events as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Resolve { config, json } => resolve::execute(&config, json),
        Command::Stage { config, step, json } => stage::execute(&config, step, json),
        Command::Locate { config, epoch, json } => locate::execute(&config, epoch, json),
        Command::Check { config, max_epochs } => check::execute(&config, max_epochs),
        Command::Simulate { config, dataset_len, batch_size, json } => {
            simulate::execute(&config, dataset_len, batch_size, json)
        }
    }
}
