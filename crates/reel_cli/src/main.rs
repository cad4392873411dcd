//! Reel CLI
//!
//! Runs list configurations without a host engine:
//! - `reel simulate` drives a headless list and prints window transitions
//! - `reel check` loads and validates a list config file

mod simulate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use reel_view::ListConfig;
use tracing_subscriber::EnvFilter;

use crate::simulate::SimulateArgs;

/// Headless tools for Reel list views
#[derive(Parser, Debug)]
#[command(name = "reel")]
#[command(about = "Headless tools for Reel list views")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive a list with scripted input and print each window change
    Simulate(SimulateArgs),

    /// Load and validate a list config
    Check {
        /// Path to the TOML config
        config: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate(args) => simulate::run(args),
        Commands::Check { config } => {
            let list = ListConfig::load(&config)
                .with_context(|| format!("invalid list config {}", config.display()))?;
            println!(
                "{}: ok ({:?}, {} items, fixed count {}, loop {})",
                config.display(),
                list.motion,
                list.num_items,
                list.fixed_count,
                list.looping
            );
            Ok(())
        }
    }
}
