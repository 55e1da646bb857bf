//! Courier CLI - tools for the courier event bridge.
//!
//! Decodes SMS PDUs, replays recorded platform callbacks through a fully
//! assembled bridge, and prints the resolved configuration.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod headless;
mod settings;

use commands::{config, decode, replay};

/// Courier - native notification and SMS event bridge
#[derive(Parser)]
#[command(name = "courier")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode hex SMS PDUs into the event a consumer would receive
    Decode {
        /// PDU format tag (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Hex-encoded PDUs, in arrival order
        #[arg(required = true)]
        pdus: Vec<String>,
    },

    /// Replay recorded raw events (newline-delimited JSON) through the bridge
    Replay {
        /// File of recorded events, or `-` for stdin
        file: PathBuf,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved configuration
    Show,
    /// Show config files that were loaded
    Paths,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let resolved = courier_config::Config::load(cli.config.as_deref())?;

    // Set up logging from config, with --verbose override.
    let logging = match settings::to_log_config(&resolved.config) {
        Ok(mut log_config) => {
            if cli.verbose {
                "debug".clone_into(&mut log_config.level);
            }
            courier_telemetry::setup_logging(&log_config)
        },
        Err(e) => {
            eprintln!("Invalid logging configuration, using defaults: {e}");
            courier_telemetry::setup_default_logging()
        },
    };
    if let Err(e) = logging {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Decode { format, pdus } => {
            let format = format.unwrap_or_else(|| resolved.config.sms.default_format.clone());
            decode::run_decode(&format, &pdus)?;
        },
        Commands::Replay { file } => {
            replay::run_replay(&resolved.config, &file).await?;
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => config::show_config(&resolved)?,
            ConfigCommands::Paths => config::show_paths(&resolved),
        },
    }

    Ok(())
}
