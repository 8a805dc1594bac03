//! Quotebook CLI
//!
//! An interactive quote board backed by a directory of record documents.
//!
//! # Commands
//!
//! - `run` - Interactive session (default)
//! - `inspect` - Display store counters
//! - `verify` - Check every record document and report dangling ones
//! - `version` - Show version information

mod command;
mod commands;
mod error;
mod session;
mod validate;
mod view;

use clap::{Parser, Subcommand};
use quotebook_core::config::{DEFAULT_EXPORT_PATH, DEFAULT_ROOT};
use quotebook_core::{Config, WriteMode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Quote board with per-record file storage.
#[derive(Parser)]
#[command(name = "quotebook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the id counter and record documents
    #[arg(global = true, short, long, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// File written by the `build` command
    #[arg(global = true, short, long, default_value = DEFAULT_EXPORT_PATH)]
    export: PathBuf,

    /// Replace documents via write-then-rename instead of in place
    #[arg(global = true, long)]
    atomic_writes: bool,

    /// Enable verbose logging on stderr
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive quote board
    Run,

    /// Display store counters
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Verify every record document
    Verify,

    /// Show version information
    Version,
}

impl Cli {
    fn config(&self) -> Config {
        let mode = if self.atomic_writes {
            WriteMode::AtomicRename
        } else {
            WriteMode::Overwrite
        };
        Config::new()
            .root(&self.root)
            .export_path(&self.export)
            .write_mode(mode)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so the session transcript on stdout stays clean.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match dispatch(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = cli.config();

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Run => commands::run::run(&config),
        Commands::Inspect { format } => {
            commands::inspect::run(&config, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify => {
            let clean = commands::verify::run(&config)?;
            Ok(if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Version => {
            println!("Quotebook CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Quotebook Core v{}", quotebook_core::VERSION);
            Ok(ExitCode::SUCCESS)
        }
    }
}
