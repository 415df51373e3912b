//! # PackRS Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the PackRS CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the subcommand handlers
//! - Reducing the outcome to a success/failure exit status
//!
//! ## Architecture
//!
//! - Each subcommand (`create`, `extract`, `list`) is a variant of `Commands`
//!   mapped to a handler in `commands::`.
//! - Handlers work with structured errors; they are logged in full here and
//!   the process exits with status 1 on any failure, 0 otherwise.
//!
//! ## Examples
//!
//! ```bash
//! # Pack files, then restore them elsewhere
//! packrs create notes.rla notes.txt todo.txt
//! packrs extract notes.rla -o restored
//!
//! # Inspect an archive with debug logging
//! packrs -vv list notes.rla
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (create, extract, list)
mod common; // Codec, archive container, storage
mod core; // Configuration and error types

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "packrs",
    about = "📦 PackRS: a minimal run-length archiver",
    long_about = "Pack files into a single run-length compressed archive and restore them.\n\
                  Each entry is compressed independently and listed in a manifest.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Pack files and directories into a new archive.
    #[command(alias = "c")]
    Create(commands::create::CreateArgs),
    /// Restore every entry of an archive into a directory.
    #[command(alias = "x")]
    Extract(commands::extract::ExtractArgs),
    /// Print the entries of an archive.
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Create(args) => commands::create::handle_create(args),
        Commands::Extract(args) => commands::extract::handle_extract(args),
        Commands::List(args) => commands::list::handle_list(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
