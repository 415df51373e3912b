//! # PackRS Extract Command
//!
//! File: cli/src/commands/extract.rs
//!
//! ## Overview
//!
//! This module implements `packrs extract`, which restores every file of an
//! archive under an output directory, recreating the entry names as
//! relative paths.
//!
//! ## Architecture
//!
//! 1. Parse command arguments (archive path, output directory, `--force`).
//! 2. Load configuration for the default output directory, the overwrite
//!    policy and the codec.
//! 3. Parse the archive through `Archiver::extract_archive`. Corruption is
//!    detected before anything is written.
//! 4. Print a one-line summary.
//!
//! ## Examples
//!
//! ```bash
//! # Extract into the configured directory (default: current directory)
//! packrs extract notes.rla
//!
//! # Extract into ./restored, replacing existing files
//! packrs extract notes.rla -o restored --force
//! ```
//!
use crate::common::archive::archiver::Archiver;
use crate::common::codec::CodecKind;
use crate::common::fs::storage::LocalStorage;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// # Extract Arguments (`ExtractArgs`)
///
/// Defines the command-line arguments accepted by `packrs extract`.
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Archive to unpack.
    pub archive: PathBuf,

    /// Directory to extract into. Defaults to `extract.directory` from the
    /// configuration, or the current directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace files that already exist in the output directory.
    #[arg(short, long)]
    pub force: bool,

    /// Codec the archive entries were compressed with (e.g. "rle").
    #[arg(long, short, env = "PACKRS_CODEC")]
    pub codec: Option<String>,
}

/// # Handle Extract Command (`handle_extract`)
///
/// ## Errors
///
/// Fails if the archive is missing (`NotFound`) or corrupt
/// (`TruncatedArchive`, `InvalidManifest`, `MalformedPayload`), if an entry
/// would overwrite an existing file without `--force`, or on a write failure.
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    info!("Handling extract command...");
    debug!("Extract args: {:?}", args);

    let cfg = config::load_config().context("Failed to load configuration")?;
    let codec = match &args.codec {
        Some(name) => name.parse::<CodecKind>()?,
        None => cfg.codec_kind()?,
    };
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.extract.directory));
    let overwrite = args.force || cfg.overwrite();

    let archiver = Archiver::new(&LocalStorage, codec);
    let summary = archiver.extract_archive(&args.archive, &output_dir, overwrite)?;

    println!(
        "Extracted {} entries ({} bytes) into {}",
        summary.entries,
        summary.original_bytes,
        output_dir.display()
    );
    Ok(())
}
