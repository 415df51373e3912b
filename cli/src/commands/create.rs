//! # PackRS Create Command
//!
//! File: cli/src/commands/create.rs
//!
//! ## Overview
//!
//! This module implements `packrs create`, which packs one or more files
//! into a new archive.
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. Parse command arguments (archive path, inputs, optional codec).
//! 2. Load configuration and resolve the codec: `--codec` (or `PACKRS_CODEC`)
//!    wins over the configured `archive.codec`.
//! 3. Expand the inputs; directories contribute every file beneath them.
//! 4. Build the archive through `Archiver::create_archive` and write it.
//! 5. Print a one-line summary.
//!
//! ## Examples
//!
//! ```bash
//! # Pack two files
//! packrs create notes.rla notes.txt todo.txt
//!
//! # Pack a whole directory with an explicit codec
//! packrs create --codec rle site.rla public/
//! ```
//!
use crate::common::archive::archiver::Archiver;
use crate::common::codec::CodecKind;
use crate::common::fs::{io, storage::LocalStorage};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// # Create Arguments (`CreateArgs`)
///
/// Defines the command-line arguments accepted by `packrs create`.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Path of the archive to write. An existing file is replaced.
    pub archive: PathBuf,

    /// Files or directories to pack, in order. Directories are walked
    /// recursively and their files added sorted by name.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Codec used to compress every entry (e.g. "rle"). Overrides the
    /// `archive.codec` configuration setting.
    #[arg(long, short, env = "PACKRS_CODEC")]
    pub codec: Option<String>,
}

/// # Handle Create Command (`handle_create`)
///
/// Resolves the codec, expands the inputs and writes the archive.
///
/// ## Errors
///
/// Fails on an unknown codec (`InvalidConfiguration`), a missing input
/// (`NotFound`), or a storage failure while reading inputs or writing the
/// archive (`Io`).
pub fn handle_create(args: CreateArgs) -> Result<()> {
    info!("Handling create command...");
    debug!("Create args: {:?}", args);

    let cfg = config::load_config().context("Failed to load configuration")?;
    let codec = match &args.codec {
        Some(name) => name.parse::<CodecKind>()?,
        None => cfg.codec_kind()?,
    };
    debug!("Using codec: {}", codec);

    let inputs = io::collect_inputs(&args.inputs).context("Failed to collect input files")?;
    let archiver = Archiver::new(&LocalStorage, codec);
    let summary = archiver.create_archive(&args.archive, &inputs)?;

    println!(
        "Created {} ({} entries, {} -> {} bytes, ratio {:.2})",
        args.archive.display(),
        summary.entries,
        summary.original_bytes,
        summary.archive_bytes,
        summary.ratio
    );
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args_parsing() {
        let args = CreateArgs::try_parse_from(["create", "out.rla", "a.txt", "docs"]).unwrap();
        assert_eq!(args.archive, PathBuf::from("out.rla"));
        assert_eq!(args.inputs, vec![PathBuf::from("a.txt"), PathBuf::from("docs")]);
    }

    #[test]
    fn test_create_args_codec_flag() {
        let args =
            CreateArgs::try_parse_from(["create", "--codec", "rle", "out.rla", "a.txt"]).unwrap();
        assert_eq!(args.codec.as_deref(), Some("rle"));
    }

    #[test]
    fn test_create_args_require_inputs() {
        assert!(CreateArgs::try_parse_from(["create", "out.rla"]).is_err());
    }
}
