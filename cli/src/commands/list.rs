//! # PackRS List Command
//!
//! File: cli/src/commands/list.rs
//!
//! ## Overview
//!
//! This module implements `packrs list`, which prints the manifest of an
//! archive. Only the manifest is parsed, so listing works without decoding
//! any payload.
//!
//! ## Examples
//!
//! ```bash
//! packrs list notes.rla
//! ```
//!
//! Example output:
//!
//! ```
//!       Size  Name
//! ----------  ----------------
//!          6  test.txt
//!         12  docs/readme.md
//!
//! 2 entries, 18 payload bytes
//! ```
//!
use crate::common::archive::archiver::Archiver;
use crate::common::archive::container::ArchiveManifest;
use crate::common::fs::storage::LocalStorage;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// # List Arguments (`ListArgs`)
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Archive to inspect.
    pub archive: PathBuf,
}

/// # Handle List Command (`handle_list`)
///
/// ## Errors
///
/// Fails if the archive is missing or its manifest is truncated or invalid.
pub fn handle_list(args: ListArgs) -> Result<()> {
    info!("Handling list command...");
    debug!("List args: {:?}", args);

    // Listing never decodes payloads, so the codec choice does not matter.
    let archiver = Archiver::new(&LocalStorage, Default::default());
    let manifest = archiver.list_archive(&args.archive)?;
    debug!("Payload region starts at byte {}", manifest.payload_offset);
    print!("{}", render_manifest(&manifest));
    Ok(())
}

fn render_manifest(manifest: &ArchiveManifest) -> String {
    let mut out = String::new();
    if manifest.entries.is_empty() {
        out.push_str("Archive is empty.\n");
        return out;
    }
    out.push_str(&format!("{:>10}  {}\n", "Size", "Name"));
    out.push_str(&format!("{}  {}\n", "-".repeat(10), "-".repeat(16)));
    for header in &manifest.entries {
        out.push_str(&format!("{:>10}  {}\n", header.compressed_length, header.name));
    }
    out.push_str(&format!(
        "\n{} entries, {} payload bytes\n",
        manifest.entry_count(),
        manifest.payload_size()
    ));
    out
}
