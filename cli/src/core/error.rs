//! # PackRS Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout PackRS. Two layers
//! share it:
//!
//! - The codec and the archive container return structured `PackError`
//!   values (`PackResult<T>`), so corruption can be diagnosed precisely
//!   (offsets, expected vs. actual sizes) and matched on in tests.
//! - The command layer uses `Result<T>`, an alias for `anyhow::Result<T>`,
//!   adding context as errors bubble up to `main`.
//!
//! `main` collapses whatever reaches it into a single success/failure exit
//! status.
//!
//! ## Examples
//!
//! ```rust
//! // Structured failure from the codec
//! let err = RunLengthCodec.decode(&[0x41]).unwrap_err();
//! assert!(matches!(err, PackError::MalformedPayload { offset: 0, .. }));
//!
//! // Context at the command layer
//! let bytes = storage
//!     .read(archive_path)
//!     .with_context(|| format!("Failed to load archive {}", archive_path.display()))?;
//!
//! // Recovering the structured error from an anyhow chain
//! if let Some(PackError::TruncatedArchive { .. }) = e.downcast_ref::<PackError>() {
//!     eprintln!("archive is incomplete");
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the PackRS application.
// No PartialEq: `Io` carries a std::io::Error.
#[derive(Error, Debug)]
pub enum PackError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed payload at byte {offset}: {reason}")]
    MalformedPayload { offset: usize, reason: String },

    #[error("Truncated archive at byte {offset}: expected {expected} bytes, {available} available")]
    TruncatedArchive {
        offset: usize,
        expected: usize,
        available: usize,
    },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for the codec and container layers.
pub type PackResult<T> = std::result::Result<T, PackError>;

/// Type alias for Result using anyhow::Error for the command layer.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
