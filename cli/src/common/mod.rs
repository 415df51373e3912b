//! # PackRS Common Modules (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! This module is the root for the archiver's building blocks, kept apart
//! from the command handlers (`commands::`) and the core infrastructure
//! (`core::`).
//!
//! ## Architecture
//!
//! - **`codec`**: the `Codec` capability, the `CodecKind` registry and the
//!   run-length codec.
//! - **`archive`**: the archive wire format, the `ArchiveContainer` and the
//!   storage-driven `Archiver`.
//! - **`fs`**: the `Storage` backend and filesystem helpers.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{archive, codec, fs};
//!
//! let kind: codec::CodecKind = "rle".parse()?;
//! let archiver = archive::archiver::Archiver::new(&fs::storage::LocalStorage, kind);
//! ```
//!

/// Archive format, container and archiver.
pub mod archive;
/// Byte-stream codecs and the codec registry.
pub mod codec;
/// Storage backend and filesystem helpers.
pub mod fs;
