//! # PackRS Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module owns the PackRS archive: its byte layout, the container that
//! maps named files to that layout, and the archiver that moves archives
//! between memory and a storage backend.
//!
//! ## Architecture
//!
//! - **`format`**: wire-format constants and the bounds-checked `ByteReader`.
//! - **`container`**: `ArchiveContainer::build` / `parse`, `read_manifest`,
//!   and the `Archive`, `ArchiveEntry` and `ArchiveManifest` types.
//! - **`archiver`**: `Archiver`, which combines a container with an injected
//!   `Storage` to create, extract and list archive files.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::archiver::Archiver;
//! use crate::common::codec::CodecKind;
//! use crate::common::fs::{io, storage::LocalStorage};
//!
//! let archiver = Archiver::new(&LocalStorage, CodecKind::RunLength);
//! let inputs = io::collect_inputs(&[PathBuf::from("notes.txt")])?;
//! archiver.create_archive(Path::new("notes.rla"), &inputs)?;
//! archiver.extract_archive(Path::new("notes.rla"), Path::new("out"), false)?;
//! ```
//!

pub mod archiver;
pub mod container;
pub mod format;
