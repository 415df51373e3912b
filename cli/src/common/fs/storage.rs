//! # PackRS Storage Backend (`common::fs::storage`)
//!
//! File: cli/src/common/fs/storage.rs
//!
//! ## Overview
//!
//! The archiver never touches the filesystem directly; it goes through the
//! `Storage` trait, which offers a handful of whole-file operations:
//!
//! - **`exists`**: whether a path currently holds a file.
//! - **`is_dir`**: whether a path currently holds a directory.
//! - **`read`**: the full contents of a file, or `PackError::NotFound`.
//! - **`write`**: replace a file's contents, creating parent directories as
//!   needed. Failures surface as `PackError::Io`.
//!
//! Reads and writes are synchronous and all-or-nothing from the caller's
//! point of view. `LocalStorage` is the `std::fs` implementation used by the
//! CLI; tests substitute an in-memory backend.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::{PackError, Result};
use anyhow::anyhow;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Whole-file storage used by the archiver.
pub trait Storage {
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` currently holds a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// # Errors
    ///
    /// `PackError::NotFound` if nothing is stored at `path`, `PackError::Io`
    /// for any other failure.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// # Errors
    ///
    /// `PackError::Io` if the file or its parent directories cannot be written.
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Storage backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl Storage for LocalStorage {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        match fs::read(path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {:?}", bytes.len(), path);
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(anyhow!(PackError::NotFound {
                path: path.to_path_buf(),
            })),
            Err(source) => Err(anyhow!(PackError::Io {
                path: path.to_path_buf(),
                source,
            })),
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir_exists(parent)?;
        }
        fs::write(path, bytes).map_err(|source| {
            anyhow!(PackError::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}
