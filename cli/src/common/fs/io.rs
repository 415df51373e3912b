//! # PackRS Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the filesystem helpers the archiver needs around
//! the storage backend:
//!
//! - **`ensure_dir_exists`**: creates a directory (and parents) if missing and
//!   rejects a path that exists but is not a directory.
//! - **`collect_inputs`**: turns the paths given to `packrs create` into an
//!   ordered list of files to pack. Directories are walked recursively with
//!   `walkdir`, sorted by file name so archives are reproducible.
//! - **`entry_name`**: derives the archive entry name for an input path.
//!   Only normal path components are kept and joined with `/`, so
//!   `./docs/a.txt`, `/tmp/docs/a.txt` and `../docs/a.txt` become
//!   `docs/a.txt`, `tmp/docs/a.txt` and `docs/a.txt`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! let inputs = io::collect_inputs(&[PathBuf::from("notes.txt"), PathBuf::from("docs")])?;
//! for input in &inputs {
//!     println!("{} <- {}", input.name, input.path.display());
//! }
//! io::ensure_dir_exists(Path::new("./unpacked"))?;
//! ```
//!
use crate::core::error::{PackError, Result};
use anyhow::{anyhow, Context};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// A file selected for packing: where to read it and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub path: PathBuf,
}

/// Ensures that a directory exists at the specified path.
///
/// # Errors
///
/// `PackError::Io` if the path exists but is not a directory, or if
/// creating the directory fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| PackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(PackError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "path exists but is not a directory",
            ),
        });
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Archive entry name for `path`: its normal components joined with `/`.
///
/// # Errors
///
/// `PackError::InvalidManifest` if a component is not valid UTF-8.
pub fn entry_name(path: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| {
                PackError::InvalidManifest(format!(
                    "path {} is not valid UTF-8",
                    path.display()
                ))
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}

/// Expands the inputs of `packrs create` into files to pack, in argument order.
///
/// # Errors
///
/// `PackError::NotFound` for a path that does not exist; an error for a
/// directory that cannot be walked or an input that names no file.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_file() {
            inputs.push(input_for(path)?);
        } else if path.is_dir() {
            let before = inputs.len();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry
                    .with_context(|| format!("Failed to walk directory {}", path.display()))?;
                if entry.file_type().is_file() {
                    inputs.push(input_for(entry.path())?);
                }
            }
            debug!(
                "Expanded directory {} into {} files",
                path.display(),
                inputs.len() - before
            );
        } else {
            return Err(anyhow!(PackError::NotFound { path: path.clone() }));
        }
    }
    Ok(inputs)
}

fn input_for(path: &Path) -> Result<InputFile> {
    let name = entry_name(path)?;
    if name.is_empty() {
        anyhow::bail!(PackError::InvalidManifest(format!(
            "cannot derive an entry name from {}",
            path.display()
        )));
    }
    Ok(InputFile {
        name,
        path: path.to_path_buf(),
    })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_already_exists() -> Result<()> {
        let base_dir = tempdir()?;
        let existing_dir = base_dir.path().join("existing");
        fs::create_dir(&existing_dir)?;
        ensure_dir_exists(&existing_dir)?;
        assert!(existing_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let err = ensure_dir_exists(&file_path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::Io { .. })
        ));
        assert!(format!("{:#}", err).contains("path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_under_file_is_io() -> Result<()> {
        let base_dir = tempdir()?;
        let blocker = base_dir.path().join("blocker");
        fs::write(&blocker, "x")?;
        let err = ensure_dir_exists(&blocker.join("sub")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::Io { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_entry_name_keeps_normal_components() -> Result<()> {
        assert_eq!(entry_name(Path::new("./docs/a.txt"))?, "docs/a.txt");
        assert_eq!(entry_name(Path::new("/tmp/docs/a.txt"))?, "tmp/docs/a.txt");
        assert_eq!(entry_name(Path::new("../docs/a.txt"))?, "docs/a.txt");
        assert_eq!(entry_name(Path::new(".."))?, "");
        assert_eq!(entry_name(Path::new("notes:v2.txt"))?, "notes:v2.txt");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_entry_name_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("docs").join(OsStr::from_bytes(b"bad\xff.txt"));
        let err = entry_name(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::InvalidManifest(_))
        ));
    }

    #[test]
    fn test_collect_inputs_expands_directories_sorted() -> Result<()> {
        let base_dir = tempdir()?;
        let root = base_dir.path().join("tree");
        fs::create_dir_all(root.join("sub"))?;
        fs::write(root.join("b.txt"), "b")?;
        fs::write(root.join("a.txt"), "a")?;
        fs::write(root.join("sub/c.txt"), "c")?;
        let single = base_dir.path().join("single.txt");
        fs::write(&single, "s")?;

        let inputs = collect_inputs(&[single.clone(), root.clone()])?;
        let paths: Vec<PathBuf> = inputs.iter().map(|i| i.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                single,
                root.join("a.txt"),
                root.join("b.txt"),
                root.join("sub").join("c.txt"),
            ]
        );
        assert!(inputs[3].name.ends_with("tree/sub/c.txt"));
        Ok(())
    }

    #[test]
    fn test_collect_inputs_missing_path() -> Result<()> {
        let base_dir = tempdir()?;
        let err = collect_inputs(&[base_dir.path().join("nope.txt")]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::NotFound { .. })
        ));
        Ok(())
    }
}
