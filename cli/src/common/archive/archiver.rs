//! # PackRS Archiver (`common::archive::archiver`)
//!
//! File: cli/src/common/archive/archiver.rs
//!
//! ## Overview
//!
//! Connects the archive container to a storage backend. This is the layer
//! the `create`, `extract` and `list` commands call into.
//!
//! ## Architecture
//!
//! `Archiver` holds a `&dyn Storage` and an `ArchiveContainer`:
//!
//! - **`create_archive`**: reads every input through storage, builds the
//!   archive and writes it out.
//! - **`extract_archive`**: reads and parses an archive and writes each entry
//!   beneath the output directory. Entry names that would escape that
//!   directory are refused before anything is written.
//! - **`list_archive`**: reads only the manifest.
//!
//! Every step returns structured errors with context attached; collapsing
//! them to a plain success/failure is left to `main`.
//!
use super::container::{read_manifest, ArchiveContainer, ArchiveFile, ArchiveManifest};
use crate::common::codec::CodecKind;
use crate::common::fs::io::InputFile;
use crate::common::fs::storage::Storage;
use crate::core::error::{PackError, Result};
use anyhow::{anyhow, Context};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Totals reported after an archive operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchiveSummary {
    pub entries: usize,
    /// Combined size of the unpacked files.
    pub original_bytes: u64,
    /// Size of the archive file.
    pub archive_bytes: u64,
    /// `original_bytes / archive_bytes` as measured by the codec.
    pub ratio: f64,
}

/// Archive operations over an injected storage backend.
pub struct Archiver<'a> {
    storage: &'a dyn Storage,
    container: ArchiveContainer,
}

impl<'a> Archiver<'a> {
    pub fn new(storage: &'a dyn Storage, codec: CodecKind) -> Self {
        let container = ArchiveContainer::new(codec);
        debug!("Archiver using codec {}", container.codec().kind());
        Self { storage, container }
    }

    fn summary(&self, entries: usize, original_bytes: u64, archive_bytes: u64) -> ArchiveSummary {
        ArchiveSummary {
            entries,
            original_bytes,
            archive_bytes,
            ratio: self
                .container
                .codec()
                .compression_ratio(original_bytes as usize, archive_bytes as usize),
        }
    }

    /// Packs `inputs`, in order, into a new archive at `archive_path`.
    pub fn create_archive(&self, archive_path: &Path, inputs: &[InputFile]) -> Result<ArchiveSummary> {
        let mut files = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !self.storage.exists(&input.path) {
                return Err(anyhow!(PackError::NotFound {
                    path: input.path.clone(),
                }));
            }
            let content = self
                .storage
                .read(&input.path)
                .with_context(|| format!("Failed to read input {}", input.path.display()))?;
            debug!("Adding '{}' ({} bytes)", input.name, content.len());
            files.push(ArchiveFile::new(input.name.clone(), content));
        }

        let archive = self
            .container
            .build(&files)
            .context("Failed to assemble archive")?;
        let bytes = archive.to_bytes();
        debug!(
            "Payload region starts at byte {}",
            archive.manifest().payload_offset
        );
        self.storage
            .write(archive_path, &bytes)
            .with_context(|| format!("Failed to write archive {}", archive_path.display()))?;

        let original: u64 = files.iter().map(|f| f.content.len() as u64).sum();
        let summary = self.summary(archive.entry_count(), original, bytes.len() as u64);
        info!(
            "Created {} with {} entries ({} -> {} bytes)",
            archive_path.display(),
            summary.entries,
            summary.original_bytes,
            summary.archive_bytes
        );
        Ok(summary)
    }

    /// Unpacks every entry of `archive_path` beneath `output_dir`.
    ///
    /// Without `overwrite`, an entry whose target already exists fails the
    /// whole extraction before any file is written.
    pub fn extract_archive(
        &self,
        archive_path: &Path,
        output_dir: &Path,
        overwrite: bool,
    ) -> Result<ArchiveSummary> {
        let bytes = self
            .storage
            .read(archive_path)
            .with_context(|| format!("Failed to load archive {}", archive_path.display()))?;
        let files = self
            .container
            .parse(&bytes)
            .with_context(|| format!("Failed to parse archive {}", archive_path.display()))?;

        let targets = files
            .iter()
            .map(|file| entry_target(output_dir, &file.name))
            .collect::<Result<Vec<_>>>()?;
        self.check_targets(output_dir, &files, &targets, overwrite)?;

        for (file, target) in files.iter().zip(&targets) {
            self.storage
                .write(target, &file.content)
                .with_context(|| format!("Failed to extract '{}'", file.name))?;
            debug!("Extracted '{}' to {}", file.name, target.display());
        }

        let original: u64 = files.iter().map(|f| f.content.len() as u64).sum();
        let summary = self.summary(files.len(), original, bytes.len() as u64);
        info!(
            "Extracted {} entries from {} into {}",
            summary.entries,
            archive_path.display(),
            output_dir.display()
        );
        Ok(summary)
    }

    /// Rejects any set of targets that cannot all be written.
    ///
    /// A target may not be an ancestor of another target, may not sit below
    /// an existing file, and may not name an existing directory. Without
    /// `overwrite` it may not name an existing file either.
    fn check_targets(
        &self,
        output_dir: &Path,
        files: &[ArchiveFile],
        targets: &[PathBuf],
        overwrite: bool,
    ) -> Result<()> {
        let wanted: HashSet<&Path> = targets.iter().map(PathBuf::as_path).collect();
        for (file, target) in files.iter().zip(targets) {
            for parent in target
                .ancestors()
                .skip(1)
                .take_while(|p| *p != output_dir)
            {
                if wanted.contains(parent) {
                    anyhow::bail!(PackError::InvalidManifest(format!(
                        "entry '{}' needs {} to be a directory, but another entry is a file there",
                        file.name,
                        parent.display()
                    )));
                }
                if self.storage.exists(parent) {
                    anyhow::bail!(
                        "Cannot extract '{}': {} is an existing file, not a directory",
                        file.name,
                        parent.display()
                    );
                }
            }
            if self.storage.is_dir(target) {
                anyhow::bail!(
                    "Cannot extract '{}': {} is an existing directory",
                    file.name,
                    target.display()
                );
            }
            if !overwrite && self.storage.exists(target) {
                anyhow::bail!(
                    "Refusing to overwrite existing file {} (use --force)",
                    target.display()
                );
            }
        }
        Ok(())
    }

    /// Reads the manifest of `archive_path` without decoding any payload.
    pub fn list_archive(&self, archive_path: &Path) -> Result<ArchiveManifest> {
        let bytes = self
            .storage
            .read(archive_path)
            .with_context(|| format!("Failed to load archive {}", archive_path.display()))?;
        let manifest = read_manifest(&bytes)
            .with_context(|| format!("Failed to read manifest of {}", archive_path.display()))?;
        Ok(manifest)
    }
}

/// Resolves an entry name to a path under `output_dir`.
///
/// Names must be relative and free of `.`, `..` and empty components.
/// Only `/` separates components; any other byte is part of a file name.
pub fn entry_target(output_dir: &Path, name: &str) -> Result<PathBuf> {
    let invalid = |why: &str| {
        anyhow!(PackError::InvalidManifest(format!(
            "entry name '{}' {}",
            name, why
        )))
    };
    if name.is_empty() {
        return Err(invalid("is empty"));
    }
    if name.starts_with('/') {
        return Err(invalid("is not a relative path"));
    }
    let mut target = output_dir.to_path_buf();
    for part in name.split('/') {
        match part {
            "" | "." | ".." => return Err(invalid("contains an empty, '.' or '..' component")),
            _ => target.push(part),
        }
    }
    Ok(target)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fs::storage::memory::MemoryStorage;
    use crate::common::fs::storage::LocalStorage;
    use tempfile::tempdir;

    fn input(name: &str, path: &str) -> InputFile {
        InputFile {
            name: name.to_string(),
            path: PathBuf::from(path),
        }
    }

    fn root_error(err: &anyhow::Error) -> Option<&PackError> {
        err.downcast_ref::<PackError>()
    }

    #[test]
    fn test_create_then_extract_in_memory() -> Result<()> {
        let storage = MemoryStorage::with_files([
            ("in/test.txt", &b"AAAAABBBCC"[..]),
            ("in/other.bin", &[0u8, 0, 0, 1][..]),
        ]);
        let archiver = Archiver::new(&storage, CodecKind::RunLength);

        let created = archiver.create_archive(
            Path::new("out.rla"),
            &[input("test.txt", "in/test.txt"), input("sub/other.bin", "in/other.bin")],
        )?;
        assert_eq!(created.entries, 2);
        assert_eq!(created.original_bytes, 14);

        let extracted = archiver.extract_archive(Path::new("out.rla"), Path::new("x"), false)?;
        assert_eq!(extracted.entries, 2);
        assert_eq!(storage.get("x/test.txt").unwrap(), b"AAAAABBBCC");
        assert_eq!(storage.get("x/sub/other.bin").unwrap(), vec![0, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn test_create_missing_input_is_not_found() {
        let storage = MemoryStorage::default();
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        let err = archiver
            .create_archive(Path::new("out.rla"), &[input("a", "missing")])
            .unwrap_err();
        assert!(matches!(root_error(&err), Some(PackError::NotFound { .. })));
        assert!(storage.get("out.rla").is_none());
    }

    #[test]
    fn test_create_write_failure_is_io() {
        let mut storage = MemoryStorage::with_files([("a", &b"a"[..])]);
        storage.read_only.push(PathBuf::from("out.rla"));
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        let err = archiver
            .create_archive(Path::new("out.rla"), &[input("a", "a")])
            .unwrap_err();
        assert!(matches!(root_error(&err), Some(PackError::Io { .. })));
    }

    #[test]
    fn test_extract_missing_archive_is_not_found() {
        let storage = MemoryStorage::default();
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        let err = archiver
            .extract_archive(Path::new("none.rla"), Path::new("."), false)
            .unwrap_err();
        assert!(matches!(root_error(&err), Some(PackError::NotFound { .. })));
    }

    #[test]
    fn test_extract_truncated_archive_writes_nothing() -> Result<()> {
        let storage = MemoryStorage::with_files([("a", &b"hello"[..])]);
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        archiver.create_archive(Path::new("full.rla"), &[input("a", "a")])?;
        let mut bytes = storage.get("full.rla").unwrap();
        bytes.pop();
        storage.write(Path::new("cut.rla"), &bytes)?;

        let err = archiver
            .extract_archive(Path::new("cut.rla"), Path::new("x"), false)
            .unwrap_err();
        assert!(matches!(
            root_error(&err),
            Some(PackError::TruncatedArchive { .. })
        ));
        assert!(storage.get("x/a").is_none());
        Ok(())
    }

    #[test]
    fn test_extract_refuses_overwrite_without_force() -> Result<()> {
        let storage = MemoryStorage::with_files([("a", &b"new"[..]), ("x/a", &b"old"[..])]);
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        archiver.create_archive(Path::new("a.rla"), &[input("a", "a")])?;

        let err = archiver
            .extract_archive(Path::new("a.rla"), Path::new("x"), false)
            .unwrap_err();
        assert!(err.to_string().contains("Refusing to overwrite"));
        assert_eq!(storage.get("x/a").unwrap(), b"old");

        archiver.extract_archive(Path::new("a.rla"), Path::new("x"), true)?;
        assert_eq!(storage.get("x/a").unwrap(), b"new");
        Ok(())
    }

    #[test]
    fn test_extract_rejects_escaping_names() -> Result<()> {
        let storage = MemoryStorage::with_files([("a", &b"evil"[..])]);
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        archiver.create_archive(Path::new("evil.rla"), &[input("../escape", "a")])?;

        let err = archiver
            .extract_archive(Path::new("evil.rla"), Path::new("x"), false)
            .unwrap_err();
        assert!(matches!(root_error(&err), Some(PackError::InvalidManifest(_))));
        assert_eq!(storage.paths(), vec![PathBuf::from("a"), PathBuf::from("evil.rla")]);
        Ok(())
    }

    #[test]
    fn test_list_reads_manifest_only() -> Result<()> {
        let storage = MemoryStorage::with_files([("a", &b"aaaa"[..]), ("b", &b"b"[..])]);
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        archiver.create_archive(Path::new("l.rla"), &[input("a", "a"), input("b", "b")])?;

        // Corrupt a payload byte; the manifest stays readable.
        let mut bytes = storage.get("l.rla").unwrap();
        let last = bytes.len() - 1;
        bytes[last] = 0;
        storage.write(Path::new("l.rla"), &bytes)?;

        let manifest = archiver.list_archive(Path::new("l.rla"))?;
        let names: Vec<&str> = manifest.entries.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(archiver
            .extract_archive(Path::new("l.rla"), Path::new("x"), false)
            .is_err());
        Ok(())
    }

    #[test]
    fn test_entry_target_validation() {
        let out = Path::new("out");
        assert_eq!(entry_target(out, "a/b.txt").unwrap(), out.join("a").join("b.txt"));
        assert_eq!(entry_target(out, "notes:v2.txt").unwrap(), out.join("notes:v2.txt"));
        for bad in ["", "/etc/passwd", "../x", "a/../../x", "a//b", "./a", "a/"] {
            let err = entry_target(out, bad).unwrap_err();
            assert!(
                matches!(root_error(&err), Some(PackError::InvalidManifest(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_round_trip_keeps_colons_and_backslashes() -> Result<()> {
        let storage = MemoryStorage::with_files([
            ("in/notes:v2.txt", &b"v2"[..]),
            ("in/back\\slash", &b"bs"[..]),
        ]);
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        archiver.create_archive(
            Path::new("n.rla"),
            &[
                input("notes:v2.txt", "in/notes:v2.txt"),
                input("back\\slash", "in/back\\slash"),
            ],
        )?;
        archiver.extract_archive(Path::new("n.rla"), Path::new("x"), false)?;
        assert_eq!(storage.get("x/notes:v2.txt").unwrap(), b"v2");
        assert_eq!(storage.get("x/back\\slash").unwrap(), b"bs");
        Ok(())
    }

    #[test]
    fn test_extract_rejects_file_directory_clash_between_entries() -> Result<()> {
        let dir = tempdir()?;
        let src = dir.path().join("src.txt");
        std::fs::write(&src, "data")?;
        let archive = dir.path().join("clash.rla");
        let out = dir.path().join("out");
        let path = src.to_str().unwrap();

        let archiver = Archiver::new(&LocalStorage, CodecKind::RunLength);
        archiver.create_archive(&archive, &[input("a", path), input("a/b", path)])?;
        let err = archiver.extract_archive(&archive, &out, false).unwrap_err();
        assert!(matches!(root_error(&err), Some(PackError::InvalidManifest(_))));
        assert!(!out.join("a").exists());
        Ok(())
    }

    #[test]
    fn test_extract_rejects_existing_file_in_the_way() -> Result<()> {
        let storage = MemoryStorage::with_files([("a", &b"new"[..]), ("x/d", &b"file"[..])]);
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        archiver.create_archive(
            Path::new("d.rla"),
            &[input("first", "a"), input("d/inner", "a")],
        )?;

        let err = archiver
            .extract_archive(Path::new("d.rla"), Path::new("x"), true)
            .unwrap_err();
        assert!(err.to_string().contains("is an existing file, not a directory"));
        assert!(storage.get("x/first").is_none());
        Ok(())
    }

    #[test]
    fn test_extract_rejects_existing_directory_target() -> Result<()> {
        let storage = MemoryStorage::with_files([("a", &b"new"[..]), ("x/d/kept", &b"k"[..])]);
        let archiver = Archiver::new(&storage, CodecKind::RunLength);
        archiver.create_archive(Path::new("d.rla"), &[input("first", "a"), input("d", "a")])?;

        let err = archiver
            .extract_archive(Path::new("d.rla"), Path::new("x"), true)
            .unwrap_err();
        assert!(err.to_string().contains("is an existing directory"));
        assert!(storage.get("x/first").is_none());
        Ok(())
    }

    #[test]
    fn test_local_storage_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let src = dir.path().join("src.txt");
        std::fs::write(&src, "zzzzzz top")?;
        let archive = dir.path().join("a.rla");
        let out = dir.path().join("out");

        let archiver = Archiver::new(&LocalStorage, CodecKind::RunLength);
        archiver.create_archive(&archive, &[input("docs/src.txt", src.to_str().unwrap())])?;
        let summary = archiver.extract_archive(&archive, &out, false)?;
        assert_eq!(summary.entries, 1);
        assert_eq!(std::fs::read_to_string(out.join("docs/src.txt"))?, "zzzzzz top");
        Ok(())
    }
}
