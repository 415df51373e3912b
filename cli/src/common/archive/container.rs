//! # PackRS Archive Container (`common::archive::container`)
//!
//! File: cli/src/common/archive/container.rs
//!
//! ## Overview
//!
//! Maps an ordered set of named files to a single archive byte stream and
//! back. Each file's content is compressed independently with the
//! container's codec; the manifest that precedes the payload region records
//! every entry's name and compressed length, so a reader can locate any
//! payload without decoding the ones before it.
//!
//! ## Architecture
//!
//! - `ArchiveContainer::build` encodes every file and assembles an in-memory
//!   [`Archive`]; `Archive::to_bytes` serializes it (see `format` for the layout).
//! - `read_manifest` parses only the manifest and checks it against the bytes
//!   that follow. Any declared size running past the end of the buffer is a
//!   `TruncatedArchive`; leftover bytes after the payload region, non-UTF-8
//!   names or overflowing size sums are an `InvalidManifest`.
//! - `ArchiveContainer::parse` walks the manifest and decodes every payload,
//!   returning all files in manifest order (duplicate names included).
//!
//! Both directions are single-pass and hold no state between calls.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::container::{ArchiveContainer, ArchiveFile};
//! use crate::common::codec::CodecKind;
//!
//! let container = ArchiveContainer::new(CodecKind::RunLength);
//! let files = vec![ArchiveFile::new("test.txt", b"AAAAABBBCC".to_vec())];
//! let bytes = container.build(&files)?.to_bytes();
//! assert_eq!(container.parse(&bytes)?, files);
//! ```
//!
use super::format::{self, ByteReader, COUNT_SIZE, MIN_HEADER_SIZE};
use crate::common::codec::{Codec, CodecKind};
use crate::core::error::{PackError, PackResult};
use tracing::debug;

/// A named file as handed to `build` and returned by `parse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl ArchiveFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// One compressed file inside an [`Archive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub compressed_length: u32,
    pub payload: Vec<u8>,
}

/// Manifest header for one entry, with the absolute offset of its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    pub name: String,
    pub compressed_length: u32,
    pub offset: usize,
}

impl EntryHeader {
    /// Byte range of this entry's payload within the archive.
    pub fn payload_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.compressed_length as usize
    }
}

/// The ordered entry headers of an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    pub entries: Vec<EntryHeader>,
    /// Offset of the first payload byte.
    pub payload_offset: usize,
}

impl ArchiveManifest {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all declared compressed lengths.
    pub fn payload_size(&self) -> u64 {
        self.entries
            .iter()
            .map(|h| u64::from(h.compressed_length))
            .sum()
    }
}

/// An archive assembled in memory by [`ArchiveContainer::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Size of `to_bytes()` output.
    pub fn encoded_len(&self) -> usize {
        COUNT_SIZE
            + self
                .entries
                .iter()
                .map(|e| MIN_HEADER_SIZE + e.name.len() + e.payload.len())
                .sum::<usize>()
    }

    /// Headers and payload offsets as they will appear once serialized.
    pub fn manifest(&self) -> ArchiveManifest {
        let payload_offset = COUNT_SIZE
            + self
                .entries
                .iter()
                .map(|e| MIN_HEADER_SIZE + e.name.len())
                .sum::<usize>();
        let mut offset = payload_offset;
        let entries = self
            .entries
            .iter()
            .map(|e| {
                let header = EntryHeader {
                    name: e.name.clone(),
                    compressed_length: e.compressed_length,
                    offset,
                };
                offset += e.payload.len();
                header
            })
            .collect();
        ArchiveManifest {
            entries,
            payload_offset,
        }
    }

    /// Serializes the archive: entry count, manifest, then payloads.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.encoded_len());
        // `build` guarantees every count and length fits in u32.
        format::put_u32(&mut buffer, self.entries.len() as u32);
        for entry in &self.entries {
            format::put_u32(&mut buffer, entry.name.len() as u32);
            buffer.extend_from_slice(entry.name.as_bytes());
            format::put_u32(&mut buffer, entry.compressed_length);
        }
        for entry in &self.entries {
            buffer.extend_from_slice(&entry.payload);
        }
        buffer
    }
}

/// Builds and parses archives with one codec.
pub struct ArchiveContainer {
    codec: Box<dyn Codec>,
}

impl ArchiveContainer {
    pub fn new(kind: CodecKind) -> Self {
        Self::with_codec(kind.codec())
    }

    pub fn with_codec(codec: Box<dyn Codec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// Compresses every file and assembles the archive, preserving order.
    ///
    /// # Errors
    ///
    /// `PackError::InvalidManifest` if there are more than `u32::MAX` files or
    /// a name or payload is longer than `u32::MAX` bytes.
    pub fn build(&self, files: &[ArchiveFile]) -> PackResult<Archive> {
        format::to_u32(files.len(), "entry count")?;
        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            format::to_u32(file.name.len(), "entry name")?;
            let payload = self.codec.encode(&file.content);
            let compressed_length =
                format::to_u32(payload.len(), &format!("payload of '{}'", file.name))?;
            debug!(
                "Packed '{}': {} -> {} bytes",
                file.name,
                file.content.len(),
                compressed_length
            );
            entries.push(ArchiveEntry {
                name: file.name.clone(),
                compressed_length,
                payload,
            });
        }
        Ok(Archive { entries })
    }

    /// Decodes every entry of an archive, in manifest order.
    ///
    /// # Errors
    ///
    /// - `TruncatedArchive` if any declared size runs past the end of `bytes`.
    /// - `InvalidManifest` if the manifest is inconsistent with the payload region.
    /// - `MalformedPayload` if an entry's payload fails to decode; the offset is
    ///   absolute within `bytes` and the reason names the entry.
    pub fn parse(&self, bytes: &[u8]) -> PackResult<Vec<ArchiveFile>> {
        let manifest = read_manifest(bytes)?;
        let mut files = Vec::with_capacity(manifest.entry_count());
        for header in &manifest.entries {
            let chunk = &bytes[header.payload_range()];
            let content = self
                .codec
                .decode(chunk)
                .map_err(|e| locate_in_archive(e, header))?;
            debug!(
                "Unpacked '{}': {} -> {} bytes",
                header.name,
                chunk.len(),
                content.len()
            );
            files.push(ArchiveFile {
                name: header.name.clone(),
                content,
            });
        }
        Ok(files)
    }
}

impl Default for ArchiveContainer {
    fn default() -> Self {
        Self::new(CodecKind::default())
    }
}

/// Rewrites a payload-relative codec error into archive coordinates.
fn locate_in_archive(err: PackError, header: &EntryHeader) -> PackError {
    match err {
        PackError::MalformedPayload { offset, reason } => PackError::MalformedPayload {
            offset: header.offset + offset,
            reason: format!("entry '{}': {}", header.name, reason),
        },
        other => other,
    }
}

/// Parses the manifest and validates it against the payload region.
pub fn read_manifest(bytes: &[u8]) -> PackResult<ArchiveManifest> {
    let mut reader = ByteReader::new(bytes);
    let count = reader.read_u32()? as usize;

    // Cap the preallocation by what the buffer could possibly hold.
    let mut headers = Vec::with_capacity(count.min(reader.remaining() / MIN_HEADER_SIZE));
    for index in 0..count {
        let name_len = reader.read_u32()? as usize;
        let name_at = reader.position();
        let raw_name = reader.take(name_len)?;
        let name = String::from_utf8(raw_name.to_vec()).map_err(|_| {
            PackError::InvalidManifest(format!(
                "name of entry {} at byte {} is not valid UTF-8",
                index, name_at
            ))
        })?;
        let compressed_length = reader.read_u32()?;
        headers.push((name, compressed_length));
    }

    let payload_offset = reader.position();
    let mut offset = payload_offset;
    let mut entries = Vec::with_capacity(headers.len());
    for (name, compressed_length) in headers {
        entries.push(EntryHeader {
            name,
            compressed_length,
            offset,
        });
        offset = offset
            .checked_add(compressed_length as usize)
            .ok_or_else(|| {
                PackError::InvalidManifest("declared payload sizes overflow".to_string())
            })?;
    }

    let declared = offset - payload_offset;
    let available = reader.remaining();
    if declared > available {
        return Err(PackError::TruncatedArchive {
            offset: payload_offset,
            expected: declared,
            available,
        });
    }
    if declared < available {
        return Err(PackError::InvalidManifest(format!(
            "manifest declares {} payload bytes but {} follow it ({} trailing)",
            declared,
            available,
            available - declared
        )));
    }

    debug!(
        "Read manifest: {} entries, payload region at byte {} ({} bytes)",
        entries.len(),
        payload_offset,
        declared
    );
    Ok(ArchiveManifest {
        entries,
        payload_offset,
    })
}
