//! # PackRS Archive Wire Format (`common::archive::format`)
//!
//! File: cli/src/common/archive/format.rs
//!
//! ## Overview
//!
//! Byte-level layout of a PackRS archive. All integers are 4-byte
//! little-endian unsigned values:
//!
//! ```text
//! u32        entry_count
//! repeat entry_count:
//!   u32      name_length
//!   [u8]     name (UTF-8, name_length bytes)
//!   u32      compressed_length
//! [u8]       payload region: every payload, in manifest order
//! ```
//!
//! There is no magic number or codec id; the layout above is the whole
//! format. `ByteReader` walks a buffer and turns every short read into
//! `PackError::TruncatedArchive` carrying the offset and the sizes involved.
//!
use crate::core::error::{PackError, PackResult};

/// Size of every integer field in the archive.
pub const INT_SIZE: usize = 4;

/// Size of the `entry_count` prefix.
pub const COUNT_SIZE: usize = INT_SIZE;

/// Smallest possible manifest header: empty name plus the two length fields.
pub const MIN_HEADER_SIZE: usize = 2 * INT_SIZE;

/// Appends `value` as a little-endian u32.
#[inline]
pub fn put_u32(buffer: &mut Vec<u8>, value: u32) {
    buffer.extend_from_slice(&value.to_le_bytes());
}

/// Converts a length to the u32 the format stores, naming the field on overflow.
pub fn to_u32(len: usize, what: &str) -> PackResult<u32> {
    u32::try_from(len).map_err(|_| {
        PackError::InvalidManifest(format!(
            "{} of {} bytes exceeds the format limit of {} bytes",
            what,
            len,
            u32::MAX
        ))
    })
}

/// Forward-only reader over archive bytes.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current offset from the start of the archive.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the current position.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Takes the next `len` bytes.
    pub fn take(&mut self, len: usize) -> PackResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(PackError::TruncatedArchive {
                offset: self.pos,
                expected: len,
                available: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Reads a little-endian u32.
    pub fn read_u32(&mut self) -> PackResult<u32> {
        let raw = self.take(INT_SIZE)?;
        let mut word = [0u8; INT_SIZE];
        word.copy_from_slice(raw);
        Ok(u32::from_le_bytes(word))
    }
}
