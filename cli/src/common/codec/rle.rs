//! # PackRS Run-Length Codec (`common::codec::rle`)
//!
//! File: cli/src/common/codec/rle.rs
//!
//! ## Overview
//!
//! Byte-oriented run-length encoding. Consecutive equal bytes are grouped
//! into runs of at most 255 and each run is written as a `(value, length)`
//! byte pair:
//!
//! ```text
//! "AAAAABBBCC"  ->  41 05 42 03 43 02
//! 300 x 0xAA    ->  AA FF AA 2D
//! ```
//!
//! Low-redundancy input grows (every lone byte costs two output bytes). That
//! is a property of the scheme, not something this module tries to avoid.
//!
//! Decoding validates the pair stream: an odd length or a zero-length run is
//! reported as `PackError::MalformedPayload` with the offending offset.
//!
use super::{Codec, CodecKind};
use crate::core::error::{PackError, PackResult};

/// Longest run a single pair can describe.
pub const MAX_RUN: u8 = u8::MAX;

/// A maximal run of one repeated byte, `length` in `1..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRun {
    pub value: u8,
    pub length: u8,
}

/// Iterator over the runs of a byte slice, in encounter order.
///
/// Runs longer than [`MAX_RUN`] are split, so two adjacent runs only share a
/// value when the first one is full.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Runs<'a> {
    type Item = ByteRun;

    fn next(&mut self) -> Option<ByteRun> {
        let value = *self.data.get(self.pos)?;
        let length = self.data[self.pos..]
            .iter()
            .take(MAX_RUN as usize)
            .take_while(|&&b| b == value)
            .count();
        self.pos += length;
        // `take(MAX_RUN)` bounds the count to u8 range.
        Some(ByteRun {
            value,
            length: length as u8,
        })
    }
}

/// Splits `data` into runs.
pub fn runs(data: &[u8]) -> Runs<'_> {
    Runs { data, pos: 0 }
}

/// Stateless run-length codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthCodec;

impl RunLengthCodec {
    /// Encodes `data` as `(value, length)` pairs. Empty input yields empty output.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len().min(1 << 16));
        for run in runs(data) {
            out.push(run.value);
            out.push(run.length);
        }
        out
    }

    /// Expands a `(value, length)` pair stream back into the original bytes.
    ///
    /// # Errors
    ///
    /// `PackError::MalformedPayload` if `encoded` has odd length or declares
    /// a run of length zero.
    pub fn decode(&self, encoded: &[u8]) -> PackResult<Vec<u8>> {
        if encoded.len() % 2 != 0 {
            return Err(PackError::MalformedPayload {
                offset: encoded.len() - 1,
                reason: format!(
                    "odd payload length {}, last pair is missing its run length",
                    encoded.len()
                ),
            });
        }

        let mut out = Vec::new();
        for (index, pair) in encoded.chunks_exact(2).enumerate() {
            let (value, length) = (pair[0], pair[1]);
            if length == 0 {
                return Err(PackError::MalformedPayload {
                    offset: index * 2 + 1,
                    reason: format!("zero-length run for byte 0x{:02X}", value),
                });
            }
            out.resize(out.len() + length as usize, value);
        }
        Ok(out)
    }
}

impl Codec for RunLengthCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::RunLength
    }

    fn encode(&self, data: &[u8]) -> Vec<u8> {
        RunLengthCodec::encode(self, data)
    }

    fn decode(&self, encoded: &[u8]) -> PackResult<Vec<u8>> {
        RunLengthCodec::decode(self, encoded)
    }
}
