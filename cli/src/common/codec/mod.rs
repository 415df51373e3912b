//! # PackRS Codec Registry (`common::codec`)
//!
//! File: cli/src/common/codec/mod.rs
//!
//! ## Overview
//!
//! This module defines the byte-stream compression capability used by the
//! archive container and the closed set of codecs PackRS knows about.
//!
//! ## Architecture
//!
//! - **`Codec`**: the capability trait (`encode`, `decode`, `compression_ratio`).
//!   Implementations are stateless, so one instance can serve any number of
//!   concurrent calls.
//! - **`CodecKind`**: the registry. Each variant has a stable numeric id and a
//!   set of accepted names; either may be used as a selector (`"rle"`, `"0"`).
//!   Selecting anything else fails with `PackError::InvalidConfiguration`.
//! - **`rle`**: the run-length codec, currently the only variant.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::codec::CodecKind;
//!
//! let codec = "rle".parse::<CodecKind>()?.codec();
//! let packed = codec.encode(b"AAAAABBBCC");
//! assert_eq!(codec.decode(&packed)?, b"AAAAABBBCC");
//! ```
//!
use crate::core::error::{PackError, PackResult};
use std::fmt;
use std::str::FromStr;

pub mod rle;

pub use rle::RunLengthCodec;

/// A lossless byte-stream compressor.
pub trait Codec: Send + Sync {
    /// Which registry entry this codec is.
    fn kind(&self) -> CodecKind;

    /// Compresses `data`. Never fails; output may be larger than input.
    fn encode(&self, data: &[u8]) -> Vec<u8>;

    /// Reverses `encode`, rejecting corrupt input with `MalformedPayload`.
    fn decode(&self, encoded: &[u8]) -> PackResult<Vec<u8>>;

    /// Ratio of original to encoded size for one encode call.
    ///
    /// Measured from the sizes passed in rather than reported as a fixed
    /// figure. Two empty buffers count as `1.0`; any other zero-sized side
    /// yields `0.0`.
    fn compression_ratio(&self, original_len: usize, encoded_len: usize) -> f64 {
        match (original_len, encoded_len) {
            (0, 0) => 1.0,
            (_, 0) | (0, _) => 0.0,
            (o, e) => o as f64 / e as f64,
        }
    }
}

/// The closed set of codecs PackRS can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodecKind {
    /// Byte-pair run-length encoding (see [`rle`]).
    #[default]
    RunLength,
}

impl CodecKind {
    /// Every registered codec, in id order.
    pub fn all() -> &'static [CodecKind] {
        &[CodecKind::RunLength]
    }

    /// Stable numeric identifier.
    pub fn id(&self) -> u8 {
        match self {
            CodecKind::RunLength => 0,
        }
    }

    /// Canonical name, as accepted by `--codec` and the config file.
    pub fn name(&self) -> &'static str {
        match self {
            CodecKind::RunLength => "rle",
        }
    }

    /// Looks up a codec by numeric id.
    pub fn from_id(id: u8) -> PackResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| PackError::InvalidConfiguration(format!("Unknown codec id {}", id)))
    }

    /// Instantiates the codec.
    pub fn codec(&self) -> Box<dyn Codec> {
        match self {
            CodecKind::RunLength => Box::new(RunLengthCodec),
        }
    }
}

impl FromStr for CodecKind {
    type Err = PackError;

    fn from_str(s: &str) -> PackResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rle" | "run-length" | "runlength" => Ok(CodecKind::RunLength),
            other if !other.is_empty() && other.bytes().all(|b| b.is_ascii_digit()) => other
                .parse::<u8>()
                .map_err(|_| PackError::InvalidConfiguration(format!("Unknown codec id {}", other)))
                .and_then(Self::from_id),
            other => Err(PackError::InvalidConfiguration(format!(
                "Unknown codec '{}'. Supported codecs: {}",
                other,
                Self::all()
                    .iter()
                    .map(|k| k.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
