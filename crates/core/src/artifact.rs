//! Encoded artifact serialization and parsing.
//!
//! # Format
//!
//! ```text
//! +------------------+
//! | padding (1 byte) |  number of zero bits appended to the payload (1-8)
//! +------------------+
//! | payload          |  packed codeword bits, MSB-first
//! | (variable)       |
//! +------------------+
//! ```
//!
//! # Padding
//!
//! The encoder always appends `8 - (L mod 8)` zero bits to an `L`-bit
//! stream. When `L` is already a multiple of 8 (including an empty input)
//! that is a whole zero byte with a padding of 8. A padding of 0 never
//! appears in a valid artifact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{DecodeError, Error, Result};

/// Size of the artifact header in bytes
pub const HEADER_SIZE: usize = 1;

/// Largest padding the encoder writes
pub const MAX_PADDING: u8 = 8;

/// Padding appended to a stream of `bit_len` bits.
pub fn padding_for(bit_len: usize) -> u8 {
    (8 - bit_len % 8) as u8
}

/// A packed bitstream with its padding header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    /// Number of trailing zero bits in `payload`
    pub padding: u8,

    /// Packed codeword bits followed by `padding` zero bits
    pub payload: Vec<u8>,
}

impl EncodedArtifact {
    /// Number of meaningful bits in the payload.
    ///
    /// # Errors
    /// `DecodeError::InvalidPadding` if the padding is outside 1..=8 or
    /// exceeds the payload.
    pub fn bit_len(&self) -> Result<usize> {
        let payload_bits = self.payload.len() * 8;
        if self.padding == 0
            || self.padding > MAX_PADDING
            || self.padding as usize > payload_bits
        {
            return Err(DecodeError::InvalidPadding {
                padding: self.padding,
                payload_bits,
            }
            .into());
        }
        Ok(payload_bits - self.padding as usize)
    }

    /// Serialize as header byte followed by payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.payload.len());
        bytes.push(self.padding);
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Parse an artifact from bytes.
    ///
    /// # Errors
    /// - `DecodeError::MissingHeader` if `bytes` is empty
    /// - `DecodeError::InvalidPadding` if the header is inconsistent
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let (&padding, payload) = bytes.split_first().ok_or(DecodeError::MissingHeader)?;
        let artifact = Self {
            padding,
            payload: payload.to_vec(),
        };
        artifact.bit_len()?;
        Ok(artifact)
    }

    /// Write the artifact to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::from_io(e, path))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&[self.padding])?;
        writer.write_all(&self.payload)?;
        writer.flush()?;
        Ok(())
    }

    /// Read and parse the artifact stored at `path`.
    pub fn read_from(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::from_io(e, path))?;
        Self::parse(&bytes)
    }

    /// Total serialized size in bytes.
    pub fn byte_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}
