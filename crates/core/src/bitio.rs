//! Bit-level I/O for packing and unpacking codewords.
//!
//! `BitWriter` and `BitReader` both operate in MSB-first order: the first
//! bit written lands in the most significant bit of the first byte.
//!
//! # Padding Rules
//! - BitWriter: `finish` fills an incomplete final byte with zeros
//! - BitReader: is bounded by an explicit bit length, so trailing padding
//!   is never handed back as data
//!
//! # Example
//! ```
//! use huffcode_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_code("101");
//! writer.write_code("11");
//! // Total: 10111 -> padded to 10111000
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&bytes, 5).unwrap();
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! assert_eq!(reader.bits_remaining(), 3);
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Write a codeword given as a string of '0' and '1'.
    ///
    /// Any character other than '1' is written as a zero bit; code tables
    /// validate their codewords before they reach the writer.
    pub fn write_code(&mut self, code: &str) {
        for c in code.bytes() {
            self.write_bit(c == b'1');
        }
    }

    /// Write `count` zero bits.
    pub fn write_zeros(&mut self, count: usize) {
        for _ in 0..count {
            self.write_bit(false);
        }
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Finish writing and return the output bytes.
    ///
    /// Remaining bits in the buffer are padded with trailing zeros.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer, up to a fixed bit length.
///
/// # Invariants
/// - `bit_len <= data.len() * 8`
/// - `bit_position <= bit_len`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Number of meaningful bits in `data`
    bit_len: usize,
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over the first `bit_len` bits of `data`.
    ///
    /// # Errors
    /// `BitIoError::LengthOutOfRange` if `bit_len` exceeds the buffer.
    pub fn new(data: &'a [u8], bit_len: usize) -> Result<Self> {
        if bit_len > data.len() * 8 {
            return Err(BitIoError::LengthOutOfRange {
                bits: bit_len,
                bytes: data.len(),
            }
            .into());
        }
        Ok(Self {
            data,
            bit_len,
            bit_position: 0,
        })
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once all `bit_len` bits are consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.is_empty() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let byte = self.data[self.bit_position / 8];
        let bit = ((byte >> (7 - self.bit_position % 8)) & 1) == 1;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Return the number of bits remaining.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Check if all meaningful bits have been read.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }
}
