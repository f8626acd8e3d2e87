//! Error types for the huffcode codec.
//!
//! All operations return structured errors rather than panicking, so the
//! command surface can sort failures into the categories it reports.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Not found: a source or table file does not exist
/// - Missing symbol: the input uses a symbol the code table does not cover
/// - Decode: the packed stream is corrupt or was built with another table
/// - Huffman: table construction or validation failures
/// - Bit I/O: reading past the end of a bounded bit stream
/// - Table: the persisted table resource is malformed
/// - I/O: every other file system failure
#[derive(Debug, Error)]
pub enum Error {
    /// A source or table file does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Input symbol absent from the code table
    #[error("symbol {symbol:?} at position {position} is not in the code table")]
    MissingSymbol { symbol: char, position: usize },

    /// Packed stream could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Huffman table construction or validation error
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Bit I/O operation failed
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Persisted table could not be parsed or written
    #[error("table format error: {0}")]
    Table(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an I/O error, promoting `NotFound` to the dedicated variant.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound { path: path.into() }
        } else {
            Error::Io(err)
        }
    }

    /// True if this error means a file was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the bit stream
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Bit length is larger than the backing buffer
    #[error("bit length {bits} exceeds buffer of {bytes} bytes")]
    LengthOutOfRange { bits: usize, bytes: usize },
}

/// Huffman table errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols in the frequency map (cannot build a tree)
    #[error("empty frequency table: cannot build a code table")]
    EmptyFrequencyTable,

    /// Codeword is empty or contains characters other than '0' and '1'
    #[error("invalid codeword {code:?} for symbol {symbol:?}")]
    InvalidCode { symbol: char, code: String },

    /// One codeword is a prefix of (or equal to) another
    #[error("codeword {prefix:?} for {first:?} is a prefix of the codeword for {second:?}")]
    PrefixCollision {
        first: char,
        second: char,
        prefix: String,
    },
}

/// Decode corruption errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Artifact has no padding header byte
    #[error("encoded artifact is empty: missing padding header")]
    MissingHeader,

    /// Padding count outside 1..=8 or larger than the payload
    #[error("invalid padding {padding} for a payload of {payload_bits} bits")]
    InvalidPadding { padding: u8, payload_bits: usize },

    /// Walk reached a node with no child for the next bit
    #[error("no codeword continues at bit position {position}")]
    DeadEnd { position: usize },

    /// Stream ended in the middle of a codeword
    #[error("bit stream ends inside a codeword at bit position {position}")]
    TruncatedCode { position: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
