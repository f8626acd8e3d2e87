//! huffcode-core: Huffman code tables and bit-packed text files
//!
//! This library builds a prefix-free binary code from character
//! frequencies, packs text into a bit-dense artifact, and reverses the
//! process exactly.
//!
//! # Architecture
//!
//! - `frequency`: Symbol counting and baseline alphabet merging
//! - `tree`: Huffman tree construction with stable tie-breaking
//! - `code_table`: Codeword generation, validation and canonical ordering
//! - `store`: JSON persistence of code tables
//! - `bitio`: Low-level bit reading/writing
//! - `encode`: Text to encoded artifact
//! - `artifact`: Padding header + payload format
//! - `decode`: Decode tree reconstruction and bit-by-bit decoding
//! - `stats`: Per-run counters for reporting
//!
//! # Example
//!
//! ```
//! use huffcode_core::{decode, encode, Baseline, CodeTable, FrequencyMap};
//!
//! let text = "abracadabra";
//! let frequencies = FrequencyMap::from_text(text).with_baseline(&Baseline::Default);
//! let table = CodeTable::from_frequencies(&frequencies).unwrap();
//!
//! let artifact = encode(text, &table).unwrap();
//! assert_eq!(decode(&artifact, &table).unwrap(), text);
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Deterministic**: The same frequency map always yields the same table
//! - **Closed alphabet**: Encoding a symbol the table lacks is an error

pub mod artifact;
pub mod bitio;
pub mod code_table;
pub mod decode;
pub mod encode;
pub mod error;
pub mod frequency;
pub mod stats;
pub mod store;
pub mod tree;

// Re-export commonly used types
pub use artifact::EncodedArtifact;
pub use code_table::CodeTable;
pub use decode::{decode, DecodeTree};
pub use encode::encode;
pub use error::{Error, Result};
pub use frequency::{Baseline, FrequencyMap, DEFAULT_BASELINE};
pub use stats::CodecStats;
pub use tree::HuffmanTree;
