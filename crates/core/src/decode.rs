//! Decode tree reconstruction and bitstream decoding.
//!
//! The decode tree is rebuilt from a code table by replaying every codeword
//! as a path from the root. Nodes live in an arena and refer to their
//! children by index; the root is always index 0.
//!
//! Decoding walks the tree one bit at a time (0 = left, 1 = right). Each
//! time a node holding a symbol is reached the symbol is emitted and the walk
//! restarts at the root. A missing child, or a stream that stops between
//! two symbols' worth of bits, is reported as corruption.

use std::path::Path;

use tracing::info;

use crate::artifact::EncodedArtifact;
use crate::bitio::BitReader;
use crate::code_table::CodeTable;
use crate::error::{DecodeError, Result};

const ROOT: usize = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DecodeNode {
    /// Set only on leaves
    symbol: Option<char>,
    /// Left and right child indices
    children: [Option<usize>; 2],
}

/// Binary tree for walking a bitstream back into symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

impl DecodeTree {
    /// Rebuild the tree for `table`.
    pub fn from_table(table: &CodeTable) -> Self {
        let mut nodes = vec![DecodeNode::default()];

        for (symbol, code) in table.iter() {
            let mut index = ROOT;
            for bit in code.bytes() {
                let branch = usize::from(bit == b'1');
                index = match nodes[index].children[branch] {
                    Some(child) => child,
                    None => {
                        nodes.push(DecodeNode::default());
                        let child = nodes.len() - 1;
                        nodes[index].children[branch] = Some(child);
                        child
                    }
                };
            }
            nodes[index].symbol = Some(symbol);
        }

        Self { nodes }
    }

    /// Number of symbol-bearing nodes.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.symbol.is_some()).count()
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Follow `code` from the root and return the symbol it ends on.
    pub fn lookup(&self, code: &str) -> Option<char> {
        let mut index = ROOT;
        for bit in code.bytes() {
            index = self.nodes[index].children[usize::from(bit == b'1')]?;
        }
        self.nodes[index].symbol
    }

    /// Decode every remaining bit of `reader`.
    ///
    /// # Errors
    /// - `DecodeError::DeadEnd` if a bit leads to a missing child
    /// - `DecodeError::TruncatedCode` if the bits stop inside a codeword
    pub fn decode_bits(&self, reader: &mut BitReader<'_>) -> Result<String> {
        let mut text = String::new();
        let mut index = ROOT;

        while !reader.is_empty() {
            let position = reader.position();
            let bit = reader.read_bit()?;
            index = self.nodes[index].children[usize::from(bit)]
                .ok_or(DecodeError::DeadEnd { position })?;

            if let Some(symbol) = self.nodes[index].symbol {
                text.push(symbol);
                index = ROOT;
            }
        }

        if index != ROOT {
            return Err(DecodeError::TruncatedCode {
                position: reader.position(),
            }
            .into());
        }
        Ok(text)
    }
}

/// Decode `artifact` with `table`.
pub fn decode(artifact: &EncodedArtifact, table: &CodeTable) -> Result<String> {
    let bit_len = artifact.bit_len()?;
    let mut reader = BitReader::new(&artifact.payload, bit_len)?;
    let text = DecodeTree::from_table(table).decode_bits(&mut reader)?;
    info!(
        input_bytes = artifact.byte_len(),
        symbols = text.chars().count(),
        "decoded artifact"
    );
    Ok(text)
}

/// Read the artifact at `input` and decode it with `table`.
pub fn decode_file(input: &Path, table: &CodeTable) -> Result<String> {
    let artifact = EncodedArtifact::read_from(input)?;
    decode(&artifact, table)
}
