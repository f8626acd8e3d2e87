//! Bitstream encoder.
//!
//! Concatenates the codeword of every input symbol, appends padding zeros
//! up to the next byte boundary and records the padding count in the
//! artifact header.

use std::path::Path;

use tracing::info;

use crate::artifact::{padding_for, EncodedArtifact};
use crate::bitio::BitWriter;
use crate::code_table::CodeTable;
use crate::error::{Error, Result};

/// Encode `text` with `table`.
///
/// # Errors
/// `Error::MissingSymbol` for the first symbol that has no codeword.
pub fn encode(text: &str, table: &CodeTable) -> Result<EncodedArtifact> {
    let mut writer = BitWriter::new();
    for (position, symbol) in text.chars().enumerate() {
        let code = table
            .code(symbol)
            .ok_or(Error::MissingSymbol { symbol, position })?;
        writer.write_code(code);
    }

    let padding = padding_for(writer.bit_len());
    writer.write_zeros(padding as usize);

    let artifact = EncodedArtifact {
        padding,
        payload: writer.finish(),
    };
    info!(
        input_bytes = text.len(),
        output_bytes = artifact.byte_len(),
        padding,
        "encoded text"
    );
    Ok(artifact)
}

/// Encode the text file at `input` and write the artifact to `output`.
pub fn encode_file(input: &Path, table: &CodeTable, output: &Path) -> Result<EncodedArtifact> {
    let text = std::fs::read_to_string(input).map_err(|e| Error::from_io(e, input))?;
    let artifact = encode(&text, table)?;
    artifact.write_to(output)?;
    Ok(artifact)
}

/// Default artifact path: `input` with its extension replaced by `.bin`.
pub fn default_output_path(input: &Path) -> std::path::PathBuf {
    input.with_extension("bin")
}
