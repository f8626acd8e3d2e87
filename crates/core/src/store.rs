//! Persisting code tables as JSON.
//!
//! A table file is a single JSON object mapping each symbol (a one-character
//! string) to its codeword, written in canonical order:
//!
//! ```text
//! {
//!   " ": "000",
//!   "e": "010",
//!   ...
//! }
//! ```
//!
//! Tables are independent of any payload, so one file can serve many
//! encode/decode calls over inputs sharing its alphabet.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::code_table::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::{Baseline, FrequencyMap};

/// Write `table` to `path` as pretty-printed JSON.
pub fn save_table(path: &Path, table: &CodeTable) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::from_io(e, path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, table)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!(path = %path.display(), symbols = table.len(), "saved code table");
    Ok(())
}

/// Load and validate a table from `path`.
///
/// # Errors
/// - `Error::NotFound` if the file does not exist
/// - `Error::Table` if it is not a valid prefix-free table
/// - `Error::Io` for other read failures
pub fn load_table(path: &Path) -> Result<CodeTable> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
    let table: CodeTable = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), symbols = table.len(), "loaded code table");
    Ok(table)
}

/// Build a table for `text` merged with `baseline`.
pub fn build_table(text: &str, baseline: &Baseline) -> Result<CodeTable> {
    let frequencies = FrequencyMap::from_text(text).with_baseline(baseline);
    CodeTable::from_frequencies(&frequencies)
}

/// Load the table at `path`, or build one from `text` and save it there if
/// the file does not exist yet.
pub fn load_or_build(path: &Path, text: &str, baseline: &Baseline) -> Result<CodeTable> {
    match load_table(path) {
        Ok(table) => Ok(table),
        Err(err) if err.is_not_found() => {
            warn!(path = %path.display(), "table file not found, building a new one");
            let table = build_table(text, baseline)?;
            save_table(path, &table)?;
            Ok(table)
        }
        Err(err) => Err(err),
    }
}
