//! Statistics for a single encode or decode run.
//!
//! Collected by the command surface and printed on request, so the effect
//! of a code table on a particular input is visible.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::artifact::EncodedArtifact;
use crate::code_table::CodeTable;

/// Counters and timing for one codec run.
#[derive(Debug, Clone)]
pub struct CodecStats {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Text side ===
    /// Symbols in the plain text
    pub symbols: u64,

    /// UTF-8 size of the plain text
    pub text_bytes: u64,

    // === Table ===
    /// Entries in the code table used
    pub table_entries: u64,

    // === Packed side ===
    /// Meaningful bits in the payload
    pub payload_bits: u64,

    /// Zero bits appended for alignment
    pub padding_bits: u64,

    /// Artifact size including the header byte
    pub artifact_bytes: u64,
}

impl CodecStats {
    /// Create new stats with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            symbols: 0,
            text_bytes: 0,
            table_entries: 0,
            payload_bits: 0,
            padding_bits: 0,
            artifact_bytes: 0,
        }
    }

    /// Record the two sides of a run.
    ///
    /// `artifact` must be well-formed (as produced by the encoder or
    /// accepted by the parser); an inconsistent padding counts as zero
    /// payload bits.
    pub fn record(&mut self, text: &str, table: &CodeTable, artifact: &EncodedArtifact) {
        self.symbols = text.chars().count() as u64;
        self.text_bytes = text.len() as u64;
        self.table_entries = table.len() as u64;
        self.payload_bits = artifact.bit_len().unwrap_or(0) as u64;
        self.padding_bits = artifact.padding as u64;
        self.artifact_bytes = artifact.byte_len() as u64;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compression ratio (artifact / text).
    ///
    /// Returns 0.0 for empty text.
    pub fn compression_ratio(&self) -> f64 {
        if self.text_bytes == 0 {
            0.0
        } else {
            self.artifact_bytes as f64 / self.text_bytes as f64
        }
    }

    /// Average payload bits per symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.symbols as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        let _ = self.write_summary(&mut std::io::stdout().lock());
    }

    /// Write the human-readable summary to `w`.
    pub fn write_summary<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "=== Codec Summary ===")?;
        writeln!(w, "Duration: {} ms", self.duration().as_millis())?;
        writeln!(w)?;
        writeln!(w, "Text:     {} symbols, {} bytes", self.symbols, self.text_bytes)?;
        writeln!(w, "Table:    {} entries", self.table_entries)?;
        writeln!(
            w,
            "Artifact: {} bytes ({} payload bits + {} padding bits + header)",
            self.artifact_bytes, self.payload_bits, self.padding_bits
        )?;
        writeln!(w, "Ratio:    {:.1}%", self.compression_ratio() * 100.0)?;
        writeln!(w, "Bits/symbol: {:.3}", self.bits_per_symbol())
    }

    /// Export stats as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             symbols={}\n\
             text_bytes={}\n\
             table_entries={}\n\
             payload_bits={}\n\
             padding_bits={}\n\
             artifact_bytes={}\n\
             compression_ratio={:.4}\n",
            self.duration().as_millis(),
            self.symbols,
            self.text_bytes,
            self.table_entries,
            self.payload_bits,
            self.padding_bits,
            self.artifact_bytes,
            self.compression_ratio(),
        )
    }
}

impl Default for CodecStats {
    fn default() -> Self {
        Self::new()
    }
}
