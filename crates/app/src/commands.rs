//! The four operations behind the command line.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use huffcode_core::store::{load_or_build, load_table, save_table};
use huffcode_core::{
    decode, encode, Baseline, CodeTable, CodecStats, EncodedArtifact, Error, FrequencyMap,
};
use tracing::{debug, info};

use crate::config::{Config, Operation};

/// Run the configured operation, writing any text output to `out`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    debug!(?config, "resolved configuration");

    match &config.operation {
        Operation::CreateTable {
            input,
            table,
            baseline,
        } => create_table(input, table.as_deref(), baseline, out),
        Operation::GetTable { table } => get_table(table, out),
        Operation::Encode {
            input,
            table,
            output,
        } => encode_file(input, table, output, config.print_stats),
        Operation::Decode {
            input,
            table,
            output,
        } => decode_file(input, table, output.as_deref(), config.print_stats, out),
    }
}

fn create_table<W: Write>(
    input: &Path,
    table_path: Option<&Path>,
    baseline: &Baseline,
    out: &mut W,
) -> Result<()> {
    let frequencies = FrequencyMap::from_path(input)?.with_baseline(baseline);
    let table = CodeTable::from_frequencies(&frequencies)?;
    write!(out, "{table}")?;

    if let Some(path) = table_path {
        save_table(path, &table)?;
        info!(
            path = %path.display(),
            symbols = table.len(),
            avg_bits = table.average_code_length(&frequencies),
            "saved code table"
        );
    }
    Ok(())
}

fn get_table<W: Write>(table_path: &Path, out: &mut W) -> Result<()> {
    let table = load_table(table_path)?;
    write!(out, "{table}")?;
    Ok(())
}

fn encode_file(input: &Path, table_path: &Path, output: &Path, print_stats: bool) -> Result<()> {
    let mut stats = CodecStats::new();

    let text = read_text(input)?;
    let table = load_or_build(table_path, &text, &Baseline::Default)?;
    let artifact = encode(&text, &table)
        .with_context(|| format!("failed to encode {}", input.display()))?;
    artifact.write_to(output)?;

    stats.record(&text, &table, &artifact);
    stats.complete();
    info!(path = %output.display(), bytes = artifact.byte_len(), "wrote encoded file");

    if print_stats {
        stats.print_summary();
    }
    Ok(())
}

fn decode_file<W: Write>(
    input: &Path,
    table_path: &Path,
    output: Option<&Path>,
    print_stats: bool,
    out: &mut W,
) -> Result<()> {
    let mut stats = CodecStats::new();

    let table = load_table(table_path)?;
    let artifact = EncodedArtifact::read_from(input)?;
    let text = decode(&artifact, &table)
        .with_context(|| format!("failed to decode {}", input.display()))?;

    match output {
        Some(path) => {
            std::fs::write(path, &text).map_err(|e| Error::from_io(e, path))?;
            info!(path = %path.display(), bytes = text.len(), "wrote decoded text");
        }
        None => write!(out, "{text}")?,
    }

    stats.record(&text, &table, &artifact);
    stats.complete();
    if print_stats {
        // stdout carries the decoded text when there is no output file
        match output {
            Some(_) => stats.print_summary(),
            None => stats.write_summary(&mut std::io::stderr().lock())?,
        }
    }
    Ok(())
}

fn read_text(path: &Path) -> huffcode_core::Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))
}
