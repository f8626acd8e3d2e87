//! Configuration for the huffcode command-line tool.
//!
//! Parses the four operations and resolves defaults (artifact path,
//! baseline alphabet, log level) into a `Config`.
//!
//! Parser failures are sorted into the classes the tool reports:
//! missing arguments, an unknown operation name, or anything else.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use huffcode_core::encode::default_output_path;
use huffcode_core::Baseline;
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "huffcode", version, about = "Huffman text compressor")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print codec statistics after encoding or decoding
    #[arg(long, global = true)]
    stats: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a code table from a text file, print it, and optionally save it
    #[command(name = "create_table")]
    CreateTable {
        input: PathBuf,
        table: Option<PathBuf>,
        /// Symbols that must always get a code; "" for none (default: ASCII)
        baseline: Option<String>,
    },

    /// Print a saved code table
    #[command(name = "get_table")]
    GetTable { table: PathBuf },

    /// Encode a text file, creating the table file if it does not exist
    Encode {
        input: PathBuf,
        table: PathBuf,
        /// Defaults to the input path with a .bin extension
        output: Option<PathBuf>,
    },

    /// Decode an encoded file; prints the text if no output is given
    Decode {
        input: PathBuf,
        table: PathBuf,
        output: Option<PathBuf>,
    },
}

/// A fully resolved operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateTable {
        input: PathBuf,
        table: Option<PathBuf>,
        baseline: Baseline,
    },
    GetTable {
        table: PathBuf,
    },
    Encode {
        input: PathBuf,
        table: PathBuf,
        output: PathBuf,
    },
    Decode {
        input: PathBuf,
        table: PathBuf,
        output: Option<PathBuf>,
    },
}

/// Complete configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub operation: Operation,

    /// Whether to print the codec summary
    pub print_stats: bool,

    /// Maximum tracing level
    pub log_level: Level,
}

/// Why the command line could not be turned into a `Config`.
#[derive(Debug, Error)]
pub enum ArgError {
    #[error("insufficient arguments")]
    Insufficient(#[source] clap::Error),

    #[error("unrecognized command")]
    Unrecognized(#[source] clap::Error),

    #[error("invalid arguments")]
    Invalid(#[source] clap::Error),

    /// `--help` or `--version`; not a failure
    #[error("help requested")]
    Help(#[source] clap::Error),
}

impl ArgError {
    fn classify(err: clap::Error) -> Self {
        match err.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ArgError::Insufficient(err),
            ErrorKind::InvalidSubcommand => ArgError::Unrecognized(err),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ArgError::Help(err),
            _ => ArgError::Invalid(err),
        }
    }

    /// The underlying parser error, for rendering usage.
    pub fn clap_error(&self) -> &clap::Error {
        match self {
            ArgError::Insufficient(e)
            | ArgError::Unrecognized(e)
            | ArgError::Invalid(e)
            | ArgError::Help(e) => e,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments (program name first).
    pub fn from_args<I, T>(args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(ArgError::classify)?;

        let operation = match cli.command {
            Command::CreateTable {
                input,
                table,
                baseline,
            } => Operation::CreateTable {
                input,
                table,
                baseline: baseline
                    .as_deref()
                    .map_or(Baseline::Default, Baseline::from_alphabet),
            },
            Command::GetTable { table } => Operation::GetTable { table },
            Command::Encode {
                input,
                table,
                output,
            } => Operation::Encode {
                output: output.unwrap_or_else(|| default_output_path(&input)),
                input,
                table,
            },
            Command::Decode {
                input,
                table,
                output,
            } => Operation::Decode {
                input,
                table,
                output,
            },
        };

        let log_level = if cli.verbose {
            Level::DEBUG
        } else if cli.quiet {
            Level::WARN
        } else {
            Level::INFO
        };

        Ok(Config {
            operation,
            print_stats: cli.stats,
            log_level,
        })
    }
}
