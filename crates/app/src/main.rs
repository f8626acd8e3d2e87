//! huffcode: build Huffman code tables and encode/decode text files with them.
//!
//! ```text
//! huffcode create_table <input-file> [table-file] [baseline-alphabet]
//! huffcode get_table <table-file>
//! huffcode encode <input-file> <table-file> [output-file]
//! huffcode decode <input-file> <table-file> [output-file]
//! ```

mod commands;
mod config;

use std::process::ExitCode;

use huffcode_core::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::{ArgError, Config};

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(ArgError::Help(help)) => help.exit(),
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{}", err.clap_error().render());
            return ExitCode::from(2);
        }
    };

    if let Err(err) = init_tracing(config.log_level) {
        eprintln!("warning: logging disabled: {err}");
    }

    let stdout = std::io::stdout();
    match commands::run(&config, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: Level) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

fn report(err: &anyhow::Error) {
    eprintln!("{}", error_message(err));
}

/// A missing file is reported as such, whatever context was added on top.
fn error_message(err: &anyhow::Error) -> String {
    let not_found = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<Error>())
        .find(|core| core.is_not_found());

    match not_found {
        Some(core) => format!("error: {core}"),
        None => format!("error: {err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::PathBuf;

    fn not_found(path: &str) -> Error {
        Error::NotFound {
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = anyhow::Error::from(not_found("t.json"));
        assert_eq!(error_message(&err), "error: file not found: t.json");
    }

    #[test]
    fn test_not_found_under_context() {
        let err = Err::<(), _>(not_found("in.txt"))
            .context("failed to build table")
            .unwrap_err();
        assert_eq!(error_message(&err), "error: file not found: in.txt");
    }

    #[test]
    fn test_other_errors_show_the_chain() {
        let err = Err::<(), _>(Error::MissingSymbol {
            symbol: 'z',
            position: 2,
        })
        .context("failed to encode in.txt")
        .unwrap_err();
        assert_eq!(
            error_message(&err),
            "error: failed to encode in.txt: symbol 'z' at position 2 is not in the code table"
        );
    }
}
