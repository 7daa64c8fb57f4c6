#![forbid(unsafe_code)]

//! `graphemer` - split text into extended grapheme clusters.
//!
//! Reads a file or stdin, segments it and prints the clusters as plain text,
//! span listings, JSON or a count. Logs go to stderr.

mod config;
mod error;
mod input;
mod output;

use std::env;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Config, LOG_ENV};
use crate::error::CliError;
use crate::input::{Text, read_input};

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

fn run(config: &Config) -> Result<(), CliError> {
    let bytes = read_input(config.file.as_deref())?;
    let text = Text::decode(bytes, config.encoding)?;
    tracing::info!(
        units = text.unit_len(),
        encoding = ?config.encoding,
        "segmenting input"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    output::write_clusters(&mut out, &text, config)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::resolve(cli, env::var(LOG_ENV).ok());
    init_tracing(&config.log_directive);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            eprintln!("graphemer: {err}");
            ExitCode::FAILURE
        }
    }
}
