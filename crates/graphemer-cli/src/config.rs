#![forbid(unsafe_code)]

//! Command-line arguments and the resolved run configuration.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "GRAPHEMER_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "graphemer",
    version,
    about = "Split text into extended grapheme clusters (UAX #29)"
)]
pub struct Cli {
    /// File to read; stdin when omitted
    pub file: Option<PathBuf>,

    /// Input encoding
    #[arg(
        short,
        long,
        value_enum,
        env = "GRAPHEMER_ENCODING",
        default_value = "utf8"
    )]
    pub encoding: Encoding,

    /// Output format
    #[arg(short, long, value_enum, env = "GRAPHEMER_FORMAT", default_value = "plain")]
    pub format: Format,

    /// Separator printed between clusters in plain output
    #[arg(short, long, default_value = "|")]
    pub separator: String,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    #[value(name = "utf8")]
    Utf8,
    #[value(name = "utf16le")]
    Utf16Le,
    #[value(name = "utf16be")]
    Utf16Be,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Clusters joined by the separator
    Plain,
    /// One `start..end` range and escaped cluster per line
    Spans,
    /// JSON array of `{start, end, text}` records
    Json,
    /// Number of clusters
    Count,
}

/// Everything `run` needs, with env and flag precedence already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub encoding: Encoding,
    pub format: Format,
    pub separator: String,
    pub log_directive: String,
}

impl Config {
    /// Merge parsed arguments with the `GRAPHEMER_LOG` value, which wins over
    /// `-v` when present and non-empty.
    #[must_use]
    pub fn resolve(cli: Cli, log_env: Option<String>) -> Self {
        let log_directive = log_env
            .filter(|directive| !directive.trim().is_empty())
            .unwrap_or_else(|| verbosity_directive(cli.verbose).to_owned());
        Self {
            file: cli.file,
            encoding: cli.encoding,
            format: cli.format,
            separator: cli.separator,
            log_directive,
        }
    }
}

fn verbosity_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
