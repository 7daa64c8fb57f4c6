#![forbid(unsafe_code)]

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("input is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
    #[error("UTF-16 input has an odd number of bytes ({len})")]
    OddUtf16Length { len: usize },
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}
