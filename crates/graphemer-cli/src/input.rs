#![forbid(unsafe_code)]

//! Reading and decoding the input into UTF-8 or UTF-16 text.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::config::Encoding;
use crate::error::CliError;

/// Decoded input, kept in its native unit width so span offsets refer to the
/// original encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Utf8(String),
    Utf16(Vec<u16>),
}

impl Text {
    /// Decode raw bytes. UTF-16 input may hold unpaired surrogates.
    pub fn decode(bytes: Vec<u8>, encoding: Encoding) -> Result<Self, CliError> {
        match encoding {
            Encoding::Utf8 => String::from_utf8(bytes).map(Self::Utf8).map_err(|err| {
                CliError::InvalidUtf8 {
                    valid_up_to: err.utf8_error().valid_up_to(),
                }
            }),
            Encoding::Utf16Le => utf16_units(&bytes, u16::from_le_bytes).map(Self::Utf16),
            Encoding::Utf16Be => utf16_units(&bytes, u16::from_be_bytes).map(Self::Utf16),
        }
    }

    /// Length in code units.
    #[must_use]
    pub fn unit_len(&self) -> usize {
        match self {
            Self::Utf8(text) => text.len(),
            Self::Utf16(units) => units.len(),
        }
    }
}

fn utf16_units(bytes: &[u8], from_bytes: fn([u8; 2]) -> u16) -> Result<Vec<u16>, CliError> {
    if bytes.len() % 2 != 0 {
        return Err(CliError::OddUtf16Length { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| from_bytes([pair[0], pair[1]]))
        .collect())
}

/// Read all of `path`, or stdin when `None`.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}
