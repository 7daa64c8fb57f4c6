#![forbid(unsafe_code)]

//! Rendering cluster spans in the selected output format.

use std::borrow::Cow;
use std::io::Write;

use graphemer::{ClusterSpan, segment, segment_utf16};
use serde::Serialize;

use crate::config::{Config, Format};
use crate::error::CliError;
use crate::input::Text;

#[derive(Debug, Serialize)]
struct ClusterRecord<'a> {
    #[serde(flatten)]
    span: ClusterSpan,
    text: Cow<'a, str>,
}

fn spans(text: &Text) -> Vec<ClusterSpan> {
    match text {
        Text::Utf8(s) => segment(s).collect(),
        Text::Utf16(units) => segment_utf16(units).collect(),
    }
}

/// Cluster contents. Unpaired UTF-16 surrogates become U+FFFD.
fn cluster_text(text: &Text, span: ClusterSpan) -> Cow<'_, str> {
    match text {
        Text::Utf8(s) => Cow::Borrowed(&s[span.range()]),
        Text::Utf16(units) => Cow::Owned(String::from_utf16_lossy(&units[span.range()])),
    }
}

/// Segment `text` and write it to `out` in `config.format`.
pub fn write_clusters<W: Write>(out: &mut W, text: &Text, config: &Config) -> Result<(), CliError> {
    let spans = spans(text);
    tracing::debug!(clusters = spans.len(), format = ?config.format, "writing clusters");
    match config.format {
        Format::Plain => {
            for (i, &span) in spans.iter().enumerate() {
                if i > 0 {
                    out.write_all(config.separator.as_bytes())?;
                }
                out.write_all(cluster_text(text, span).as_bytes())?;
            }
            writeln!(out)?;
        }
        Format::Spans => {
            for &span in &spans {
                writeln!(out, "{}..{}\t{:?}", span.start, span.end, cluster_text(text, span))?;
            }
        }
        Format::Json => {
            let records: Vec<ClusterRecord<'_>> = spans
                .iter()
                .map(|&span| ClusterRecord {
                    span,
                    text: cluster_text(text, span),
                })
                .collect();
            serde_json::to_writer(&mut *out, &records)?;
            writeln!(out)?;
        }
        Format::Count => writeln!(out, "{}", spans.len())?,
    }
    Ok(())
}
