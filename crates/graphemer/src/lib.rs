#![forbid(unsafe_code)]

//! Extended grapheme cluster segmentation (UAX #29).
//!
//! Splits text into user-perceived characters so that combining marks,
//! Hangul syllable blocks, emoji ZWJ sequences, flags and CRLF are never torn
//! apart. Works over UTF-8 (`&str`, byte offsets) and UTF-16 (`&[u16]`, code
//! unit offsets, lone surrogates tolerated).
//!
//! - [`code_point`] - UTF-16/UTF-8 decoding into offset-tagged code points
//! - [`break_class`] - Grapheme_Cluster_Break and Extended_Pictographic lookup
//! - [`rules`] - the boundary rule cascade
//! - [`cluster`] - the lazy cluster span iterator
//! - [`segment`] - string helpers built on the above
//!
//! # Example
//! ```
//! use graphemer::{count_graphemes, segment_utf16, split_graphemes};
//!
//! let text = "a\r\n\u{1F1FA}\u{1F1F8}e\u{301}";
//! assert_eq!(split_graphemes(text), vec!["a", "\r\n", "\u{1F1FA}\u{1F1F8}", "e\u{301}"]);
//! assert_eq!(count_graphemes(text), 4);
//!
//! let units: Vec<u16> = text.encode_utf16().collect();
//! let ends: Vec<usize> = segment_utf16(&units).map(|span| span.end).collect();
//! assert_eq!(ends, vec![1, 3, 7, 9]);
//! ```

pub mod break_class;
pub mod cluster;
pub mod code_point;
pub mod error;
pub mod rules;
pub mod segment;
mod tables;

pub use break_class::{BreakClass, Classify, Properties, UnicodeClassifier, classify};
pub use cluster::{ClusterIterator, ClusterSpan};
pub use code_point::{CodePoint, Utf8CodePoints, Utf16CodePoints};
pub use error::SegmentError;
pub use rules::{BreakDecision, Rule, Window};
pub use segment::{
    Graphemes, Segments, Utf16Segments, count_graphemes, graphemes, next_break, next_break_utf16,
    segment, segment_utf16, split_graphemes, truncate_graphemes,
};
pub use tables::UNICODE_VERSION;
