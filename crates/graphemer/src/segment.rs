#![forbid(unsafe_code)]

//! String-level segmentation helpers.
//!
//! ```
//! use graphemer::segment::{count_graphemes, split_graphemes, truncate_graphemes};
//!
//! let text = "he\u{301}llo \u{1F1EF}\u{1F1F5}";
//! assert_eq!(count_graphemes(text), 7);
//! assert_eq!(split_graphemes("e\u{301}a"), vec!["e\u{301}", "a"]);
//! assert_eq!(truncate_graphemes(text, 2), "he\u{301}");
//! ```

use std::iter::FusedIterator;

use crate::cluster::{ClusterIterator, ClusterSpan};
use crate::code_point::{Utf8CodePoints, Utf16CodePoints, is_low_half_of_pair};
use crate::error::SegmentError;

/// Inputs at least this long (in code units) are logged at debug level.
pub const LARGE_INPUT_THRESHOLD: usize = 10_000;

/// Byte spans of the clusters of a `str`.
pub type Segments<'a> = ClusterIterator<Utf8CodePoints<'a>>;

/// Code unit spans of the clusters of a UTF-16 sequence.
pub type Utf16Segments<'a> = ClusterIterator<Utf16CodePoints<'a>>;

fn note_large_input(len: usize) {
    if len >= LARGE_INPUT_THRESHOLD {
        tracing::debug!(len, "segmenting large input");
    }
}

/// Cluster byte spans of `text`.
#[must_use]
pub fn segment(text: &str) -> Segments<'_> {
    note_large_input(text.len());
    ClusterIterator::new(Utf8CodePoints::new(text))
}

/// Cluster spans of UTF-16 code units. Unpaired surrogates form clusters of
/// their own.
#[must_use]
pub fn segment_utf16(units: &[u16]) -> Utf16Segments<'_> {
    note_large_input(units.len());
    ClusterIterator::new(Utf16CodePoints::new(units))
}

/// Iterator over the clusters of a `str` as string slices.
#[derive(Debug, Clone)]
pub struct Graphemes<'a> {
    text: &'a str,
    spans: Segments<'a>,
}

impl<'a> Graphemes<'a> {
    /// The text still to be segmented, starting with the next cluster.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.spans
            .clone()
            .next()
            .map_or("", |span| &self.text[span.start..])
    }
}

impl<'a> Iterator for Graphemes<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        self.spans.next().map(|span| &self.text[span.range()])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.spans.size_hint()
    }
}

impl FusedIterator for Graphemes<'_> {}

/// Clusters of `text` as string slices.
#[must_use]
pub fn graphemes(text: &str) -> Graphemes<'_> {
    Graphemes {
        text,
        spans: segment(text),
    }
}

/// Collect the clusters of `text`.
#[must_use]
pub fn split_graphemes(text: &str) -> Vec<&str> {
    graphemes(text).collect()
}

/// Number of clusters in `text`.
#[must_use]
pub fn count_graphemes(text: &str) -> usize {
    segment(text).count()
}

/// Longest prefix of `text` holding at most `max` clusters.
#[must_use]
pub fn truncate_graphemes(text: &str, max: usize) -> &str {
    match segment(text).nth(max) {
        Some(ClusterSpan { start, .. }) => &text[..start],
        None => text,
    }
}

/// End of the cluster starting at byte `index`.
///
/// `index` is taken as the start of a cluster; an index at or past the end
/// returns `text.len()`.
///
/// # Errors
///
/// [`SegmentError::NotCharBoundary`] if `index` falls inside a UTF-8
/// sequence.
pub fn next_break(text: &str, index: usize) -> Result<usize, SegmentError> {
    if index >= text.len() {
        return Ok(text.len());
    }
    let rest = text
        .get(index..)
        .ok_or(SegmentError::NotCharBoundary { index })?;
    Ok(ClusterIterator::new(Utf8CodePoints::new(rest))
        .next()
        .map_or(text.len(), |span| index + span.end))
}

/// End of the cluster starting at code unit `index`.
///
/// # Errors
///
/// [`SegmentError::SplitSurrogatePair`] if `index` is the low half of a
/// surrogate pair.
pub fn next_break_utf16(units: &[u16], index: usize) -> Result<usize, SegmentError> {
    if index >= units.len() {
        return Ok(units.len());
    }
    if is_low_half_of_pair(units, index) {
        return Err(SegmentError::SplitSurrogatePair { index });
    }
    Ok(ClusterIterator::new(Utf16CodePoints::new(&units[index..]))
        .next()
        .map_or(units.len(), |span| index + span.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    // =========================================================================
    // Splitting
    // =========================================================================

    #[test]
    fn split_mixed_text() {
        let text = "a\r\ne\u{301}\u{1F1FA}\u{1F1F8}\u{1F468}\u{200D}\u{1F469}";
        assert_eq!(
            split_graphemes(text),
            vec![
                "a",
                "\r\n",
                "e\u{301}",
                "\u{1F1FA}\u{1F1F8}",
                "\u{1F468}\u{200D}\u{1F469}"
            ]
        );
    }

    #[test]
    fn split_empty() {
        assert!(split_graphemes("").is_empty());
        assert_eq!(count_graphemes(""), 0);
        assert_eq!(segment_utf16(&[]).count(), 0);
    }

    #[test]
    fn graphemes_concatenate_to_input() {
        let text = "\u{0915}\u{094D}\u{0937}\u{093F} x\u{0308}y";
        let joined: String = graphemes(text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn graphemes_as_str_tracks_progress() {
        let mut it = graphemes("ab\u{301}c");
        assert_eq!(it.as_str(), "ab\u{301}c");
        assert_eq!(it.next(), Some("a"));
        assert_eq!(it.as_str(), "b\u{301}c");
        assert_eq!(it.next(), Some("b\u{301}"));
        assert_eq!(it.next(), Some("c"));
        assert_eq!(it.as_str(), "");
    }

    #[test]
    fn count_flags() {
        assert_eq!(count_graphemes("\u{1F1FA}\u{1F1F8}\u{1F1EB}\u{1F1F7}"), 2);
        assert_eq!(count_graphemes("\u{1F1FA}\u{1F1F8}\u{1F1EB}"), 2);
    }

    // =========================================================================
    // Truncation
    // =========================================================================

    #[test]
    fn truncate_keeps_whole_clusters() {
        let text = "e\u{301}e\u{301}e\u{301}";
        assert_eq!(truncate_graphemes(text, 0), "");
        assert_eq!(truncate_graphemes(text, 1), "e\u{301}");
        assert_eq!(truncate_graphemes(text, 3), text);
        assert_eq!(truncate_graphemes(text, 10), text);
        assert_eq!(truncate_graphemes("", 2), "");
    }

    // =========================================================================
    // next_break
    // =========================================================================

    #[test]
    fn next_break_utf8() {
        let text = "a\r\nb";
        assert_eq!(next_break(text, 0), Ok(1));
        assert_eq!(next_break(text, 1), Ok(3));
        assert_eq!(next_break(text, 3), Ok(4));
        assert_eq!(next_break(text, 4), Ok(4));
        assert_eq!(next_break(text, 99), Ok(4));
    }

    #[test]
    fn next_break_rejects_mid_char() {
        assert_eq!(
            next_break("\u{E9}", 1),
            Err(SegmentError::NotCharBoundary { index: 1 })
        );
    }

    #[test]
    fn next_break_treats_index_as_cluster_start() {
        // Starting on the combining mark makes it a cluster of its own.
        assert_eq!(next_break("e\u{301}x", 1), Ok(3));
    }

    #[test]
    fn next_break_utf16_pairs() {
        let units = utf16("\u{1F1FA}\u{1F1F8}a");
        assert_eq!(next_break_utf16(&units, 0), Ok(4));
        assert_eq!(next_break_utf16(&units, 4), Ok(5));
        assert_eq!(next_break_utf16(&units, 5), Ok(5));
        assert_eq!(
            next_break_utf16(&units, 1),
            Err(SegmentError::SplitSurrogatePair { index: 1 })
        );
    }

    #[test]
    fn next_break_utf16_lone_low_half_is_a_start() {
        let units = [0x61, 0xDC00, 0x62];
        assert_eq!(next_break_utf16(&units, 1), Ok(2));
    }

    #[test]
    fn segment_utf16_matches_utf8_cluster_count() {
        let text = "\u{1100}\u{1161}\u{11A8}\u{1F3F3}\u{FE0F}\u{200D}\u{1F308}!";
        assert_eq!(segment_utf16(&utf16(text)).count(), count_graphemes(text));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SegmentError::NotCharBoundary { index: 3 }.to_string(),
            "byte index 3 is not on a char boundary"
        );
        assert_eq!(
            SegmentError::SplitSurrogatePair { index: 7 }.to_string(),
            "code unit index 7 falls inside a surrogate pair"
        );
    }

    // =========================================================================
    // Logging
    // =========================================================================

    #[traced_test]
    #[test]
    fn large_input_is_logged() {
        let text = "x".repeat(LARGE_INPUT_THRESHOLD);
        assert_eq!(count_graphemes(&text), LARGE_INPUT_THRESHOLD);
        assert!(logs_contain("segmenting large input"));
    }

    #[traced_test]
    #[test]
    fn small_input_is_quiet() {
        let _ = count_graphemes("short");
        assert!(!logs_contain("segmenting large input"));
    }
}
