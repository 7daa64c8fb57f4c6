//! Property-based invariant tests for grapheme segmentation.
//!
//! These tests verify structural invariants that must hold for any input:
//!
//! 1. Spans tile the input: contiguous, non-empty, starting at 0 and ending
//!    at the input length.
//! 2. Segmenting the same input twice gives the same spans.
//! 3. UTF-8 and UTF-16 segmentation place boundaries at the same characters.
//! 4. Boundaries agree with `unicode-segmentation` on a Unicode-version-stable
//!    alphabet.
//! 5. `next_break` from a boundary reproduces the cluster found by the
//!    iterator.
//! 6. `truncate_graphemes` returns a prefix with the requested cluster count.
//! 7. Arbitrary UTF-16 (lone surrogates included) never panics and still
//!    tiles.
//! 8. Long regional-indicator runs pair up and segment in linear time.

use graphemer::{
    ClusterSpan, count_graphemes, next_break, next_break_utf16, segment, segment_utf16,
    split_graphemes, truncate_graphemes,
};
use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

/// Characters whose break properties are unchanged between Unicode 14 and
/// the versions `unicode-segmentation` tracks.
const STABLE_ALPHABET: &[char] = &[
    'a',
    'Z',
    ' ',
    '\r',
    '\n',
    '\t',
    '\u{0301}', // combining acute
    '\u{0308}', // combining diaeresis
    '\u{200D}', // ZWJ
    '\u{FE0F}', // VS16
    '\u{0600}', // Arabic number sign (Prepend)
    '\u{1100}', // Hangul L
    '\u{1161}', // Hangul V
    '\u{11A8}', // Hangul T
    '\u{AC00}', // Hangul LV
    '\u{AC01}', // Hangul LVT
    '\u{1F1FA}',
    '\u{1F1F8}',
    '\u{1F468}',
    '\u{1F469}',
    '\u{2764}',
    '\u{1F3FB}', // skin tone modifier (Extend)
];

fn stable_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(STABLE_ALPHABET), 0..32)
        .prop_map(|chars| chars.into_iter().collect())
}

fn any_text() -> impl Strategy<Value = String> {
    prop_oneof![stable_text(), any::<String>()]
}

fn assert_tiles(spans: &[ClusterSpan], len: usize) -> Result<(), TestCaseError> {
    let mut cursor = 0;
    for span in spans {
        prop_assert_eq!(span.start, cursor, "gap or overlap at {}", cursor);
        prop_assert!(span.end > span.start, "empty span at {}", span.start);
        cursor = span.end;
    }
    prop_assert_eq!(cursor, len);
    Ok(())
}

/// Byte boundaries converted to UTF-16 unit boundaries.
fn utf16_boundaries(text: &str, spans: &[ClusterSpan]) -> Vec<usize> {
    spans
        .iter()
        .map(|span| text[..span.end].encode_utf16().count())
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Spans tile the input
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn spans_tile_input(text in any_text()) {
        let spans: Vec<ClusterSpan> = segment(&text).collect();
        assert_tiles(&spans, text.len())?;
        for span in &spans {
            prop_assert!(text.is_char_boundary(span.start));
            prop_assert!(text.is_char_boundary(span.end));
        }
        let joined: String = split_graphemes(&text).concat();
        prop_assert_eq!(joined, text.clone());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segmentation_is_deterministic(text in any_text()) {
        let first: Vec<ClusterSpan> = segment(&text).collect();
        let second: Vec<ClusterSpan> = segment(&text).collect();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(count_graphemes(&text), first.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. UTF-8 / UTF-16 agreement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn utf8_and_utf16_agree(text in any_text()) {
        let spans: Vec<ClusterSpan> = segment(&text).collect();
        let units: Vec<u16> = text.encode_utf16().collect();
        let utf16_ends: Vec<usize> = segment_utf16(&units).map(|span| span.end).collect();
        prop_assert_eq!(utf16_boundaries(&text, &spans), utf16_ends);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Differential agreement with unicode-segmentation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn matches_unicode_segmentation(text in stable_text()) {
        let ours = split_graphemes(&text);
        let theirs: Vec<&str> = text.graphemes(true).collect();
        prop_assert_eq!(ours, theirs, "input: {:?}", text);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. next_break from a boundary
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_break_matches_iterator(text in any_text()) {
        for span in segment(&text) {
            prop_assert_eq!(next_break(&text, span.start), Ok(span.end));
        }
        prop_assert_eq!(next_break(&text, text.len()), Ok(text.len()));
    }

    #[test]
    fn next_break_utf16_matches_iterator(text in stable_text()) {
        let units: Vec<u16> = text.encode_utf16().collect();
        for span in segment_utf16(&units) {
            prop_assert_eq!(next_break_utf16(&units, span.start), Ok(span.end));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Truncation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn truncate_is_prefix_with_bounded_count(text in any_text(), max in 0usize..40) {
        let total = count_graphemes(&text);
        let prefix = truncate_graphemes(&text, max);
        prop_assert!(text.starts_with(prefix));
        prop_assert_eq!(count_graphemes(prefix), total.min(max));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Arbitrary UTF-16
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_utf16_tiles(units in prop::collection::vec(any::<u16>(), 0..64)) {
        let spans: Vec<ClusterSpan> = segment_utf16(&units).collect();
        assert_tiles(&spans, units.len())?;
    }

    #[test]
    fn surrogate_heavy_utf16_tiles(
        units in prop::collection::vec(
            prop_oneof![0xD800u16..=0xDFFF, Just(0x0301u16), Just(0x0061u16)],
            0..48,
        )
    ) {
        let spans: Vec<ClusterSpan> = segment_utf16(&units).collect();
        assert_tiles(&spans, units.len())?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Long regional-indicator runs
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ri_runs_pair_from_the_left(count in 0usize..200) {
        let text: String = std::iter::repeat_n('\u{1F1FA}', count).collect();
        let spans: Vec<ClusterSpan> = segment(&text).collect();
        prop_assert_eq!(spans.len(), count.div_ceil(2));
        for span in &spans[..count / 2] {
            prop_assert_eq!(span.len(), 8);
        }
    }
}

#[test]
fn very_long_ri_run_is_linear() {
    const COUNT: usize = 100_001;
    let text: String = std::iter::once('x')
        .chain(std::iter::repeat_n('\u{1F1E6}', COUNT))
        .chain(std::iter::once('\u{301}'))
        .collect();
    let spans: Vec<ClusterSpan> = segment(&text).collect();
    // `x`, then 50_000 pairs, then the last indicator with its mark.
    assert_eq!(spans.len(), 1 + COUNT.div_ceil(2));
    assert_eq!(spans[0], ClusterSpan::new(0, 1));
    let last = spans[spans.len() - 1];
    assert_eq!(last.len(), 4 + 2);
    assert_eq!(last.end, text.len());
}

#[test]
fn very_long_extend_run_is_one_cluster() {
    let text: String = std::iter::once('e')
        .chain(std::iter::repeat_n('\u{301}', 50_000))
        .collect();
    assert_eq!(count_graphemes(&text), 1);
}
