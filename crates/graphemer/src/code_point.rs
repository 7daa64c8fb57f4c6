#![forbid(unsafe_code)]

//! Code point decoding over UTF-16 code units and UTF-8 strings.
//!
//! The UTF-16 reader never fails: a high surrogate immediately followed by a
//! low surrogate decodes to one supplementary scalar, and any unmatched half
//! is returned as its raw 16-bit value with a width of one unit. Segmentation
//! treats such a value like any other code point.
//!
//! # Example
//!
//! ```
//! use graphemer::code_point::{decode_utf16_at, decode_utf16_before};
//!
//! let units: Vec<u16> = "a\u{1F600}".encode_utf16().collect();
//! assert_eq!(decode_utf16_at(&units, 0), (0x61, 1));
//! assert_eq!(decode_utf16_at(&units, 1), (0x1F600, 2));
//! assert_eq!(decode_utf16_before(&units, 3), (0x1F600, 2));
//! ```

use std::str::CharIndices;

const HIGH_SURROGATE_FIRST: u16 = 0xD800;
const HIGH_SURROGATE_LAST: u16 = 0xDBFF;
const LOW_SURROGATE_FIRST: u16 = 0xDC00;
const LOW_SURROGATE_LAST: u16 = 0xDFFF;

/// A decoded scalar value and where it sits in the original unit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodePoint {
    /// Scalar value. Lone surrogates keep their raw value.
    pub scalar: u32,
    /// Index of the first code unit.
    pub offset: usize,
    /// Number of code units consumed.
    pub width: usize,
}

impl CodePoint {
    /// Create a code point record.
    #[must_use]
    pub const fn new(scalar: u32, offset: usize, width: usize) -> Self {
        Self {
            scalar,
            offset,
            width,
        }
    }

    /// Index one past the last code unit.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    /// The scalar as a `char`, or `None` for a lone surrogate.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.scalar)
    }
}

#[inline]
const fn is_high_surrogate(unit: u16) -> bool {
    unit >= HIGH_SURROGATE_FIRST && unit <= HIGH_SURROGATE_LAST
}

#[inline]
const fn is_low_surrogate(unit: u16) -> bool {
    unit >= LOW_SURROGATE_FIRST && unit <= LOW_SURROGATE_LAST
}

#[inline]
const fn combine(high: u16, low: u16) -> u32 {
    ((high as u32 - HIGH_SURROGATE_FIRST as u32) << 10)
        + (low as u32 - LOW_SURROGATE_FIRST as u32)
        + 0x10000
}

/// Decode the code point starting at `index`.
///
/// Returns `(scalar, width)` where `width` is 2 for a surrogate pair and 1
/// otherwise.
///
/// # Panics
///
/// Panics if `index >= units.len()`.
#[must_use]
pub fn decode_utf16_at(units: &[u16], index: usize) -> (u32, usize) {
    let unit = units[index];
    if is_high_surrogate(unit)
        && let Some(&low) = units.get(index + 1)
        && is_low_surrogate(low)
    {
        return (combine(unit, low), 2);
    }
    (u32::from(unit), 1)
}

/// Decode the code point that ends immediately before `index`.
///
/// This is the mirror of [`decode_utf16_at`]: a low surrogate at
/// `index - 1` preceded by a high surrogate decodes as the pair.
///
/// # Panics
///
/// Panics if `index == 0` or `index > units.len()`.
#[must_use]
pub fn decode_utf16_before(units: &[u16], index: usize) -> (u32, usize) {
    let unit = units[index - 1];
    if is_low_surrogate(unit)
        && index >= 2
        && is_high_surrogate(units[index - 2])
    {
        return (combine(units[index - 2], unit), 2);
    }
    (u32::from(unit), 1)
}

/// Whether `index` holds the low half of a surrogate pair that starts at
/// `index - 1`. Such an index is never a code point boundary.
#[must_use]
pub fn is_low_half_of_pair(units: &[u16], index: usize) -> bool {
    match (index.checked_sub(1).and_then(|i| units.get(i)), units.get(index)) {
        (Some(&high), Some(&low)) => is_high_surrogate(high) && is_low_surrogate(low),
        _ => false,
    }
}

/// Scalar value at `index`, looking backward when `index` lands on the low
/// half of a pair.
///
/// # Panics
///
/// Panics if `index >= units.len()`.
#[must_use]
pub fn code_point_at(units: &[u16], index: usize) -> u32 {
    if is_low_half_of_pair(units, index) {
        decode_utf16_before(units, index + 1).0
    } else {
        decode_utf16_at(units, index).0
    }
}

/// Forward iterator over the code points of a UTF-16 unit slice.
#[derive(Debug, Clone)]
pub struct Utf16CodePoints<'a> {
    units: &'a [u16],
    pos: usize,
}

impl<'a> Utf16CodePoints<'a> {
    /// Start decoding at the first unit.
    #[must_use]
    pub const fn new(units: &'a [u16]) -> Self {
        Self { units, pos: 0 }
    }
}

impl Iterator for Utf16CodePoints<'_> {
    type Item = CodePoint;

    fn next(&mut self) -> Option<CodePoint> {
        if self.pos >= self.units.len() {
            return None;
        }
        let (scalar, width) = decode_utf16_at(self.units, self.pos);
        let cp = CodePoint::new(scalar, self.pos, width);
        self.pos += width;
        Some(cp)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len().saturating_sub(self.pos);
        (remaining.div_ceil(2), Some(remaining))
    }
}

/// Forward iterator over the code points of a `str`, with byte offsets.
#[derive(Debug, Clone)]
pub struct Utf8CodePoints<'a> {
    inner: CharIndices<'a>,
}

impl<'a> Utf8CodePoints<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.char_indices(),
        }
    }
}

impl Iterator for Utf8CodePoints<'_> {
    type Item = CodePoint;

    #[inline]
    fn next(&mut self) -> Option<CodePoint> {
        self.inner
            .next()
            .map(|(offset, c)| CodePoint::new(u32::from(c), offset, c.len_utf8()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
