#![forbid(unsafe_code)]

//! Grapheme_Cluster_Break classification.
//!
//! Every scalar value maps to exactly one [`BreakClass`] plus an
//! independent Extended_Pictographic flag. The lookup is total: anything the
//! tables do not mention is [`BreakClass::Other`].
//!
//! ```
//! use graphemer::break_class::{classify, BreakClass};
//!
//! assert_eq!(classify(0x0D).class, BreakClass::Cr);
//! assert_eq!(classify(0x0301).class, BreakClass::Extend);
//! assert!(classify(0x1F600).pictographic);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::tables::{EXTENDED_PICTOGRAPHIC, GRAPHEME_CLUSTER_BREAK};

const HANGUL_SYLLABLE_FIRST: u32 = 0xAC00;
const HANGUL_SYLLABLE_LAST: u32 = 0xD7A3;
const HANGUL_T_COUNT: u32 = 28;

/// Grapheme_Cluster_Break property values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BreakClass {
    #[default]
    Other,
    Cr,
    Lf,
    Control,
    Extend,
    Zwj,
    RegionalIndicator,
    Prepend,
    SpacingMark,
    /// Hangul leading jamo.
    L,
    /// Hangul vowel jamo.
    V,
    /// Hangul trailing jamo.
    T,
    /// Precomposed Hangul syllable without a trailing consonant.
    Lv,
    /// Precomposed Hangul syllable with a trailing consonant.
    Lvt,
}

impl BreakClass {
    /// All values, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Other,
        Self::Cr,
        Self::Lf,
        Self::Control,
        Self::Extend,
        Self::Zwj,
        Self::RegionalIndicator,
        Self::Prepend,
        Self::SpacingMark,
        Self::L,
        Self::V,
        Self::T,
        Self::Lv,
        Self::Lvt,
    ];

    /// Short alias as used in `GraphemeBreakProperty.txt`.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Other => "XX",
            Self::Cr => "CR",
            Self::Lf => "LF",
            Self::Control => "CN",
            Self::Extend => "EX",
            Self::Zwj => "ZWJ",
            Self::RegionalIndicator => "RI",
            Self::Prepend => "PP",
            Self::SpacingMark => "SM",
            Self::L => "L",
            Self::V => "V",
            Self::T => "T",
            Self::Lv => "LV",
            Self::Lvt => "LVT",
        }
    }

    /// CR, LF or Control: the classes that always stand alone (GB4/GB5).
    #[inline]
    #[must_use]
    pub const fn is_control_like(self) -> bool {
        matches!(self, Self::Cr | Self::Lf | Self::Control)
    }
}

impl fmt::Display for BreakClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Break class and pictographic flag of one code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Properties {
    pub class: BreakClass,
    /// Extended_Pictographic.
    pub pictographic: bool,
}

impl Properties {
    #[must_use]
    pub const fn new(class: BreakClass, pictographic: bool) -> Self {
        Self {
            class,
            pictographic,
        }
    }

    /// Properties of a non-pictographic code point of the given class.
    #[must_use]
    pub const fn of(class: BreakClass) -> Self {
        Self::new(class, false)
    }

    /// An Extended_Pictographic code point (break class `Other`).
    #[must_use]
    pub const fn pictographic() -> Self {
        Self::new(BreakClass::Other, true)
    }

    #[inline]
    #[must_use]
    pub fn is(self, class: BreakClass) -> bool {
        self.class == class
    }
}

/// Source of break properties consumed by the cluster iterator.
///
/// [`UnicodeClassifier`] is the default; implement this to segment with
/// tailored tables.
pub trait Classify {
    fn classify(&self, scalar: u32) -> Properties;
}

/// The built-in Unicode tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnicodeClassifier;

impl Classify for UnicodeClassifier {
    #[inline]
    fn classify(&self, scalar: u32) -> Properties {
        classify(scalar)
    }
}

impl<C: Classify + ?Sized> Classify for &C {
    #[inline]
    fn classify(&self, scalar: u32) -> Properties {
        (**self).classify(scalar)
    }
}

/// Classify one scalar value.
#[inline]
#[must_use]
pub fn classify(scalar: u32) -> Properties {
    Properties::new(break_class(scalar), is_extended_pictographic(scalar))
}

/// Grapheme_Cluster_Break of `scalar`.
#[must_use]
pub fn break_class(scalar: u32) -> BreakClass {
    // Printable ASCII is never in the table.
    if (0x20..0x7F).contains(&scalar) {
        return BreakClass::Other;
    }
    if (HANGUL_SYLLABLE_FIRST..=HANGUL_SYLLABLE_LAST).contains(&scalar) {
        return if (scalar - HANGUL_SYLLABLE_FIRST) % HANGUL_T_COUNT == 0 {
            BreakClass::Lv
        } else {
            BreakClass::Lvt
        };
    }
    table_search(scalar, GRAPHEME_CLUSTER_BREAK).unwrap_or(BreakClass::Other)
}

/// Extended_Pictographic of `scalar`.
#[must_use]
pub fn is_extended_pictographic(scalar: u32) -> bool {
    if scalar < 0xA9 {
        return false;
    }
    EXTENDED_PICTOGRAPHIC
        .binary_search_by(|&(first, last)| range_order(scalar, first, last))
        .is_ok()
}

fn table_search(scalar: u32, table: &[(u32, u32, BreakClass)]) -> Option<BreakClass> {
    let pos = table
        .binary_search_by(|&(first, last, _)| range_order(scalar, first, last))
        .ok()?;
    table.get(pos).map(|&(_, _, class)| class)
}

#[inline]
fn range_order(scalar: u32, first: u32, last: u32) -> Ordering {
    if scalar < first {
        Ordering::Greater
    } else if last < scalar {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}
