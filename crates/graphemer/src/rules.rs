#![forbid(unsafe_code)]

//! Grapheme cluster boundary decisions (UAX #29, GB3 through GB999).
//!
//! The engine looks at a [`Window`] holding the currently open cluster
//! (`start` followed by `mid`) and a candidate code point `end`, and decides
//! whether a boundary falls inside that sequence. Rules are kept in an
//! explicit ordered table, [`CASCADE`], and evaluated top-down; the first
//! guard that returns a decision wins.
//!
//! # Rule order
//!
//! | # | Rule | Outcome |
//! |---|------|---------|
//! | 1 | RI lookahead: `start` not RI/Prepend, `all[1..=r]` all RI | before last or penultimate RI |
//! | 2 | GB3 `CR × LF` | no break |
//! | 3 | GB4 `(Control|CR|LF) ÷` | break |
//! | 4 | GB5 `÷ (Control|CR|LF)` | break |
//! | 5 | GB6 `L × (L|V|LV|LVT)` | no break |
//! | 6 | GB7 `(LV|V) × (V|T)` | no break |
//! | 7 | GB8 `(LVT|T) × T` | no break |
//! | 8 | GB9 `× (Extend|ZWJ)` | no break |
//! | 9 | GB9a `× SpacingMark` | no break |
//! | 10 | GB9b `Prepend ×` | no break |
//! | 11 | GB11 `ExtPict Extend* ZWJ × ExtPict` | no break |
//! | 12 | GB12/GB13 regional indicator pairing | by run parity |
//! | 13 | GB999 `÷` | break |
//!
//! # Incremental window statistics
//!
//! Rules 1, 11 and 12 depend on the whole open cluster, not just the last
//! pair. The window keeps running counters (RI count, leading and trailing
//! RI run lengths, the last two RI positions and the
//! pictographic-Extend*-ZWJ state) that are updated on every push, so each
//! decision is O(1) no matter how long a run of regional indicators or
//! combining marks grows.
//!
//! # Example
//!
//! ```
//! use graphemer::break_class::{BreakClass, Properties};
//! use graphemer::rules::{decide, BreakDecision};
//!
//! let cr = Properties::of(BreakClass::Cr);
//! let lf = Properties::of(BreakClass::Lf);
//! assert_eq!(decide(cr, &[], lf), BreakDecision::NoBreak);
//!
//! let a = Properties::of(BreakClass::Other);
//! assert_eq!(decide(a, &[], a), BreakDecision::BreakBeforeEnd);
//! ```

use std::fmt;

use smallvec::SmallVec;

use crate::break_class::{BreakClass, Properties};

/// Outcome of evaluating a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakDecision {
    /// `end` joins the open cluster.
    NoBreak,
    /// A boundary falls immediately before `end`.
    BreakBeforeEnd,
    /// A boundary falls immediately before the last regional indicator in
    /// `start + mid + end`.
    BreakBeforeLastRegionalIndicator,
    /// A boundary falls immediately before the second-to-last regional
    /// indicator in `start + mid + end`.
    BreakBeforePenultimateRegionalIndicator,
}

impl BreakDecision {
    /// Whether the window contains a boundary.
    #[inline]
    #[must_use]
    pub const fn is_break(self) -> bool {
        !matches!(self, Self::NoBreak)
    }
}

/// Identifies the cascade entry that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    RegionalIndicatorLookahead,
    Gb3,
    Gb4,
    Gb5,
    Gb6,
    Gb7,
    Gb8,
    Gb9,
    Gb9a,
    Gb9b,
    Gb11,
    Gb12Gb13,
    Gb999,
}

impl Rule {
    /// Label as written in UAX #29.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RegionalIndicatorLookahead => "RI-lookahead",
            Self::Gb3 => "GB3",
            Self::Gb4 => "GB4",
            Self::Gb5 => "GB5",
            Self::Gb6 => "GB6",
            Self::Gb7 => "GB7",
            Self::Gb8 => "GB8",
            Self::Gb9 => "GB9",
            Self::Gb9a => "GB9a",
            Self::Gb9b => "GB9b",
            Self::Gb11 => "GB11",
            Self::Gb12Gb13 => "GB12/GB13",
            Self::Gb999 => "GB999",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress through `ExtPict Extend* ZWJ` at the tail of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EmojiRun {
    #[default]
    None,
    /// Last element is pictographic or an Extend following one.
    Pictographic,
    /// Last element is a ZWJ completing `ExtPict Extend* ZWJ`.
    PictographicZwj,
}

impl EmojiRun {
    fn advance(self, props: Properties) -> Self {
        if props.pictographic {
            return Self::Pictographic;
        }
        match (self, props.class) {
            (Self::Pictographic, BreakClass::Extend) => Self::Pictographic,
            (Self::Pictographic, BreakClass::Zwj) => Self::PictographicZwj,
            _ => Self::None,
        }
    }
}

/// Counters derived from `start + mid`, maintained on push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WindowStats {
    ri_total: usize,
    /// Consecutive RI elements starting at position 1.
    ri_leading: usize,
    /// Consecutive RI elements ending at the last element.
    ri_trailing: usize,
    last_ri: Option<usize>,
    penultimate_ri: Option<usize>,
    emoji: EmojiRun,
}

impl WindowStats {
    fn observe(&mut self, position: usize, props: Properties) {
        if props.is(BreakClass::RegionalIndicator) {
            self.ri_total += 1;
            self.ri_trailing += 1;
            if position > 0 && self.ri_leading + 1 == position {
                self.ri_leading += 1;
            }
            self.penultimate_ri = self.last_ri;
            self.last_ri = Some(position);
        } else {
            self.ri_trailing = 0;
        }
        self.emoji = self.emoji.advance(props);
    }
}

/// The open cluster seen by the engine: its first code point and every code
/// point admitted after it.
#[derive(Debug, Clone)]
pub struct Window {
    start: Properties,
    mid: SmallVec<[Properties; 8]>,
    stats: WindowStats,
}

impl Window {
    /// Open a cluster at `start`.
    #[must_use]
    pub fn new(start: Properties) -> Self {
        let mut stats = WindowStats::default();
        stats.observe(0, start);
        Self {
            start,
            mid: SmallVec::new(),
            stats,
        }
    }

    /// Build a window from a start and the code points already admitted.
    #[must_use]
    pub fn from_parts(start: Properties, mid: &[Properties]) -> Self {
        let mut window = Self::new(start);
        for &props in mid {
            window.push(props);
        }
        window
    }

    /// Admit a code point into the open cluster.
    pub fn push(&mut self, props: Properties) {
        self.stats.observe(self.len(), props);
        self.mid.push(props);
    }

    /// Discard the open cluster and start a new one at `start`.
    pub fn reset(&mut self, start: Properties) {
        self.start = start;
        self.mid.clear();
        self.stats = WindowStats::default();
        self.stats.observe(0, start);
    }

    #[must_use]
    pub fn start(&self) -> Properties {
        self.start
    }

    #[must_use]
    pub fn mid(&self) -> &[Properties] {
        &self.mid
    }

    /// Number of code points in the open cluster (`1 + mid.len()`).
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.mid.len()
    }

    /// Properties at `position`, where 0 is `start`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<Properties> {
        match position {
            0 => Some(self.start),
            n => self.mid.get(n - 1).copied(),
        }
    }

    /// Last code point of the open cluster.
    #[must_use]
    pub fn previous(&self) -> Properties {
        self.mid.last().copied().unwrap_or(self.start)
    }

    fn mid_has_regional_indicator(&self) -> bool {
        let start_ri = usize::from(self.start.is(BreakClass::RegionalIndicator));
        self.stats.ri_total > start_ri
    }

    /// Where the next cluster begins for a break `decision`, as an index into
    /// `start + mid + end` (so `self.len()` designates `end`).
    ///
    /// Returns `None` for [`BreakDecision::NoBreak`], or when the decision
    /// names a regional indicator the window does not contain.
    #[must_use]
    pub fn boundary_position(&self, decision: BreakDecision, end: Properties) -> Option<usize> {
        let end_ri = end.is(BreakClass::RegionalIndicator);
        match decision {
            BreakDecision::NoBreak => None,
            BreakDecision::BreakBeforeEnd => Some(self.len()),
            BreakDecision::BreakBeforeLastRegionalIndicator => {
                if end_ri {
                    Some(self.len())
                } else {
                    self.stats.last_ri
                }
            }
            BreakDecision::BreakBeforePenultimateRegionalIndicator => {
                if end_ri {
                    self.stats.last_ri
                } else {
                    self.stats.penultimate_ri
                }
            }
        }
    }
}

/// A cascade entry: `Some` when the rule applies.
pub type Guard = fn(&Window, Properties) -> Option<BreakDecision>;

/// The rule cascade, in evaluation order.
pub const CASCADE: [(Rule, Guard); 13] = [
    (Rule::RegionalIndicatorLookahead, regional_indicator_lookahead),
    (Rule::Gb3, gb3),
    (Rule::Gb4, gb4),
    (Rule::Gb5, gb5),
    (Rule::Gb6, gb6),
    (Rule::Gb7, gb7),
    (Rule::Gb8, gb8),
    (Rule::Gb9, gb9),
    (Rule::Gb9a, gb9a),
    (Rule::Gb9b, gb9b),
    (Rule::Gb11, gb11),
    (Rule::Gb12Gb13, gb12_gb13),
    (Rule::Gb999, gb999),
];

/// Decide whether a boundary falls in `window + end`.
#[inline]
#[must_use]
pub fn should_break(window: &Window, end: Properties) -> BreakDecision {
    explain(window, end).1
}

/// Like [`should_break`], also reporting which rule decided.
#[must_use]
pub fn explain(window: &Window, end: Properties) -> (Rule, BreakDecision) {
    CASCADE
        .iter()
        .find_map(|&(rule, guard)| guard(window, end).map(|decision| (rule, decision)))
        .unwrap_or((Rule::Gb999, BreakDecision::BreakBeforeEnd))
}

/// Evaluate an ad hoc window given as `start`, `mid` and `end`.
#[must_use]
pub fn decide(start: Properties, mid: &[Properties], end: Properties) -> BreakDecision {
    should_break(&Window::from_parts(start, mid), end)
}

fn regional_indicator_lookahead(window: &Window, end: Properties) -> Option<BreakDecision> {
    let end_ri = end.is(BreakClass::RegionalIndicator);
    let last = if end_ri {
        window.len()
    } else {
        window.stats.last_ri?
    };
    if last == 0 {
        return None;
    }
    // all[1..last] must be regional indicators.
    let run_reaches = if end_ri {
        window.stats.ri_leading == window.mid.len()
    } else {
        window.stats.ri_leading + 1 >= last
    };
    let anchored = !matches!(
        window.start.class,
        BreakClass::Prepend | BreakClass::RegionalIndicator
    );
    if !(run_reaches && anchored) {
        return None;
    }
    let count = window.stats.ri_total + usize::from(end_ri);
    Some(if count % 2 == 1 {
        BreakDecision::BreakBeforeLastRegionalIndicator
    } else {
        BreakDecision::BreakBeforePenultimateRegionalIndicator
    })
}

fn gb3(window: &Window, end: Properties) -> Option<BreakDecision> {
    (window.previous().is(BreakClass::Cr) && end.is(BreakClass::Lf))
        .then_some(BreakDecision::NoBreak)
}

fn gb4(window: &Window, _end: Properties) -> Option<BreakDecision> {
    window
        .previous()
        .class
        .is_control_like()
        .then_some(BreakDecision::BreakBeforeEnd)
}

fn gb5(_window: &Window, end: Properties) -> Option<BreakDecision> {
    end.class
        .is_control_like()
        .then_some(BreakDecision::BreakBeforeEnd)
}

fn gb6(window: &Window, end: Properties) -> Option<BreakDecision> {
    (window.previous().is(BreakClass::L)
        && matches!(
            end.class,
            BreakClass::L | BreakClass::V | BreakClass::Lv | BreakClass::Lvt
        ))
    .then_some(BreakDecision::NoBreak)
}

fn gb7(window: &Window, end: Properties) -> Option<BreakDecision> {
    (matches!(window.previous().class, BreakClass::Lv | BreakClass::V)
        && matches!(end.class, BreakClass::V | BreakClass::T))
    .then_some(BreakDecision::NoBreak)
}

fn gb8(window: &Window, end: Properties) -> Option<BreakDecision> {
    (matches!(window.previous().class, BreakClass::Lvt | BreakClass::T)
        && end.is(BreakClass::T))
    .then_some(BreakDecision::NoBreak)
}

fn gb9(_window: &Window, end: Properties) -> Option<BreakDecision> {
    matches!(end.class, BreakClass::Extend | BreakClass::Zwj).then_some(BreakDecision::NoBreak)
}

fn gb9a(_window: &Window, end: Properties) -> Option<BreakDecision> {
    end.is(BreakClass::SpacingMark)
        .then_some(BreakDecision::NoBreak)
}

fn gb9b(window: &Window, _end: Properties) -> Option<BreakDecision> {
    window
        .previous()
        .is(BreakClass::Prepend)
        .then_some(BreakDecision::NoBreak)
}

fn gb11(window: &Window, end: Properties) -> Option<BreakDecision> {
    (window.stats.emoji == EmojiRun::PictographicZwj && end.pictographic)
        .then_some(BreakDecision::NoBreak)
}

fn gb12_gb13(window: &Window, end: Properties) -> Option<BreakDecision> {
    if window.previous().is(BreakClass::RegionalIndicator)
        && end.is(BreakClass::RegionalIndicator)
    {
        // An odd trailing run leaves one indicator waiting for its partner.
        return Some(if window.stats.ri_trailing % 2 == 1 {
            BreakDecision::NoBreak
        } else {
            BreakDecision::BreakBeforeEnd
        });
    }
    window
        .mid_has_regional_indicator()
        .then_some(BreakDecision::BreakBeforeEnd)
}

fn gb999(_window: &Window, _end: Properties) -> Option<BreakDecision> {
    Some(BreakDecision::BreakBeforeEnd)
}
