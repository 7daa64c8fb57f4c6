#![forbid(unsafe_code)]

//! Forward scanning of grapheme cluster spans.
//!
//! [`ClusterIterator`] pulls code points from any source, classifies them and
//! asks the rule engine whether each one joins the open cluster. Spans are
//! emitted lazily, in order, and together they tile the input exactly.
//!
//! When the engine places a boundary before a regional indicator that is
//! already inside the open cluster, every code point after that boundary is
//! pushed back onto a replay queue and re-evaluated as part of the next
//! cluster, so nothing is skipped or emitted twice.

use std::collections::VecDeque;
use std::ops::Range;

use smallvec::SmallVec;

use crate::break_class::{Classify, Properties, UnicodeClassifier};
use crate::code_point::CodePoint;
use crate::rules::{BreakDecision, Window, should_break};

/// Clusters with more code points than this are reported once through
/// `tracing::debug!`.
pub const LONG_CLUSTER_THRESHOLD: usize = 64;

/// Half-open `[start, end)` range of code units forming one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterSpan {
    pub start: usize,
    pub end: usize,
}

impl ClusterSpan {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of code units covered.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<ClusterSpan> for Range<usize> {
    fn from(span: ClusterSpan) -> Self {
        span.range()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Classified {
    offset: usize,
    end: usize,
    props: Properties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Done,
}

/// Lazy iterator over the cluster spans of a code point sequence.
///
/// Offsets in the emitted spans are whatever units the source reports: bytes
/// for [`Utf8CodePoints`](crate::code_point::Utf8CodePoints), 16-bit units
/// for [`Utf16CodePoints`](crate::code_point::Utf16CodePoints).
///
/// ```
/// use graphemer::cluster::{ClusterIterator, ClusterSpan};
/// use graphemer::code_point::Utf8CodePoints;
///
/// let spans: Vec<ClusterSpan> = ClusterIterator::new(Utf8CodePoints::new("e\u{301}x")).collect();
/// assert_eq!(spans, vec![ClusterSpan::new(0, 3), ClusterSpan::new(3, 4)]);
/// ```
#[derive(Debug, Clone)]
pub struct ClusterIterator<I, C = UnicodeClassifier> {
    source: I,
    classifier: C,
    replay: VecDeque<Classified>,
    window: Option<Window>,
    /// Code points of the open cluster, `members[0]` being its start.
    members: SmallVec<[Classified; 8]>,
    reported_long: bool,
    state: State,
}

impl<I> ClusterIterator<I, UnicodeClassifier>
where
    I: Iterator<Item = CodePoint>,
{
    /// Segment `source` with the built-in Unicode tables.
    #[must_use]
    pub fn new(source: I) -> Self {
        Self::with_classifier(source, UnicodeClassifier)
    }
}

impl<I, C> ClusterIterator<I, C>
where
    I: Iterator<Item = CodePoint>,
    C: Classify,
{
    /// Segment `source` using a custom classifier.
    #[must_use]
    pub fn with_classifier(source: I, classifier: C) -> Self {
        Self {
            source,
            classifier,
            replay: VecDeque::new(),
            window: None,
            members: SmallVec::new(),
            reported_long: false,
            state: State::Scanning,
        }
    }

    fn pull(&mut self) -> Option<Classified> {
        if let Some(cp) = self.replay.pop_front() {
            return Some(cp);
        }
        let cp = self.source.next()?;
        Some(Classified {
            offset: cp.offset,
            end: cp.end(),
            props: self.classifier.classify(cp.scalar),
        })
    }

    fn open(&mut self, first: Classified) {
        match self.window.as_mut() {
            Some(window) => window.reset(first.props),
            None => self.window = Some(Window::new(first.props)),
        }
        self.members.clear();
        self.members.push(first);
        self.reported_long = false;
    }

    fn admit(&mut self, next: Classified) {
        if let Some(window) = self.window.as_mut() {
            window.push(next.props);
        }
        self.members.push(next);
        if !self.reported_long && self.members.len() > LONG_CLUSTER_THRESHOLD {
            self.reported_long = true;
            tracing::debug!(
                offset = self.members[0].offset,
                threshold = LONG_CLUSTER_THRESHOLD,
                "long grapheme cluster"
            );
        }
    }

    /// Close the open cluster before `members[position]` and queue the rest,
    /// followed by `next`, for re-evaluation.
    fn split_at(&mut self, position: usize, next: Classified) -> ClusterSpan {
        let span = ClusterSpan::new(self.members[0].offset, self.members[position].offset);
        self.replay.push_front(next);
        for member in self.members.drain(position..).rev() {
            self.replay.push_front(member);
        }
        tracing::trace!(
            boundary = span.end,
            replayed = self.replay.len(),
            "regional indicator boundary inside open cluster"
        );
        self.members.clear();
        self.window = None;
        span
    }

    fn close_before(&mut self, next: Classified) -> Option<ClusterSpan> {
        let start = self.members.first()?.offset;
        self.open(next);
        Some(ClusterSpan::new(start, next.offset))
    }

    fn flush(&mut self) -> Option<ClusterSpan> {
        let first = self.members.first()?.offset;
        let last = self.members.last()?.end;
        self.members.clear();
        self.window = None;
        Some(ClusterSpan::new(first, last))
    }
}

impl<I, C> Iterator for ClusterIterator<I, C>
where
    I: Iterator<Item = CodePoint>,
    C: Classify,
{
    type Item = ClusterSpan;

    fn next(&mut self) -> Option<ClusterSpan> {
        loop {
            if self.state == State::Done {
                return None;
            }
            let Some(next) = self.pull() else {
                self.state = State::Done;
                return self.flush();
            };
            let Some(window) = self.window.as_ref() else {
                self.open(next);
                continue;
            };
            let decision = should_break(window, next.props);
            match decision {
                BreakDecision::NoBreak => self.admit(next),
                BreakDecision::BreakBeforeEnd => return self.close_before(next),
                BreakDecision::BreakBeforeLastRegionalIndicator
                | BreakDecision::BreakBeforePenultimateRegionalIndicator => {
                    match window.boundary_position(decision, next.props) {
                        Some(position) if position >= 1 && position < self.members.len() => {
                            return Some(self.split_at(position, next));
                        }
                        _ => return self.close_before(next),
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state == State::Done {
            return (0, Some(0));
        }
        let pending = usize::from(!self.members.is_empty()) + self.replay.len();
        let (_, upper) = self.source.size_hint();
        (
            usize::from(pending > 0),
            upper.and_then(|n| n.checked_add(pending)),
        )
    }
}

impl<I, C> std::iter::FusedIterator for ClusterIterator<I, C>
where
    I: Iterator<Item = CodePoint>,
    C: Classify,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::break_class::BreakClass;
    use crate::code_point::{Utf16CodePoints, Utf8CodePoints};
    use tracing_test::traced_test;

    fn spans(text: &str) -> Vec<(usize, usize)> {
        ClusterIterator::new(Utf8CodePoints::new(text))
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn empty_input_yields_nothing() {
        let mut it = ClusterIterator::new(Utf8CodePoints::new(""));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn single_code_point() {
        assert_eq!(spans("a"), vec![(0, 1)]);
    }

    #[test]
    fn plain_ascii_splits_per_char() {
        assert_eq!(spans("ab"), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn crlf_is_one_cluster() {
        assert_eq!(spans("a\r\nb"), vec![(0, 1), (1, 3), (3, 4)]);
        assert_eq!(spans("\n\r"), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn combining_marks_attach() {
        assert_eq!(spans("e\u{301}\u{302}"), vec![(0, 5)]);
    }

    #[test]
    fn flags_pair_up() {
        let text = "\u{1F1FA}\u{1F1F8}\u{1F1EB}\u{1F1F7}";
        assert_eq!(spans(text), vec![(0, 8), (8, 16)]);
        let odd = "\u{1F1FA}\u{1F1F8}\u{1F1EB}";
        assert_eq!(spans(odd), vec![(0, 8), (8, 12)]);
    }

    #[test]
    fn flag_after_letter() {
        let text = "a\u{1F1FA}\u{1F1F8}";
        assert_eq!(spans(text), vec![(0, 1), (1, 9)]);
    }

    #[test]
    fn zwj_sequence_fuses() {
        // man ZWJ woman ZWJ girl
        let text = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(spans(text).len(), 1);
        // with skin tone modifier before the joiner
        let toned = "\u{1F468}\u{1F3FB}\u{200D}\u{1F469}";
        assert_eq!(spans(toned).len(), 1);
    }

    #[test]
    fn hangul_jamo_compose() {
        assert_eq!(spans("\u{1100}\u{1161}\u{11A8}").len(), 1);
        assert_eq!(spans("\u{AC00}\u{11A8}").len(), 1);
        assert_eq!(spans("\u{AC01}\u{1161}").len(), 2);
    }

    #[test]
    fn utf16_offsets() {
        let units: Vec<u16> = "a\u{1F1FA}\u{1F1F8}b".encode_utf16().collect();
        let got: Vec<ClusterSpan> = ClusterIterator::new(Utf16CodePoints::new(&units)).collect();
        assert_eq!(
            got,
            vec![
                ClusterSpan::new(0, 1),
                ClusterSpan::new(1, 5),
                ClusterSpan::new(5, 6)
            ]
        );
    }

    #[test]
    fn lone_surrogates_stand_alone() {
        let units = [0x61, 0xD800, 0x0301, 0x62];
        let got: Vec<ClusterSpan> = ClusterIterator::new(Utf16CodePoints::new(&units)).collect();
        assert_eq!(
            got,
            vec![
                ClusterSpan::new(0, 1),
                ClusterSpan::new(1, 2),
                ClusterSpan::new(2, 3),
                ClusterSpan::new(3, 4)
            ]
        );
    }

    #[test]
    fn spans_are_never_empty() {
        for span in ClusterIterator::new(Utf8CodePoints::new("a\u{301}\r\n\u{1F1FA}")) {
            assert!(!span.is_empty());
            assert_eq!(span.len(), span.end - span.start);
        }
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut it = ClusterIterator::new(Utf8CodePoints::new("a"));
        assert!(it.next().is_some());
        assert_eq!(it.next(), None);
        assert_eq!(it.size_hint(), (0, Some(0)));
        assert_eq!(it.next(), None);
    }

    struct EverythingExtends;

    impl Classify for EverythingExtends {
        fn classify(&self, _scalar: u32) -> Properties {
            Properties::of(BreakClass::Extend)
        }
    }

    #[test]
    fn custom_classifier_is_used() {
        let got: Vec<ClusterSpan> =
            ClusterIterator::with_classifier(Utf8CodePoints::new("abc"), EverythingExtends).collect();
        assert_eq!(got, vec![ClusterSpan::new(0, 3)]);
    }

    #[test]
    fn span_into_range() {
        let range: Range<usize> = ClusterSpan::new(2, 5).into();
        assert_eq!(range, 2..5);
    }

    #[traced_test]
    #[test]
    fn long_cluster_is_reported_once() {
        let text: String = std::iter::once('a')
            .chain(std::iter::repeat_n('\u{301}', LONG_CLUSTER_THRESHOLD * 2))
            .collect();
        assert_eq!(spans(&text).len(), 1);
        assert!(logs_contain("long grapheme cluster"));
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("long grapheme cluster"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one report, got {n}")),
            }
        });
    }

    #[traced_test]
    #[test]
    fn regional_indicator_split_replays_tail() {
        let other = Properties::of(BreakClass::Other);
        let ri = Properties::of(BreakClass::RegionalIndicator);
        let extend = Properties::of(BreakClass::Extend);
        // Open cluster `x RI RI` at offsets 0, 1, 5 followed by an Extend at 9.
        let mut it = ClusterIterator::new(std::iter::empty::<CodePoint>());
        it.window = Some(Window::from_parts(other, &[ri, ri]));
        it.members = [(0, 1, other), (1, 5, ri), (5, 9, ri)]
            .into_iter()
            .map(|(offset, end, props)| Classified { offset, end, props })
            .collect();
        it.replay.push_back(Classified {
            offset: 9,
            end: 10,
            props: extend,
        });

        assert_eq!(it.next(), Some(ClusterSpan::new(0, 1)));
        assert!(logs_contain("regional indicator boundary inside open cluster"));
        assert_eq!(it.next(), Some(ClusterSpan::new(1, 10)));
        assert_eq!(it.next(), None);
    }
}
