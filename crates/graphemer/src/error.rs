#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors from the index-taking helpers in [`crate::segment`].
///
/// Segmentation itself never fails; only a caller-supplied starting index
/// can be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("byte index {index} is not on a char boundary")]
    NotCharBoundary { index: usize },
    #[error("code unit index {index} falls inside a surrogate pair")]
    SplitSurrogatePair { index: usize },
}
