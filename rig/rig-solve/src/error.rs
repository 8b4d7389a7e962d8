//! Error types for orientation solving.

use thiserror::Error;

/// Errors that can occur during a solve call.
///
/// Shape errors are per-call rejections: the solver keeps no state, so a
/// caller may retry with corrected input. Degenerate geometry (zero-length
/// bones, antiparallel directions) is never an error; it is resolved by the
/// documented fallback rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The supplied frame does not match the skeleton's link count.
    #[error("position count mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// The skeleton's link count.
        expected: usize,
        /// The supplied position count.
        actual: usize,
    },

    /// A frame inside an animation does not match the skeleton's link count.
    #[error("frame {frame}: position count mismatch: expected {expected}, got {actual}")]
    FrameShapeMismatch {
        /// Index of the offending frame.
        frame: usize,
        /// The skeleton's link count.
        expected: usize,
        /// The supplied position count.
        actual: usize,
    },
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolveError>;
