//! Error types for the soramimi-core crate.
//!
//! Parse-time anomalies are absorbed by the tolerant parser and never show
//! up here; the variants below cover capability gaps and caller-contract
//! violations, which are always reported as typed outcomes rather than
//! panics or silent wrong answers.

use core::fmt;
use thiserror::Error;

/// Main error type for soramimi-core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Operation requires a capability the song's format does not declare.
    ///
    /// Callers are expected to check
    /// [`Song::capabilities`](crate::Song::capabilities) before invoking
    /// capability-gated operations.
    #[error("operation not supported by the {format} format: {operation}")]
    NotSupported {
        /// Name of the song's format.
        format: &'static str,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// Line index past the end of the song.
    #[error("line index {index} out of bounds (line count: {count})")]
    LineIndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of lines in the song.
        count: usize,
    },

    /// Syllable index past the end of a line.
    #[error("syllable index {index} out of bounds (syllable count: {count})")]
    SyllableIndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of syllables in the line.
        count: usize,
    },

    /// Text position past the end of the addressed text.
    #[error("position {position} out of bounds (length: {length})")]
    PositionOutOfBounds {
        /// The offending position, in chars.
        position: usize,
        /// Length of the addressed text, in chars.
        length: usize,
    },

    /// Syllable split points violated the caller contract.
    ///
    /// Split points must be strictly ascending, unique, and strictly inside
    /// the rendered text. A violation indicates a caller bug, not
    /// recoverable runtime data.
    #[error("invalid syllable split points: {message}")]
    SplitPointContract {
        /// What the caller got wrong.
        message: String,
    },
}

impl CoreError {
    /// Create a split-point contract error.
    pub fn split_point_contract<T: fmt::Display>(message: T) -> Self {
        Self::SplitPointContract {
            message: message.to_string(),
        }
    }
}

/// Result type alias for soramimi-core operations.
pub type Result<T> = core::result::Result<T, CoreError>;
