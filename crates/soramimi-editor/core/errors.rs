//! Error types for the soramimi-editor crate.
//!
//! Wraps `CoreError` from soramimi-core and adds editor-specific cases for
//! buffer ranges and command execution. Same philosophy as core: typed
//! errors via thiserror, detailed context, nothing fatal -- navigation and
//! capability gaps surface as values, not faults.

use core::fmt;
use soramimi_core::CoreError;
use thiserror::Error;

/// Main error type for soramimi-editor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// Errors from soramimi-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Buffer position past the end of the text.
    #[error("position {position} out of bounds (buffer length: {length})")]
    PositionOutOfBounds {
        /// The offending char offset.
        position: usize,
        /// Buffer length in chars.
        length: usize,
    },

    /// Invalid buffer range.
    #[error("invalid range: start {start}, end {end} (buffer length: {length})")]
    InvalidRange {
        /// Range start, in chars.
        start: usize,
        /// Range end, in chars.
        end: usize,
        /// Buffer length in chars.
        length: usize,
    },

    /// Command execution failed.
    #[error("command execution failed: {message}")]
    CommandFailed {
        /// What went wrong.
        message: String,
    },
}

impl EditorError {
    /// Create a new command-failed error.
    pub fn command_failed<T: fmt::Display>(message: T) -> Self {
        Self::CommandFailed {
            message: message.to_string(),
        }
    }

    /// Check if this is a position-related error.
    #[must_use]
    pub const fn is_position_error(&self) -> bool {
        matches!(
            self,
            Self::PositionOutOfBounds { .. }
                | Self::InvalidRange { .. }
                | Self::Core(CoreError::PositionOutOfBounds { .. })
        )
    }

    /// Get the underlying core error if this wraps one.
    #[must_use]
    pub const fn as_core_error(&self) -> Option<&CoreError> {
        match self {
            Self::Core(core_error) => Some(core_error),
            _ => None,
        }
    }
}

/// Result type alias for editor operations.
pub type Result<T> = core::result::Result<T, EditorError>;
