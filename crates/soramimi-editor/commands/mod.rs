//! Command system for structured edits.
//!
//! Provides a trait-based command layer over [`LyricsDocument`]: every
//! command is atomic, runs synchronously, and reports the line-range
//! change it caused so callers can track modifications.

pub mod karaoke_commands;

pub use karaoke_commands::{SetSyllableEndCommand, SetSyllableStartCommand, SplitSyllablesCommand};

use crate::core::document::LyricsDocument;
use crate::core::errors::Result;
use soramimi_core::{Line, LineRangeChanged};

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command was successfully executed.
    pub success: bool,
    /// Optional message about the operation.
    pub message: Option<String>,
    /// The line-range change the command caused, if any.
    pub change: Option<LineRangeChanged>,
    /// Whether document content was changed.
    pub content_changed: bool,
}

impl CommandResult {
    /// Create a successful command result.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            success: true,
            message: None,
            change: None,
            content_changed: false,
        }
    }

    /// Create a successful result carrying a content change.
    #[must_use]
    pub const fn success_with_change(change: LineRangeChanged) -> Self {
        Self {
            success: true,
            message: None,
            change: Some(change),
            content_changed: true,
        }
    }

    /// Add a message to the result.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Trait for editor commands that can be executed against a document.
pub trait EditorCommand: core::fmt::Debug + Send + Sync {
    /// Execute the command on the given document.
    ///
    /// # Errors
    /// Commands fail with typed errors for bad coordinates or contract
    /// violations; the document is left unchanged on failure.
    fn execute(&self, document: &mut LyricsDocument) -> Result<CommandResult>;

    /// Get a human-readable description of the command.
    fn description(&self) -> &str;

    /// Check if this command modifies document content.
    fn modifies_content(&self) -> bool {
        true
    }
}

/// Insert a line at an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertLineCommand {
    /// Index the new line lands at.
    pub index: usize,
    /// The line to insert.
    pub line: Line,
}

impl InsertLineCommand {
    /// Create a new insert-line command.
    #[must_use]
    pub const fn new(index: usize, line: Line) -> Self {
        Self { index, line }
    }
}

impl EditorCommand for InsertLineCommand {
    fn execute(&self, document: &mut LyricsDocument) -> Result<CommandResult> {
        let change = document.replace_lines(self.index, 0, vec![self.line.clone()])?;
        Ok(CommandResult::success_with_change(change))
    }

    fn description(&self) -> &str {
        "Insert line"
    }
}

/// Remove a contiguous range of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLinesCommand {
    /// First line removed.
    pub start: usize,
    /// Number of lines removed.
    pub count: usize,
}

impl RemoveLinesCommand {
    /// Create a new remove-lines command.
    #[must_use]
    pub const fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }
}

impl EditorCommand for RemoveLinesCommand {
    fn execute(&self, document: &mut LyricsDocument) -> Result<CommandResult> {
        let change = document.replace_lines(self.start, self.count, Vec::new())?;
        Ok(CommandResult::success_with_change(change))
    }

    fn description(&self) -> &str {
        "Remove lines"
    }
}

/// Replace a contiguous range of lines with new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceLinesCommand {
    /// First line replaced.
    pub start: usize,
    /// Number of lines replaced.
    pub count: usize,
    /// Replacement lines; may differ in number from `count`.
    pub lines: Vec<Line>,
}

impl ReplaceLinesCommand {
    /// Create a new replace-lines command.
    #[must_use]
    pub const fn new(start: usize, count: usize, lines: Vec<Line>) -> Self {
        Self {
            start,
            count,
            lines,
        }
    }
}

impl EditorCommand for ReplaceLinesCommand {
    fn execute(&self, document: &mut LyricsDocument) -> Result<CommandResult> {
        let change = document.replace_lines(self.start, self.count, self.lines.clone())?;
        Ok(CommandResult::success_with_change(change))
    }

    fn description(&self) -> &str {
        "Replace lines"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_and_remove_round_trip() {
        let mut document = LyricsDocument::from_raw("a\nb");

        let insert = InsertLineCommand::new(1, Line::from_raw("x"));
        let result = insert.execute(&mut document).unwrap();
        assert!(result.success);
        assert!(result.content_changed);
        assert_eq!(document.rendered_text(), "a\nx\nb");

        let remove = RemoveLinesCommand::new(1, 1);
        remove.execute(&mut document).unwrap();
        assert_eq!(document.rendered_text(), "a\nb");
    }

    #[test]
    fn replace_reports_the_change() {
        let mut document = LyricsDocument::from_raw("a\nb\nc");
        let replace =
            ReplaceLinesCommand::new(0, 2, vec![Line::from_raw("[00:00:00]x[00:01:00]")]);
        let result = replace.execute(&mut document).unwrap();
        let change = result.change.unwrap();
        assert_eq!(change.lines_removed, 2);
        assert_eq!(change.lines_added, 1);
        assert_eq!(document.rendered_text(), "x\nc");
    }

    #[test]
    fn out_of_range_command_leaves_document_untouched() {
        let mut document = LyricsDocument::from_raw("a");
        let remove = RemoveLinesCommand::new(0, 5);
        assert!(remove.execute(&mut document).is_err());
        assert_eq!(document.rendered_text(), "a");
    }
}
