//! Karaoke timing commands: stamping syllable times from the playback
//! clock and re-segmenting lines into syllables.

use super::{CommandResult, EditorCommand};
use crate::core::document::LyricsDocument;
use crate::core::errors::{EditorError, Result};
use crate::core::position::SyllablePosition;
use soramimi_core::Centiseconds;

fn syllable_times(
    document: &LyricsDocument,
    position: SyllablePosition,
) -> Option<(Centiseconds, Centiseconds)> {
    let syllable = document
        .song()
        .line(position.line)?
        .syllable(position.syllable)?;
    Some((syllable.start(), syllable.end()))
}

/// Stamp a syllable's start time, the way timing mode marks a syllable as
/// beginning "now".
///
/// When the previous syllable's end abuts the stamped syllable's old
/// start, the previous end moves along, keeping the two contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSyllableStartCommand {
    /// The syllable to stamp.
    pub position: SyllablePosition,
    /// The new start time.
    pub time: Centiseconds,
}

impl SetSyllableStartCommand {
    /// Create a new set-start command.
    #[must_use]
    pub const fn new(position: SyllablePosition, time: Centiseconds) -> Self {
        Self { position, time }
    }
}

impl EditorCommand for SetSyllableStartCommand {
    fn execute(&self, document: &mut LyricsDocument) -> Result<CommandResult> {
        let (start, _end) = syllable_times(document, self.position)
            .ok_or_else(|| EditorError::command_failed("no syllable at position"))?;

        let extend = document.previous_syllable(self.position).filter(|previous| {
            syllable_times(document, *previous)
                .is_some_and(|(_previous_start, previous_end)| previous_end == start)
        });

        if let Some(previous) = extend {
            document.set_syllable_end(previous.line, previous.syllable, self.time)?;
        }
        let change =
            document.set_syllable_start(self.position.line, self.position.syllable, self.time)?;

        Ok(CommandResult::success_with_change(change))
    }

    fn description(&self) -> &str {
        "Set syllable start"
    }
}

/// Stamp a syllable's end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSyllableEndCommand {
    /// The syllable to stamp.
    pub position: SyllablePosition,
    /// The new end time.
    pub time: Centiseconds,
}

impl SetSyllableEndCommand {
    /// Create a new set-end command.
    #[must_use]
    pub const fn new(position: SyllablePosition, time: Centiseconds) -> Self {
        Self { position, time }
    }
}

impl EditorCommand for SetSyllableEndCommand {
    fn execute(&self, document: &mut LyricsDocument) -> Result<CommandResult> {
        syllable_times(document, self.position)
            .ok_or_else(|| EditorError::command_failed("no syllable at position"))?;

        let change =
            document.set_syllable_end(self.position.line, self.position.syllable, self.time)?;
        Ok(CommandResult::success_with_change(change))
    }

    fn description(&self) -> &str {
        "Set syllable end"
    }
}

/// Re-segment a line's rendered text into syllables at the given split
/// points; the new syllables carry placeholder times until stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSyllablesCommand {
    /// The line to re-segment.
    pub line: usize,
    /// Rendered-text split points; strictly ascending and unique.
    pub points: Vec<usize>,
}

impl SplitSyllablesCommand {
    /// Create a new split command.
    #[must_use]
    pub const fn new(line: usize, points: Vec<usize>) -> Self {
        Self { line, points }
    }
}

impl EditorCommand for SplitSyllablesCommand {
    fn execute(&self, document: &mut LyricsDocument) -> Result<CommandResult> {
        let change = document.split_syllables(self.line, &self.points)?;
        Ok(CommandResult::success_with_change(change))
    }

    fn description(&self) -> &str {
        "Split syllables"
    }
}
