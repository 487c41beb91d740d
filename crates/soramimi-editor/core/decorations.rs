//! Per-line decoration state: rendered-text offsets and timing states.
//!
//! Decorations are the editor-side cache the change reconciler keeps in
//! sync: for every line, its start offset in the rendered buffer plus the
//! rendered span and timing state of each syllable. The playback clock
//! drives state transitions through [`LineDecorations::update`]; painting
//! is owned by the surrounding application, which reads offsets, states
//! and progress ratios from here.

use soramimi_core::{Centiseconds, Line};

/// Playback classification of a timed span at some clock value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimingState {
    /// The span's start lies in the future.
    NotPlayed,
    /// The clock is inside the span.
    Playing,
    /// The span's end has passed.
    Played,
}

impl TimingState {
    /// Classify a span against the current playback clock, in
    /// milliseconds.
    #[must_use]
    pub const fn classify(current_ms: i64, start: Centiseconds, end: Centiseconds) -> Self {
        if start.as_millis() > current_ms {
            Self::NotPlayed
        } else if end.as_millis() > current_ms {
            Self::Playing
        } else {
            Self::Played
        }
    }
}

/// Classify a line from its derived times; untimed lines never play.
const fn line_state(
    start: Option<Centiseconds>,
    end: Option<Centiseconds>,
    current_ms: i64,
) -> TimingState {
    match (start, end) {
        (Some(start), Some(end)) => TimingState::classify(current_ms, start, end),
        _ => TimingState::NotPlayed,
    }
}

/// Rendered span and timing state of one syllable.
#[derive(Debug, Clone, PartialEq)]
pub struct SyllableDecorations {
    start_offset: usize,
    end_offset: usize,
    start_time: Centiseconds,
    end_time: Centiseconds,
    state: TimingState,
    progress: f32,
    line_was_active: bool,
}

impl SyllableDecorations {
    fn new(
        start_offset: usize,
        end_offset: usize,
        start_time: Centiseconds,
        end_time: Centiseconds,
        state: TimingState,
    ) -> Self {
        Self {
            start_offset,
            end_offset,
            start_time,
            end_time,
            state,
            progress: 0.0,
            line_was_active: false,
        }
    }

    /// Rendered char offset where the syllable's text starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.start_offset
    }

    /// Rendered char offset one past the syllable's text.
    #[must_use]
    pub const fn end_position(&self) -> usize {
        self.end_offset
    }

    /// Current timing state.
    #[must_use]
    pub const fn state(&self) -> TimingState {
        self.state
    }

    /// How far playback has progressed through the syllable, `0.0..=1.0`.
    /// Non-zero only while the owning line is playing.
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Advance to a new clock value.
    pub fn update(&mut self, current_ms: i64, line_is_active: bool) {
        let state = TimingState::classify(current_ms, self.start_time, self.end_time);
        if !line_is_active && !self.line_was_active && state == self.state {
            return;
        }
        self.line_was_active = line_is_active;

        self.progress = if line_is_active && self.start_time.as_millis() <= current_ms {
            let total = (self.end_time - self.start_time).as_millis();
            if total <= 0 {
                1.0
            } else {
                let elapsed = current_ms - self.start_time.as_millis();
                (elapsed as f32 / total as f32).min(1.0)
            }
        } else {
            0.0
        };

        self.state = state;
    }

    /// Shift the syllable's rendered span.
    fn add_to_position(&mut self, diff: isize) {
        self.start_offset = shift(self.start_offset, diff);
        self.end_offset = shift(self.end_offset, diff);
    }
}

/// Rendered offsets and timing state for one line and its syllables.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDecorations {
    start_offset: usize,
    end_offset: usize,
    start_time: Option<Centiseconds>,
    end_time: Option<Centiseconds>,
    state: TimingState,
    syllables: Vec<SyllableDecorations>,
}

impl LineDecorations {
    /// Build decorations for `line` starting at rendered char offset
    /// `position`.
    #[must_use]
    pub fn new(line: &Line, position: usize, current_ms: i64) -> Self {
        let state = line_state(line.start(), line.end(), current_ms);

        let mut index = position + line.prefix().chars().count();
        let mut syllables = Vec::with_capacity(line.syllable_count());
        for syllable in line.syllables() {
            let start_index = index;
            index += syllable.text().chars().count();
            syllables.push(SyllableDecorations::new(
                start_index,
                index,
                syllable.start(),
                syllable.end(),
                state,
            ));
        }

        let mut decorations = Self {
            start_offset: position,
            end_offset: index,
            start_time: line.start(),
            end_time: line.end(),
            state,
            syllables,
        };
        decorations.update(current_ms);
        decorations
    }

    /// Rendered char offset where the line starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.start_offset
    }

    /// Rendered char offset one past the last syllable's text. The line's
    /// suffix lies beyond this.
    #[must_use]
    pub const fn end_position(&self) -> usize {
        self.end_offset
    }

    /// Current timing state of the line.
    #[must_use]
    pub const fn state(&self) -> TimingState {
        self.state
    }

    /// Per-syllable decorations, in order.
    #[must_use]
    pub fn syllables(&self) -> &[SyllableDecorations] {
        &self.syllables
    }

    /// Number of syllables.
    #[must_use]
    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }

    /// Advance the line and its syllables to a new clock value.
    pub fn update(&mut self, current_ms: i64) {
        let state = line_state(self.start_time, self.end_time, current_ms);
        if state == self.state && state != TimingState::Playing {
            return;
        }
        self.state = state;

        for syllable in &mut self.syllables {
            syllable.update(current_ms, state == TimingState::Playing);
        }
    }

    /// Shift the line and every syllable by `diff` rendered chars.
    /// Single pass; reconciliation cost stays proportional to the edit.
    pub fn add_to_position(&mut self, diff: isize) {
        self.start_offset = shift(self.start_offset, diff);
        self.end_offset = shift(self.end_offset, diff);

        for syllable in &mut self.syllables {
            syllable.add_to_position(diff);
        }
    }

    /// Index of the first syllable whose start offset is at least
    /// `offset`; equals the syllable count when every start lies before
    /// the offset.
    #[must_use]
    pub fn syllable_at_offset(&self, offset: usize) -> usize {
        self.syllables
            .partition_point(|syllable| syllable.position() < offset)
    }

    /// Rendered offset of the syllable at `index`; the one-past-last
    /// index maps to the line's end offset.
    #[must_use]
    pub fn offset_of_syllable(&self, index: usize) -> usize {
        self.syllables
            .get(index)
            .map_or(self.end_offset, SyllableDecorations::position)
    }
}

fn shift(offset: usize, diff: isize) -> usize {
    offset.checked_add_signed(diff).unwrap_or(0)
}
