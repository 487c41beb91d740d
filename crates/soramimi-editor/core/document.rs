//! The synchronized lyrics document: one song, two text buffers, one
//! decoration cache, kept consistent through incremental reconciliation.
//!
//! [`LyricsDocument`] owns the structured [`Song`] plus a raw buffer
//! (timecodes embedded) and a rendered buffer (timecodes stripped), both
//! rope-backed. Every mutation produces a [`LineRangeChanged`]
//! notification from the song; [`LyricsDocument::apply_change`] turns it
//! into minimal edits of both buffers and the per-line decoration cache,
//! preserving offsets outside the affected range.
//!
//! Which buffer is authoritative depends on the edit:
//!
//! - **Structured edit** (retiming, splitting, line replacement): the song
//!   mutates first; both buffers follow.
//! - **Raw edit** (typing in the raw view): the raw buffer mutates first
//!   and leads; the song re-parses only the affected line range and the
//!   rendered buffer follows. While this runs, `raw_updates_disabled`
//!   suppresses the reconciler's raw push so the buffer that originated
//!   the change is not rewritten -- the suppression flags are part of the
//!   state machine, not incidental guards.

use crate::core::decorations::LineDecorations;
use crate::core::errors::{EditorError, Result};
use crate::core::position::SyllablePosition;
use ropey::Rope;
use soramimi_core::{Centiseconds, Line, LineRangeChanged, Song, SongPosition};

/// A lyrics document with synchronized structured and textual views.
#[derive(Debug, Clone)]
pub struct LyricsDocument {
    song: Song,
    raw: Rope,
    rendered: Rope,
    lines: Vec<LineDecorations>,
    /// Suppresses the reconciler's raw-buffer push while the raw buffer
    /// itself is the source of the change.
    raw_updates_disabled: bool,
    /// Suppresses the reconciler's rendered-buffer push; held only while
    /// buffers are (re)loaded wholesale.
    rendered_updates_disabled: bool,
    current_ms: i64,
}

impl Default for LyricsDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl LyricsDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::from_song(Song::default())
    }

    /// Wrap an existing song.
    #[must_use]
    pub fn from_song(song: Song) -> Self {
        let mut document = Self {
            song,
            raw: Rope::new(),
            rendered: Rope::new(),
            lines: Vec::new(),
            raw_updates_disabled: false,
            rendered_updates_disabled: false,
            current_ms: 0,
        };
        document.reload();
        document
    }

    /// Parse a document from raw text.
    #[must_use]
    pub fn from_raw(text: &str) -> Self {
        Self::from_song(Song::from_raw(text))
    }

    /// Parse a document from bytes.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_song(Song::from_bytes(data))
    }

    /// The structured song.
    #[must_use]
    pub const fn song(&self) -> &Song {
        &self.song
    }

    /// The raw buffer's text.
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.raw.to_string()
    }

    /// The rendered buffer's text.
    #[must_use]
    pub fn rendered_text(&self) -> String {
        self.rendered.to_string()
    }

    /// Per-line decoration cache, one entry per line.
    #[must_use]
    pub fn line_decorations(&self) -> &[LineDecorations] {
        &self.lines
    }

    /// The last playback clock value given to [`Self::update`], in
    /// milliseconds.
    #[must_use]
    pub const fn current_time_ms(&self) -> i64 {
        self.current_ms
    }

    /// Rebuild both buffers and the decoration cache from the song.
    ///
    /// Both suppression flags are held for the duration: a wholesale load
    /// authors the buffers directly, so no reconciliation may touch them
    /// until the new decoration cache is in place.
    pub fn reload(&mut self) {
        self.raw_updates_disabled = true;
        self.rendered_updates_disabled = true;

        self.raw = Rope::from_str(&self.song.raw());
        self.rendered = Rope::from_str(&self.song.text());

        self.lines.clear();
        let mut position = 0;
        for line in self.song.lines() {
            let decorations = LineDecorations::new(line, position, self.current_ms);
            position += line.text_char_len() + 1;
            self.lines.push(decorations);
        }

        self.raw_updates_disabled = false;
        self.rendered_updates_disabled = false;
    }

    /// Advance every line's timing state to a new playback clock value.
    ///
    /// Clock values arrive from the playback collaborator in arbitrary
    /// main-thread callbacks; nothing here assumes monotonic delivery.
    pub fn update(&mut self, current_ms: i64) {
        for decorations in &mut self.lines {
            decorations.update(current_ms);
        }
        self.current_ms = current_ms;
    }

    /// Index of the line containing the rendered `offset`: the last line
    /// whose start offset is at most the query. Zero for an empty
    /// document.
    #[must_use]
    pub fn line_at_offset(&self, offset: usize) -> usize {
        self.lines
            .partition_point(|line| line.position() <= offset)
            .saturating_sub(1)
    }

    /// The syllable boundary at or after the rendered `offset`.
    ///
    /// Offsets past a line's last syllable resolve to the first syllable
    /// of the next line that has one; lines without syllables are
    /// transparent. The result can be the one-past-last boundary of the
    /// final non-empty line. `None` only for an empty document.
    #[must_use]
    pub fn syllable_at_offset(&self, offset: usize) -> Option<SyllablePosition> {
        let lines = self.song.lines();
        if lines.is_empty() {
            return None;
        }

        let mut line = self.line_at_offset(offset);
        let mut syllable = self.lines[line].syllable_at_offset(offset);

        while line + 1 < lines.len() && lines[line].syllable_count() <= syllable {
            line += 1;
            syllable = 0;
        }

        Some(SyllablePosition::new(line, syllable))
    }

    /// Rendered offset of a syllable boundary; the one-past-last index
    /// maps to the line's end offset. `None` for an out-of-range line.
    #[must_use]
    pub fn offset_of_syllable(&self, position: SyllablePosition) -> Option<usize> {
        self.lines
            .get(position.line)
            .map(|line| line.offset_of_syllable(position.syllable))
    }

    /// Convert a raw buffer offset to a structured position.
    ///
    /// # Errors
    /// Fails with `NotSupported` when the song's format does not declare
    /// position conversion.
    pub fn position_from_raw(&self, offset: usize) -> Result<SongPosition> {
        Ok(self.song.position_from_raw(offset)?)
    }

    /// Convert a structured position to a raw buffer offset.
    ///
    /// # Errors
    /// Fails with `NotSupported` when the song's format does not declare
    /// position conversion, or with an index error for a coordinate
    /// outside the song.
    pub fn position_to_raw(&self, position: SongPosition) -> Result<usize> {
        Ok(self.song.position_to_raw(position)?)
    }

    /// Map a rendered-buffer offset to a raw-buffer offset, approximately:
    /// the char offset within the line carries over, clamped to the line's
    /// raw length. Used to keep the cursor near its text when switching
    /// from the rendered view to the raw view.
    ///
    /// # Errors
    /// Fails with `NotSupported` when the song's format does not declare
    /// position conversion.
    pub fn rendered_offset_to_raw(&self, offset: usize) -> Result<usize> {
        if self.song.is_empty() {
            self.song.position_from_raw(0)?;
            return Ok(0);
        }
        let line = self.line_at_offset(offset);
        let within = offset.saturating_sub(self.lines[line].position());
        let clamped = within.min(self.song.lines()[line].raw_char_len());
        Ok(self.song.position_to_raw(SongPosition {
            line,
            position_in_line: clamped,
        })?)
    }

    /// Map a raw-buffer offset to a rendered-buffer offset, approximately;
    /// the mirror of [`Self::rendered_offset_to_raw`]. Offsets past the
    /// song map to the end of the rendered buffer.
    ///
    /// # Errors
    /// Fails with `NotSupported` when the song's format does not declare
    /// position conversion.
    pub fn raw_offset_to_rendered(&self, offset: usize) -> Result<usize> {
        let position = self.song.position_from_raw(offset)?;
        let Some(decorations) = self.lines.get(position.line) else {
            return Ok(self.rendered.len_chars());
        };
        let line_len = self.song.lines()[position.line].text_char_len();
        Ok(decorations.position() + position.position_in_line.min(line_len))
    }

    /// Apply a raw-text edit: at char `position`, remove `chars_removed`
    /// chars and insert `inserted` (terminators normalized to `\n`).
    ///
    /// The raw buffer leads: the song re-parses only the affected line
    /// range, and the reconciler pushes the result into the rendered
    /// buffer while the raw push stays suppressed.
    ///
    /// # Errors
    /// Fails with [`EditorError::InvalidRange`] when the edited range lies
    /// past the raw buffer.
    pub fn edit_raw(
        &mut self,
        position: usize,
        chars_removed: usize,
        inserted: &str,
    ) -> Result<LineRangeChanged> {
        let length = self.raw.len_chars();
        if position + chars_removed > length {
            return Err(EditorError::InvalidRange {
                start: position,
                end: position + chars_removed,
                length,
            });
        }

        let inserted = normalize_terminators(inserted);

        self.raw.remove(position..position + chars_removed);
        self.raw.insert(position, &inserted);

        self.raw_updates_disabled = true;
        let change = match self.song.update_raw_text(position, chars_removed, &inserted) {
            Ok(change) => change,
            Err(error) => {
                self.raw_updates_disabled = false;
                return Err(error.into());
            }
        };
        self.apply_change(&change);
        self.raw_updates_disabled = false;

        Ok(change)
    }

    /// Atomically replace a range of lines; see [`Song::replace_lines`].
    ///
    /// # Errors
    /// Fails when the range does not lie within the song.
    pub fn replace_lines(
        &mut self,
        start: usize,
        removed: usize,
        new_lines: Vec<Line>,
    ) -> Result<LineRangeChanged> {
        let change = self.song.replace_lines(start, removed, new_lines)?;
        self.apply_change(&change);
        Ok(change)
    }

    /// Append a line.
    pub fn add_line(&mut self, line: Line) -> LineRangeChanged {
        let change = self.song.add_line(line);
        self.apply_change(&change);
        change
    }

    /// Remove every line.
    pub fn remove_all_lines(&mut self) -> LineRangeChanged {
        let change = self.song.remove_all_lines();
        self.apply_change(&change);
        change
    }

    /// Retime one syllable's start.
    ///
    /// # Errors
    /// Fails for a bad line or syllable index.
    pub fn set_syllable_start(
        &mut self,
        line: usize,
        syllable: usize,
        time: Centiseconds,
    ) -> Result<LineRangeChanged> {
        let change = self.song.set_syllable_start(line, syllable, time)?;
        self.apply_change(&change);
        Ok(change)
    }

    /// Retime one syllable's end.
    ///
    /// # Errors
    /// Fails for a bad line or syllable index.
    pub fn set_syllable_end(
        &mut self,
        line: usize,
        syllable: usize,
        time: Centiseconds,
    ) -> Result<LineRangeChanged> {
        let change = self.song.set_syllable_end(line, syllable, time)?;
        self.apply_change(&change);
        Ok(change)
    }

    /// Replace one syllable's text.
    ///
    /// # Errors
    /// Fails for a bad line or syllable index.
    pub fn set_syllable_text(
        &mut self,
        line: usize,
        syllable: usize,
        text: &str,
    ) -> Result<LineRangeChanged> {
        let change = self.song.set_syllable_text(line, syllable, text)?;
        self.apply_change(&change);
        Ok(change)
    }

    /// Re-segment one line at the given rendered split points; see
    /// [`soramimi_core::Line::set_syllable_split_points`].
    ///
    /// # Errors
    /// Fails for a bad line index or invalid split points.
    pub fn split_syllables(&mut self, line: usize, points: &[usize]) -> Result<LineRangeChanged> {
        let change = self.song.split_syllables(line, points)?;
        self.apply_change(&change);
        Ok(change)
    }

    /// Replace one line's prefix.
    ///
    /// # Errors
    /// Fails for a bad line index.
    pub fn set_line_prefix(&mut self, line: usize, prefix: &str) -> Result<LineRangeChanged> {
        let change = self.song.set_line_prefix(line, prefix)?;
        self.apply_change(&change);
        Ok(change)
    }

    /// Replace one line's suffix.
    ///
    /// # Errors
    /// Fails for a bad line index.
    pub fn set_line_suffix(&mut self, line: usize, suffix: &str) -> Result<LineRangeChanged> {
        let change = self.song.set_line_suffix(line, suffix)?;
        self.apply_change(&change);
        Ok(change)
    }

    /// Reconcile a line-range change into the buffers and the decoration
    /// cache.
    ///
    /// Rendered side: replace the block's rendered span, splice the
    /// decoration cache, rebuild decorations for the inserted lines from
    /// their new start offsets, then shift every following line's cached
    /// offsets by the net length difference in a single pass. Raw side:
    /// the symmetric splice using the change's raw extents. Removing
    /// lines without inserting collapses two lines into one, so the
    /// separator joining the block to its neighbor goes with it: the
    /// previous line's when the block starts past line zero, the
    /// following line's otherwise.
    pub fn apply_change(&mut self, change: &LineRangeChanged) {
        let at = change.line_position;
        let removed = change.lines_removed;
        let added = change.lines_added;
        let old_count = self.lines.len();

        if !self.rendered_updates_disabled {
            let old_len = self.rendered.len_chars();

            let block_start = if old_count == 0 {
                0
            } else if at < old_count {
                self.lines[at].position()
            } else {
                old_len + 1
            };
            let old_next_start = if at + removed < old_count {
                self.lines[at + removed].position()
            } else {
                old_len + 1
            };

            let texts: Vec<String> = self.song.lines()[at..at + added]
                .iter()
                .map(Line::text)
                .collect();
            let block = texts.join("\n");

            if removed > 0 {
                let span_end = if at + removed < old_count {
                    old_next_start - 1
                } else {
                    old_len
                };
                if added > 0 {
                    replace_chars(&mut self.rendered, block_start, span_end, &block);
                } else if at > 0 {
                    self.rendered.remove(block_start - 1..span_end);
                } else if at + removed < old_count {
                    self.rendered.remove(block_start..span_end + 1);
                } else {
                    self.rendered.remove(block_start..span_end);
                }
            } else if added > 0 {
                if old_count == 0 {
                    self.rendered.insert(0, &block);
                } else if at < old_count {
                    let mut text = block.clone();
                    text.push('\n');
                    self.rendered.insert(block_start, &text);
                } else {
                    let mut text = String::from("\n");
                    text.push_str(&block);
                    self.rendered.insert(old_len, &text);
                }
            }

            let mut position = block_start;
            let mut rebuilt = Vec::with_capacity(added);
            for line in &self.song.lines()[at..at + added] {
                let decorations = LineDecorations::new(line, position, self.current_ms);
                position += line.text_char_len() + 1;
                rebuilt.push(decorations);
            }
            self.lines.splice(at..at + removed, rebuilt);

            let diff = position as isize - old_next_start as isize;
            if diff != 0 {
                for decorations in &mut self.lines[at + added..] {
                    decorations.add_to_position(diff);
                }
            }
        }

        if !self.raw_updates_disabled {
            let old_len = self.raw.len_chars();
            let block_start = change.raw_position;

            let raws: Vec<&str> = self.song.lines()[at..at + added]
                .iter()
                .map(Line::raw)
                .collect();
            let block = raws.join("\n");

            if removed > 0 {
                let span_end = block_start + change.raw_removed;
                if added > 0 {
                    replace_chars(&mut self.raw, block_start, span_end, &block);
                } else if block_start > 0 {
                    self.raw.remove(block_start - 1..span_end);
                } else if span_end < old_len {
                    self.raw.remove(block_start..span_end + 1);
                } else {
                    self.raw.remove(block_start..span_end);
                }
            } else if added > 0 {
                if old_count == 0 {
                    self.raw.insert(0, &block);
                } else if at < old_count {
                    let mut text = block.clone();
                    text.push('\n');
                    self.raw.insert(block_start, &text);
                } else {
                    let mut text = String::from("\n");
                    text.push_str(&block);
                    self.raw.insert(old_len, &text);
                }
            }
        }
    }
}

fn replace_chars(rope: &mut Rope, start: usize, end: usize, text: &str) {
    rope.remove(start..end);
    rope.insert(start, text);
}

fn normalize_terminators(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
