//! Song model: an ordered sequence of lines plus the aggregate raw and
//! rendered text views.
//!
//! Every mutation goes through a range-based line replacement that returns
//! a typed [`LineRangeChanged`] notification; the editing layer feeds that
//! notification to its change reconciler to patch externally held text
//! buffers without a full re-parse.
//!
//! Offsets use the in-memory buffer shape: lines joined by a single `'\n'`
//! separator with no trailing terminator, all positions counted in chars.
//! The on-disk writer emits `\r\n` after every line; the reader accepts
//! either terminator.

use crate::line::Line;
use crate::timecode::Centiseconds;
use crate::utils::encoding::{split_buffer_lines, split_document_lines, strip_bom};
use crate::utils::errors::{CoreError, Result};
use bitflags::bitflags;

/// Line terminator written by [`Song::raw_bytes`].
const WRITE_TERMINATOR: &str = "\r\n";

bitflags! {
    /// Capability set declared by a lyrics format.
    ///
    /// Callers check capabilities before invoking gated operations;
    /// invoking one anyway yields [`CoreError::NotSupported`], never a
    /// silently wrong answer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SongCapabilities: u8 {
        /// Structured edits are meaningful for this format.
        const EDITABLE = 1 << 0;
        /// Raw offsets convert to and from structured positions.
        const POSITION_CONVERSION = 1 << 1;
    }
}

/// The closed set of supported lyrics formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LyricsFormat {
    /// Soramimi/MoonCat timecoded lines.
    SoramimiMoonCat,
}

impl LyricsFormat {
    /// Human-readable format name, used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SoramimiMoonCat => "Soramimi/MoonCat",
        }
    }

    /// Capabilities declared by this format.
    #[must_use]
    pub const fn capabilities(self) -> SongCapabilities {
        match self {
            Self::SoramimiMoonCat => {
                SongCapabilities::EDITABLE.union(SongCapabilities::POSITION_CONVERSION)
            }
        }
    }
}

/// A coordinate in the raw text space of one line: line index plus char
/// offset within that line's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SongPosition {
    /// Line index.
    pub line: usize,
    /// Char offset within the line's raw text.
    pub position_in_line: usize,
}

/// Typed notification describing one range-based line replacement.
///
/// Emitted synchronously by every [`Song`] mutation. The raw extents cover
/// the replaced block's text plus the separators *inside* the block, but
/// not the separator joining the block to the rest of the document; the
/// consumer owns the merge bookkeeping for that outer separator.
///
/// All four text numbers are computed before the mutation, since the
/// removed extent needs the old line lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineRangeChanged {
    /// First affected line index.
    pub line_position: usize,
    /// Number of lines removed at `line_position`.
    pub lines_removed: usize,
    /// Number of lines inserted at `line_position`.
    pub lines_added: usize,
    /// Raw char offset of `line_position` before the mutation.
    pub raw_position: usize,
    /// Raw char extent of the removed block.
    pub raw_removed: usize,
    /// Raw char extent of the inserted block.
    pub raw_added: usize,
}

/// A song: the ordered lines of one lyrics document.
///
/// Owned by the editing session; the song holds no UI state. Lines are
/// owned exclusively by their song and syllables by their line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Song {
    format: LyricsFormat,
    lines: Vec<Line>,
}

impl Default for Song {
    fn default() -> Self {
        Self::new(LyricsFormat::SoramimiMoonCat)
    }
}

impl Song {
    /// Create an empty song of the given format.
    #[must_use]
    pub const fn new(format: LyricsFormat) -> Self {
        Self {
            format,
            lines: Vec::new(),
        }
    }

    /// Parse a song from document text.
    ///
    /// Accepts `\n` and `\r\n` terminators; a trailing terminator does not
    /// produce a phantom empty line, and empty text is an empty song.
    #[must_use]
    pub fn from_raw(text: &str) -> Self {
        Self {
            format: LyricsFormat::SoramimiMoonCat,
            lines: split_document_lines(text)
                .into_iter()
                .map(Line::from_raw)
                .collect(),
        }
    }

    /// Parse a song from bytes.
    ///
    /// Strips a UTF-8 BOM and decodes lossily: malformed sequences become
    /// replacement characters, never a load failure.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Self {
        let (data, _had_bom) = strip_bom(data);
        Self::from_raw(&String::from_utf8_lossy(data))
    }

    /// The song's format.
    #[must_use]
    pub const fn format(&self) -> LyricsFormat {
        self.format
    }

    /// Capabilities of the song's format.
    #[must_use]
    pub const fn capabilities(&self) -> SongCapabilities {
        self.format.capabilities()
    }

    /// Whether structured edits are meaningful.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.capabilities().contains(SongCapabilities::EDITABLE)
    }

    /// Whether raw offsets convert to and from structured positions.
    #[must_use]
    pub const fn supports_position_conversion(&self) -> bool {
        self.capabilities()
            .contains(SongCapabilities::POSITION_CONVERSION)
    }

    /// Ensure the song's format declares `capability`, returning
    /// [`CoreError::NotSupported`] for `operation` otherwise.
    fn require_capability(
        &self,
        capability: SongCapabilities,
        operation: &'static str,
    ) -> Result<()> {
        if self.capabilities().contains(capability) {
            Ok(())
        } else {
            Err(CoreError::NotSupported {
                format: self.format.name(),
                operation,
            })
        }
    }

    /// The song's lines, in order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The line at `index`, if any.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the song has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Raw text of the whole document: line raws joined by `'\n'`.
    #[must_use]
    pub fn raw(&self) -> String {
        self.raw_range(0, self.lines.len())
    }

    /// Raw text of lines `[start, end)` joined by `'\n'`, no trailing
    /// terminator. `end` is clamped to the line count.
    #[must_use]
    pub fn raw_range(&self, start: usize, end: usize) -> String {
        join_lines(&self.lines, start, end, Line::raw)
    }

    /// Rendered text of the whole document: timecode-free line texts
    /// joined by `'\n'`.
    #[must_use]
    pub fn text(&self) -> String {
        self.text_range(0, self.lines.len())
    }

    /// Rendered text of lines `[start, end)` joined by `'\n'`.
    #[must_use]
    pub fn text_range(&self, start: usize, end: usize) -> String {
        let texts: Vec<String> = self
            .lines
            .iter()
            .take(end.min(self.lines.len()))
            .skip(start)
            .map(Line::text)
            .collect();
        texts.join("\n")
    }

    /// Bytes for saving: every line followed by `\r\n`.
    #[must_use]
    pub fn raw_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for line in &self.lines {
            bytes.extend_from_slice(line.raw().as_bytes());
            bytes.extend_from_slice(WRITE_TERMINATOR.as_bytes());
        }
        bytes
    }

    /// Char length of the raw document text.
    #[must_use]
    pub fn raw_char_len(&self) -> usize {
        block_extent(self.lines.iter().map(Line::raw_char_len))
    }

    /// Char length of the rendered document text.
    #[must_use]
    pub fn text_char_len(&self) -> usize {
        block_extent(self.lines.iter().map(Line::text_char_len))
    }

    /// Raw char offset where line `index` starts. `index` may equal the
    /// line count; the result is then one past the end-of-document
    /// separator position, the append coordinate.
    #[must_use]
    pub fn raw_offset_of_line(&self, index: usize) -> usize {
        self.lines
            .iter()
            .take(index)
            .map(|line| line.raw_char_len() + 1)
            .sum()
    }

    /// Atomically replace lines `[start, start + removed)` with
    /// `new_lines`, returning the change notification.
    ///
    /// # Errors
    /// Returns [`CoreError::LineIndexOutOfBounds`] when the range does not
    /// lie within the song.
    pub fn replace_lines(
        &mut self,
        start: usize,
        removed: usize,
        new_lines: Vec<Line>,
    ) -> Result<LineRangeChanged> {
        let count = self.lines.len();
        if start > count || removed > count - start.min(count) {
            return Err(CoreError::LineIndexOutOfBounds {
                index: start + removed,
                count,
            });
        }
        Ok(self.splice_lines(start, removed, new_lines))
    }

    /// Append a line.
    pub fn add_line(&mut self, line: Line) -> LineRangeChanged {
        self.splice_lines(self.lines.len(), 0, vec![line])
    }

    /// Remove every line.
    pub fn remove_all_lines(&mut self) -> LineRangeChanged {
        self.splice_lines(0, self.lines.len(), Vec::new())
    }

    /// Apply a raw-text edit: at char `position`, remove `chars_removed`
    /// chars and insert `inserted`.
    ///
    /// Only the affected line range is re-parsed; untouched lines keep
    /// their structure. The resulting notification covers exactly that
    /// range, so edits cost time proportional to their size, not to the
    /// document.
    ///
    /// # Errors
    /// Returns [`CoreError::PositionOutOfBounds`] when the edited range
    /// lies past the document text.
    pub fn update_raw_text(
        &mut self,
        position: usize,
        chars_removed: usize,
        inserted: &str,
    ) -> Result<LineRangeChanged> {
        let length = self.raw_char_len();
        if position + chars_removed > length {
            return Err(CoreError::PositionOutOfBounds {
                position: position + chars_removed,
                length,
            });
        }

        if self.lines.is_empty() {
            if inserted.is_empty() {
                return Ok(self.splice_lines(0, 0, Vec::new()));
            }
            let new_lines = split_buffer_lines(inserted)
                .into_iter()
                .map(Line::from_raw)
                .collect();
            return Ok(self.splice_lines(0, 0, new_lines));
        }

        let first = self.line_index_at_raw(position);
        let last = self.line_index_at_raw(position + chars_removed);

        let region_start = self.raw_offset_of_line(first);
        let region = self.raw_range(first, last + 1);
        let local = position - region_start;

        let chars: Vec<char> = region.chars().collect();
        let mut edited = String::with_capacity(region.len() + inserted.len());
        edited.extend(chars[..local].iter());
        edited.push_str(inserted);
        edited.extend(chars[local + chars_removed..].iter());

        let new_lines: Vec<Line> = split_buffer_lines(&edited)
            .into_iter()
            .map(Line::from_raw)
            .collect();
        Ok(self.splice_lines(first, last - first + 1, new_lines))
    }

    /// Convert a raw document offset to a structured position.
    ///
    /// The offset of a line's joining separator maps to the end of that
    /// line's raw text.
    ///
    /// # Errors
    /// Returns [`CoreError::NotSupported`] when the format does not
    /// declare [`SongCapabilities::POSITION_CONVERSION`].
    pub fn position_from_raw(&self, offset: usize) -> Result<SongPosition> {
        self.require_capability(SongCapabilities::POSITION_CONVERSION, "position_from_raw")?;
        if self.lines.is_empty() {
            return Ok(SongPosition {
                line: 0,
                position_in_line: 0,
            });
        }
        let line = self.line_index_at_raw(offset);
        let start = self.raw_offset_of_line(line);
        let position_in_line = (offset - start).min(self.lines[line].raw_char_len());
        Ok(SongPosition {
            line,
            position_in_line,
        })
    }

    /// Convert a structured position to a raw document offset.
    ///
    /// # Errors
    /// Returns [`CoreError::NotSupported`] when the format does not
    /// declare [`SongCapabilities::POSITION_CONVERSION`], and an index or
    /// position error when the coordinate lies outside the song.
    pub fn position_to_raw(&self, position: SongPosition) -> Result<usize> {
        self.require_capability(SongCapabilities::POSITION_CONVERSION, "position_to_raw")?;
        let count = self.lines.len();
        let line = self
            .lines
            .get(position.line)
            .ok_or(CoreError::LineIndexOutOfBounds {
                index: position.line,
                count,
            })?;
        let length = line.raw_char_len();
        if position.position_in_line > length {
            return Err(CoreError::PositionOutOfBounds {
                position: position.position_in_line,
                length,
            });
        }
        Ok(self.raw_offset_of_line(position.line) + position.position_in_line)
    }

    /// Retime one syllable's start.
    ///
    /// # Errors
    /// Returns an index error for a bad line or syllable index.
    pub fn set_syllable_start(
        &mut self,
        line: usize,
        syllable: usize,
        time: Centiseconds,
    ) -> Result<LineRangeChanged> {
        self.with_modified_line(line, |line| line.set_syllable_start(syllable, time))
    }

    /// Retime one syllable's end.
    ///
    /// # Errors
    /// Returns an index error for a bad line or syllable index.
    pub fn set_syllable_end(
        &mut self,
        line: usize,
        syllable: usize,
        time: Centiseconds,
    ) -> Result<LineRangeChanged> {
        self.with_modified_line(line, |line| line.set_syllable_end(syllable, time))
    }

    /// Replace one syllable's text.
    ///
    /// # Errors
    /// Returns an index error for a bad line or syllable index.
    pub fn set_syllable_text(
        &mut self,
        line: usize,
        syllable: usize,
        text: &str,
    ) -> Result<LineRangeChanged> {
        self.with_modified_line(line, |line| line.set_syllable_text(syllable, text))
    }

    /// Replace one line's prefix.
    ///
    /// # Errors
    /// Returns [`CoreError::LineIndexOutOfBounds`] for a bad line index.
    pub fn set_line_prefix(&mut self, line: usize, prefix: &str) -> Result<LineRangeChanged> {
        self.with_modified_line(line, |line| {
            line.set_prefix(prefix);
            Ok(())
        })
    }

    /// Replace one line's suffix.
    ///
    /// # Errors
    /// Returns [`CoreError::LineIndexOutOfBounds`] for a bad line index.
    pub fn set_line_suffix(&mut self, line: usize, suffix: &str) -> Result<LineRangeChanged> {
        self.with_modified_line(line, |line| {
            line.set_suffix(suffix);
            Ok(())
        })
    }

    /// Re-segment one line's rendered text at the given split points; see
    /// [`Line::set_syllable_split_points`].
    ///
    /// # Errors
    /// Returns [`CoreError::LineIndexOutOfBounds`] for a bad line index
    /// and [`CoreError::SplitPointContract`] for invalid points.
    pub fn split_syllables(&mut self, line: usize, points: &[usize]) -> Result<LineRangeChanged> {
        self.with_modified_line(line, |line| line.set_syllable_split_points(points))
    }

    /// Index of the line containing the raw `offset`: the last line whose
    /// start offset is at most the query, clamped to the last line.
    fn line_index_at_raw(&self, offset: usize) -> usize {
        if self.lines.is_empty() {
            return 0;
        }
        let mut starts = Vec::with_capacity(self.lines.len());
        let mut position = 0;
        for line in &self.lines {
            starts.push(position);
            position += line.raw_char_len() + 1;
        }
        starts.partition_point(|start| *start <= offset).saturating_sub(1)
    }

    fn with_modified_line<F>(&mut self, index: usize, modify: F) -> Result<LineRangeChanged>
    where
        F: FnOnce(&mut Line) -> Result<()>,
    {
        let count = self.lines.len();
        let mut line = self
            .lines
            .get(index)
            .cloned()
            .ok_or(CoreError::LineIndexOutOfBounds { index, count })?;
        modify(&mut line)?;
        Ok(self.splice_lines(index, 1, vec![line]))
    }

    /// Unchecked range replacement; callers guarantee bounds. The change
    /// numbers are computed before the splice because the removed extent
    /// needs the old line lengths.
    fn splice_lines(&mut self, start: usize, removed: usize, new_lines: Vec<Line>) -> LineRangeChanged {
        let raw_position = self.raw_offset_of_line(start);
        let raw_removed = block_extent(
            self.lines[start..start + removed]
                .iter()
                .map(Line::raw_char_len),
        );
        let raw_added = block_extent(new_lines.iter().map(Line::raw_char_len));
        let lines_added = new_lines.len();

        self.lines.splice(start..start + removed, new_lines);

        LineRangeChanged {
            line_position: start,
            lines_removed: removed,
            lines_added,
            raw_position,
            raw_removed,
            raw_added,
        }
    }
}

/// Char extent of a block of lines: lengths plus the separators inside the
/// block. An empty block has extent zero.
fn block_extent<I: Iterator<Item = usize>>(lengths: I) -> usize {
    let mut total = 0;
    let mut count = 0;
    for length in lengths {
        total += length;
        count += 1;
    }
    if count == 0 {
        0
    } else {
        total + count - 1
    }
}

fn join_lines<F>(lines: &[Line], start: usize, end: usize, part: F) -> String
where
    F: Fn(&Line) -> &str,
{
    let parts: Vec<&str> = lines
        .iter()
        .take(end.min(lines.len()))
        .skip(start)
        .map(part)
        .collect();
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Song {
        Song::from_raw("[00:00:00]la[00:01:00]\nuntimed\n[00:02:00]li[00:03:00]")
    }

    #[test]
    fn parses_and_rejoins_lines() {
        let song = sample();
        assert_eq!(song.line_count(), 3);
        assert_eq!(
            song.raw(),
            "[00:00:00]la[00:01:00]\nuntimed\n[00:02:00]li[00:03:00]"
        );
        assert_eq!(song.text(), "la\nuntimed\nli");
    }

    #[test]
    fn accepts_crlf_and_trailing_terminator() {
        let song = Song::from_raw("a\r\nb\r\n");
        assert_eq!(song.line_count(), 2);
        assert_eq!(song.raw(), "a\nb");
    }

    #[test]
    fn empty_text_is_an_empty_song() {
        let song = Song::from_raw("");
        assert!(song.is_empty());
        assert_eq!(song.raw(), "");
        assert_eq!(song.raw_char_len(), 0);
    }

    #[test]
    fn load_strips_bom_and_save_emits_crlf() {
        let song = Song::from_bytes(b"\xEF\xBB\xBFa\nb");
        assert_eq!(song.raw(), "a\nb");
        assert_eq!(song.raw_bytes(), b"a\r\nb\r\n");
    }

    #[test]
    fn replace_lines_reports_extents_from_old_lengths() {
        let mut song = Song::from_raw("[00:00:00]la[00:01:00]\nBB\nC");
        let change = song
            .replace_lines(1, 1, vec![Line::from_raw("XYZ")])
            .unwrap();
        assert_eq!(
            change,
            LineRangeChanged {
                line_position: 1,
                lines_removed: 1,
                lines_added: 1,
                raw_position: 23,
                raw_removed: 2,
                raw_added: 3,
            }
        );
        assert_eq!(song.raw(), "[00:00:00]la[00:01:00]\nXYZ\nC");
    }

    #[test]
    fn removal_reports_zero_added_extent() {
        let mut song = Song::from_raw("aa\nbb\ncc");
        let change = song.replace_lines(1, 1, Vec::new()).unwrap();
        assert_eq!(change.raw_position, 3);
        assert_eq!(change.raw_removed, 2);
        assert_eq!(change.raw_added, 0);
        assert_eq!(song.raw(), "aa\ncc");
    }

    #[test]
    fn multi_line_extent_counts_internal_separators() {
        let mut song = Song::from_raw("aa\nbb\ncc\ndd");
        let change = song
            .replace_lines(1, 2, vec![Line::from_raw("X")])
            .unwrap();
        // "bb\ncc" spans five chars inside the block.
        assert_eq!(change.raw_removed, 5);
        assert_eq!(change.raw_added, 1);
        assert_eq!(song.raw(), "aa\nX\ndd");
    }

    #[test]
    fn replace_lines_checks_bounds() {
        let mut song = Song::from_raw("a\nb");
        assert!(matches!(
            song.replace_lines(1, 2, Vec::new()),
            Err(CoreError::LineIndexOutOfBounds { .. })
        ));
        assert!(matches!(
            song.replace_lines(3, 0, Vec::new()),
            Err(CoreError::LineIndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn add_and_remove_all() {
        let mut song = Song::new(LyricsFormat::SoramimiMoonCat);
        let change = song.add_line(Line::from_raw("hello"));
        assert_eq!(change.line_position, 0);
        assert_eq!(change.lines_added, 1);
        assert_eq!(change.raw_position, 0);

        let change = song.add_line(Line::from_raw("world"));
        assert_eq!(change.line_position, 1);
        assert_eq!(change.raw_position, 6);

        let change = song.remove_all_lines();
        assert_eq!(change.lines_removed, 2);
        assert_eq!(change.raw_removed, 11);
        assert!(song.is_empty());
    }

    #[test]
    fn raw_edit_within_one_line_reparses_only_it() {
        let mut song = Song::from_raw("AB\nCD");
        let change = song.update_raw_text(1, 0, "X").unwrap();
        assert_eq!(change.line_position, 0);
        assert_eq!(change.lines_removed, 1);
        assert_eq!(change.lines_added, 1);
        assert_eq!(change.raw_removed, 2);
        assert_eq!(change.raw_added, 3);
        assert_eq!(song.raw(), "AXB\nCD");
    }

    #[test]
    fn raw_edit_inserting_newline_splits_a_line() {
        let mut song = Song::from_raw("AB\nCD");
        let change = song.update_raw_text(1, 0, "\n").unwrap();
        assert_eq!(change.lines_removed, 1);
        assert_eq!(change.lines_added, 2);
        assert_eq!(song.raw(), "A\nB\nCD");
    }

    #[test]
    fn raw_edit_deleting_separator_merges_lines() {
        let mut song = Song::from_raw("AB\nCD");
        let change = song.update_raw_text(2, 1, "").unwrap();
        assert_eq!(change.line_position, 0);
        assert_eq!(change.lines_removed, 2);
        assert_eq!(change.lines_added, 1);
        assert_eq!(song.raw(), "ABCD");
    }

    #[test]
    fn raw_edit_typing_a_timecode_creates_a_syllable() {
        let mut song = Song::from_raw("[00:00:00]la[00:01:00]\nlili");
        song.update_raw_text(23, 0, "[00:02:00]").unwrap();
        song.update_raw_text(37, 0, "[00:03:00]").unwrap();
        assert_eq!(song.raw(), "[00:00:00]la[00:01:00]\n[00:02:00]lili[00:03:00]");
        let line = song.line(1).unwrap();
        assert_eq!(line.syllable_count(), 1);
        assert_eq!(line.syllable(0).unwrap().text(), "lili");
    }

    #[test]
    fn raw_edit_into_empty_song() {
        let mut song = Song::from_raw("");
        let change = song.update_raw_text(0, 0, "a\nb").unwrap();
        assert_eq!(change.lines_added, 2);
        assert_eq!(song.raw(), "a\nb");
    }

    #[test]
    fn raw_edit_out_of_bounds_fails() {
        let mut song = Song::from_raw("ab");
        assert!(matches!(
            song.update_raw_text(1, 5, ""),
            Err(CoreError::PositionOutOfBounds { .. })
        ));
    }

    #[test]
    fn position_conversion_round_trips() {
        let song = Song::from_raw("AB\nCD");
        assert!(song.supports_position_conversion());

        let position = SongPosition {
            line: 1,
            position_in_line: 1,
        };
        assert_eq!(song.position_to_raw(position).unwrap(), 4);
        assert_eq!(song.position_from_raw(4).unwrap(), position);

        // The separator offset maps to the end of the preceding line.
        assert_eq!(
            song.position_from_raw(2).unwrap(),
            SongPosition {
                line: 0,
                position_in_line: 2
            }
        );
    }

    #[test]
    fn position_conversion_checks_bounds() {
        let song = Song::from_raw("AB");
        assert!(matches!(
            song.position_to_raw(SongPosition {
                line: 3,
                position_in_line: 0
            }),
            Err(CoreError::LineIndexOutOfBounds { .. })
        ));
        assert!(matches!(
            song.position_to_raw(SongPosition {
                line: 0,
                position_in_line: 9
            }),
            Err(CoreError::PositionOutOfBounds { .. })
        ));
    }

    #[test]
    fn structured_edits_rewrite_raw_text() {
        let mut song = Song::from_raw("[00:00:00]la[00:01:00]");
        let change = song
            .set_syllable_end(0, 0, Centiseconds::new(150))
            .unwrap();
        assert_eq!(change.lines_removed, 1);
        assert_eq!(change.lines_added, 1);
        assert_eq!(change.raw_removed, 22);
        assert_eq!(change.raw_added, 22);
        assert_eq!(song.raw(), "[00:00:00]la[00:01:50]");

        song.split_syllables(0, &[1]).unwrap();
        let line = song.line(0).unwrap();
        assert_eq!(line.syllable_count(), 2);
        assert_eq!(line.text(), "la");
    }
}
