//! Line model: one lyrics line as an ordered sequence of timed syllables.
//!
//! A line owns its syllables plus untimed leading/trailing text (prefix and
//! suffix). The raw form embeds timecode tokens inline; deserializing raw
//! text into syllables and serializing syllables back into raw text form a
//! bidirectional transform pair. Re-parsing a line's raw text always
//! reproduces an equivalent line: identical `(text, start, end)` per
//! syllable, even where whitespace placement around adjacent timecodes
//! differs.

use crate::timecode::{
    format_timecode, parse_timecode, Centiseconds, PLACEHOLDER_TIMECODE, TIMECODE_CHARS,
};
use crate::utils::errors::{CoreError, Result};

/// Minimal timed text unit: a fragment of lyrics with a start and end time.
///
/// `start <= end` is not enforced; editing may transiently violate it and
/// callers must tolerate `start == end`. A syllable is owned exclusively by
/// its [`Line`]; text and times are mutated through the line so the raw
/// text stays in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Syllable {
    text: String,
    start: Centiseconds,
    end: Centiseconds,
}

impl Syllable {
    /// Create a syllable.
    pub fn new(text: impl Into<String>, start: Centiseconds, end: Centiseconds) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// The syllable's text, timecode-free.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start time.
    #[must_use]
    pub const fn start(&self) -> Centiseconds {
        self.start
    }

    /// End time.
    #[must_use]
    pub const fn end(&self) -> Centiseconds {
        self.end
    }
}

/// One lyrics line: prefix, timed syllables, suffix.
///
/// The line keeps its raw (timecode-embedded) text and its structured
/// representation consistent at all times: construction parses, and every
/// structured mutation re-derives the raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    raw: String,
    prefix: String,
    suffix: String,
    syllables: Vec<Syllable>,
    start: Option<Centiseconds>,
    end: Option<Centiseconds>,
}

impl Line {
    /// Create an empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a line from its raw, timecode-embedded text.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let mut line = Self {
            raw: raw.into(),
            ..Self::default()
        };
        line.deserialize();
        line
    }

    /// Build a line from structured parts.
    ///
    /// The parts are serialized into raw text and immediately re-parsed,
    /// so the resulting line is in canonical form: whitespace-only
    /// syllables merge into their predecessor and timing-adjacent spaces
    /// settle into their canonical position.
    #[must_use]
    pub fn from_syllables(syllables: Vec<Syllable>, prefix: &str, suffix: &str) -> Self {
        let mut line = Self {
            prefix: prefix.to_owned(),
            suffix: suffix.to_owned(),
            syllables,
            ..Self::default()
        };
        line.serialize();
        line.deserialize();
        line
    }

    /// Raw text of the line, timecodes included, no line terminator.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Rendered text: prefix, syllable texts and suffix concatenated,
    /// timecode-free.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.raw.len());
        text.push_str(&self.prefix);
        for syllable in &self.syllables {
            text.push_str(&syllable.text);
        }
        text.push_str(&self.suffix);
        text
    }

    /// Untimed text before the first timecode.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Untimed text after the last timecode.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The line's syllables, in order.
    #[must_use]
    pub fn syllables(&self) -> &[Syllable] {
        &self.syllables
    }

    /// Number of syllables.
    #[must_use]
    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }

    /// The syllable at `index`, if any.
    #[must_use]
    pub fn syllable(&self, index: usize) -> Option<&Syllable> {
        self.syllables.get(index)
    }

    /// Earliest time among the line's timecodes; `None` for untimed lines.
    #[must_use]
    pub const fn start(&self) -> Option<Centiseconds> {
        self.start
    }

    /// Latest time among the line's timecodes; `None` for untimed lines.
    #[must_use]
    pub const fn end(&self) -> Option<Centiseconds> {
        self.end
    }

    /// Length of the raw text in chars.
    #[must_use]
    pub fn raw_char_len(&self) -> usize {
        self.raw.chars().count()
    }

    /// Length of the rendered text in chars.
    #[must_use]
    pub fn text_char_len(&self) -> usize {
        let syllables: usize = self.syllables.iter().map(|s| s.text.chars().count()).sum();
        self.prefix.chars().count() + syllables + self.suffix.chars().count()
    }

    /// Replace the prefix and re-derive the raw text.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
        self.serialize();
        self.deserialize();
    }

    /// Replace the suffix and re-derive the raw text.
    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix = suffix.into();
        self.serialize();
        self.deserialize();
    }

    /// Replace a syllable's text and re-derive the raw text.
    ///
    /// Setting a whitespace-only text merges the syllable into its
    /// predecessor on the canonicalizing re-parse.
    ///
    /// # Errors
    /// Returns [`CoreError::SyllableIndexOutOfBounds`] for a bad index.
    pub fn set_syllable_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.syllable_mut(index)?.text = text.into();
        self.serialize();
        self.deserialize();
        Ok(())
    }

    /// Retime a syllable's start and re-derive the raw text.
    ///
    /// # Errors
    /// Returns [`CoreError::SyllableIndexOutOfBounds`] for a bad index.
    pub fn set_syllable_start(&mut self, index: usize, start: Centiseconds) -> Result<()> {
        self.syllable_mut(index)?.start = start;
        self.serialize();
        self.deserialize();
        Ok(())
    }

    /// Retime a syllable's end and re-derive the raw text.
    ///
    /// # Errors
    /// Returns [`CoreError::SyllableIndexOutOfBounds`] for a bad index.
    pub fn set_syllable_end(&mut self, index: usize, end: Centiseconds) -> Result<()> {
        self.syllable_mut(index)?.end = end;
        self.serialize();
        self.deserialize();
        Ok(())
    }

    /// Re-segment the line's rendered text into syllables at the given
    /// rendered-text char offsets.
    ///
    /// The points partition the whole rendered text: points `[2, 5]` on a
    /// ten-char line produce three syllables covering `[0, 2)`, `[2, 5)`
    /// and `[5, 10)`. Every resulting syllable carries the placeholder
    /// time from [`PLACEHOLDER_TIMECODE`]; previous timing is discarded
    /// and the user is expected to retime the line. A partition that is
    /// whitespace-only trails the preceding syllable instead of becoming
    /// its own.
    ///
    /// # Errors
    /// Returns [`CoreError::SplitPointContract`] unless the points are
    /// strictly ascending, unique, and strictly inside the rendered text.
    pub fn set_syllable_split_points(&mut self, points: &[usize]) -> Result<()> {
        let chars: Vec<char> = self.text().chars().collect();
        if chars.is_empty() {
            if points.is_empty() {
                return Ok(());
            }
            return Err(CoreError::split_point_contract(
                "line has no rendered text to split",
            ));
        }

        let mut previous: Option<usize> = None;
        for &point in points {
            if point == 0 || point >= chars.len() {
                return Err(CoreError::split_point_contract(format!(
                    "point {point} not strictly inside the rendered text (length {})",
                    chars.len()
                )));
            }
            if let Some(previous) = previous {
                if point <= previous {
                    return Err(CoreError::split_point_contract(format!(
                        "point {point} does not ascend past {previous}"
                    )));
                }
            }
            previous = Some(point);
        }

        let mut raw =
            String::with_capacity(chars.len() + (points.len() + 2) * TIMECODE_CHARS);
        raw.push_str(PLACEHOLDER_TIMECODE);
        let mut previous_point = 0;
        for &point in points {
            raw.extend(chars[previous_point..point].iter());
            raw.push_str(PLACEHOLDER_TIMECODE);
            previous_point = point;
        }
        raw.extend(chars[previous_point..].iter());
        raw.push_str(PLACEHOLDER_TIMECODE);

        self.raw = raw;
        self.deserialize();
        Ok(())
    }

    fn syllable_mut(&mut self, index: usize) -> Result<&mut Syllable> {
        let count = self.syllables.len();
        self.syllables
            .get_mut(index)
            .ok_or(CoreError::SyllableIndexOutOfBounds { index, count })
    }

    /// Rebuild the raw text from prefix, syllables and suffix.
    fn serialize(&mut self) {
        let mut raw = String::with_capacity(
            self.raw.len().max(self.prefix.len() + self.suffix.len() + 16),
        );
        raw.push_str(&self.prefix);

        let mut previous_time: Option<Centiseconds> = None;
        // Char index of the last char of the most recent syllable text.
        let mut last_text_char: Option<usize> = None;

        for syllable in &self.syllables {
            if previous_time != Some(syllable.start) {
                if let Some(index) = last_text_char {
                    if raw.chars().nth(index) == Some(' ') {
                        // If the previous syllable ended with a space, put
                        // the space between the two timecodes instead of
                        // before. This isn't strictly required, but it's
                        // common practice because Soramimi Karaoke Tools
                        // doesn't handle adjacent timecodes perfectly.
                        remove_char_at(&mut raw, index);
                        raw.push(' ');
                    }
                }
                raw.push_str(&format_timecode(syllable.start));
            }

            raw.push_str(&syllable.text);
            last_text_char = raw.chars().count().checked_sub(1);

            raw.push_str(&format_timecode(syllable.end));
            previous_time = Some(syllable.end);
        }

        raw.push_str(&self.suffix);
        self.raw = raw;
    }

    /// Rebuild prefix, syllables and suffix from the raw text.
    fn deserialize(&mut self) {
        self.syllables.clear();
        self.prefix.clear();
        self.suffix.clear();
        self.start = None;
        self.end = None;

        let chars: Vec<char> = self.raw.chars().collect();

        // Guards the len - TIMECODE_CHARS calculation below.
        if chars.len() < TIMECODE_CHARS {
            self.suffix = self.raw.clone();
            return;
        }

        let mut first_timecode = true;
        let mut previous_time = Centiseconds::ZERO;
        let mut previous_index = 0_usize;

        // Scan up to the last char that can still start a timecode token.
        let mut i = 0;
        while i <= chars.len() - TIMECODE_CHARS {
            let Some((time, next)) = parse_timecode(&chars, i) else {
                i += 1;
                continue;
            };

            if first_timecode {
                self.prefix = chars[..i].iter().collect();
                first_timecode = false;
            } else {
                let text: String = chars[previous_index..i].iter().collect();
                if text.chars().all(|c| c == ' ') {
                    // Whitespace between two timecodes trails the previous
                    // syllable instead of becoming a zero-content one.
                    if let Some(last) = self.syllables.last_mut() {
                        last.text.push_str(&text);
                    }
                } else {
                    self.syllables
                        .push(Syllable::new(text, previous_time, time));
                }
            }

            previous_index = next;
            previous_time = time;
            self.start = Some(self.start.map_or(time, |start| start.min(time)));
            self.end = Some(self.end.map_or(time, |end| end.max(time)));
            i = next;
        }

        self.suffix = chars[previous_index..].iter().collect();
    }
}

/// Remove the char at `char_index` from `text`.
fn remove_char_at(text: &mut String, char_index: usize) {
    if let Some((byte_index, ch)) = text.char_indices().nth(char_index) {
        text.drain(byte_index..byte_index + ch.len_utf8());
    }
}
