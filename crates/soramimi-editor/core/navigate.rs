//! Stateless syllable and line navigation over a [`LyricsDocument`].
//!
//! All traversal skips lines without syllables. "No previous" at the
//! document start and "no next" past the last syllable are `None`; the
//! line-granularity walks instead clamp at the boundary and report the
//! one-past-last position of the last navigable line, signaling the end of
//! navigable content.

use crate::core::document::LyricsDocument;
use crate::core::position::SyllablePosition;

impl LyricsDocument {
    /// The syllable before `position` in document order, walking backward
    /// over lines without syllables. `None` at the document start.
    #[must_use]
    pub fn previous_syllable(&self, position: SyllablePosition) -> Option<SyllablePosition> {
        let lines = self.song().lines();
        if position.syllable > 0 {
            return Some(SyllablePosition::new(position.line, position.syllable - 1));
        }

        let from = position.line.min(lines.len());
        (0..from)
            .rev()
            .find(|&line| lines[line].syllable_count() > 0)
            .map(|line| SyllablePosition::new(line, lines[line].syllable_count() - 1))
    }

    /// The syllable after `position` in document order, walking forward
    /// over lines without syllables. `None` past the last syllable.
    #[must_use]
    pub fn next_syllable(&self, position: SyllablePosition) -> Option<SyllablePosition> {
        let lines = self.song().lines();
        if position.line >= lines.len() {
            return None;
        }
        if position.syllable + 1 < lines[position.line].syllable_count() {
            return Some(SyllablePosition::new(position.line, position.syllable + 1));
        }

        (position.line + 1..lines.len())
            .find(|&line| lines[line].syllable_count() > 0)
            .map(|line| SyllablePosition::new(line, 0))
    }

    /// The start of the line before `position`'s line, skipping lines
    /// without syllables. From past the end of the last line, goes to
    /// that line's start instead. `None` only for an empty document.
    #[must_use]
    pub fn previous_line(&self, position: SyllablePosition) -> Option<SyllablePosition> {
        let lines = self.song().lines();
        if lines.is_empty() {
            return None;
        }
        let last = lines.len() - 1;

        // From the very end of the last line, go to its beginning.
        if position.line == last
            && position.syllable != 0
            && position.syllable == lines[last].syllable_count()
        {
            return Some(SyllablePosition::new(last, 0));
        }

        if position.line == 0 {
            return Some(SyllablePosition::start());
        }
        let mut line = (position.line - 1).min(last);
        while line > 0 && lines[line].syllable_count() == 0 {
            line -= 1;
        }
        Some(SyllablePosition::new(line, 0))
    }

    /// The start of the line after `position`'s line, skipping lines
    /// without syllables. Past the last line, yields the one-past-last
    /// syllable position of the last line: the end of navigable content.
    /// `None` only for an empty document.
    #[must_use]
    pub fn next_line(&self, position: SyllablePosition) -> Option<SyllablePosition> {
        let lines = self.song().lines();
        if lines.is_empty() {
            return None;
        }
        let last = lines.len() - 1;

        let mut line = position.line + 1;
        if line > last {
            return Some(SyllablePosition::new(last, lines[last].syllable_count()));
        }
        while line < last && lines[line].syllable_count() == 0 {
            line += 1;
        }
        Some(SyllablePosition::new(line, 0))
    }

    /// Resolve a rendered offset between two syllable boundaries to the
    /// nearest one.
    ///
    /// Candidates are the boundary at or after the offset and the one
    /// before it. A candidate on the offset's own line wins over one on a
    /// different line; otherwise the positionally closer boundary wins,
    /// ties going forward. `None` only for an empty document.
    #[must_use]
    pub fn nearest_syllable(&self, offset: usize) -> Option<SyllablePosition> {
        let current = self.syllable_at_offset(offset)?;
        let Some(previous) = self.previous_syllable(current) else {
            return Some(current);
        };
        let line = self.line_at_offset(offset);

        if current.line != line && previous.line == line {
            return Some(previous);
        }
        if current.line != previous.line {
            return Some(current);
        }

        let previous_offset = self.offset_of_syllable(previous)?;
        let current_offset = self.offset_of_syllable(current)?;
        if offset.saturating_sub(previous_offset) < current_offset.saturating_sub(offset) {
            Some(previous)
        } else {
            Some(current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lines: 0 timed (2 syllables), 1 untimed, 2 timed (2 syllables).
    fn document() -> LyricsDocument {
        LyricsDocument::from_raw(
            "[00:00:00]so[00:00:50]ra[00:01:00]\nuntimed\n[00:02:00]mi[00:02:50]mi[00:03:00]",
        )
    }

    #[test]
    fn previous_walks_over_empty_lines() {
        let document = document();
        assert_eq!(
            document.previous_syllable(SyllablePosition::new(2, 0)),
            Some(SyllablePosition::new(0, 1))
        );
        assert_eq!(
            document.previous_syllable(SyllablePosition::new(0, 1)),
            Some(SyllablePosition::new(0, 0))
        );
        assert_eq!(document.previous_syllable(SyllablePosition::start()), None);
    }

    #[test]
    fn next_walks_over_empty_lines() {
        let document = document();
        assert_eq!(
            document.next_syllable(SyllablePosition::new(0, 1)),
            Some(SyllablePosition::new(2, 0))
        );
        assert_eq!(
            document.next_syllable(SyllablePosition::new(2, 1)),
            None
        );
    }

    #[test]
    fn navigation_is_symmetric_off_the_boundaries() {
        let document = document();
        for position in [
            SyllablePosition::new(0, 1),
            SyllablePosition::new(2, 0),
            SyllablePosition::new(2, 1),
        ] {
            let previous = document.previous_syllable(position).unwrap();
            assert_eq!(document.next_syllable(previous), Some(position));
        }
        for position in [SyllablePosition::new(0, 0), SyllablePosition::new(0, 1)] {
            let next = document.next_syllable(position).unwrap();
            assert_eq!(document.previous_syllable(next), Some(position));
        }
    }

    #[test]
    fn line_navigation_skips_empty_lines() {
        let document = document();
        assert_eq!(
            document.previous_line(SyllablePosition::new(2, 0)),
            Some(SyllablePosition::new(0, 0))
        );
        assert_eq!(
            document.next_line(SyllablePosition::new(0, 1)),
            Some(SyllablePosition::new(2, 0))
        );
    }

    #[test]
    fn line_navigation_boundary_policy() {
        let document = document();
        // Walking down past the last line parks one past its last
        // syllable.
        assert_eq!(
            document.next_line(SyllablePosition::new(2, 0)),
            Some(SyllablePosition::new(2, 2))
        );
        // From that end position, up means the last line's start.
        assert_eq!(
            document.previous_line(SyllablePosition::new(2, 2)),
            Some(SyllablePosition::new(2, 0))
        );
        // Up from the first line stays at its start.
        assert_eq!(
            document.previous_line(SyllablePosition::new(0, 1)),
            Some(SyllablePosition::start())
        );
    }

    #[test]
    fn empty_document_navigates_nowhere() {
        let document = LyricsDocument::new();
        assert_eq!(document.previous_syllable(SyllablePosition::start()), None);
        assert_eq!(document.next_syllable(SyllablePosition::start()), None);
        assert_eq!(document.previous_line(SyllablePosition::start()), None);
        assert_eq!(document.next_line(SyllablePosition::start()), None);
        assert_eq!(document.nearest_syllable(0), None);
    }

    #[test]
    fn nearest_prefers_the_closer_boundary() {
        // Rendered: "sora" with starts at 0 ("so") and 2 ("ra"), end 4.
        let document = LyricsDocument::from_raw("[00:00:00]so[00:00:50]ra[00:01:00]");
        assert_eq!(
            document.nearest_syllable(0),
            Some(SyllablePosition::new(0, 0))
        );
        // Offset 1: previous boundary at 0, next at 2 -- equidistant,
        // forward wins.
        assert_eq!(
            document.nearest_syllable(1),
            Some(SyllablePosition::new(0, 1))
        );
        assert_eq!(
            document.nearest_syllable(2),
            Some(SyllablePosition::new(0, 1))
        );
    }

    #[test]
    fn nearest_prefers_the_same_line() {
        let document = document();
        // Offset 11 sits at the tail of the untimed line (line 1); the
        // boundary search would hop to line 2, but the previous syllable
        // is not on line 1 either, so the forward candidate wins.
        assert_eq!(
            document.nearest_syllable(11),
            Some(SyllablePosition::new(2, 0))
        );
        // Offset 4 is the end boundary of line 0: the forward candidate
        // hops to line 2 while the previous syllable is still on line 0,
        // which matches the offset's own line and wins.
        assert_eq!(
            document.nearest_syllable(4),
            Some(SyllablePosition::new(0, 1))
        );
    }
}
