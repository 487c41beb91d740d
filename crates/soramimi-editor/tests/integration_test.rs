//! End-to-end tests for the synchronized document: reconciliation
//! locality, the raw-edit path, navigation policies and a full timing
//! session.

use pretty_assertions::assert_eq;
use soramimi_editor::{
    Centiseconds, EditorCommand, Line, LineDecorations, LyricsDocument, SetSyllableEndCommand,
    SetSyllableStartCommand, SplitSyllablesCommand, SyllablePosition, TimingState,
};

fn ten_line_document() -> LyricsDocument {
    let mut text = String::new();
    for index in 0..10 {
        text.push_str(&format!("line number {index}\n"));
    }
    LyricsDocument::from_raw(&text)
}

fn positions(document: &LyricsDocument) -> Vec<usize> {
    document
        .line_decorations()
        .iter()
        .map(LineDecorations::position)
        .collect()
}

/// The document's buffers and cache always match a from-scratch rebuild.
fn assert_matches_rebuild(document: &LyricsDocument) {
    assert_eq!(document.raw_text(), document.song().raw());
    assert_eq!(document.rendered_text(), document.song().text());

    let rebuilt = LyricsDocument::from_raw(&document.raw_text());
    assert_eq!(positions(&rebuilt), positions(document));
}

#[test]
fn replacing_a_range_only_shifts_following_lines() {
    let mut document = ten_line_document();
    let before = positions(&document);

    document
        .replace_lines(2, 2, vec![Line::from_raw("short")])
        .unwrap();

    let after = positions(&document);
    assert_eq!(after.len(), 9);
    // Lines before the edit keep identical offsets.
    assert_eq!(after[..2], before[..2]);
    // Every following line shifted by the same net difference.
    let old_block = "line number 2\nline number 3".chars().count() as isize;
    let diff = "short".chars().count() as isize - old_block;
    for (new_position, old_position) in after[3..].iter().zip(&before[4..]) {
        assert_eq!(*new_position as isize, *old_position as isize + diff);
    }
    assert_matches_rebuild(&document);
}

#[test]
fn a_burst_of_mixed_edits_stays_synchronized() {
    let mut document = ten_line_document();

    document.replace_lines(9, 1, Vec::new()).unwrap();
    document.replace_lines(0, 1, Vec::new()).unwrap();
    document
        .replace_lines(3, 0, vec![Line::from_raw("[00:05:00]new[00:06:00]")])
        .unwrap();
    document.edit_raw(0, 4, "typed").unwrap();
    document.add_line(Line::from_raw("tail"));
    document.split_syllables(2, &[4, 7]).unwrap();

    assert_matches_rebuild(&document);
}

#[test]
fn raw_typing_updates_rendered_but_not_raw() {
    let mut document = LyricsDocument::from_raw("[00:00:00]so[00:01:00]\nplain");
    let raw_before = document.raw_text();

    // Insert inside line 0's syllable text ("so" sits at raw 10..12).
    document.edit_raw(11, 0, "l").unwrap();

    // The raw buffer holds exactly the user's keystroke result...
    let mut expected = raw_before;
    expected.insert(11, 'l');
    assert_eq!(document.raw_text(), expected);

    // ...and the rendered buffer followed the re-parse.
    assert_eq!(document.rendered_text(), "slo\nplain");
    assert_matches_rebuild(&document);
}

#[test]
fn deleting_a_raw_timecode_merges_syllable_text_back() {
    let mut document = LyricsDocument::from_raw("[00:00:00]so[00:00:50]ra[00:01:00]");
    // Delete the middle timecode (raw offsets 12..22).
    document.edit_raw(12, 10, "").unwrap();

    let line = document.song().line(0).unwrap();
    assert_eq!(line.syllable_count(), 1);
    assert_eq!(line.syllable(0).unwrap().text(), "sora");
    assert_eq!(document.rendered_text(), "sora");
    assert_matches_rebuild(&document);
}

#[test]
fn timing_session_with_commands() {
    let mut document = LyricsDocument::from_bytes(b"sora mimi\r\n\r\nkaraoke\r\n");
    assert_eq!(document.song().line_count(), 3);

    // Syllabify the first line, then stamp times as the clock advances.
    SplitSyllablesCommand::new(0, vec![5])
        .execute(&mut document)
        .unwrap();
    SetSyllableStartCommand::new(SyllablePosition::new(0, 0), Centiseconds::new(0))
        .execute(&mut document)
        .unwrap();
    SetSyllableEndCommand::new(SyllablePosition::new(0, 0), Centiseconds::new(100))
        .execute(&mut document)
        .unwrap();
    SetSyllableStartCommand::new(SyllablePosition::new(0, 1), Centiseconds::new(100))
        .execute(&mut document)
        .unwrap();
    SetSyllableEndCommand::new(SyllablePosition::new(0, 1), Centiseconds::new(200))
        .execute(&mut document)
        .unwrap();

    assert_eq!(document.rendered_text(), "sora mimi\n\nkaraoke");
    let line = document.song().line(0).unwrap();
    assert_eq!(line.start(), Some(Centiseconds::new(0)));
    assert_eq!(line.end(), Some(Centiseconds::new(200)));

    // Drive the playback clock through the line.
    document.update(500);
    let decorations = &document.line_decorations()[0];
    assert_eq!(decorations.state(), TimingState::Playing);
    assert_eq!(decorations.syllables()[0].state(), TimingState::Playing);
    assert_eq!(decorations.syllables()[1].state(), TimingState::NotPlayed);

    document.update(2500);
    assert_eq!(document.line_decorations()[0].state(), TimingState::Played);

    assert_matches_rebuild(&document);
}

#[test]
fn navigation_glides_over_the_empty_middle_line() {
    let document = LyricsDocument::from_raw(
        "[00:00:00]so[00:00:50]ra[00:01:00]\n\n[00:02:00]mi[00:02:50]mi[00:03:00]",
    );

    // Next from the last syllable of line 0 lands on line 2.
    assert_eq!(
        document.next_syllable(SyllablePosition::new(0, 1)),
        Some(SyllablePosition::new(2, 0))
    );
    assert_eq!(
        document.previous_syllable(SyllablePosition::new(2, 0)),
        Some(SyllablePosition::new(0, 1))
    );
    assert_eq!(
        document.next_line(SyllablePosition::start()),
        Some(SyllablePosition::new(2, 0))
    );
    assert_eq!(
        document.previous_line(SyllablePosition::new(2, 0)),
        Some(SyllablePosition::start())
    );

    // Boundary sentinels.
    assert_eq!(document.previous_syllable(SyllablePosition::start()), None);
    assert_eq!(document.next_syllable(SyllablePosition::new(2, 1)), None);
}

#[test]
fn syllable_lookup_skips_lines_without_syllables() {
    let document = LyricsDocument::from_raw(
        "[00:00:00]so[00:00:50]ra[00:01:00]\n\n[00:02:00]mi[00:02:50]mi[00:03:00]",
    );
    // Rendered: "sora\n\nmimi". Offset 5 is the empty line; the syllable
    // boundary search glides to line 2.
    assert_eq!(
        document.syllable_at_offset(5),
        Some(SyllablePosition::new(2, 0))
    );
    // Offsets inside line 0 resolve within it.
    assert_eq!(
        document.syllable_at_offset(2),
        Some(SyllablePosition::new(0, 1))
    );
}

#[test]
fn one_document_edited_both_ways_matches_itself() {
    // Interleave structured and raw edits and verify both text spaces
    // agree at every step.
    let mut document = LyricsDocument::from_raw("[00:00:00]la[00:01:00]");

    document.add_line(Line::from_raw("plain line"));
    assert_matches_rebuild(&document);

    document.edit_raw(23, 0, "[00:02:00]").unwrap();
    assert_matches_rebuild(&document);

    document
        .set_syllable_text(0, 0, "lala")
        .unwrap();
    assert_matches_rebuild(&document);

    document.edit_raw(0, 10, "").unwrap();
    assert_matches_rebuild(&document);

    document.remove_all_lines();
    assert_eq!(document.raw_text(), "");
    assert_eq!(document.rendered_text(), "");
}
