//! Byte-level text helpers for loading and saving lyrics documents.
//!
//! The reader is deliberately tolerant: it accepts `\n` and `\r\n`
//! terminators, an optional UTF-8 byte order mark, and invalid UTF-8
//! sequences (replaced, never rejected). The writer always emits `\r\n`.

/// Strip a UTF-8 byte order mark from the front of `data`.
///
/// Returns the remaining bytes and whether a BOM was present. UTF-16/32
/// BOMs are left in place; the lossy decode downstream surfaces them as
/// replacement characters rather than failing the load.
///
/// # Examples
///
/// ```
/// use soramimi_core::strip_bom;
///
/// let (stripped, had_bom) = strip_bom(b"\xEF\xBB\xBFhello");
/// assert_eq!(stripped, b"hello");
/// assert!(had_bom);
/// ```
#[must_use]
pub fn strip_bom(data: &[u8]) -> (&[u8], bool) {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        (&data[3..], true)
    } else {
        (data, false)
    }
}

/// Split document text into lines, file semantics.
///
/// Accepts `\n` and `\r\n`. A trailing terminator does not produce a
/// phantom empty line, so `"a\n"` is one line and `""` is zero lines --
/// an empty file is an empty song.
#[must_use]
pub fn split_document_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if text.ends_with('\n') {
        lines.pop();
    }
    lines
}

/// Split an edited buffer fragment into lines, buffer semantics.
///
/// Unlike [`split_document_lines`], a trailing `\n` means the fragment ends
/// with an empty line (the user pressed return), and `""` is a single empty
/// line.
#[must_use]
pub fn split_buffer_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
