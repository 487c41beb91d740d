//! Timecode codec for the bracketed `[MM:SS:CS]` token.
//!
//! The Soramimi/MoonCat format embeds timing inline as fixed-width
//! ten-character tokens. All timing is stored in [`Centiseconds`];
//! conversion to and from milliseconds happens only at the playback
//! boundary.

use core::fmt;
use core::ops::{Add, Sub};

/// Width of one timecode token in chars: `[` + 2 digits + `:` + 2 digits +
/// `:` + 2 digits + `]`.
pub const TIMECODE_CHARS: usize = 10;

/// Timecode reserved for freshly split, not-yet-timed syllables.
///
/// Inserted by [`Line::set_syllable_split_points`](crate::Line::set_syllable_split_points);
/// the user is expected to retime the resulting syllables.
pub const PLACEHOLDER_TIMECODE: &str = "[99:59:99]";

/// Time value carried by [`PLACEHOLDER_TIMECODE`].
pub const PLACEHOLDER_TIME: Centiseconds = Centiseconds::new(599_999);

/// A duration in centiseconds (1 unit = 10 ms), the timing precision of the
/// format.
///
/// The value is signed so that arithmetic on transiently inconsistent edits
/// (`start > end`) cannot wrap; the parser only ever produces non-negative
/// values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Centiseconds(i32);

impl Centiseconds {
    /// Zero duration.
    pub const ZERO: Self = Self(0);

    /// Create from a raw centisecond count.
    #[must_use]
    pub const fn new(count: i32) -> Self {
        Self(count)
    }

    /// Raw centisecond count.
    #[must_use]
    pub const fn count(self) -> i32 {
        self.0
    }

    /// Convert to milliseconds. Playback-boundary use only.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0 as i64 * 10
    }

    /// Convert from milliseconds, truncating sub-centisecond precision.
    /// Playback-boundary use only.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self((millis / 10) as i32)
    }
}

impl Add for Centiseconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Centiseconds {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Centiseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timecode(*self))
    }
}

/// Parse a timecode token starting at `index` in `chars`.
///
/// Recognizes the fixed-width pattern `[DD:DD:DD]`. Returns the decoded time
/// and the index just past the token, or `None` when the window does not
/// match; a failed match consumes nothing and the caller resumes scanning one
/// char forward.
///
/// Seconds values of 60 or more are not rejected: the excess carries into
/// minutes, so `[00:76:02]` decodes the same as `[01:16:02]`. This matches
/// Soramimi Karaoke, Soramimi Karaoke Tools and ECHO, which all treat the
/// seconds field as an unbounded additive field.
///
/// # Examples
///
/// ```
/// use soramimi_core::{parse_timecode, Centiseconds};
///
/// let chars: Vec<char> = "la[01:16:02]la".chars().collect();
/// assert_eq!(parse_timecode(&chars, 0), None);
/// assert_eq!(
///     parse_timecode(&chars, 2),
///     Some((Centiseconds::new(7602), 12))
/// );
/// ```
#[must_use]
pub fn parse_timecode(chars: &[char], index: usize) -> Option<(Centiseconds, usize)> {
    if index + TIMECODE_CHARS > chars.len() {
        return None;
    }
    let window = &chars[index..index + TIMECODE_CHARS];
    if window[0] != '[' || window[3] != ':' || window[6] != ':' || window[9] != ']' {
        return None;
    }

    let field = |at: usize| -> Option<i32> {
        let hi = window[at].to_digit(10)?;
        let lo = window[at + 1].to_digit(10)?;
        Some((hi * 10 + lo) as i32)
    };
    let minutes = field(1)?;
    let seconds = field(4)?;
    let centiseconds = field(7)?;

    let total = minutes * 6000 + seconds * 100 + centiseconds;
    Some((Centiseconds::new(total), index + TIMECODE_CHARS))
}

/// Serialize a time value as a bracketed timecode token.
///
/// Minutes, seconds and centiseconds are zero-padded to two digits via
/// truncating division. Values of 100 minutes or more widen the minutes
/// field instead of saturating; the interchange format leaves behavior past
/// 99 minutes undefined, and widening at least round-trips through humans
/// even though the fixed-width decoder will not re-read it.
#[must_use]
pub fn format_timecode(time: Centiseconds) -> String {
    let total = time.count();
    let minutes = total / 6000;
    let seconds = total % 6000 / 100;
    let centiseconds = total % 100;
    format!("[{minutes:02}:{seconds:02}:{centiseconds:02}]")
}
