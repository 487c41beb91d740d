//! # Soramimi Core
//!
//! Data model and codec for Soramimi/MoonCat timecoded karaoke lyrics: a
//! plain-text line format in which every syllable carries inline
//! `[MM:SS:CS]` start/end timestamps at centisecond precision.
//!
//! ## Features
//!
//! - **Tolerant parsing**: malformed timecode tokens are skipped, seconds
//!   fields past 59 carry into minutes, invalid UTF-8 is replaced -- a load
//!   never fails
//! - **Round-trip stability**: serializing a parsed line and re-parsing it
//!   reproduces the same `(text, start, end)` syllable sequence
//! - **Incremental edits**: every mutation is a range-based line
//!   replacement returning a typed [`LineRangeChanged`] notification with
//!   the affected structured and raw-text ranges
//! - **Capability-gated conversion**: formats declare support for
//!   raw/structured position conversion instead of guessing
//!
//! ## Quick Start
//!
//! ```
//! use soramimi_core::Song;
//!
//! let song = Song::from_raw("[00:00:00]Ka[00:00:50]ra[00:01:00]o[00:01:50]ke[00:02:00]");
//! let line = song.line(0).unwrap();
//!
//! assert_eq!(line.syllable_count(), 4);
//! assert_eq!(line.text(), "Karaoke");
//! assert_eq!(song.text(), "Karaoke");
//! ```

#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod line;
pub mod song;
pub mod timecode;
pub mod utils;

pub use line::{Line, Syllable};
pub use song::{LineRangeChanged, LyricsFormat, Song, SongCapabilities, SongPosition};
pub use timecode::{
    format_timecode, parse_timecode, Centiseconds, PLACEHOLDER_TIME, PLACEHOLDER_TIMECODE,
    TIMECODE_CHARS,
};
pub use utils::{split_buffer_lines, split_document_lines, strip_bom, CoreError, Result};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
