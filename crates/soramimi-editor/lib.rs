//! # Soramimi Editor
//!
//! Editing and text-synchronization layer for Soramimi/MoonCat karaoke
//! lyrics, built on `soramimi-core`.
//!
//! The centerpiece is [`LyricsDocument`]: one structured song plus two
//! rope-backed text buffers -- the raw view with inline timecodes and the
//! rendered view without them -- reconciled incrementally on every edit.
//! Structured edits push derived text into both buffers; raw-view typing
//! re-parses only the affected lines and pushes into the rendered buffer.
//! A per-line decoration cache tracks rendered offsets and playback
//! timing states for the surrounding application to paint from.
//!
//! # Features
//!
//! - **Incremental reconciliation**: edits patch buffers and cached
//!   offsets in place; cost follows the edit size, not the document size
//! - **Three coordinate spaces**: raw offsets, rendered offsets and
//!   (line, syllable) positions, with conversions between them
//! - **Navigation**: previous/next syllable and line traversal that skips
//!   empty lines, plus nearest-boundary resolution for cursor placement
//! - **Timing states**: NotPlayed/Playing/Played classification and
//!   per-syllable progress, driven by the playback clock
//! - **Commands**: atomic structured edits (stamp start/end, split
//!   syllables, insert/remove/replace lines)
//!
//! # Example
//!
//! ```
//! use soramimi_editor::{LyricsDocument, SyllablePosition};
//!
//! let mut doc = LyricsDocument::from_raw("[00:00:00]Hi[00:00:50]bi[00:01:00]");
//! assert_eq!(doc.rendered_text(), "Hibi");
//!
//! // Typing in the raw view flows through to the rendered view.
//! doc.edit_raw(24, 0, "ka").unwrap();
//! assert_eq!(doc.rendered_text(), "Hibika");
//!
//! // Navigation skips nothing here; two syllables, one step apart.
//! let first = SyllablePosition::start();
//! assert_eq!(doc.next_syllable(first), Some(SyllablePosition::new(0, 1)));
//! ```

#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod commands;
pub mod core;

// Public API exports
pub use commands::{
    CommandResult, EditorCommand, InsertLineCommand, RemoveLinesCommand, ReplaceLinesCommand,
    SetSyllableEndCommand, SetSyllableStartCommand, SplitSyllablesCommand,
};
pub use core::{
    EditorError, LineDecorations, LyricsDocument, Result, SyllableDecorations, SyllablePosition,
    TimingState,
};

// Re-export soramimi-core types as first-class citizens
pub use soramimi_core::{
    Centiseconds, CoreError, Line, LineRangeChanged, LyricsFormat, Song, SongCapabilities,
    SongPosition, Syllable,
};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
