//! `scrollcue` - Cue-aware progressive text reveal
//!
//! Reveals chapter prose as the reader scrolls, hides the inline effect cues
//! embedded in it, fires each cue once its position is reached, and anchors
//! a hover marker for every cue group on the next letter of the text.
//!
//! The crate is UI-agnostic: a host feeds scroll progress in `[0, 1]` and
//! receives rendered lines plus [`CueFired`] events. Drawing, effect
//! playback and tooltips stay on the host side.
//!
//! # Examples
//!
//! ```
//! use scrollcue::{ReaderSession, RevealOptions};
//!
//! let mut session = ReaderSession::new(RevealOptions::default())?;
//! session.load("Hola[cue:sound|bell]\nmundo");
//!
//! session.update(0.0);
//! let frame = session.update(1.0);
//! let marked: Vec<_> = frame.lines.iter().map(|l| l.marked_text()).collect();
//! assert_eq!(marked, vec!["Hola", "{m}undo"]);
//! assert_eq!(frame.fired[0].effect, "bell");
//! # Ok::<(), scrollcue::Error>(())
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Progress to offset casts are clamped
#![allow(clippy::cast_sign_loss)] // Progress is clamped to [0, 1] first
#![allow(clippy::cast_precision_loss)] // Offsets to f64 for progress math
#![allow(clippy::module_name_repetitions)] // Allow cue::CueType etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod cue;
pub mod error;
pub mod event;
pub mod render;
pub mod reveal;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use cue::{Cue, CueGroup, CueParams, CueType, parse_cues};
pub use error::{Error, Result};
pub use event::{
    CueFired, EffectSink, LogLevel, NullSink, clear_log_callback, emit_log, set_log_callback,
};

// Re-export reveal and render types
pub use render::{HoverHandler, HoverMap, HoverTracker, PointerPosition, RenderedLine};
pub use reveal::{
    FirePolicy, ReaderSession, RevealEngine, RevealFrame, RevealOptions, RevealState,
    SessionState,
};
pub use text::RawText;
pub use unicode::WidthMethod;
