//! Unicode utilities for anchor detection and marker placement.
//!
//! Anchors attach to letters, so this module answers two questions for the
//! renderer: where the next letter grapheme starts, and how many terminal
//! columns a run of text occupies.

mod grapheme;
mod width;

pub use grapheme::{LetterMatch, find_letter, graphemes, is_letter};
pub use width::{WidthMethod, display_width};
