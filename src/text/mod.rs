//! Chapter text storage and the coordinate projections built over it.
//!
//! Two coordinate systems exist for a chapter:
//!
//! - **raw** offsets count every char of the source, cue markup included;
//! - **visible** offsets count only chars outside cue markup.
//!
//! [`SegmentMap`] translates visible offsets to raw ones and back, and
//! [`LineIndex`] turns raw offsets into `(line, char)` positions. All
//! offsets are char (Unicode scalar) offsets.
//!
//! # Examples
//!
//! ```
//! use scrollcue::cue::parse_cues;
//! use scrollcue::text::{LineIndex, RawText, SegmentMap};
//!
//! let source = "Hola[cue:sound|bell]\nmundo";
//! let raw = RawText::new(source);
//! let cues = parse_cues(source);
//! let map = SegmentMap::new(raw.len_chars(), cues.iter().map(|c| c.span()));
//! assert_eq!(map.total_visible(), 10);
//! assert_eq!(map.visible_to_raw(4), 20);
//!
//! let lines = LineIndex::new(&raw);
//! assert_eq!(lines.raw_to_line_char(21), (1, 0));
//! ```

mod content;
mod lines;
mod segment;

pub use content::{RawText, normalize_content};
pub use lines::LineIndex;
pub use segment::{NonCueSegment, SegmentMap, merge_spans};
