//! Per-line rendering of revealed slices with anchored cue markers.

use std::fmt;

use crate::cue::{CueGroup, group_cues, parse_cues};
use crate::unicode::find_letter;

use super::sanitize::{
    is_closing_punct, is_horizontal_space, sanitize_fragment, strip_partial_opening,
};

/// A hover marker bound to exactly one glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    /// The anchor grapheme (a letter plus any combining marks).
    pub glyph: String,
    /// Cues reported to the host on hover, raw offsets absolute.
    pub group: CueGroup,
}

/// A piece of a rendered line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// Cue-free, sanitized prose.
    Text(String),
    Marker(Marker),
}

impl Fragment {
    /// Text this fragment puts on screen.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Marker(marker) => &marker.glyph,
        }
    }
}

/// One rendered line of the reveal window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedLine {
    /// Source line index.
    pub line: usize,
    pub fragments: Vec<Fragment>,
}

impl RenderedLine {
    /// The line as displayed, markers included as plain glyphs.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.fragments.iter().map(Fragment::text).collect()
    }

    /// The line with every marker glyph wrapped in braces.
    #[must_use]
    pub fn marked_text(&self) -> String {
        self.to_string()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Marker(marker) => Some(marker),
            Fragment::Text(_) => None,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn push_text(&mut self, raw: &str) {
        let text = sanitize_fragment(raw);
        if text.is_empty() {
            return;
        }
        if let Some(Fragment::Text(prev)) = self.fragments.last_mut() {
            if text.starts_with(is_closing_punct) {
                let kept = prev.trim_end_matches(is_horizontal_space).len();
                prev.truncate(kept);
            }
            prev.push_str(&text);
        } else {
            self.fragments.push(Fragment::Text(text));
        }
    }

    fn push_marker(&mut self, glyph: &str, group: CueGroup) {
        self.fragments.push(Fragment::Marker(Marker {
            glyph: glyph.to_string(),
            group,
        }));
    }

    fn ends_with_space(&self) -> bool {
        matches!(self.fragments.last(), Some(Fragment::Text(t)) if t.ends_with(is_horizontal_space))
    }
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            match fragment {
                Fragment::Text(text) => f.write_str(text)?,
                Fragment::Marker(marker) => write!(f, "{{{}}}", marker.glyph)?,
            }
        }
        Ok(())
    }
}

/// Renders consecutive lines, carrying an unanchored cue group forward.
///
/// Lines must be fed in order; at most one group is carried at a time.
#[derive(Clone, Debug, Default)]
pub struct AnchorRenderer {
    pending: Option<CueGroup>,
}

impl AnchorRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume with a group still waiting for its anchor.
    #[must_use]
    pub fn with_pending(pending: Option<CueGroup>) -> Self {
        Self { pending }
    }

    /// Group waiting for a letter on a later line.
    #[must_use]
    pub fn pending(&self) -> Option<&CueGroup> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn into_pending(self) -> Option<CueGroup> {
        self.pending
    }

    /// Render the revealed slice of one line.
    ///
    /// `line_start` is the raw offset of the line, used to report absolute
    /// cue offsets. `partial` marks a slice cut mid-line, whose unfinished
    /// trailing markup is hidden.
    pub fn render_line(
        &mut self,
        line: usize,
        line_start: usize,
        slice: &str,
        partial: bool,
    ) -> RenderedLine {
        let slice = if partial {
            strip_partial_opening(slice)
        } else {
            slice
        };
        let mut out = RenderedLine {
            line,
            fragments: Vec::new(),
        };

        let groups = group_cues(slice, parse_cues(slice));
        let byte_at: Vec<usize> = slice
            .char_indices()
            .map(|(b, _)| b)
            .chain(std::iter::once(slice.len()))
            .collect();

        let mut cursor = 0;
        let mut after_group = false;
        for group in groups {
            let start = byte_at[group.raw_start()];
            let end = byte_at[group.raw_end()];
            self.place_text(&slice[cursor..start], after_group, &mut out);

            let group = group.shifted(line_start);
            match self.pending.as_mut() {
                // Still waiting for a letter: both groups share the next one
                Some(waiting) => waiting.absorb(group),
                None => self.pending = Some(group),
            }
            cursor = end;
            after_group = true;
        }
        self.place_text(&slice[cursor..], after_group, &mut out);

        out
    }

    /// Render prose between groups, anchoring the pending group on its
    /// first letter when there is one.
    fn place_text(&mut self, text: &str, after_group: bool, out: &mut RenderedLine) {
        let mut text = text;
        if after_group && out.ends_with_space() {
            if let Some(c) = text.chars().next().filter(|&c| is_horizontal_space(c)) {
                text = &text[c.len_utf8()..];
            }
        }

        let Some(group) = self.pending.take() else {
            out.push_text(text);
            return;
        };

        match find_letter(text) {
            Some(letter) => {
                out.push_text(&text[..letter.byte_offset]);
                out.push_marker(letter.grapheme, group);
                out.push_text(&text[letter.end()..]);
            }
            None => {
                out.push_text(text);
                self.pending = Some(group);
            }
        }
    }
}
