//! Progress to reveal-position mapping.

use crate::cue::{Cue, CueGroup, group_cues, parse_cues};
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::render::AnchorRenderer;
use crate::text::{LineIndex, RawText, SegmentMap, normalize_content};

use super::options::RevealOptions;

/// How much of one line is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineReveal {
    pub line: usize,
    /// Raw chars of the line that are revealed.
    pub revealed_chars: usize,
    /// Raw length of the line, line break excluded.
    pub full_length: usize,
}

impl LineReveal {
    /// Check if only part of the line is revealed.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.revealed_chars < self.full_length
    }
}

/// Reveal position derived from one progress sample.
///
/// Recomputed on every update and never persisted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealState {
    /// Progress after clamping to `[0, 1]`.
    pub progress: f64,
    pub target_visible: usize,
    pub target_raw: usize,
    pub target_line: usize,
    pub target_char: usize,
    /// Window of lines ending at `target_line`, oldest first.
    pub window: Vec<LineReveal>,
    pub total_visible: usize,
    pub total_raw: usize,
}

impl RevealState {
    /// First line of the window.
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.window.first().map_or(self.target_line, |l| l.line)
    }

    /// Revealed share of the visible text, `0.0..=100.0`.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total_visible == 0 {
            return 0.0;
        }
        self.target_visible as f64 * 100.0 / self.total_visible as f64
    }
}

/// Immutable per-chapter reveal structures.
///
/// Built by [`load`](Self::load); a new chapter means a new engine.
#[derive(Clone, Debug)]
pub struct RevealEngine {
    text: RawText,
    cues: Vec<Cue>,
    groups: Vec<CueGroup>,
    segments: SegmentMap,
    lines: LineIndex,
    /// Group still waiting for an anchor when each line begins.
    carry_in: Vec<Option<CueGroup>>,
    options: RevealOptions,
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::build("", RevealOptions::default())
    }
}

impl RevealEngine {
    /// Build an engine for `source` with default options.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self::build(source, RevealOptions::default())
    }

    /// Build an engine for `source`.
    ///
    /// The source is newline-normalized first; malformed cue markup stays
    /// in the text as prose.
    pub fn load(source: &str, options: RevealOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(source, options))
    }

    /// Build from an already loaded text.
    pub fn from_text(text: RawText, options: RevealOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::assemble(text, options))
    }

    pub(crate) fn build(source: &str, options: RevealOptions) -> Self {
        let normalized = normalize_content(source);
        Self::assemble(RawText::new(&normalized), options)
    }

    fn assemble(text: RawText, options: RevealOptions) -> Self {
        let source = text.to_string();
        let cues = parse_cues(&source);
        let segments = SegmentMap::new(text.len_chars(), cues.iter().map(Cue::span));
        let groups = group_cues(&source, cues.clone());
        let lines = LineIndex::new(&text);
        let carry_in = compute_carry_in(&text, &lines);

        emit_log(
            LogLevel::Debug,
            &format!(
                "loaded chapter: {} raw chars, {} visible, {} cues in {} groups, {} lines",
                text.len_chars(),
                segments.total_visible(),
                cues.len(),
                groups.len(),
                lines.len()
            ),
        );

        Self {
            text,
            cues,
            groups,
            segments,
            lines,
            carry_in,
            options,
        }
    }

    #[must_use]
    pub fn text(&self) -> &RawText {
        &self.text
    }

    /// All cues, ordered by `raw_start`.
    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    #[must_use]
    pub fn groups(&self) -> &[CueGroup] {
        &self.groups
    }

    #[must_use]
    pub fn segments(&self) -> &SegmentMap {
        &self.segments
    }

    #[must_use]
    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Group carried into `line` from earlier lines, if any.
    #[must_use]
    pub fn carry_in(&self, line: usize) -> Option<&CueGroup> {
        self.carry_in.get(line).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    #[must_use]
    pub fn total_visible(&self) -> usize {
        self.segments.total_visible()
    }

    #[must_use]
    pub fn total_raw(&self) -> usize {
        self.segments.total_raw()
    }

    /// Map a progress sample to a reveal position.
    ///
    /// Pure: the same progress always yields the same state, in either
    /// scroll direction. Progress outside `[0, 1]` is clamped; NaN counts
    /// as `0`.
    #[must_use]
    pub fn reveal(&self, progress: f64) -> RevealState {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let total_visible = self.segments.total_visible();
        let target_visible =
            ((progress * total_visible as f64).floor() as usize).min(total_visible);
        let target_raw = self.segments.visible_to_raw(target_visible);
        let (target_line, target_char) = self.lines.raw_to_line_char(target_raw);

        let start_line = (target_line + 1).saturating_sub(self.options.window_lines);
        let window = (start_line..=target_line)
            .map(|line| {
                let full_length = self.lines.line_len(line);
                let revealed_chars = match line.cmp(&target_line) {
                    std::cmp::Ordering::Less => full_length,
                    std::cmp::Ordering::Equal => target_char,
                    std::cmp::Ordering::Greater => 0,
                };
                LineReveal {
                    line,
                    revealed_chars,
                    full_length,
                }
            })
            .collect();

        RevealState {
            progress,
            target_visible,
            target_raw,
            target_line,
            target_char,
            window,
            total_visible,
            total_raw: self.segments.total_raw(),
        }
    }

    /// A progress value whose reveal lands on the visible position of `raw`.
    ///
    /// Hosts use this to scroll to a cue or line.
    #[must_use]
    pub fn progress_for_raw(&self, raw: usize) -> f64 {
        let total = self.segments.total_visible();
        if total == 0 {
            return 0.0;
        }
        let visible = self.segments.raw_to_visible(raw);
        // Aim at the middle of the visible char so flooring lands on it
        ((visible as f64 + 0.5) / total as f64).min(1.0)
    }
}

/// Run the anchor pass over every full line, recording the group pending at
/// the start of each.
fn compute_carry_in(text: &RawText, lines: &LineIndex) -> Vec<Option<CueGroup>> {
    let mut renderer = AnchorRenderer::new();
    (0..lines.len())
        .map(|line| {
            let carried = renderer.pending().cloned();
            let slice = text.line_prefix(line, lines.line_len(line));
            renderer.render_line(line, lines.line_start(line), &slice, false);
            carried
        })
        .collect()
}
