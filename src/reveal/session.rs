//! Per-session mutable state and the one-call reader session.

use std::path::Path;

use crate::cue::CueGroup;
use crate::error::Result;
use crate::event::{CueFired, EffectSink};
use crate::render::{AnchorRenderer, RenderedLine};
use crate::text::RawText;

use super::controller::{RevealEngine, RevealState};
use super::options::RevealOptions;
use super::trigger::{CueTriggerTracker, FiredCueSet};

/// Everything that changes between progress samples of one reading session.
///
/// Owned by the host and passed to the engine explicitly; reset whenever new
/// content is loaded.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    trigger: CueTriggerTracker,
    pending_anchor: Option<CueGroup>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.trigger.reset();
        self.pending_anchor = None;
    }

    /// Raw offset of the previous sample, `None` before the first one.
    #[must_use]
    pub fn prev_raw(&self) -> Option<usize> {
        self.trigger.prev_raw()
    }

    #[must_use]
    pub fn fired(&self) -> &FiredCueSet {
        self.trigger.fired()
    }

    /// Group the last rendered frame left without an anchor letter.
    ///
    /// Output only: each render seeds its carry from the engine, so this
    /// never feeds back into the next frame. Hosts read it to know that
    /// cues near the reveal edge have no hover target yet.
    #[must_use]
    pub fn pending_anchor(&self) -> Option<&CueGroup> {
        self.pending_anchor.as_ref()
    }
}

impl RevealEngine {
    /// Process one progress sample: compute the reveal and fire every cue
    /// crossed since the previous sample.
    pub fn update<S>(&self, progress: f64, state: &mut SessionState, sink: &mut S) -> RevealState
    where
        S: EffectSink + ?Sized,
    {
        let reveal = self.reveal(progress);
        state
            .trigger
            .advance(reveal.target_raw, self.cues(), self.options().fire_policy, sink);
        reveal
    }

    /// Render the window of `reveal` as cue-free lines with hover markers.
    ///
    /// A group carried from lines above the window anchors inside it. A
    /// group still without a letter at the end is recorded in `state`.
    pub fn render(&self, reveal: &RevealState, state: &mut SessionState) -> Vec<RenderedLine> {
        let carried = self.carry_in(reveal.start_line()).cloned();
        let mut renderer = AnchorRenderer::with_pending(carried);
        let lines = reveal
            .window
            .iter()
            .map(|line| {
                let slice = self.text().line_prefix(line.line, line.revealed_chars);
                renderer.render_line(
                    line.line,
                    self.lines().line_start(line.line),
                    &slice,
                    line.is_partial(),
                )
            })
            .collect();
        state.pending_anchor = renderer.into_pending();
        lines
    }
}

/// Result of one [`ReaderSession::update`].
#[derive(Clone, Debug, PartialEq)]
pub struct RevealFrame {
    pub reveal: RevealState,
    pub lines: Vec<RenderedLine>,
    /// Cues fired by this sample, in text order.
    pub fired: Vec<CueFired>,
}

/// An engine and its session state behind one handle.
#[derive(Clone, Debug, Default)]
pub struct ReaderSession {
    engine: RevealEngine,
    state: SessionState,
}

impl ReaderSession {
    /// Create an empty session.
    pub fn new(options: RevealOptions) -> Result<Self> {
        Ok(Self {
            engine: RevealEngine::load("", options)?,
            state: SessionState::new(),
        })
    }

    /// Replace the content; triggering starts over.
    pub fn load(&mut self, source: &str) {
        let options = *self.engine.options();
        self.engine = RevealEngine::build(source, options);
        self.state.reset();
    }

    /// Replace the content with a chapter file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let text = RawText::load_file(path)?;
        let options = *self.engine.options();
        self.engine = RevealEngine::from_text(text, options)?;
        self.state.reset();
        Ok(())
    }

    /// Process a progress sample, collecting fired cues into the frame.
    pub fn update(&mut self, progress: f64) -> RevealFrame {
        let mut fired = Vec::new();
        let reveal = self.update_with(progress, &mut |event: CueFired| fired.push(event));
        let lines = self.engine.render(&reveal, &mut self.state);
        RevealFrame {
            reveal,
            lines,
            fired,
        }
    }

    /// Process a progress sample, sending fired cues to `sink`.
    pub fn update_with<S>(&mut self, progress: f64, sink: &mut S) -> RevealState
    where
        S: EffectSink + ?Sized,
    {
        self.engine.update(progress, &mut self.state, sink)
    }

    #[must_use]
    pub fn engine(&self) -> &RevealEngine {
        &self.engine
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// See [`RevealEngine::progress_for_raw`].
    #[must_use]
    pub fn progress_for_raw(&self, raw: usize) -> f64 {
        self.engine.progress_for_raw(raw)
    }
}
