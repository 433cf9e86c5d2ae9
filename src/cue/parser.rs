//! Finite-state scanner for `[cue:...]` markup.
//!
//! The scanner walks the text one char at a time. A candidate cue is
//! abandoned, and its text stays literal prose, when:
//!
//! - the `TYPE` segment closes with `]` (no effect),
//! - the trimmed `TYPE` or `EFFECT` is empty,
//! - a line break appears before the closing `]`,
//! - a `[` appears before the closing `]` (the new bracket is re-scanned as a
//!   possible cue opening),
//! - the text ends before the closing `]`.

use super::{Cue, CueParams, CueType};

const OPENING: [char; 5] = ['[', 'c', 'u', 'e', ':'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Text,
    /// Matched this many chars of `[cue:`.
    Opening(usize),
    Type,
    Effect,
    Param,
}

/// Outcome of feeding one char.
enum Step {
    Consumed,
    /// Candidate dropped; feed the same char again from `Text`.
    Rescan,
}

/// Incremental cue scanner over a single string.
///
/// Offsets are char offsets into the scanned string.
#[derive(Debug)]
pub struct CueScanner<'a> {
    text: &'a str,
    state: State,
    start_char: usize,
    start_byte: usize,
    type_buf: String,
    effect_buf: String,
    param_buf: String,
    params: CueParams,
}

impl<'a> CueScanner<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            state: State::Text,
            start_char: 0,
            start_byte: 0,
            type_buf: String::new(),
            effect_buf: String::new(),
            param_buf: String::new(),
            params: CueParams::new(),
        }
    }

    /// Scan the whole string, returning cues ordered by `raw_start`.
    #[must_use]
    pub fn scan(mut self) -> Vec<Cue> {
        let mut cues = Vec::new();
        let text = self.text;
        for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
            loop {
                match self.feed(char_idx, byte_idx, ch, &mut cues) {
                    Step::Consumed => break,
                    Step::Rescan => self.reset(),
                }
            }
        }
        cues
    }

    fn feed(&mut self, char_idx: usize, byte_idx: usize, ch: char, out: &mut Vec<Cue>) -> Step {
        match self.state {
            State::Text => {
                if ch == '[' {
                    self.start_char = char_idx;
                    self.start_byte = byte_idx;
                    self.state = State::Opening(1);
                }
                Step::Consumed
            }
            State::Opening(matched) => {
                if ch != OPENING[matched] {
                    return Step::Rescan;
                }
                self.state = if matched + 1 == OPENING.len() {
                    State::Type
                } else {
                    State::Opening(matched + 1)
                };
                Step::Consumed
            }
            State::Type => match ch {
                '|' => {
                    self.state = State::Effect;
                    Step::Consumed
                }
                ']' | '\n' => {
                    self.reset();
                    Step::Consumed
                }
                '[' => Step::Rescan,
                c => {
                    self.type_buf.push(c);
                    Step::Consumed
                }
            },
            State::Effect | State::Param => match ch {
                '|' => {
                    self.commit_segment();
                    self.state = State::Param;
                    Step::Consumed
                }
                ']' => {
                    self.commit_segment();
                    let end_byte = byte_idx + ch.len_utf8();
                    if let Some(cue) = self.finish(char_idx + 1, end_byte) {
                        out.push(cue);
                    }
                    self.reset();
                    Step::Consumed
                }
                '\n' => {
                    self.reset();
                    Step::Consumed
                }
                '[' => Step::Rescan,
                c => {
                    if self.state == State::Effect {
                        self.effect_buf.push(c);
                    } else {
                        self.param_buf.push(c);
                    }
                    Step::Consumed
                }
            },
        }
    }

    /// Close the segment currently being read. Parameter segments without
    /// `=` or with an empty key are ignored.
    fn commit_segment(&mut self) {
        if self.state != State::Param {
            return;
        }
        if let Some((key, value)) = self.param_buf.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                self.params.insert(key, value.trim());
            }
        }
        self.param_buf.clear();
    }

    fn finish(&mut self, end_char: usize, end_byte: usize) -> Option<Cue> {
        let effect = self.effect_buf.trim();
        if effect.is_empty() || self.type_buf.trim().is_empty() {
            return None;
        }
        Some(Cue {
            cue_type: CueType::from_raw(&self.type_buf),
            effect: effect.to_string(),
            params: std::mem::take(&mut self.params),
            raw_start: self.start_char,
            raw_end: end_char,
            original_text: self.text[self.start_byte..end_byte].to_string(),
        })
    }

    fn reset(&mut self) {
        self.state = State::Text;
        self.type_buf.clear();
        self.effect_buf.clear();
        self.param_buf.clear();
        self.params = CueParams::new();
    }
}

/// Parse every well-formed cue in `text`.
#[must_use]
pub fn parse_cues(text: &str) -> Vec<Cue> {
    CueScanner::new(text).scan()
}
