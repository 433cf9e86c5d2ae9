//! Grouping of adjacent cues.
//!
//! Cues separated only by whitespace form one [`CueGroup`]; a group shares a
//! single hover marker. Groups partition the cue list.

use std::ops::Range;

use super::Cue;

/// Maximal run of cues with nothing but whitespace between them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CueGroup {
    cues: Vec<Cue>,
}

impl CueGroup {
    /// Start a group with a single cue.
    #[must_use]
    pub fn new(cue: Cue) -> Self {
        Self { cues: vec![cue] }
    }

    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    #[must_use]
    pub fn into_cues(self) -> Vec<Cue> {
        self.cues
    }

    /// Raw offset where the first cue opens.
    #[must_use]
    pub fn raw_start(&self) -> usize {
        self.cues.first().map_or(0, |c| c.raw_start)
    }

    /// Raw offset just past the last cue.
    #[must_use]
    pub fn raw_end(&self) -> usize {
        self.cues.last().map_or(0, |c| c.raw_end)
    }

    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.raw_start()..self.raw_end()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Copy of this group with every cue moved by `delta` chars.
    #[must_use]
    pub fn shifted(&self, delta: usize) -> Self {
        Self {
            cues: self.cues.iter().map(|c| c.shifted(delta)).collect(),
        }
    }

    pub(crate) fn push(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    /// Append every cue of `other`, keeping order.
    pub(crate) fn absorb(&mut self, other: Self) {
        self.cues.extend(other.cues);
    }
}

/// Group `cues` (ordered by `raw_start`, offsets into `text`).
///
/// Walks `text` once, so grouping a whole chapter is linear.
#[must_use]
pub fn group_cues(text: &str, cues: Vec<Cue>) -> Vec<CueGroup> {
    let mut groups: Vec<CueGroup> = Vec::new();
    let mut chars = text.chars();
    let mut pos = 0usize;

    for cue in cues {
        if let Some(group) = groups.last_mut() {
            let gap_start = group.raw_end();
            if cue.raw_start >= gap_start
                && gap_is_blank(&mut chars, &mut pos, gap_start, cue.raw_start)
            {
                group.push(cue);
                continue;
            }
        }
        groups.push(CueGroup::new(cue));
    }

    groups
}

/// Check that `text[from..to]` (char offsets) is all whitespace, advancing
/// the shared cursor to `to`.
fn gap_is_blank(chars: &mut std::str::Chars<'_>, pos: &mut usize, from: usize, to: usize) -> bool {
    if from > *pos {
        let skip = from - *pos;
        if chars.nth(skip - 1).is_none() {
            return false;
        }
        *pos = from;
    }
    let mut blank = true;
    while *pos < to {
        match chars.next() {
            Some(c) => blank &= c.is_whitespace(),
            None => return false,
        }
        *pos += 1;
    }
    blank
}
