//! Raw offset to `(line, char)` lookup.

use super::content::RawText;

/// Line-start raw offsets of a text, precomputed once per load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    /// Raw offset of each line start; non-decreasing, `starts[0] == 0`.
    starts: Vec<usize>,
    /// Line lengths in chars, line break excluded.
    lengths: Vec<usize>,
    total_raw: usize,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: &RawText) -> Self {
        let count = text.len_lines();
        let mut starts = Vec::with_capacity(count);
        let mut lengths = Vec::with_capacity(count);
        for idx in 0..count {
            starts.push(text.line_to_char(idx));
            lengths.push(text.line_len(idx));
        }
        Self {
            starts,
            lengths,
            total_raw: text.len_chars(),
        }
    }

    /// Number of lines (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        self.starts.get(line).copied().unwrap_or(self.total_raw)
    }

    #[must_use]
    pub fn line_len(&self, line: usize) -> usize {
        self.lengths.get(line).copied().unwrap_or(0)
    }

    /// Resolve a raw offset to its line and char-in-line.
    ///
    /// The char is clamped to the line length, so the offset of a line
    /// break resolves to the end of its line. Offsets past the text clamp
    /// to the end of the last line.
    #[must_use]
    pub fn raw_to_line_char(&self, raw: usize) -> (usize, usize) {
        if self.starts.is_empty() {
            return (0, 0);
        }
        let raw = raw.min(self.total_raw);
        let line = self.starts.partition_point(|&start| start <= raw).saturating_sub(1);
        let ch = (raw - self.starts[line]).min(self.lengths[line]);
        (line, ch)
    }

    /// Inverse of [`raw_to_line_char`](Self::raw_to_line_char), clamped.
    #[must_use]
    pub fn line_char_to_raw(&self, line: usize, ch: usize) -> usize {
        match self.starts.get(line) {
            Some(&start) => start + ch.min(self.lengths[line]),
            None => self.total_raw,
        }
    }
}
