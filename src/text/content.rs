//! Rope-backed chapter content.
//!
//! [`RawText`] is immutable once built; a content reload builds a new one.
//! Line breaks are LF only, so sources are passed through
//! [`normalize_content`] before they reach the rope.

use std::borrow::Cow;
use std::fs;
use std::ops::Range;
use std::path::Path;

use ropey::{Rope, RopeSlice};

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};

/// Normalize chapter source for the engine.
///
/// - `\r\n` and lone `\r` become `\n`;
/// - the two-char escape `\n` (backslash, `n`) becomes a real line break,
///   which is how chapters stored as JSON-escaped strings arrive.
///
/// Returns the input unchanged (borrowed) when nothing needs rewriting.
#[must_use]
pub fn normalize_content(source: &str) -> Cow<'_, str> {
    if !source.contains('\r') && !source.contains("\\n") {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\\' if chars.peek() == Some(&'n') => {
                chars.next();
                out.push('\n');
            }
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Immutable chapter text with O(log n) line and char access.
#[derive(Clone, Debug, Default)]
pub struct RawText {
    rope: Rope,
}

impl RawText {
    /// Build from already-normalized text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Build from unnormalized source text.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        Self::new(&normalize_content(source))
    }

    /// Read and normalize a chapter file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let source = String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;
        let text = Self::from_source(&source);
        emit_log(
            LogLevel::Debug,
            &format!(
                "read {} ({} chars, {} lines)",
                path.display(),
                text.len_chars(),
                text.len_lines()
            ),
        );
        Ok(text)
    }

    /// Total length in chars (the raw length).
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of lines; a trailing line break starts one more (empty) line.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// A line's content without its line break.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<RopeSlice<'_>> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            Some(line.slice(..len - 1))
        } else {
            Some(line)
        }
    }

    /// Length of a line in chars, line break excluded. Zero past the end.
    #[must_use]
    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map_or(0, |l| l.len_chars())
    }

    /// First `chars` chars of a line as an owned string.
    #[must_use]
    pub fn line_prefix(&self, idx: usize, chars: usize) -> String {
        self.line(idx).map_or_else(String::new, |line| {
            let end = chars.min(line.len_chars());
            line.slice(..end).to_string()
        })
    }

    /// Char index where a line starts; the text length past the end.
    #[must_use]
    pub fn line_to_char(&self, idx: usize) -> usize {
        if idx >= self.rope.len_lines() {
            self.rope.len_chars()
        } else {
            self.rope.line_to_char(idx)
        }
    }

    /// Owned copy of a char range, clamped to the text.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    #[must_use]
    pub fn rope(&self) -> &Rope {
        &self.rope
    }
}

impl std::fmt::Display for RawText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
