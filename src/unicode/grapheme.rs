//! Grapheme-aware letter search.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over extended grapheme clusters in a string.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Check whether a character counts as a letter for anchoring.
///
/// Any Unicode alphabetic character qualifies, so accented Latin, Greek,
/// Cyrillic and CJK ideographs all anchor markers.
#[inline]
#[must_use]
pub fn is_letter(c: char) -> bool {
    c.is_alphabetic()
}

/// Location of the first letter grapheme found in a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterMatch<'a> {
    /// Byte offset of the grapheme within the searched string.
    pub byte_offset: usize,
    /// The full grapheme cluster (base letter plus combining marks).
    pub grapheme: &'a str,
}

impl LetterMatch<'_> {
    /// Byte offset just past the grapheme.
    #[must_use]
    pub fn end(&self) -> usize {
        self.byte_offset + self.grapheme.len()
    }
}

/// Find the first grapheme cluster whose base character is a letter.
#[must_use]
pub fn find_letter(s: &str) -> Option<LetterMatch<'_>> {
    s.grapheme_indices(true).find_map(|(byte_offset, grapheme)| {
        grapheme
            .chars()
            .next()
            .filter(|&c| is_letter(c))
            .map(|_| LetterMatch {
                byte_offset,
                grapheme,
            })
    })
}
