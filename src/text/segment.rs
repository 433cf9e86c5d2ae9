//! Visible/raw coordinate projection.
//!
//! Cue spans are merged into maximal covered ranges; everything between them
//! is a [`NonCueSegment`]. Each segment records the number of visible chars
//! before it, so a visible offset resolves to a raw one with a binary search.

use std::ops::Range;

/// A maximal raw range not covered by cue markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NonCueSegment {
    pub raw_start: usize,
    pub raw_end: usize,
    /// Visible chars in all earlier segments.
    pub visible_prefix: usize,
}

impl NonCueSegment {
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw_end - self.raw_start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_start >= self.raw_end
    }

    /// Check if a raw offset lies in this segment.
    #[must_use]
    pub fn contains_raw(&self, raw: usize) -> bool {
        (self.raw_start..self.raw_end).contains(&raw)
    }

    /// Visible range covered by this segment.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.visible_prefix..self.visible_prefix + self.len()
    }
}

/// Merge overlapping or touching ranges into maximal ranges, sorted.
#[must_use]
pub fn merge_spans<I>(spans: I) -> Vec<Range<usize>>
where
    I: IntoIterator<Item = Range<usize>>,
{
    let mut spans: Vec<_> = spans.into_iter().filter(|r| r.start < r.end).collect();
    spans.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Projection between visible and raw offsets for one text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentMap {
    segments: Vec<NonCueSegment>,
    total_visible: usize,
    total_raw: usize,
}

impl SegmentMap {
    /// Build the map for a text of `total_raw` chars with the given cue spans.
    ///
    /// Spans may overlap or touch and need not be sorted. Text without any
    /// visible char gets a single empty segment at its end.
    #[must_use]
    pub fn new<I>(total_raw: usize, cue_spans: I) -> Self
    where
        I: IntoIterator<Item = Range<usize>>,
    {
        let merged = merge_spans(
            cue_spans
                .into_iter()
                .map(|r| r.start.min(total_raw)..r.end.min(total_raw)),
        );

        let mut segments = Vec::with_capacity(merged.len() + 1);
        let mut visible = 0usize;
        let mut cursor = 0usize;
        for span in merged.into_iter().chain(std::iter::once(total_raw..total_raw)) {
            if span.start > cursor {
                segments.push(NonCueSegment {
                    raw_start: cursor,
                    raw_end: span.start,
                    visible_prefix: visible,
                });
                visible += span.start - cursor;
            }
            cursor = cursor.max(span.end);
        }

        if segments.is_empty() {
            segments.push(NonCueSegment {
                raw_start: total_raw,
                raw_end: total_raw,
                visible_prefix: 0,
            });
        }

        Self {
            segments,
            total_visible: visible,
            total_raw,
        }
    }

    /// Identity map for text without cues.
    #[must_use]
    pub fn identity(total_raw: usize) -> Self {
        Self::new(total_raw, std::iter::empty())
    }

    #[must_use]
    pub fn segments(&self) -> &[NonCueSegment] {
        &self.segments
    }

    #[must_use]
    pub fn total_visible(&self) -> usize {
        self.total_visible
    }

    #[must_use]
    pub fn total_raw(&self) -> usize {
        self.total_raw
    }

    /// Map a visible offset to its raw offset.
    ///
    /// Offsets at or past the visible length clamp to the end of the text,
    /// so trailing markup counts as revealed once everything visible is.
    #[must_use]
    pub fn visible_to_raw(&self, visible: usize) -> usize {
        if visible >= self.total_visible {
            return self.total_raw;
        }
        let idx = self
            .segments
            .partition_point(|s| s.visible_prefix + s.len() <= visible);
        let Some(segment) = self.segments.get(idx) else {
            return self.total_raw;
        };
        (segment.raw_start + (visible - segment.visible_prefix))
            .clamp(segment.raw_start, segment.raw_end)
    }

    /// Map a raw offset to the number of visible chars before it.
    ///
    /// Offsets inside cue markup map to the visible offset right after the
    /// preceding visible text.
    #[must_use]
    pub fn raw_to_visible(&self, raw: usize) -> usize {
        let idx = self.segments.partition_point(|s| s.raw_end <= raw);
        match self.segments.get(idx) {
            Some(segment) if segment.raw_start <= raw => {
                segment.visible_prefix + (raw - segment.raw_start)
            }
            Some(segment) => segment.visible_prefix,
            None => self.total_visible,
        }
    }

    /// Check if a raw offset is visible text (outside every cue span).
    #[must_use]
    pub fn is_visible(&self, raw: usize) -> bool {
        let idx = self.segments.partition_point(|s| s.raw_end <= raw);
        self.segments.get(idx).is_some_and(|s| s.contains_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_spans() {
        let merged = merge_spans(vec![5..8, 0..2, 2..3, 7..10, 12..12]);
        assert_eq!(merged, vec![0..3, 5..10]);
    }

    #[test]
    fn test_identity_without_cues() {
        let map = SegmentMap::identity(12);
        assert_eq!(map.total_visible(), 12);
        assert_eq!(map.segments().len(), 1);
        for v in 0..=12 {
            assert_eq!(map.visible_to_raw(v), v);
            assert_eq!(map.raw_to_visible(v), v);
        }
    }

    #[test]
    fn test_segments_skip_cues() {
        // "ab[cue..]cd" with the cue at 2..9
        let map = SegmentMap::new(11, vec![2..9]);
        assert_eq!(
            map.segments(),
            &[
                NonCueSegment {
                    raw_start: 0,
                    raw_end: 2,
                    visible_prefix: 0
                },
                NonCueSegment {
                    raw_start: 9,
                    raw_end: 11,
                    visible_prefix: 2
                },
            ]
        );
        assert_eq!(map.total_visible(), 4);
        assert_eq!(map.visible_to_raw(1), 1);
        assert_eq!(map.visible_to_raw(2), 9);
        assert_eq!(map.visible_to_raw(3), 10);
        assert_eq!(map.visible_to_raw(4), 11);
        assert_eq!(map.visible_to_raw(400), 11);
    }

    #[test]
    fn test_raw_to_visible_inside_cue() {
        let map = SegmentMap::new(11, vec![2..9]);
        assert_eq!(map.raw_to_visible(2), 2);
        assert_eq!(map.raw_to_visible(5), 2);
        assert_eq!(map.raw_to_visible(9), 2);
        assert_eq!(map.raw_to_visible(10), 3);
        assert_eq!(map.raw_to_visible(11), 4);
        assert!(!map.is_visible(5));
        assert!(map.is_visible(10));
    }

    #[test]
    fn test_leading_and_trailing_cues() {
        let map = SegmentMap::new(10, vec![0..3, 7..10]);
        assert_eq!(map.segments().len(), 1);
        assert_eq!(map.total_visible(), 4);
        assert_eq!(map.visible_to_raw(0), 3);
        assert_eq!(map.visible_to_raw(3), 6);
        // Everything visible revealed: trailing cue included
        assert_eq!(map.visible_to_raw(4), 10);
    }

    #[test]
    fn test_adjacent_spans_merge() {
        let map = SegmentMap::new(20, vec![4..8, 8..12]);
        assert_eq!(map.segments().len(), 2);
        assert_eq!(map.visible_to_raw(4), 12);
    }

    #[test]
    fn test_empty_text_degenerate_segment() {
        let map = SegmentMap::identity(0);
        assert_eq!(map.segments().len(), 1);
        assert!(map.segments()[0].is_empty());
        assert_eq!(map.total_visible(), 0);
        assert_eq!(map.visible_to_raw(0), 0);
        assert_eq!(map.raw_to_visible(0), 0);
    }

    #[test]
    fn test_all_markup_text() {
        let map = SegmentMap::new(9, vec![0..9]);
        assert_eq!(map.total_visible(), 0);
        assert_eq!(map.visible_to_raw(0), 9);
        assert_eq!(map.raw_to_visible(4), 0);
    }

    #[test]
    fn test_visible_lengths_sum() {
        let map = SegmentMap::new(30, vec![3..5, 10..15, 14..20, 28..30]);
        let sum: usize = map.segments().iter().map(NonCueSegment::len).sum();
        assert_eq!(sum, map.total_visible());
        assert_eq!(sum, 30 - 2 - 10 - 2);
    }
}
