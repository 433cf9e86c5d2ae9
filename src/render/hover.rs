//! Hit testing for cue markers and pointer hover dispatch.
//!
//! Positions are cell coordinates: a source line index and a display column
//! within the rendered line.

use std::ops::Range;

use crate::cue::{Cue, CueGroup};
use crate::unicode::{WidthMethod, display_width};

use super::anchor::{Fragment, RenderedLine};

/// Pointer location over the rendered text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerPosition {
    pub line: usize,
    pub column: usize,
}

impl PointerPosition {
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Screen area covered by one marker glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerRegion {
    pub line: usize,
    pub columns: Range<usize>,
    /// Marker id, an index into the map's groups.
    pub id: usize,
}

/// Maps pointer positions to the cue group of the marker under them.
#[derive(Clone, Debug, Default)]
pub struct HoverMap {
    regions: Vec<MarkerRegion>,
    groups: Vec<CueGroup>,
}

impl HoverMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect marker regions from rendered lines.
    #[must_use]
    pub fn build(lines: &[RenderedLine], method: WidthMethod) -> Self {
        let mut map = Self::new();
        for line in lines {
            map.register_line(line, method);
        }
        map
    }

    /// Add the markers of one rendered line.
    pub fn register_line(&mut self, line: &RenderedLine, method: WidthMethod) {
        let mut column = 0usize;
        for fragment in &line.fragments {
            let width = display_width(fragment.text(), method);
            if let Fragment::Marker(marker) = fragment {
                let id = self.groups.len();
                self.groups.push(marker.group.clone());
                self.regions.push(MarkerRegion {
                    line: line.line,
                    columns: column..column + width.max(1),
                    id,
                });
            }
            column += width;
        }
    }

    /// Clear all marker regions.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.groups.clear();
    }

    #[must_use]
    pub fn regions(&self) -> &[MarkerRegion] {
        &self.regions
    }

    /// Test which marker is at a position.
    #[must_use]
    pub fn test(&self, pos: PointerPosition) -> Option<usize> {
        self.regions
            .iter()
            .find(|r| r.line == pos.line && r.columns.contains(&pos.column))
            .map(|r| r.id)
    }

    #[must_use]
    pub fn group(&self, id: usize) -> Option<&CueGroup> {
        self.groups.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Host side of the hover contract (a tooltip, typically).
pub trait HoverHandler {
    /// Pointer entered or moved over a marker.
    fn on_cue_hover(&mut self, cues: &[Cue], pointer: PointerPosition);
    /// Pointer left the marker it was over.
    fn on_cue_leave(&mut self);
}

/// Turns raw pointer movement into hover/leave callbacks.
#[derive(Debug)]
pub struct HoverTracker<H> {
    handler: H,
    active: Option<usize>,
}

impl<H: HoverHandler> HoverTracker<H> {
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            active: None,
        }
    }

    /// Marker currently under the pointer.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Handle a pointer move over the text.
    pub fn pointer_move(&mut self, map: &HoverMap, pos: PointerPosition) {
        let hit = map.test(pos);
        if self.active.is_some() && self.active != hit {
            self.handler.on_cue_leave();
            self.active = None;
        }
        if let Some(id) = hit {
            if let Some(group) = map.group(id) {
                self.handler.on_cue_hover(group.cues(), pos);
                self.active = Some(id);
            }
        }
    }

    /// Handle the pointer leaving the text area.
    pub fn pointer_leave(&mut self) {
        if self.active.take().is_some() {
            self.handler.on_cue_leave();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::AnchorRenderer;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl HoverHandler for Recorder {
        fn on_cue_hover(&mut self, cues: &[Cue], pointer: PointerPosition) {
            let effects: Vec<_> = cues.iter().map(|c| c.effect.as_str()).collect();
            self.events
                .push(format!("hover {} @{}", effects.join("+"), pointer.column));
        }

        fn on_cue_leave(&mut self) {
            self.events.push("leave".to_string());
        }
    }

    fn rendered(text: &str) -> Vec<RenderedLine> {
        let mut renderer = AnchorRenderer::new();
        vec![renderer.render_line(0, 0, text, false)]
    }

    #[test]
    fn test_regions_follow_display_columns() {
        let lines = rendered("語 [cue:vfx|x]abc [cue:sound|y]d");
        let map = HoverMap::build(&lines, WidthMethod::WcWidth);
        let columns: Vec<_> = map.regions().iter().map(|r| r.columns.clone()).collect();
        // "語 " is three columns wide
        assert_eq!(columns, vec![3..4, 7..8]);
        assert_eq!(map.test(PointerPosition::new(0, 3)), Some(0));
        assert_eq!(map.test(PointerPosition::new(0, 4)), None);
        assert_eq!(map.test(PointerPosition::new(1, 3)), None);
    }

    #[test]
    fn test_tracker_enter_move_leave() {
        let lines = rendered("a[cue:vfx|x][cue:sound|y]b c[cue:image|z]d");
        let map = HoverMap::build(&lines, WidthMethod::WcWidth);
        let mut tracker = HoverTracker::new(Recorder::default());

        tracker.pointer_move(&map, PointerPosition::new(0, 0));
        tracker.pointer_move(&map, PointerPosition::new(0, 1));
        tracker.pointer_move(&map, PointerPosition::new(0, 1));
        tracker.pointer_move(&map, PointerPosition::new(0, 4));
        tracker.pointer_move(&map, PointerPosition::new(0, 2));
        tracker.pointer_leave();

        assert_eq!(
            tracker.into_handler().events,
            vec![
                "hover x+y @1",
                "hover x+y @1",
                "leave",
                "hover z @4",
                "leave",
            ]
        );
    }

    #[test]
    fn test_leave_without_hover_is_silent() {
        let mut tracker = HoverTracker::new(Recorder::default());
        tracker.pointer_leave();
        assert!(tracker.handler().events.is_empty());
        assert!(tracker.active().is_none());
    }

    #[test]
    fn test_clear() {
        let mut map = HoverMap::build(&rendered("[cue:vfx|x]a"), WidthMethod::WcWidth);
        assert_eq!(map.len(), 1);
        map.clear();
        assert!(map.is_empty());
        assert!(map.group(0).is_none());
    }
}
