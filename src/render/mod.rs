//! Cue-free line rendering with hover markers.
//!
//! Revealed line slices still contain cue markup. The renderer removes it,
//! tidies the surrounding text and attaches each cue group to the next
//! letter glyph, carrying a group over to the following line when its own
//! line has no letter left.
//!
//! Key types:
//!
//! - [`AnchorRenderer`]: per-line rendering with carry-over
//! - [`RenderedLine`] / [`Fragment`]: the output handed to the host
//! - [`HoverMap`] / [`HoverTracker`]: pointer hit testing over markers

mod anchor;
mod hover;
mod sanitize;

pub use anchor::{AnchorRenderer, Fragment, Marker, RenderedLine};
pub use hover::{HoverHandler, HoverMap, HoverTracker, MarkerRegion, PointerPosition};
pub use sanitize::{sanitize_fragment, strip_partial_opening};
