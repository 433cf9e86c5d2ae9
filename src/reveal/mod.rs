//! Progress-driven reveal: controller, cue triggering and session state.
//!
//! A [`RevealEngine`] is built once per chapter load and is immutable. Each
//! progress sample runs to completion in three steps:
//!
//! 1. [`RevealEngine::reveal`] maps progress to a [`RevealState`] (pure);
//! 2. the [`CueTriggerTracker`] in the [`SessionState`] fires cues whose end
//!    boundary was crossed going forward;
//! 3. [`RevealEngine::render`] builds the cue-free rendered lines with their
//!    hover markers.
//!
//! [`ReaderSession`] bundles an engine with its state for hosts that do not
//! need to manage the state themselves.
//!
//! # Examples
//!
//! ```
//! use scrollcue::{CueFired, ReaderSession, RevealOptions};
//!
//! let mut session = ReaderSession::new(RevealOptions::default()).unwrap();
//! session.load("El viento soplaba.[cue:vfx|breeze|duration=5] Todo cambió.");
//!
//! let first = session.update(0.0);
//! assert!(first.fired.is_empty());
//!
//! let last = session.update(1.0);
//! assert_eq!(last.fired.len(), 1);
//! assert_eq!(last.fired[0].effect, "breeze");
//! assert_eq!(last.lines[0].plain_text(), "El viento soplaba. Todo cambió.");
//! ```

mod controller;
mod options;
mod session;
mod trigger;

pub use controller::{LineReveal, RevealEngine, RevealState};
pub use options::{DEFAULT_WINDOW_LINES, FirePolicy, RevealOptions};
pub use session::{ReaderSession, RevealFrame, SessionState};
pub use trigger::{CueTriggerTracker, FiredCueSet};
