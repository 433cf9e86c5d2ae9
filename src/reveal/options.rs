//! Reveal configuration.

use crate::error::{Error, Result};

/// Default number of lines kept in the reveal window.
pub const DEFAULT_WINDOW_LINES: usize = 5;

/// When a cue may fire again after its first dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FirePolicy {
    /// At most once per session, however often the boundary is recrossed.
    #[default]
    OncePerSession,
    /// Re-arm a cue whenever the reveal retreats below its end boundary, so
    /// every forward crossing fires.
    EveryForwardCrossing,
}

/// Options for a reveal engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealOptions {
    /// Lines in the visible window, ending at the target line.
    pub window_lines: usize,
    pub fire_policy: FirePolicy,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            window_lines: DEFAULT_WINDOW_LINES,
            fire_policy: FirePolicy::OncePerSession,
        }
    }
}

impl RevealOptions {
    #[must_use]
    pub fn with_window_lines(mut self, window_lines: usize) -> Self {
        self.window_lines = window_lines;
        self
    }

    #[must_use]
    pub fn with_fire_policy(mut self, fire_policy: FirePolicy) -> Self {
        self.fire_policy = fire_policy;
        self
    }

    /// Reject options the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.window_lines == 0 {
            return Err(Error::InvalidOptions {
                reason: "window_lines must be at least 1",
            });
        }
        Ok(())
    }
}
