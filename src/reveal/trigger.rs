//! Forward-edge cue triggering.
//!
//! A cue fires when the reveal's raw offset moves from below its end
//! boundary to at or past it. The very first sample of a session only
//! records the starting offset, so opening a chapter never fires cues that
//! sit before the starting point.

use std::collections::BTreeSet;

use crate::cue::Cue;
use crate::event::{CueFired, EffectSink, LogLevel, emit_log};

use super::options::FirePolicy;

/// Cues already dispatched in a session, keyed by `raw_start`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FiredCueSet {
    starts: BTreeSet<usize>,
}

impl FiredCueSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, cue: &Cue) -> bool {
        self.starts.contains(&cue.raw_start)
    }

    /// Record a cue; returns `false` if it was already present.
    pub fn insert(&mut self, cue: &Cue) -> bool {
        self.starts.insert(cue.raw_start)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// `raw_start` of every fired cue, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.starts.iter().copied()
    }

    fn clear(&mut self) {
        self.starts.clear();
    }
}

/// Stateful dispatcher that fires cues on forward boundary crossings.
#[derive(Clone, Debug, Default)]
pub struct CueTriggerTracker {
    prev_raw: Option<usize>,
    fired: FiredCueSet,
    /// Cues re-armed by a backward move under `EveryForwardCrossing`.
    rearmed: BTreeSet<usize>,
}

impl CueTriggerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw offset of the previous sample, `None` before the first one.
    #[must_use]
    pub fn prev_raw(&self) -> Option<usize> {
        self.prev_raw
    }

    #[must_use]
    pub fn fired(&self) -> &FiredCueSet {
        &self.fired
    }

    /// Forget the previous offset and every fired cue.
    pub fn reset(&mut self) {
        self.prev_raw = None;
        self.fired.clear();
        self.rearmed.clear();
    }

    /// Process a new target offset, firing crossed cues in ascending order.
    ///
    /// `cues` must be ordered by `raw_start` and non-overlapping (as the
    /// parser produces them), which also orders them by `raw_end`.
    /// Returns the number of cues fired.
    pub fn advance<S>(
        &mut self,
        target_raw: usize,
        cues: &[Cue],
        policy: FirePolicy,
        sink: &mut S,
    ) -> usize
    where
        S: EffectSink + ?Sized,
    {
        let Some(prev_raw) = self.prev_raw.replace(target_raw) else {
            return 0;
        };

        if target_raw < prev_raw {
            if policy == FirePolicy::EveryForwardCrossing {
                let first = cues.partition_point(|c| c.raw_end <= target_raw);
                let last = cues.partition_point(|c| c.raw_end <= prev_raw);
                self.rearmed.extend(cues[first..last].iter().map(|c| c.raw_start));
            }
            return 0;
        }

        let first = cues.partition_point(|c| c.raw_end <= prev_raw);
        let mut count = 0;
        for cue in cues[first..].iter().take_while(|c| c.raw_end <= target_raw) {
            let armed = self.rearmed.remove(&cue.raw_start) || !self.fired.contains(cue);
            if !armed {
                continue;
            }
            self.fired.insert(cue);
            emit_log(
                LogLevel::Info,
                &format!(
                    "cue fired: {}/{} at {}..{}",
                    cue.cue_type, cue.effect, cue.raw_start, cue.raw_end
                ),
            );
            sink.fire(CueFired::from(cue));
            count += 1;
        }
        count
    }
}
