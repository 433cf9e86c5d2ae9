//! Cue-fired events and the log callback hook.
//!
//! Effects are not invoked by the engine directly. Each forward crossing of a
//! cue boundary produces a [`CueFired`] event handed to an [`EffectSink`];
//! the sink (an effect renderer, a queue, a test collector) owns everything
//! that happens afterwards, including the effect's duration and cancellation.

use std::sync::{Mutex, OnceLock};

use crate::cue::{Cue, CueParams, CueType};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log event. No-op when no callback is installed.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

/// Event emitted when the reveal crosses a cue's end boundary going forward.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CueFired {
    pub cue_type: CueType,
    pub effect: String,
    pub params: CueParams,
    /// Raw offset of the cue's opening bracket; identifies the cue in a session.
    pub raw_start: usize,
    pub raw_end: usize,
}

impl From<&Cue> for CueFired {
    fn from(cue: &Cue) -> Self {
        Self {
            cue_type: cue.cue_type.clone(),
            effect: cue.effect.clone(),
            params: cue.params.clone(),
            raw_start: cue.raw_start,
            raw_end: cue.raw_end,
        }
    }
}

/// Consumer of cue-fired events (the effect renderer side).
///
/// Dispatch is fire-and-forget: the engine never waits on the sink.
pub trait EffectSink {
    fn fire(&mut self, event: CueFired);
}

impl<F> EffectSink for F
where
    F: FnMut(CueFired),
{
    fn fire(&mut self, event: CueFired) {
        self(event);
    }
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn fire(&mut self, _event: CueFired) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::parse_cues;

    #[test]
    fn test_log_callback() {
        set_log_callback(|level, msg| {
            if msg == "hello" {
                assert_eq!(level, LogLevel::Info);
            }
        });
        emit_log(LogLevel::Info, "hello");
        clear_log_callback();
        emit_log(LogLevel::Info, "dropped");
    }

    #[test]
    fn test_closure_sink_receives_event() {
        let cues = parse_cues("Lluvia[cue:vfx|rain|intensity=high]");
        let mut seen = Vec::new();
        let mut sink = |event: CueFired| seen.push(event);
        sink.fire(CueFired::from(&cues[0]));

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].cue_type, CueType::Vfx);
        assert_eq!(seen[0].effect, "rain");
        assert_eq!(seen[0].params.get("intensity"), Some("high"));
        assert_eq!(seen[0].raw_start, 6);
    }

    #[test]
    fn test_null_sink() {
        let cues = parse_cues("[cue:sound|thunder]");
        NullSink.fire(CueFired::from(&cues[0]));
    }
}
