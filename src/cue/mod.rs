//! Inline effect cues embedded in chapter prose.
//!
//! Authors place cues with the grammar
//!
//! ```text
//! [cue:TYPE|EFFECT|key=value|key=value]
//! ```
//!
//! `TYPE` is matched case-insensitively against `vfx`, `sound` and `image`
//! (`fx` is an alias for `vfx`); anything else passes through as
//! [`CueType::Other`]. There is no escaping: `|`, `=` and `]` cannot appear
//! inside values.
//!
//! # Examples
//!
//! ```
//! use scrollcue::cue::{CueType, parse_cues};
//!
//! let cues = parse_cues("Tronó.[cue:FX|flash|duration=2]");
//! assert_eq!(cues.len(), 1);
//! assert_eq!(cues[0].cue_type, CueType::Vfx);
//! assert_eq!(cues[0].effect, "flash");
//! assert_eq!(cues[0].params.get("duration"), Some("2"));
//! assert_eq!(cues[0].span(), 6..31);
//! ```

mod group;
mod parser;

pub use group::{CueGroup, group_cues};
pub use parser::{CueScanner, parse_cues};

use std::fmt;
use std::ops::Range;

/// Effect family a cue targets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CueType {
    Vfx,
    Sound,
    Image,
    /// Unrecognized type, kept exactly as written (trimmed).
    Other(String),
}

impl CueType {
    /// Normalize a raw `TYPE` segment.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "vfx" | "fx" => Self::Vfx,
            "sound" => Self::Sound,
            "image" => Self::Image,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Vfx => "vfx",
            Self::Sound => "sound",
            Self::Image => "image",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for CueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered `key=value` parameters of a cue.
///
/// Insertion order is preserved. A repeated key keeps its first position and
/// takes the last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CueParams {
    entries: Vec<(String, String)>,
}

impl CueParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CueParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// A parsed cue occurrence.
///
/// Offsets are char offsets into the text that was parsed, `raw_end`
/// exclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cue {
    pub cue_type: CueType,
    pub effect: String,
    pub params: CueParams,
    pub raw_start: usize,
    pub raw_end: usize,
    /// The cue's source markup, brackets included.
    pub original_text: String,
}

impl Cue {
    /// Raw char range covered by the markup.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.raw_start..self.raw_end
    }

    /// Length of the markup in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw_end - self.raw_start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_start >= self.raw_end
    }

    /// Copy of this cue with offsets moved by `delta` chars.
    #[must_use]
    pub fn shifted(&self, delta: usize) -> Self {
        Self {
            raw_start: self.raw_start + delta,
            raw_end: self.raw_end + delta,
            ..self.clone()
        }
    }
}
