//! Property-based tests for parsing, projection, triggering and rendering.
//!
//! Uses proptest to check invariants that must hold for any chapter text.

use proptest::prelude::*;
use scrollcue::cue::parse_cues;
use scrollcue::{NullSink, ReaderSession, RevealEngine, RevealOptions, SessionState};

// ============================================================================
// Strategies
// ============================================================================

/// Arbitrary printable UTF-8 text.
fn utf8_string() -> impl Strategy<Value = String> {
    "\\PC{0,120}"
}

/// Text assembled from prose, line breaks, cues and broken markup.
fn chapter_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "Hola",
            "mundo",
            "añejo",
            "雨",
            " ",
            "  ",
            "\n",
            ".",
            "—",
            "[cue:vfx|breeze|duration=5]",
            "[cue:sound|bell]",
            "[cue:image|map|x=1|y=2]",
            "[cue:FX|flash]",
            "[cue:",
            "[cue:vfx]",
            "[cue:vfx|",
            "]",
            "[",
        ]),
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn progress() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => 0.0f64..=1.0,
        1 => prop::sample::select(vec![-1.0, 0.0, 1.0, 2.0, f64::NAN]),
    ]
}

// ============================================================================
// Parser Properties
// ============================================================================

proptest! {
    /// Cues come out ordered, disjoint, and matching their source markup.
    #[test]
    fn cues_are_ordered_and_disjoint(text in chapter_text()) {
        let chars: Vec<char> = text.chars().collect();
        let cues = parse_cues(&text);
        let mut last_end = 0;
        for cue in &cues {
            prop_assert!(cue.raw_start >= last_end);
            prop_assert!(cue.raw_start < cue.raw_end);
            prop_assert!(cue.raw_end <= chars.len());
            let slice: String = chars[cue.raw_start..cue.raw_end].iter().collect();
            prop_assert_eq!(&slice, &cue.original_text);
            prop_assert!(slice.starts_with("[cue:"));
            prop_assert!(slice.ends_with(']'));
            prop_assert!(!cue.effect.is_empty());
            last_end = cue.raw_end;
        }
    }

    /// The parser never panics on arbitrary input.
    #[test]
    fn parser_total_on_arbitrary_text(text in utf8_string()) {
        let _ = parse_cues(&text);
    }
}

// ============================================================================
// Projection Properties
// ============================================================================

proptest! {
    /// Visible and cue chars partition the raw text.
    #[test]
    fn visible_and_cue_chars_partition_raw(text in chapter_text()) {
        let engine = RevealEngine::new(&text);
        let cue_chars: usize = engine.cues().iter().map(|c| c.len()).sum();
        prop_assert_eq!(engine.total_visible() + cue_chars, engine.total_raw());
    }

    /// Visible offsets survive a round trip through raw offsets.
    #[test]
    fn visible_raw_round_trip(text in chapter_text()) {
        let engine = RevealEngine::new(&text);
        let map = engine.segments();
        for visible in 0..=map.total_visible() {
            let raw = map.visible_to_raw(visible);
            prop_assert_eq!(map.raw_to_visible(raw), visible);
        }
    }

    /// The reveal target never lands inside cue markup.
    #[test]
    fn target_never_inside_cue(text in chapter_text(), p in progress()) {
        let engine = RevealEngine::new(&text);
        let state = engine.reveal(p);
        for cue in engine.cues() {
            prop_assert!(!cue.span().contains(&state.target_raw));
        }
    }

    /// More progress never reveals less.
    #[test]
    fn reveal_is_monotonic(text in chapter_text(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let engine = RevealEngine::new(&text);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = engine.reveal(lo);
        let high = engine.reveal(hi);
        prop_assert!(low.target_visible <= high.target_visible);
        prop_assert!(low.target_raw <= high.target_raw);
        prop_assert!(low.target_line <= high.target_line);
    }

    /// The same progress always yields the same reveal.
    #[test]
    fn reveal_is_pure(text in chapter_text(), p in progress(), detour in progress()) {
        let engine = RevealEngine::new(&text);
        let first = engine.reveal(p);
        let _ = engine.reveal(detour);
        let second = engine.reveal(p);
        prop_assert_eq!(first.target_raw, second.target_raw);
        prop_assert_eq!(first.window, second.window);
    }

    /// Text without cues maps one to one.
    #[test]
    fn cue_free_text_is_identity(text in "[a-zñ .\n]{0,80}") {
        let engine = RevealEngine::new(&text);
        prop_assert_eq!(engine.total_visible(), engine.total_raw());
        for offset in 0..=engine.total_raw() {
            prop_assert_eq!(engine.segments().visible_to_raw(offset), offset);
        }
    }
}

// ============================================================================
// Session Properties
// ============================================================================

proptest! {
    /// Under the default policy a cue fires at most once, in text order
    /// within a sample.
    #[test]
    fn cues_fire_at_most_once(
        text in chapter_text(),
        samples in prop::collection::vec(progress(), 1..30),
    ) {
        let mut session = ReaderSession::new(RevealOptions::default()).expect("options");
        session.load(&text);
        let mut seen = std::collections::BTreeSet::new();
        for p in samples {
            let frame = session.update(p);
            let starts: Vec<_> = frame.fired.iter().map(|e| e.raw_start).collect();
            prop_assert!(starts.windows(2).all(|w| w[0] < w[1]));
            for start in starts {
                prop_assert!(seen.insert(start), "cue at {} fired twice", start);
            }
        }
    }

    /// Rendered lines never show markup and carry at most one marker per
    /// group.
    #[test]
    fn rendered_lines_are_clean(text in chapter_text(), p in progress()) {
        let mut session =
            ReaderSession::new(RevealOptions::default().with_window_lines(64)).expect("options");
        session.load(&text);
        let frame = session.update(p);
        let mut markers = 0;
        for line in &frame.lines {
            let plain = line.plain_text();
            prop_assert!(!plain.contains(']'));
            prop_assert!(parse_cues(&plain).is_empty());
            prop_assert!(!plain.contains('\n'));
            markers += line.markers().count();
        }
        prop_assert!(markers <= session.engine().groups().len());
    }

    /// Arbitrary text and progress never panic the full pipeline.
    #[test]
    fn pipeline_total_on_arbitrary_text(
        text in utf8_string(),
        samples in prop::collection::vec(progress(), 1..8),
    ) {
        let engine = RevealEngine::new(&text);
        let mut state = SessionState::new();
        for p in samples {
            let reveal = engine.update(p, &mut state, &mut NullSink);
            let _ = engine.render(&reveal, &mut state);
        }
    }
}
