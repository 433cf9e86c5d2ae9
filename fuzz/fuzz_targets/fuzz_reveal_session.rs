//! Fuzz target for a full reading session.
//!
//! Loads arbitrary content and replays arbitrary progress samples through
//! update and render, checking the at-most-once firing guarantee.

#![no_main]

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scrollcue::{ReaderSession, RevealOptions};

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    window_lines: u8,
    samples: Vec<f64>,
}

fuzz_target!(|input: Input| {
    let options = RevealOptions::default().with_window_lines(usize::from(input.window_lines));
    let Ok(mut session) = ReaderSession::new(options) else {
        return;
    };
    session.load(&input.text);

    let mut fired = BTreeSet::new();
    for &progress in input.samples.iter().take(64) {
        let frame = session.update(progress);
        for event in frame.fired {
            assert!(fired.insert(event.raw_start), "cue fired twice");
        }
        for line in &frame.lines {
            assert!(!line.plain_text().contains(']'), "markup leaked");
        }
    }
});
