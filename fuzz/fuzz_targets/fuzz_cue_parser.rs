//! Fuzz target for the cue scanner.
//!
//! Arbitrary text must parse without panicking, and every cue must point
//! back at its own markup.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scrollcue::cue::{group_cues, parse_cues};

fuzz_target!(|data: &str| {
    let chars: Vec<char> = data.chars().collect();
    let cues = parse_cues(data);

    let mut last_end = 0;
    for cue in &cues {
        assert!(cue.raw_start >= last_end, "cues overlap");
        assert!(cue.raw_end <= chars.len(), "cue past end of text");
        let slice: String = chars[cue.raw_start..cue.raw_end].iter().collect();
        assert_eq!(slice, cue.original_text);
        last_end = cue.raw_end;
    }

    let groups = group_cues(data, cues.clone());
    let grouped: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(grouped, cues.len(), "grouping lost cues");
});
