//! Text cleanup applied to every rendered fragment.

const OPENING: &str = "[cue:";

/// Punctuation that never takes whitespace in front of it.
pub(crate) fn is_closing_punct(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '…')
}

pub(crate) fn is_horizontal_space(c: char) -> bool {
    c.is_whitespace() && c != '\n'
}

/// Clean a text fragment around removed markup.
///
/// - stray `]` are removed;
/// - runs of horizontal whitespace collapse to their first char;
/// - whitespace right before `.,;:!?…` is removed.
#[must_use]
pub fn sanitize_fragment(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut pending_space: Option<char> = None;

    for c in fragment.chars() {
        if c == ']' {
            continue;
        }
        if is_horizontal_space(c) {
            pending_space.get_or_insert(c);
            continue;
        }
        if let Some(space) = pending_space.take() {
            if !is_closing_punct(c) {
                out.push(space);
            }
        }
        out.push(c);
    }
    if let Some(space) = pending_space {
        out.push(space);
    }
    out
}

/// Cut an unfinished cue opening off the end of a partially revealed slice.
///
/// Covers both a `[cue:` with no closing `]` after it and a bare prefix of
/// the opening (`[`, `[c`, `[cu`, `[cue`) at the very end.
#[must_use]
pub fn strip_partial_opening(slice: &str) -> &str {
    if let Some(idx) = slice.rfind(OPENING) {
        if !slice[idx..].contains(']') {
            return &slice[..idx];
        }
    }
    for len in (1..OPENING.len()).rev() {
        if slice.ends_with(&OPENING[..len]) {
            return &slice[..slice.len() - len];
        }
    }
    slice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_stray_brackets() {
        assert_eq!(sanitize_fragment("]Hola] mundo"), "Hola mundo");
    }

    #[test]
    fn test_collapses_horizontal_whitespace() {
        assert_eq!(sanitize_fragment("a  \t b"), "a b");
        assert_eq!(sanitize_fragment("a ] b"), "a b");
        assert_eq!(sanitize_fragment("  "), " ");
    }

    #[test]
    fn test_removes_space_before_punctuation() {
        assert_eq!(sanitize_fragment("Hola , mundo !"), "Hola, mundo!");
        assert_eq!(sanitize_fragment("espera …"), "espera…");
        assert_eq!(sanitize_fragment(" ."), ".");
    }

    #[test]
    fn test_keeps_trailing_space() {
        assert_eq!(sanitize_fragment("soplaba. "), "soplaba. ");
    }

    #[test]
    fn test_strip_unclosed_opening() {
        assert_eq!(strip_partial_opening("Hola [cue:vfx|ra"), "Hola ");
        assert_eq!(strip_partial_opening("Hola [cue:"), "Hola ");
        assert_eq!(
            strip_partial_opening("Hola [cue:vfx|rain] y"),
            "Hola [cue:vfx|rain] y"
        );
    }

    #[test]
    fn test_strip_opening_prefix() {
        assert_eq!(strip_partial_opening("Hola [cu"), "Hola ");
        assert_eq!(strip_partial_opening("Hola ["), "Hola ");
        assert_eq!(strip_partial_opening("Hola [x"), "Hola [x");
        assert_eq!(strip_partial_opening(""), "");
    }
}
