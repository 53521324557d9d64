//! Text cleaning shared by the classifier and the line-level diagnostic parsers.
//!
//! Every detector operates on text that already went through these helpers, so
//! color codes and severity glyphs never leak into extracted names or messages.

use std::borrow::Cow;

const ESC: char = '\u{1b}';

/// Remove ANSI escape sequences (`ESC [ ... <final>`) from `input`.
///
/// Returns the input unchanged (borrowed) when it contains no escape character.
pub fn strip_ansi(input: &str) -> Cow<'_, str> {
    if !input.contains(ESC) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESC {
            out.push(c);
            continue;
        }
        if chars.peek() != Some(&'[') {
            // Lone ESC or a non-CSI sequence: drop the ESC itself.
            continue;
        }
        chars.next();
        // Parameter and intermediate bytes run until a final byte in '@'..='~'.
        for c in chars.by_ref() {
            if ('@'..='~').contains(&c) {
                break;
            }
        }
    }

    Cow::Owned(out)
}

/// If `line` starts with one of `markers` (after leading whitespace), return the
/// remainder with surrounding whitespace trimmed.
///
/// Markers are tried in order; the longest match wins so that a marker with a
/// variation selector (`"⚠️"`) is preferred over its bare form (`"⚠"`).
pub fn strip_marker<'a, S: AsRef<str>>(line: &'a str, markers: &[S]) -> Option<&'a str> {
    let trimmed = line.trim_start();
    let marker = markers
        .iter()
        .map(AsRef::as_ref)
        .filter(|m| !m.is_empty() && trimmed.starts_with(*m))
        .max_by_key(|m| m.len())?;
    Some(trimmed[marker.len()..].trim())
}

/// Extract the first quoted string in `line`.
///
/// Accepts straight double quotes, single quotes and the typographic pairs
/// Xcode uses in some diagnostics.
pub fn first_quoted(line: &str) -> Option<&str> {
    const PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];

    let (start, open) = line
        .char_indices()
        .find(|(_, c)| PAIRS.iter().any(|(o, _)| o == c))?;
    let close = PAIRS.iter().find(|(o, _)| *o == open).map(|(_, c)| *c)?;
    let body_start = start + open.len_utf8();
    let end = line[body_start..].find(close)?;
    let body = &line[body_start..body_start + end];
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}
