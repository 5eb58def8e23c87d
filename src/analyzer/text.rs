//! Shared helpers for the regex-based analysis passes.

use regex::Regex;

/// Count non-overlapping matches of a pattern in the source.
pub fn count_matches(pattern: &Regex, source: &str) -> usize {
    pattern.find_iter(source).count()
}

/// Count standalone integer literals ("magic numbers").
///
/// The upstream pattern used lookaround (`(?<![\w])-?\d+(?![\w])`), which the
/// linear-time regex engine does not support. Instead every digit run is
/// checked against its neighbors: the character before the number and the
/// character after it must not be word characters. A leading minus sign is
/// only absorbed when the character before it is not a word character, so
/// `3-4` counts both digits (the `-` is then a valid non-word boundary for
/// the `4`), matching how a backtracking engine resolves the lookbehind.
/// This keeps `x1`, `foo_2`, and hex-style suffixes out while counting both
/// halves of `3.14`.
pub fn count_standalone_integers(source: &str) -> usize {
    let bytes = source.as_bytes();
    let mut count = 0;
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let mut start = i;
        let mut end = i;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }

        // Absorb a leading minus sign, but not when a word character sits
        // before it: the digits alone can still match with the minus as
        // their left boundary.
        if start > 0
            && bytes[start - 1] == b'-'
            && (start == 1 || !is_word_byte(bytes[start - 2]))
        {
            start -= 1;
        }

        let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
        let after_ok = end == bytes.len() || !is_word_byte(bytes[end]);
        if before_ok && after_ok {
            count += 1;
        }

        i = end;
    }

    count
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
