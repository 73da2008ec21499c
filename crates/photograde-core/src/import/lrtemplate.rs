//! Legacy `.lrtemplate` parsing.
//!
//! These files are Lua-like tables; only `key = number` pairs carry
//! develop settings, everything else (ids, titles, nesting) is noise. The
//! scanner tolerantly picks out exactly those pairs: a run of word
//! characters, `=`, and a signed decimal. Quoted values and table
//! constructors simply never match.

use std::collections::HashMap;

/// Scan `text` for `key = number` pairs. Later occurrences of a key
/// overwrite earlier ones. Never fails; unusable text yields an empty map.
pub(crate) fn parse_lrtemplate(text: &str) -> HashMap<String, f32> {
    let mut raw = HashMap::new();
    let bytes = text.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if !is_word_byte(bytes[pos]) {
            pos += 1;
            continue;
        }

        let key_start = pos;
        while pos < bytes.len() && is_word_byte(bytes[pos]) {
            pos += 1;
        }
        let key = &text[key_start..pos];

        let mut cursor = pos;
        while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
        if bytes.get(cursor) != Some(&b'=') {
            continue;
        }
        cursor += 1;
        while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }

        if let Some((value, end)) = scan_number(text, cursor) {
            raw.insert(key.to_string(), value);
            pos = end;
        }
    }

    raw
}

#[inline]
fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Scan a signed decimal at `start`: optional sign, digits, optionally a
/// dot followed by more digits. The dot is only consumed when digits
/// follow it, so `12.` yields 12. Returns the value and the position just
/// past it.
fn scan_number(text: &str, start: usize) -> Option<(f32, usize)> {
    let bytes = text.as_bytes();
    let mut pos = start;

    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut end = pos;
    if bytes.get(pos) == Some(&b'.') {
        let mut frac_end = pos + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > pos + 1 {
            end = frac_end;
        }
    }

    if int_digits == 0 && end == pos {
        return None;
    }

    text[start..end]
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| (value, end))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: arbitrary input never panics and only finite values
        /// come out.
        #[test]
        fn prop_scanner_is_total(input in ".*") {
            for value in parse_lrtemplate(&input).values() {
                prop_assert!(value.is_finite());
            }
        }

        /// Property: a clean pair is always captured exactly.
        #[test]
        fn prop_clean_pair_is_captured(
            key in "[A-Za-z][A-Za-z0-9_]{0,12}",
            value in -1.0e5f32..1.0e5,
        ) {
            let raw = parse_lrtemplate(&format!("{} = {}", key, value));
            prop_assert_eq!(raw[key.as_str()], value);
        }
    }
}
