//! Name normalization and word-bounded phrase search.

/// Collapse runs of whitespace to a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a name for comparison: whitespace-collapsed and lower-cased.
///
/// Idempotent: `normalize_name(&normalize_name(s)) == normalize_name(s)`.
pub fn normalize_name(s: &str) -> String {
    collapse_whitespace(s).to_lowercase()
}

/// True for characters that extend a word: letters, digits and `_`.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `text[start..end]` is not flanked by word characters.
///
/// `start` and `end` must be char boundaries of `text`.
pub fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

/// Find `needle` in `haystack` at a word boundary.
///
/// A match counts only when it is not flanked by word characters, so `"ann"`
/// does not match inside `"anna"` or `"ann_2"`. Overlapping candidates are
/// all considered.
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(offset) = haystack[start..].find(needle) {
        let begin = start + offset;
        if is_bounded(haystack, begin, begin + needle.len()) {
            return true;
        }

        // Step past the first character of this candidate.
        let step = haystack[begin..].chars().next().map_or(1, char::len_utf8);
        start = begin + step;
    }
    false
}
