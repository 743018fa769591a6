//! Length budgets for free-text fields.

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Truncate `text` to at most `max_len` characters, appending [`ELLIPSIS`]
/// when anything was cut.
///
/// Length is counted in `char`s, so a multi-byte sequence is never split.
/// Grapheme clusters made of several scalars can still be broken apart.
pub fn summarize(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}
