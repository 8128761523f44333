//! String utilities for the domain layer.

/// Take at most `max_chars` characters from the start of `s`.
///
/// Counts Unicode scalar values, not bytes, so "Olá" is three characters.
pub fn first_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Single-line preview for logs: newlines collapsed, ellipsis when cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.replace(['\n', '\r'], " ");
    let head = first_chars(&flat, max_chars);
    if head.len() < flat.len() {
        format!("{}...", head)
    } else {
        flat
    }
}
