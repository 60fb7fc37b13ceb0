//! Fixed-width field helpers for backend key fields.

/// Left-pad `value` with zeros to `width` characters; longer values are
/// returned unchanged.
pub fn zero_pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let mut padded = "0".repeat(width - len);
    padded.push_str(value);
    padded
}

/// First `max_chars` characters of `value`
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// True for a non-empty string of ASCII digits
pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
