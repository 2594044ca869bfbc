use std::borrow::Cow;

/// Truncates a string to at most `max_chars` Unicode scalar values.
///
/// Cuts on a character boundary, so multi-byte text (Cyrillic, CJK, emoji)
/// never panics or yields invalid UTF-8. No ellipsis is appended: the caller
/// decides how to present a cut.
///
/// Returns `Cow::Borrowed` when the string already fits.
///
/// # Examples
///
/// ```
/// use readbot::util::truncate_chars;
///
/// assert_eq!(truncate_chars("Short", 10), "Short");
/// assert_eq!(truncate_chars("Привет, мир", 6), "Привет");
/// assert_eq!(truncate_chars("Test", 0), "");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        Some((byte_end, _)) => Cow::Owned(s[..byte_end].to_string()),
        None => Cow::Borrowed(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_chars("Hello World", 5), "Hello");
        assert_eq!(truncate_chars("Short", 10), "Short");
    }

    #[test]
    fn test_exact_fit_is_borrowed() {
        let result = truncate_chars("12345", 5);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "12345");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(truncate_chars("Test", 0), "");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // Each Cyrillic letter is 2 bytes in UTF-8
        let text = "Доброе утро";
        assert_eq!(truncate_chars(text, 6), "Доброе");
        assert_eq!(truncate_chars(text, 6).chars().count(), 6);
    }

    #[test]
    fn test_no_panic_on_utf8_boundaries() {
        let emoji = "☀️ good morning 🎉";
        for n in 0..=emoji.chars().count() + 1 {
            let result = truncate_chars(emoji, n);
            assert!(result.chars().count() <= n);
            assert!(emoji.starts_with(result.as_ref()));
        }
    }
}
