/// Characters that carry meaning in MarkdownV2 captions.
const SPECIAL_CHARS: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes every MarkdownV2 special character with a backslash.
///
/// Apply to text that is already cleaned and truncated.
///
/// # Examples
///
/// ```
/// use readbot::content::escape_markdown;
///
/// assert_eq!(escape_markdown("a.b!c"), "a\\.b\\!c");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
