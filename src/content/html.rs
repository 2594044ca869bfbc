use std::sync::LazyLock;

use regex::Regex;

/// Opening list-item tag. `\b` keeps `<link ...>` from being treated as `<li>`.
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li\b[^>]*>").expect("valid regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Bullet inserted in place of each `<li>` opening tag.
const BULLET: &str = "\n• ";

/// Converts an HTML summary into a single line of readable plain text.
///
/// The steps run in a fixed order:
///
/// 1. `<li>` opening tags become a newline plus a `•` bullet
/// 2. every other tag is removed
/// 3. whitespace runs collapse to one space (this flattens the newlines
///    from step 1, leaving only the bullet glyph as a separator)
/// 4. HTML entities are decoded
/// 5. leading and trailing whitespace is trimmed
///
/// Entities are decoded after tag stripping, so an escaped `&lt;b&gt;` in the
/// source survives as literal text. No length limit is applied.
///
/// # Examples
///
/// ```
/// use readbot::content::clean_html;
///
/// assert_eq!(clean_html("<p>Fish &amp; chips</p>"), "Fish & chips");
/// assert_eq!(clean_html("<ul><li>a</li><li>b</li></ul>"), "• a • b");
/// ```
pub fn clean_html(raw_html: &str) -> String {
    let text = LIST_ITEM.replace_all(raw_html, BULLET);
    let text = TAG.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = html_escape::decode_html_entities(&text);
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_list_items_become_bullets() {
        let cleaned = clean_html("<li>a</li><li>b</li>");
        assert_eq!(cleaned.matches('•').count(), 2);
        assert!(!cleaned.contains('<'));
        assert!(!cleaned.contains('>'));
        assert_eq!(cleaned, "• a • b");
    }

    #[test]
    fn test_list_items_with_attributes() {
        let cleaned = clean_html(r#"<ol><li class="x">one</li><LI>two</LI></ol>"#);
        assert_eq!(cleaned, "• one • two");
    }

    #[test]
    fn test_link_tag_is_not_a_list_item() {
        let cleaned = clean_html(r#"<link rel="canonical" href="/a">Body"#);
        assert_eq!(cleaned, "Body");
    }

    #[test]
    fn test_strips_nested_markup() {
        let raw = r#"<div><p>Hi <b>bold</b> <a href="/x">link</a></p><img src="a.png"/></div>"#;
        assert_eq!(clean_html(raw), "Hi bold link");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_html("  a\n\n\tb   c  "), "a b c");
    }

    #[test]
    fn test_decodes_entities_after_stripping() {
        assert_eq!(clean_html("a &amp; b"), "a & b");
        assert_eq!(
            clean_html("&quot;quoted&quot; &#8212; &#x41;"),
            "\"quoted\" — A"
        );
        // Escaped markup is text, not a tag
        assert_eq!(clean_html("&lt;b&gt;not bold&lt;/b&gt;"), "<b>not bold</b>");
    }

    #[test]
    fn test_empty_and_tag_only_input() {
        assert_eq!(clean_html(""), "");
        assert_eq!(clean_html("<br/><hr>"), "");
    }

    #[test]
    fn test_placeholder_passes_through() {
        assert_eq!(clean_html("No description"), "No description");
    }

    proptest! {
        #[test]
        fn prop_clean_is_idempotent_on_plain_text(s in "[a-zA-Z0-9 .,!?:;\n\t•-]{0,200}") {
            let once = clean_html(&s);
            prop_assert_eq!(clean_html(&once), once);
        }

        #[test]
        fn prop_output_has_no_tags(s in "(<[a-z]{1,5}>|[a-z ]{1,10}|</[a-z]{1,5}>){0,20}") {
            let cleaned = clean_html(&s);
            prop_assert!(!cleaned.contains('<'));
            prop_assert!(!cleaned.contains('>'));
        }
    }
}
