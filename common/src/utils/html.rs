//! HTML escaping.
//!
//! Message text comes from other users and must never reach the page as
//! markup.

/// Returns `text` with every HTML-significant character replaced by its
/// entity, safe to place in element content and quoted attribute values.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", "hello")]
    #[case("<script>alert(1)</script>", "&lt;script&gt;alert(1)&lt;/script&gt;")]
    #[case("fish & chips", "fish &amp; chips")]
    #[case(r#"<img src="x" onerror='y'>"#, "&lt;img src=&quot;x&quot; onerror=&#x27;y&#x27;&gt;")]
    #[case("&lt;", "&amp;lt;")]
    #[case("", "")]
    fn test_escape_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_text(input), expected);
    }

    #[test]
    fn test_escaped_output_has_no_delimiters() {
        let out = escape_text(r#"</div><b onclick="x">'&'</b>"#);
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
        assert!(!out.contains('"'));
        assert!(!out.contains('\''));
    }

    #[test]
    fn test_non_ascii_is_preserved() {
        assert_eq!(escape_text("héllo ✓ 你好"), "héllo ✓ 你好");
    }
}
