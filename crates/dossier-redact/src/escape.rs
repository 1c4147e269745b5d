/// Escape text for splicing into markup.
///
/// Guess and reply text is user-submitted and ends up inside rendered
/// markup, so everything that reaches the markup writer goes through here.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup_metacharacters() {
        assert_eq!(
            escape_markup(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_ampersand_first() {
        assert_eq!(escape_markup("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_markup("the senator"), "the senator");
    }
}
