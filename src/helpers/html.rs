//! HTML helper functions

/// Escape HTML special characters
///
/// Covers the five characters that can break out of text or attribute
/// context: `&`, `<`, `>`, `"` and `'`.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text and turn newlines into `<br>` tags
pub fn nl2br(s: &str) -> String {
    html_escape(s).replace('\n', "<br>")
}

/// First `length` characters of a string, without omission marker
pub fn truncate_chars(s: &str, length: usize) -> String {
    s.chars().take(length).collect()
}

/// Generate Open Graph and Twitter card meta tags
pub fn meta_tags(title: &str, description: &str, image: &str) -> String {
    let title = html_escape(title);
    let description = html_escape(description);
    let image = html_escape(image);

    [
        format!(r#"<meta property="og:title" content="{}">"#, title),
        format!(r#"<meta property="og:description" content="{}">"#, description),
        format!(r#"<meta property="og:image" content="{}">"#, image),
        format!(r#"<meta name="twitter:title" content="{}">"#, title),
        format!(r#"<meta name="twitter:description" content="{}">"#, description),
        format!(r#"<meta name="twitter:image" content="{}">"#, image),
    ]
    .join("\n")
}
