//! Front-matter parsing
//!
//! Only a restricted, single-level `key: value` syntax is understood. A
//! document must open with a `---` line and close its metadata block with
//! another `---` line; anything else is not a post.

use indexmap::IndexMap;

const DELIMITER: &str = "---";

/// Metadata block of a document, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    entries: IndexMap<String, String>,
}

impl FrontMatter {
    /// Split a document into front-matter and trimmed body.
    ///
    /// Returns `None` when the document does not start with a delimited
    /// metadata block.
    pub fn parse(content: &str) -> Option<(Self, &str)> {
        let rest = strip_delimiter_line(content)?;

        let mut offset = 0;
        while offset < rest.len() {
            let remaining = &rest[offset..];
            let (line, advance) = match remaining.find('\n') {
                Some(pos) => (&remaining[..pos], pos + 1),
                None => (remaining, remaining.len()),
            };

            if line.strip_suffix('\r').unwrap_or(line) == DELIMITER {
                let block = &rest[..offset];
                let body = remaining[advance..].trim();
                return Some((Self::parse_block(block), body));
            }

            offset += advance;
        }

        // No closing delimiter
        None
    }

    /// Parse the lines between the delimiters
    fn parse_block(block: &str) -> Self {
        let mut entries = IndexMap::new();

        for line in block.lines() {
            // Lines without a colon are ignored
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            entries.insert(key.to_string(), strip_quotes(value.trim()).to_string());
        }

        Self { entries }
    }

    /// Raw value of a key, empty strings included
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value of a key, treating an empty value as absent
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// All entries, unknown keys included
    pub fn entries(&self) -> &IndexMap<String, String> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip the opening `---` line, accepting `\n` or `\r\n`
fn strip_delimiter_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(DELIMITER)?;
    rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))
}

/// Remove one matching pair of surrounding single or double quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = "---\ntitle: Dusk\ndate: 2024-01-02\n---\nHello\nWorld\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some("Dusk"));
        assert_eq!(fm.get("date"), Some("2024-01-02"));
        assert_eq!(body, "Hello\nWorld");
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let content = "---\nimage: https://cdn.example.com/a.jpg\ntitle: Part: One\n---\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("image"), Some("https://cdn.example.com/a.jpg"));
        assert_eq!(fm.get("title"), Some("Part: One"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_quotes_stripped_once() {
        let content = "---\na: \"quoted\"\nb: 'single'\nc: \"mixed'\nd: \"\"inner\"\"\ne: \"\n---\nx";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("a"), Some("quoted"));
        assert_eq!(fm.get("b"), Some("single"));
        assert_eq!(fm.get("c"), Some("\"mixed'"));
        assert_eq!(fm.get("d"), Some("\"inner\""));
        assert_eq!(fm.get("e"), Some("\""));
    }

    #[test]
    fn test_lines_without_colon_ignored() {
        let content = "---\njust words\ntitle:  Spaced  \n: orphan\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.entries().len(), 1);
        assert_eq!(fm.get("title"), Some("Spaced"));
    }

    #[test]
    fn test_unknown_keys_preserved_in_order() {
        let content = "---\nmood: wistful\ntitle: T\nweather: rain\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<_> = fm.entries().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["mood", "title", "weather"]);
    }

    #[test]
    fn test_empty_value_is_absent() {
        let content = "---\ntitle:\nauthor: ''\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some(""));
        assert_eq!(fm.value("title"), None);
        assert_eq!(fm.value("author"), None);
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nonly body").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "only body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nLine one\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some("Windows"));
        assert_eq!(body, "Line one");
    }

    #[test]
    fn test_rejects_missing_delimiters() {
        assert!(FrontMatter::parse("Just text").is_none());
        assert!(FrontMatter::parse("---\ntitle: never closed\n").is_none());
        assert!(FrontMatter::parse("\n---\ntitle: late\n---\n").is_none());
        assert!(FrontMatter::parse("--- \ntitle: x\n---\n").is_none());
        assert!(FrontMatter::parse("").is_none());
    }

    #[test]
    fn test_closing_line_must_be_exact() {
        // "----" and "--- x" are ordinary lines, the block closes at the real delimiter
        let content = "---\ntitle: a\n----\nnote: b\n---\nbody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("note"), Some("b"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_body_with_later_separator() {
        let content = "---\ntitle: a\n---\nfirst\n---\nsecond";
        let (_, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(body, "first\n---\nsecond");
    }
}
