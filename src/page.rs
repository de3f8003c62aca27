//! Navigation pages and the sink rendered fragments are written to

use std::fmt;
use std::str::FromStr;

use crate::content::Category;
use crate::error::Error;

/// A navigable page of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// All categories merged
    Everything,
    About,
    Collection(Category),
}

impl Page {
    /// Navigation key, as used by the menu buttons
    pub fn key(&self) -> &'static str {
        match self {
            Page::Everything => "everything",
            Page::About => "about-beau",
            Page::Collection(category) => category.as_str(),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "everything" => Ok(Page::Everything),
            "about-beau" => Ok(Page::About),
            other => other
                .parse::<Category>()
                .map(Page::Collection)
                .map_err(|_| Error::UnknownPage(other.to_string())),
        }
    }
}

/// Receiver of rendered markup, typically the visible content area of a host page
pub trait ContentSink {
    /// Replace everything currently shown with `markup`
    fn replace_content(&mut self, markup: &str);
}

impl ContentSink for String {
    fn replace_content(&mut self, markup: &str) {
        self.clear();
        self.push_str(markup);
    }
}

/// Sink that keeps every replacement, oldest first
impl ContentSink for Vec<String> {
    fn replace_content(&mut self, markup: &str) {
        self.push(markup.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys() {
        assert_eq!("everything".parse::<Page>().unwrap(), Page::Everything);
        assert_eq!("about-beau".parse::<Page>().unwrap(), Page::About);
        assert_eq!(
            "stories".parse::<Page>().unwrap(),
            Page::Collection(Category::Stories)
        );
        assert!(matches!(
            "archive".parse::<Page>(),
            Err(Error::UnknownPage(key)) if key == "archive"
        ));
        assert_eq!(Page::Collection(Category::Poetry).to_string(), "poetry");
    }

    #[test]
    fn test_string_sink_replaces() {
        let mut sink = String::from("old");
        sink.replace_content("new");
        assert_eq!(sink, "new");
    }
}
