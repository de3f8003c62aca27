//! Category and post record models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use super::FrontMatter;
use crate::config::SiteConfig;
use crate::error::Error;
use crate::helpers::{parse_date_string, today_midnight, today_string, truncate_chars};

/// The fixed set of content kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Poetry,
    Sentiment,
    Stories,
    Prompts,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 4] = [
        Category::Poetry,
        Category::Sentiment,
        Category::Stories,
        Category::Prompts,
    ];

    /// Directory and navigation name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Poetry => "poetry",
            Category::Sentiment => "sentiment",
            Category::Stories => "stories",
            Category::Prompts => "prompts",
        }
    }

    /// Singular label used in share previews
    pub fn label(&self) -> &'static str {
        match self {
            Category::Poetry => "Poetry",
            Category::Sentiment => "Sentiment",
            Category::Stories => "Story",
            Category::Prompts => "Prompt",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// A parsed document, normalized with defaults
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    /// File name without its document extension
    pub id: String,
    pub category: Category,
    pub title: String,
    /// Date as written in the front-matter, or today
    pub date: String,
    pub author: String,
    pub image: String,
    pub cover: String,
    pub excerpt: String,
    /// Content after the front-matter, trimmed
    pub body: String,
}

impl PostRecord {
    /// Parse a raw document into a post record.
    ///
    /// Documents without a front-matter block are rejected with `None`.
    pub fn parse(
        raw: &str,
        category: Category,
        file_name: &str,
        config: &SiteConfig,
    ) -> Option<Self> {
        let (fm, body) = FrontMatter::parse(raw)?;

        let id = file_name
            .strip_suffix(config.dotted_extension().as_str())
            .unwrap_or(file_name)
            .to_string();

        let image = fm
            .value("image")
            .unwrap_or(config.placeholder_image.as_str())
            .to_string();
        let cover = fm
            .value("cover")
            .or_else(|| fm.value("image"))
            .unwrap_or(config.placeholder_image.as_str())
            .to_string();

        Some(Self {
            id,
            category,
            title: fm.value("title").unwrap_or_default().to_string(),
            date: fm
                .value("date")
                .map(str::to_string)
                .unwrap_or_else(today_string),
            author: fm.value("author").unwrap_or(config.author.as_str()).to_string(),
            image,
            cover,
            excerpt: fm
                .value("excerpt")
                .map(str::to_string)
                .unwrap_or_else(|| truncate_chars(body, config.excerpt_length)),
            body: body.to_string(),
        })
    }

    /// Parsed date, if the date string is understood
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.date)
    }
}

/// Sort posts newest first.
///
/// Unparseable dates order as today. The sort is stable, so posts sharing
/// a date keep their incoming order.
pub fn sort_by_date_desc(posts: &mut [PostRecord]) {
    let today = today_midnight();
    posts.sort_by_cached_key(|post| Reverse(post.parsed_date().unwrap_or(today)));
}
