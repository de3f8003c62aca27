//! Content loader - discovers and parses the documents of a category

use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::Arc;

use super::{Category, DocumentSource, PostRecord};
use crate::config::SiteConfig;

lazy_static! {
    static ref HREF_RE: Regex =
        Regex::new(r#"(?i)<a\s(?:[^>]*?\s)?href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).unwrap();
}

/// Loads the posts of a category from a document source
pub struct ContentLoader {
    source: Arc<dyn DocumentSource>,
    config: Arc<SiteConfig>,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(source: Arc<dyn DocumentSource>, config: Arc<SiteConfig>) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Discover, fetch and parse every document of a category.
    ///
    /// Never fails: an unreachable listing yields no posts, and a document
    /// that cannot be fetched or parsed is skipped.
    pub async fn discover(&self, category: Category) -> Vec<PostRecord> {
        let listing_path = format!("{}/", category);

        let listing = match self.source.fetch(&listing_path).await {
            Ok(response) if response.is_success() => response.body,
            Ok(response) => {
                tracing::debug!(
                    "Listing for {} returned status {}",
                    category,
                    response.status
                );
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("No posts found for {}: {}", category, e);
                return Vec::new();
            }
        };

        let names = extract_document_names(&listing, &self.config.dotted_extension());
        tracing::debug!(
            "Found {} candidate documents for {} in {}",
            names.len(),
            category,
            self.source.describe()
        );

        let mut posts = Vec::with_capacity(names.len());
        for name in &names {
            if let Some(post) = self.load_document(category, name).await {
                posts.push(post);
            }
        }

        posts
    }

    /// Fetch and parse a single document
    async fn load_document(&self, category: Category, name: &str) -> Option<PostRecord> {
        let path = format!("{}/{}", category, name);

        let response = match self.source.fetch(&path).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Error loading {}: {}", path, e);
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!("Error loading {}: status {}", path, response.status);
            return None;
        }

        let file_name = percent_decode_str(name).decode_utf8_lossy();
        let post = PostRecord::parse(&response.body, category, &file_name, &self.config);
        if post.is_none() {
            tracing::debug!("Skipping {}: no front-matter block", path);
        }
        post
    }
}

/// Document file names linked from a listing, in listing order.
///
/// Only links ending in the document extension are kept, reduced to their
/// final path segment so absolute and relative links behave the same.
pub fn extract_document_names(listing: &str, extension: &str) -> Vec<String> {
    HREF_RE
        .captures_iter(listing)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().trim())
        .filter(|href| href.ends_with(extension))
        .filter_map(|href| href.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
