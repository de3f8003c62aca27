//! Post repository - aggregates categories into date-ordered collections

use std::sync::Arc;

use super::{sort_by_date_desc, Category, ContentLoader, PostRecord};
use crate::error::Result;

/// Aggregates parsed posts per category and across categories
#[derive(Clone)]
pub struct PostRepository {
    loader: Arc<ContentLoader>,
}

impl PostRepository {
    pub fn new(loader: Arc<ContentLoader>) -> Self {
        Self { loader }
    }

    /// Load every listed category concurrently, newest first.
    ///
    /// Results are concatenated in the order of `categories` before the
    /// stable sort, so posts sharing a date keep category order.
    pub async fn aggregate_all(&self, categories: &[Category]) -> Result<Vec<PostRecord>> {
        let handles: Vec<_> = categories
            .iter()
            .map(|&category| {
                let loader = Arc::clone(&self.loader);
                tokio::spawn(async move { loader.discover(category).await })
            })
            .collect();

        let mut posts = Vec::new();
        for handle in handles {
            posts.extend(handle.await?);
        }

        sort_by_date_desc(&mut posts);
        Ok(posts)
    }

    /// Load a single category, newest first
    pub async fn aggregate_one(&self, category: Category) -> Result<Vec<PostRecord>> {
        let mut posts = self.discover(category).await?;
        sort_by_date_desc(&mut posts);
        Ok(posts)
    }

    /// Look up a post by id.
    ///
    /// When two documents derive the same id the later one in listing
    /// order wins.
    pub async fn find(&self, category: Category, id: &str) -> Result<Option<PostRecord>> {
        let posts = self.discover(category).await?;
        let matches = posts.iter().filter(|p| p.id == id).count();
        if matches > 1 {
            tracing::debug!("{} documents in {} share the id {}", matches, category, id);
        }
        Ok(posts.into_iter().rev().find(|p| p.id == id))
    }

    /// Discovery of one category on its own task, so a failure surfaces as
    /// an error like it does in `aggregate_all`
    async fn discover(&self, category: Category) -> Result<Vec<PostRecord>> {
        let loader = Arc::clone(&self.loader);
        Ok(tokio::spawn(async move { loader.discover(category).await }).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::MemorySource;

    fn repository(source: MemorySource) -> PostRepository {
        let loader = ContentLoader::new(Arc::new(source), Arc::new(SiteConfig::default()));
        PostRepository::new(Arc::new(loader))
    }

    fn doc(title: &str, date: &str) -> String {
        format!("---\ntitle: {}\ndate: {}\n---\nbody of {}", title, date, title)
    }

    fn titles(posts: &[PostRecord]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_aggregate_one_sorts_descending() {
        let source = MemorySource::new()
            .with_document("poetry/jan.md", &doc("January", "2024-01-01"))
            .with_document("poetry/mar.md", &doc("March", "2024-03-01"));

        let posts = repository(source).aggregate_one(Category::Poetry).await.unwrap();
        assert_eq!(titles(&posts), vec!["March", "January"]);
    }

    #[tokio::test]
    async fn test_aggregate_all_merges_categories() {
        let source = MemorySource::new()
            .with_document("poetry/p.md", &doc("Poem", "2024-02-01"))
            .with_document("sentiment/s.md", &doc("Feeling", "2024-04-01"))
            .with_document("stories/t.md", &doc("Tale", "2023-12-24"))
            .with_failure("prompts/", "offline");

        let posts = repository(source)
            .aggregate_all(&Category::ALL)
            .await
            .unwrap();
        assert_eq!(titles(&posts), vec!["Feeling", "Poem", "Tale"]);
        assert_eq!(posts[0].category, Category::Sentiment);
    }

    #[tokio::test]
    async fn test_aggregate_all_ties_keep_category_order() {
        let source = MemorySource::new()
            .with_document("prompts/a.md", &doc("Prompt", "2024-06-01"))
            .with_document("stories/a.md", &doc("Story", "2024-06-01"))
            .with_document("poetry/a.md", &doc("Poem", "2024-06-01"))
            .with_document("poetry/b.md", &doc("Poem Two", "2024-06-01"));

        let posts = repository(source)
            .aggregate_all(&Category::ALL)
            .await
            .unwrap();
        assert_eq!(titles(&posts), vec!["Poem", "Poem Two", "Story", "Prompt"]);
    }

    #[tokio::test]
    async fn test_aggregate_empty_is_not_an_error() {
        let repo = repository(MemorySource::new());
        assert!(repo.aggregate_all(&Category::ALL).await.unwrap().is_empty());
        assert!(repo.aggregate_one(Category::Prompts).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_last_duplicate_wins() {
        let listing = r#"<a href="a%20b.md">1</a><a href="a b.md">2</a><a href="y.md">3</a>"#;
        let source = MemorySource::new()
            .with_response("stories/", 200, listing)
            .with_document("stories/a%20b.md", &doc("Encoded", "2024-01-01"))
            .with_document("stories/a b.md", &doc("Plain", "2024-01-01"))
            .with_document("stories/y.md", &doc("Other", "2024-01-01"));

        let repo = repository(source);
        let posts = repo.aggregate_one(Category::Stories).await.unwrap();
        assert_eq!(titles(&posts), vec!["Encoded", "Plain", "Other"]);

        let found = repo.find(Category::Stories, "a b").await.unwrap().unwrap();
        assert_eq!(found.title, "Plain");
        let other = repo.find(Category::Stories, "y").await.unwrap().unwrap();
        assert_eq!(other.title, "Other");
        assert!(repo.find(Category::Stories, "missing").await.unwrap().is_none());
    }
}
