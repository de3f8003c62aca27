//! Feed assembler - turns discovered posts into page fragments
//!
//! This is the only layer that catches failures from below. Anything that
//! goes wrong while aggregating or rendering becomes the error-state
//! fragment, so callers always receive markup.

use std::sync::Arc;

use crate::content::{Category, PostRecord, PostRepository};
use crate::error::Result;
use crate::templates::TemplateRenderer;

/// Orchestrates discovery, aggregation and rendering
#[derive(Clone)]
pub struct FeedAssembler {
    repository: PostRepository,
    renderer: Arc<TemplateRenderer>,
}

impl FeedAssembler {
    pub fn new(repository: PostRepository, renderer: Arc<TemplateRenderer>) -> Self {
        Self {
            repository,
            renderer,
        }
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    pub fn repository(&self) -> &PostRepository {
        &self.repository
    }

    /// Every category merged into one date-ordered feed
    pub async fn render_feed(&self) -> String {
        let result = async {
            let posts = self.repository.aggregate_all(&Category::ALL).await?;
            self.render_posts(&posts, None)
        }
        .await;

        self.or_error_state(result, "feed")
    }

    /// A single category
    pub async fn render_collection(&self, category: Category) -> String {
        let result = async {
            let posts = self.repository.aggregate_one(category).await?;
            self.render_posts(&posts, Some(category))
        }
        .await;

        self.or_error_state(result, category.as_str())
    }

    /// Full story by id, empty when the story does not exist
    pub async fn render_story_page(&self, id: &str) -> String {
        let result = async {
            let post = self.repository.find(Category::Stories, id).await?;
            self.renderer.render_story_page(post.as_ref())
        }
        .await;

        self.or_error_state(result, "story")
    }

    /// Full prompt by id, empty when the prompt does not exist
    pub async fn render_prompt_page(&self, id: &str) -> String {
        let result = async {
            let post = self.repository.find(Category::Prompts, id).await?;
            self.renderer.render_prompt_page(post.as_ref())
        }
        .await;

        self.or_error_state(result, "prompt")
    }

    /// Static about page
    pub fn render_about(&self) -> String {
        let result = self.renderer.render_about();
        self.or_error_state(result, "about page")
    }

    fn render_posts(&self, posts: &[PostRecord], category: Option<Category>) -> Result<String> {
        if posts.is_empty() {
            return self.renderer.render_empty_state(category);
        }
        self.renderer.render_feed(posts)
    }

    fn or_error_state(&self, result: Result<String>, what: &str) -> String {
        result.unwrap_or_else(|e| {
            tracing::error!("Error rendering {}: {}", what, e);
            self.renderer.render_error_state()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{ContentLoader, DocumentSource, MemorySource, Response};
    use async_trait::async_trait;

    fn assembler_with(source: Arc<dyn DocumentSource>) -> FeedAssembler {
        let config = Arc::new(SiteConfig::default());
        let loader = ContentLoader::new(source, Arc::clone(&config));
        let renderer = TemplateRenderer::new(config).unwrap();
        FeedAssembler::new(PostRepository::new(Arc::new(loader)), Arc::new(renderer))
    }

    fn assembler(source: MemorySource) -> FeedAssembler {
        assembler_with(Arc::new(source))
    }

    /// Source whose every fetch panics, to exercise the aggregation failure path
    struct PanickingSource;

    #[async_trait]
    impl DocumentSource for PanickingSource {
        async fn fetch(&self, _path: &str) -> Result<Response> {
            panic!("source exploded");
        }

        fn describe(&self) -> String {
            "panicking".to_string()
        }
    }

    #[tokio::test]
    async fn test_feed_orders_across_categories() {
        let source = MemorySource::new()
            .with_document("poetry/jan.md", "---\ntitle: January\ndate: 2024-01-01\n---\nCold")
            .with_document("poetry/mar.md", "---\ntitle: March\ndate: 2024-03-01\n---\nThaw");

        let html = assembler(source).render_feed().await;
        let march = html.find("March").unwrap();
        let january = html.find("January").unwrap();
        assert!(march < january);
        assert!(html.starts_with(r#"<div class="feed">"#));
    }

    #[tokio::test]
    async fn test_rejected_documents_are_excluded() {
        let source = MemorySource::new()
            .with_document("poetry/a.md", "---\ntitle: Dusk\ndate: 2024-01-02\n---\nHello\nWorld")
            .with_document("poetry/b.md", "Just text");

        let html = assembler(source).render_collection(Category::Poetry).await;
        assert!(html.contains("<h2>Dusk</h2>"));
        assert!(html.contains("Hello<br>World"));
        assert!(!html.contains("Just text"));
        assert!(!html.contains(r#"data-post-id="b""#));
    }

    #[tokio::test]
    async fn test_empty_collection_mentions_category() {
        let html = assembler(MemorySource::new())
            .render_collection(Category::Prompts)
            .await;
        assert!(html.contains("empty-state"));
        assert!(html.contains("prompts"));
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let html = assembler(MemorySource::new()).render_feed().await;
        assert!(html.contains("The pages are still being written."));
    }

    #[tokio::test]
    async fn test_aggregation_failure_renders_error_state() {
        let assembler = assembler_with(Arc::new(PanickingSource));
        assert!(assembler.render_feed().await.contains("Error loading posts."));

        let collection = assembler.render_collection(Category::Stories).await;
        assert!(collection.contains("Error loading posts."));
        let story = assembler.render_story_page("night").await;
        assert!(story.contains("Error loading posts."));
        let prompt = assembler.render_prompt_page("letter").await;
        assert!(prompt.contains("Error loading posts."));
    }

    #[tokio::test]
    async fn test_collection_is_idempotent() {
        let source = MemorySource::new()
            .with_document("stories/a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nFirst")
            .with_document("stories/b.md", "---\ntitle: B\ndate: 2024-01-01\n---\nSecond");
        let assembler = assembler(source);

        let first = assembler.render_collection(Category::Stories).await;
        let second = assembler.render_collection(Category::Stories).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_detail_pages() {
        let source = MemorySource::new()
            .with_document("stories/night.md", "---\ntitle: Night\n---\nIt was dark.\nThe end.")
            .with_document("prompts/letter.md", "---\ntitle: Letter\n---\nWrite to someone.");
        let assembler = assembler(source);

        let story = assembler.render_story_page("night").await;
        assert!(story.contains("It was dark.\nThe end."));
        assert_eq!(assembler.render_story_page("missing").await, "");

        let prompt = assembler.render_prompt_page("letter").await;
        assert!(prompt.contains("Write to someone."));
        assert_eq!(assembler.render_prompt_page("night").await, "");
    }
}
