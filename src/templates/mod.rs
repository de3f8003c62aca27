//! Embedded Inkwell templates using the Tera template engine
//!
//! Autoescaping is on for every template and routed through
//! [`html_escape`], so each `{{ }}` interpolation of post text is escaped.
//! Only pre-rendered markup is ever marked `safe`.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Context, Tera};

use crate::config::{AboutConfig, SiteConfig};
use crate::content::{Category, PostRecord};
use crate::error::Result;
use crate::helpers::{display_date, html_escape, nl2br, truncate_chars};

/// Rendered when even the error template cannot be rendered
const ERROR_STATE_FALLBACK: &str =
    r#"<div class="empty-state error-state"><p>Error loading posts. 💌</p></div>"#;

/// Template renderer with the embedded Inkwell fragments
pub struct TemplateRenderer {
    tera: Tera,
    config: Arc<SiteConfig>,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: Arc<SiteConfig>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.set_escape_fn(html_escape);

        tera.add_raw_templates(vec![
            ("cards/poetry.html", include_str!("inkwell/cards/poetry.html")),
            (
                "cards/sentiment.html",
                include_str!("inkwell/cards/sentiment.html"),
            ),
            ("cards/stories.html", include_str!("inkwell/cards/stories.html")),
            ("cards/prompts.html", include_str!("inkwell/cards/prompts.html")),
            ("feed.html", include_str!("inkwell/feed.html")),
            ("empty_state.html", include_str!("inkwell/empty_state.html")),
            ("error_state.html", include_str!("inkwell/error_state.html")),
            ("loading.html", include_str!("inkwell/loading.html")),
            ("story_page.html", include_str!("inkwell/story_page.html")),
            ("prompt_page.html", include_str!("inkwell/prompt_page.html")),
            ("about.html", include_str!("inkwell/about.html")),
        ])?;

        tera.register_filter("nl2br", nl2br_filter);

        Ok(Self { tera, config })
    }

    /// Render the card of a post, picking the template by category
    pub fn render_card(&self, post: &PostRecord) -> Result<String> {
        self.render_post(card_template(post.category), post)
    }

    /// Render every post as a card inside a feed container
    pub fn render_feed(&self, posts: &[PostRecord]) -> Result<String> {
        let cards = posts
            .iter()
            .map(|post| self.render_card(post))
            .collect::<Result<Vec<_>>>()?;

        let mut context = Context::new();
        context.insert("cards", &cards);
        Ok(self.tera.render("feed.html", &context)?)
    }

    /// Full story view; a missing post renders nothing
    pub fn render_story_page(&self, post: Option<&PostRecord>) -> Result<String> {
        match post {
            Some(post) => self.render_post("story_page.html", post),
            None => Ok(String::new()),
        }
    }

    /// Full prompt view with the response form; a missing post renders nothing
    pub fn render_prompt_page(&self, post: Option<&PostRecord>) -> Result<String> {
        match post {
            Some(post) => self.render_post("prompt_page.html", post),
            None => Ok(String::new()),
        }
    }

    /// Static about page
    pub fn render_about(&self) -> Result<String> {
        let mut context = self.site_context();
        context.insert("about", &self.config.about);
        context.insert("phone_link", &phone_link(&self.config.about));
        Ok(self.tera.render("about.html", &context)?)
    }

    /// Fragment for a feed or collection with no posts
    pub fn render_empty_state(&self, category: Option<Category>) -> Result<String> {
        let mut context = Context::new();
        context.insert("category", category.map(|c| c.as_str()).unwrap_or_default());
        Ok(self.tera.render("empty_state.html", &context)?)
    }

    /// Fragment shown when loading failed
    pub fn render_error_state(&self) -> String {
        self.tera
            .render("error_state.html", &Context::new())
            .unwrap_or_else(|e| {
                tracing::error!("Failed to render error state: {}", e);
                ERROR_STATE_FALLBACK.to_string()
            })
    }

    /// Placeholder shown while a page loads
    pub fn render_loading(&self) -> Result<String> {
        Ok(self.tera.render("loading.html", &Context::new())?)
    }

    fn render_post(&self, template: &str, post: &PostRecord) -> Result<String> {
        let mut context = self.site_context();
        context.insert("post", &PostView::new(post, &self.config));
        Ok(self.tera.render(template, &context)?)
    }

    fn site_context(&self) -> Context {
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteView {
                title: &self.config.title,
                tagline: &self.config.tagline,
                author: &self.config.author,
                profile_image: &self.config.profile_image,
            },
        );
        context
    }
}

/// Card template of a category
fn card_template(category: Category) -> &'static str {
    match category {
        Category::Poetry => "cards/poetry.html",
        Category::Sentiment => "cards/sentiment.html",
        Category::Stories => "cards/stories.html",
        Category::Prompts => "cards/prompts.html",
    }
}

/// Digits and leading `+` of the contact phone, for the `tel:` link
fn phone_link(about: &AboutConfig) -> String {
    about
        .contact
        .phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Tera filter: escape and convert newlines to `<br>`
fn nl2br_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("nl2br", "value", String, value);
    Ok(tera::Value::String(nl2br(&s)))
}

/// Template context data structures

#[derive(Debug, Clone, Serialize)]
struct SiteView<'a> {
    title: &'a str,
    tagline: &'a str,
    author: &'a str,
    profile_image: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct PostView<'a> {
    id: &'a str,
    category: Category,
    label: &'static str,
    title: &'a str,
    display_date: String,
    author: &'a str,
    image: &'a str,
    cover: &'a str,
    excerpt: &'a str,
    body: &'a str,
    share_excerpt: String,
}

impl<'a> PostView<'a> {
    fn new(post: &'a PostRecord, config: &SiteConfig) -> Self {
        Self {
            id: &post.id,
            category: post.category,
            label: post.category.label(),
            title: &post.title,
            display_date: display_date(&post.date, &config.date_format),
            author: &post.author,
            image: &post.image,
            cover: &post.cover,
            excerpt: &post.excerpt,
            body: &post.body,
            share_excerpt: truncate_chars(&post.body, config.share_excerpt_length),
        }
    }
}
