//! inkwell: the content pipeline behind The Inkwell
//!
//! Posts live as front-matter documents under one directory per category
//! (`poetry/`, `sentiment/`, `stories/`, `prompts/`). This crate discovers
//! them through a [`content::DocumentSource`], parses them into
//! [`content::PostRecord`]s, orders them by date and renders HTML
//! fragments for a host page.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod helpers;
pub mod page;
pub mod server;
pub mod templates;

pub use error::{Error, Result};
pub use page::{ContentSink, Page};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::SiteConfig;
use content::{ContentLoader, DirectorySource, DocumentSource, HttpSource, PostRepository};
use feed::FeedAssembler;
use templates::TemplateRenderer;

/// The main Inkwell application
#[derive(Clone)]
pub struct Inkwell {
    /// Site configuration
    pub config: Arc<SiteConfig>,
    /// Base directory
    pub base_dir: PathBuf,
    source: Arc<dyn DocumentSource>,
    assembler: FeedAssembler,
}

impl Inkwell {
    /// Create a new Inkwell instance from a directory.
    ///
    /// Reads `_config.yml` when present. Posts come from `remote_url` when
    /// configured, otherwise from `posts_dir` below the base directory.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        let source: Arc<dyn DocumentSource> = match &config.remote_url {
            Some(url) => Arc::new(HttpSource::new(url)?),
            None => Arc::new(DirectorySource::new(base_dir.join(&config.posts_dir))),
        };

        Self::with_source(config, base_dir, source)
    }

    /// Create an instance reading posts from an explicit source
    pub fn with_source(
        config: SiteConfig,
        base_dir: PathBuf,
        source: Arc<dyn DocumentSource>,
    ) -> Result<Self> {
        let config = Arc::new(config);
        let loader = ContentLoader::new(Arc::clone(&source), Arc::clone(&config));
        let repository = PostRepository::new(Arc::new(loader));
        let renderer = TemplateRenderer::new(Arc::clone(&config))?;
        let assembler = FeedAssembler::new(repository, Arc::new(renderer));

        Ok(Self {
            config,
            base_dir,
            source,
            assembler,
        })
    }

    /// The document source posts are read from
    pub fn source(&self) -> Arc<dyn DocumentSource> {
        Arc::clone(&self.source)
    }

    /// Feed assembler bound to this instance
    pub fn assembler(&self) -> &FeedAssembler {
        &self.assembler
    }

    /// Render a navigation page
    pub async fn render_page(&self, page: Page) -> String {
        match page {
            Page::Everything => self.assembler.render_feed().await,
            Page::About => self.assembler.render_about(),
            Page::Collection(category) => self.assembler.render_collection(category).await,
        }
    }

    /// Show the loading fragment, then the rendered page
    pub async fn load_page(&self, page: Page, sink: &mut dyn ContentSink) {
        match self.assembler.renderer().render_loading() {
            Ok(loading) => sink.replace_content(&loading),
            Err(e) => tracing::warn!("Failed to render loading fragment: {}", e),
        }

        tracing::debug!("Loading page {}", page);
        let html = self.render_page(page).await;
        sink.replace_content(&html);
    }

    /// Open Graph and Twitter meta tags for the site
    pub fn meta_tags(&self) -> String {
        helpers::meta_tags(
            &self.config.title,
            &self.config.description,
            &self.config.placeholder_image,
        )
    }
}
