//! Render fragments to stdout

use anyhow::Result;

use crate::content::Category;
use crate::{Inkwell, Page};

/// What to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Page(Page),
    Story(String),
    Prompt(String),
    Meta,
}

/// Render a target into markup
pub async fn render(inkwell: &Inkwell, target: &Target) -> String {
    let assembler = inkwell.assembler();
    match target {
        Target::Page(page) => inkwell.render_page(*page).await,
        Target::Story(id) => assembler.render_story_page(id).await,
        Target::Prompt(id) => assembler.render_prompt_page(id).await,
        Target::Meta => inkwell.meta_tags(),
    }
}

/// Render a target and print it
pub async fn run(inkwell: &Inkwell, target: &Target) -> Result<()> {
    let html = render(inkwell, target).await;
    if html.is_empty() {
        tracing::warn!("Nothing to render for {:?}", target);
    }
    println!("{}", html);
    Ok(())
}

/// Parse a category argument
pub fn parse_category(s: &str) -> Result<Category> {
    Ok(s.parse::<Category>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::MemorySource;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_render_targets() {
        let source = MemorySource::new()
            .with_document("prompts/letter.md", "---\ntitle: Letter\n---\nWrite.");
        let inkwell =
            Inkwell::with_source(SiteConfig::default(), PathBuf::from("."), Arc::new(source))
                .unwrap();

        let prompt = render(&inkwell, &Target::Prompt("letter".to_string())).await;
        assert!(prompt.contains("Letter"));

        let missing = render(&inkwell, &Target::Story("letter".to_string())).await;
        assert!(missing.is_empty());

        let meta = render(&inkwell, &Target::Meta).await;
        assert!(meta.contains("og:title"));

        let collection = render(&inkwell, &Target::Page(Page::Collection(Category::Prompts))).await;
        assert!(collection.contains("View Prompt"));
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("stories").unwrap(), Category::Stories);
        assert!(parse_category("novels").is_err());
    }
}
