//! List parsed posts

use anyhow::Result;

use crate::content::Category;
use crate::Inkwell;

/// List the posts of one category, or of all categories, newest first
pub async fn run(inkwell: &Inkwell, category: Option<Category>, json: bool) -> Result<()> {
    let categories = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    let repository = inkwell.assembler().repository();
    let posts = repository.aggregate_all(&categories).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in posts {
        let title = if post.title.is_empty() {
            "(untitled)"
        } else {
            post.title.as_str()
        };
        println!("  {} - {} [{}/{}]", post.date, title, post.category, post.id);
    }

    Ok(())
}
