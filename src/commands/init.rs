//! Initialize a new Inkwell site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::Category;

const CONFIG_TEMPLATE: &str = r#"# Inkwell Configuration

# Site
title: The Inkwell
description: Poetry and Prose by American Romance Writer, Beau Holliday
author: Beau Holliday
tagline: "💌 Poetry and Prose by Beau Holliday"

# Assets
placeholder_image: /assets/media/beauholliday.jpg
profile_image: /assets/media/profile-image.jpg

# Sources
posts_dir: posts
# remote_url: https://example.com/posts/
document_extension: md

# Rendering
excerpt_length: 150
share_excerpt_length: 60
date_format: "%b %-d, %Y"
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    // One directory per category
    for category in Category::ALL {
        fs::create_dir_all(target_dir.join("posts").join(category.as_str()))?;
    }

    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    let welcome_path = target_dir.join("posts/poetry/first-light.md");
    if !welcome_path.exists() {
        let today = crate::helpers::today_string();
        fs::write(
            &welcome_path,
            format!(
                "---\ntitle: First Light\ndate: {}\n---\nThe pages are open,\nthe ink is still wet.\n",
                today
            ),
        )?;
    }

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}
