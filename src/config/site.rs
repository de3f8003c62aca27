//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    /// Default author for posts that do not name one
    pub author: String,
    /// Attribution line shown in every share preview
    pub tagline: String,

    // Assets
    /// Fallback for `image` and `cover`
    pub placeholder_image: String,
    pub profile_image: String,

    // Sources
    /// Local document root, relative to the base directory
    pub posts_dir: String,
    /// Base URL serving `posts/{category}/` listings; overrides `posts_dir`
    pub remote_url: Option<String>,
    pub document_extension: String,

    // Rendering
    pub excerpt_length: usize,
    pub share_excerpt_length: usize,
    /// chrono format for card timestamps
    pub date_format: String,

    #[serde(default)]
    pub about: AboutConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "The Inkwell".to_string(),
            description: "Poetry and Prose by American Romance Writer, Beau Holliday".to_string(),
            author: "Beau Holliday".to_string(),
            tagline: "💌 Poetry and Prose by Beau Holliday".to_string(),

            placeholder_image: "/assets/media/beauholliday.jpg".to_string(),
            profile_image: "/assets/media/profile-image.jpg".to_string(),

            posts_dir: "posts".to_string(),
            remote_url: None,
            document_extension: "md".to_string(),

            excerpt_length: 150,
            share_excerpt_length: 60,
            date_format: "%b %-d, %Y".to_string(),

            about: AboutConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Document extension including the leading dot
    pub fn dotted_extension(&self) -> String {
        format!(".{}", self.document_extension.trim_start_matches('.'))
    }
}

/// Static content of the about page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub heading: String,
    pub bio: Vec<String>,
    pub highlight: String,
    pub mediums: Vec<String>,
    pub mediums_note: String,
    pub contact: ContactConfig,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            heading: "About Beau Holliday".to_string(),
            bio: vec![
                "Beau Holliday is an old soul from the Southwest, published independently, pursuing shamelessness through song, poem, and prose.".to_string(),
                "At the heart of The Inkwell lies a philosophy: that vulnerability is a language all its own, that desire deserves to be explored without apology, and that the spaces between words often hold more truth than the words themselves.".to_string(),
                "Beau's work spans across mediums, music that echoes with longing, poetry that cuts to the bone, short stories that linger in the margins of your thoughts. Each piece is an invitation to sit with the uncomfortable, the beautiful, and the deeply human experience of connection.".to_string(),
            ],
            highlight: "An American musician, writer, romance author, and poet. Beau's presence weaves across web and social media with an obsession for the romantic and sensual.".to_string(),
            mediums: vec![
                "Music & Songwriting".to_string(),
                "Poetry & Verse".to_string(),
                "Prose & Short Stories".to_string(),
                "Essay & Philosophical Writing".to_string(),
                "Academic Exploration".to_string(),
            ],
            mediums_note: "Each medium is a different language for the same obsession: understanding desire, intimacy, and the mysterious pull between two souls.".to_string(),
            contact: ContactConfig::default(),
        }
    }
}

/// Contact block of the about page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub website: String,
    pub phone: String,
    pub location: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            website: "https://www.BeauHolliday.com".to_string(),
            phone: "+1 (305) 432-4849".to_string(),
            location: "Southwest & Montreal".to_string(),
        }
    }
}
