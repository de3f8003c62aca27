//! Content module - categories, post records, parsing, discovery and aggregation

mod frontmatter;
pub mod loader;
mod post;
pub mod repository;
pub mod source;

pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use post::{sort_by_date_desc, Category, PostRecord};
pub use repository::PostRepository;
pub use source::{DirectorySource, DocumentSource, HttpSource, MemorySource, Response};
