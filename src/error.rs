//! Error types

use thiserror::Error;

/// Errors raised by the content pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid source URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("aggregation task failed: {0}")]
    Aggregation(#[from] tokio::task::JoinError),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown page: {0}")]
    UnknownPage(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
