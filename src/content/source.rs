//! Document sources - the transport discovery reads listings and documents from
//!
//! Paths are relative to the posts root: `poetry/` is a category listing,
//! `poetry/dusk.md` a document.

use async_trait::async_trait;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::helpers::html_escape;

/// Characters escaped when a file name is written into an `href`
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'/')
    .add(b'`');

/// Status and text body of a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: String::new(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP-like fetch capability
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch a listing (path ending in `/`) or a document.
    ///
    /// Non-success statuses are returned as responses; `Err` is reserved for
    /// transport failures.
    async fn fetch(&self, path: &str) -> Result<Response>;

    /// Human readable location, for logs
    fn describe(&self) -> String;
}

/// Render a minimal directory index in the style of a web server autoindex
pub fn render_index(path: &str, names: &[String]) -> String {
    let mut html = format!(
        "<html>\n<head><title>Index of /{0}</title></head>\n<body>\n<h1>Index of /{0}</h1>\n<ul>\n",
        html_escape(path)
    );
    for name in names {
        let (stem, slash) = match name.strip_suffix('/') {
            Some(stem) => (stem, "/"),
            None => (name.as_str(), ""),
        };
        html.push_str(&format!(
            "<li><a href=\"{}{}\">{}</a></li>\n",
            utf8_percent_encode(stem, PATH_SEGMENT),
            slash,
            html_escape(name)
        ));
    }
    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

/// Source backed by an HTTP server exposing directory listings
pub struct HttpSource {
    base: reqwest::Url,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source rooted at `base`, e.g. `https://example.com/posts/`
    pub fn new(base: &str) -> Result<Self> {
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = reqwest::Url::parse(&normalized).map_err(|e| Error::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Response> {
        let url = self.base.join(path).map_err(|e| Error::InvalidUrl {
            url: format!("{}{}", self.base, path),
            reason: e.to_string(),
        })?;

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(Response { status, body })
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Source backed by a local directory tree
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Map a request path into the root, refusing anything that escapes it
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let decoded = percent_decode_str(path).decode_utf8().ok()?;
        let relative = Path::new(decoded.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(self.root.join(relative))
    }

    fn list_dir(dir: &Path) -> Vec<String> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if entry.file_type().is_dir() {
                    Some(format!("{}/", name))
                } else {
                    Some(name)
                }
            })
            .collect()
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn fetch(&self, path: &str) -> Result<Response> {
        let Some(target) = self.resolve(path) else {
            return Ok(Response::not_found());
        };

        if target.is_dir() {
            let names = Self::list_dir(&target);
            return Ok(Response::ok(render_index(path, &names)));
        }

        if path.ends_with('/') || !target.is_file() {
            return Ok(Response::not_found());
        }

        let body = tokio::fs::read_to_string(&target).await?;
        Ok(Response::ok(body))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

enum MemoryEntry {
    Respond(Response),
    Fail(String),
}

/// In-memory source, listings are synthesized from the stored documents
#[derive(Default)]
pub struct MemorySource {
    entries: HashMap<String, MemoryEntry>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document at `path`, e.g. `poetry/dusk.md`
    pub fn with_document(mut self, path: &str, content: &str) -> Self {
        self.entries
            .insert(path.to_string(), MemoryEntry::Respond(Response::ok(content)));
        self
    }

    /// Answer `path` with a fixed response, overriding synthesized listings
    pub fn with_response(mut self, path: &str, status: u16, body: &str) -> Self {
        self.entries.insert(
            path.to_string(),
            MemoryEntry::Respond(Response {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    /// Make `path` fail with a transport error
    pub fn with_failure(mut self, path: &str, reason: &str) -> Self {
        self.entries
            .insert(path.to_string(), MemoryEntry::Fail(reason.to_string()));
        self
    }

    /// Direct children of a directory path, sorted
    fn children(&self, dir: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .keys()
            .filter_map(|key| key.strip_prefix(dir))
            .filter(|rest| !rest.is_empty())
            .map(|rest| match rest.split_once('/') {
                Some((sub, _)) => format!("{}/", sub),
                None => rest.to_string(),
            })
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<Response> {
        match self.entries.get(path) {
            Some(MemoryEntry::Respond(response)) => Ok(response.clone()),
            Some(MemoryEntry::Fail(reason)) => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                reason.clone(),
            ))),
            None if path.ends_with('/') => {
                let names = self.children(path);
                if names.is_empty() {
                    Ok(Response::not_found())
                } else {
                    Ok(Response::ok(render_index(path, &names)))
                }
            }
            None => Ok(Response::not_found()),
        }
    }

    fn describe(&self) -> String {
        format!("memory ({} entries)", self.entries.len())
    }
}
