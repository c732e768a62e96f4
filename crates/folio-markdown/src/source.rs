//! Document sources: where raw post text comes from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::frontmatter::{parse_document, Document};
use crate::render::{RenderOptions, RenderedDocument, Renderer};

/// File extension of post documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Errors that can occur when fetching a document.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Invalid document id: {0:?}")]
    InvalidId(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Anything that can supply raw document text by identifier.
pub trait DocumentSource {
    /// Fetch the raw text of the document with the given id.
    fn fetch(&self, id: &str) -> Result<String, SourceError>;
}

/// Reads `{root}/{id}.md` from the filesystem.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a document id resolves to.
    pub fn path_for(&self, id: &str) -> Result<PathBuf, SourceError> {
        if !is_valid_id(id) {
            return Err(SourceError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{id}.{DOCUMENT_EXTENSION}")))
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self, id: &str) -> Result<String, SourceError> {
        let path = self.path_for(id)?;

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound(id.to_string()),
            _ => SourceError::Io { path, source: e },
        })
    }
}

/// Ids are single path segments: no separators, no leading dot.
pub(crate) fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.starts_with('.') && !id.contains(['/', '\\', '\0'])
}

/// Fetch and split a document, treating any fetch failure as no content.
pub fn load(source: &impl DocumentSource, id: &str) -> Option<Document> {
    source.fetch(id).ok().map(|raw| parse_document(&raw))
}

/// Fetch and render a document, treating any fetch failure as no content.
pub fn render_from(
    source: &impl DocumentSource,
    id: &str,
    options: RenderOptions,
) -> Option<RenderedDocument> {
    source
        .fetch(id)
        .ok()
        .map(|raw| Renderer::new(options).render_document(&raw))
}
