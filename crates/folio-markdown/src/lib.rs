//! Front matter extraction and lightweight markdown rendering.
//!
//! This crate splits author-written posts into `key: value` metadata and a
//! body, renders the body to an HTML fragment, and builds post catalogs
//! from metadata alone.

pub mod block;
pub mod catalog;
pub mod codeblock;
pub mod escape;
pub mod frontmatter;
pub mod highlight;
pub mod inline;
pub mod paragraph;
pub mod render;
pub mod source;

pub use catalog::{format_date, scan_posts, split_tags, CatalogError, PostSummary};
pub use codeblock::{CodeBlock, Language};
pub use frontmatter::{
    extract_front_matter, parse_document, read_front_matter, Document, FrontMatter,
};
pub use highlight::highlight;
pub use paragraph::LineState;
pub use render::{render, render_document, RenderOptions, RenderedDocument, Renderer};
pub use source::{load, render_from, DirectorySource, DocumentSource, SourceError};
