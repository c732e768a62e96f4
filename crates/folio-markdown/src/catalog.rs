//! Post catalog built from front matter alone.
//!
//! List and index views show title, date, summary and tags without
//! rendering any post body.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::frontmatter::{read_front_matter, FrontMatter};
use crate::source::{is_valid_id, DOCUMENT_EXTENSION};

/// Title used when a post has none.
pub const UNTITLED: &str = "Untitled";

/// Metadata of one post, as shown in list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// Document id (file stem) used to fetch the post
    #[serde(skip)]
    pub id: String,

    /// URL slug (`slug` key when it is a single path segment, else the
    /// file stem)
    pub slug: String,

    pub title: String,

    /// Publication date, when `publishedAt` parses
    pub published_at: Option<NaiveDate>,

    /// `publishedAt` exactly as written
    #[serde(skip)]
    pub published_raw: Option<String>,

    pub summary: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    pub tags: Vec<String>,
}

impl PostSummary {
    /// Build a summary from front matter, falling back to `id` for the slug.
    pub fn from_front_matter(id: &str, front_matter: &FrontMatter) -> Self {
        Self {
            id: id.to_string(),
            slug: front_matter
                .get("slug")
                .filter(|slug| is_valid_id(slug))
                .unwrap_or(id)
                .to_string(),
            title: front_matter
                .get_non_empty("title")
                .unwrap_or(UNTITLED)
                .to_string(),
            published_at: front_matter.get("publishedAt").and_then(parse_date),
            published_raw: front_matter.get_non_empty("publishedAt").map(str::to_string),
            summary: front_matter.get("summary").unwrap_or_default().to_string(),
            author: front_matter.get_non_empty("author").map(str::to_string),
            tags: front_matter.get("tags").map(split_tags).unwrap_or_default(),
        }
    }

    /// Publication date formatted for display, or the raw value when it
    /// does not parse.
    pub fn display_date(&self) -> Option<String> {
        self.published_at
            .map(format_date)
            .or_else(|| self.published_raw.clone())
    }
}

/// Errors that can occur when scanning posts.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Posts directory not found: {0}")]
    MissingDirectory(PathBuf),
}

/// Split a comma-separated tag list, dropping empty entries.
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a `YYYY-MM-DD` date or the date part of an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

/// Format a date as `October 19, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Scan a directory for posts and summarize them, newest first.
///
/// Only files directly inside `dir` are posts, matching the ids a
/// [`DirectorySource`](crate::source::DirectorySource) can fetch.
/// Files that cannot be read are skipped. Undated posts sort after dated
/// ones; ties are broken by title.
pub fn scan_posts(dir: &Path) -> Result<Vec<PostSummary>, CatalogError> {
    if !dir.is_dir() {
        return Err(CatalogError::MissingDirectory(dir.to_path_buf()));
    }

    let paths: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_document(p))
        .collect();

    let mut posts: Vec<PostSummary> = paths
        .par_iter()
        .filter_map(|path| {
            let id = path.file_stem()?.to_str()?;
            let source = fs::read_to_string(path).ok()?;
            Some(PostSummary::from_front_matter(id, &read_front_matter(&source)))
        })
        .collect();

    posts.sort_by(newest_first);
    Ok(posts)
}

fn is_document(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION)
}

fn newest_first(a: &PostSummary, b: &PostSummary) -> Ordering {
    let by_date = match (a.published_at, b.published_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a.title.cmp(&b.title))
}
