//! Print the post catalog.

use std::path::PathBuf;

use anyhow::Result;
use folio_markdown::scan_posts;

use crate::config::FolioConfig;

/// Run the list command.
pub fn run(config: &FolioConfig, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.site.posts.clone());

    let posts = scan_posts(&dir)?;
    tracing::info!("Found {} posts in {}", posts.len(), dir.display());

    println!("{}", serde_json::to_string_pretty(&posts)?);
    Ok(())
}
