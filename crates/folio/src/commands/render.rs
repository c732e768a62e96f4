//! Render a single post to HTML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_markdown::Renderer;

use crate::config::FolioConfig;

/// Render a post's body to an HTML string.
pub fn render_file(config: &FolioConfig, file: &Path, highlight: bool) -> Result<String> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut options = config.render.options();
    options.highlight &= highlight;

    Ok(Renderer::new(options).render_document(&source).html)
}

/// Run the render command.
pub fn run(config: &FolioConfig, file: &Path, highlight: bool) -> Result<()> {
    println!("{}", render_file(config, file, highlight)?);
    Ok(())
}
