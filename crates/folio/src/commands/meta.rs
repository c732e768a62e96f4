//! Print a post's front matter.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_markdown::read_front_matter;

/// Run the meta command.
pub fn run(file: &Path) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let front_matter = read_front_matter(&source);
    if front_matter.is_empty() {
        tracing::warn!("No front matter in {}", file.display());
    }

    println!("{}", serde_json::to_string_pretty(&front_matter)?);
    Ok(())
}
