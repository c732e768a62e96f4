//! Static site build command.

use std::path::PathBuf;

use anyhow::Result;
use folio_static::{BuildConfig, StaticBuilder};

use crate::config::FolioConfig;

fn build_config(
    file_config: &FolioConfig,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> BuildConfig {
    BuildConfig {
        posts_dir: file_config.site.posts.clone(),
        output_dir: output.unwrap_or_else(|| file_config.site.output.clone()),
        minify: minify.unwrap_or(file_config.build.minify),
        base_url: file_config.site.base_url.clone(),
        title: file_config.site.title.clone(),
        styles: file_config.build.styles.clone(),
        render: file_config.render.options(),
    }
}

/// Run the build command.
pub async fn run(
    file_config: &FolioConfig,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let result = StaticBuilder::new(build_config(file_config, output, minify))
        .build()
        .await?;

    tracing::info!("Built {} posts in {}ms", result.pages, result.duration_ms);
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flags_override_config() {
        let file_config = FolioConfig::default();

        let config = build_config(&file_config, Some(PathBuf::from("public_html")), Some(false));

        assert_eq!(config.output_dir, PathBuf::from("public_html"));
        assert!(!config.minify);
        assert_eq!(config.posts_dir, PathBuf::from("posts"));
    }

    #[test]
    fn config_values_apply_without_flags() {
        let config = build_config(&FolioConfig::default(), None, None);

        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert!(config.minify);
        assert!(config.render.highlight);
    }
}
