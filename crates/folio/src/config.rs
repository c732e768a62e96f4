//! Configuration file (`folio.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_markdown::RenderOptions;
use serde::Deserialize;

/// Default config file name.
pub const CONFIG_FILE: &str = "folio.toml";

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct FolioConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_posts_dir")]
    pub posts: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_public_dir")]
    pub public: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            posts: default_posts_dir(),
            output: default_output(),
            public: default_public_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderSettings {
    #[serde(default)]
    pub ordered_lists: bool,
    #[serde(default = "default_true")]
    pub highlight: bool,
    #[serde(default = "default_true")]
    pub external_links_new_tab: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            ordered_lists: false,
            highlight: true,
            external_links_new_tab: true,
        }
    }
}

impl RenderSettings {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            ordered_lists: self.ordered_lists,
            highlight: self.highlight,
            external_links_new_tab: self.external_links_new_tab,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_true")]
    pub minify: bool,
    /// Paths to CSS stylesheets to include
    #[serde(default)]
    pub styles: Vec<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: true,
            styles: vec![],
        }
    }
}

fn default_title() -> String {
    "Blog".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_posts_dir() -> PathBuf {
    PathBuf::from("posts")
}
fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}
fn default_true() -> bool {
    true
}

/// Load configuration if the file exists.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<FolioConfig> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(FolioConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: FolioConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load(&temp.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(config.site.title, "Blog");
        assert_eq!(config.site.posts, PathBuf::from("posts"));
        assert!(config.build.minify);
        assert!(config.render.highlight);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[site]\ntitle = \"Notes\"\n\n[render]\nordered_lists = true\n",
        )
        .unwrap();

        let config = load(&path).unwrap();

        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.site.output, PathBuf::from("dist"));
        assert_eq!(
            config.render.options(),
            RenderOptions {
                ordered_lists: true,
                highlight: true,
                external_links_new_tab: true,
            }
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[site\ntitle = ").unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn init_template_parses() {
        let config: FolioConfig =
            toml::from_str(crate::commands::init::DEFAULT_CONFIG).unwrap();

        assert_eq!(config.site.title, "My Blog");
        assert_eq!(config.build.styles, Vec::<String>::new());
    }
}
