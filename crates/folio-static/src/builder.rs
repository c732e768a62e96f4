//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use folio_markdown::{
    scan_posts, DirectorySource, DocumentSource, PostSummary, RenderOptions, Renderer,
};

use crate::assets::AssetPipeline;
use crate::templates::{PostView, Site, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory containing `.md` posts
    pub posts_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,

    /// Markdown rendering switches
    pub render: RenderOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("posts"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Blog".to_string(),
            styles: vec![],
            render: RenderOptions {
                highlight: true,
                external_links_new_tab: true,
                ..Default::default()
            },
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of post pages generated
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read posts: {0}")]
    ReadError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to serialize post index: {0}")]
    IndexError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    site: Site,
    source: DirectorySource,
    renderer: Renderer,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let site = Site {
            title: config.title.clone(),
            base_url: normalize_base_url(&config.base_url),
            styles: stylesheet_urls(&config),
        };

        Self {
            source: DirectorySource::new(&config.posts_dir),
            renderer: Renderer::new(config.render),
            templates: TemplateEngine::new(),
            site,
            config,
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let posts = unique_slugs(
            scan_posts(&self.config.posts_dir)
                .map_err(|e| BuildError::ReadError(e.to_string()))?,
        );

        tracing::info!(
            "Found {} posts in {}",
            posts.len(),
            self.config.posts_dir.display()
        );

        // Rendering is pure, so posts build in parallel
        let results: Vec<Result<(), BuildError>> =
            posts.par_iter().map(|post| self.build_post(post)).collect();

        for result in results {
            result?;
        }

        self.generate_index(&posts)?;
        self.generate_post_data(&posts)?;
        self.generate_assets()?;
        self.generate_sitemap(&posts)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: posts.len(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Output path of a post page.
    fn post_output_path(&self, slug: &str) -> PathBuf {
        self.config
            .output_dir
            .join("blog")
            .join(slug)
            .join("index.html")
    }

    /// Render and write a single post.
    fn build_post(&self, post: &PostSummary) -> Result<(), BuildError> {
        let raw = self
            .source
            .fetch(&post.id)
            .map_err(|e| BuildError::ReadError(e.to_string()))?;

        let rendered = self.renderer.render_document(&raw);
        let view = PostView::new(&self.site, post);

        let html = self
            .templates
            .render_post(&self.site, &view, &rendered.html)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let output_path = self.post_output_path(&post.slug);
        write_file(&output_path, html)?;

        tracing::debug!("Wrote {}", output_path.display());
        Ok(())
    }

    /// Generate the blog index page.
    fn generate_index(&self, posts: &[PostSummary]) -> Result<(), BuildError> {
        let views: Vec<PostView> = posts.iter().map(|p| PostView::new(&self.site, p)).collect();

        let html = self
            .templates
            .render_index(&self.site, &views)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        write_file(&self.config.output_dir.join("index.html"), html)
    }

    /// Generate the JSON post index used by list views.
    fn generate_post_data(&self, posts: &[PostSummary]) -> Result<(), BuildError> {
        let json = serde_json::to_string_pretty(posts)
            .map_err(|e| BuildError::IndexError(e.to_string()))?;

        write_file(
            &self.config.output_dir.join("data").join("blog-posts.json"),
            json,
        )
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");

        write_file(
            &assets_dir.join("main.css"),
            AssetPipeline::main_css(self.config.minify),
        )?;

        // Copy configured stylesheets
        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let filename = stylesheet_name(&source_path);
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                write_file(&assets_dir.join(filename), content)?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, posts: &[PostSummary]) -> Result<(), BuildError> {
        let urls: Vec<String> = std::iter::once(self.site.base_url.clone())
            .chain(posts.iter().map(|p| self.site.post_url(&p.slug)))
            .map(|url| format!("  <url>\n    <loc>{}</loc>\n  </url>", url))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        write_file(&self.config.output_dir.join("sitemap.xml"), sitemap)?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.site.base_url
        );
        write_file(&self.config.output_dir.join("robots.txt"), robots)
    }
}

/// Keep the first post for each slug, warning about the ones dropped.
fn unique_slugs(posts: Vec<PostSummary>) -> Vec<PostSummary> {
    let mut seen = HashSet::new();

    posts
        .into_iter()
        .filter(|post| {
            let first = seen.insert(post.slug.clone());
            if !first {
                tracing::warn!(
                    "Skipping post {}: slug {:?} is already used",
                    post.id,
                    post.slug
                );
            }
            first
        })
        .collect()
}

/// Write a file, creating its parent directory.
fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }
    fs::write(path, contents).map_err(|e| BuildError::WriteError(e.to_string()))
}

/// Ensure a base URL ends with exactly one `/`.
pub fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

fn stylesheet_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("style.css")
}

fn stylesheet_urls(config: &BuildConfig) -> Vec<String> {
    let base_url = normalize_base_url(&config.base_url);
    config
        .styles
        .iter()
        .map(|s| format!("{}assets/{}", base_url, stylesheet_name(Path::new(s))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_post(dir: &Path, name: &str, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    #[tokio::test]
    async fn builds_simple_site() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("posts");
        let out = temp.path().join("dist");

        write_post(
            &posts,
            "hello.md",
            "---\ntitle: Hello\npublishedAt: 2024-01-01\n---\n# Welcome\n\n```js\nconst a = 1;\n```",
        );

        let config = BuildConfig {
            posts_dir: posts,
            output_dir: out.clone(),
            ..Default::default()
        };

        let result = StaticBuilder::new(config).build().await.unwrap();

        assert_eq!(result.pages, 1);
        assert!(out.join("index.html").exists());
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("sitemap.xml").exists());

        let page = fs::read_to_string(out.join("blog/hello/index.html")).unwrap();
        assert!(page.contains("<h1>Welcome</h1>"));
        assert!(page.contains(r#"<span class="sh-keyword">const</span>"#));
    }

    #[tokio::test]
    async fn uses_slug_for_output_path() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("posts");
        let out = temp.path().join("dist");

        write_post(&posts, "2024-01-01-post.md", "---\ntitle: Post\nslug: pretty\n---\nBody");

        StaticBuilder::new(BuildConfig {
            posts_dir: posts,
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        assert!(out.join("blog/pretty/index.html").exists());
    }

    #[tokio::test]
    async fn generates_post_data() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("posts");
        let out = temp.path().join("dist");

        write_post(
            &posts,
            "a.md",
            "---\ntitle: Searchable\ntags: rust, web\n---\nBody",
        );

        StaticBuilder::new(BuildConfig {
            posts_dir: posts,
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        let data = fs::read_to_string(out.join("data/blog-posts.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(json[0]["title"], "Searchable");
        assert_eq!(json[0]["tags"][1], "web");
    }

    #[tokio::test]
    async fn missing_posts_dir_is_an_error() {
        let temp = tempdir().unwrap();

        let result = StaticBuilder::new(BuildConfig {
            posts_dir: temp.path().join("missing"),
            output_dir: temp.path().join("dist"),
            ..Default::default()
        })
        .build()
        .await;

        assert!(matches!(result, Err(BuildError::ReadError(_))));
    }

    #[tokio::test]
    async fn ignores_posts_in_subdirectories() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("posts");
        let out = temp.path().join("dist");

        write_post(&posts, "top.md", "---\ntitle: Top\n---\nBody");
        write_post(&posts.join("drafts"), "nested.md", "---\ntitle: Nested\n---\nBody");

        let result = StaticBuilder::new(BuildConfig {
            posts_dir: posts,
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        assert_eq!(result.pages, 1);
        assert!(out.join("blog/top/index.html").exists());
        assert!(!out.join("blog/nested").exists());
    }

    #[tokio::test]
    async fn duplicate_slug_keeps_first_post() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("posts");
        let out = temp.path().join("dist");

        write_post(
            &posts,
            "a.md",
            "---\ntitle: Newer\nslug: same\npublishedAt: 2024-02-01\n---\nNewer body",
        );
        write_post(
            &posts,
            "b.md",
            "---\ntitle: Older\nslug: same\npublishedAt: 2024-01-01\n---\nOlder body",
        );

        let result = StaticBuilder::new(BuildConfig {
            posts_dir: posts,
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        assert_eq!(result.pages, 1);
        let page = fs::read_to_string(out.join("blog/same/index.html")).unwrap();
        assert!(page.contains("Newer body"));

        let data = fs::read_to_string(out.join("data/blog-posts.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn normalizes_base_url() {
        assert_eq!(normalize_base_url("/"), "/");
        assert_eq!(normalize_base_url(""), "/");
        assert_eq!(normalize_base_url("/blog"), "/blog/");
        assert_eq!(normalize_base_url("https://x.dev//"), "https://x.dev/");
    }
}
