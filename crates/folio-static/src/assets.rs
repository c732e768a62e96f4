//! Stylesheet generation and minification.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Main stylesheet, minified when requested. Falls back to the
    /// unminified text if minification fails.
    pub fn main_css(minify: bool) -> String {
        let css = Self::generate_css();
        if !minify {
            return css;
        }

        match Self::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Failed to minify stylesheet: {}", e);
                css
            }
        }
    }
}

// Highlighter classes (`sh-*`) read their colors from the theme variables.
const DEFAULT_CSS: &str = r#"/* Folio blog theme */

:root {
  --color-text: #1f2328;
  --color-text-muted: #656d76;
  --color-background: #ffffff;
  --color-border: #d0d7de;
  --color-code-background: #f6f8fa;
  --sh-keyword: #cf222e;
  --sh-string: #0a3069;
  --sh-comment: #6e7781;
  --content-max-width: 760px;
}

@media (prefers-color-scheme: dark) {
  :root {
    --color-text: #e6edf3;
    --color-text-muted: #8d96a0;
    --color-background: #0d1117;
    --color-border: #30363d;
    --color-code-background: #161b22;
    --sh-keyword: #ff7b72;
    --sh-string: #a5d6ff;
    --sh-comment: #8b949e;
  }
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--color-background);
  color: var(--color-text);
  line-height: 1.6;
}

.site-header,
.main {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 1rem;
}

.site-title {
  font-weight: 600;
  color: inherit;
  text-decoration: none;
}

.muted,
.post-details {
  color: var(--color-text-muted);
}

.post-details {
  display: flex;
  flex-wrap: wrap;
  gap: 1rem;
  align-items: center;
  margin-bottom: 2rem;
}

.card {
  display: block;
  padding: 1rem 0;
  border-bottom: 1px solid var(--color-border);
  color: inherit;
  text-decoration: none;
}

.tags {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
}

.tag {
  padding: 0.25rem 0.5rem;
  background: var(--color-border);
  border-radius: 0.25rem;
  font-size: 0.875rem;
}

.content img {
  max-width: 100%;
}

.content blockquote {
  margin: 1rem 0;
  padding-left: 1rem;
  border-left: 3px solid var(--color-border);
  color: var(--color-text-muted);
}

.content pre {
  padding: 1rem;
  background: var(--color-code-background);
  border-radius: 0.5rem;
  overflow-x: auto;
}

.content code {
  font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
  font-size: 0.9em;
}

.sh-keyword {
  color: var(--sh-keyword);
}

.sh-string {
  color: var(--sh-string);
}

.sh-comment {
  color: var(--sh-comment);
  font-style: italic;
}

.load-error {
  padding: 2rem;
  text-align: center;
  color: var(--color-text-muted);
}
"#;
