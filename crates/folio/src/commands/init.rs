//! Initialize a blog in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::CONFIG_FILE;

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");
    scaffold(Path::new("."), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio serve' to preview your posts.");

    Ok(())
}

/// Write the config file and a sample post under `root`.
fn scaffold(root: &Path, yes: bool) -> Result<()> {
    let posts_dir = root.join("posts");

    if posts_dir.exists() {
        if !yes {
            tracing::warn!("posts/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(&posts_dir).context("Failed to create posts directory")?;
    }

    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() || yes {
        fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write folio.toml")?;
        tracing::info!("Created {}", CONFIG_FILE);
    }

    let post_path = posts_dir.join("hello-world.md");
    if !post_path.exists() || yes {
        fs::write(&post_path, DEFAULT_POST).context("Failed to write hello-world.md")?;
        tracing::info!("Created posts/hello-world.md");
    }

    Ok(())
}

pub(crate) const DEFAULT_CONFIG: &str = r#"# Folio Configuration

[site]
# Site title
title = "My Blog"

# Base URL (for deployment)
base_url = "/"

# Directory containing markdown posts
posts = "posts"

# Output directory for built site
output = "dist"

# Static files served by `folio serve`
public = "public"

[render]
# Render numbered lists as <ol> instead of <ul>
ordered_lists = false

# Highlight fenced code blocks
highlight = true

# Open http(s) links in a new tab
external_links_new_tab = true

[build]
# Enable minification
minify = true

# Extra stylesheets copied into assets/
styles = []
"#;

const DEFAULT_POST: &str = r#"---
title: Hello, World
publishedAt: 2026-01-01
summary: A first post written with folio.
author: You
tags: meta, getting-started
---

# Hello, World

This is your first post, rendered by **folio**.

## Writing posts

Each post is a `.md` file in `posts/` with a short front matter block:

```bash
---
title: Post Title
publishedAt: 2026-01-01
tags: rust, web
---
```

> Front matter values are plain strings.

- Headings, lists and quotes
- *Emphasis* and **strong** text
- [Links](https://example.com) and images

---

```rust
fn main() {
    // Code blocks keep their indentation
    println!("Hello from folio");
}
```
"#;
