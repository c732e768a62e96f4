//! Template engine for rendering blog pages.

use minijinja::{context, Environment};
use serde::Serialize;

use folio_markdown::PostSummary;

/// Site-wide values shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct Site {
    /// Site title
    pub title: String,
    /// Base URL, always ending in `/`
    pub base_url: String,
    /// Extra stylesheet URLs
    pub styles: Vec<String>,
}

impl Site {
    /// URL of a post page.
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}blog/{}/", self.base_url, slug)
    }
}

/// A post's metadata prepared for display.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub slug: String,
    pub url: String,
    pub title: String,
    /// ISO date for `<time datetime>`
    pub date: Option<String>,
    /// Human-readable date
    pub date_display: Option<String>,
    pub summary: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

impl PostView {
    pub fn new(site: &Site, post: &PostSummary) -> Self {
        Self {
            slug: post.slug.clone(),
            url: site.post_url(&post.slug),
            title: post.title.clone(),
            date: post.published_at.map(|d| d.to_string()),
            date_display: post.display_date(),
            summary: post.summary.clone(),
            author: post.author.clone(),
            tags: post.tags.clone(),
        }
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("post.html".to_string(), POST_TEMPLATE.to_string())
            .expect("Failed to add post template");

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        env.add_template_owned("error.html".to_string(), ERROR_TEMPLATE.to_string())
            .expect("Failed to add error template");

        Self { env }
    }

    /// Render a single post page around its rendered body.
    pub fn render_post(
        &self,
        site: &Site,
        post: &PostView,
        content: &str,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("post.html")?.render(context! {
            site => site,
            title => &post.title,
            post => post,
            content => content,
        })
    }

    /// Render the blog index listing.
    pub fn render_index(&self, site: &Site, posts: &[PostView]) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context! {
            site => site,
            title => "Blog",
            posts => posts,
        })
    }

    /// Render the page shown when content cannot be loaded.
    pub fn render_error(&self, site: &Site, message: &str) -> Result<String, minijinja::Error> {
        self.env.get_template("error.html")?.render(context! {
            site => site,
            title => "Not found",
            message => message,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site.title }}</title>
  <link rel="stylesheet" href="{{ site.base_url }}assets/main.css">
  {% for style in site.styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body>
  <header class="site-header">
    <a href="{{ site.base_url }}" class="site-title">{{ site.title }}</a>
  </header>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
</body>
</html>"##;

const POST_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="post">
  <header class="post-meta">
    <h1>{{ post.title }}</h1>
    <div class="post-details">
      {% if post.date %}<time datetime="{{ post.date }}">{{ post.date_display }}</time>{% endif %}
      {% if post.author %}<span class="post-author">• {{ post.author }}</span>{% endif %}
      {% if post.tags %}<div class="tags">
        {% for tag in post.tags %}<span class="tag">{{ tag }}</span>{% endfor %}
      </div>{% endif %}
    </div>
  </header>
  <div class="content">
    {{ content | safe }}
  </div>
</article>
{% endblock %}"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="posts">
  <h1>Blog</h1>
  {% for post in posts %}
  <a href="{{ post.url }}" class="card">
    <div class="card-meta">
      <h2>{{ post.title }}</h2>
      {% if post.date_display %}<p class="muted">{{ post.date_display }}</p>{% endif %}
    </div>
    {% if post.summary %}<p class="muted">{{ post.summary }}</p>{% endif %}
    {% if post.tags %}<div class="tags">
      {% for tag in post.tags %}<span class="tag">{{ tag }}</span>{% endfor %}
    </div>{% endif %}
  </a>
  {% else %}
  <p>No blog posts available yet. Add markdown files to the posts folder!</p>
  {% endfor %}
</section>
{% endblock %}"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="load-error">
  <p>{{ message }}</p>
  <a href="{{ site.base_url }}">← Back to Blog</a>
</div>
{% endblock %}"##;
