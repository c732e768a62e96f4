//! Markdown to HTML rendering pipeline.

use serde::{Deserialize, Serialize};

use crate::block::render_lines;
use crate::codeblock::{split_fences, Chunk};
use crate::frontmatter::{extract_front_matter, FrontMatter};
use crate::highlight::highlight;
use crate::paragraph::wrap_paragraphs;

/// Switches for optional rendering behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Wrap runs of numbered items in `<ol>` instead of `<ul>`
    pub ordered_lists: bool,

    /// Run the syntax highlighter over code blocks after rendering
    pub highlight: bool,

    /// Add `target="_blank"` to links whose URL starts with `http`
    pub external_links_new_tab: bool,
}

/// A document rendered to HTML, with its metadata kept alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Front matter of the source document
    pub front_matter: FrontMatter,

    /// Rendered body fragment
    pub html: String,
}

/// Markdown renderer.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a document body (front matter already removed) to HTML.
    pub fn render(&self, body: &str) -> String {
        let mut lines = Vec::new();

        // Code blocks are rendered whole; later phases only see markup runs
        for chunk in split_fences(body) {
            match chunk {
                Chunk::Lines(markup) => render_lines(&markup, &self.options, &mut lines),
                Chunk::Code(block) => lines.push(block.to_html()),
            }
        }

        let html = wrap_paragraphs(&lines.join("\n"));

        if self.options.highlight {
            highlight(&html)
        } else {
            html
        }
    }

    /// Split off front matter and render the body.
    pub fn render_document(&self, source: &str) -> RenderedDocument {
        let (front_matter, body) = extract_front_matter(source);
        RenderedDocument {
            front_matter,
            html: self.render(body),
        }
    }
}

/// Render a document body with default options.
pub fn render(body: &str) -> String {
    Renderer::default().render(body)
}

/// Render a raw document (front matter and body) with the given options.
pub fn render_document(source: &str, options: RenderOptions) -> RenderedDocument {
    Renderer::new(options).render_document(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_heading() {
        assert_eq!(render("# Hello"), "<h1>Hello</h1>");
    }

    #[test]
    fn four_hashes_fall_through_to_paragraph() {
        assert_eq!(render("#### Hello"), "<p>#### Hello</p>");
    }

    #[test]
    fn renders_inline_code() {
        assert_eq!(render("`code`"), "<p><code>code</code></p>");
    }

    #[test]
    fn renders_fenced_code_block() {
        assert_eq!(
            render("```js\nvar x=1;\n```"),
            r#"<pre><code class="language-js">var x=1;</code></pre>"#
        );
    }

    #[test]
    fn renders_emphasis_in_one_paragraph() {
        assert_eq!(
            render("**bold** and *italic*"),
            "<p><strong>bold</strong> and <em>italic</em></p>"
        );
    }

    #[test]
    fn renders_one_list_for_consecutive_items() {
        let html = render("- a\n- b\n- c");

        assert_eq!(html, "<ul><li>a</li>\n<li>b</li>\n<li>c</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn code_block_owns_its_region() {
        let html = render("```\n# not a heading\n- not an item\n**not bold**\n```");

        assert!(!html.contains("<h1>"));
        assert!(!html.contains("<li>"));
        assert!(!html.contains("<strong>"));
        assert!(!html.contains("<p>"));
        assert!(html.contains("# not a heading"));
    }

    #[test]
    fn multi_line_code_keeps_indentation_and_is_never_wrapped() {
        let html = render("Intro\n\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n\nOutro");

        assert_eq!(
            html,
            concat!(
                "<p>Intro</p>\n",
                "\n",
                "<pre><code class=\"language-rust\">fn main() {\n",
                "    println!(&quot;hi&quot;);\n",
                "}</code></pre>\n",
                "\n",
                "<p>Outro</p>"
            )
        );
    }

    #[test]
    fn emphasis_spans_links_and_code() {
        assert_eq!(
            render("**[bold link](/x)**"),
            r#"<p><strong><a href="/x">bold link</a></strong></p>"#
        );
        assert_eq!(
            render("*see [x](/y) now*"),
            r#"<p><em>see <a href="/y">x</a> now</em></p>"#
        );
        assert_eq!(
            render("*call `f()` here*"),
            "<p><em>call <code>f()</code> here</em></p>"
        );
    }

    #[test]
    fn bold_link_in_list_item() {
        assert_eq!(
            render("- **[docs](/docs)** for more"),
            r#"<ul><li><strong><a href="/docs">docs</a></strong> for more</li></ul>"#
        );
    }

    #[test]
    fn empty_front_matter_block_renders_as_rules() {
        let doc = render_document("---\n---\nBody", RenderOptions::default());

        assert!(doc.front_matter.is_empty());
        assert_eq!(doc.html, "<hr>\n<hr>\n<p>Body</p>");
    }

    #[test]
    fn renders_full_document() {
        let source = r#"---
title: Post
---
# Title

Some *text* with a [link](/x).

> A quote

---

1. first
2. second

![pic](/p.png)"#;

        let doc = render_document(source, RenderOptions::default());

        assert_eq!(doc.front_matter.get("title"), Some("Post"));
        assert_eq!(
            doc.html,
            concat!(
                "<h1>Title</h1>\n",
                "\n",
                "<p>Some <em>text</em> with a <a href=\"/x\">link</a>.</p>\n",
                "\n",
                "<blockquote>A quote</blockquote>\n",
                "\n",
                "<hr>\n",
                "\n",
                "<ul><li>first</li>\n",
                "<li>second</li></ul>\n",
                "\n",
                "<p><img src=\"/p.png\" alt=\"pic\" loading=\"lazy\"></p>"
            )
        );
    }

    #[test]
    fn escapes_literal_html_in_text() {
        assert_eq!(
            render("<script>alert('x')</script>"),
            "<p>&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn literal_closing_tags_in_text_do_not_confuse_state() {
        let html = render("- a\n</ul> trick\nplain");

        assert_eq!(
            html,
            "<ul><li>a</li></ul>\n<p>&lt;/ul&gt; trick</p>\n<p>plain</p>"
        );
    }

    #[test]
    fn highlight_option_runs_highlighter() {
        let renderer = Renderer::new(RenderOptions {
            highlight: true,
            ..Default::default()
        });

        let html = renderer.render("```js\nreturn 1;\n```");

        assert_eq!(
            html,
            r#"<pre><code class="language-js"><span class="sh-keyword">return</span> 1;</code></pre>"#
        );
    }

    #[test]
    fn unclosed_fence_renders_as_text() {
        assert_eq!(render("```js\nvar x;"), "<p>```js</p>\n<p>var x;</p>");
    }

    #[test]
    fn empty_body_renders_empty() {
        assert_eq!(render(""), "");
    }
}
