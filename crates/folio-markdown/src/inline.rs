//! Inline span rendering: code spans, links, images and emphasis.
//!
//! Code spans, links and images are rendered first and replaced by opaque
//! placeholders. Emphasis then runs over the whole escaped line, so it can
//! wrap those spans, while code text, URLs and alt text are never fed to the
//! emphasis rules.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;
use crate::render::RenderOptions;

/// Delimits placeholder indices. A private-use character, so it never
/// collides with emphasis delimiters or escaped entities.
const PLACEHOLDER_MARK: char = '\u{E000}';

static CODE_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("Invalid code span regex"));

// One alternation so a link can never match starting at an image's `[`.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)|\[([^\]]+)\]\(([^)]+)\)").expect("Invalid link regex")
});

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x{E000}(\d+)\x{E000}").expect("Invalid placeholder regex")
});

/// Emphasis rules, longest delimiter first.
static EMPHASIS_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\*\*\*([^*]+)\*\*\*", "<strong><em>${1}</em></strong>"),
        (r"___([^_]+)___", "<strong><em>${1}</em></strong>"),
        (r"\*\*([^*]+)\*\*", "<strong>${1}</strong>"),
        (r"__([^_]+)__", "<strong>${1}</strong>"),
        (r"\*([^*]+)\*", "<em>${1}</em>"),
        (r"_([^_]+)_", "<em>${1}</em>"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("Invalid emphasis regex"),
            replacement,
        )
    })
    .collect()
});

/// Escaped line text with rendered spans held out behind placeholders.
#[derive(Debug, Default)]
struct Skeleton {
    text: String,
    spans: Vec<String>,
}

impl Skeleton {
    fn push_text(&mut self, raw: &str) {
        // A literal mark in the source must not read as a placeholder
        let raw = raw.replace(PLACEHOLDER_MARK, "\u{FFFD}");
        self.text.push_str(&escape_html(&raw));
    }

    fn push_span(&mut self, html: String) {
        self.text.push(PLACEHOLDER_MARK);
        self.text.push_str(&self.spans.len().to_string());
        self.text.push(PLACEHOLDER_MARK);
        self.spans.push(html);
    }

    /// Apply emphasis to the whole line, then put the spans back.
    fn finish(self) -> String {
        let emphasized = emphasize(&self.text);

        PLACEHOLDER_RE
            .replace_all(&emphasized, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.spans.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Render the inline spans of a single line of markup.
pub fn render_inline(text: &str, options: &RenderOptions) -> String {
    let mut skeleton = Skeleton::default();
    let mut last = 0;

    for caps in CODE_SPAN_RE.captures_iter(text) {
        let Some(span) = caps.get(0) else { continue };

        push_links(&text[last..span.start()], options, &mut skeleton);
        skeleton.push_span(format!("<code>{}</code>", escape_html(&caps[1])));

        last = span.end();
    }

    push_links(&text[last..], options, &mut skeleton);
    skeleton.finish()
}

/// Hold out links and images from the text between code spans.
fn push_links(text: &str, options: &RenderOptions, skeleton: &mut Skeleton) {
    let mut last = 0;

    for caps in LINK_RE.captures_iter(text) {
        let Some(span) = caps.get(0) else { continue };

        skeleton.push_text(&text[last..span.start()]);
        skeleton.push_span(link_html(&caps, options));

        last = span.end();
    }

    skeleton.push_text(&text[last..]);
}

fn link_html(caps: &Captures<'_>, options: &RenderOptions) -> String {
    if let (Some(alt), Some(src)) = (caps.get(1), caps.get(2)) {
        return format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            escape_html(src.as_str()),
            escape_html(alt.as_str())
        );
    }

    let label = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
    let href = caps.get(4).map(|m| m.as_str()).unwrap_or_default();

    let target = if options.external_links_new_tab && href.starts_with("http") {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };

    format!(
        r#"<a href="{}"{}>{}</a>"#,
        escape_html(href),
        target,
        emphasize(&escape_html(label))
    )
}

/// Apply the emphasis rules to already-escaped text.
fn emphasize(escaped: &str) -> String {
    EMPHASIS_RULES
        .iter()
        .fold(escaped.to_string(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
}
