//! Paragraph wrapping over rendered lines.
//!
//! Runs after block and inline rendering. Every remaining plain line becomes
//! a `<p>`, except lines that start a block element or sit inside a
//! multi-line one. Block elements are recognized by their own tag
//! substrings, which is sound because all source text has been escaped by
//! this point.

/// Which multi-line block construct the current line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Normal,
    InCode,
    InList,
    InBlockquote,
}

/// What to emit for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutput<'a> {
    /// Emit the line as-is
    Keep(&'a str),
    /// Wrap the line in a paragraph
    Paragraph(&'a str),
}

impl LineState {
    /// Closing tags that end this construct.
    fn closing_tags(self) -> &'static [&'static str] {
        match self {
            Self::Normal => &[],
            Self::InCode => &["</pre>"],
            Self::InList => &["</ul>", "</ol>"],
            Self::InBlockquote => &["</blockquote>"],
        }
    }

    fn is_closed_by(self, line: &str) -> bool {
        self.closing_tags().iter().any(|tag| line.contains(tag))
    }

    /// Construct opened by a line that starts with a block tag, or `None`
    /// for a line that does not start a block element. Single-line blocks
    /// (headings, rules, list items) open `Normal`.
    fn opened_by(line: &str) -> Option<Self> {
        const SINGLE_LINE: &[&str] = &["<h1>", "<h2>", "<h3>", "<hr>", "<li>"];

        if line.starts_with("<pre>") {
            Some(Self::InCode)
        } else if line.starts_with("<ul>") || line.starts_with("<ol>") {
            Some(Self::InList)
        } else if line.starts_with("<blockquote>") {
            Some(Self::InBlockquote)
        } else if SINGLE_LINE.iter().any(|tag| line.starts_with(tag)) {
            Some(Self::Normal)
        } else {
            None
        }
    }

    /// Classify one line and compute the state for the next line.
    ///
    /// `raw` is the untrimmed line; it is kept verbatim inside code so
    /// indentation survives.
    pub fn step<'a>(self, raw: &'a str) -> (LineOutput<'a>, LineState) {
        let line = raw.trim();

        match self {
            Self::InCode => {
                let next = if self.is_closed_by(line) { Self::Normal } else { self };
                (LineOutput::Keep(raw), next)
            }
            Self::InList | Self::InBlockquote => {
                let next = if self.is_closed_by(line) { Self::Normal } else { self };
                (LineOutput::Keep(line), next)
            }
            Self::Normal => match Self::opened_by(line) {
                Some(opened) => {
                    let next = if opened.is_closed_by(line) {
                        Self::Normal
                    } else {
                        opened
                    };
                    (LineOutput::Keep(line), next)
                }
                None if line.is_empty() => (LineOutput::Keep(line), Self::Normal),
                None => (LineOutput::Paragraph(line), Self::Normal),
            },
        }
    }
}

/// Wrap every unclaimed plain line of `html` in a paragraph.
pub fn wrap_paragraphs(html: &str) -> String {
    let mut state = LineState::default();
    let mut out = Vec::new();

    for raw in html.split('\n') {
        let (output, next) = state.step(raw);
        out.push(match output {
            LineOutput::Keep(line) => line.to_string(),
            LineOutput::Paragraph(line) => format!("<p>{line}</p>"),
        });
        state = next;
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wraps_plain_lines() {
        assert_eq!(wrap_paragraphs("Hello\n\n  World  "), "<p>Hello</p>\n\n<p>World</p>");
    }

    #[test]
    fn leaves_block_lines_alone() {
        let html = "<h1>T</h1>\n<hr>\n<blockquote>q</blockquote>\ntext";

        assert_eq!(
            wrap_paragraphs(html),
            "<h1>T</h1>\n<hr>\n<blockquote>q</blockquote>\n<p>text</p>"
        );
    }

    #[test]
    fn lines_inside_code_are_kept_verbatim() {
        let html = "<pre><code class=\"language-rust\">fn main() {\n    body();\n}</code></pre>\nafter";

        assert_eq!(
            wrap_paragraphs(html),
            "<pre><code class=\"language-rust\">fn main() {\n    body();\n}</code></pre>\n<p>after</p>"
        );
    }

    #[test]
    fn list_lines_are_never_wrapped() {
        let html = "<ul><li>a</li>\n<li>b</li>\n<li>c</li></ul>\nafter";

        assert_eq!(
            wrap_paragraphs(html),
            "<ul><li>a</li>\n<li>b</li>\n<li>c</li></ul>\n<p>after</p>"
        );
    }

    #[test]
    fn closing_line_is_not_wrapped() {
        let (output, next) = LineState::InCode.step("end</code></pre>");

        assert_eq!(output, LineOutput::Keep("end</code></pre>"));
        assert_eq!(next, LineState::Normal);
    }

    #[test]
    fn single_line_blocks_do_not_carry_state() {
        let (_, next) = LineState::Normal.step("<blockquote>one line</blockquote>");
        assert_eq!(next, LineState::Normal);

        let (_, next) = LineState::Normal.step("<ul><li>open</li>");
        assert_eq!(next, LineState::InList);
    }

    #[test]
    fn inline_markup_at_line_start_is_still_a_paragraph() {
        assert_eq!(
            wrap_paragraphs("<strong>bold</strong> text"),
            "<p><strong>bold</strong> text</p>"
        );
    }
}
