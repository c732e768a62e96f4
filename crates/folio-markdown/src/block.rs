//! Line-level block recognition: headings, blockquotes, rules and lists.

use crate::inline::render_inline;
use crate::render::RenderOptions;

/// A single line of markup, classified by its leading syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `#`, `##` or `###` followed by a space
    Heading { level: u8, text: &'a str },
    /// `> ` prefix
    Quote(&'a str),
    /// A line of exactly `---`
    Rule,
    /// `* `, `- ` or `<digits>. ` prefix
    Item { ordered: bool, text: &'a str },
    /// Anything else, including blank lines
    Text(&'a str),
}

impl<'a> Line<'a> {
    /// Classify a line. Markers must start at the first column.
    pub fn classify(line: &'a str) -> Self {
        for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
            if let Some(text) = line.strip_prefix(prefix) {
                return Self::Heading { level, text };
            }
        }

        if let Some(text) = line.strip_prefix("> ") {
            return Self::Quote(text);
        }

        if line.trim_end() == "---" {
            return Self::Rule;
        }

        if let Some(text) = line
            .strip_prefix("* ")
            .or_else(|| line.strip_prefix("- "))
        {
            return Self::Item {
                ordered: false,
                text,
            };
        }

        let digits = line.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            if let Some(text) = line[digits..].strip_prefix(". ") {
                return Self::Item {
                    ordered: true,
                    text,
                };
            }
        }

        Self::Text(line)
    }
}

/// Container element for a run of list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// Render a run of markup lines (no code fences) into HTML lines.
///
/// Each maximal run of consecutive list items is wrapped in one container:
/// the opening tag is prefixed to its first item and the closing tag
/// appended to its last.
pub fn render_lines(lines: &[&str], options: &RenderOptions, out: &mut Vec<String>) {
    let mut open_list: Option<ListKind> = None;

    for line in lines {
        let line = Line::classify(line);

        let Line::Item { ordered, text } = line else {
            close_list(&mut open_list, out);
            out.push(render_line(line, options));
            continue;
        };

        let kind = if ordered && options.ordered_lists {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        };

        let item = format!("<li>{}</li>", render_inline(text, options));
        if open_list == Some(kind) {
            out.push(item);
        } else {
            close_list(&mut open_list, out);
            out.push(format!("<{}>{}", kind.tag(), item));
            open_list = Some(kind);
        }
    }

    close_list(&mut open_list, out);
}

fn close_list(open_list: &mut Option<ListKind>, out: &mut [String]) {
    if let Some(kind) = open_list.take() {
        if let Some(last) = out.last_mut() {
            last.push_str(&format!("</{}>", kind.tag()));
        }
    }
}

fn render_line(line: Line<'_>, options: &RenderOptions) -> String {
    match line {
        Line::Heading { level, text } => {
            format!("<h{level}>{}</h{level}>", render_inline(text, options))
        }
        Line::Quote(text) => format!("<blockquote>{}</blockquote>", render_inline(text, options)),
        Line::Rule => "<hr>".to_string(),
        Line::Item { text, .. } => format!("<li>{}</li>", render_inline(text, options)),
        Line::Text(text) => render_inline(text, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(lines: &[&str], options: &RenderOptions) -> Vec<String> {
        let mut out = Vec::new();
        render_lines(lines, options, &mut out);
        out
    }

    #[test]
    fn classifies_headings_up_to_level_three() {
        assert_eq!(
            Line::classify("# Hello"),
            Line::Heading {
                level: 1,
                text: "Hello"
            }
        );
        assert_eq!(
            Line::classify("### Deep"),
            Line::Heading {
                level: 3,
                text: "Deep"
            }
        );
        assert_eq!(Line::classify("#### Too deep"), Line::Text("#### Too deep"));
        assert_eq!(Line::classify("#NoSpace"), Line::Text("#NoSpace"));
    }

    #[test]
    fn classifies_other_blocks() {
        assert_eq!(Line::classify("> quoted"), Line::Quote("quoted"));
        assert_eq!(Line::classify("---"), Line::Rule);
        assert_eq!(Line::classify("----"), Line::Text("----"));
        assert_eq!(
            Line::classify("- item"),
            Line::Item {
                ordered: false,
                text: "item"
            }
        );
        assert_eq!(
            Line::classify("12. twelfth"),
            Line::Item {
                ordered: true,
                text: "twelfth"
            }
        );
        assert_eq!(Line::classify("12.no space"), Line::Text("12.no space"));
        assert_eq!(Line::classify("  - indented"), Line::Text("  - indented"));
    }

    #[test]
    fn wraps_consecutive_items_once() {
        let out = render(&["- a", "- b", "- c"], &RenderOptions::default());

        assert_eq!(
            out,
            vec!["<ul><li>a</li>", "<li>b</li>", "<li>c</li></ul>"]
        );
    }

    #[test]
    fn single_item_list_closes_on_same_line() {
        let out = render(&["* only"], &RenderOptions::default());

        assert_eq!(out, vec!["<ul><li>only</li></ul>"]);
    }

    #[test]
    fn blank_line_splits_lists() {
        let out = render(&["- a", "", "- b"], &RenderOptions::default());

        assert_eq!(out, vec!["<ul><li>a</li></ul>", "", "<ul><li>b</li></ul>"]);
    }

    #[test]
    fn numbered_items_use_unordered_container_by_default() {
        let out = render(&["1. one", "2. two"], &RenderOptions::default());

        assert_eq!(out, vec!["<ul><li>one</li>", "<li>two</li></ul>"]);
    }

    #[test]
    fn ordered_lists_option_splits_on_marker_kind() {
        let options = RenderOptions {
            ordered_lists: true,
            ..Default::default()
        };

        let out = render(&["1. one", "2. two", "- bullet"], &options);

        assert_eq!(
            out,
            vec![
                "<ol><li>one</li>",
                "<li>two</li></ol>",
                "<ul><li>bullet</li></ul>"
            ]
        );
    }

    #[test]
    fn renders_heading_quote_and_rule() {
        let out = render(
            &["## Sub *title*", "> said", "---", "plain"],
            &RenderOptions::default(),
        );

        assert_eq!(
            out,
            vec![
                "<h2>Sub <em>title</em></h2>",
                "<blockquote>said</blockquote>",
                "<hr>",
                "plain"
            ]
        );
    }
}
