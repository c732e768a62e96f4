//! Fenced code block extraction.

use crate::escape::escape_html;

/// Language tag used when a fence does not name one.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Programming language of a code block, as far as highlighting cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    JavaScript,
    TypeScript,
    Rust,
    Python,
    Bash,
    #[default]
    Unknown,
}

impl Language {
    /// Parse language from a fence tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "js" | "javascript" | "jsx" | "mjs" => Self::JavaScript,
            "ts" | "typescript" | "tsx" => Self::TypeScript,
            "rs" | "rust" => Self::Rust,
            "py" | "python" => Self::Python,
            "bash" | "sh" | "shell" | "zsh" => Self::Bash,
            _ => Self::Unknown,
        }
    }

    /// Check if this language has a keyword table for highlighting.
    pub fn is_highlightable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether line comments start with `#` rather than `//`.
    pub fn uses_hash_comments(&self) -> bool {
        matches!(self, Self::Python | Self::Bash)
    }

    /// Keywords and literal constants for this language.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::JavaScript => JS_KEYWORDS,
            Self::TypeScript => TS_KEYWORDS,
            Self::Rust => RUST_KEYWORDS,
            Self::Python => PYTHON_KEYWORDS,
            Self::Bash => BASH_KEYWORDS,
            Self::Unknown => &[],
        }
    }
}

const JS_KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "class", "import",
    "export", "async", "await", "new", "this", "true", "false", "null", "undefined",
];

const TS_KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "class", "import",
    "export", "async", "await", "new", "this", "true", "false", "null", "undefined", "interface",
    "type", "enum", "implements", "readonly",
];

const RUST_KEYWORDS: &[&str] = &[
    "fn", "let", "mut", "pub", "use", "mod", "struct", "enum", "impl", "trait", "match", "if",
    "else", "for", "while", "loop", "return", "async", "await", "self", "Self", "true", "false",
    "const", "static", "where",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "return", "if", "elif", "else", "for", "while", "import", "from", "as",
    "with", "async", "await", "lambda", "True", "False", "None",
];

const BASH_KEYWORDS: &[&str] = &[
    "if", "then", "else", "fi", "for", "do", "done", "while", "case", "esac", "function",
    "export", "local", "echo",
];

/// A fenced code block lifted out of a document body.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Language tag from the opening fence (`plaintext` when absent)
    pub language: String,

    /// Enclosed text, trimmed, unescaped
    pub source: String,

    /// Line number of the opening fence (1-indexed, relative to the body)
    pub line_number: usize,
}

impl CodeBlock {
    /// Create a new code block.
    pub fn new(language: impl Into<String>, source: impl Into<String>, line_number: usize) -> Self {
        Self {
            language: language.into(),
            source: source.into(),
            line_number,
        }
    }

    /// Highlighting language of this block.
    pub fn kind(&self) -> Language {
        Language::from_tag(&self.language)
    }

    /// Render as an escaped `<pre><code>` element.
    pub fn to_html(&self) -> String {
        format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(&self.language),
            escape_html(&self.source)
        )
    }
}

/// A run of body lines: either markup for the later phases or a code block
/// that the later phases must not touch.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk<'a> {
    Lines(Vec<&'a str>),
    Code(CodeBlock),
}

/// Split a body into markup runs and fenced code blocks.
///
/// An opening fence without a matching closing line is left in place as
/// ordinary markup.
pub fn split_fences(body: &str) -> Vec<Chunk<'_>> {
    let lines: Vec<&str> = body.lines().collect();
    let mut chunks = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(info) = line.strip_prefix("```") {
            if let Some(close) = find_closing_fence(&lines, i + 1) {
                if !pending.is_empty() {
                    chunks.push(Chunk::Lines(std::mem::take(&mut pending)));
                }

                let source = lines[i + 1..close].join("\n");
                chunks.push(Chunk::Code(CodeBlock::new(
                    fence_language(info),
                    source.trim(),
                    i + 1,
                )));

                i = close + 1;
                continue;
            }
        }

        pending.push(line);
        i += 1;
    }

    if !pending.is_empty() {
        chunks.push(Chunk::Lines(pending));
    }

    chunks
}

fn find_closing_fence(lines: &[&str], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&j| lines[j].trim() == "```")
}

/// Language tag from a fence info string: its first word.
fn fence_language(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or(DEFAULT_LANGUAGE)
}
