//! Cosmetic syntax highlighting for rendered code blocks.
//!
//! Works on renderer output, where code is already escaped. Each block is
//! scanned once, left to right, so a token is wrapped at most once. Blocks
//! that already contain a `<span` were highlighted before and are skipped.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::codeblock::Language;

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-([^"]*)">(.*?)</code></pre>"#)
        .expect("Invalid code block regex")
});

// Strings are matched on their escaped quotes. Entities are matched on
// their own so a `#` inside `&#039;` never starts a comment.
const TOKEN_TAIL: &str = concat!(
    r"|(?P<string>&quot;.*?&quot;|&#039;.*?&#039;|`[^`]*`)",
    r"|(?P<entity>&(?:[a-z]+|#[0-9]+);)",
    r"|(?P<word>[A-Za-z_][A-Za-z0-9_]*)",
);

static SLASH_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?P<comment>//[^\n]*){TOKEN_TAIL}")).expect("Invalid token regex")
});

static HASH_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?P<comment>#[^\n]*){TOKEN_TAIL}")).expect("Invalid token regex")
});

/// Highlight every code block in `html` whose language is recognized.
pub fn highlight(html: &str) -> String {
    BLOCK_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let language = Language::from_tag(&caps[1]);
            let code = &caps[2];

            if !language.is_highlightable() || code.contains("<span") {
                return caps[0].to_string();
            }

            format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                &caps[1],
                highlight_code(code, language)
            )
        })
        .into_owned()
}

/// Highlight one block of escaped source code.
pub fn highlight_code(code: &str, language: Language) -> String {
    let re = if language.uses_hash_comments() {
        &*HASH_TOKEN_RE
    } else {
        &*SLASH_TOKEN_RE
    };
    let keywords = language.keywords();

    let mut out = String::with_capacity(code.len() * 2);
    let mut last = 0;

    for caps in re.captures_iter(code) {
        let Some(token) = caps.get(0) else { continue };
        out.push_str(&code[last..token.start()]);

        let class = if caps.name("comment").is_some() {
            Some("sh-comment")
        } else if caps.name("string").is_some() {
            Some("sh-string")
        } else if caps.name("word").is_some() && keywords.contains(&token.as_str()) {
            Some("sh-keyword")
        } else {
            None
        };

        match class {
            Some(class) => {
                out.push_str(&format!(r#"<span class="{class}">{}</span>"#, token.as_str()))
            }
            None => out.push_str(token.as_str()),
        }

        last = token.end();
    }

    out.push_str(&code[last..]);
    out
}
