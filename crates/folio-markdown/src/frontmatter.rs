//! Front matter extraction and parsing.
//!
//! Front matter is a flat `key: value` block delimited by `---` lines at the
//! head of a document. It is scanned line by line rather than parsed as a
//! structured format: values stay raw strings and never carry nested data.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered `key: value` metadata from the head of a document.
///
/// Keys keep the position of their first occurrence; a repeated key
/// replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, String)>,
}

impl FrontMatter {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the lines between the two `---` delimiters.
    ///
    /// Each line is split on its first `:`. Lines without a colon are
    /// skipped; an empty key is still a key.
    pub fn parse(block: &str) -> Self {
        let mut front_matter = Self::new();

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            front_matter.insert(key.trim(), value.trim());
        }

        front_matter
    }

    /// Insert a value, replacing any previous value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a value, treating an empty string as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FrontMatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A document split into its metadata and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Parsed front matter (empty when the document has none)
    pub front_matter: FrontMatter,

    /// Markup after the front matter block
    pub body: String,
}

/// Split a raw document into front matter and body.
///
/// A document without a well-formed leading block (including one whose
/// closing `---` is missing) yields empty front matter and the whole input
/// as the body.
pub fn extract_front_matter(source: &str) -> (FrontMatter, &str) {
    match split_front_matter(source) {
        Some((block, body)) => (FrontMatter::parse(block), body),
        None => (FrontMatter::new(), source),
    }
}

/// Parse a raw document into an owned [`Document`].
pub fn parse_document(source: &str) -> Document {
    let (front_matter, body) = extract_front_matter(source);
    Document {
        front_matter,
        body: body.to_string(),
    }
}

/// Read only the front matter of a document, ignoring its body.
pub fn read_front_matter(source: &str) -> FrontMatter {
    extract_front_matter(source).0
}

/// Locate the metadata block and the body that follows it.
fn split_front_matter(source: &str) -> Option<(&str, &str)> {
    let (first, after_first) = next_line(source, 0)?;

    // One blank line may precede the opening delimiter
    let block_start = if is_delimiter(first) {
        after_first
    } else if first.trim().is_empty() {
        let (second, after_second) = next_line(source, after_first)?;
        if !is_delimiter(second) {
            return None;
        }
        after_second
    } else {
        return None;
    };

    // The block holds at least one line, so `---` right after the opening
    // delimiter is content, not the close
    let mut pos = block_start;
    loop {
        let (line, after) = next_line(source, pos)?;
        if pos > block_start && is_delimiter(line) {
            return Some((&source[block_start..pos], &source[after..]));
        }
        pos = after;
    }
}

/// Return the line starting at `pos` (without its newline) and the offset of
/// the next line.
fn next_line(source: &str, pos: usize) -> Option<(&str, usize)> {
    if pos >= source.len() {
        return None;
    }

    let rest = &source[pos..];
    match rest.find('\n') {
        Some(end) => Some((&rest[..end], pos + end + 1)),
        None => Some((rest, source.len())),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}
