//! Fallback `.env` file parsing.
//!
//! The format is the common shell-flavoured subset:
//!
//! ```text
//! # full-line comment
//! HOST=localhost
//! export PORT=8080          # inline comment
//! NAME='My App'
//! GREETING="hi #not-a-comment"
//! ```
//!
//! Each assignment is split at the first `=`. Keys are trimmed and lose a
//! leading `export `. Values are trimmed, lose an inline comment (a `#` outside
//! quotes that starts the value or follows whitespace), then lose one layer of
//! matching `"` or `'` quotes. There is no escape processing and no variable
//! expansion. Lines without `=` are ignored; a line whose key is empty is an
//! error.
//!
//! Parsing works on already-read text so it can be tested without touching
//! the filesystem; [`FallbackMap::load`] is the thin I/O wrapper.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::EnvbindError;

/// Key/value pairs parsed from a fallback file, in file order.
///
/// A key assigned more than once keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FallbackMap {
    /// Read and parse the file at `path`. The whole file must be valid UTF-8.
    pub fn load(path: &Path) -> Result<Self, EnvbindError> {
        let content = std::fs::read_to_string(path).map_err(|e| EnvbindError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let map = Self::parse(&content, path)?;
        debug!(path = %path.display(), entries = map.len(), "parsed fallback file");
        Ok(map)
    }

    /// Parse fallback file content. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, EnvbindError> {
        let mut map = Self::default();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            let key = key.trim();
            let key = key.strip_prefix("export ").unwrap_or(key).trim();
            if key.is_empty() {
                return Err(EnvbindError::ParseError {
                    path: path.to_path_buf(),
                    line: i + 1,
                    content: line.to_string(),
                });
            }

            map.insert(key.to_string(), parse_value(value).to_string());
        }

        Ok(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }
}

/// The value part of an assignment as the parser stores it.
pub(crate) fn parse_value(raw: &str) -> &str {
    unquote(strip_inline_comment(raw.trim()))
}

/// Cut the value at the first unquoted `#` that starts the value or follows
/// whitespace. A `#` glued to preceding text (`a#b`) is literal.
fn strip_inline_comment(value: &str) -> &str {
    let mut in_single = false;
    let mut in_double = false;
    let mut prev: Option<char> = None;

    for (i, c) in value.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => match prev {
                None => return "",
                Some(p) if p.is_whitespace() => return value[..i].trim(),
                Some(_) => {}
            },
            _ => {}
        }
        prev = Some(c);
    }

    value.trim()
}

/// Remove one layer of matching `"` or `'` quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
