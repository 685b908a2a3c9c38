//! Shared data types: field kinds, coerced values, and source attribution.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// The target type of a config field.
///
/// A closed set: the coercer matches on it exhaustively. Not every value of
/// this enum is supported — see [`FieldKind::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Signed integer of the given width. Supported widths: 8, 16, 32, 64.
    Int { bits: u32 },
    Bool,
    Duration,
    /// Comma-separated list, each segment trimmed.
    StringList,
    /// Wraps a non-optional kind. Left unset when nothing resolves.
    Optional(Box<FieldKind>),
}

impl FieldKind {
    /// Returns `Err(self)` if the coercer has no rule for this kind.
    pub fn check(&self) -> Result<(), &FieldKind> {
        match self {
            FieldKind::Int { bits } if !matches!(bits, 8 | 16 | 32 | 64) => Err(self),
            FieldKind::Optional(inner) => match inner.as_ref() {
                FieldKind::Optional(_) => Err(self),
                other => other.check(),
            },
            _ => Ok(()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Int { bits } => write!(f, "i{bits}"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Duration => write!(f, "duration"),
            FieldKind::StringList => write!(f, "string list"),
            FieldKind::Optional(inner) => write!(f, "optional {inner}"),
        }
    }
}

/// A coerced value, ready to be written into a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    Duration(Duration),
    StringList(Vec<String>),
    /// A resolved optional field.
    Some(Box<Value>),
}

/// Which layer supplied a field's raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The live process environment (or the synthetic one set on the builder).
    Env,
    /// The fallback `.env` file.
    Fallback,
    /// The field's declared default.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Env => write!(f, "env"),
            Source::Fallback => write!(f, "fallback"),
            Source::Default => write!(f, "default"),
        }
    }
}

/// Per-field source report returned by
/// [`load_with_sources`](crate::EnvbindBuilder::load_with_sources).
///
/// Entries follow declaration order, one per field; keys are unique because
/// the loader rejects duplicate declarations. `None` means nothing resolved
/// and the field was left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sources {
    pub entries: Vec<(String, Option<Source>)>,
}

impl Sources {
    /// Source of `key`, if it was bound.
    pub fn get(&self, key: &str) -> Option<Source> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, source)| *source)
    }
}

impl fmt::Display for Sources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, source)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match source {
                Some(source) => write!(f, "{key} = {source}")?,
                None => write!(f, "{key} = <unset>")?,
            }
        }
        Ok(())
    }
}
