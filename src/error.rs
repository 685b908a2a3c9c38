use std::path::PathBuf;
use thiserror::Error;

use crate::coerce::CoerceError;
use crate::types::FieldKind;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum EnvbindError {
    #[error("Failed to read {path}: {source}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(envbind::io), help("check that the fallback file exists and is readable"))
    )]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid line in {path} (line {line}): {content:?}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(envbind::parse), help("lines must look like KEY=value"))
    )]
    ParseError {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Missing required env: {key}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(envbind::missing), help("set {key} in the environment or the fallback file"))
    )]
    MissingRequired { key: String },

    #[error("Required env is empty: {key}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::empty)))]
    EmptyRequired { key: String },

    #[error("Invalid value for {key}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::invalid_value)))]
    InvalidValue { key: String, source: CoerceError },

    #[error("Invalid field #{index}: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::descriptor)))]
    InvalidDescriptor { index: usize, reason: String },

    #[error("Unsupported field kind for {key}: {kind}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::unsupported_kind)))]
    UnsupportedKind { key: String, kind: FieldKind },

    #[error("Field {key} rejected a {kind} value")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(envbind::kind_mismatch), help("the setter must accept the field's declared kind"))
    )]
    KindMismatch { key: String, kind: FieldKind },
}

/// Coarse classification of [`EnvbindError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The fallback file could not be opened or read.
    File,
    /// The fallback file has a line with an empty key.
    Parse,
    /// A required field is missing or empty.
    Validation,
    /// A resolved value does not convert to the field's kind.
    Coercion,
    /// A field descriptor is malformed or declares an unsupported kind.
    Type,
}

impl EnvbindError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvbindError::IoError { .. } => ErrorKind::File,
            EnvbindError::ParseError { .. } => ErrorKind::Parse,
            EnvbindError::MissingRequired { .. } | EnvbindError::EmptyRequired { .. } => {
                ErrorKind::Validation
            }
            EnvbindError::InvalidValue { .. } => ErrorKind::Coercion,
            EnvbindError::InvalidDescriptor { .. }
            | EnvbindError::UnsupportedKind { .. }
            | EnvbindError::KindMismatch { .. } => ErrorKind::Type,
        }
    }

    /// The config key this error is about, if it concerns a single field.
    pub fn key(&self) -> Option<&str> {
        match self {
            EnvbindError::MissingRequired { key }
            | EnvbindError::EmptyRequired { key }
            | EnvbindError::InvalidValue { key, .. }
            | EnvbindError::UnsupportedKind { key, .. }
            | EnvbindError::KindMismatch { key, .. } => Some(key),
            _ => None,
        }
    }
}
