//! Errors produced while compiling or rendering the registry.

use std::path::PathBuf;

use thiserror::Error;

/// An error encountered while reading or compiling a registry table.
///
/// Every variant is fatal: compilation stops at the first error and no tags
/// are returned.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unable to read feature registry '{}': {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed feature registry table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: default flag '{value}' for tag '{tag}' is not an integer")]
    MalformedFlagValue {
        line: u64,
        tag: String,
        value: String,
    },

    #[error("Line {line}: row for tag '{tag}' has no default flag column")]
    MissingFlag { line: u64, tag: String },
}

impl RegistryError {
    /// The line of the offending row, if the error is tied to one.
    pub fn line(&self) -> Option<u64> {
        match self {
            RegistryError::MalformedFlagValue { line, .. }
            | RegistryError::MissingFlag { line, .. } => Some(*line),
            RegistryError::Csv(err) => err.position().map(|pos| pos.line()),
            RegistryError::InputUnreadable { .. } => None,
        }
    }
}

/// An error encountered while rendering compiled tags as source code.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Tag '{tag}' has {len} bytes, expected exactly 4")]
    TagLength { tag: String, len: usize },

    #[error("Tag '{tag}' is invalid: {source}")]
    InvalidTag {
        tag: String,
        source: font_types::InvalidTag,
    },

    #[error("Formatting generated code failed")]
    Fmt(#[from] std::fmt::Error),
}
