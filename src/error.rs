use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single extraction request.
///
/// Duplicate keys and duplicate values are not errors: they short-circuit
/// successfully and return the existing key.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The resource file could not be read.
    #[error("Failed to read resource file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resource file is not a JSON object.
    #[error("Failed to parse resource file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// The resource file could not be written. The previous content is left in place.
    #[error("Failed to write resource file {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// Keys starting with `@` hold placeholder metadata and cannot store a translation.
    #[error("Key '{0}' is reserved: keys starting with '@' hold placeholder metadata")]
    KeyReserved(String),

    /// The text contains the interpolation sigil but no expression could be parsed.
    #[error("No placeholders found in '{0}' although it contains '$'")]
    NoPlaceholdersFound(String),

    /// Required input was empty or produced an empty key.
    #[error("Missing input: {0}")]
    MissingInput(String),
}

impl ExtractError {
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn missing_input(what: impl Into<String>) -> Self {
        Self::MissingInput(what.into())
    }

    /// True for rejected input, false for I/O and format failures at the file boundary.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::KeyReserved(_) | Self::NoPlaceholdersFound(_) | Self::MissingInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
