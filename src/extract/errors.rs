//! # Extract Errors
//!
//! Error types for loading NEO and close approach files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for extract operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors raised while reading source data files
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file could not be opened or read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The close approach file is not valid CAD JSON
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required column is absent from the header
    #[error("{}: missing column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A row could not be turned into a record
    #[error("{}: row {row}: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },
}

impl ExtractError {
    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn missing_column(path: &std::path::Path, column: &str) -> Self {
        Self::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        }
    }

    pub(crate) fn malformed(path: &std::path::Path, row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            path: path.to_path_buf(),
            row,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_malformed_display() {
        let err = ExtractError::malformed(Path::new("data/neos.csv"), 7, "invalid diameter 'x'");
        assert_eq!(
            err.to_string(),
            "data/neos.csv: row 7: invalid diameter 'x'"
        );
    }

    #[test]
    fn test_missing_column_display() {
        let err = ExtractError::missing_column(Path::new("cad.json"), "v_rel");
        assert_eq!(err.to_string(), "cad.json: missing column 'v_rel'");
    }
}
