//! # Output Errors
//!
//! Error types for writing query results.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Errors raised while writing results
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output file extension is neither `.csv` nor `.json`
    #[error("unsupported output format for {}: expected .csv or .json", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Writing failed
    #[error("failed to write results: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding failed
    #[error("failed to encode results as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_display() {
        let err = OutputError::UnsupportedFormat {
            path: PathBuf::from("out.txt"),
        };
        assert!(err.to_string().contains("out.txt"));
    }

    #[test]
    fn test_from_io() {
        let err: OutputError = io::Error::new(io::ErrorKind::Other, "disk full").into();
        assert!(matches!(err, OutputError::Io(_)));
    }
}
