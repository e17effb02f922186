//! Index error types
//!
//! Error codes:
//! - NEO_ALREADY_LINKED: input collections were linked before construction
//! - NEO_DUPLICATE_KEY: strict duplicate policy found a repeated key

use std::fmt;

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// A NEO already has approaches or an approach already has a NEO
    NeoAlreadyLinked,
    /// Two NEOs share a designation or a case-insensitive lookup key
    NeoDuplicateKey,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::NeoAlreadyLinked => "NEO_ALREADY_LINKED",
            IndexErrorCode::NeoDuplicateKey => "NEO_DUPLICATE_KEY",
        }
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct IndexError {
    /// Error code
    code: IndexErrorCode,
    /// Human-readable message
    message: String,
    /// Offending key if applicable
    key: Option<String>,
}

impl IndexError {
    /// Create an already-linked precondition error
    pub fn already_linked(reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::NeoAlreadyLinked,
            message: reason.into(),
            key: None,
        }
    }

    /// Create a duplicate key error for the named lookup table
    pub fn duplicate_key(table: &str, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            code: IndexErrorCode::NeoDuplicateKey,
            message: format!("Duplicate {} key '{}'", table, key),
            key: Some(key),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending key if applicable
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
