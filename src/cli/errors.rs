//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints it and exits with status 1.

use std::io;

use thiserror::Error;

use crate::extract::ExtractError;
use crate::index::IndexError;
use crate::output::OutputError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read or is invalid
    #[error("NEODB_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Input files could not be loaded
    #[error("NEODB_CLI_EXTRACT_ERROR: {0}")]
    Extract(#[from] ExtractError),

    /// Linking refused the input
    #[error("NEODB_CLI_LINK_ERROR: {0}")]
    Index(#[from] IndexError),

    /// Results could not be written
    #[error("NEODB_CLI_OUTPUT_ERROR: {0}")]
    Output(#[from] OutputError),

    /// Writing to stdout failed
    #[error("NEODB_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) => "NEODB_CLI_CONFIG_ERROR",
            Self::Extract(_) => "NEODB_CLI_EXTRACT_ERROR",
            Self::Index(_) => "NEODB_CLI_LINK_ERROR",
            Self::Output(_) => "NEODB_CLI_OUTPUT_ERROR",
            Self::Io(_) => "NEODB_CLI_IO_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
