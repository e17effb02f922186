//! CLI module for neodb
//!
//! Provides command-line interface for:
//! - inspect: Show one NEO and, optionally, its close approaches
//! - query: Stream close approaches matching filters to stdout or a file

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, InspectArgs, InspectTarget, QueryArgs};
pub use commands::{inspect, open_database, query, run, run_command, NO_MATCH_MESSAGE};
pub use config::Config;
pub use errors::{CliError, CliResult};
