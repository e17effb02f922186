//! neodb CLI entry point
//!
//! Parsing, loading and dispatch all live in the CLI module; this only
//! reports the error and sets the exit status.

use neodb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
