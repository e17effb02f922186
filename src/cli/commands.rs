//! CLI command implementations
//!
//! Every command follows the same sequence:
//! 1. Load configuration, apply flag overrides, set the log threshold
//! 2. Extract NEOs and close approaches from disk
//! 3. Link them into a `NeoDatabase`
//! 4. Run the command against the database

use std::io::{self, Write};

use crate::executor::{create_filters, limit};
use crate::extract::{load_approaches, load_neos};
use crate::index::NeoDatabase;
use crate::observability::Logger;
use crate::output::write_results;

use super::args::{Cli, Command, InspectArgs, QueryArgs};
use super::config::Config;
use super::errors::CliResult;

/// Printed when `inspect` finds nothing
pub const NO_MATCH_MESSAGE: &str = "No matching NEOs exist in the database.";

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let config = Config::load_or_default(cli.config.as_deref())?
        .with_overrides(cli.neofile, cli.cadfile);
    Logger::set_min_severity(config.severity()?);

    let db = open_database(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&db, &cli.command, &mut out)
}

/// Extract both input files and link them
pub fn open_database(config: &Config) -> CliResult<NeoDatabase> {
    let neos = load_neos(&config.neofile)?;
    let approaches = load_approaches(&config.cadfile)?;
    let db = NeoDatabase::with_options(neos, approaches, config.link_options())?;
    Ok(db)
}

/// Run the appropriate command based on CLI args
pub fn run_command<W: Write>(db: &NeoDatabase, cmd: &Command, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Inspect(args) => inspect(db, args, out),
        Command::Query(args) => query(db, args, out),
    }
}

/// Print one NEO, optionally followed by its close approaches
pub fn inspect<W: Write>(db: &NeoDatabase, args: &InspectArgs, out: &mut W) -> CliResult<()> {
    let neo = match (&args.target.pdes, &args.target.name) {
        (Some(pdes), _) => db.get_by_designation(pdes),
        (None, name) => db.get_by_optional_name(name.as_deref()),
    };

    let Some(neo) = neo else {
        writeln!(out, "{}", NO_MATCH_MESSAGE)?;
        return Ok(());
    };

    writeln!(out, "{}", neo)?;
    if args.verbose {
        for record in neo.approaches().iter().filter_map(|&id| db.record(id)) {
            writeln!(out, "- {}", record)?;
        }
    }

    Ok(())
}

/// Print matching close approaches or write them to `--outfile`
pub fn query<W: Write>(db: &NeoDatabase, args: &QueryArgs, out: &mut W) -> CliResult<()> {
    let filters = create_filters(&args.criteria());
    let results = limit(db.query(&filters), Some(args.limit));

    match &args.outfile {
        Some(path) => {
            write_results(results, path)?;
        }
        None => {
            for record in results {
                writeln!(out, "{}", record)?;
            }
        }
    }

    Ok(())
}
