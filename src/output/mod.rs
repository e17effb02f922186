//! Output of query results
//!
//! - `write_to_csv`: flat rows, approach columns then NEO columns
//! - `write_to_json`: array of approaches with the NEO nested under `neo`
//! - `write_results`: picks the format from the file extension
//!
//! Writers consume the query stream lazily; nothing is collected first.

mod csv;
mod errors;
mod json;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::executor::ApproachRecord;
use crate::observability::{log_event_with_fields, Event, ObservationScope};

pub use self::csv::{write_csv, CSV_FIELDS};
pub use errors::{OutputError, OutputResult};
pub use json::write_json;

/// Supported result file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Picks the format from the extension (case-insensitive)
    pub fn from_path(path: &Path) -> OutputResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(OutputError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Writes results to a CSV file; returns the number of rows
pub fn write_to_csv<'db, I>(results: I, path: &Path) -> OutputResult<usize>
where
    I: IntoIterator<Item = ApproachRecord<'db>>,
{
    write_file(results, path, OutputFormat::Csv)
}

/// Writes results to a JSON file; returns the number of elements
pub fn write_to_json<'db, I>(results: I, path: &Path) -> OutputResult<usize>
where
    I: IntoIterator<Item = ApproachRecord<'db>>,
{
    write_file(results, path, OutputFormat::Json)
}

/// Writes results in the format named by the file extension
pub fn write_results<'db, I>(results: I, path: &Path) -> OutputResult<usize>
where
    I: IntoIterator<Item = ApproachRecord<'db>>,
{
    let format = OutputFormat::from_path(path)?;
    write_file(results, path, format)
}

fn write_file<'db, I>(results: I, path: &Path, format: OutputFormat) -> OutputResult<usize>
where
    I: IntoIterator<Item = ApproachRecord<'db>>,
{
    let path_str = path.display().to_string();
    let scope = ObservationScope::with_fields(
        "OUTPUT_WRITE",
        &[("format", format.as_str()), ("path", path_str.as_str())],
    );

    let written = File::create(path)
        .map_err(OutputError::from)
        .and_then(|file| {
            let writer = BufWriter::new(file);
            match format {
                OutputFormat::Csv => write_csv(results, writer),
                OutputFormat::Json => write_json(results, writer),
            }
        });

    match written {
        Ok(count) => {
            scope.complete();
            log_event_with_fields(
                Event::OutputWritten,
                &[
                    ("path", path_str.as_str()),
                    ("records", count.to_string().as_str()),
                ],
            );
            Ok(count)
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e)
        }
    }
}
