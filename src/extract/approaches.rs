//! Close approach extraction from the CAD JSON export
//!
//! Expected shape:
//!
//! ```text
//! { "fields": ["des", "orbit_id", "jd", "cd", "dist", ..., "v_rel", ...],
//!   "data":   [["433", "659", "2415020.5", "1900-Jan-01 00:00", "0.3149", ...], ...] }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::model::CloseApproach;
use crate::observability::{log_event_with_fields, Event};

use super::errors::{ExtractError, ExtractResult};

/// Calendar-date format used by the CAD `cd` column
pub const CAD_DATETIME_FORMAT: &str = "%Y-%b-%d %H:%M";

const COL_DESIGNATION: &str = "des";
const COL_TIME: &str = "cd";
const COL_DISTANCE: &str = "dist";
const COL_VELOCITY: &str = "v_rel";

#[derive(Debug, Deserialize)]
struct CadFile {
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

/// Reads close approaches from a CAD JSON file.
///
/// Records come back unlinked and in file order.
pub fn load_approaches(path: impl AsRef<Path>) -> ExtractResult<Vec<CloseApproach>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    let approaches = read_approaches(BufReader::new(file), path)?;

    log_event_with_fields(
        Event::ApproachesLoaded,
        &[
            ("count", approaches.len().to_string().as_str()),
            ("path", path.display().to_string().as_str()),
        ],
    );
    Ok(approaches)
}

/// Reads close approaches from any JSON source; `path` is used in errors.
pub fn read_approaches<R: Read>(reader: R, path: &Path) -> ExtractResult<Vec<CloseApproach>> {
    let cad: CadFile = serde_json::from_reader(reader).map_err(|source| ExtractError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let column = |name: &str| {
        cad.fields
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| ExtractError::missing_column(path, name))
    };
    let des_col = column(COL_DESIGNATION)?;
    let time_col = column(COL_TIME)?;
    let dist_col = column(COL_DISTANCE)?;
    let vel_col = column(COL_VELOCITY)?;

    cad.data
        .iter()
        .enumerate()
        .map(|(index, values)| -> ExtractResult<CloseApproach> {
            let row = index + 1;
            let field = |col: usize| cell(values, col, path, row);

            let cd = field(time_col)?;
            let time = NaiveDateTime::parse_from_str(&cd, CAD_DATETIME_FORMAT).map_err(|_| {
                ExtractError::malformed(path, row, format!("invalid approach time '{}'", cd))
            })?;
            let distance = parse_float(&field(dist_col)?, "distance", path, row)?;
            let velocity = parse_float(&field(vel_col)?, "velocity", path, row)?;

            Ok(CloseApproach::new(field(des_col)?, time, distance, velocity))
        })
        .collect()
}

/// Cell text; CAD cells are strings but numbers are accepted too.
fn cell(values: &[Value], index: usize, path: &Path, row: usize) -> ExtractResult<String> {
    match values.get(index) {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(ExtractError::malformed(
            path,
            row,
            format!("unexpected value {} in column {}", other, index),
        )),
        None => Err(ExtractError::malformed(
            path,
            row,
            format!("row has no column {}", index),
        )),
    }
}

fn parse_float(raw: &str, what: &str, path: &Path, row: usize) -> ExtractResult<f64> {
    raw.parse::<f64>()
        .map_err(|_| ExtractError::malformed(path, row, format!("invalid {} '{}'", what, raw)))
}
