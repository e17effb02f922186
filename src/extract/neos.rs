//! NEO extraction from the SBDB CSV export

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::model::NearEarthObject;
use crate::observability::{log_event_with_fields, Event};

use super::csv::{CsvError, CsvReader};
use super::errors::{ExtractError, ExtractResult};

const COL_DESIGNATION: &str = "pdes";
const COL_NAME: &str = "name";
const COL_DIAMETER: &str = "diameter";
const COL_HAZARDOUS: &str = "pha";

/// Header positions of the columns we read
struct NeoColumns {
    designation: usize,
    name: usize,
    diameter: usize,
    hazardous: usize,
}

impl NeoColumns {
    fn locate(header: &[String], path: &Path) -> ExtractResult<Self> {
        let find = |column: &str| {
            header
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| ExtractError::missing_column(path, column))
        };

        Ok(Self {
            designation: find(COL_DESIGNATION)?,
            name: find(COL_NAME)?,
            diameter: find(COL_DIAMETER)?,
            hazardous: find(COL_HAZARDOUS)?,
        })
    }
}

/// Reads NEOs from a CSV file with a header row.
///
/// Only `pdes`, `name`, `diameter` and `pha` are used; other columns are
/// ignored. Records come back unlinked and in file order.
pub fn load_neos(path: impl AsRef<Path>) -> ExtractResult<Vec<NearEarthObject>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    let neos = read_neos(BufReader::new(file), path)?;

    log_event_with_fields(
        Event::NeosLoaded,
        &[
            ("count", neos.len().to_string().as_str()),
            ("path", path.display().to_string().as_str()),
        ],
    );
    Ok(neos)
}

/// Reads NEOs from any buffered CSV source; `path` is used in errors.
pub fn read_neos<R: BufRead>(reader: R, path: &Path) -> ExtractResult<Vec<NearEarthObject>> {
    let mut csv = CsvReader::new(reader);
    let csv_err = |e: CsvError| match e {
        CsvError::Io(source) => ExtractError::io(path, source),
        CsvError::UnterminatedQuote { line } => {
            ExtractError::malformed(path, line, "unterminated quote")
        }
    };

    let header = match csv.next_record() {
        Ok(Some(header)) => header,
        Ok(None) => return Err(ExtractError::missing_column(path, COL_DESIGNATION)),
        Err(e) => return Err(csv_err(e)),
    };
    let columns = NeoColumns::locate(&header, path)?;

    let mut neos = Vec::new();
    loop {
        let record = match csv.next_record() {
            Ok(Some(record)) => record,
            Ok(None) => break,
            Err(e) => return Err(csv_err(e)),
        };
        neos.push(parse_neo(&record, &columns, path, csv.line())?);
    }

    Ok(neos)
}

fn parse_neo(
    record: &[String],
    columns: &NeoColumns,
    path: &Path,
    row: usize,
) -> ExtractResult<NearEarthObject> {
    let field = |index: usize| record.get(index).map(|s| s.trim()).unwrap_or("");

    let designation = field(columns.designation);
    if designation.is_empty() {
        return Err(ExtractError::malformed(path, row, "empty designation"));
    }

    let diameter = match field(columns.diameter) {
        "" => None,
        raw => Some(raw.parse::<f64>().map_err(|_| {
            ExtractError::malformed(path, row, format!("invalid diameter '{}'", raw))
        })?),
    };

    Ok(NearEarthObject::new(
        designation,
        Some(field(columns.name)),
        diameter,
        field(columns.hazardous) == "Y",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id,spkid,full_name,pdes,name,prefix,neo,pha,diameter
a0000433,2000433,\"   433 Eros (A898 PA)\",433,Eros,,Y,N,16.84
bK20F10J,3012345,\"     (2000 FJ10)\",2000 FJ10,,,Y,Y,
";

    #[test]
    fn test_read_neos() {
        let neos = read_neos(SAMPLE.as_bytes(), Path::new("neos.csv")).unwrap();

        assert_eq!(neos.len(), 2);
        assert_eq!(neos[0].designation, "433");
        assert_eq!(neos[0].name.as_deref(), Some("Eros"));
        assert_eq!(neos[0].diameter, Some(16.84));
        assert!(!neos[0].hazardous);

        assert_eq!(neos[1].designation, "2000 FJ10");
        assert_eq!(neos[1].name, None);
        assert_eq!(neos[1].diameter, None);
        assert!(neos[1].hazardous);
    }

    #[test]
    fn test_missing_column() {
        let err = read_neos("pdes,name\n433,Eros\n".as_bytes(), Path::new("neos.csv")).unwrap_err();
        assert!(matches!(err, ExtractError::MissingColumn { ref column, .. } if column == "diameter"));
    }

    #[test]
    fn test_invalid_diameter() {
        let input = "pdes,name,pha,diameter\n433,Eros,N,big\n";
        let err = read_neos(input.as_bytes(), Path::new("neos.csv")).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedRow { row: 2, .. }));
    }

    #[test]
    fn test_empty_designation() {
        let input = "pdes,name,pha,diameter\n,Eros,N,1.0\n";
        let err = read_neos(input.as_bytes(), Path::new("neos.csv")).unwrap_err();
        assert!(err.to_string().contains("empty designation"));
    }
}
