//! CSV result writer
//!
//! One header row, then one row per close approach joined with its NEO.

use std::io::Write;

use crate::executor::ApproachRecord;

use super::errors::OutputResult;

/// Output column order
pub const CSV_FIELDS: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Writes records as CSV; returns the number of data rows.
///
/// Unknown diameters are written as `nan`, hazard flags as `True`/`False`.
/// An approach without a linked NEO keeps its designation and leaves the
/// other NEO columns empty.
pub fn write_csv<'db, I, W>(results: I, mut writer: W) -> OutputResult<usize>
where
    I: IntoIterator<Item = ApproachRecord<'db>>,
    W: Write,
{
    write_row(&mut writer, &CSV_FIELDS.map(String::from))?;

    let mut rows = 0;
    for record in results {
        let approach = record.serialize().0;
        let mut row = vec![
            approach.datetime_utc,
            approach.distance_au.to_string(),
            approach.velocity_km_s.to_string(),
        ];

        match record.neo() {
            Some(neo) => {
                let neo = neo.serialize();
                row.push(neo.designation);
                row.push(neo.name);
                row.push(match neo.diameter_km {
                    Some(d) => d.to_string(),
                    None => "nan".to_string(),
                });
                row.push(title_case_bool(neo.potentially_hazardous).to_string());
            }
            None => {
                row.push(record.designation().to_string());
                row.extend(std::iter::repeat(String::new()).take(3));
            }
        }

        write_row(&mut writer, &row)?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

fn title_case_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn write_row<W: Write>(writer: &mut W, fields: &[String]) -> OutputResult<()> {
    let mut line = String::with_capacity(96);
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        escape_field(&mut line, field);
    }
    line.push_str("\r\n");
    writer.write_all(line.as_bytes())?;
    Ok(())
}

/// Quotes a field when it contains a delimiter, quote or line break
fn escape_field(output: &mut String, field: &str) {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        output.push('"');
        output.push_str(&field.replace('"', "\"\""));
        output.push('"');
    } else {
        output.push_str(field);
    }
}
