//! JSON result writer
//!
//! A JSON array of approaches, each nesting its NEO under `neo`.

use std::io::Write;

use serde::{Serialize, Serializer};

use crate::executor::ApproachRecord;
use crate::model::{ApproachRow, NeoRow};

use super::errors::OutputResult;

#[derive(Debug, Serialize)]
struct JsonRecord {
    #[serde(flatten)]
    approach: ApproachRow,
    neo: Option<NeoRow>,
}

impl From<ApproachRecord<'_>> for JsonRecord {
    fn from(record: ApproachRecord<'_>) -> Self {
        let (approach, neo) = record.serialize();
        Self { approach, neo }
    }
}

/// Writes records as a pretty-printed JSON array; returns the element count.
///
/// Streams element by element. Unknown diameters and unlinked NEOs are `null`.
pub fn write_json<'db, I, W>(results: I, mut writer: W) -> OutputResult<usize>
where
    I: IntoIterator<Item = ApproachRecord<'db>>,
    W: Write,
{
    let mut count = 0;
    {
        let mut serializer = serde_json::Serializer::pretty(&mut writer);
        serializer.collect_seq(results.into_iter().map(|record| {
            count += 1;
            JsonRecord::from(record)
        }))?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(count)
}
