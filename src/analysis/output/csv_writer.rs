//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::record::MessageRecord;

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `timestamp`, `sender`, `text`, `year`, `month_num`,
///   `month_name`, `day`, `day_name`, `hour`, `minute`
/// - Encoding: UTF-8
pub fn write_csv(records: &[MessageRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path.as_ref())?;
    write_records(records, file)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv(records: &[MessageRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_records(records, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(records: &[MessageRecord], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);
    if records.is_empty() {
        writer.write_record(HEADER)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

const HEADER: [&str; 10] = [
    "timestamp",
    "sender",
    "text",
    "year",
    "month_num",
    "month_name",
    "day",
    "day_name",
    "hour",
    "minute",
];
