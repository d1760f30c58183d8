//! JSON Lines (JSONL) output writer.
//!
//! One record per line, suited to streaming consumers and data pipelines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::record::MessageRecord;

/// Writes records to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"timestamp":"2024-01-15T10:30:00","sender":"Alice","text":"Hello",...}
/// {"timestamp":"2024-01-15T10:31:00","sender":"group_notification","text":"Bob joined",...}
/// ```
pub fn write_jsonl(records: &[MessageRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_lines(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[MessageRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(records, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(records: &[MessageRecord], out: &mut W) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
