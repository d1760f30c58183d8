//! JSON report writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::analysis::Report;
use crate::error::Result;

/// Writes a report as pretty-printed JSON.
pub fn write_json(report: &Report, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(report)?;
    let mut file = File::create(output_path.as_ref())?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts a report to a pretty-printed JSON string.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
