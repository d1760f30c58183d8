//! File output formats.
//!
//! Two kinds of export exist: record tables ([`Csv`](OutputFormat::Csv),
//! [`Jsonl`](OutputFormat::Jsonl)) carry the parsed [`MessageRecord`]s one
//! row each, while [`Json`](OutputFormat::Json) carries a whole [`Report`].
//!
//! ```rust
//! use chatstat::format::OutputFormat;
//!
//! let format = OutputFormat::from_path("records.ndjson")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! assert!(format.is_record_table());
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::Report;
use crate::error::{ChatstatError, Result};
use crate::record::MessageRecord;

/// Accepted names and extensions, lowercase.
const NAMES: &[(&str, OutputFormat)] = &[
    ("csv", OutputFormat::Csv),
    ("json", OutputFormat::Json),
    ("jsonl", OutputFormat::Jsonl),
    ("ndjson", OutputFormat::Jsonl),
];

/// File output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Records, semicolon-delimited.
    Csv,
    /// The analysis report, pretty-printed.
    #[default]
    Json,
    /// Records, one JSON object per line.
    Jsonl,
}

impl OutputFormat {
    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns `true` if this format exports records rather than a report.
    pub fn is_record_table(self) -> bool {
        !matches!(self, OutputFormat::Json)
    }

    /// Picks the format from a file extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidFormat`] for a missing or unknown
    /// extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        lookup(ext).ok_or_else(|| {
            ChatstatError::invalid_format(format!(
                "cannot infer a format from extension '.{ext}' (expected {})",
                expected()
            ))
        })
    }

    fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

fn lookup(name: &str) -> Option<OutputFormat> {
    NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, format)| format)
}

fn expected() -> String {
    NAMES.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", ")
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

impl FromStr for OutputFormat {
    type Err = ChatstatError;

    fn from_str(s: &str) -> Result<Self> {
        lookup(s).ok_or_else(|| {
            ChatstatError::invalid_format(format!("unknown format '{s}' (expected {})", expected()))
        })
    }
}

/// Writes `records` or `report` to `path`, whichever `format` carries.
///
/// # Errors
///
/// Fails if the file cannot be written or the format's cargo feature is
/// disabled.
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[MessageRecord],
    report: &Report,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    use crate::analysis::output;

    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => output::write_csv(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => output::write_jsonl(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => output::write_json(report, path),
        #[allow(unreachable_patterns)]
        _ => Err(disabled(format)),
    }
}

/// Renders `records` or `report` as a string, whichever `format` carries.
#[allow(unused_variables)]
pub fn to_format_string(
    records: &[MessageRecord],
    report: &Report,
    format: OutputFormat,
) -> Result<String> {
    use crate::analysis::output;

    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => output::to_csv(records),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => output::to_jsonl(records),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => output::to_json(report),
        #[allow(unreachable_patterns)]
        _ => Err(disabled(format)),
    }
}

#[allow(dead_code)]
fn disabled(format: OutputFormat) -> ChatstatError {
    ChatstatError::invalid_format(format!(
        "{format} needs the '{}' feature",
        format.feature()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("ndjson".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);

        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(err.to_string().contains("csv, json, jsonl, ndjson"));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(OutputFormat::from_path("out.CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("dir/report.json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path("x.ndjson").unwrap(), OutputFormat::Jsonl);

        let err = OutputFormat::from_path("notes.txt").unwrap_err();
        assert!(matches!(err, ChatstatError::InvalidFormat { .. }));
        assert!(OutputFormat::from_path("no_extension").is_err());
    }

    #[test]
    fn test_record_table_split() {
        assert!(OutputFormat::Csv.is_record_table());
        assert!(OutputFormat::Jsonl.is_record_table());
        assert!(!OutputFormat::Json.is_record_table());
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(serde_json::to_string(&OutputFormat::Jsonl).unwrap(), "\"jsonl\"");
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_to_format_string() {
        use crate::analysis::Selection;
        use crate::config::AnalysisConfig;

        let parsed = crate::parser::parse("15/01/24, 9:00 am - Alice: hi\n").unwrap();
        let report = Report::build(parsed.records(), &Selection::Overall, &AnalysisConfig::default());

        let csv = to_format_string(parsed.records(), &report, OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("timestamp;sender;text"));

        let jsonl = to_format_string(parsed.records(), &report, OutputFormat::Jsonl).unwrap();
        assert_eq!(jsonl.lines().count(), 1);

        let json = to_format_string(parsed.records(), &report, OutputFormat::Json).unwrap();
        assert!(json.contains("\"stats\""));
    }
}
