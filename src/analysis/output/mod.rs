//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - record table, semicolon-delimited - requires `csv-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - record table, one JSON object per line - requires `json-output` feature
//! - [`write_json`] / [`to_json`] - full [`Report`](super::Report) as pretty JSON - requires `json-output` feature
//!
//! Records are written in the flat output schema (see [`crate::record`]).
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstat::Result<()> {
//! use chatstat::analysis::output::{to_csv, write_json, write_jsonl};
//! use chatstat::analysis::{Report, Selection};
//! use chatstat::config::AnalysisConfig;
//! use chatstat::parser::LogParser;
//!
//! let parsed = LogParser::new().parse_file("chat.txt")?;
//! let records = parsed.records();
//!
//! write_jsonl(records, "records.jsonl")?;
//! let csv_string = to_csv(records)?;
//!
//! let report = Report::build(records, &Selection::Overall, &AnalysisConfig::default());
//! write_json(&report, "report.json")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
