//! # Chatstat
//!
//! A Rust library for parsing exported chat logs into typed records and
//! computing descriptive statistics over them.
//!
//! ## Overview
//!
//! Chat apps export conversations as plain text whose line format varies by
//! platform and locale:
//!
//! ```text
//! 15/01/24, 9:05 am - Alice: Hello
//! [1/15/24, 9:05:12 AM] Alice: Hello
//! 15.01.24, 09:05 - Alice: Hello
//! ```
//!
//! The [`parser`] detects the timestamp grammar once per document, splits
//! the text into records at each recognized timestamp, and separates the
//! sender from the message text. Multi-line messages stay in one record and
//! lines without a sender become notifications. The [`analysis`] module then
//! computes counts, timelines, word and emoji frequencies, sentiment and
//! response times.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = "\
//! 15/01/24, 9:00 am - Alice created group \"Weekend\"
//! 15/01/24, 9:01 am - Alice: anyone up for hiking?
//! 15/01/24, 9:03 am - Bob: yes! great idea
//! 15/01/24, 9:04 am - Bob: <Media omitted>";
//!
//!     let parsed = LogParser::new().parse(export)?;
//!     assert_eq!(parsed.len(), 4);
//!
//!     let report = Report::build(parsed.records(), &Selection::Overall, &AnalysisConfig::default());
//!     assert_eq!(report.stats.media, 1);
//!     assert_eq!(report.participants, ["Alice", "Bob"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`LogParser`](parser::LogParser), [`ParsedLog`](parser::ParsedLog)
//! - [`grammar`] - [`TimestampGrammar`](grammar::TimestampGrammar) and the built-in table
//! - [`record`] - [`MessageRecord`], [`Sender`]
//! - [`analysis`] - aggregators, [`Report`](analysis::Report) and output writers
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and [`write_to_format`](format::write_to_format)
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`error`] - [`ChatstatError`], [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `csv-output` | CSV record export | `csv` |
//! | `json-output` | JSON report, JSONL records, JSON config files | `serde_json` |
//! | `cli` | The `chatstat` binary | `clap`, `tracing-subscriber` |
//! | `gen-test` | The `gen_test` synthetic export generator | `rand` |
//! | `full` | csv-output + json-output + cli (default) | |

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod grammar;
pub mod parser;
pub mod record;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatError, Result};
pub use parser::{LogParser, ParsedLog};
pub use record::{MessageRecord, Sender};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ChatstatError, Result};
    pub use crate::record::{MessageRecord, Sender};

    pub use crate::parser::{LogParser, ParsedLog, parse};

    pub use crate::config::{AnalysisConfig, Config, ParserConfig};
    pub use crate::grammar::TimestampGrammar;

    pub use crate::analysis::{
        FilterConfig, Report, Selection, StopWords, apply_filters, participants,
    };

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    #[cfg(feature = "csv-output")]
    pub use crate::analysis::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::analysis::output::{to_json, to_jsonl, write_json, write_jsonl};
}
