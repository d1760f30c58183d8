//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - what the CLI prints or writes
//!
//! Command-line flags override values loaded with `--config`; see
//! [`Args::apply_to`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Parse exported chat logs and print activity statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstat chat.txt
    chatstat chat.txt --user Alice
    chatstat chat.txt --after 2024-01-01 --before 2024-06-30
    chatstat chat.txt -f json -o report.json
    chatstat chat.txt -f csv -o records.csv
    chatstat chat.txt --config chatstat.json -v")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Analyze a single participant instead of the whole chat
    #[arg(short, long, value_name = "NAME")]
    pub user: Option<String>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of entries in the most-common-words table
    #[arg(long, value_name = "N")]
    pub top_words: Option<usize>,

    /// Number of entries in the busiest-users table
    #[arg(long, value_name = "N")]
    pub top_senders: Option<usize>,

    /// Newline-separated stopword file
    #[arg(long, value_name = "PATH")]
    pub stopwords: Option<PathBuf>,

    /// Reject inputs larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<usize>,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Applies command-line overrides on top of `config`.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(n) = self.top_words {
            config.analysis.top_words = n;
        }
        if let Some(n) = self.top_senders {
            config.analysis.top_senders = n;
        }
        if let Some(ref path) = self.stopwords {
            config.analysis.stopwords_path = Some(path.clone());
        }
        if let Some(max) = self.max_bytes {
            config.parser.max_input_bytes = max;
        }
        config
    }
}

/// What the CLI emits.
///
/// ```rust
/// use chatstat::cli::OutputFormat;
///
/// assert_eq!(OutputFormat::Csv.file_format().unwrap().extension(), "csv");
/// assert!(OutputFormat::Summary.file_format().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary (default)
    #[default]
    Summary,

    /// Full analysis report as JSON
    Json,

    /// Parsed records as semicolon-delimited CSV
    Csv,

    /// Parsed records as JSON Lines
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the library file format, or `None` for the summary.
    pub fn file_format(self) -> Option<crate::format::OutputFormat> {
        match self {
            OutputFormat::Summary => None,
            OutputFormat::Json => Some(crate::format::OutputFormat::Json),
            OutputFormat::Csv => Some(crate::format::OutputFormat::Csv),
            OutputFormat::Jsonl => Some(crate::format::OutputFormat::Jsonl),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.file_format() {
            Some(format) => write!(f, "{format}"),
            None => write!(f, "Summary"),
        }
    }
}
