//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. All of them implement
//! `Serialize`/`Deserialize`, so a complete [`Config`] can be loaded from a
//! JSON file.
//!
//! - [`ParserConfig`] - size limit and timestamp grammars
//! - [`AnalysisConfig`] - top-K sizes, stopwords, media placeholder, response gap
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::{AnalysisConfig, ParserConfig};
//! use chatstat::parser::LogParser;
//!
//! let parser_config = ParserConfig::new().with_max_input_bytes(16 * 1024 * 1024);
//! let parser = LogParser::with_config(parser_config)?;
//!
//! let analysis = AnalysisConfig::new().with_top_words(10);
//! assert_eq!(analysis.top_words, 10);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::words::StopWords;
use crate::error::{ChatstatError, Result};
use crate::grammar::TimestampGrammar;

/// Default input size limit: 256MB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 256 * 1024 * 1024;

/// Placeholder WhatsApp writes instead of an attachment.
pub const DEFAULT_MEDIA_PLACEHOLDER: &str = "<Media omitted>";

/// Configuration for the log parser.
///
/// # Example
///
/// ```rust
/// use chatstat::config::ParserConfig;
/// use chatstat::grammar::TimestampGrammar;
///
/// let config = ParserConfig::new()
///     .with_grammar(TimestampGrammar::new(
///         "iso-dash",
///         r"(?m)^(?P<stamp>\d{4}-\d{2}-\d{2} \d{2}:\d{2}) - ",
///         ["%Y-%m-%d %H:%M"],
///     ));
/// assert_eq!(config.extra_grammars.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Reject documents larger than this many bytes (default: 256MB)
    pub max_input_bytes: usize,

    /// Try the built-in grammars (default: true)
    pub use_builtin_grammars: bool,

    /// Additional grammars, tried before the built-in ones
    pub extra_grammars: Vec<TimestampGrammar>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            use_builtin_grammars: true,
            extra_grammars: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input size limit.
    #[must_use]
    pub fn with_max_input_bytes(mut self, max: usize) -> Self {
        self.max_input_bytes = max;
        self
    }

    /// Enables or disables the built-in grammars.
    #[must_use]
    pub fn with_builtin_grammars(mut self, enabled: bool) -> Self {
        self.use_builtin_grammars = enabled;
        self
    }

    /// Adds a custom grammar.
    #[must_use]
    pub fn with_grammar(mut self, grammar: TimestampGrammar) -> Self {
        self.extra_grammars.push(grammar);
        self
    }

    /// Checks that the configuration can produce a working parser.
    pub fn validate(&self) -> Result<()> {
        if self.max_input_bytes == 0 {
            return Err(ChatstatError::invalid_config(
                "max_input_bytes must be greater than zero",
            ));
        }
        if !self.use_builtin_grammars && self.extra_grammars.is_empty() {
            return Err(ChatstatError::invalid_config(
                "built-in grammars are disabled and no custom grammar is configured",
            ));
        }
        Ok(())
    }
}

/// Configuration for the aggregation functions.
///
/// # Example
///
/// ```rust
/// use chatstat::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_top_senders(3)
///     .with_extra_stopwords(["lol", "ok"]);
///
/// let stopwords = config.stopwords();
/// assert!(stopwords.contains("lol"));
/// assert!(stopwords.contains("the"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of senders in the busiest-users table (default: 5)
    pub top_senders: usize,

    /// Number of words in the most-common-words table (default: 20)
    pub top_words: usize,

    /// Newline-separated stopword file replacing the built-in list
    pub stopwords_path: Option<PathBuf>,

    /// Stopwords added on top of the active list
    pub extra_stopwords: Vec<String>,

    /// Text that marks an attachment (default: `<Media omitted>`)
    pub media_placeholder: String,

    /// Longest gap still counted as a response, in minutes (default: 1440)
    pub max_response_gap_minutes: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_senders: 5,
            top_words: 20,
            stopwords_path: None,
            extra_stopwords: Vec::new(),
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
            max_response_gap_minutes: 24 * 60,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the busiest-users table.
    #[must_use]
    pub fn with_top_senders(mut self, k: usize) -> Self {
        self.top_senders = k;
        self
    }

    /// Sets the size of the most-common-words table.
    #[must_use]
    pub fn with_top_words(mut self, k: usize) -> Self {
        self.top_words = k;
        self
    }

    /// Loads stopwords from a file instead of the built-in list.
    #[must_use]
    pub fn with_stopwords_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords_path = Some(path.into());
        self
    }

    /// Adds stopwords on top of the active list.
    #[must_use]
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Sets the media placeholder text.
    #[must_use]
    pub fn with_media_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.media_placeholder = placeholder.into();
        self
    }

    /// Sets the longest gap counted as a response.
    #[must_use]
    pub fn with_max_response_gap_minutes(mut self, minutes: i64) -> Self {
        self.max_response_gap_minutes = minutes;
        self
    }

    /// Builds the stopword set.
    ///
    /// An unreadable stopword file is logged and the built-in list is used.
    pub fn stopwords(&self) -> StopWords {
        let base = match &self.stopwords_path {
            Some(path) => StopWords::from_file(path).unwrap_or_else(|e| {
                tracing::warn!(path = ?path, error = %e, "failed to read stopword file, using built-in list");
                StopWords::default()
            }),
            None => StopWords::default(),
        };
        base.with_words(self.extra_stopwords.iter().cloned())
    }
}

/// Complete configuration, as loaded from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take defaults.
    #[cfg(feature = "json-output")]
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads a configuration from a JSON file.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}
