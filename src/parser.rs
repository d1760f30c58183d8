//! Chat export log parser.
//!
//! [`LogParser`] turns the raw text of a chat export into an ordered list of
//! [`MessageRecord`]s. The timestamp grammar is detected once per document
//! (see [`crate::grammar`]), and every recognized timestamp starts a new
//! record. Everything up to the next timestamp is that record's body, so
//! multi-line messages need no special handling.
//!
//! # Example
//!
//! ```rust
//! use chatstat::parser::LogParser;
//! use chatstat::Sender;
//!
//! let export = "\
//! 15/01/24, 9:00 am - Messages and calls are end-to-end encrypted.
//! 15/01/24, 9:01 am - Alice: Morning!
//! 15/01/24, 9:02 am - Bob: Hi Alice
//! how are you?";
//!
//! let parsed = LogParser::new().parse(export)?;
//! assert_eq!(parsed.len(), 3);
//! assert_eq!(parsed.skipped(), 0);
//!
//! let records = parsed.records();
//! assert_eq!(records[0].sender, Sender::Notification);
//! assert_eq!(records[1].sender, Sender::participant("Alice"));
//! assert_eq!(records[2].text, "Hi Alice\nhow are you?");
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```
//!
//! # Failure Modes
//!
//! - A document in which no grammar recognizes a single line fails with
//!   [`ChatstatError::NoTimestampsFound`]. No placeholder records are produced.
//! - A line whose timestamp matches the grammar but decodes under none of
//!   its formats (e.g. month 13) is dropped and counted in
//!   [`ParsedLog::skipped`].
//! - Input above [`ParserConfig::max_input_bytes`] fails with
//!   [`ChatstatError::InputTooLarge`] before any scanning.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::{DEFAULT_MAX_INPUT_BYTES, ParserConfig};
use crate::error::{ChatstatError, Result};
use crate::grammar::{CompiledGrammar, STAMP_GROUP, builtin_grammars};
use crate::record::{MessageRecord, Sender};

/// `"<name>: "` at the start of a body; the shortest name wins.
static SENDER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\n]+?):\s").expect("sender pattern must compile"));

/// Result of parsing one export.
///
/// Holds the records in source order and the number of rows dropped for
/// unparseable timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLog {
    records: Vec<MessageRecord>,
    skipped: usize,
}

impl ParsedLog {
    /// Returns the parsed records in source order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// Returns the number of rows dropped because their timestamp could not
    /// be decoded.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if every recognized row was dropped.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the result and returns the records.
    pub fn into_records(self) -> Vec<MessageRecord> {
        self.records
    }
}

impl IntoIterator for ParsedLog {
    type Item = MessageRecord;
    type IntoIter = std::vec::IntoIter<MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Parser for exported chat logs.
///
/// A parser is immutable once built and can be shared between threads; each
/// call to [`parse`](LogParser::parse) is independent.
///
/// # Example
///
/// ```rust
/// use chatstat::parser::LogParser;
///
/// let parser = LogParser::new();
/// let err = parser.parse("just some text\nwithout timestamps").unwrap_err();
/// assert!(err.is_no_timestamps());
/// ```
#[derive(Debug, Clone)]
pub struct LogParser {
    grammars: Vec<CompiledGrammar>,
    max_input_bytes: usize,
}

impl LogParser {
    /// Creates a parser with the built-in grammars and default size limit.
    pub fn new() -> Self {
        Self {
            grammars: builtin_grammars().to_vec(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }

    /// Creates a parser with custom configuration.
    ///
    /// Custom grammars are tried before the built-in ones.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidConfig`] for an unusable configuration
    /// and [`ChatstatError::InvalidGrammar`] if a custom grammar does not
    /// compile.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;

        let mut grammars = config
            .extra_grammars
            .into_iter()
            .map(CompiledGrammar::compile)
            .collect::<Result<Vec<_>>>()?;

        if config.use_builtin_grammars {
            grammars.extend_from_slice(builtin_grammars());
        }

        Ok(Self {
            grammars,
            max_input_bytes: config.max_input_bytes,
        })
    }

    /// Returns the grammar names in the order they are tried.
    pub fn grammar_names(&self) -> Vec<&str> {
        self.grammars.iter().map(CompiledGrammar::name).collect()
    }

    /// Returns the input size limit in bytes.
    pub fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`parse`](LogParser::parse), returns
    /// [`ChatstatError::Io`] if the file cannot be read and
    /// [`ChatstatError::Utf8`] if it is not valid UTF-8.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParsedLog> {
        let path = path.as_ref();

        let size = usize::try_from(fs::metadata(path)?.len()).unwrap_or(usize::MAX);
        if size > self.max_input_bytes {
            return Err(ChatstatError::input_too_large(self.max_input_bytes, size));
        }

        let content = String::from_utf8(fs::read(path)?).map_err(|e| ChatstatError::Utf8 {
            context: format!("reading {}", path.display()),
            source: e,
        })?;

        self.parse(&content)
    }

    /// Parses the text of an export.
    ///
    /// # Errors
    ///
    /// - [`ChatstatError::InputTooLarge`] if `raw` exceeds the size limit
    /// - [`ChatstatError::NoTimestampsFound`] if no grammar matches any line
    pub fn parse(&self, raw: &str) -> Result<ParsedLog> {
        if raw.len() > self.max_input_bytes {
            return Err(ChatstatError::input_too_large(self.max_input_bytes, raw.len()));
        }

        let text = raw.strip_prefix('\u{FEFF}').unwrap_or(raw);

        let grammar = self
            .select_grammar(text)
            .ok_or_else(|| ChatstatError::no_timestamps(self.grammars.len()))?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        let mut matches = 0usize;
        // (stamp, body start) of the timestamp whose body is still open
        let mut open: Option<(&str, usize)> = None;

        for caps in grammar.regex().captures_iter(text) {
            let Some(delimiter) = caps.get(0) else {
                continue;
            };
            let stamp = caps
                .name(STAMP_GROUP)
                .map_or(delimiter.as_str(), |m| m.as_str());

            if let Some((prev_stamp, body_start)) = open.take() {
                let body = &text[body_start..delimiter.start()];
                push_record(grammar, prev_stamp, body, &mut records, &mut skipped);
            }
            open = Some((stamp, delimiter.end()));
            matches += 1;
        }
        tracing::debug!(grammar = grammar.name(), matches, "selected timestamp grammar");

        if let Some((stamp, body_start)) = open {
            push_record(grammar, stamp, &text[body_start..], &mut records, &mut skipped);
        }

        tracing::info!(
            grammar = grammar.name(),
            records = records.len(),
            skipped,
            "parsed chat export"
        );

        Ok(ParsedLog { records, skipped })
    }

    fn select_grammar(&self, text: &str) -> Option<&CompiledGrammar> {
        self.grammars.iter().find(|g| g.matches(text))
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an export with the default parser.
///
/// Shorthand for `LogParser::new().parse(raw)`.
pub fn parse(raw: &str) -> Result<ParsedLog> {
    LogParser::new().parse(raw)
}

fn push_record(
    grammar: &CompiledGrammar,
    stamp: &str,
    body: &str,
    records: &mut Vec<MessageRecord>,
    skipped: &mut usize,
) {
    match grammar.decode(stamp) {
        Some(timestamp) => {
            let (sender, text) = split_sender(body);
            records.push(MessageRecord::new(timestamp, sender, text));
        }
        None => {
            *skipped += 1;
            tracing::debug!(stamp, "dropping row with undecodable timestamp");
        }
    }
}

/// Splits a body into sender and text at the first `": "`.
///
/// Bodies without that prefix are notifications and are returned trimmed.
pub fn split_sender(body: &str) -> (Sender, String) {
    match SENDER_PREFIX.captures(body) {
        Some(caps) => {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let rest_start = caps.get(0).map_or(0, |m| m.end());
            let text = body[rest_start..].trim_end_matches(['\r', '\n']);
            (Sender::participant(name), text.to_string())
        }
        None => (Sender::Notification, body.trim().to_string()),
    }
}
