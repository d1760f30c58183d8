//! Unified error types for chatstat.
//!
//! This module provides a single [`ChatstatError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Document-level** failures (no recognizable timestamps, oversized input)
//!   are returned to the caller as typed errors
//! - **Row-level** failures (a timestamp that decodes under no format) never
//!   surface here; the parser drops the row and counts it
//! - **Aggregators** never fail; empty input yields empty results

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatstat operations.
///
/// # Example
///
/// ```rust
/// use chatstat::error::Result;
/// use chatstat::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatError>;

/// The error type for all chatstat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatError {
    /// An I/O error occurred while reading an export or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No registered timestamp grammar matched anything in the document.
    ///
    /// This usually means the file is not a chat export, is an export from
    /// an unsupported locale, or is corrupted. Callers should show an
    /// "unrecognized export format" message; there is no partial result.
    #[error("Unrecognized export format: no timestamp lines found (tried {grammars_tried} grammars)")]
    NoTimestampsFound {
        /// Number of grammars that were tried
        grammars_tried: usize,
    },

    /// The input document exceeds the configured size limit.
    #[error("Input too large: {actual_size} bytes (maximum: {max_size} bytes)")]
    InputTooLarge {
        /// Maximum allowed size in bytes
        max_size: usize,
        /// Actual size of the input
        actual_size: usize,
    },

    /// A timestamp grammar could not be compiled.
    ///
    /// Only custom grammars can trigger this; the built-in table is
    /// validated by tests.
    #[error("Invalid timestamp grammar '{name}': {message}")]
    InvalidGrammar {
        /// Grammar name
        name: String,
        /// What is wrong with it
        message: String,
    },

    /// Invalid date in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Unknown output format, or one whose cargo feature is disabled.
    #[error("Invalid output format: {message}")]
    InvalidFormat { message: String },

    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization or configuration parsing error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatstatError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatError {
    /// Creates a "no timestamps found" error.
    pub fn no_timestamps(grammars_tried: usize) -> Self {
        ChatstatError::NoTimestampsFound { grammars_tried }
    }

    /// Creates an input-too-large error.
    pub fn input_too_large(max_size: usize, actual_size: usize) -> Self {
        ChatstatError::InputTooLarge {
            max_size,
            actual_size,
        }
    }

    /// Creates an invalid grammar error.
    pub fn invalid_grammar(name: impl Into<String>, message: impl Into<String>) -> Self {
        ChatstatError::InvalidGrammar {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatstatError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid output format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        ChatstatError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ChatstatError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatError::Io(_))
    }

    /// Returns `true` if no timestamp grammar matched the document.
    pub fn is_no_timestamps(&self) -> bool {
        matches!(self, ChatstatError::NoTimestampsFound { .. })
    }

    /// Returns `true` if the input was rejected for size.
    pub fn is_input_too_large(&self) -> bool {
        matches!(self, ChatstatError::InputTooLarge { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatstatError::InvalidDate { .. })
    }
}
