//! Restrict records by sender and date range.
//!
//! Two layers of restriction are provided:
//!
//! | Type | Used by | Description |
//! |------|---------|-------------|
//! | [`FilterConfig`] | CLI `--user/--after/--before` | Pre-filters the record table once |
//! | [`Selection`] | every aggregator | "Overall" or one participant |
//!
//! # Examples
//!
//! ## Filter by Date Range
//!
//! ```
//! use chatstat::analysis::filter::{FilterConfig, apply_filters};
//! use chatstat::{MessageRecord, Sender};
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatstat::Result<()> {
//! let at = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let records = vec![
//!     MessageRecord::new(at(1), Sender::participant("Alice"), "Old"),
//!     MessageRecord::new(at(20), Sender::participant("Alice"), "New"),
//! ];
//!
//! let config = FilterConfig::new().with_date_from("2024-01-15")?;
//! let filtered = apply_filters(records, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - `FilterConfig` sender matching is case-insensitive for ASCII characters
//!   and never matches notifications
//! - `Selection::Sender` matching is exact
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ChatstatError, Result};
use crate::record::MessageRecord;

/// The "show analysis w.r.t." choice: the whole chat or one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Every record.
    #[default]
    Overall,
    /// Only records authored by this participant.
    Sender(String),
}

impl Selection {
    /// Selects one participant.
    pub fn sender(name: impl Into<String>) -> Self {
        Selection::Sender(name.into())
    }

    /// Returns `true` for [`Selection::Overall`].
    pub fn is_overall(&self) -> bool {
        matches!(self, Selection::Overall)
    }

    /// Returns `true` if `record` belongs to this selection.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        match self {
            Selection::Overall => true,
            Selection::Sender(name) => record.sender.name() == Some(name.as_str()),
        }
    }
}

impl From<Option<String>> for Selection {
    fn from(name: Option<String>) -> Self {
        name.map_or(Selection::Overall, Selection::Sender)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Overall => f.write_str("Overall"),
            Selection::Sender(name) => f.write_str(name),
        }
    }
}

/// Iterates over the records in `selection`, preserving order.
pub fn select<'a>(
    records: &'a [MessageRecord],
    selection: &'a Selection,
) -> impl Iterator<Item = &'a MessageRecord> + 'a {
    records.iter().filter(move |r| selection.matches(r))
}

/// Configuration for filtering records by date and sender.
///
/// # Examples
///
/// ```
/// use chatstat::analysis::filter::FilterConfig;
///
/// # fn main() -> chatstat::Result<()> {
/// let combined = FilterConfig::new()
///     .with_sender("Alice")
///     .with_date_from("2024-06-01")?
///     .with_date_to("2024-12-31")?;
/// assert!(combined.is_active());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only records on or after this time.
    pub after: Option<NaiveDateTime>,

    /// Include only records on or before this time.
    pub before: Option<NaiveDateTime>,

    /// Include only records from this participant (case-insensitive).
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates an empty filter; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        let date = parse_date(date_str)?;
        self.after = Some(date.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive of the whole day).
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let end_of_day = parse_date(date_str)?
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatstatError::invalid_date(date_str))?;
        self.before = Some(end_of_day);
        Ok(self)
    }

    /// Sets the sender filter.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Sets the start time directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end time directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.from.is_some()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        if let Some(ref from) = self.from {
            match record.sender.name() {
                Some(name) if name.eq_ignore_ascii_case(from) => {}
                _ => return false,
            }
        }
        if self.after.is_some_and(|after| record.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| record.timestamp > before) {
            return false;
        }
        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatstatError::invalid_date(date_str))
}

/// Keeps the records that match all active filters, in order.
pub fn apply_filters(records: Vec<MessageRecord>, config: &FilterConfig) -> Vec<MessageRecord> {
    if !config.is_active() {
        return records;
    }
    records.into_iter().filter(|r| config.matches(r)).collect()
}
