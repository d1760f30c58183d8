//! Parsed chat record type.
//!
//! This module provides [`MessageRecord`], the parser's unit of output, and
//! [`Sender`], which distinguishes participants from system notifications.
//! Every aggregator in [`crate::analysis`] consumes records only through the
//! fields defined here.
//!
//! # Output Schema
//!
//! | Field | Type | Description |
//! |-------|------|-------------|
//! | `timestamp` | `NaiveDateTime` | When the message was sent (export local time) |
//! | `sender` | [`Sender`] | Author, or the notification sentinel |
//! | `text` | `String` | Message body, sender prefix stripped |
//! | `year` | `i32` | Calendar year |
//! | `month_num` | `u32` | Month, 1-12 |
//! | `month_name` | `&str` | `"January"` .. `"December"` |
//! | `day` | `u32` | Day of month |
//! | `day_name` | `&str` | `"Monday"` .. `"Sunday"` |
//! | `hour` | `u32` | Hour, 0-23 |
//! | `minute` | `u32` | Minute, 0-59 |
//!
//! # Example
//!
//! ```
//! use chatstat::{MessageRecord, Sender};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(10, 30, 0)
//!     .unwrap();
//! let record = MessageRecord::new(ts, Sender::participant("Alice"), "Hello!");
//!
//! assert_eq!(record.month_name, "January");
//! assert_eq!(record.day_name, "Monday");
//! assert_eq!(record.hour, 10);
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// The string form of [`Sender::Notification`].
pub const NOTIFICATION_SENTINEL: &str = "group_notification";

/// English month names indexed by `month_num - 1`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English weekday names, Monday first.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Author of a record.
///
/// Lines that do not carry a `"name: "` prefix (joins, leaves, subject
/// changes, encryption notices) have no identifiable author and are
/// represented by [`Sender::Notification`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sender {
    /// A chat participant, as written in the export.
    Participant(String),
    /// No identifiable sender.
    Notification,
}

impl Sender {
    /// Creates a participant sender.
    pub fn participant(name: impl Into<String>) -> Self {
        Sender::Participant(name.into())
    }

    /// Returns the participant name, or [`NOTIFICATION_SENTINEL`].
    pub fn as_str(&self) -> &str {
        match self {
            Sender::Participant(name) => name,
            Sender::Notification => NOTIFICATION_SENTINEL,
        }
    }

    /// Returns `true` for the notification sentinel.
    pub fn is_notification(&self) -> bool {
        matches!(self, Sender::Notification)
    }

    /// Returns the participant name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Sender::Participant(name) => Some(name),
            Sender::Notification => None,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Sender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One parsed chat message with its cached calendar fields.
///
/// Records are immutable once emitted by the parser. The calendar fields are
/// pure functions of `timestamp` and are computed in [`MessageRecord::new`].
///
/// # Serialization
///
/// Serializes to the flat output schema. `sender` becomes a plain string
/// (`"group_notification"` for notifications) and `timestamp` uses ISO 8601
/// without offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    /// When the message was sent, in the export's local time.
    pub timestamp: NaiveDateTime,

    /// Author of the message.
    pub sender: Sender,

    /// Message body.
    ///
    /// May contain newlines for multi-line messages.
    pub text: String,

    pub year: i32,
    pub month_num: u32,
    pub month_name: &'static str,
    pub day: u32,
    pub day_name: &'static str,
    pub hour: u32,
    pub minute: u32,
}

impl MessageRecord {
    /// Creates a record and derives its calendar fields from `timestamp`.
    pub fn new(timestamp: NaiveDateTime, sender: Sender, text: impl Into<String>) -> Self {
        let month_num = timestamp.month();
        Self {
            timestamp,
            sender,
            text: text.into(),
            year: timestamp.year(),
            month_num,
            month_name: MONTH_NAMES[(month_num - 1) as usize],
            day: timestamp.day(),
            day_name: DAY_NAMES[timestamp.weekday().num_days_from_monday() as usize],
            hour: timestamp.hour(),
            minute: timestamp.minute(),
        }
    }

    /// Returns `true` if this record is a system notification.
    pub fn is_notification(&self) -> bool {
        self.sender.is_notification()
    }

    /// Returns `true` if the trimmed text equals `placeholder`.
    ///
    /// Exports replace attachments with a fixed placeholder such as
    /// `<Media omitted>`.
    pub fn is_media(&self, placeholder: &str) -> bool {
        self.text.trim() == placeholder
    }

    /// Returns `true` if the text is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
