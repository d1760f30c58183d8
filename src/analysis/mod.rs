//! Aggregations over parsed records.
//!
//! Every aggregator is a pure function of `&[MessageRecord]` plus a
//! [`Selection`] ("Overall" or one participant). None of them fail: empty
//! input yields zero counts or empty tables.
//!
//! - [`filter`] - [`Selection`], [`FilterConfig`], [`apply_filters`]
//! - [`stats`] - message, word, media and link counts
//! - [`activity`] - timelines, weekday/hour histograms, heatmap
//! - [`senders`] - busiest participants
//! - [`words`] - stopwords and word frequencies
//! - [`emoji`] - emoji frequencies
//! - [`sentiment`] - keyword sentiment labels
//! - [`response`] - response latency between participants
//! - [`report`] - all of the above in one [`Report`]
//! - [`output`] - CSV, JSON and JSONL writers
//!
//! # Quick Start
//!
//! ```rust
//! use chatstat::analysis::{Report, Selection, hourly_activity};
//! use chatstat::config::AnalysisConfig;
//! use chatstat::parser::parse;
//!
//! let parsed = parse("15/01/24, 11:15 pm - Alice: late night")?;
//! let hours = hourly_activity(parsed.records(), &Selection::Overall);
//! assert_eq!(hours[23], 1);
//!
//! let report = Report::build(parsed.records(), &Selection::sender("Alice"), &AnalysisConfig::default());
//! assert_eq!(report.stats.words, 2);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

pub mod activity;
pub mod emoji;
pub mod filter;
pub mod output;
pub mod report;
pub mod response;
pub mod senders;
pub mod sentiment;
pub mod stats;
pub mod words;

pub use activity::{
    DailyPoint, DayCount, TimelinePoint, activity_heatmap, busiest_day, busiest_month,
    daily_timeline, hourly_activity, monthly_timeline, week_activity_map,
};
pub use emoji::{EmojiCount, emoji_frequencies, is_emoji};
pub use filter::{FilterConfig, Selection, apply_filters, select};
pub use report::{Report, participants};
pub use response::{ResponderLatency, Response, ResponseSummary, response_times};
pub use senders::{SenderShare, most_busy_users, sender_counts};
pub use sentiment::{
    SentimentDistribution, SentimentLabel, SentimentPoint, classify, sentiment_distribution,
    sentiment_timeline,
};
pub use stats::{TopStats, fetch_stats, find_urls};
pub use words::{StopWords, WordCount, most_common_words, word_frequencies};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
