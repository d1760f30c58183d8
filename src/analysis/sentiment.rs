//! Keyword-count sentiment.
//!
//! Each message is labelled by counting tokens from two fixed keyword lists.
//! More positive than negative hits gives [`SentimentLabel::Positive`], more
//! negative gives [`SentimentLabel::Negative`], anything else (including no
//! hits at all) is [`SentimentLabel::Neutral`]. Notifications and media
//! placeholders are not labelled.

use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::{Selection, select};
use crate::record::{MONTH_NAMES, MessageRecord};

pub const POSITIVE_WORDS: &[&str] = &[
    "happy", "love", "great", "good", "nice", "thanks", "awesome", "amazing", "excellent",
    "wonderful", "joy",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad", "bad", "hate", "terrible", "awful", "sorry", "angry", "upset", "disappointed",
    "problem", "fail",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Numeric score: 0.5, -0.5 or 0.0.
    pub fn score(self) -> f64 {
        match self {
            SentimentLabel::Positive => 0.5,
            SentimentLabel::Negative => -0.5,
            SentimentLabel::Neutral => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels one message.
///
/// Tokens are lowercased whitespace-separated words, compared exactly
/// against the keyword lists. Attached punctuation makes a token miss.
///
/// ```
/// use chatstat::analysis::{SentimentLabel, classify};
///
/// assert_eq!(classify("Thanks, this is great!"), SentimentLabel::Neutral);
/// assert_eq!(classify("thanks this is great"), SentimentLabel::Positive);
/// assert_eq!(classify("sorry, bad news"), SentimentLabel::Negative);
/// assert_eq!(classify("good but sad"), SentimentLabel::Neutral);
/// assert_eq!(classify("see you at 5"), SentimentLabel::Neutral);
/// ```
pub fn classify(text: &str) -> SentimentLabel {
    let lowered = text.to_lowercase();
    let (mut pos, mut neg) = (0usize, 0usize);

    for token in lowered.split_whitespace() {
        if POSITIVE_WORDS.contains(&token) {
            pos += 1;
        } else if NEGATIVE_WORDS.contains(&token) {
            neg += 1;
        }
    }

    match pos.cmp(&neg) {
        std::cmp::Ordering::Greater => SentimentLabel::Positive,
        std::cmp::Ordering::Less => SentimentLabel::Negative,
        std::cmp::Ordering::Equal => SentimentLabel::Neutral,
    }
}

/// Count of each label. All three are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    fn add(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Sentiment distribution for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentPoint {
    pub year: i32,
    pub month_num: u32,
    /// `"<Month>-<year>"`.
    pub label: String,
    pub distribution: SentimentDistribution,
    /// Mean score of the month's labelled messages.
    pub mean_score: f64,
}

/// Labels every eligible message in the selection.
pub fn classify_records<'a>(
    records: &'a [MessageRecord],
    selection: &'a Selection,
    media_placeholder: &'a str,
) -> impl Iterator<Item = (&'a MessageRecord, SentimentLabel)> + 'a {
    select(records, selection)
        .filter(move |r| !r.is_notification() && !r.is_media(media_placeholder))
        .map(|r| (r, classify(&r.text)))
}

/// Counts labels over the selection.
pub fn sentiment_distribution(
    records: &[MessageRecord],
    selection: &Selection,
    media_placeholder: &str,
) -> SentimentDistribution {
    let mut dist = SentimentDistribution::default();
    for (_, label) in classify_records(records, selection, media_placeholder) {
        dist.add(label);
    }
    dist
}

/// Sentiment per month, in chronological order.
pub fn sentiment_timeline(
    records: &[MessageRecord],
    selection: &Selection,
    media_placeholder: &str,
) -> Vec<SentimentPoint> {
    let mut months: BTreeMap<(i32, u32), SentimentDistribution> = BTreeMap::new();
    for (record, label) in classify_records(records, selection, media_placeholder) {
        months
            .entry((record.year, record.month_num))
            .or_default()
            .add(label);
    }

    months
        .into_iter()
        .map(|((year, month_num), distribution)| {
            let total = distribution.total();
            let sum = distribution.positive as f64 * SentimentLabel::Positive.score()
                + distribution.negative as f64 * SentimentLabel::Negative.score();
            SentimentPoint {
                year,
                month_num,
                label: format!("{}-{year}", MONTH_NAMES[(month_num - 1) as usize]),
                distribution,
                mean_score: if total == 0 { 0.0 } else { sum / total as f64 },
            }
        })
        .collect()
}
