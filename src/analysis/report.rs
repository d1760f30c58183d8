//! Everything the dashboard shows, computed in one pass over the API.

use std::collections::BTreeSet;

use serde::Serialize;

use super::activity::{
    DailyPoint, DayCount, TimelinePoint, activity_heatmap, busiest_day, busiest_month,
    daily_timeline, hourly_activity, monthly_timeline, week_activity_map,
};
use super::emoji::{EmojiCount, emoji_frequencies};
use super::filter::Selection;
use super::response::{ResponseSummary, response_times};
use super::senders::{SenderShare, most_busy_users};
use super::sentiment::{
    SentimentDistribution, SentimentPoint, sentiment_distribution, sentiment_timeline,
};
use super::stats::{TopStats, fetch_stats};
use super::words::{WordCount, most_common_words};
use crate::config::AnalysisConfig;
use crate::record::MessageRecord;

/// Sorted, de-duplicated participant names. The notification sentinel is
/// never included.
///
/// ```
/// use chatstat::analysis::participants;
/// use chatstat::parser::parse;
///
/// let parsed = parse("\
/// 15/01/24, 9:00 am - Zoe: hi
/// 15/01/24, 9:01 am - Adam joined using this group's invite link
/// 15/01/24, 9:02 am - Adam: hello
/// 15/01/24, 9:03 am - Zoe: welcome
/// ")?;
/// assert_eq!(participants(parsed.records()), ["Adam", "Zoe"]);
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn participants(records: &[MessageRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.sender.name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Full analysis of one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// `"Overall"` or the selected participant.
    pub selection: String,
    pub participants: Vec<String>,
    pub stats: TopStats,
    /// Only computed for [`Selection::Overall`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_users: Option<Vec<SenderShare>>,
    pub monthly_timeline: Vec<TimelinePoint>,
    pub daily_timeline: Vec<DailyPoint>,
    pub week_activity: [DayCount; 7],
    pub hourly_activity: [u64; 24],
    pub activity_heatmap: [[u64; 24]; 7],
    pub busiest_day: Option<DayCount>,
    pub busiest_month: Option<TimelinePoint>,
    pub common_words: Vec<WordCount>,
    pub emojis: Vec<EmojiCount>,
    pub sentiment: SentimentDistribution,
    pub sentiment_timeline: Vec<SentimentPoint>,
    pub response_times: ResponseSummary,
}

impl Report {
    /// Runs every aggregator over `records` for `selection`.
    ///
    /// # Example
    ///
    /// ```
    /// use chatstat::analysis::{Report, Selection};
    /// use chatstat::config::AnalysisConfig;
    /// use chatstat::parser::parse;
    ///
    /// let parsed = parse("\
    /// 15/01/24, 9:00 am - Alice: good morning
    /// 15/01/24, 9:05 am - Bob: morning! 😀
    /// ")?;
    /// let report = Report::build(parsed.records(), &Selection::Overall, &AnalysisConfig::default());
    ///
    /// assert_eq!(report.stats.messages, 2);
    /// assert_eq!(report.participants, ["Alice", "Bob"]);
    /// assert_eq!(report.common_words[0].word, "morning");
    /// assert_eq!(report.response_times.average_minutes, 5.0);
    /// # Ok::<(), chatstat::ChatstatError>(())
    /// ```
    pub fn build(records: &[MessageRecord], selection: &Selection, config: &AnalysisConfig) -> Self {
        let media = config.media_placeholder.as_str();
        let stopwords = config.stopwords();

        let report = Self {
            selection: selection.to_string(),
            participants: participants(records),
            stats: fetch_stats(records, selection, media),
            busiest_users: selection
                .is_overall()
                .then(|| most_busy_users(records, config.top_senders)),
            monthly_timeline: monthly_timeline(records, selection),
            daily_timeline: daily_timeline(records, selection),
            week_activity: week_activity_map(records, selection),
            hourly_activity: hourly_activity(records, selection),
            activity_heatmap: activity_heatmap(records, selection),
            busiest_day: busiest_day(records, selection),
            busiest_month: busiest_month(records, selection),
            common_words: most_common_words(records, selection, &stopwords, media, config.top_words),
            emojis: emoji_frequencies(records, selection),
            sentiment: sentiment_distribution(records, selection, media),
            sentiment_timeline: sentiment_timeline(records, selection, media),
            response_times: response_times(records, selection, config.max_response_gap_minutes),
        };

        tracing::debug!(
            selection = %report.selection,
            messages = report.stats.messages,
            "built report"
        );
        report
    }
}
