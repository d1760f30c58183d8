//! Activity over time: monthly and daily timelines, weekday and hour
//! histograms, and the weekday x hour heatmap.
//!
//! Histograms are zero-filled so callers can chart them directly: every
//! weekday and every hour is present even when the selection is empty.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::filter::{Selection, select};
use crate::record::{DAY_NAMES, MONTH_NAMES, MessageRecord};

/// Message count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub year: i32,
    pub month_num: u32,
    pub month_name: &'static str,
    /// `"<Month>-<year>"`, e.g. `"January-2024"`.
    pub label: String,
    pub count: usize,
}

/// Message count for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub count: usize,
}

/// Message count for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day_name: &'static str,
    pub count: usize,
}

/// Messages per month, in chronological order.
///
/// Only months with at least one message appear.
///
/// # Example
///
/// ```
/// use chatstat::analysis::{Selection, monthly_timeline};
/// use chatstat::parser::parse;
///
/// let parsed = parse("\
/// 15/02/24, 9:00 am - Alice: later
/// 15/01/24, 9:00 am - Bob: earlier
/// ")?;
/// let timeline = monthly_timeline(parsed.records(), &Selection::Overall);
///
/// assert_eq!(timeline[0].label, "January-2024");
/// assert_eq!(timeline[1].label, "February-2024");
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn monthly_timeline(records: &[MessageRecord], selection: &Selection) -> Vec<TimelinePoint> {
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for record in select(records, selection) {
        *months.entry((record.year, record.month_num)).or_default() += 1;
    }

    months
        .into_iter()
        .map(|((year, month_num), count)| {
            let month_name = MONTH_NAMES[(month_num - 1) as usize];
            TimelinePoint {
                year,
                month_num,
                month_name,
                label: format!("{month_name}-{year}"),
                count,
            }
        })
        .collect()
}

/// Messages per day, in chronological order. Days without messages are
/// omitted.
pub fn daily_timeline(records: &[MessageRecord], selection: &Selection) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in select(records, selection) {
        *days.entry(record.timestamp.date()).or_default() += 1;
    }
    days.into_iter()
        .map(|(date, count)| DailyPoint { date, count })
        .collect()
}

/// Messages per weekday, Monday through Sunday.
pub fn week_activity_map(records: &[MessageRecord], selection: &Selection) -> [DayCount; 7] {
    let mut counts = [0usize; 7];
    for record in select(records, selection) {
        counts[weekday_index(record)] += 1;
    }
    std::array::from_fn(|i| DayCount {
        day_name: DAY_NAMES[i],
        count: counts[i],
    })
}

/// Messages per hour of day; index 0 is midnight.
pub fn hourly_activity(records: &[MessageRecord], selection: &Selection) -> [u64; 24] {
    let mut hours = [0u64; 24];
    for record in select(records, selection) {
        hours[record.hour as usize] += 1;
    }
    hours
}

/// Weekday x hour grid. Rows are Monday..Sunday, columns are hours 0-23.
pub fn activity_heatmap(records: &[MessageRecord], selection: &Selection) -> [[u64; 24]; 7] {
    let mut grid = [[0u64; 24]; 7];
    for record in select(records, selection) {
        grid[weekday_index(record)][record.hour as usize] += 1;
    }
    grid
}

/// The weekday with the most messages. Ties go to the earlier weekday.
pub fn busiest_day(records: &[MessageRecord], selection: &Selection) -> Option<DayCount> {
    week_activity_map(records, selection)
        .into_iter()
        .filter(|d| d.count > 0)
        .reduce(|best, d| if d.count > best.count { d } else { best })
}

/// The month with the most messages. Ties go to the earlier month.
pub fn busiest_month(records: &[MessageRecord], selection: &Selection) -> Option<TimelinePoint> {
    monthly_timeline(records, selection)
        .into_iter()
        .reduce(|best, m| if m.count > best.count { m } else { best })
}

fn weekday_index(record: &MessageRecord) -> usize {
    record.timestamp.weekday().num_days_from_monday() as usize
}
