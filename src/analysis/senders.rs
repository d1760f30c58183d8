//! Who talks the most.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::MessageRecord;

/// One row of the busiest-users table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderShare {
    pub sender: String,
    pub count: usize,
    /// Share of participant messages, in percent, rounded to 2 decimals.
    pub percent: f64,
}

/// Ranks participants by message count and returns the top `k`.
///
/// Notifications are excluded, and percentages are relative to participant
/// messages only. Equal counts keep the order of first appearance.
///
/// # Example
///
/// ```
/// use chatstat::analysis::most_busy_users;
/// use chatstat::parser::parse;
///
/// let parsed = parse("\
/// 15/01/24, 9:00 am - Alice: one
/// 15/01/24, 9:01 am - Bob: two
/// 15/01/24, 9:02 am - Alice: three
/// 15/01/24, 9:03 am - Carol joined
/// ")?;
/// let top = most_busy_users(parsed.records(), 5);
///
/// assert_eq!(top[0].sender, "Alice");
/// assert_eq!(top[0].count, 2);
/// assert_eq!(top[0].percent, 66.67);
/// assert_eq!(top.len(), 2);
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn most_busy_users(records: &[MessageRecord], k: usize) -> Vec<SenderShare> {
    let counts = sender_counts(records);
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    counts
        .into_iter()
        .take(k)
        .map(|(sender, count)| SenderShare {
            sender: sender.to_string(),
            count,
            percent: percent_of(count, total),
        })
        .collect()
}

/// Message count per participant, most active first.
///
/// Equal counts keep the order of first appearance.
pub fn sender_counts(records: &[MessageRecord]) -> Vec<(&str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for name in records.iter().filter_map(|r| r.sender.name()) {
        match index.get(name) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(name, counts.len());
                counts.push((name, 1));
            }
        }
    }

    // stable sort keeps first-appearance order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10_000.0).round() / 100.0
}
