//! Response latency between participants.
//!
//! A response is a pair of consecutive participant messages `(a, b)` whose
//! senders differ. `b.sender` responded to `a.sender` after
//! `b.timestamp - a.timestamp`. Notifications are removed before pairing,
//! so a join message between two participants does not break the pair.
//! Gaps longer than the configured maximum are not counted as responses.

use std::collections::HashMap;

use serde::Serialize;

use super::filter::Selection;
use crate::record::MessageRecord;

/// One counted response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Sender of the earlier message.
    pub from: String,
    /// Sender of the reply.
    pub to: String,
    pub minutes: f64,
}

/// Average latency for one responder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponderLatency {
    pub sender: String,
    pub responses: usize,
    pub average_minutes: f64,
}

/// Result of [`response_times`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseSummary {
    /// Mean of all counted responses, rounded to 2 decimals; 0 when there
    /// are none.
    pub average_minutes: f64,
    pub responses: Vec<Response>,
    /// Per responder, in order of first response.
    pub by_responder: Vec<ResponderLatency>,
}

impl ResponseSummary {
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Measures how long participants take to answer each other.
///
/// With [`Selection::Sender`], only responses written by that participant
/// are counted; the message being answered may come from anyone.
///
/// # Example
///
/// ```
/// use chatstat::analysis::{Selection, response_times};
/// use chatstat::parser::parse;
///
/// let parsed = parse("\
/// 15/01/24, 9:00 am - Alice: ping
/// 15/01/24, 9:10 am - Bob: pong
/// 15/01/24, 9:40 am - Alice: ping again
/// ")?;
/// let summary = response_times(parsed.records(), &Selection::Overall, 24 * 60);
///
/// assert_eq!(summary.responses.len(), 2);
/// assert_eq!(summary.responses[0].from, "Alice");
/// assert_eq!(summary.responses[0].to, "Bob");
/// assert_eq!(summary.average_minutes, 20.0);
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn response_times(
    records: &[MessageRecord],
    selection: &Selection,
    max_gap_minutes: i64,
) -> ResponseSummary {
    let mut participants: Vec<&MessageRecord> =
        records.iter().filter(|r| !r.is_notification()).collect();
    participants.sort_by_key(|r| r.timestamp);

    let mut responses = Vec::new();
    for pair in participants.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.sender == b.sender || !selection.matches(b) {
            continue;
        }
        let seconds = (b.timestamp - a.timestamp).num_seconds();
        if seconds > max_gap_minutes.saturating_mul(60) {
            continue;
        }
        responses.push(Response {
            from: a.sender.to_string(),
            to: b.sender.to_string(),
            minutes: seconds as f64 / 60.0,
        });
    }

    let average_minutes = round2(mean(responses.iter().map(|r| r.minutes)));
    let by_responder = by_responder(&responses);

    tracing::debug!(
        responses = responses.len(),
        average_minutes,
        "computed response times"
    );

    ResponseSummary {
        average_minutes,
        responses,
        by_responder,
    }
}

fn by_responder(responses: &[Response]) -> Vec<ResponderLatency> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, usize, f64)> = Vec::new();

    for r in responses {
        match index.get(r.to.as_str()) {
            Some(&i) => {
                totals[i].1 += 1;
                totals[i].2 += r.minutes;
            }
            None => {
                index.insert(r.to.as_str(), totals.len());
                totals.push((r.to.as_str(), 1, r.minutes));
            }
        }
    }

    totals
        .into_iter()
        .map(|(sender, n, sum)| ResponderLatency {
            sender: sender.to_string(),
            responses: n,
            average_minutes: round2(sum / n as f64),
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
