//! Edge case tests for chatstat
//!
//! These tests cover boundary conditions of the parser and the aggregators
//! that the unit tests don't reach.

use chatstat::analysis::{
    Selection, StopWords, emoji_frequencies, fetch_stats, find_urls, hourly_activity,
    most_busy_users, most_common_words, response_times, sentiment_distribution,
};
use chatstat::parser::{parse, split_sender};
use chatstat::{MessageRecord, Sender};
use chrono::NaiveDate;

const MEDIA: &str = "<Media omitted>";

fn rec(sender: &str, day: u32, hour: u32, minute: u32, text: &str) -> MessageRecord {
    let ts = NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    let sender = if sender.is_empty() {
        Sender::Notification
    } else {
        Sender::participant(sender)
    };
    MessageRecord::new(ts, sender, text)
}

// =========================================================================
// Parser input edge cases
// =========================================================================

#[test]
fn test_empty_input_has_no_timestamps() {
    assert!(parse("").unwrap_err().is_no_timestamps());
    assert!(parse("\n\n   \n").unwrap_err().is_no_timestamps());
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let parsed = parse("\u{FEFF}15/01/24, 9:00 am - Alice: hi\n").unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.records()[0].sender.as_str(), "Alice");
}

#[test]
fn test_crlf_line_endings() {
    let parsed = parse("15/01/24, 9:00 am - Alice: hi\r\n15/01/24, 9:01 am - Bob: yo\r\n").unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.records()[0].text, "hi");
    assert_eq!(parsed.records()[1].text, "yo");
}

#[test]
fn test_narrow_no_break_space_before_meridiem() {
    let parsed = parse("15/01/24, 5:30\u{202F}pm - Alice: tea?\n").unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.records()[0].hour, 17);
}

#[test]
fn test_uppercase_meridiem() {
    let parsed = parse("15/01/24, 5:30 PM - Alice: tea?\n").unwrap();
    assert_eq!(parsed.records()[0].hour, 17);
}

#[test]
fn test_left_to_right_mark_before_timestamp() {
    let parsed = parse("\u{200E}[1/15/24, 10:30:00 AM] Alice: hi\n").unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.records()[0].hour, 10);
}

#[test]
fn test_timestamp_inside_text_does_not_split() {
    let text = "15/01/24, 9:00 am - Alice: we said 15/01/24, 9:30 am - Bob: in chat\n";
    let parsed = parse(text).unwrap();
    assert_eq!(parsed.len(), 1);
    assert!(parsed.records()[0].text.contains("Bob: in chat"));
}

#[test]
fn test_all_rows_undecodable_yields_empty_log() {
    let text = "31/02/24, 9:00 am - Alice: no\n30/02/24, 9:01 am - Bob: nope\n";
    let parsed = parse(text).unwrap();
    assert!(parsed.is_empty());
    assert_eq!(parsed.skipped(), 2);
}

#[test]
fn test_last_record_without_trailing_newline() {
    let parsed = parse("15/01/24, 9:00 am - Alice: a\n15/01/24, 9:01 am - Bob: end").unwrap();
    assert_eq!(parsed.records()[1].text, "end");
}

#[test]
fn test_empty_message_text() {
    let parsed = parse("15/01/24, 9:00 am - Alice: \n").unwrap();
    assert_eq!(parsed.len(), 1);
    assert!(parsed.records()[0].is_empty());
    assert_eq!(parsed.records()[0].sender.as_str(), "Alice");
}

#[test]
fn test_unicode_senders_and_text() {
    let text = "\
15/01/24, 9:00 am - 田中太郎: こんにちは世界！
15/01/24, 9:01 am - محمد: مرحبا بالعالم
15/01/24, 9:02 am - User 🎉: Hello 👋 World 🌍
";
    let parsed = parse(text).unwrap();
    let names: Vec<_> = parsed.records().iter().map(|r| r.sender.as_str()).collect();
    assert_eq!(names, ["田中太郎", "محمد", "User 🎉"]);
}

// =========================================================================
// Sender splitting
// =========================================================================

#[test]
fn test_split_sender_uses_first_colon_space() {
    let (sender, text) = split_sender("Alice: note: remember milk\n");
    assert_eq!(sender, Sender::participant("Alice"));
    assert_eq!(text, "note: remember milk");
}

#[test]
fn test_split_sender_colon_without_space_is_notification() {
    let (sender, text) = split_sender("Meeting at 10:30\n");
    assert!(sender.is_notification());
    assert_eq!(text, "Meeting at 10:30");
}

#[test]
fn test_split_sender_phone_number() {
    let (sender, _) = split_sender("+1 555 0100: hello\n");
    assert_eq!(sender.as_str(), "+1 555 0100");
}

#[test]
fn test_split_sender_keeps_leading_whitespace_in_text() {
    let (_, text) = split_sender("Alice:   indented\n");
    assert_eq!(text, "  indented");
}

// =========================================================================
// Aggregator edge cases
// =========================================================================

#[test]
fn test_aggregators_on_empty_input() {
    let records: Vec<MessageRecord> = Vec::new();
    let all = Selection::Overall;

    assert_eq!(fetch_stats(&records, &all, MEDIA).messages, 0);
    assert!(most_busy_users(&records, 5).is_empty());
    assert!(most_common_words(&records, &all, &StopWords::default(), MEDIA, 20).is_empty());
    assert!(emoji_frequencies(&records, &all).is_empty());
    assert_eq!(hourly_activity(&records, &all), [0; 24]);
    assert_eq!(sentiment_distribution(&records, &all, MEDIA).total(), 0);

    let responses = response_times(&records, &all, 1440);
    assert!(responses.is_empty());
    assert_eq!(responses.average_minutes, 0.0);
}

#[test]
fn test_unknown_sender_selection_is_empty() {
    let records = vec![rec("Alice", 15, 9, 0, "hi"), rec("Bob", 15, 9, 1, "hello")];
    let selection = Selection::sender("Zed");

    assert_eq!(fetch_stats(&records, &selection, MEDIA).messages, 0);
    assert!(most_common_words(&records, &selection, &StopWords::default(), MEDIA, 20).is_empty());
}

#[test]
fn test_sender_selection_never_matches_notifications() {
    let records = vec![rec("", 15, 9, 0, "group_notification joined")];
    let selection = Selection::sender("group_notification");
    assert_eq!(fetch_stats(&records, &selection, MEDIA).messages, 0);
}

#[test]
fn test_top_k_zero() {
    let records = vec![rec("Alice", 15, 9, 0, "hello world")];
    assert!(most_busy_users(&records, 0).is_empty());
    assert!(
        most_common_words(&records, &Selection::Overall, &StopWords::default(), MEDIA, 0)
            .is_empty()
    );
}

#[test]
fn test_only_notifications() {
    let records = vec![rec("", 15, 9, 0, "Alice joined"), rec("", 15, 9, 5, "Bob left")];

    assert!(most_busy_users(&records, 5).is_empty());
    assert!(response_times(&records, &Selection::Overall, 1440).is_empty());
    assert_eq!(fetch_stats(&records, &Selection::Overall, MEDIA).messages, 2);
}

#[test]
fn test_response_gap_limit() {
    let records = vec![
        rec("Alice", 15, 9, 0, "ping"),
        rec("Bob", 16, 9, 1, "a day and a minute later"),
        rec("Alice", 16, 9, 3, "quick"),
    ];
    let summary = response_times(&records, &Selection::Overall, 24 * 60);

    assert_eq!(summary.responses.len(), 1);
    assert_eq!(summary.responses[0].to, "Alice");
    assert_eq!(summary.average_minutes, 2.0);
}

#[test]
fn test_response_times_for_selected_responder() {
    let records = vec![
        rec("Alice", 15, 9, 0, "ping"),
        rec("Bob", 15, 9, 10, "pong"),
        rec("Alice", 15, 9, 12, "ping"),
    ];
    let summary = response_times(&records, &Selection::sender("Bob"), 1440);

    assert_eq!(summary.responses.len(), 1);
    assert_eq!(summary.average_minutes, 10.0);
}

#[test]
fn test_media_placeholder_is_not_a_word() {
    let records = vec![rec("Alice", 15, 9, 0, MEDIA), rec("Bob", 15, 9, 1, "media here")];
    let words = most_common_words(&records, &Selection::Overall, &StopWords::empty(), MEDIA, 10);
    assert!(words.iter().all(|w| w.word != "omitted"));
    assert_eq!(words[0].word, "media");
}

#[test]
fn test_find_urls_trims_trailing_punctuation() {
    let urls = find_urls("see https://example.com/a, and (www.rust-lang.org).");
    assert_eq!(urls, ["https://example.com/a", "www.rust-lang.org"]);
}

#[test]
fn test_emoji_sequences_count_each_code_point() {
    let records = vec![rec("Alice", 15, 9, 0, "😂😂🔥 text ☕")];
    let emojis = emoji_frequencies(&records, &Selection::Overall);

    assert_eq!(emojis[0].emoji, '😂');
    assert_eq!(emojis[0].count, 2);
    assert_eq!(emojis.len(), 3);
}
