//! Headline counts: messages, words, media and links.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::filter::{Selection, select};
use crate::record::MessageRecord;

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"']+"#).expect("url pattern must compile")
});

/// Counts shown in the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TopStats {
    /// Records in the selection, notifications included.
    pub messages: usize,
    /// Whitespace-separated tokens.
    pub words: usize,
    /// Records whose text is the media placeholder.
    pub media: usize,
    /// URLs found by [`find_urls`].
    pub links: usize,
}

/// Computes [`TopStats`] for the selection.
///
/// # Example
///
/// ```
/// use chatstat::analysis::{Selection, fetch_stats};
/// use chatstat::parser::parse;
///
/// let parsed = parse("\
/// 15/01/24, 9:00 am - Alice: see https://example.com now
/// 15/01/24, 9:01 am - Bob: <Media omitted>
/// ")?;
/// let stats = fetch_stats(parsed.records(), &Selection::Overall, "<Media omitted>");
///
/// assert_eq!(stats.messages, 2);
/// assert_eq!(stats.words, 5);
/// assert_eq!(stats.media, 1);
/// assert_eq!(stats.links, 1);
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn fetch_stats(
    records: &[MessageRecord],
    selection: &Selection,
    media_placeholder: &str,
) -> TopStats {
    select(records, selection).fold(TopStats::default(), |mut stats, record| {
        stats.messages += 1;
        stats.words += record.text.split_whitespace().count();
        if record.is_media(media_placeholder) {
            stats.media += 1;
        }
        stats.links += find_urls(&record.text).len();
        stats
    })
}

/// Finds `http://`, `https://` and `www.` URLs in `text`.
///
/// Trailing sentence punctuation is not part of the URL.
pub fn find_urls(text: &str) -> Vec<&str> {
    URL.find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')', ']', '}']))
        .filter(|url| !url.is_empty())
        .collect()
}

/// Removes every `http...` token, as the word counters do before tokenizing.
pub(crate) fn strip_links(text: &str) -> std::borrow::Cow<'_, str> {
    static HTTP_TOKEN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"http\S+").expect("link pattern must compile"));
    HTTP_TOKEN.replace_all(text, "")
}
