//! Emoji usage.

use std::collections::HashMap;

use serde::Serialize;

use super::filter::{Selection, select};
use crate::record::MessageRecord;

/// One row of the emoji table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    pub emoji: char,
    pub count: usize,
}

/// Returns `true` for pictographic code points.
///
/// Covers the emoticon, pictograph, transport, symbol and dingbat blocks.
/// Modifiers, joiners and variation selectors are not counted.
pub fn is_emoji(c: char) -> bool {
    matches!(c,
        '\u{1F300}'..='\u{1F5FF}'
        | '\u{1F600}'..='\u{1F64F}'
        | '\u{1F680}'..='\u{1F6FF}'
        | '\u{1F700}'..='\u{1F7FF}'
        | '\u{1F800}'..='\u{1F8FF}'
        | '\u{1F900}'..='\u{1F9FF}'
        | '\u{1FA00}'..='\u{1FAFF}'
        | '\u{2600}'..='\u{26FF}'
        | '\u{2702}'..='\u{27B0}'
    )
}

/// Emoji frequencies, most frequent first.
///
/// Each pictographic code point is counted on its own, so `"😂😂"` counts
/// `😂` twice. Equal counts keep the order of first appearance.
///
/// # Example
///
/// ```
/// use chatstat::analysis::{Selection, emoji_frequencies};
/// use chatstat::parser::parse;
///
/// let parsed = parse("\
/// 15/01/24, 9:00 am - Alice: haha 😂😂
/// 15/01/24, 9:01 am - Bob: 👍 😂
/// ")?;
/// let emojis = emoji_frequencies(parsed.records(), &Selection::Overall);
///
/// assert_eq!(emojis[0].emoji, '😂');
/// assert_eq!(emojis[0].count, 3);
/// assert_eq!(emojis[1].emoji, '👍');
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn emoji_frequencies(records: &[MessageRecord], selection: &Selection) -> Vec<EmojiCount> {
    let mut index: HashMap<char, usize> = HashMap::new();
    let mut counts: Vec<EmojiCount> = Vec::new();

    for emoji in select(records, selection).flat_map(|r| r.text.chars().filter(|&c| is_emoji(c))) {
        match index.get(&emoji) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(emoji, counts.len());
                counts.push(EmojiCount { emoji, count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
