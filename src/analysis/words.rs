//! Word frequency tables and the stopword list.
//!
//! Tokens are produced the same way for [`most_common_words`] and
//! [`word_frequencies`]:
//!
//! 1. notifications and media placeholders are skipped
//! 2. `http...` tokens are removed, then ASCII punctuation
//! 3. the text is lowercased and split on whitespace
//! 4. stopwords and single-character tokens are dropped

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Serialize;

use super::filter::{Selection, select};
use super::stats::strip_links;
use crate::error::Result;
use crate::record::MessageRecord;

/// Built-in stopwords: common English and romanized Hindi filler words.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "and", "is", "in", "to", "of", "a", "for", "hai", "ki", "ko", "ka", "tha", "this",
    "that", "it", "me", "my", "you", "your", "na", "se", "ha", "was", "ho", "par",
];

/// A set of lowercase words excluded from word statistics.
///
/// # Example
///
/// ```
/// use chatstat::analysis::StopWords;
///
/// let stopwords = StopWords::default().with_words(["lol"]);
/// assert!(stopwords.contains("the"));
/// assert!(stopwords.contains("LOL"));
/// assert!(!stopwords.contains("rust"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Loads a newline-separated stopword file.
    ///
    /// Blank lines are ignored and entries are lowercased.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&content))
    }

    /// Builds a set from newline-separated text.
    pub fn parse(content: &str) -> Self {
        Self::empty().with_words(content.lines())
    }

    /// Adds words to the set.
    #[must_use]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    /// Returns `true` if `word` is a stopword, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::empty().with_words(DEFAULT_STOPWORDS)
    }
}

/// One row of the most-common-words table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// The `k` most frequent non-stopword tokens, most frequent first.
///
/// Equal counts keep the order of first appearance.
///
/// # Example
///
/// ```
/// use chatstat::analysis::{Selection, StopWords, most_common_words};
/// use chatstat::parser::parse;
///
/// let parsed = parse("\
/// 15/01/24, 9:00 am - Alice: Rust is great!
/// 15/01/24, 9:01 am - Bob: rust, rust and more RUST
/// ")?;
/// let top = most_common_words(
///     parsed.records(),
///     &Selection::Overall,
///     &StopWords::default(),
///     "<Media omitted>",
///     3,
/// );
///
/// assert_eq!(top[0].word, "rust");
/// assert_eq!(top[0].count, 4);
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn most_common_words(
    records: &[MessageRecord],
    selection: &Selection,
    stopwords: &StopWords,
    media_placeholder: &str,
    k: usize,
) -> Vec<WordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for word in tokens(records, selection, stopwords, media_placeholder) {
        match index.get(&word) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push(WordCount { word, count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(k);
    counts
}

/// Frequency of every non-stopword token.
///
/// This is the input a word-cloud renderer needs.
pub fn word_frequencies(
    records: &[MessageRecord],
    selection: &Selection,
    stopwords: &StopWords,
    media_placeholder: &str,
) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for word in tokens(records, selection, stopwords, media_placeholder) {
        *freq.entry(word).or_insert(0) += 1;
    }
    freq
}

fn tokens<'a>(
    records: &'a [MessageRecord],
    selection: &'a Selection,
    stopwords: &'a StopWords,
    media_placeholder: &'a str,
) -> impl Iterator<Item = String> + 'a {
    select(records, selection)
        .filter(move |r| !r.is_notification() && !r.is_media(media_placeholder))
        .flat_map(|r| {
            let cleaned: String = strip_links(&r.text)
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect();
            cleaned
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(move |w| w.chars().count() > 1 && !stopwords.contains(w))
}
