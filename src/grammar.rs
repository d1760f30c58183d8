//! Timestamp grammars for chat exports.
//!
//! An export line starts with a timestamp whose textual shape depends on the
//! platform and the exporting device's locale. Each shape is described by a
//! [`TimestampGrammar`]: a regular expression that recognizes the line prefix
//! and an ordered list of `chrono` formats used to decode the captured
//! date-time text.
//!
//! Grammars are plain data. Supporting a new export locale means adding a
//! descriptor, either to [`TimestampGrammar::builtin`] or at runtime through
//! [`ParserConfig`](crate::config::ParserConfig).
//!
//! Built-in grammars, in priority order:
//!
//! | Name | Example prefix |
//! |------|----------------|
//! | `dash-meridiem` | `15/01/24, 5:30 pm - ` |
//! | `bracket-meridiem` | `[1/15/24, 10:30:45 AM] ` |
//! | `dash-24h` | `15/01/2024, 17:30 - ` |
//! | `bracket-24h` | `[15.01.24, 10:30:45] ` |
//! | `dash-dotted-24h` | `26.10.2025, 20:40 - ` |

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ChatstatError, Result};

/// Name of the capture group that holds the date-time text.
pub const STAMP_GROUP: &str = "stamp";

/// Declarative description of one export timestamp format.
///
/// `pattern` must match the whole delimiter that precedes a message body and
/// must contain a named group `stamp` around the date-time text. Everything
/// the pattern matches outside that group (brackets, ` - `) is discarded.
///
/// # Example
///
/// ```
/// use chatstat::grammar::TimestampGrammar;
///
/// let grammar = TimestampGrammar::new(
///     "iso-dash",
///     r"(?m)^(?P<stamp>\d{4}-\d{2}-\d{2} \d{2}:\d{2}) - ",
///     ["%Y-%m-%d %H:%M"],
/// );
/// assert_eq!(grammar.name, "iso-dash");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampGrammar {
    /// Short identifier used in logs and errors.
    pub name: String,

    /// Regular expression recognizing the line prefix.
    pub pattern: String,

    /// `chrono` format strings, tried in order per record.
    pub decode_formats: Vec<String>,
}

impl TimestampGrammar {
    /// Creates a grammar descriptor.
    pub fn new<I, S>(name: impl Into<String>, pattern: impl Into<String>, decode_formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            decode_formats: decode_formats.into_iter().map(Into::into).collect(),
        }
    }

    /// `15/01/24, 5:30 pm - Alice: Hi` (Android, 12-hour clock).
    ///
    /// Day-first is tried before month-first; a two-digit year is tried
    /// before a four-digit one.
    pub fn dash_meridiem() -> Self {
        Self::new(
            "dash-meridiem",
            r"(?m)^[\x{200E}\x{200F}]*(?P<stamp>\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}[\s\x{202F}]?[AaPp][Mm])\s-\s",
            [
                "%d/%m/%y, %I:%M %p",
                "%d/%m/%y, %H:%M",
                "%m/%d/%y, %I:%M %p",
                "%d/%m/%Y, %I:%M %p",
                "%m/%d/%Y, %I:%M %p",
            ],
        )
    }

    /// `[1/15/24, 10:30:45 AM] Alice: Hi` (iOS, 12-hour clock).
    ///
    /// Same day-first order as [`dash_meridiem`](Self::dash_meridiem), with
    /// seconds tried before no seconds.
    pub fn bracket_meridiem() -> Self {
        Self::new(
            "bracket-meridiem",
            r"(?m)^[\x{200E}\x{200F}]*\[(?P<stamp>\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}(?::\d{2})?[\s\x{202F}]?[AaPp][Mm])\]\s",
            [
                "%d/%m/%y, %I:%M:%S %p",
                "%d/%m/%y, %I:%M %p",
                "%m/%d/%y, %I:%M:%S %p",
                "%m/%d/%y, %I:%M %p",
                "%d/%m/%Y, %I:%M:%S %p",
                "%d/%m/%Y, %I:%M %p",
                "%m/%d/%Y, %I:%M:%S %p",
                "%m/%d/%Y, %I:%M %p",
            ],
        )
    }

    /// `15/01/2024, 17:30 - Alice: Hi` (Android, 24-hour clock).
    pub fn dash_24h() -> Self {
        Self::new(
            "dash-24h",
            r"(?m)^[\x{200E}\x{200F}]*(?P<stamp>\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2})\s-\s",
            ["%d/%m/%y, %H:%M", "%d/%m/%Y, %H:%M", "%m/%d/%y, %H:%M", "%m/%d/%Y, %H:%M"],
        )
    }

    /// `[15.01.24, 10:30:45] Alice: Hi` (iOS, 24-hour clock, dots or slashes).
    pub fn bracket_24h() -> Self {
        Self::new(
            "bracket-24h",
            r"(?m)^[\x{200E}\x{200F}]*\[(?P<stamp>\d{1,2}[./]\d{1,2}[./]\d{2,4},\s\d{1,2}:\d{2}(?::\d{2})?)\]\s",
            [
                "%d.%m.%y, %H:%M:%S",
                "%d.%m.%y, %H:%M",
                "%d.%m.%Y, %H:%M:%S",
                "%d.%m.%Y, %H:%M",
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
            ],
        )
    }

    /// `26.10.2025, 20:40 - Alice: Hi` (Android, dotted date).
    pub fn dash_dotted_24h() -> Self {
        Self::new(
            "dash-dotted-24h",
            r"(?m)^[\x{200E}\x{200F}]*(?P<stamp>\d{1,2}\.\d{1,2}\.\d{2,4},\s\d{1,2}:\d{2})\s-\s",
            ["%d.%m.%y, %H:%M", "%d.%m.%Y, %H:%M"],
        )
    }

    /// Returns the built-in grammars in priority order.
    ///
    /// Meridiem grammars come first: the marker disambiguates a 12-hour
    /// clock and is preferred whenever it is present.
    pub fn builtin() -> Vec<TimestampGrammar> {
        vec![
            Self::dash_meridiem(),
            Self::bracket_meridiem(),
            Self::dash_24h(),
            Self::bracket_24h(),
            Self::dash_dotted_24h(),
        ]
    }
}

/// A grammar with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledGrammar {
    grammar: TimestampGrammar,
    regex: Regex,
}

impl CompiledGrammar {
    /// Compiles and validates a grammar.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidGrammar`] if the pattern does not
    /// compile, lacks a `stamp` group, or no decode format is given.
    pub fn compile(grammar: TimestampGrammar) -> Result<Self> {
        if grammar.decode_formats.is_empty() {
            return Err(ChatstatError::invalid_grammar(
                grammar.name,
                "at least one decode format is required",
            ));
        }

        let regex = Regex::new(&grammar.pattern)
            .map_err(|e| ChatstatError::invalid_grammar(grammar.name.clone(), e.to_string()))?;

        if !regex.capture_names().flatten().any(|n| n == STAMP_GROUP) {
            return Err(ChatstatError::invalid_grammar(
                grammar.name,
                format!("pattern has no `(?P<{STAMP_GROUP}>...)` group"),
            ));
        }

        Ok(Self { grammar, regex })
    }

    /// Returns the grammar name.
    pub fn name(&self) -> &str {
        &self.grammar.name
    }

    /// Returns the underlying descriptor.
    pub fn grammar(&self) -> &TimestampGrammar {
        &self.grammar
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns `true` if the grammar recognizes at least one line in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Decodes a captured stamp, trying each format in order.
    ///
    /// The stamp is normalized first (see [`normalize_stamp`]). Returns
    /// `None` if no format accepts it.
    pub fn decode(&self, stamp: &str) -> Option<NaiveDateTime> {
        let normalized = normalize_stamp(stamp);
        self.grammar
            .decode_formats
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
    }
}

static BUILTIN: LazyLock<Vec<CompiledGrammar>> = LazyLock::new(|| {
    TimestampGrammar::builtin()
        .into_iter()
        .map(|g| CompiledGrammar::compile(g).expect("built-in grammar must compile"))
        .collect()
});

/// Returns the compiled built-in grammars in priority order.
pub fn builtin_grammars() -> &'static [CompiledGrammar] {
    &BUILTIN
}

/// Normalizes a captured date-time string for decoding.
///
/// - narrow no-break, no-break, figure and thin spaces become ASCII spaces
/// - runs of whitespace collapse to a single space
/// - surrounding brackets and trailing separator remnants are stripped
/// - a meridiem marker glued to the minutes gets a separating space
///
/// ```
/// use chatstat::grammar::normalize_stamp;
///
/// assert_eq!(normalize_stamp("15/01/24, 5:30\u{202f}pm"), "15/01/24, 5:30 pm");
/// assert_eq!(normalize_stamp("15/01/24, 5:30pm -"), "15/01/24, 5:30 pm");
/// assert_eq!(normalize_stamp("[15.01.24, 10:30:45]"), "15.01.24, 10:30:45");
/// ```
pub fn normalize_stamp(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| match c {
            '\u{202F}' | '\u{00A0}' | '\u{2007}' | '\u{2009}' => ' ',
            c => c,
        })
        .collect();

    let mut out = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

    let start = out.len()
        - out
            .trim_start_matches(['[', '\u{200E}', '\u{200F}'])
            .len();
    out.drain(..start);
    let kept = out.trim_end_matches([']', '-', ':', ' ']).len();
    out.truncate(kept);

    if let Some(split) = glued_meridiem_at(&out) {
        out.insert(split, ' ');
    }

    out
}

/// Byte offset of a meridiem marker directly following a digit.
fn glued_meridiem_at(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 {
        return None;
    }
    let n = bytes.len();
    let marker = (bytes[n - 2] | 32, bytes[n - 1] | 32);
    let is_marker = matches!(marker, (b'a' | b'p', b'm'));
    (is_marker && bytes[n - 3].is_ascii_digit()).then_some(n - 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn compiled(g: TimestampGrammar) -> CompiledGrammar {
        CompiledGrammar::compile(g).unwrap()
    }

    #[test]
    fn test_builtin_grammars_compile() {
        let names: Vec<&str> = builtin_grammars().iter().map(CompiledGrammar::name).collect();
        assert_eq!(
            names,
            [
                "dash-meridiem",
                "bracket-meridiem",
                "dash-24h",
                "bracket-24h",
                "dash-dotted-24h"
            ]
        );
    }

    #[test]
    fn test_dash_meridiem_matches() {
        let g = compiled(TimestampGrammar::dash_meridiem());
        assert!(g.matches("15/01/24, 5:30 pm - Alice: Hi"));
        assert!(g.matches("15/01/24, 5:30\u{202f}pm - Alice: Hi"));
        assert!(g.matches("15/01/24, 5:30pm - Alice: Hi"));
        assert!(g.matches("15/01/24, 5:30 PM - Alice: Hi"));
        assert!(!g.matches("15/01/24, 17:30 - Alice: Hi"));
    }

    #[test]
    fn test_dash_24h_rejects_meridiem_lines() {
        let g = compiled(TimestampGrammar::dash_24h());
        assert!(g.matches("15/01/2024, 17:30 - Alice: Hi"));
        assert!(!g.matches("15/01/24, 5:30 pm - Alice: Hi"));
    }

    #[test]
    fn test_grammar_is_line_anchored() {
        let g = compiled(TimestampGrammar::dash_24h());
        assert!(!g.matches("see you 15/01/2024, 17:30 - ok"));
        assert!(g.matches("header\n15/01/2024, 17:30 - Alice: Hi"));
    }

    #[test]
    fn test_bracket_grammars_match() {
        assert!(compiled(TimestampGrammar::bracket_meridiem()).matches("[1/15/24, 10:30:45 AM] Alice: Hi"));
        assert!(compiled(TimestampGrammar::bracket_24h()).matches("[15.01.24, 10:30:45] Alice: Hi"));
        assert!(compiled(TimestampGrammar::bracket_24h()).matches("[15/01/2024, 10:30] Alice: Hi"));
        assert!(compiled(TimestampGrammar::dash_dotted_24h()).matches("26.10.2025, 20:40 - Alice: Hi"));
    }

    #[test]
    fn test_leading_direction_mark_allowed() {
        let g = compiled(TimestampGrammar::bracket_meridiem());
        assert!(g.matches("\u{200E}[1/15/24, 10:30:45 AM] Alice: <attached: photo.jpg>"));
    }

    #[test]
    fn test_decode_day_first_preferred() {
        let g = compiled(TimestampGrammar::dash_meridiem());
        assert_eq!(g.decode("05/06/24, 5:30 pm"), Some(dt(2024, 6, 5, 17, 30)));
    }

    #[test]
    fn test_decode_falls_back_to_month_first() {
        let g = compiled(TimestampGrammar::dash_meridiem());
        assert_eq!(g.decode("01/13/24, 9:05 am"), Some(dt(2024, 1, 13, 9, 5)));
    }

    #[test]
    fn test_decode_falls_back_to_four_digit_year() {
        let g = compiled(TimestampGrammar::dash_meridiem());
        assert_eq!(g.decode("15/01/2024, 12:00 am"), Some(dt(2024, 1, 15, 0, 0)));
    }

    #[test]
    fn test_decode_narrow_space_and_glued_marker() {
        let g = compiled(TimestampGrammar::dash_meridiem());
        assert_eq!(g.decode("15/01/24, 5:30\u{202f}pm"), Some(dt(2024, 1, 15, 17, 30)));
        assert_eq!(g.decode("15/01/24, 5:30pm"), Some(dt(2024, 1, 15, 17, 30)));
        assert_eq!(g.decode("15/01/24, 5:30 PM"), Some(dt(2024, 1, 15, 17, 30)));
    }

    #[test]
    fn test_decode_invalid_month_is_none() {
        let g = compiled(TimestampGrammar::dash_meridiem());
        assert_eq!(g.decode("15/13/24, 5:30 pm"), None);
    }

    #[test]
    fn test_decode_24h_variants() {
        let g = compiled(TimestampGrammar::dash_24h());
        assert_eq!(g.decode("15/01/24, 17:30"), Some(dt(2024, 1, 15, 17, 30)));
        assert_eq!(g.decode("15/01/2024, 7:05"), Some(dt(2024, 1, 15, 7, 5)));

        let g = compiled(TimestampGrammar::bracket_24h());
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 45)
            .unwrap();
        assert_eq!(g.decode("15.01.24, 10:30:45"), Some(expected));

        let g = compiled(TimestampGrammar::dash_dotted_24h());
        assert_eq!(g.decode("26.10.2025, 20:40"), Some(dt(2025, 10, 26, 20, 40)));
    }

    #[test]
    fn test_decode_bracket_meridiem_month_first() {
        let g = compiled(TimestampGrammar::bracket_meridiem());
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 45)
            .unwrap();
        assert_eq!(g.decode("1/15/24, 10:30:45 AM"), Some(expected));
    }

    #[test]
    fn test_decode_ambiguous_date_same_across_grammars() {
        let bracket = compiled(TimestampGrammar::bracket_meridiem());
        let dash = compiled(TimestampGrammar::dash_meridiem());

        let june_5 = NaiveDate::from_ymd_opt(2024, 6, 5)
            .unwrap()
            .and_hms_opt(10, 30, 45)
            .unwrap();
        assert_eq!(bracket.decode("[05/06/24, 10:30:45 AM]"), Some(june_5));
        assert_eq!(bracket.decode("05/06/24, 10:30 AM"), Some(dt(2024, 6, 5, 10, 30)));
        assert_eq!(dash.decode("05/06/24, 10:30 am"), Some(dt(2024, 6, 5, 10, 30)));
    }

    #[test]
    fn test_normalize_stamp() {
        assert_eq!(normalize_stamp("15/01/24, 5:30\u{202f}pm"), "15/01/24, 5:30 pm");
        assert_eq!(normalize_stamp("15/01/24,\u{00a0}5:30 pm - "), "15/01/24, 5:30 pm");
        assert_eq!(normalize_stamp("  15/01/24, 17:30 - "), "15/01/24, 17:30");
        assert_eq!(normalize_stamp("[15.01.24, 10:30:45]"), "15.01.24, 10:30:45");
        assert_eq!(normalize_stamp("15/01/24, 5:30AM"), "15/01/24, 5:30 AM");
    }

    #[test]
    fn test_compile_rejects_missing_stamp_group() {
        let g = TimestampGrammar::new("bad", r"(?m)^\d+ - ", ["%H"]);
        let err = CompiledGrammar::compile(g).unwrap_err();
        assert!(matches!(err, ChatstatError::InvalidGrammar { .. }));
    }

    #[test]
    fn test_compile_rejects_bad_regex() {
        let g = TimestampGrammar::new("bad", r"(?P<stamp>[", ["%H"]);
        assert!(CompiledGrammar::compile(g).is_err());
    }

    #[test]
    fn test_compile_rejects_empty_formats() {
        let g = TimestampGrammar::new("bad", r"(?P<stamp>\d+)", Vec::<String>::new());
        assert!(CompiledGrammar::compile(g).is_err());
    }

    #[test]
    fn test_custom_grammar_decodes() {
        let g = compiled(TimestampGrammar::new(
            "iso-dash",
            r"(?m)^(?P<stamp>\d{4}-\d{2}-\d{2} \d{2}:\d{2}) - ",
            ["%Y-%m-%d %H:%M"],
        ));
        assert!(g.matches("2024-01-15 10:30 - Alice: Hi"));
        assert_eq!(g.decode("2024-01-15 10:30"), Some(dt(2024, 1, 15, 10, 30)));
    }
}
