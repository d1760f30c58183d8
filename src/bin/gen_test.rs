//! Synthetic chat export generator for stress testing chatstat.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [style]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_test.txt dash
//!
//! Styles: `dash` (`15/01/24, 9:05 am - `), `bracket` (`[1/15/24, 9:05:12 AM] `),
//! `dotted` (`26.10.2025, 20:40 - `).

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Charlie",
    "Иван",
    "Мария",
    "村上",
    "+1 555 0100",
    "🔥FireUser🔥",
];

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤣", "😍", "🥰", "🤔", "🙄", "😱", "🤯", "💀", "👻", "🤖", "🦄", "🔥", "👍", "❤",
    "☕", "🎉", "🚀", "🙏",
];

const WORDS: &[&str] = &[
    "hello", "good", "great", "bad", "terrible", "meeting", "tomorrow", "lunch", "project",
    "happy", "sad", "awesome", "thanks", "weekend", "train", "late", "coffee", "deadline",
];

const NOTIFICATIONS: &[&str] = &[
    "Messages and calls are end-to-end encrypted. No one outside of this chat can read them.",
    "Alice added Bob",
    "Charlie left",
    "Bob changed the subject to \"Weekend plans\"",
    "Your security code with Мария changed.",
];

#[derive(Debug, Clone, Copy)]
enum Style {
    Dash,
    Bracket,
    Dotted,
}

impl Style {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "dash" | "android" => Some(Style::Dash),
            "bracket" | "ios" => Some(Style::Bracket),
            "dotted" => Some(Style::Dotted),
            _ => None,
        }
    }

    fn prefix(self, ts: NaiveDateTime) -> String {
        match self {
            Style::Dash => format!("{} - ", ts.format("%d/%m/%y, %-I:%M %P")),
            Style::Bracket => format!("[{}] ", ts.format("%-m/%-d/%y, %-I:%M:%S %p")),
            Style::Dotted => format!("{} - ", ts.format("%d.%m.%Y, %H:%M")),
        }
    }

    /// A stamp the grammar recognizes but no decode format accepts.
    fn bad_prefix(self) -> &'static str {
        match self {
            Style::Dash => "31/02/24, 9:99 pm - ",
            Style::Bracket => "[13/32/24, 10:00:00 AM] ",
            Style::Dotted => "31.02.2024, 25:99 - ",
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("heavy_test.txt", String::as_str);
    let style_name = args.get(3).map_or("dash", String::as_str);

    let Some(style) = Style::parse(style_name) else {
        eprintln!("Unknown style: {}. Use 'dash', 'bracket' or 'dotted'", style_name);
        std::process::exit(1);
    };

    println!("🧪 Chat Export Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Style:    {:?}", style);
    println!();

    generate(count, output, style)
}

fn generate(count: usize, output: &str, style: Style) -> io::Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = rand::thread_rng();

    let start = Instant::now();
    let mut bytes_written: usize = 0;
    let mut ts = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 5, 0))
        .unwrap_or_default();

    for i in 0..count {
        ts += Duration::seconds(rng.gen_range(5..7_200));

        let line = if i % 1000 == 999 {
            // undecodable date, dropped by the parser
            format!("{}Bob: this row is skipped\n", style.bad_prefix())
        } else if i % 50 == 0 {
            let notice = NOTIFICATIONS.choose(&mut rng).copied().unwrap_or_default();
            format!("{}{}\n", style.prefix(ts), notice)
        } else {
            let sender = SENDERS.choose(&mut rng).copied().unwrap_or("Alice");
            format!("{}{}: {}\n", style.prefix(ts), sender, generate_text(&mut rng, i))
        };

        bytes_written += line.len();
        writer.write_all(line.as_bytes())?;

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!("\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)", i + 1, count, mb, mps);
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!("   Speed: {:.0} msg/s", count as f64 / elapsed.as_secs_f64());
    Ok(())
}

fn generate_text(rng: &mut impl Rng, index: usize) -> String {
    match index % 12 {
        0..=4 => random_sentence(rng, 3..12),
        5 => "<Media omitted>".to_string(),
        6 => format!("look at this https://example.com/item/{} {}", index, random_sentence(rng, 1..4)),
        7 => {
            let emojis: String = (0..rng.gen_range(1..6))
                .filter_map(|_| EMOJIS.choose(rng).copied())
                .collect();
            format!("{} {}", random_sentence(rng, 1..5), emojis)
        }
        // continuation lines belong to the same message
        8 => format!(
            "{}\n{}\n{}",
            random_sentence(rng, 2..6),
            random_sentence(rng, 2..6),
            random_sentence(rng, 1..3)
        ),
        9 => format!("Привет! Как дела? #{}", index),
        10 => format!("time check: 10:30 - still here #{}", index),
        _ => random_sentence(rng, 1..3),
    }
}

fn random_sentence(rng: &mut impl Rng, len: std::ops::Range<usize>) -> String {
    let n = rng.gen_range(len);
    (0..n)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}
