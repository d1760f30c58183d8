//! # chatstat CLI
//!
//! Command-line interface for the chatstat library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstat::analysis::{FilterConfig, Report, Selection, apply_filters, participants, select};
use chatstat::cli::Args;
use chatstat::config::Config;
use chatstat::format::{OutputFormat, to_format_string, write_to_format};
use chatstat::parser::LogParser;
use chatstat::{ChatstatError, MessageRecord};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        if e.is_no_timestamps() {
            eprintln!(
                "❌ Unrecognized export format: no chat timestamps found in {}",
                args.input.display()
            );
        } else {
            eprintln!("❌ Error: {}", e);
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), ChatstatError> {
    let total_start = Instant::now();

    let config = match args.config {
        Some(ref path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    let config = args.apply_to(config);
    tracing::debug!(?config, "loaded configuration");

    let file_format = args.format.file_format();
    // data on stdout must stay clean
    let chatty = file_format.is_none() || args.output.is_some();

    let mut filter_config = FilterConfig::new();
    if let Some(ref after) = args.after {
        filter_config = filter_config.with_date_from(after)?;
    }
    if let Some(ref before) = args.before {
        filter_config = filter_config.with_date_to(before)?;
    }
    let selection = Selection::from(args.user.clone());

    if chatty {
        println!("📊 chatstat v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:     {}", args.input.display());
        println!("👤 Selection: {}", selection);
        println!("📄 Format:    {}", args.format);
        if let Some(ref after) = args.after {
            println!("📅 After:     {}", after);
        }
        if let Some(ref before) = args.before {
            println!("📅 Before:    {}", before);
        }
        println!();
        println!("⏳ Parsing...");
    }

    let parser = LogParser::with_config(config.parser.clone())?;
    let parse_start = Instant::now();
    let parsed = parser.parse_file(&args.input)?;
    let skipped = parsed.skipped();

    if chatty {
        println!(
            "   Found {} messages ({:.2}s)",
            parsed.len(),
            parse_start.elapsed().as_secs_f64()
        );
        if skipped > 0 {
            println!("   ⚠️  Skipped {} lines with unreadable dates", skipped);
        }
    }

    let records = apply_filters(parsed.into_records(), &filter_config);
    if chatty && filter_config.is_active() {
        println!("🔍 {} messages in date range", records.len());
    }

    if let Selection::Sender(ref name) = selection {
        if !participants(&records).iter().any(|p| p == name) {
            tracing::warn!(user = %name, "no messages from this participant");
        }
    }

    let report = Report::build(&records, &selection, &config.analysis);

    match file_format {
        None => print_summary(&report),
        Some(format) => {
            let selected: Vec<MessageRecord> = if format.is_record_table() {
                select(&records, &selection).cloned().collect()
            } else {
                Vec::new()
            };
            emit(&selected, &report, format, args.output.as_deref())?;
        }
    }

    if chatty {
        println!();
        println!("⚡ Done in {:.2}s", total_start.elapsed().as_secs_f64());
    }
    Ok(())
}

fn emit(
    records: &[MessageRecord],
    report: &Report,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), ChatstatError> {
    match output {
        Some(path) => {
            println!("💾 Writing {}...", format);
            write_to_format(records, report, path, format)?;
            println!("✅ Output saved to {}", path.display());
        }
        None => print!("{}", to_format_string(records, report, format)?),
    }
    Ok(())
}

fn print_summary(report: &Report) {
    let stats = &report.stats;
    println!();
    println!("📈 Top Statistics:");
    println!("   Messages:  {}", stats.messages);
    println!("   Words:     {}", stats.words);
    println!("   Media:     {}", stats.media);
    println!("   Links:     {}", stats.links);

    if let Some(ref users) = report.busiest_users {
        if !users.is_empty() {
            println!();
            println!("👥 Most Busy Users:");
            for user in users {
                println!("   {:<20} {:>6}  ({:.2}%)", user.sender, user.count, user.percent);
            }
        }
    }

    if !report.monthly_timeline.is_empty() {
        println!();
        println!("🗓️  Monthly Timeline:");
        for point in &report.monthly_timeline {
            println!("   {:<20} {:>6}", point.label, point.count);
        }
    }

    println!();
    println!("📆 Weekly Activity:");
    for day in &report.week_activity {
        println!("   {:<20} {:>6}", day.day_name, day.count);
    }

    if let Some((hour, count)) = report
        .hourly_activity
        .iter()
        .enumerate()
        .filter(|(_, c)| **c > 0)
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
    {
        println!();
        println!("🕐 Busiest Hour: {:02}:00 ({} messages)", hour, count);
    }

    if !report.common_words.is_empty() {
        println!();
        println!("💬 Most Common Words:");
        for word in &report.common_words {
            println!("   {:<20} {:>6}", word.word, word.count);
        }
    }

    if !report.emojis.is_empty() {
        println!();
        println!("😀 Emojis:");
        let top: Vec<String> = report
            .emojis
            .iter()
            .take(10)
            .map(|e| format!("{} {}", e.emoji, e.count))
            .collect();
        println!("   {}", top.join("   "));
    }

    let sentiment = &report.sentiment;
    println!();
    println!(
        "🙂 Sentiment: {} positive, {} negative, {} neutral",
        sentiment.positive, sentiment.negative, sentiment.neutral
    );

    let responses = &report.response_times;
    if !responses.is_empty() {
        println!();
        println!(
            "⏱️  Average Response Time: {:.2} min over {} responses",
            responses.average_minutes,
            responses.responses.len()
        );
        for responder in &responses.by_responder {
            println!(
                "   {:<20} {:>8.2} min",
                responder.sender, responder.average_minutes
            );
        }
    }
}
