//! Synthetic WhatsApp export generator for stress testing chatlens.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [style]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_chat.txt mixed
//!
//! Styles: `24h`, `spaced` (12-hour, regular space), `narrow` (12-hour, U+202F),
//! `mixed` (12-hour, both spaces in one file).

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::Rng;
use rand::seq::SliceRandom;

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤣", "😍", "🥰", "🤔", "🙄", "😱", "🔥", "👍", "❤️", "💔", "🎉", "🙏", "👋",
    "🏳️‍🌈", "👨‍👩‍👧‍👦", "🤷‍♀️",
];

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "村上",
    "محمد",
    "+91 98765 43210",
    "🔥FireUser🔥",
    "Dr. Who",
];

const SYSTEM_EVENTS: &[&str] = &[
    "joined using this group's invite link",
    "left",
    "changed the subject to \"Weekend plans\"",
    "changed this group's icon",
];

#[derive(Debug, Clone, Copy)]
enum Style {
    TwentyFourHour,
    Spaced,
    Narrow,
    Mixed,
}

impl Style {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "24h" => Some(Style::TwentyFourHour),
            "spaced" => Some(Style::Spaced),
            "narrow" => Some(Style::Narrow),
            "mixed" => Some(Style::Mixed),
            _ => None,
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_chat.txt");
    let style_name = args.get(3).map(|s| s.as_str()).unwrap_or("mixed");

    let Some(style) = Style::parse(style_name) else {
        eprintln!("Unknown style: {style_name}. Use 24h, spaced, narrow or mixed");
        std::process::exit(1);
    };

    println!("Transcript generator");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Style:    {:?}", style);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);

    let mut rng = rand::thread_rng();
    let start = Instant::now();
    let mut bytes_written: usize = 0;
    let mut clock = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default();

    // A few lines before the first header, as real exports have
    let preamble = "Messages and calls are end-to-end encrypted.\n";
    writer.write_all(preamble.as_bytes())?;
    bytes_written += preamble.len();

    for i in 0..count {
        clock += Duration::minutes(rng.gen_range(0..=240));

        let header = header(clock, style, &mut rng);
        let line = if i % 25 == 7 {
            let who = SENDERS.choose(&mut rng).copied().unwrap_or("Alice");
            let event = SYSTEM_EVENTS.choose(&mut rng).copied().unwrap_or("left");
            format!("{header}{who} {event}\n")
        } else {
            let sender = SENDERS.choose(&mut rng).copied().unwrap_or("Alice");
            format!("{header}{sender}: {}\n", body(&mut rng, i))
        };

        writer.write_all(line.as_bytes())?;
        bytes_written += line.len();

        if i % 1000 == 500 {
            let garbage = garbage_line(&mut rng);
            writer.write_all(garbage.as_bytes())?;
            bytes_written += garbage.len();
        }

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    println!("\n\nDone!");
    println!("   Size: {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

fn header(ts: NaiveDateTime, style: Style, rng: &mut impl Rng) -> String {
    let space = match style {
        Style::TwentyFourHour => {
            return format!("{} - ", ts.format("%-d/%-m/%Y, %H:%M"));
        }
        Style::Spaced => ' ',
        Style::Narrow => '\u{202F}',
        Style::Mixed => {
            if rng.gen_bool(0.5) {
                ' '
            } else {
                '\u{202F}'
            }
        }
    };
    let meridiem = if ts.hour() < 12 { "am" } else { "pm" };
    format!(
        "{}{}{} - ",
        ts.format("%-d/%-m/%y, %-I:%M"),
        space,
        meridiem
    )
}

fn body(rng: &mut impl Rng, index: usize) -> String {
    match index % 16 {
        0..=5 => format!("Normal message #{} with some text", index),
        6 => "<Media omitted>".to_string(),
        7 => format!("check this out https://example.com/item/{}", index),
        8 => format!("Multi-line message #{}\nsecond line\nthird line", index),
        9 => {
            let emojis: String = (0..rng.gen_range(1..20))
                .filter_map(|_| EMOJIS.choose(rng).copied())
                .collect();
            format!("Emoji spam: {}", emojis)
        }
        10 => format!("Note: colons: everywhere: #{}", index),
        11 => format!("Кириллица: Привет мир! #{}", index),
        12 => format!("日本語 こんにちは #{}", index),
        13 => {
            let padding: String = "lorem ipsum ".repeat(rng.gen_range(100..2000));
            format!("Long message #{}: {}", index, padding)
        }
        14 => String::new(),
        _ => format!("Fallback message #{}", index),
    }
}

fn garbage_line(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..5) {
        0 => "This line has no timestamp or sender format\n".to_string(),
        1 => "99/99/9999, 99:99 - Nobody: impossible date\n".to_string(),
        2 => "-------------------------------------------\n".to_string(),
        3 => "\n".to_string(),
        _ => "[1/15/24, 10:30:45 AM] Bracketed: iOS style line\n".to_string(),
    }
}
