//! Integration tests for the parser and analysis pipeline with real files

use chatlens::config::{AnalysisConfig, ParserConfig};
use chatlens::parsing::{HeaderPattern, TimestampTemplate};
use chatlens::prelude::*;
use chatlens::record::SYSTEM_SENDER;
use chrono::{NaiveDate, Timelike};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

fn fixtures_dir() -> &'static str {
    "tests/fixtures"
}

fn fixture(name: &str) -> PathBuf {
    Path::new(fixtures_dir()).join(name)
}

fn ensure_fixtures() {
    INIT.call_once(|| {
        let dir = fixtures_dir();
        if !Path::new(dir).exists() {
            fs::create_dir_all(dir).unwrap();
        }

        // Group chat, 12-hour with a regular space, day-first, 2-digit year
        let family = "\
Messages and calls are end-to-end encrypted. No one outside of this chat can read them.
12/1/23, 9:05 am - Alice created group \"Family\"
12/1/23, 9:06 am - Alice: Good morning everyone ☀️
12/1/23, 9:10 am - Bob: Morning! 😀
12/1/23, 9:11 am - Bob: <Media omitted>
13/1/23, 8:30 pm - Carol: Dinner at 8?
menu is at https://example.com/menu
13/1/23, 8:31 pm - Alice: Yes 😀😀
14/2/23, 11:59 pm - Bob left
";
        fs::write(format!("{dir}/family.txt"), family).unwrap();

        // Private chat, newer Android export with U+202F before am/pm
        let narrow = "\
3/4/24, 7:45\u{202F}am - Dana: Coffee?
3/4/24, 7:46\u{202F}am - Eli: Sure, 10 mins
3/4/24, 12:00\u{202F}pm - Dana: Lunch now
3/4/24, 12:30\u{202F}am - Eli: Night owl
";
        fs::write(format!("{dir}/narrow.txt"), narrow).unwrap();

        // 24-hour clock, 4-digit year
        let twenty_four = "\
15/01/2024, 22:15 - Alice: Late one
16/01/2024, 06:00 - Bob: Early one
16/01/2024, 13:30 - Alice: Lunch
";
        fs::write(format!("{dir}/twenty_four.txt"), twenty_four).unwrap();

        fs::write(format!("{dir}/not_a_chat.txt"), "Dear diary,\ntoday was fine.\n").unwrap();
    });
}

// ============================================================================
// End-to-end parsing
// ============================================================================

mod parsing_tests {
    use super::*;

    #[test]
    fn test_authored_line() {
        let records = TranscriptParser::new()
            .parse_str("12/1/23, 10:15 am - Alice: Hello there")
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sender(), "Alice");
        assert_eq!(records[0].body, "Hello there");
        assert_eq!(records[0].hour, 10);
        assert_eq!(records[0].time_of_day, TimeOfDay::Morning);
        assert_eq!(records[0].time_of_day.to_string(), "Morning");
    }

    #[test]
    fn test_system_line() {
        let line = "12/1/23, 10:15 am - Alice joined using this group's invite link";
        let records = TranscriptParser::new().parse_str(line).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sender(), SYSTEM_SENDER);
        assert_eq!(records[0].body, "Alice joined using this group's invite link");
    }

    #[test]
    fn test_no_headers_is_empty_not_a_crash() {
        let parser = TranscriptParser::new();
        let records = parser.parse_str("Dear diary,\ntoday was fine.\n").unwrap();
        assert!(records.is_empty());

        let err = parser.load("Dear diary,\ntoday was fine.\n").unwrap_err();
        assert!(err.is_unrecognized());
    }

    #[test]
    fn test_narrow_and_regular_space_converge() {
        let parser = TranscriptParser::new();
        let narrow = parser.parse_str("12/1/23, 10:15\u{202F}pm - Alice: Hi").unwrap();
        let spaced = parser.parse_str("12/1/23, 10:15 pm - Alice: Hi").unwrap();
        assert_eq!(narrow[0].timestamp, spaced[0].timestamp);

        let mixed = parser
            .parse_str("12/1/23, 10:15\u{202F}pm - Alice: Hi\n12/1/23, 10:15 pm - Bob: Hi\n")
            .unwrap();
        assert_eq!(mixed.len(), 2);
        assert_eq!(mixed[0].timestamp, mixed[1].timestamp);
        assert_eq!(mixed[0].timestamp, narrow[0].timestamp);
    }

    #[test]
    fn test_parse_family_file() {
        ensure_fixtures();
        let parser = TranscriptParser::new();
        let outcome = parser
            .parse_detailed(&fs::read_to_string(fixture("family.txt")).unwrap())
            .unwrap();

        assert_eq!(outcome.pattern, Some(HeaderPattern::SpacedMeridiem));
        assert_eq!(outcome.template, Some(TimestampTemplate::DayMonthShortYear12h));
        assert_eq!(outcome.headers, 7);
        assert_eq!(outcome.dropped, 0);

        let records = outcome.records;
        assert_eq!(records.len(), 7);
        assert!(records[0].is_system());
        assert_eq!(records[0].body, "Alice created group \"Family\"");
        assert!(records[3].is_media());
        assert_eq!(
            records[4].body,
            "Dinner at 8?\nmenu is at https://example.com/menu"
        );
        assert_eq!(records[4].hour, 20);
        assert_eq!(records[4].hour_bucket, "20-21");
        assert_eq!(records[6].date, NaiveDate::from_ymd_opt(2023, 2, 14).unwrap());
        assert_eq!(records[6].hour_bucket, "23-00");
        assert!(records[6].is_system());
    }

    #[test]
    fn test_parse_file_from_path() {
        ensure_fixtures();
        let records = TranscriptParser::new()
            .parse(&fixture("narrow.txt"))
            .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].timestamp.hour(), 7);
        // 12 pm is noon, 12 am is midnight
        assert_eq!(records[2].hour, 12);
        assert_eq!(records[3].hour, 0);
        assert_eq!(records[3].hour_bucket, "00-01");
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
    }

    #[test]
    fn test_parse_twenty_four_hour_file() {
        ensure_fixtures();
        let transcript = Transcript::from_file(&fixture("twenty_four.txt")).unwrap();

        assert_eq!(transcript.header_pattern(), HeaderPattern::TwentyFourHour);
        assert_eq!(transcript.template(), TimestampTemplate::DayMonthFullYear24h);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.records()[0].hour, 22);
        assert_eq!(transcript.records()[0].time_of_day, TimeOfDay::Night);
        assert_eq!(transcript.records()[1].time_of_day, TimeOfDay::Morning);
        assert_eq!(transcript.records()[2].time_of_day, TimeOfDay::Afternoon);
    }

    #[test]
    fn test_file_that_is_not_a_chat() {
        ensure_fixtures();
        let err = TranscriptParser::new()
            .load_file(&fixture("not_a_chat.txt"))
            .unwrap_err();
        assert!(err.is_unrecognized());
        assert!(err.to_string().contains("not_a_chat.txt"));
    }

    #[test]
    fn test_missing_file() {
        let err = TranscriptParser::new()
            .load_file(Path::new("tests/fixtures/does_not_exist.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_parse_is_deterministic() {
        ensure_fixtures();
        let text = fs::read_to_string(fixture("family.txt")).unwrap();
        let parser = TranscriptParser::new();
        assert_eq!(parser.parse_str(&text).unwrap(), parser.parse_str(&text).unwrap());
    }

    #[test]
    fn test_strict_parser_on_complete_file() {
        ensure_fixtures();
        let parser = TranscriptParser::with_config(ParserConfig::strict());
        assert_eq!(parser.parse(&fixture("family.txt")).unwrap().len(), 7);
    }
}

// ============================================================================
// Transcript and filters
// ============================================================================

mod transcript_tests {
    use super::*;

    fn family() -> Transcript {
        ensure_fixtures();
        Transcript::from_file(&fixture("family.txt")).unwrap()
    }

    #[test]
    fn test_members_exclude_system() {
        let transcript = family();
        assert_eq!(transcript.members(), ["Alice", "Bob", "Carol"]);
        assert!(transcript.has_member("Carol"));
        assert!(!transcript.has_member(SYSTEM_SENDER));
        assert_eq!(transcript.selection_options()[0], UserSelection::Overall);
        assert_eq!(transcript.selection_options().len(), 4);
    }

    #[test]
    fn test_select_member() {
        let transcript = family();
        let bob = transcript.select(&FilterConfig::new().with_sender("Bob"));
        assert_eq!(bob.len(), 2);
        assert!(bob.iter().all(|r| r.sender() == "Bob"));

        let everyone = transcript.select(&FilterConfig::new());
        assert_eq!(everyone.len(), transcript.len());
    }

    #[test]
    fn test_select_by_date() {
        let transcript = family();
        let january = FilterConfig::new()
            .with_date_from("2023-01-13")
            .unwrap()
            .with_date_to("2023-01-31")
            .unwrap();
        let view = transcript.select(&january);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.day == 13));
    }

    #[test]
    fn test_select_member_and_date() {
        let transcript = family();
        let filter = FilterConfig::new()
            .with_sender("Alice")
            .with_date_to("2023-01-12")
            .unwrap();
        let view = transcript.select(&filter);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].body, "Good morning everyone ☀️");
    }

    #[test]
    fn test_overall_string_selects_everyone() {
        let transcript = family();
        let selection: UserSelection = "Overall".parse().unwrap();
        let view = transcript.select(&FilterConfig::new().with_selection(selection));
        assert_eq!(view.len(), 7);
    }
}

// ============================================================================
// Aggregations over a real transcript
// ============================================================================

mod analysis_tests {
    use super::*;

    fn family() -> Transcript {
        ensure_fixtures();
        Transcript::from_file(&fixture("family.txt")).unwrap()
    }

    #[test]
    fn test_chat_stats() {
        let transcript = family();
        let view = transcript.select(&FilterConfig::new());
        let stats = ChatStats::collect(&view);

        assert_eq!(stats.messages, 7);
        assert_eq!(stats.media, 1);
        assert_eq!(stats.links, 1);
        // 4 + 4 + 2 + 2 + 7 + 2 + 2
        assert_eq!(stats.words, 23);
    }

    #[test]
    fn test_busiest_members() {
        let transcript = family();
        let view = transcript.select(&FilterConfig::new());
        let ranking = busiest_members(&view, 2);

        assert_eq!(ranking.top.len(), 2);
        // Ties keep first-seen order; the group creation line comes first
        assert_eq!(ranking.top[0], CountRow::new(SYSTEM_SENDER, 2));
        assert_eq!(ranking.top[1], CountRow::new("Alice", 2));
        let total: f64 = ranking.shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 0.05);
    }

    #[test]
    fn test_emojis_and_words() {
        let transcript = family();
        let view = transcript.select(&FilterConfig::new());

        let emojis = emoji_counts(&view);
        assert_eq!(emojis[0], CountRow::new("😀", 3));

        let stopwords = Stopwords::from_words(["at", "is"]);
        let words = most_common_words(&view, &stopwords, 3);
        assert!(words.iter().all(|w| w.label != "at" && w.label != "is"));
        assert!(words.iter().all(|w| w.label != "<media"));
    }

    #[test]
    fn test_timelines() {
        let transcript = family();
        let view = transcript.select(&FilterConfig::new());

        let monthly = monthly_timeline(&view);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].label, "January-2023");
        assert_eq!(monthly[0].count, 6);
        assert_eq!(monthly[1].label, "February-2023");

        let daily = daily_timeline(&view);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily.iter().map(|d| d.count).sum::<usize>(), 7);

        let weekdays = weekday_activity(&view);
        assert_eq!(weekdays[0], CountRow::new("Thursday", 4));

        let heatmap = activity_heatmap(&view);
        assert_eq!(heatmap.get("Thursday", "09-10"), Some(4));
        assert_eq!(heatmap.get("Friday", "20-21"), Some(2));
    }

    #[test]
    fn test_chat_info() {
        let transcript = family();
        let view = transcript.select(&FilterConfig::new());
        let info = ChatInfo::collect(&view).unwrap();

        assert_eq!(info.total_messages, 7);
        assert_eq!(info.members, 3);
        assert_eq!(info.first_date, NaiveDate::from_ymd_opt(2023, 1, 12).unwrap());
        assert_eq!(info.last_date, NaiveDate::from_ymd_opt(2023, 2, 14).unwrap());
        assert_eq!(info.total_days, 34);
        assert!(info.is_group);
    }

    #[test]
    fn test_analysis_config_defaults() {
        let config = AnalysisConfig::new();
        assert_eq!(config.top_words, 20);
        assert_eq!(config.top_members, 5);
    }
}

// ============================================================================
// Reports
// ============================================================================

mod report_tests {
    use super::*;
    use chatlens::report::{Report, ReportKind};

    fn build(kind: ReportKind, filter: &FilterConfig) -> Report {
        ensure_fixtures();
        let transcript = Transcript::from_file(&fixture("family.txt")).unwrap();
        Report::build(
            &transcript,
            filter,
            kind,
            &AnalysisConfig::new(),
            &Stopwords::empty(),
        )
    }

    #[test]
    fn test_all_report_json() {
        let report = build(ReportKind::All, &FilterConfig::new());
        let json = report.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["selection"], "Overall");
        assert_eq!(value["summary"]["messages"], 7);
        assert_eq!(value["members"]["top"][1]["label"], "Alice");
        assert_eq!(value["monthly"][0]["label"], "January-2023");
        assert!(value["heatmap"]["rows"].is_array());
    }

    #[test]
    fn test_member_report_has_no_ranking() {
        let report = build(ReportKind::All, &FilterConfig::new().with_sender("Bob"));
        assert_eq!(report.selection, "Bob");
        assert!(report.members.is_none());
        assert_eq!(report.summary.as_ref().unwrap().stats.messages, 2);
    }

    #[test]
    fn test_single_section_csv() {
        let report = build(ReportKind::Weekly, &FilterConfig::new());
        let csv = report.render(OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("label;count\n"));
        assert!(csv.contains("Thursday;4"));
        assert!(!csv.contains("# "));
    }

    #[test]
    fn test_text_report() {
        let report = build(ReportKind::Summary, &FilterConfig::new());
        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.starts_with("Analysis for: Overall"));
        assert!(text.contains("Media shared: 1"));
        assert!(text.contains("Links shared: 1"));
    }
}
