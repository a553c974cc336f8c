//! Assembled analysis reports and their rendering.
//!
//! A [`Report`] bundles the aggregations a user asked for, computed over one
//! member selection and date range, and renders them as text, CSV or JSON.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::{FilterConfig, Stopwords};
//! use chatlens::format::OutputFormat;
//! use chatlens::parser::Transcript;
//! use chatlens::report::{Report, ReportKind};
//!
//! # fn main() -> chatlens::Result<()> {
//! let transcript = Transcript::parse("1/1/2024, 10:00 - Alice: hi hi\n1/1/2024, 10:01 - Bob: hi\n")?;
//! let report = Report::build(
//!     &transcript,
//!     &FilterConfig::new(),
//!     ReportKind::Words,
//!     &AnalysisConfig::new(),
//!     &Stopwords::empty(),
//! );
//! assert_eq!(report.render(OutputFormat::Csv)?, "label;count\nhi;3\n");
//! # Ok(())
//! # }
//! ```

use std::fmt::{self, Write as _};

use chrono::TimeDelta;
use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::core::output::{heatmap_to_csv, to_csv, to_json};
use crate::core::{
    ActivityHeatmap, ChatInfo, ChatStats, CountRow, DailyPoint, FilterConfig, LengthStats,
    MemberRanking, MonthlyPoint, Stopwords, activity_heatmap, average_gap, busiest_members,
    daily_timeline, emoji_counts, month_activity, monthly_timeline, most_active_hour,
    most_common_words, weekday_activity,
};
use crate::error::Result;
use crate::format::OutputFormat;
use crate::parser::Transcript;

/// Which part of the analysis to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportKind {
    /// Headline counts, chat info, message lengths and timing
    #[default]
    Summary,
    /// Busiest members and everyone's share (overall selection only)
    Members,
    /// Most common words
    Words,
    /// Emoji frequency
    Emojis,
    /// Messages per month
    Monthly,
    /// Messages per day
    Daily,
    /// Messages per weekday
    Weekly,
    /// Messages per month name
    Months,
    /// Weekday × hour-bucket grid
    Heatmap,
    /// Everything above
    All,
}

impl ReportKind {
    fn includes(self, other: ReportKind) -> bool {
        self == ReportKind::All || self == other
    }
}

/// Headline numbers for the selected records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub stats: ChatStats,
    pub info: Option<ChatInfo>,
    pub lengths: Option<LengthStats>,
    /// Mean gap between authored messages, in whole seconds.
    pub average_gap_secs: Option<i64>,
    pub most_active_hour: Option<u32>,
}

/// The requested sections of one analysis.
///
/// Sections that were not requested, or do not apply to the selection, are
/// `None` and left out of every rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// `Overall` or a member name.
    pub selection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<MemberRanking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<CountRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emojis: Option<Vec<CountRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Vec<MonthlyPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<Vec<DailyPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<Vec<CountRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<Vec<CountRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<ActivityHeatmap>,
}

impl Report {
    /// Computes the sections `kind` asks for over the filtered view.
    pub fn build(
        transcript: &Transcript,
        filter: &FilterConfig,
        kind: ReportKind,
        config: &AnalysisConfig,
        stopwords: &Stopwords,
    ) -> Self {
        let view = transcript.select(filter);
        debug!(records = view.len(), selection = %filter.selection, ?kind, "building report");

        let mut report = Report {
            selection: filter.selection.to_string(),
            ..Report::default()
        };

        if kind.includes(ReportKind::Summary) {
            report.summary = Some(Summary {
                stats: ChatStats::collect(&view),
                info: ChatInfo::collect(&view),
                lengths: LengthStats::collect(&view),
                average_gap_secs: average_gap(&view).map(|gap| gap.num_seconds()),
                most_active_hour: most_active_hour(&view).map(|(hour, _)| hour),
            });
        }
        // Ranking one member against themselves says nothing
        if kind.includes(ReportKind::Members) && !filter.has_user_filter() {
            report.members = Some(busiest_members(&view, config.top_members));
        }
        if kind.includes(ReportKind::Words) {
            report.words = Some(most_common_words(&view, stopwords, config.top_words));
        }
        if kind.includes(ReportKind::Emojis) {
            report.emojis = Some(emoji_counts(&view));
        }
        if kind.includes(ReportKind::Monthly) {
            report.monthly = Some(monthly_timeline(&view));
        }
        if kind.includes(ReportKind::Daily) {
            report.daily = Some(daily_timeline(&view));
        }
        if kind.includes(ReportKind::Weekly) {
            report.weekly = Some(weekday_activity(&view));
        }
        if kind.includes(ReportKind::Months) {
            report.months = Some(month_activity(&view));
        }
        if kind.includes(ReportKind::Heatmap) {
            report.heatmap = Some(activity_heatmap(&view));
        }

        report
    }

    /// Renders the report in `format`.
    ///
    /// CSV output holds one table per section. With more than one section,
    /// each table is preceded by a `# name` line and followed by a blank line.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => to_json(self),
            OutputFormat::Csv => self.render_csv(),
        }
    }

    fn render_csv(&self) -> Result<String> {
        let mut sections: Vec<(&str, String)> = Vec::new();

        if let Some(summary) = &self.summary {
            sections.push(("summary", to_csv(&summary_rows(summary))?));
        }
        if let Some(members) = &self.members {
            sections.push(("members", to_csv(&members.top)?));
            sections.push(("shares", to_csv(&members.shares)?));
        }
        let tables = [
            ("words", &self.words),
            ("emojis", &self.emojis),
            ("weekly", &self.weekly),
            ("months", &self.months),
        ];
        for (name, rows) in tables {
            if let Some(rows) = rows {
                sections.push((name, to_csv(rows)?));
            }
        }
        if let Some(monthly) = &self.monthly {
            sections.push(("monthly", to_csv(monthly)?));
        }
        if let Some(daily) = &self.daily {
            sections.push(("daily", to_csv(daily)?));
        }
        if let Some(heatmap) = &self.heatmap {
            sections.push(("heatmap", heatmap_to_csv(heatmap)?));
        }

        if let [(_, only)] = sections.as_slice() {
            return Ok(only.clone());
        }

        let mut out = String::new();
        for (name, table) in sections {
            out.push_str(&format!("# {name}\n{table}\n"));
        }
        Ok(out)
    }
}

#[derive(Serialize)]
struct KeyValue {
    key: &'static str,
    value: String,
}

fn summary_rows(summary: &Summary) -> Vec<KeyValue> {
    let kv = |key, value: String| KeyValue { key, value };
    let mut rows = vec![
        kv("messages", summary.stats.messages.to_string()),
        kv("words", summary.stats.words.to_string()),
        kv("media", summary.stats.media.to_string()),
        kv("links", summary.stats.links.to_string()),
    ];
    if let Some(info) = &summary.info {
        rows.push(kv("members", info.members.to_string()));
        rows.push(kv("date_range", info.date_range()));
        rows.push(kv("total_days", info.total_days.to_string()));
        rows.push(kv("is_group", info.is_group.to_string()));
    }
    if let Some(lengths) = &summary.lengths {
        rows.push(kv("mean_length", format!("{:.2}", lengths.mean)));
        rows.push(kv("max_length", lengths.max.to_string()));
        rows.push(kv("min_length", lengths.min.to_string()));
    }
    if let Some(secs) = summary.average_gap_secs {
        rows.push(kv("average_gap_secs", secs.to_string()));
    }
    if let Some(hour) = summary.most_active_hour {
        rows.push(kv("most_active_hour", hour.to_string()));
    }
    rows
}

/// `1h 05m 30s`, `4m 02s`, `12s`.
fn human_duration(secs: i64) -> String {
    let gap = TimeDelta::seconds(secs);
    let (h, m, s) = (gap.num_hours(), gap.num_minutes() % 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, title: &str, rows: &[CountRow]) -> fmt::Result {
    writeln!(f, "{title}")?;
    if rows.is_empty() {
        return writeln!(f, "  (none)");
    }
    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for row in rows {
        writeln!(f, "  {:<width$}  {}", row.label, row.count)?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis for: {}", self.selection)?;

        if let Some(summary) = &self.summary {
            writeln!(f)?;
            writeln!(f, "Summary")?;
            writeln!(f, "  Messages:     {}", summary.stats.messages)?;
            writeln!(f, "  Words:        {}", summary.stats.words)?;
            writeln!(f, "  Media shared: {}", summary.stats.media)?;
            writeln!(f, "  Links shared: {}", summary.stats.links)?;
            if let Some(info) = &summary.info {
                writeln!(f, "  Members:      {}", info.members)?;
                writeln!(f, "  Date range:   {} ({} days)", info.date_range(), info.total_days)?;
                writeln!(f, "  Chat type:    {}", if info.is_group { "group" } else { "private" })?;
            }
            if let Some(lengths) = &summary.lengths {
                writeln!(
                    f,
                    "  Length:       avg {:.1}, max {}, min {} chars",
                    lengths.mean, lengths.max, lengths.min
                )?;
            }
            if let Some(secs) = summary.average_gap_secs {
                writeln!(f, "  Average gap:  {}", human_duration(secs))?;
            }
            if let Some(hour) = summary.most_active_hour {
                writeln!(f, "  Busiest hour: {}", crate::record::hour_bucket(hour))?;
            }
        }

        if let Some(members) = &self.members {
            writeln!(f)?;
            write_counts(f, "Most active members", &members.top)?;
            writeln!(f, "Share of messages")?;
            for share in &members.shares {
                writeln!(f, "  {:>6.2}%  {}", share.percent, share.name)?;
            }
        }

        let tables = [
            ("Most common words", &self.words),
            ("Emojis", &self.emojis),
            ("Weekday activity", &self.weekly),
            ("Month activity", &self.months),
        ];
        for (title, rows) in tables {
            if let Some(rows) = rows {
                writeln!(f)?;
                write_counts(f, title, rows)?;
            }
        }

        if let Some(monthly) = &self.monthly {
            writeln!(f)?;
            writeln!(f, "Monthly timeline")?;
            for point in monthly {
                writeln!(f, "  {:<16}  {}", point.label, point.count)?;
            }
        }

        if let Some(daily) = &self.daily {
            writeln!(f)?;
            writeln!(f, "Daily timeline")?;
            for point in daily {
                writeln!(f, "  {}  {}", point.date.format("%Y-%m-%d"), point.count)?;
            }
        }

        if let Some(heatmap) = &self.heatmap {
            writeln!(f)?;
            writeln!(f, "Activity heatmap")?;
            if heatmap.is_empty() {
                writeln!(f, "  (none)")?;
            } else {
                let mut header = format!("  {:<9}", "");
                for column in &heatmap.columns {
                    let _ = write!(header, " {column:>5}");
                }
                writeln!(f, "{header}")?;
                for (day, cells) in heatmap.rows.iter().zip(&heatmap.cells) {
                    write!(f, "  {day:<9}")?;
                    for cell in cells {
                        write!(f, " {cell:>5}")?;
                    }
                    writeln!(f)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserSelection;

    const CHAT: &str = "\
1/3/2024, 09:00 - Alice: hello world 😀
1/3/2024, 09:05 - Bob: hello
1/3/2024, 09:10 - Alice: <Media omitted>
2/3/2024, 21:30 - Bob left
";

    fn build(kind: ReportKind, filter: &FilterConfig) -> Report {
        let transcript = Transcript::parse(CHAT).unwrap();
        Report::build(
            &transcript,
            filter,
            kind,
            &AnalysisConfig::new(),
            &Stopwords::empty(),
        )
    }

    #[test]
    fn test_build_single_section() {
        let report = build(ReportKind::Words, &FilterConfig::new());
        assert_eq!(report.selection, "Overall");
        assert!(report.words.is_some());
        assert!(report.summary.is_none());
        assert!(report.heatmap.is_none());
    }

    #[test]
    fn test_build_all_sections() {
        let report = build(ReportKind::All, &FilterConfig::new());
        assert!(report.summary.is_some());
        assert!(report.members.is_some());
        assert!(report.emojis.is_some());
        assert!(report.monthly.is_some());
        assert!(report.daily.is_some());
        assert!(report.weekly.is_some());
        assert!(report.months.is_some());
        assert!(report.heatmap.is_some());
    }

    #[test]
    fn test_members_only_for_overall() {
        let filter = FilterConfig::new().with_selection(UserSelection::Member("Alice".into()));
        let report = build(ReportKind::All, &filter);
        assert!(report.members.is_none());
        assert_eq!(report.selection, "Alice");
        assert_eq!(report.summary.unwrap().stats.messages, 2);
    }

    #[test]
    fn test_render_csv_single_table() {
        let report = build(ReportKind::Emojis, &FilterConfig::new());
        assert_eq!(report.render(OutputFormat::Csv).unwrap(), "label;count\n😀;1\n");
    }

    #[test]
    fn test_render_csv_sections() {
        let report = build(ReportKind::All, &FilterConfig::new());
        let csv = report.render(OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("# summary\nkey;value\nmessages;4\n"));
        assert!(csv.contains("# heatmap\nDay;09-10;21-22\n"));
        assert!(csv.contains("# daily\ndate;count\n2024-03-01;3\n2024-03-02;1\n"));
    }

    #[test]
    fn test_render_json_skips_missing_sections() {
        let report = build(ReportKind::Monthly, &FilterConfig::new());
        let json = report.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["selection"], "Overall");
        assert_eq!(value["monthly"][0]["label"], "March-2024");
        assert!(value.get("summary").is_none());
    }

    #[test]
    fn test_render_text() {
        let report = build(ReportKind::Summary, &FilterConfig::new());
        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.contains("Analysis for: Overall"));
        assert!(text.contains("Messages:     4"));
        assert!(text.contains("Date range:   2024-03-01 to 2024-03-02 (2 days)"));
        assert!(text.contains("Average gap:  5m 00s"));
        assert!(text.contains("Busiest hour: 09-10"));
    }

    #[test]
    fn test_human_duration() {
        assert_eq!(human_duration(12), "12s");
        assert_eq!(human_duration(242), "4m 02s");
        assert_eq!(human_duration(3930), "1h 05m 30s");
    }
}
