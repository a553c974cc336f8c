//! Time-based groupings: timelines, activity maps and the weekday heatmap.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CountRow, ranked_counts};
use crate::record::{MessageRecord, WEEKDAYS, month_name};

/// Messages in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    /// `Month-YYYY`, e.g. `March-2024`.
    pub label: String,
    pub count: usize,
}

/// Messages on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub count: usize,
}

/// Message counts per month, in chronological order.
///
/// Months without messages are absent rather than zero.
pub fn monthly_timeline(records: &[&MessageRecord]) -> Vec<MonthlyPoint> {
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for r in records {
        *months.entry((r.year, r.month)).or_default() += 1;
    }

    months
        .into_iter()
        .map(|((year, month), count)| MonthlyPoint {
            year,
            month,
            label: format!("{}-{}", month_name(month), year),
            count,
        })
        .collect()
}

/// Message counts per date, in chronological order.
pub fn daily_timeline(records: &[&MessageRecord]) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in records {
        *days.entry(r.date).or_default() += 1;
    }
    days.into_iter()
        .map(|(date, count)| DailyPoint { date, count })
        .collect()
}

/// Message counts per weekday name, busiest first.
pub fn weekday_activity(records: &[&MessageRecord]) -> Vec<CountRow> {
    to_rows(ranked_counts(records.iter().map(|r| r.day_name.as_str())))
}

/// Message counts per month name (all years folded together), busiest first.
pub fn month_activity(records: &[&MessageRecord]) -> Vec<CountRow> {
    to_rows(ranked_counts(records.iter().map(|r| r.month_name.as_str())))
}

fn to_rows(ranked: Vec<(&str, usize)>) -> Vec<CountRow> {
    ranked
        .into_iter()
        .map(|(label, count)| CountRow::new(label, count))
        .collect()
}

/// Weekday × hour-bucket message counts.
///
/// Rows are weekday names in Monday..Sunday order, restricted to days that
/// occur. Columns are the hour buckets that occur, sorted. Every cell is
/// filled; combinations without messages are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<usize>>,
}

impl ActivityHeatmap {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count for one weekday and hour bucket, `None` if either is absent.
    pub fn get(&self, day: &str, bucket: &str) -> Option<usize> {
        let row = self.rows.iter().position(|r| r == day)?;
        let col = self.columns.iter().position(|c| c == bucket)?;
        Some(self.cells[row][col])
    }
}

/// Builds the weekday × hour-bucket heatmap.
pub fn activity_heatmap(records: &[&MessageRecord]) -> ActivityHeatmap {
    let mut counts: HashMap<(usize, &str), usize> = HashMap::new();
    let mut days = BTreeSet::new();
    let mut buckets = BTreeSet::new();

    for r in records {
        let day = r.weekday as usize;
        days.insert(day);
        buckets.insert(r.hour_bucket.as_str());
        *counts.entry((day, r.hour_bucket.as_str())).or_default() += 1;
    }

    let cells = days
        .iter()
        .map(|&day| {
            buckets
                .iter()
                .map(|&bucket| counts.get(&(day, bucket)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    ActivityHeatmap {
        rows: days.iter().map(|&d| WEEKDAYS[d].to_string()).collect(),
        columns: buckets.into_iter().map(str::to_string).collect(),
        cells,
    }
}
