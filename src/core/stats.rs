//! Headline statistics over a record view.

use std::collections::HashSet;

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use super::content::extract_urls;
use super::{CountRow, ranked_counts};
use crate::record::MessageRecord;

/// Counts shown at the top of every report.
///
/// Words and links are counted over every body in the view, placeholders and
/// system events included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStats {
    pub messages: usize,
    pub words: usize,
    pub media: usize,
    pub links: usize,
}

impl ChatStats {
    pub fn collect(records: &[&MessageRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.messages += 1;
            acc.words += r.body.split_whitespace().count();
            acc.media += usize::from(r.is_media());
            acc.links += extract_urls(&r.body).len();
            acc
        })
    }
}

/// A member's share of all messages, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberShare {
    pub name: String,
    pub percent: f64,
}

/// Busiest authors plus everyone's share of the conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberRanking {
    /// The `top` busiest authors by message count.
    pub top: Vec<CountRow>,
    /// Every author's percentage, same order, rounded to two decimals.
    pub shares: Vec<MemberShare>,
}

/// Ranks authors by message count.
///
/// System events are ranked under `group_notification` and count towards the
/// denominator, so shares always add up to roughly 100.
pub fn busiest_members(records: &[&MessageRecord], top: usize) -> MemberRanking {
    let total = records.len();
    let ranked = ranked_counts(records.iter().map(|r| r.sender()));

    let shares = ranked
        .iter()
        .map(|&(name, count)| MemberShare {
            name: name.to_string(),
            percent: round2(count as f64 / total as f64 * 100.0),
        })
        .collect();

    let top = ranked
        .into_iter()
        .take(top)
        .map(|(name, count)| CountRow::new(name, count))
        .collect();

    MemberRanking { top, shares }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Body length statistics, in characters, over authored text messages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub mean: f64,
    pub max: usize,
    pub min: usize,
}

impl LengthStats {
    /// Returns `None` when the view has no authored text message.
    pub fn collect(records: &[&MessageRecord]) -> Option<Self> {
        let lengths: Vec<usize> = records
            .iter()
            .filter(|r| r.has_content())
            .map(|r| r.body.chars().count())
            .collect();

        let max = *lengths.iter().max()?;
        let min = *lengths.iter().min()?;
        let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;

        Some(Self { mean, max, min })
    }
}

/// Mean time between consecutive authored messages, in timestamp order.
///
/// System events are ignored. Returns `None` with fewer than two authored
/// messages.
pub fn average_gap(records: &[&MessageRecord]) -> Option<TimeDelta> {
    let mut stamps: Vec<_> = records
        .iter()
        .filter(|r| !r.is_system())
        .map(|r| r.timestamp)
        .collect();
    if stamps.len() < 2 {
        return None;
    }
    stamps.sort_unstable();

    // consecutive gaps telescope to last - first
    let span = *stamps.last()? - *stamps.first()?;
    Some(span / (stamps.len() - 1) as i32)
}

/// Hour of the day (0-23) with the most messages, and its count.
///
/// Ties go to the earliest hour.
pub fn most_active_hour(records: &[&MessageRecord]) -> Option<(u32, usize)> {
    let mut per_hour = [0usize; 24];
    for r in records {
        per_hour[r.hour as usize] += 1;
    }

    let mut best: Option<(u32, usize)> = None;
    for (hour, &count) in per_hour.iter().enumerate() {
        if count > 0 && best.is_none_or(|(_, c)| count > c) {
            best = Some((hour as u32, count));
        }
    }
    best
}

/// Summary of the whole conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatInfo {
    pub total_messages: usize,
    /// Distinct members, system events excluded.
    pub members: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Calendar days covered, both ends included.
    pub total_days: i64,
    /// More than two distinct authors, counting system events as one.
    pub is_group: bool,
}

impl ChatInfo {
    /// Returns `None` for an empty view.
    pub fn collect(records: &[&MessageRecord]) -> Option<Self> {
        let first_date = records.iter().map(|r| r.date).min()?;
        let last_date = records.iter().map(|r| r.date).max()?;

        let authors: HashSet<&str> = records.iter().map(|r| r.sender()).collect();
        let members = records
            .iter()
            .filter_map(|r| r.author.name())
            .collect::<HashSet<_>>()
            .len();

        Some(Self {
            total_messages: records.len(),
            members,
            first_date,
            last_date,
            total_days: (last_date - first_date).num_days() + 1,
            is_group: authors.len() > 2,
        })
    }

    /// Date range as `YYYY-MM-DD to YYYY-MM-DD`.
    pub fn date_range(&self) -> String {
        format!(
            "{} to {}",
            self.first_date.format("%Y-%m-%d"),
            self.last_date.format("%Y-%m-%d")
        )
    }
}
