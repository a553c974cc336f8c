//! Read-only analysis over a parsed record set.
//!
//! This module contains:
//! - [`filter`] - Member selection and date range filtering
//! - [`stats`] - Headline counts, busiest members, message lengths, gaps
//! - [`timeline`] - Monthly/daily timelines, activity maps and the heatmap
//! - [`content`] - Stopwords, word frequency, emoji counts, URLs
//! - [`output`] - Report serialisation (CSV, JSON)
//!
//! Every aggregation takes a borrowed view (`&[&MessageRecord]`) and returns
//! owned tables; none of them touches the records themselves.
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::core::{FilterConfig, ChatStats, monthly_timeline};
//! use chatlens::parser::Transcript;
//!
//! # fn main() -> chatlens::Result<()> {
//! let transcript = Transcript::parse("1/1/2024, 10:00 - Alice: Hi https://example.com\n")?;
//! let view = transcript.select(&FilterConfig::new());
//!
//! let stats = ChatStats::collect(&view);
//! assert_eq!(stats.links, 1);
//!
//! let timeline = monthly_timeline(&view);
//! assert_eq!(timeline[0].label, "January-2024");
//! # Ok(())
//! # }
//! ```

pub mod content;
pub mod filter;
pub mod output;
pub mod stats;
pub mod timeline;

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub use content::{
    Stopwords, emoji_counts, extract_urls, most_common_words, word_cloud_corpus,
};
pub use filter::{FilterConfig, UserSelection, apply_filters, content_view};
pub use stats::{
    ChatInfo, ChatStats, LengthStats, MemberRanking, MemberShare, average_gap, busiest_members,
    most_active_hour,
};
pub use timeline::{
    ActivityHeatmap, DailyPoint, MonthlyPoint, activity_heatmap, daily_timeline, month_activity,
    monthly_timeline, weekday_activity,
};

#[cfg(feature = "csv-output")]
pub use output::{heatmap_to_csv, to_csv};
#[cfg(feature = "json-output")]
pub use output::to_json;

/// One row of a count table: a label and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
}

impl CountRow {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Counts keys, then orders them by count descending.
///
/// Equal counts keep the order in which the key was first seen.
pub(crate) fn ranked_counts<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for key in keys {
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
