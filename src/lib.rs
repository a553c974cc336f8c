//! # Chatlens
//!
//! A Rust library for turning WhatsApp chat exports into time-indexed message
//! records and activity reports.
//!
//! ## Overview
//!
//! A WhatsApp "Export chat" text file is a run of messages, each introduced by
//! a date header such as `12/1/23, 10:15 am - `. Chatlens:
//!
//! - detects which of the three header shapes the export uses (12-hour with a
//!   narrow or regular space before `am`/`pm`, or 24-hour)
//! - picks one date template for the whole file (day-first or month-first,
//!   2- or 4-digit year)
//! - splits each message into sender and body, marking join/leave lines as
//!   system events
//! - derives calendar fields (weekday, hour bucket, part of day, ...) once
//! - answers read-only questions about the result: busiest members, common
//!   words, emojis, timelines, a weekday × hour heatmap
//!
//! Malformed input never panics and never errors inside the parser; it only
//! produces fewer records.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = "12/1/23, 10:15 am - Alice: Hello there\n\
//!                 12/1/23, 10:16 am - Bob: Hi Alice 👋\n\
//!                 12/1/23, 10:17 am - Carol joined using this group's invite link\n";
//!
//!     let transcript = Transcript::parse(text)?;
//!     assert_eq!(transcript.members(), ["Alice", "Bob"]);
//!
//!     let everyone = transcript.select(&FilterConfig::new());
//!     let stats = ChatStats::collect(&everyone);
//!     assert_eq!(stats.messages, 3);
//!
//!     let emojis = emoji_counts(&everyone);
//!     assert_eq!(emojis[0].label, "👋");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser) and the
//!   shared, immutable [`Transcript`](parser::Transcript)
//! - [`parsing`] - header detection, timestamp sniffing, sender split
//! - [`record`] - [`MessageRecord`] and its derived fields
//! - [`config`] - parser and analysis configuration
//! - [`core`] - filtering, statistics, timelines, content scans, output
//! - [`report`] - assembled reports rendered as text, CSV or JSON
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - [`ChatlensError`] and [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;
pub mod record;
#[cfg(all(feature = "csv-output", feature = "json-output"))]
pub mod report;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use record::{Author, MessageRecord};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ChatlensError, Result};
    pub use crate::record::{Author, BodyKind, MessageRecord, TimeOfDay};

    pub use crate::config::{AnalysisConfig, MismatchPolicy, ParserConfig};
    pub use crate::parser::{Transcript, TranscriptParser};

    pub use crate::core::filter::{FilterConfig, UserSelection, apply_filters};
    pub use crate::core::{
        ChatInfo, ChatStats, CountRow, LengthStats, Stopwords, activity_heatmap, average_gap,
        busiest_members, daily_timeline, emoji_counts, month_activity, monthly_timeline,
        most_active_hour, most_common_words, weekday_activity,
    };

    pub use crate::format::OutputFormat;
}
