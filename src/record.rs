//! Time-indexed message record produced by the transcript parser.
//!
//! This module provides [`MessageRecord`], the normalized representation of one
//! chat message. Every temporal and categorical field the reports group by is
//! derived once, at parse time, from the record's timestamp.
//!
//! # Overview
//!
//! A record consists of:
//! - **Parsed**: `timestamp`, `author` and `body`
//! - **Derived**: calendar parts, names, `hour_bucket`, `time_of_day`, weekend flag
//!
//! # Examples
//!
//! ```
//! use chatlens::record::{Author, MessageRecord, TimeOfDay};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 12)
//!     .unwrap()
//!     .and_hms_opt(10, 15, 0)
//!     .unwrap();
//! let record = MessageRecord::new(ts, Author::member("Alice"), "Hello there");
//!
//! assert_eq!(record.sender(), "Alice");
//! assert_eq!(record.hour_bucket, "10-11");
//! assert_eq!(record.time_of_day, TimeOfDay::Morning);
//! ```

use std::fmt;

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Display name used for system events in reports and CSV output.
pub const SYSTEM_SENDER: &str = "group_notification";

/// Body text WhatsApp writes in place of an attachment.
pub const MEDIA_PLACEHOLDER: &str = "<Media omitted>";

/// Who produced a message.
///
/// Lines without a recognizable `Name: ` prefix (joins, leaves, subject
/// changes, encryption notices) are [`Author::System`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// A chat participant, by display name or phone number.
    Member(String),
    /// A system-generated event with no author.
    System,
}

impl Author {
    /// Creates a member author.
    pub fn member(name: impl Into<String>) -> Self {
        Author::Member(name.into())
    }

    /// Returns `true` for system events.
    pub fn is_system(&self) -> bool {
        matches!(self, Author::System)
    }

    /// Returns the member name, or `None` for system events.
    pub fn name(&self) -> Option<&str> {
        match self {
            Author::Member(name) => Some(name),
            Author::System => None,
        }
    }

    /// Returns the name used in reports ([`SYSTEM_SENDER`] for system events).
    pub fn as_str(&self) -> &str {
        match self {
            Author::Member(name) => name,
            Author::System => SYSTEM_SENDER,
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a body carries text or stands in for an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Text,
    MediaOmitted,
}

impl BodyKind {
    /// Classifies an already trimmed body.
    pub fn classify(body: &str) -> Self {
        if body == MEDIA_PLACEHOLDER {
            BodyKind::MediaOmitted
        } else {
            BodyKind::Text
        }
    }
}

/// Coarse part of the day a message was sent in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeOfDay {
    /// 05:00 to 11:59
    Morning,
    /// 12:00 to 16:59
    Afternoon,
    /// 17:00 to 20:59
    Evening,
    /// 21:00 to 04:59
    Night,
}

impl TimeOfDay {
    /// Maps an hour of the day (0-23) to its category.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed chat message with every derived field the reports use.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Local wall-clock time from the export |
/// | `author` | [`Author`] | Member or system event |
/// | `body` | `String` | Trimmed message text |
/// | `kind` | [`BodyKind`] | Text or media placeholder |
/// | `date` | `NaiveDate` | Calendar date of `timestamp` |
/// | `year`, `month`, `day` | integers | Calendar parts |
/// | `month_name`, `day_name` | `String` | English names |
/// | `hour`, `minute` | integers | Clock parts |
/// | `hour_bucket` | `String` | One-hour interval label, e.g. `"13-14"` |
/// | `weekday` | `u32` | Monday = 0 .. Sunday = 6 |
/// | `is_weekend` | `bool` | Saturday or Sunday |
/// | `time_of_day` | [`TimeOfDay`] | Coarse part of day |
///
/// Records are constructed through [`MessageRecord::new`], which guarantees
/// the derived fields agree with `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub timestamp: NaiveDateTime,
    pub author: Author,
    pub body: String,
    pub kind: BodyKind,

    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub day: u32,
    pub day_name: String,
    pub hour: u32,
    pub minute: u32,
    pub hour_bucket: String,
    pub weekday: u32,
    pub is_weekend: bool,
    pub time_of_day: TimeOfDay,
}

impl MessageRecord {
    /// Builds a record and derives all calendar fields from `timestamp`.
    ///
    /// The body is trimmed and classified as text or media placeholder.
    pub fn new(timestamp: NaiveDateTime, author: Author, body: impl Into<String>) -> Self {
        let body = body.into().trim().to_string();
        let kind = BodyKind::classify(&body);
        let weekday = timestamp.weekday();
        let hour = timestamp.hour();

        Self {
            timestamp,
            author,
            body,
            kind,
            date: timestamp.date(),
            year: timestamp.year(),
            month: timestamp.month(),
            month_name: month_name(timestamp.month()).to_string(),
            day: timestamp.day(),
            day_name: weekday_name(weekday).to_string(),
            hour,
            minute: timestamp.minute(),
            hour_bucket: hour_bucket(hour),
            weekday: weekday.num_days_from_monday(),
            is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            time_of_day: TimeOfDay::from_hour(hour),
        }
    }

    /// Returns the sender as shown in reports.
    pub fn sender(&self) -> &str {
        self.author.as_str()
    }

    /// Returns `true` if this record is a system event.
    pub fn is_system(&self) -> bool {
        self.author.is_system()
    }

    /// Returns `true` if the body is the media placeholder.
    pub fn is_media(&self) -> bool {
        self.kind == BodyKind::MediaOmitted
    }

    /// Returns `true` if the record counts towards content statistics
    /// (authored by a member and not a media placeholder).
    pub fn has_content(&self) -> bool {
        !self.is_system() && !self.is_media()
    }
}

/// Formats the one-hour interval label for an hour of the day.
///
/// Hour 23 wraps to `"23-00"` and hour 0 is `"00-01"`.
///
/// # Panics
///
/// Panics if `hour` is not a valid hour of the day; timestamps produced by
/// chrono never carry one.
pub fn hour_bucket(hour: u32) -> String {
    match hour {
        23 => "23-00".to_string(),
        0 => "00-01".to_string(),
        1..=22 => format!("{:02}-{:02}", hour, hour + 1),
        _ => unreachable!("hour out of range: {hour}"),
    }
}

/// English weekday name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// English month name for a month number (1-12).
///
/// # Panics
///
/// Panics on a month number outside 1-12.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or_else(|| unreachable!("month out of range: {month}"))
}

/// Weekday names in report order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
