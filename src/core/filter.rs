//! Filter records by selected member and date range.
//!
//! This module provides [`UserSelection`] for the "show analysis for" choice,
//! [`FilterConfig`] for defining filter criteria and [`apply_filters`] for
//! taking a borrowed view of a record set.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Member | [`with_sender`](FilterConfig::with_sender) | Records by one member |
//!
//! # Examples
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::parser::TranscriptParser;
//!
//! # fn main() -> chatlens::Result<()> {
//! let records = TranscriptParser::new().parse_str(
//!     "1/1/2024, 10:00 - Alice: Old\n15/6/2024, 10:00 - Alice: New\n15/6/2024, 10:05 - Bob: Hi\n",
//! )?;
//!
//! let config = FilterConfig::new()
//!     .with_sender("Alice")
//!     .with_date_from("2024-06-01")?;
//!
//! let filtered = apply_filters(&records, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Member matching is exact; display names are case sensitive
//! - Selecting a member never includes system events
//! - Multiple filters are combined with AND logic
//! - The input slice is never modified; results borrow from it

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ChatlensError;
use crate::record::MessageRecord;

/// Label of the "no filter" choice in member pickers.
pub const OVERALL: &str = "Overall";

/// Whose messages an analysis covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSelection {
    /// Every record, system events included.
    #[default]
    Overall,
    /// Only records authored by this member.
    Member(String),
}

impl UserSelection {
    /// Returns `true` if `record` belongs to this selection.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        match self {
            UserSelection::Overall => true,
            UserSelection::Member(name) => record.author.name() == Some(name.as_str()),
        }
    }

    /// Returns the member name, or `None` for [`UserSelection::Overall`].
    pub fn member(&self) -> Option<&str> {
        match self {
            UserSelection::Overall => None,
            UserSelection::Member(name) => Some(name),
        }
    }
}

impl FromStr for UserSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == OVERALL {
            UserSelection::Overall
        } else {
            UserSelection::Member(s.to_string())
        })
    }
}

impl fmt::Display for UserSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSelection::Overall => f.write_str(OVERALL),
            UserSelection::Member(name) => f.write_str(name),
        }
    }
}

/// Configuration for filtering records by member and date.
///
/// # Examples
///
/// ```
/// use chatlens::core::filter::FilterConfig;
///
/// # fn main() -> chatlens::Result<()> {
/// let by_date = FilterConfig::new()
///     .with_date_from("2024-01-01")?
///     .with_date_to("2024-12-31")?;
/// assert!(by_date.has_date_filter());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Member selection (default: overall).
    pub selection: UserSelection,

    /// Include only records on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only records on or before this timestamp.
    pub before: Option<NaiveDateTime>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.after = Some(parse_date(date_str)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// The whole day is included.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
            .unwrap_or_else(|| unreachable!("23:59:59 is a valid time"));
        self.before = Some(parse_date(date_str)?.and_time(end_of_day));
        Ok(self)
    }

    /// Restricts the view to one member.
    #[must_use]
    pub fn with_sender(self, sender: impl Into<String>) -> Self {
        self.with_selection(UserSelection::Member(sender.into()))
    }

    /// Sets the member selection.
    #[must_use]
    pub fn with_selection(mut self, selection: UserSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_user_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if a member is selected.
    pub fn has_user_filter(&self) -> bool {
        self.selection != UserSelection::Overall
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        self.selection.matches(record)
            && self.after.is_none_or(|after| record.timestamp >= after)
            && self.before.is_none_or(|before| record.timestamp <= before)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Returns the records matching `config`, in their original order.
///
/// # Examples
///
/// ```
/// use chatlens::core::filter::{FilterConfig, UserSelection, apply_filters};
/// use chatlens::parser::TranscriptParser;
///
/// # fn main() -> chatlens::Result<()> {
/// let records = TranscriptParser::new()
///     .parse_str("1/1/2024, 10:00 - Alice: Hi\n1/1/2024, 10:01 - Bob left\n")?;
///
/// let overall = FilterConfig::new().with_selection("Overall".parse().unwrap());
/// assert_eq!(apply_filters(&records, &overall).len(), 2);
///
/// let alice = FilterConfig::new().with_selection(UserSelection::Member("Alice".into()));
/// assert_eq!(apply_filters(&records, &alice).len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn apply_filters<'a>(records: &'a [MessageRecord], config: &FilterConfig) -> Vec<&'a MessageRecord> {
    records.iter().filter(|r| config.matches(r)).collect()
}

/// Narrows a view to records that count towards content statistics:
/// authored by a member and not a media placeholder.
pub fn content_view<'a>(records: &[&'a MessageRecord]) -> Vec<&'a MessageRecord> {
    records.iter().copied().filter(|r| r.has_content()).collect()
}
