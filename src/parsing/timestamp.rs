//! Header timestamp normalization and format sniffing.
//!
//! Exports do not say whether `5/6/23` means the 5th of June or the 6th of
//! May. The parser tries an ordered list of templates and keeps the first
//! one under which at least one header of the document parses; that single
//! template is then applied to every header.

use chrono::NaiveDateTime;

/// Narrow no-break space some exports put between the time and `am`/`pm`.
pub const NARROW_NBSP: char = '\u{202F}';

/// Date-time templates, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampTemplate {
    /// `D/M/YYYY, h:MM am`
    DayMonthFullYear12h,
    /// `D/M/YY, h:MM am`
    DayMonthShortYear12h,
    /// `M/D/YYYY, h:MM am`
    MonthDayFullYear12h,
    /// `M/D/YY, h:MM am`
    MonthDayShortYear12h,
    /// `D/M/YYYY, HH:MM`
    DayMonthFullYear24h,
    /// `D/M/YY, HH:MM`
    DayMonthShortYear24h,
}

impl TimestampTemplate {
    /// Returns all templates in sniffing order.
    pub fn all() -> &'static [TimestampTemplate] {
        &[
            TimestampTemplate::DayMonthFullYear12h,
            TimestampTemplate::DayMonthShortYear12h,
            TimestampTemplate::MonthDayFullYear12h,
            TimestampTemplate::MonthDayShortYear12h,
            TimestampTemplate::DayMonthFullYear24h,
            TimestampTemplate::DayMonthShortYear24h,
        ]
    }

    /// Returns the chrono format string for this template.
    pub fn format(self) -> &'static str {
        match self {
            TimestampTemplate::DayMonthFullYear12h => "%d/%m/%Y, %I:%M %p",
            TimestampTemplate::DayMonthShortYear12h => "%d/%m/%y, %I:%M %p",
            TimestampTemplate::MonthDayFullYear12h => "%m/%d/%Y, %I:%M %p",
            TimestampTemplate::MonthDayShortYear12h => "%m/%d/%y, %I:%M %p",
            TimestampTemplate::DayMonthFullYear24h => "%d/%m/%Y, %H:%M",
            TimestampTemplate::DayMonthShortYear24h => "%d/%m/%y, %H:%M",
        }
    }

    fn year_digits(self) -> usize {
        match self {
            TimestampTemplate::DayMonthFullYear12h
            | TimestampTemplate::MonthDayFullYear12h
            | TimestampTemplate::DayMonthFullYear24h => 4,
            TimestampTemplate::DayMonthShortYear12h
            | TimestampTemplate::MonthDayShortYear12h
            | TimestampTemplate::DayMonthShortYear24h => 2,
        }
    }

    /// Parses one normalized header stamp (see [`normalize_header`]).
    ///
    /// chrono's `%Y` happily reads `23` as the year 23, so the year width is
    /// checked before handing the stamp over.
    pub fn parse(self, stamp: &str) -> Option<NaiveDateTime> {
        if year_width(stamp)? != self.year_digits() {
            return None;
        }
        NaiveDateTime::parse_from_str(stamp, self.format()).ok()
    }

    /// Picks the first template under which at least one stamp parses.
    pub fn sniff<S: AsRef<str>>(stamps: &[S]) -> Option<TimestampTemplate> {
        Self::all()
            .iter()
            .copied()
            .find(|template| stamps.iter().any(|s| template.parse(s.as_ref()).is_some()))
    }
}

impl std::fmt::Display for TimestampTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.format())
    }
}

/// Number of digits in the year field of a stamp like `12/1/23, 10:15 am`.
fn year_width(stamp: &str) -> Option<usize> {
    let date = stamp.split(',').next()?;
    date.rsplit('/').next().map(|year| year.trim().len())
}

/// Turns a raw header into a parseable stamp.
///
/// Replaces the narrow no-break space with a regular space and strips the
/// trailing `" - "` separator: `"12/1/23, 10:15\u{202F}am - "` becomes
/// `"12/1/23, 10:15 am"`.
pub fn normalize_header(header: &str) -> String {
    let replaced = header.replace(NARROW_NBSP, " ");
    let trimmed = replaced.trim_end();
    trimmed
        .strip_suffix('-')
        .unwrap_or(trimmed)
        .trim_end()
        .to_string()
}
