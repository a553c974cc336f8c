//! Message header detection and transcript splitting.
//!
//! Every message in an export starts with a header such as
//! `12/1/23, 10:15 am - `. The three header shapes below are tried in order
//! and the first one found anywhere in the text decides how the whole
//! document is split.

use std::sync::LazyLock;

use regex::Regex;

/// Date and clock prefix shared by every header shape.
const STAMP: &str = r"\d{1,2}/\d{1,2}/(?:\d{4}|\d{2}),\s\d{1,2}:\d{2}";

static NARROW_MERIDIEM: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"{STAMP}\x{{202F}}[aApP][mM]\s-\s")));

static SPACED_MERIDIEM: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"{STAMP}\s[aApP][mM]\s-\s")));

static TWENTY_FOUR_HOUR: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"{STAMP}\s-\s")));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| unreachable!("invalid header pattern {pattern}: {e}"))
}

/// Header shapes found in WhatsApp text exports, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderPattern {
    /// 12-hour clock with a narrow no-break space before the meridiem.
    /// Example: `12/1/23, 10:15\u{202F}am - `
    NarrowMeridiem,
    /// 12-hour clock with a regular space before the meridiem.
    /// Example: `12/1/23, 10:15 am - `
    SpacedMeridiem,
    /// 24-hour clock, no meridiem.
    /// Example: `12/1/2023, 22:15 - `
    TwentyFourHour,
}

impl HeaderPattern {
    /// Returns all header shapes in detection order.
    pub fn all() -> &'static [HeaderPattern] {
        &[
            HeaderPattern::NarrowMeridiem,
            HeaderPattern::SpacedMeridiem,
            HeaderPattern::TwentyFourHour,
        ]
    }

    /// Returns `true` for the 12-hour shapes.
    pub fn is_twelve_hour(self) -> bool {
        !matches!(self, HeaderPattern::TwentyFourHour)
    }

    fn detector(self) -> &'static Regex {
        match self {
            HeaderPattern::NarrowMeridiem => &NARROW_MERIDIEM,
            HeaderPattern::SpacedMeridiem => &SPACED_MERIDIEM,
            HeaderPattern::TwentyFourHour => &TWENTY_FOUR_HOUR,
        }
    }

    /// Regex used to cut the document into messages.
    ///
    /// Both 12-hour shapes split on either space variant, so an export mixing
    /// the two still yields one message per header.
    fn splitter(self) -> &'static Regex {
        match self {
            HeaderPattern::NarrowMeridiem | HeaderPattern::SpacedMeridiem => &SPACED_MERIDIEM,
            HeaderPattern::TwentyFourHour => &TWENTY_FOUR_HOUR,
        }
    }

    /// Returns the first header shape that occurs anywhere in `text`.
    pub fn detect(text: &str) -> Option<HeaderPattern> {
        Self::all()
            .iter()
            .copied()
            .find(|pattern| pattern.detector().is_match(text))
    }
}

impl std::fmt::Display for HeaderPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderPattern::NarrowMeridiem => write!(f, "12-hour (narrow space)"),
            HeaderPattern::SpacedMeridiem => write!(f, "12-hour"),
            HeaderPattern::TwentyFourHour => write!(f, "24-hour"),
        }
    }
}

/// A transcript cut into headers and the text that follows each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitTranscript<'a> {
    /// Header shape the document was split on.
    pub pattern: HeaderPattern,
    /// Matched header strings, in document order.
    pub headers: Vec<&'a str>,
    /// Text following each header. Anything before the first header is
    /// already discarded.
    pub segments: Vec<&'a str>,
}

impl SplitTranscript<'_> {
    /// Number of complete (header, segment) pairs.
    pub fn paired_len(&self) -> usize {
        self.headers.len().min(self.segments.len())
    }

    /// Returns `true` if header and segment counts disagree.
    pub fn is_mismatched(&self) -> bool {
        self.headers.len() != self.segments.len()
    }
}

/// Splits a transcript on its detected header shape.
///
/// Segments normally pair one-to-one with headers. The exception is an
/// export cut off right after its last header, which leaves one header
/// without a segment.
///
/// Returns `None` when no header shape matches, which callers report as an
/// unrecognized file.
pub fn split_transcript(text: &str) -> Option<SplitTranscript<'_>> {
    let pattern = HeaderPattern::detect(text)?;
    let splitter = pattern.splitter();

    let headers: Vec<&str> = splitter.find_iter(text).map(|m| m.as_str()).collect();
    let mut segments: Vec<&str> = splitter.split(text).skip(1).collect();

    // A header at the very end with nothing after it is a cut-off export,
    // not an empty message
    if segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }

    Some(SplitTranscript {
        pattern,
        headers,
        segments,
    })
}
