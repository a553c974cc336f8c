//! Transcript parser: raw export text in, ordered message records out.
//!
//! Parsing is a pure function of the input text. The same text always yields
//! the same records, and malformed input only ever yields fewer records.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::TranscriptParser;
//! use chatlens::record::Author;
//!
//! let text = "12/1/23, 10:15 am - Alice: Hello there\n\
//!             12/1/23, 10:16 am - Bob joined using this group's invite link\n";
//!
//! let records = TranscriptParser::new().parse_str(text)?;
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].author, Author::member("Alice"));
//! assert_eq!(records[1].author, Author::System);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! # Invalid input
//!
//! [`TranscriptParser::parse_str`] returns an empty vector for text that is
//! not a transcript. [`Transcript`] turns that into
//! [`ChatlensError::UnrecognizedFormat`], the signal a caller shows as
//! "could not parse transcript":
//!
//! ```rust
//! use chatlens::parser::Transcript;
//!
//! let err = Transcript::parse("hello, world").unwrap_err();
//! assert!(err.is_unrecognized());
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{MismatchPolicy, ParserConfig};
use crate::core::filter::{FilterConfig, UserSelection, apply_filters};
use crate::error::{ChatlensError, Result};
use crate::parsing::{
    HeaderPattern, TimestampTemplate, normalize_header, split_sender, split_transcript,
    validate_export,
};
use crate::record::MessageRecord;

/// Everything a single parse produced, including what was detected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Surviving records, in transcript order.
    pub records: Vec<MessageRecord>,
    /// Header shape the text was split on, if any matched.
    pub pattern: Option<HeaderPattern>,
    /// Timestamp template chosen for the whole batch, if any parsed.
    pub template: Option<TimestampTemplate>,
    /// Number of headers matched.
    pub headers: usize,
    /// Headers dropped because their timestamp did not parse or they had no
    /// segment to pair with.
    pub dropped: usize,
}

impl ParseOutcome {
    /// Returns `true` if nothing could be extracted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parser for WhatsApp text exports.
///
/// Holds only configuration; one parser can be shared across threads and
/// reused for any number of transcripts.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::parser::TranscriptParser;
///
/// let parser = TranscriptParser::new();
/// let records = parser.parse("WhatsApp Chat with Alice.txt".as_ref())?;
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the file cannot be read,
    /// [`ChatlensError::Utf8`] if it is not UTF-8, and
    /// [`ChatlensError::SegmentMismatch`] in strict mode.
    pub fn parse(&self, path: &Path) -> Result<Vec<MessageRecord>> {
        let text = read_transcript(path)?;
        self.parse_str(&text)
    }

    /// Parses export text already in memory.
    ///
    /// Text without any recognizable header yields `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Only [`ChatlensError::SegmentMismatch`], and only in strict mode.
    pub fn parse_str(&self, text: &str) -> Result<Vec<MessageRecord>> {
        self.parse_detailed(text).map(|outcome| outcome.records)
    }

    /// Parses export text and reports what was detected along the way.
    pub fn parse_detailed(&self, text: &str) -> Result<ParseOutcome> {
        let Some(split) = split_transcript(text) else {
            debug!("no message header found");
            return Ok(ParseOutcome::default());
        };
        debug!(pattern = %split.pattern, headers = split.headers.len(), "detected header shape");

        if split.is_mismatched() {
            match self.config.mismatch {
                MismatchPolicy::Strict => {
                    return Err(ChatlensError::segment_mismatch(
                        split.headers.len(),
                        split.segments.len(),
                    ));
                }
                MismatchPolicy::Truncate => warn!(
                    headers = split.headers.len(),
                    segments = split.segments.len(),
                    "header and segment counts differ, truncating"
                ),
            }
        }

        let paired = split.paired_len();
        let stamps: Vec<String> = split.headers[..paired]
            .iter()
            .map(|header| normalize_header(header))
            .collect();

        let mut outcome = ParseOutcome {
            pattern: Some(split.pattern),
            headers: split.headers.len(),
            dropped: split.headers.len() - paired,
            ..ParseOutcome::default()
        };

        let Some(template) = TimestampTemplate::sniff(&stamps) else {
            warn!(headers = paired, "no timestamp template fits any header");
            outcome.dropped = outcome.headers;
            return Ok(outcome);
        };
        debug!(template = %template, "selected timestamp template");
        outcome.template = Some(template);

        outcome.records.reserve(paired);
        for (stamp, segment) in stamps.iter().zip(&split.segments) {
            let Some(timestamp) = template.parse(stamp) else {
                debug!(stamp = %stamp, "dropping header with unparseable timestamp");
                outcome.dropped += 1;
                continue;
            };
            let (author, body) = split_sender(segment);
            outcome
                .records
                .push(MessageRecord::new(timestamp, author, body));
        }

        if outcome.dropped > 0 {
            warn!(dropped = outcome.dropped, "some messages could not be parsed");
        }
        info!(records = outcome.records.len(), "parsed transcript");

        Ok(outcome)
    }

    /// Parses text into a [`Transcript`], rejecting text with no records.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::UnrecognizedFormat`] if no record survives,
    /// plus anything [`parse_str`](Self::parse_str) returns.
    pub fn load(&self, text: &str) -> Result<Transcript> {
        let outcome = self.parse_detailed(text)?;
        if let Some(transcript) = Transcript::from_outcome(outcome) {
            return Ok(transcript);
        }
        // More specific reason when the text is not even export-shaped
        validate_export(text)?;
        Err(ChatlensError::unrecognized(
            "no messages with a recognizable date header",
            None,
        ))
    }

    /// Reads and parses a file into a [`Transcript`].
    ///
    /// # Errors
    ///
    /// As [`load`](Self::load), plus I/O and UTF-8 errors. The path is
    /// attached to [`ChatlensError::UnrecognizedFormat`].
    pub fn load_file(&self, path: &Path) -> Result<Transcript> {
        let text = read_transcript(path)?;
        self.load(&text).map_err(|err| match err {
            ChatlensError::UnrecognizedFormat { message, .. } => {
                ChatlensError::unrecognized(message, Some(path.to_path_buf()))
            }
            other => other,
        })
    }
}

fn read_transcript(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|e| ChatlensError::utf8(format!("reading {}", path.display()), e))
}

/// An immutable, non-empty set of parsed records for one analysis session.
///
/// Cloning is cheap: clones share the same records. Queries hand out
/// borrowed views and never modify the set.
#[derive(Debug, Clone)]
pub struct Transcript {
    records: Arc<[MessageRecord]>,
    pattern: HeaderPattern,
    template: TimestampTemplate,
    dropped: usize,
}

impl Transcript {
    /// Parses text with the default parser configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::UnrecognizedFormat`] if no message survives.
    pub fn parse(text: &str) -> Result<Self> {
        TranscriptParser::new().load(text)
    }

    /// Reads and parses a file with the default parser configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        TranscriptParser::new().load_file(path)
    }

    fn from_outcome(outcome: ParseOutcome) -> Option<Self> {
        if outcome.records.is_empty() {
            return None;
        }
        Some(Self {
            records: outcome.records.into(),
            pattern: outcome.pattern?,
            template: outcome.template?,
            dropped: outcome.dropped,
        })
    }

    /// All records, in transcript order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// A shared handle to the records.
    pub fn shared(&self) -> Arc<[MessageRecord]> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header shape the transcript was split on.
    pub fn header_pattern(&self) -> HeaderPattern {
        self.pattern
    }

    /// Timestamp template applied to every header.
    pub fn template(&self) -> TimestampTemplate {
        self.template
    }

    /// Number of headers that did not make it into a record.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Distinct member names, sorted. System events are excluded.
    pub fn members(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.author.name())
            .map(str::to_string)
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Choices for a "show analysis for" picker: `Overall` first, then
    /// every member.
    pub fn selection_options(&self) -> Vec<UserSelection> {
        std::iter::once(UserSelection::Overall)
            .chain(self.members().into_iter().map(UserSelection::Member))
            .collect()
    }

    /// Returns `true` if `name` authored at least one message.
    pub fn has_member(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.author.name() == Some(name))
    }

    /// Borrowed view of the records matching `filter`.
    pub fn select(&self, filter: &FilterConfig) -> Vec<&MessageRecord> {
        apply_filters(&self.records, filter)
    }
}
