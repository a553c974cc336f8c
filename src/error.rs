//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library.
//!
//! # What is (and is not) an error
//!
//! Malformed transcript text is never an error at the parser level: bad
//! headers and unparseable timestamps only mean fewer records. The errors here
//! cover I/O, the caller-side "this is not a transcript" contract
//! ([`ChatlensError::UnrecognizedFormat`]), the opt-in strict segment check,
//! invalid user-supplied filters, and report serialisation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::record::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred while reading a transcript or stopword list.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The text contains no recognizable message header.
    ///
    /// Empty and whitespace-only files end up here too.
    #[error("Could not parse transcript{}: {message}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    UnrecognizedFormat {
        /// Description of what's wrong
        message: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// Header and segment counts disagree and the parser runs in strict mode.
    #[error("Transcript is truncated: {headers} headers but {segments} message segments")]
    SegmentMismatch {
        /// Number of matched timestamp headers
        headers: usize,
        /// Number of text segments following a header
        segments: usize,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A member selection names someone who never wrote a message.
    #[error("No messages from '{name}' in this transcript")]
    UnknownMember {
        /// The requested display name
        name: String,
    },

    /// File content is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates an unrecognized-format error.
    pub fn unrecognized(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        ChatlensError::UnrecognizedFormat {
            message: message.into(),
            path,
        }
    }

    /// Creates a segment mismatch error.
    pub fn segment_mismatch(headers: usize, segments: usize) -> Self {
        ChatlensError::SegmentMismatch { headers, segments }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an unknown member error.
    pub fn unknown_member(name: impl Into<String>) -> Self {
        ChatlensError::UnknownMember { name: name.into() }
    }

    /// Creates a UTF-8 error with context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if the input was not recognized as a transcript.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, ChatlensError::UnrecognizedFormat { .. })
    }

    /// Returns `true` if this is a strict-mode segment mismatch.
    pub fn is_segment_mismatch(&self) -> bool {
        matches!(self, ChatlensError::SegmentMismatch { .. })
    }

    /// Returns `true` if this is an invalid date error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }
}
